#[cfg(test)]
mod level_tests;
#[cfg(test)]
mod set_tests;
