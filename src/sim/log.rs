use env_logger::{Builder, Env};
use log::LevelFilter;

/// Maps the numeric verbosity used by the config file and `--log`:
/// 0 warnings only, 1 run summaries, 2 per-access decisions, 3+ every fill.
pub fn to_level_filter(ulevel: u64) -> LevelFilter {
    match ulevel {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the global logger. `RUST_LOG`, when set, wins over `ulevel`.
/// Calling this twice is harmless.
pub fn init(ulevel: u64) {
    let env = Env::default();
    let mut builder = Builder::from_env(env);
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(to_level_filter(ulevel));
    }
    let _ = builder.format_timestamp(None).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels_map_in_order() {
        assert_eq!(to_level_filter(0), LevelFilter::Warn);
        assert_eq!(to_level_filter(1), LevelFilter::Info);
        assert_eq!(to_level_filter(2), LevelFilter::Debug);
        assert_eq!(to_level_filter(3), LevelFilter::Trace);
        assert_eq!(to_level_filter(9), LevelFilter::Trace);
    }
}
