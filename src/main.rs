use clap::Parser;
use cachesim::ui::{self, CacheSimArgs};

pub fn main() -> anyhow::Result<()> {
    let argv = CacheSimArgs::parse();
    ui::run(&argv)?;
    Ok(())
}
