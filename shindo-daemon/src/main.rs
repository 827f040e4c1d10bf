use anyhow::Result;
use clap::Parser;
use log::info;

use shindo_daemon::{run, Args, DaemonSettings};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    let mut settings = match &args.config {
        Some(path) => DaemonSettings::load(path)?,
        None => DaemonSettings::default(),
    };
    args.apply(&mut settings);
    settings.validate()?;

    info!("shindo {} writing to {}", shindo_core::VERSION, settings.output.display());

    match &args.replay {
        Some(recording) => run::replay(&settings, recording, args.trace.as_deref()).map(|_| ()),
        None => run::live(&settings).map(|_| ()),
    }
}
