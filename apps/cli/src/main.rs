use std::io;

use clap::Parser;
use fxfolio_cli::cli::Cli;
use fxfolio_cli::config::Config;
use fxfolio_cli::{diagnostic_sink_for, init_tracing, run};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let sink = diagnostic_sink_for(cli.format);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    run(&cli, &config, sink, &mut input, &mut out)?;
    Ok(())
}
