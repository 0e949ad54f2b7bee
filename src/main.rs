use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;
use volnorm::app::App;
use volnorm::args::Options;

fn main() -> Result<()> {
    color_eyre::install()?;
    let options = Options::parse();
    init_tracing(options.verbose);

    App::new(options).run()
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}
