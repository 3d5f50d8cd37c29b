use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use famr_cli::output::print_error;
use famr_cli::{run, Cli};

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays parseable.
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match run(&cli) {
        Ok(out) => println!("{}", out),
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
