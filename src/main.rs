use bank_ledger::common::error::AppError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "bank_ledger=warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match bank_ledger::app::run(std::env::args()) {
        Ok(()) => {}
        Err(AppError::Cli(e)) => e.exit(),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
