use std::io::{stdin, stdout};

use clap::Parser;
use tracing::info;

use crate::{
    common::{clock::SystemClock, error::AppError},
    config::Config,
    console::Console,
    worker::processor::Processor,
};

pub fn run<I, S>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(|s| s.into()).collect();
    let config = Config::try_parse_from(args)?;

    let storage = config.storage();
    info!(
        accounts = %storage.accounts_path().display(),
        logs = %storage.logs_path().display(),
        "opening ledger"
    );
    let mut processor = Processor::load(storage, SystemClock)?;

    let stdin = stdin();
    let stdout = stdout();
    Console::new(stdin.lock(), stdout.lock(), &config).run(&mut processor)?;

    Ok(())
}
