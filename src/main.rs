// src/main.rs

use clap::Parser;

use hashstamp::cli::CliArgs;
use hashstamp::logging::init_logging;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    if let Err(err) = init_logging(args.log_level) {
        eprintln!("hashstamp: failed to initialise logging: {err}");
        std::process::exit(1);
    }

    if let Err(err) = hashstamp::run(args).await {
        eprintln!("hashstamp: {err}");
        std::process::exit(1);
    }
}
