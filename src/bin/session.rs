//! Check a session id and print the list it belongs to.

use std::process::ExitCode;

use clap::Parser;
use eetlijst::{Config, Eetlijst};

#[derive(Parser, Debug)]
#[command(
    name = "session",
    version = env!("CARGO_PKG_VERSION"),
    about = "Show which Eetlijst.nl list a session id belongs to",
    long_about = None
)]
struct Cli {
    session_id: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let built = Eetlijst::builder()
        .session_id(cli.session_id.to_lowercase())
        .config(Config::from_env())
        .build();
    let mut client = match built {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if client.connect().await.is_err() {
        eprintln!("Session id is probably expired or invalid.");
        return ExitCode::FAILURE;
    }

    match client.name().await {
        Ok(name) => {
            println!("Session id belongs to list with name '{name}'.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
