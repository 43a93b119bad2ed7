//! Print or replace the noticeboard of a list.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use eetlijst::{Config, Eetlijst, Error};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Action {
    Get,
    Set,
}

#[derive(Parser, Debug)]
#[command(
    name = "noticeboard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Print or replace the Eetlijst.nl noticeboard",
    long_about = None
)]
struct Cli {
    username: String,
    password: String,
    #[arg(value_enum, ignore_case = true)]
    action: Action,
}

fn read_message() -> io::Result<String> {
    print!("Type a new noticeboard message: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

async fn run(client: &mut Eetlijst, action: Action) -> eetlijst::Result<ExitCode> {
    match action {
        Action::Get => println!("{}", client.noticeboard().await?),
        Action::Set => {
            let message = read_message().map_err(|e| Error::invalid_input(&e.to_string()))?;
            if message.is_empty() {
                println!("Empty message. Noticeboard not changed");
                return Ok(ExitCode::FAILURE);
            }
            client.set_noticeboard(&message).await?;
            println!("Notice board updated");
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let built = Eetlijst::builder()
        .username(cli.username)
        .password(cli.password)
        .config(Config::from_env())
        .build();
    let mut client = match built {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = client.connect().await {
        match e {
            Error::Login(_) => eprintln!("Username and/or password incorrect"),
            e => eprintln!("{e}"),
        }
        return ExitCode::FAILURE;
    }

    run(&mut client, cli.action).await.unwrap_or_else(|e| {
        eprintln!("{e}");
        ExitCode::FAILURE
    })
}
