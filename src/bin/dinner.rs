//! Show or change today's dinner status.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use eetlijst::{Config, Eetlijst, Error, StatusRow};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Action {
    Get,
    Set,
}

#[derive(Parser, Debug)]
#[command(
    name = "dinner",
    version = env!("CARGO_PKG_VERSION"),
    about = "Show or change today's dinner status on Eetlijst.nl",
    long_about = None
)]
struct Cli {
    username: String,
    password: String,
    #[arg(value_enum, ignore_case = true)]
    action: Action,

    /// Print the row as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn label(value: Option<i32>) -> String {
    match value {
        None => "?".to_string(),
        Some(0) => "X".to_string(),
        Some(1) => "C".to_string(),
        Some(-1) => "D".to_string(),
        Some(v) if v > 1 => format!("C + {}", v - 1),
        Some(v) => format!("D + {}", -v - 1),
    }
}

fn render(residents: &[String], row: &StatusRow) -> (String, String) {
    let (names, values): (Vec<String>, Vec<String>) = residents
        .iter()
        .zip(&row.statuses)
        .map(|(name, status)| {
            let value = label(status.value);
            let width = name.chars().count().max(value.chars().count());
            (format!("{name:^width$}"), format!("{value:^width$}"))
        })
        .unzip();
    (names.join(" | "), values.join(" | "))
}

fn prompt(message: &str) -> io::Result<String> {
    let stdin = io::stdin();
    loop {
        print!("{message}");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no input"));
        }
        let line = line.trim();
        if !line.is_empty() {
            return Ok(line.to_string());
        }
    }
}

async fn get_action(client: &mut Eetlijst, json: bool) -> eetlijst::Result<()> {
    let residents = client.residents().await?;
    let rows = client.statuses(Some(1)).await?;
    let Some(row) = rows.first() else {
        println!("No dinner rows found.");
        return Ok(());
    };

    if json {
        match serde_json::to_string_pretty(row) {
            Ok(out) => println!("{out}"),
            Err(e) => eprintln!("Cannot serialize row: {e}"),
        }
        return Ok(());
    }

    print!("Dinner status for {}. ", row.timestamp);
    match row.deadline {
        Some(deadline) if row.has_deadline_passed() => {
            println!("The deadline is {}, and has passed.\n", deadline.time());
        }
        Some(deadline) => println!(
            "The deadline is {}, so there is {} left.\n",
            deadline.time(),
            row.time_left()
        ),
        None => println!("There is no deadline.\n"),
    }

    println!(
        "In total, {} people (including cooks and guests) will attend dinner.\n",
        row.count(None)
    );
    let (names, values) = render(&residents, row);
    println!("{names}");
    println!("{values}\n");
    println!("X = No, C = Cook, D = Diner, ? = Unknown");
    Ok(())
}

async fn set_action(client: &mut Eetlijst) -> eetlijst::Result<()> {
    let residents = client.residents().await?;
    let rows = client.statuses(Some(1)).await?;
    let Some(row) = rows.first() else {
        println!("No dinner rows found.");
        return Ok(());
    };

    if let Some(deadline) = row.deadline.filter(|_| row.has_deadline_passed()) {
        println!(
            "The deadline is {}, and has passed. Changing status is not possible today.",
            deadline.time()
        );
        return Ok(());
    }

    println!("Available residents:");
    for (index, resident) in residents.iter().enumerate() {
        println!("* {index}: {resident}");
    }
    let index = loop {
        let answer = prompt("Pick a number: ").map_err(|e| Error::invalid_input(&e.to_string()))?;
        if let Ok(index) = answer.parse::<usize>() {
            break index;
        }
    };

    println!("Available values:");
    println!("* None: no status");
    println!("* -N: take dinner");
    println!("* 0: don't take dinner");
    println!("* +N: take dinner and cook");
    let value = loop {
        let answer = prompt("Pick a value: ").map_err(|e| Error::invalid_input(&e.to_string()))?;
        if answer.eq_ignore_ascii_case("none") {
            break None;
        }
        if let Ok(value) = answer.parse::<i32>() {
            break Some(value);
        }
    };

    client.set_status(index, value, &row.timestamp).await?;
    println!("Value changed.");
    Ok(())
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

    let result = match cli.action {
        Action::Get => get_action(&mut client, cli.json).await,
        Action::Set => set_action(&mut client).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
