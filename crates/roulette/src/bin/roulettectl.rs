use anyhow::Context;
use clap::{Parser, Subcommand};
use roulette::sys::socket_path;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "roulettectl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Open the wheel.
    Open,
    /// Close the wheel, keeping the current value.
    Close,
    /// Open the wheel if closed, close it otherwise.
    Toggle,
    /// Print the committed value.
    Value,
}

impl Commands {
    fn as_str(self) -> &'static str {
        match self {
            Commands::Open => "open",
            Commands::Close => "close",
            Commands::Toggle => "toggle",
            Commands::Value => "value",
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut stream = connect()?;
    writeln!(stream, "{}", cli.command.as_str())?;
    log::debug!("Sent command: {}", cli.command.as_str());

    if let Commands::Value = cli.command {
        let mut value = String::new();
        BufReader::new(&stream)
            .read_line(&mut value)
            .context("Failed to read value from roulette")?;
        println!("{}", value.trim_end());
    }
    Ok(())
}

fn connect() -> anyhow::Result<UnixStream> {
    let path = socket_path();
    UnixStream::connect(&path).with_context(|| {
        format!(
            "Failed to connect to roulette at {}. Is roulette running?",
            path.display()
        )
    })
}
