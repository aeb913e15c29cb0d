use clap::{Parser as ClapParser, Subcommand};
use sqlog::cli::{self, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "sqlog")]
#[command(about = "sqlog - A SQL-like query language for filtering, projecting, and aggregating log records")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a sqlog query and optionally dump its compiled form
    Check {
        /// The query to compile (reads from stdin if not provided)
        query: Option<String>,

        /// Dump the compiled statement
        #[arg(long)]
        ast: bool,

        /// Render the compiled statement as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print the JSON rendering
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            query,
            ast,
            json,
            pretty,
        } => run_check(query, ast, json, pretty),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(query: Option<String>, ast: bool, json: bool, pretty: bool) -> Result<(), CliError> {
    let query = match query {
        Some(q) => q,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Io)?;
            buffer.trim().to_string()
        }
        None => return Err(CliError::NoQuery),
    };

    let options = CheckOptions {
        query,
        ast,
        json,
        pretty,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Ast(dump) => println!("{}", dump),
        CheckResult::Json(rendered) => println!("{}", rendered),
    }
    Ok(())
}
