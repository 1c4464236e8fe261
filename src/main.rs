use clap::{Parser as ClapParser, Subcommand};
use spl_lang::cli::{self, CliError, RunOptions, RunResult};
use std::io::{self, Read};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(ClapParser)]
#[command(name = "spl")]
#[command(about = "spl - Splunk-style search pipelines over JSON records")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and execute a query
    Run {
        /// The query to execute
        query: String,

        /// JSON input: one object or an array of objects (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't execute
        #[arg(long)]
        syntax_only: bool,

        /// Log every pipeline stage to stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// List documentation topics
    Docs,

    /// Show documentation for a specific topic
    Doc {
        /// Topic name (use 'spl docs' to list topics)
        topic: String,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "spl_lang=debug" } else { "spl_lang=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            query,
            input,
            pretty,
            syntax_only,
            verbose,
        } => {
            init_tracing(verbose);
            run(query, input, pretty, syntax_only)
        }
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { topic } => cli::get_doc_topic(&topic).map(|content| print!("{}", content)),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(
    query: String,
    input: Option<String>,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !syntax_only && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = RunOptions {
        query,
        input,
        syntax_only,
    };

    match cli::execute_run(&options)? {
        RunResult::SyntaxValid { stages } => println!("Syntax is valid ({} stages)", stages),
        RunResult::Success(output) => {
            let json = if pretty {
                serde_json::to_string_pretty(&output)
            } else {
                serde_json::to_string(&output)
            }?;
            println!("{}", json);
        }
    }
    Ok(())
}
