use clap::{Parser as ClapParser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tme_format::cli::{self, CheckOptions, CliError, DumpOptions, Input};
use tracing::Level;

#[derive(ClapParser)]
#[command(name = "tme")]
#[command(about = "tme - Validate and inspect TME gradebook exports")]
#[command(version)]
struct Cli {
    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Tokenize on a background thread
    #[arg(long, global = true)]
    threaded: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the inputs and check that node ids are unique
    Check {
        /// TME files (reads from stdin if none are given)
        files: Vec<PathBuf>,
    },

    /// Print the parsed nodes as JSON
    Dump {
        /// TME files (reads from stdin if none are given)
        files: Vec<PathBuf>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only nodes whose name matches this regex
        #[arg(short, long)]
        name: Option<String>,

        /// Only the node with this id
        #[arg(long)]
        id: Option<i32>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check { files } => run_check(files, cli.threaded),
        Commands::Dump {
            files,
            pretty,
            name,
            id,
        } => run_dump(files, cli.threaded, pretty, name, id),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init();
}

fn read_inputs(files: Vec<PathBuf>) -> Result<Vec<Input>, CliError> {
    if files.is_empty() {
        if atty::is(atty::Stream::Stdin) {
            return Err(CliError::NoInput);
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(vec![Input::new("<stdin>", buffer)]);
    }

    files
        .into_iter()
        .map(|path| -> Result<Input, CliError> {
            let text = fs::read_to_string(&path)?;
            Ok(Input::new(path.display().to_string(), text))
        })
        .collect()
}

fn run_check(files: Vec<PathBuf>, threaded: bool) -> Result<(), CliError> {
    let options = CheckOptions {
        inputs: read_inputs(files)?,
        threaded,
    };

    let report = cli::execute_check(&options)?;
    println!("{}", report);
    Ok(())
}

fn run_dump(
    files: Vec<PathBuf>,
    threaded: bool,
    pretty: bool,
    name: Option<String>,
    id: Option<i32>,
) -> Result<(), CliError> {
    let options = DumpOptions {
        inputs: read_inputs(files)?,
        threaded,
        pretty,
        name,
        id,
    };

    println!("{}", cli::execute_dump(&options)?);
    Ok(())
}
