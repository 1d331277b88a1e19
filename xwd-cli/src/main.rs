//! xwd CLI - inspect, validate and solve `.puz` crossword files.

mod commands;
mod utils;

use clap::{ArgAction, Parser, Subcommand};
use commands::{
    EditAction, cmd_check, cmd_edit, cmd_grid, cmd_info, cmd_repair, cmd_test, cmd_words,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "XWD_LOG";

#[derive(Parser)]
#[command(name = "xwd")]
#[command(author, version, about = "Pure Rust tool for Across Lite .puz crosswords")]
#[command(long_about = "
xwd reads, validates and edits Across Lite .puz crossword files.
Every checksum is verified on load; extension sections it does not
understand are carried through a save untouched.

Logging goes to stderr. Set XWD_LOG (e.g. XWD_LOG=debug) or pass -v.

Examples:
  xwd info daily.puz
  xwd info daily.puz --json
  xwd test *.puz -X 'draft-*'
  xwd grid daily.puz --solution
  xwd words daily.puz
  xwd fill daily.puz 0 0 C
  xwd fill daily.puz 4 7 HEART -o solved.puz
  xwd check daily.puz --save
  xwd repair broken.puz -o fixed.puz
")]
struct Cli {
    /// More output; repeat for debug and trace logging
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show header fields, sections, counters and timer
    #[command(alias = "i")]
    Info {
        /// Puzzle file
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Load even if checksums fail
        #[arg(short, long)]
        force: bool,
    },

    /// Verify every checksum of one or more files
    #[command(alias = "t")]
    Test {
        /// Puzzle files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Test only files whose name matches pattern (glob syntax)
        #[arg(short = 'I', long)]
        include: Vec<String>,

        /// Skip files whose name matches pattern (glob syntax)
        #[arg(short = 'X', long)]
        exclude: Vec<String>,
    },

    /// Print the grid
    #[command(alias = "g")]
    Grid {
        /// Puzzle file
        file: PathBuf,

        /// Print the solution instead of the current fill
        #[arg(short, long)]
        solution: bool,

        /// Load even if checksums fail
        #[arg(short, long)]
        force: bool,
    },

    /// List numbered clues with answers
    #[command(alias = "w")]
    Words {
        /// Puzzle file
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Enter a letter, symbol or rebus into a cell
    Fill {
        /// Puzzle file
        file: PathBuf,

        /// Zero-based row
        row: usize,

        /// Zero-based column
        col: usize,

        /// Cell content
        text: String,

        /// Write here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Erase a cell
    Clear {
        /// Puzzle file
        file: PathBuf,

        /// Zero-based row
        row: usize,

        /// Zero-based column
        col: usize,

        /// Write here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check every cell against the solution
    #[command(alias = "c")]
    Check {
        /// Puzzle file
        file: PathBuf,

        /// Save the check marks back to the file
        #[arg(short, long)]
        save: bool,
    },

    /// Rewrite a file with freshly computed checksums
    Repair {
        /// Damaged puzzle file
        file: PathBuf,

        /// Repaired output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let verbose = cli.verbose > 0;

    let result = match cli.command {
        Commands::Info { file, json, force } => cmd_info(&file, json, force),
        Commands::Test {
            files,
            include,
            exclude,
        } => cmd_test(&files, verbose, &include, &exclude),
        Commands::Grid {
            file,
            solution,
            force,
        } => cmd_grid(&file, solution, force),
        Commands::Words { file, json } => cmd_words(&file, json),
        Commands::Fill {
            file,
            row,
            col,
            text,
            output,
        } => cmd_edit(
            &file,
            row,
            col,
            EditAction::Fill(&text),
            output.as_deref(),
        ),
        Commands::Clear {
            file,
            row,
            col,
            output,
        } => cmd_edit(&file, row, col, EditAction::Clear, output.as_deref()),
        Commands::Check { file, save } => cmd_check(&file, save, verbose),
        Commands::Repair { file, output } => cmd_repair(&file, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
