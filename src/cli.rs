use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Log more (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the LL(1) table of a grammar
    Table {
        /// File containing the grammar
        file: PathBuf,
    },

    /// Generate the source of a parser for a grammar
    Generate {
        /// File containing the grammar
        file: PathBuf,

        /// Write the parser here instead of to standard output
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Module path the parser imports the runtime from
        #[arg(long, value_name = "PATH", default_value = "lligator::runtime")]
        runtime: String,

        /// Leave the table out of the header comment
        #[arg(long)]
        no_table: bool,
    },

    /// Parse a text with the table of a grammar
    Parse {
        /// File containing the grammar
        file: PathBuf,

        /// Text to parse (default: standard input)
        input: Option<String>,

        /// Print the parse tree
        #[arg(long)]
        tree: bool,
    },

    /// Generate random sentences of a grammar
    Sample {
        /// File containing the grammar
        file: PathBuf,

        /// Start symbol (default: the axiom)
        #[arg(short, long, value_name = "SYMBOL")]
        start: Option<String>,

        /// Amount to generate (default: 1)
        #[arg(short = 'n', long, value_name = "AMOUNT")]
        amount: Option<u32>,

        /// Seed of the random generator
        #[arg(long)]
        seed: Option<u64>,

        /// Depth after which derivations take the shortest way out
        #[arg(long, value_name = "DEPTH", default_value_t = 12)]
        max_depth: usize,
    },

    /// Evaluate an arithmetic expression with the bundled calculator
    Calc {
        expression: String,
    },
}
