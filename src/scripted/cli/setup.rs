use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scripted", bin_name = "scripted", version)]
#[command(about = "Numbered text banks with cross-reference resolution", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Bank directory (defaults to $SCRIPTED_HOME, then the user data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a bank, creating it if it does not exist
    #[command(alias = "o", display_order = 1)]
    Open {
        /// Bank (x00001, 00001 or x00001.txt)
        bank: String,
    },

    /// Load every bank in the directory and list them
    #[command(display_order = 2)]
    Preload,

    /// List banks in the directory
    #[command(alias = "ls", display_order = 3)]
    List,

    /// Show the raw entries of a bank
    #[command(alias = "v", display_order = 4)]
    Show {
        bank: String,

        /// Only rows whose register, address or value contain this
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Set one entry and save the bank
    #[command(display_order = 10)]
    Set {
        bank: String,

        /// Address, in the configured base
        addr: String,

        /// Value words (joined with spaces)
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        value: Vec<String>,

        /// Register, in the configured base
        #[arg(short, long)]
        reg: Option<String>,
    },

    /// Delete one entry and save the bank
    #[command(alias = "rm", display_order = 11)]
    Delete {
        bank: String,

        /// Address, in the configured base
        addr: String,

        /// Register, in the configured base
        #[arg(short, long)]
        reg: Option<String>,
    },

    /// Resolve every entry of a bank into out/<bank>.resolved.txt
    #[command(alias = "r", display_order = 20)]
    Resolve {
        bank: String,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Export a bank as JSON into out/<bank>.json
    #[command(display_order = 21)]
    Export {
        bank: String,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Resolve an arbitrary text
    #[command(display_order = 22)]
    Get {
        /// Text words (joined with spaces), e.g. "1.1.1" or "x00002.0001"
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Show the active configuration
    #[command(display_order = 30)]
    Config,
}
