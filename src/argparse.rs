use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub fn parse() -> Cli {
    Cli::parse()
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Turn console debugging information on
    #[arg(short, long)]
    pub console: bool,

    /// Log to a file
    #[arg(short, long, value_name = "FILE", default_value = "monnit.log")]
    pub log_file: PathBuf,

    /// Verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// API authorization key, overrides MONNIT_AUTH_KEY
    #[arg(short, long, value_name = "KEY")]
    pub auth_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all sensors
    List {
        /// Only sensors of this application (sensor type) id
        #[arg(long, value_name = "ID")]
        application_id: Option<String>,
    },

    /// Show a single sensor
    Get {
        /// Sensor id
        sensor_id: String,
    },

    /// Average the current readings
    Average {
        /// Only sensors of this application (sensor type) id
        #[arg(long, value_name = "ID")]
        application_id: Option<String>,

        /// Sensor to include, may be repeated
        #[arg(short, long, value_name = "ID", action = clap::ArgAction::Append)]
        sensor_id: Vec<String>,

        /// Also display median and standard deviation
        #[arg(long)]
        stats: bool,
    },
}
