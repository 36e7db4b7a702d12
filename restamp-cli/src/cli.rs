use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inspect PDF files and update their metadata in place.
#[derive(Debug, Parser)]
#[command(name = "restamp", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show header, trailer and document information
    Info {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List indirect objects with their offsets
    Objects {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Edit the information dictionary and append an incremental update
    SetInfo {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the updated document here instead of appending in place
        #[arg(long)]
        out: Option<PathBuf>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        keywords: Option<String>,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
