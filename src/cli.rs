use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// OCR every frame, review unknown words and write the subtitle file
    Run {
        /// Directory containing the subtitle images
        #[arg(short, long)]
        images_dir: Option<PathBuf>,

        /// Output subtitle file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Word list used for spell checking
        #[arg(short, long)]
        dictionary: Option<PathBuf>,

        /// Stop after this many subtitles (0 or negative runs to the end)
        #[arg(short, long, allow_negative_numbers = true)]
        max_entries: Option<i64>,
    },

    /// List frames and the time ranges encoded in their names
    Frames {
        /// Directory containing the subtitle images
        #[arg(short, long)]
        images_dir: Option<PathBuf>,
    },

    /// Run OCR on one image and show the words the dictionary does not know
    Check {
        /// Image to recognize
        #[arg(short, long)]
        image: PathBuf,
    },

    /// Inspect or extend the dictionary
    Dict {
        #[command(subcommand)]
        action: DictAction,
    },

    /// Write the default configuration to a file
    InitConfig {
        /// Destination file
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum DictAction {
    /// Append words to the dictionary
    Add {
        /// Words to add
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Report whether words are in the dictionary
    Lookup {
        /// Words to look up
        #[arg(required = true)]
        words: Vec<String>,
    },
}
