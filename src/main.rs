//! subocr - interactive OCR of extracted subtitle frames
//!
//! Entry point: parses the command line, sets up logging, loads the
//! configuration and dispatches to the pipeline.

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::{Level, info, warn};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use subocr::cli::{Args, Commands, DictAction};
use subocr::config::Config;
use subocr::dictionary::Dictionary;
use subocr::frames::{FrameSource, parse_time_range};
use subocr::review::TerminalPrompt;
use subocr::workflow::{Pipeline, RunOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.verbose)?;

    let mut config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    match args.command {
        Commands::Run { images_dir, output, dictionary, max_entries } => {
            if let Some(dir) = images_dir {
                config.frames.images_dir = dir;
            }
            if let Some(path) = output {
                config.output.path = path;
            }
            if let Some(path) = dictionary {
                config.dictionary.path = path;
            }
            if let Some(max) = max_entries {
                config.output.max_entries = max;
            }

            let image_viewer = config.review.image_viewer.clone();
            let output_path = config.output.path.clone();
            let pipeline = Pipeline::new(config)?;
            pipeline.ocr().check_availability().await?;
            info!("Using {}", pipeline.ocr().version_info().await?);

            let progress = ProgressBar::new(0);
            progress.set_style(
                ProgressStyle::with_template("{bar:40} {pos}/{len} {wide_msg}")?
            );
            let mut pipeline = pipeline.with_progress(progress);

            let mut prompt = TerminalPrompt::stdio(image_viewer);
            match pipeline.run(&mut prompt).await? {
                RunOutcome::Completed { written, skipped } => {
                    println!(
                        "Wrote {} subtitles to {} ({} frames skipped)",
                        written,
                        output_path.display(),
                        skipped
                    );
                }
                RunOutcome::Aborted { pending, flushed: true } => {
                    println!("Aborted; wrote {} subtitles to {}", pending, output_path.display());
                }
                RunOutcome::Aborted { pending, flushed: false } => {
                    println!("Aborted; {} subtitles discarded", pending);
                }
            }
        }
        Commands::Frames { images_dir } => {
            if let Some(dir) = images_dir {
                config.frames.images_dir = dir;
            }

            let source = FrameSource::new(&config.frames);
            let frames = source.list_frames()?;
            println!("{:<35} {}", "Time range", "Frame");
            println!("{}", "-".repeat(80));
            for name in &frames {
                match parse_time_range(name) {
                    Ok(range) => println!("{:<35} {}", range.to_string(), name),
                    Err(e) => {
                        warn!("{}", e);
                        println!("{:<35} {}", "(unparsable)", name);
                    }
                }
            }
            println!("{} frames", frames.len());
        }
        Commands::Check { image } => {
            let pipeline = Pipeline::new(config)?;
            pipeline.ocr().check_availability().await?;

            let check = pipeline.check_frame(&image).await?;
            println!("Text:\n{}", check.text);
            if check.flagged.is_empty() {
                println!("Unknown words: none");
            } else {
                println!("Unknown words: {}", check.flagged.join(", "));
            }
            if check.noise {
                println!("Every word is unknown; this frame would be skipped");
            }
        }
        Commands::Dict { action } => {
            let mut dictionary = Dictionary::load(&config.dictionary.path)?;
            match action {
                DictAction::Add { words } => {
                    let added = dictionary.append(&words)?;
                    println!(
                        "Added {} words to {} ({} total)",
                        added,
                        dictionary.path().display(),
                        dictionary.len()
                    );
                }
                DictAction::Lookup { words } => {
                    for word in &words {
                        let status = if dictionary.contains(word) { "known" } else { "unknown" };
                        println!("{:<30} {}", word, status);
                    }
                }
            }
        }
        Commands::InitConfig { output } => {
            config.save_to_file(&output)?;
            println!("Wrote configuration to {}", output.display());
        }
    }

    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = std::env::current_dir()?.join(".subocr").join("log");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = rolling::daily(&log_dir, "subocr.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Console output goes to stderr so it stays out of the review prompts
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(verbose)
        .with_line_number(verbose);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized - console: {}, file: {}",
          log_level, log_dir.join("subocr.log").display());

    Ok(())
}
