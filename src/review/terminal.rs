use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use tracing::{debug, warn};

use crate::error::Result;
use super::{ReviewPrompt, TextRequest, TextReview, WordReview};

/// Line that ends a multi-line edit
const END_OF_EDIT: &str = ".";

/// Line-based review prompts.
///
/// Choices mirror the single-letter shortcuts: `o`k, `e`dit, `n`one,
/// `b`ack and e`x`it. End of input counts as exit.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
    image_viewer: Option<String>,
    viewers: Vec<Child>,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio(image_viewer: Option<String>) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), image_viewer)
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W, image_viewer: Option<String>) -> Self {
        Self {
            input,
            output,
            image_viewer,
            viewers: Vec::new(),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Next input line without its line ending, `None` at end of input
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn ask(&mut self, menu: &str) -> Result<Option<String>> {
        write!(self.output, "{} > ", menu)?;
        self.output.flush()?;
        Ok(self.read_line()?.map(|choice| choice.trim().to_lowercase()))
    }

    /// Read lines up to the end-of-edit marker
    fn read_block(&mut self) -> Result<Option<Vec<String>>> {
        writeln!(self.output, "Enter new text, finish with a line containing only '{}':", END_OF_EDIT)?;
        self.output.flush()?;

        let mut lines = Vec::new();
        loop {
            match self.read_line()? {
                None => return Ok(None),
                Some(line) if line.trim() == END_OF_EDIT => return Ok(Some(lines)),
                Some(line) => lines.push(line),
            }
        }
    }

    /// Collect viewers that have exited; returns how many are still open
    pub fn reap_viewers(&mut self) -> usize {
        self.viewers.retain_mut(|child| match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                debug!("Image viewer {} exited: {}", child.id(), status);
                false
            }
            Err(e) => {
                warn!("Lost track of image viewer {}: {}", child.id(), e);
                false
            }
        });
        self.viewers.len()
    }

    fn open_viewer(&mut self, image_path: &Path) {
        self.reap_viewers();

        let Some(viewer) = &self.image_viewer else {
            return;
        };

        let mut parts = viewer.split_whitespace();
        let Some(program) = parts.next() else {
            return;
        };

        let spawned = Command::new(program)
            .args(parts)
            .arg(image_path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => {
                debug!("Opened {} in {}", image_path.display(), program);
                self.viewers.push(child);
            }
            Err(e) => warn!("Failed to launch image viewer '{}': {}", viewer, e),
        }
    }
}

impl<R: BufRead, W: Write> ReviewPrompt for TerminalPrompt<R, W> {
    fn confirm_text(&mut self, request: &TextRequest<'_>) -> Result<TextReview> {
        self.open_viewer(request.image_path);

        let mut text = request.text.to_string();
        writeln!(self.output)?;
        writeln!(self.output, "=== {} ===", request.title)?;
        writeln!(self.output, "Image: {}", request.image_path.display())?;
        writeln!(self.output, "Unknown words: {}", request.flagged.join(", "))?;

        loop {
            writeln!(self.output, "---")?;
            writeln!(self.output, "{}", text)?;
            writeln!(self.output, "---")?;

            let Some(choice) = self.ask("[o]k  [e]dit  [n]one  e[x]it")? else {
                return Ok(TextReview::Abort);
            };

            match choice.as_str() {
                "" | "o" | "ok" => return Ok(TextReview::Done(text)),
                "e" | "edit" => match self.read_block()? {
                    Some(lines) => text = lines.join("\n"),
                    None => return Ok(TextReview::Abort),
                },
                "n" | "none" => return Ok(TextReview::Done(String::new())),
                "x" | "exit" => return Ok(TextReview::Abort),
                other => writeln!(self.output, "Unrecognized choice '{}'", other)?,
            }
        }
    }

    fn approve_words(&mut self, words: &[String]) -> Result<WordReview> {
        let mut lines = words.to_vec();
        writeln!(self.output)?;
        writeln!(self.output, "=== Words to add to dictionary ===")?;

        loop {
            for line in &lines {
                writeln!(self.output, "  {}", line)?;
            }

            let Some(choice) = self.ask("[o]k  [e]dit  [n]one  [b]ack  e[x]it")? else {
                return Ok(WordReview::Abort);
            };

            match choice.as_str() {
                "" | "o" | "ok" => {
                    let accepted = lines
                        .iter()
                        .map(|line| line.trim().to_string())
                        .filter(|line| !line.is_empty())
                        .collect();
                    return Ok(WordReview::Accepted(accepted));
                }
                "e" | "edit" => match self.read_block()? {
                    Some(edited) => lines = edited,
                    None => return Ok(WordReview::Abort),
                },
                "n" | "none" => return Ok(WordReview::Accepted(Vec::new())),
                "b" | "back" => return Ok(WordReview::Rejected),
                "x" | "exit" => return Ok(WordReview::Abort),
                other => writeln!(self.output, "Unrecognized choice '{}'", other)?,
            }
        }
    }
}
