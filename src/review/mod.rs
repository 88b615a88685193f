// Operator review of OCR results
//
// - Terminal: line-based prompts on stdin/stdout
// - Scripted: replays prepared answers, for headless runs and tests

pub mod scripted;
pub mod terminal;

use std::path::Path;

pub use scripted::*;
pub use terminal::*;

use crate::error::Result;

/// What the operator sees when asked to confirm a frame's text
#[derive(Debug, Clone, Copy)]
pub struct TextRequest<'a> {
    /// Window title, e.g. `No. 3/120`
    pub title: &'a str,
    pub image_path: &'a Path,
    /// Current candidate text
    pub text: &'a str,
    /// Words the spell checker did not recognize
    pub flagged: &'a [String],
}

/// Result of the text confirmation prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextReview {
    /// Confirmed text; empty when the operator rejected the frame
    Done(String),
    /// Stop the whole run
    Abort,
}

/// Result of the dictionary approval prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordReview {
    /// Words to add; empty when the operator declined all of them
    Accepted(Vec<String>),
    /// Go back to the text prompt for the same frame
    Rejected,
    /// Stop the whole run
    Abort,
}

/// Blocking, modal operator interaction
pub trait ReviewPrompt {
    /// Ask the operator to accept, edit or reject the recognized text
    fn confirm_text(&mut self, request: &TextRequest<'_>) -> Result<TextReview>;

    /// Ask which flagged words should join the dictionary
    fn approve_words(&mut self, words: &[String]) -> Result<WordReview>;
}
