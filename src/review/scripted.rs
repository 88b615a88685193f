use std::collections::VecDeque;

use crate::error::{Result, SubOcrError};
use super::{ReviewPrompt, TextRequest, TextReview, WordReview};

/// One prepared operator answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedAnswer {
    /// Confirm the text exactly as shown
    KeepText,
    /// Replace the text and confirm
    EditText(String),
    /// Reject the frame ("None" on the text prompt)
    RejectText,
    /// Accept every flagged word as shown
    AcceptFlagged,
    /// Accept an edited word list
    AcceptWords(Vec<String>),
    /// Decline every word ("None" on the dictionary prompt)
    NoWords,
    /// Return to the text prompt
    Back,
    /// Exit from whichever prompt is open
    Abort,
}

/// Replays a fixed sequence of answers without touching the terminal.
///
/// Every prompt shown is recorded so callers can check what the operator
/// would have seen.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<ScriptedAnswer>,
    pub texts_shown: Vec<String>,
    pub titles_shown: Vec<String>,
    pub word_lists_shown: Vec<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new<I: IntoIterator<Item = ScriptedAnswer>>(answers: I) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, prompt: &str) -> Result<ScriptedAnswer> {
        self.answers
            .pop_front()
            .ok_or_else(|| SubOcrError::Prompt(format!("No scripted answer left for the {} prompt", prompt)))
    }
}

impl ReviewPrompt for ScriptedPrompt {
    fn confirm_text(&mut self, request: &TextRequest<'_>) -> Result<TextReview> {
        self.titles_shown.push(request.title.to_string());
        self.texts_shown.push(request.text.to_string());

        match self.next("text")? {
            ScriptedAnswer::KeepText => Ok(TextReview::Done(request.text.to_string())),
            ScriptedAnswer::EditText(text) => Ok(TextReview::Done(text)),
            ScriptedAnswer::RejectText => Ok(TextReview::Done(String::new())),
            ScriptedAnswer::Abort => Ok(TextReview::Abort),
            other => Err(SubOcrError::Prompt(format!(
                "Scripted answer {:?} does not fit the text prompt",
                other
            ))),
        }
    }

    fn approve_words(&mut self, words: &[String]) -> Result<WordReview> {
        self.word_lists_shown.push(words.to_vec());

        match self.next("dictionary")? {
            ScriptedAnswer::AcceptFlagged => Ok(WordReview::Accepted(words.to_vec())),
            ScriptedAnswer::AcceptWords(words) => Ok(WordReview::Accepted(words)),
            ScriptedAnswer::NoWords => Ok(WordReview::Accepted(Vec::new())),
            ScriptedAnswer::Back => Ok(WordReview::Rejected),
            ScriptedAnswer::Abort => Ok(WordReview::Abort),
            other => Err(SubOcrError::Prompt(format!(
                "Scripted answer {:?} does not fit the dictionary prompt",
                other
            ))),
        }
    }
}
