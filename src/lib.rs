//! subocr - Interactive OCR of extracted subtitle frames
//!
//! Turns the cropped subtitle images written by a subtitle extractor into an
//! SRT file: each frame goes through tesseract, a set of text corrections and
//! a spell check against a personal word list, and frames with unknown words
//! are shown to the operator for review.

pub mod cli;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod frames;
pub mod normalize;
pub mod ocr;
pub mod review;
pub mod spell;
pub mod subtitle;
pub mod workflow;
