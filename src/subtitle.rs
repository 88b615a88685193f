use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::error::Result;

/// One written subtitle block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    /// 1-based position among written entries
    pub index: usize,
    /// `start --> end` line
    pub timestamp: String,
    pub text: String,
}

/// Entries accepted so far, in processing order
#[derive(Debug, Clone, Default)]
pub struct SubtitleTrack {
    entries: Vec<SubtitleEntry>,
}

impl SubtitleTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry numbered after the last one
    pub fn push<T: Into<String>, S: Into<String>>(&mut self, timestamp: T, text: S) -> &SubtitleEntry {
        let index = self.entries.len() + 1;
        self.entries.push(SubtitleEntry {
            index,
            timestamp: timestamp.into(),
            text: text.into(),
        });
        &self.entries[index - 1]
    }

    pub fn entries(&self) -> &[SubtitleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// SRT text for the whole track
    pub fn render(&self) -> String {
        let mut srt_content = String::new();
        for entry in &self.entries {
            srt_content.push_str(&format_entry(entry));
        }
        srt_content
    }
}

/// A single SRT block, including the blank separator line
pub fn format_entry(entry: &SubtitleEntry) -> String {
    format!("{}\n{}\n{}\n\n", entry.index, entry.timestamp, entry.text)
}

/// Write the track to `output_path`, replacing any existing file
pub async fn write_srt<P: AsRef<Path>>(track: &SubtitleTrack, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!("Writing {} subtitles to {}", track.len(), output_path.display());

    fs::write(output_path, track.render()).await?;

    info!("SRT file written successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_ordinals_are_contiguous() {
        let mut track = SubtitleTrack::new();
        assert_eq!(track.push("0:00:01,000 --> 0:00:02,000", "first").index, 1);
        assert_eq!(track.push("0:00:03,000 --> 0:00:04,000", "second").index, 2);

        assert_eq!(
            track.render(),
            "1\n0:00:01,000 --> 0:00:02,000\nfirst\n\n2\n0:00:03,000 --> 0:00:04,000\nsecond\n\n"
        );
    }

    #[test]
    fn test_multiline_text_kept() {
        let mut track = SubtitleTrack::new();
        track.push("0:00:01,000 --> 0:00:02,000", "line one\nline two");
        assert_eq!(track.render(), "1\n0:00:01,000 --> 0:00:02,000\nline one\nline two\n\n");
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let output = temp.child("Output.srt");
        output.write_str("stale content that must go").unwrap();

        let mut track = SubtitleTrack::new();
        track.push("0:00:01,000 --> 0:00:02,000", "fresh");
        write_srt(&track, output.path()).await.unwrap();

        output.assert("1\n0:00:01,000 --> 0:00:02,000\nfresh\n\n");
    }

    #[tokio::test]
    async fn test_empty_track_writes_empty_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let output = temp.child("Output.srt");

        write_srt(&SubtitleTrack::new(), output.path()).await.unwrap();
        output.assert("");
    }
}
