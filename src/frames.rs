use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::FramesConfig;
use crate::error::{Result, SubOcrError};

/// Number of `_`-separated fields a frame stem must carry
const TIMESTAMP_FIELDS: usize = 9;

/// One bound of a subtitle interval, kept exactly as written in the file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTime {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub millis: String,
}

impl fmt::Display for FrameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{},{}", self.hours, self.minutes, self.seconds, self.millis)
    }
}

/// Start and end of the interval a frame is displayed for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub start: FrameTime,
    pub end: FrameTime,
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --> {}", self.start, self.end)
    }
}

/// Parse the interval encoded in a frame file name.
///
/// Frame names look like `0_01_46_073__0_01_49_609_<suffix>.png`: fields
/// 0-3 are the start time, field 4 separates, fields 5-8 are the end time.
/// The extension is ignored.
pub fn parse_time_range(file_name: &str) -> Result<TimeRange> {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);

    let fields: Vec<&str> = stem.split('_').collect();
    if fields.len() < TIMESTAMP_FIELDS {
        return Err(SubOcrError::FrameParse {
            name: file_name.to_string(),
            reason: format!(
                "expected at least {} '_'-separated fields, found {}",
                TIMESTAMP_FIELDS,
                fields.len()
            ),
        });
    }

    let time = |at: usize| FrameTime {
        hours: fields[at].to_string(),
        minutes: fields[at + 1].to_string(),
        seconds: fields[at + 2].to_string(),
        millis: fields[at + 3].to_string(),
    };

    Ok(TimeRange {
        start: time(0),
        end: time(5),
    })
}

/// SRT timestamp line (`start --> end`) for a frame file name
pub fn timestamp_of(file_name: &str) -> Result<String> {
    parse_time_range(file_name).map(|range| range.to_string())
}

/// Enumerates subtitle images in a single directory
pub struct FrameSource {
    images_dir: PathBuf,
    extension: String,
    sort_by_name: bool,
}

impl FrameSource {
    pub fn new(config: &FramesConfig) -> Self {
        Self {
            images_dir: config.images_dir.clone(),
            extension: config.extension.trim_start_matches('.').to_string(),
            sort_by_name: config.sort_by_name,
        }
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Full path of a frame returned by [`FrameSource::list_frames`]
    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.images_dir.join(file_name)
    }

    /// File names of the images directly inside the directory.
    pub fn list_frames(&self) -> Result<Vec<String>> {
        if !self.images_dir.is_dir() {
            return Err(SubOcrError::FileNotFound(self.images_dir.display().to_string()));
        }

        let mut walker = WalkDir::new(&self.images_dir).min_depth(1).max_depth(1);
        if self.sort_by_name {
            walker = walker.sort_by_file_name();
        }

        let mut frames = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| SubOcrError::Io(e.into()))?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension));
            if !matches {
                debug!("Ignoring non-frame file: {}", path.display());
                continue;
            }

            match entry.file_name().to_str() {
                Some(name) => frames.push(name.to_string()),
                None => warn!("Skipping frame with non-UTF-8 name: {}", path.display()),
            }
        }

        info!("Found {} frames in {}", frames.len(), self.images_dir.display());
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn source_for(dir: &Path) -> FrameSource {
        FrameSource::new(&FramesConfig {
            images_dir: dir.to_path_buf(),
            ..FramesConfig::default()
        })
    }

    #[test]
    fn test_timestamp_of() {
        assert_eq!(
            timestamp_of("0_00_01_000_x_0_00_02_000_a.png").unwrap(),
            "0:00:01,000 --> 0:00:02,000"
        );
        assert_eq!(
            timestamp_of("0_01_46_073__0_01_49_609_3000003910720008707200480.jpeg").unwrap(),
            "0:01:46,073 --> 0:01:49,609"
        );
    }

    #[test]
    fn test_timestamp_with_exactly_nine_fields() {
        assert_eq!(
            timestamp_of("1_02_03_004__1_02_05_006.png").unwrap(),
            "1:02:03,004 --> 1:02:05,006"
        );
    }

    #[test]
    fn test_timestamp_is_deterministic() {
        let name = "0_10_00_500__0_10_02_250_0001.png";
        assert_eq!(timestamp_of(name).unwrap(), timestamp_of(name).unwrap());
    }

    #[test]
    fn test_short_name_fails() {
        let err = timestamp_of("0_00_01_000_x_0_00.png").unwrap_err();
        assert!(matches!(err, SubOcrError::FrameParse { .. }));
        assert!(timestamp_of("frame.png").is_err());
    }

    #[test]
    fn test_list_frames_filters_extension() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("0_00_02_000__0_00_03_000_b.png").touch().unwrap();
        temp.child("0_00_01_000__0_00_02_000_a.PNG").touch().unwrap();
        temp.child("notes.txt").touch().unwrap();
        temp.child("nested/0_00_09_000__0_00_10_000_c.png").touch().unwrap();

        let frames = source_for(temp.path()).list_frames().unwrap();
        assert_eq!(
            frames,
            vec![
                "0_00_01_000__0_00_02_000_a.PNG".to_string(),
                "0_00_02_000__0_00_03_000_b.png".to_string(),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_list_frames_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("0_00_01_000__0_00_02_000_a.png").touch().unwrap();
        let bad = OsStr::from_bytes(b"0_00_02_000__0_00_03_000_\xff.png");
        // some filesystems refuse invalid UTF-8 names outright
        if std::fs::File::create(temp.path().join(bad)).is_err() {
            return;
        }

        let frames = source_for(temp.path()).list_frames().unwrap();
        assert_eq!(frames, vec!["0_00_01_000__0_00_02_000_a.png".to_string()]);
    }

    #[test]
    fn test_list_frames_missing_dir() {
        let temp = assert_fs::TempDir::new().unwrap();
        let source = source_for(&temp.path().join("absent"));
        assert!(matches!(source.list_frames(), Err(SubOcrError::FileNotFound(_))));
    }
}
