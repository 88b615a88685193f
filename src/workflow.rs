use indicatif::ProgressBar;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::{Config, MalformedFramePolicy};
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::frames::{FrameSource, timestamp_of};
use crate::normalize::TextNormalizer;
use crate::ocr::{OcrEngine, OcrEngineFactory};
use crate::review::{ReviewPrompt, TextRequest, TextReview, WordReview};
use crate::spell::{flag_errors, is_noise};
use crate::subtitle::{SubtitleTrack, write_srt};

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// All frames (or the entry limit) processed and the output written
    Completed { written: usize, skipped: usize },
    /// The operator exited from a prompt
    Aborted { pending: usize, flushed: bool },
}

/// OCR result for one image before any review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameCheck {
    /// Normalized text
    pub text: String,
    /// Words missing from the dictionary
    pub flagged: Vec<String>,
    /// Empty, or several tokens all flagged; the frame would be skipped
    pub noise: bool,
}

enum FrameDecision {
    Accept(String),
    Skip,
    Abort,
}

/// Drives frames through OCR, review and into the subtitle track
pub struct Pipeline {
    config: Config,
    frames: FrameSource,
    ocr: Box<dyn OcrEngine>,
    normalizer: TextNormalizer,
    dictionary: Dictionary,
    progress: ProgressBar,
}

impl Pipeline {
    /// Build with the default OCR engine. Fails if the dictionary is missing.
    pub fn new(config: Config) -> Result<Self> {
        let ocr = OcrEngineFactory::create_engine(config.ocr.clone());
        Self::with_engine(config, ocr)
    }

    pub fn with_engine(config: Config, ocr: Box<dyn OcrEngine>) -> Result<Self> {
        let dictionary = Dictionary::load(&config.dictionary.path)?;
        let frames = FrameSource::new(&config.frames);
        let normalizer = TextNormalizer::new(&config.normalizer);

        Ok(Self {
            config,
            frames,
            ocr,
            normalizer,
            dictionary,
            progress: ProgressBar::hidden(),
        })
    }

    /// Report progress on `progress`; it is suspended while a prompt is open
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn frames(&self) -> &FrameSource {
        &self.frames
    }

    pub fn ocr(&self) -> &dyn OcrEngine {
        self.ocr.as_ref()
    }

    /// OCR, normalize and spell check a single image
    pub async fn check_frame(&self, image_path: &Path) -> Result<FrameCheck> {
        let raw = self.ocr.recognize(image_path).await?;
        let text = self.normalizer.normalize(&raw);
        let flagged = flag_errors(&text, &self.dictionary);
        let noise = is_noise(&text, &flagged);

        Ok(FrameCheck { text, flagged, noise })
    }

    /// Process every frame in order and write the subtitle file.
    ///
    /// Nothing is written when the operator aborts unless
    /// `output.flush_on_abort` is set.
    pub async fn run(&mut self, prompt: &mut dyn ReviewPrompt) -> Result<RunOutcome> {
        let frames = self.frames.list_frames()?;
        let total = frames.len();
        let limit = self.config.output.entry_limit();
        info!(
            "Processing {} frames from {} (limit: {})",
            total,
            self.frames.images_dir().display(),
            limit.map_or_else(|| "none".to_string(), |n| n.to_string())
        );

        self.progress.set_length(total as u64);
        let mut track = SubtitleTrack::new();
        let mut skipped = 0;

        for name in &frames {
            self.progress.set_message(name.clone());

            let timestamp = match timestamp_of(name) {
                Ok(timestamp) => timestamp,
                Err(e) if self.config.frames.on_malformed == MalformedFramePolicy::Skip => {
                    warn!("Skipping frame: {}", e);
                    skipped += 1;
                    self.progress.inc(1);
                    continue;
                }
                Err(e) => {
                    self.progress.abandon();
                    return Err(e);
                }
            };

            let image_path = self.frames.path_of(name);
            let title = format!("No. {}/{}", track.len() + 1, total);

            match self.process_frame(&image_path, &title, prompt).await? {
                FrameDecision::Accept(text) => {
                    let entry = track.push(timestamp, text);
                    info!("Subtitle {} [{}]: {:?}", entry.index, entry.timestamp, entry.text);
                }
                FrameDecision::Skip => {
                    skipped += 1;
                }
                FrameDecision::Abort => {
                    self.progress.abandon();
                    return self.abort(&track).await;
                }
            }
            self.progress.inc(1);

            if limit.is_some_and(|max| track.len() >= max) {
                info!("Reached entry limit of {}", track.len());
                break;
            }
        }

        self.progress.finish_and_clear();
        write_srt(&track, &self.config.output.path).await?;

        info!("Wrote {} subtitles, skipped {} frames", track.len(), skipped);
        Ok(RunOutcome::Completed {
            written: track.len(),
            skipped,
        })
    }

    async fn process_frame(
        &mut self,
        image_path: &Path,
        title: &str,
        prompt: &mut dyn ReviewPrompt,
    ) -> Result<FrameDecision> {
        let check = self.check_frame(image_path).await?;
        if check.noise {
            debug!("Skipping noise frame {}: {:?}", image_path.display(), check.text);
            return Ok(FrameDecision::Skip);
        }

        let mut text = check.text;
        if !check.flagged.is_empty() {
            debug!("Unknown words in {}: {:?}", image_path.display(), check.flagged);

            loop {
                let request = TextRequest {
                    title,
                    image_path,
                    text: &text,
                    flagged: &check.flagged,
                };
                text = match self.progress.suspend(|| prompt.confirm_text(&request))? {
                    TextReview::Done(confirmed) => confirmed,
                    TextReview::Abort => return Ok(FrameDecision::Abort),
                };

                match self.progress.suspend(|| prompt.approve_words(&check.flagged))? {
                    WordReview::Accepted(words) => {
                        if !words.is_empty() {
                            self.dictionary.append(&words)?;
                        }
                        break;
                    }
                    WordReview::Rejected => continue,
                    WordReview::Abort => return Ok(FrameDecision::Abort),
                }
            }
        }

        if text.trim().is_empty() {
            debug!("Operator rejected {}", image_path.display());
            return Ok(FrameDecision::Skip);
        }

        Ok(FrameDecision::Accept(text))
    }

    async fn abort(&self, track: &SubtitleTrack) -> Result<RunOutcome> {
        let flushed = self.config.output.flush_on_abort;
        if flushed {
            write_srt(track, &self.config.output.path).await?;
            warn!("Run aborted; wrote {} subtitles collected so far", track.len());
        } else {
            warn!("Run aborted; discarding {} subtitles", track.len());
        }

        Ok(RunOutcome::Aborted {
            pending: track.len(),
            flushed,
        })
    }
}
