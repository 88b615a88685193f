use crate::config::{NormalizerConfig, Replacement};

/// Corrections for misreads tesseract makes on subtitle fonts, applied in order.
///
/// U+2019 and U+2018 are separate entries; both quote forms show up.
pub const BUILTIN_REPLACEMENTS: &[(&str, &str)] = &[
    ("|", "I"),
    ("\u{2019}", "'"),
    ("\u{2018}", "'"),
    (" iam ", " I am"),
    (" ima ", " i'm a"),
];

/// Literal substring rewriting of raw OCR output
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    replacements: Vec<Replacement>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(&NormalizerConfig::default())
    }
}

impl TextNormalizer {
    /// Built-in table followed by the configured extras
    pub fn new(config: &NormalizerConfig) -> Self {
        let replacements = BUILTIN_REPLACEMENTS
            .iter()
            .map(|(from, to)| Replacement {
                from: from.to_string(),
                to: to.to_string(),
            })
            .chain(
                config
                    .extra_replacements
                    .iter()
                    .filter(|r| !r.from.is_empty())
                    .cloned(),
            )
            .collect();

        Self { replacements }
    }

    pub fn replacements(&self) -> &[Replacement] {
        &self.replacements
    }

    pub fn normalize(&self, text: &str) -> String {
        self.replacements
            .iter()
            .fold(text.to_string(), |acc, r| acc.replace(&r.from, &r.to))
    }
}
