use crate::dictionary::Dictionary;

/// Lowercase a token and strip ASCII punctuation from both ends
fn clean_token(token: &str) -> String {
    token.to_lowercase().trim_matches(|c: char| c.is_ascii_punctuation()).to_string()
}

/// Tokens of `text` missing from `dictionary`, in order, repeats kept.
pub fn flag_errors(text: &str, dictionary: &Dictionary) -> Vec<String> {
    text.split_whitespace()
        .map(clean_token)
        .filter(|word| !word.is_empty() && !dictionary.contains(word))
        .collect()
}

/// True when `text` has several tokens and every one of them was flagged.
///
/// Empty text counts as noise. A lone unknown token does not: it is often a
/// real line the OCR glued together and goes to review instead.
pub fn is_noise(text: &str, flagged: &[String]) -> bool {
    let tokens = text.split_whitespace().count();
    tokens != 1 && flagged.len() == tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn dictionary(words: &str) -> (assert_fs::TempDir, Dictionary) {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("words.txt");
        file.write_str(words).unwrap();
        let dictionary = Dictionary::load(file.path()).unwrap();
        (temp, dictionary)
    }

    #[test]
    fn test_flags_unknown_words_in_order() {
        let (_temp, dict) = dictionary("the\ncat\n");
        assert_eq!(
            flag_errors("The zorg cat blip zorg", &dict),
            vec!["zorg", "blip", "zorg"]
        );
    }

    #[test]
    fn test_punctuation_and_case_ignored_at_edges() {
        let (_temp, dict) = dictionary("hello\nworld\ndon't\n");
        assert!(flag_errors("\"Hello, WORLD!\" Don't...", &dict).is_empty());
        // inner punctuation is part of the word
        assert_eq!(flag_errors("hel.lo", &dict), vec!["hel.lo"]);
    }

    #[test]
    fn test_pure_punctuation_tokens_skipped() {
        let (_temp, dict) = dictionary("hi\n");
        assert!(flag_errors("hi ... -- !", &dict).is_empty());
    }

    #[test]
    fn test_clean_text_is_idempotent() {
        let (_temp, dict) = dictionary("all\nknown\nwords\n");
        let text = "All known words.";
        assert!(flag_errors(text, &dict).is_empty());
        assert!(flag_errors(text, &dict).is_empty());
    }

    #[test]
    fn test_noise_detection() {
        let (_temp, dict) = dictionary("hello\n");

        let text = "xq zz";
        assert!(is_noise(text, &flag_errors(text, &dict)));

        let text = "hello zz";
        assert!(!is_noise(text, &flag_errors(text, &dict)));

        // a bare punctuation token is not flagged, so the frame survives
        let text = "zz ...";
        assert!(!is_noise(text, &flag_errors(text, &dict)));

        assert!(is_noise("", &[]));
    }

    #[test]
    fn test_single_unknown_token_is_reviewed() {
        let (_temp, dict) = dictionary("hello\nworld\n");

        let text = "helloIworld";
        let flagged = flag_errors(text, &dict);
        assert_eq!(flagged, vec!["helloiworld"]);
        assert!(!is_noise(text, &flagged));
    }
}
