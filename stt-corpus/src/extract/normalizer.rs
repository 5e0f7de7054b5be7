//! Body text normalization: keep only characters of the target script.

use crate::error::{CorpusError, Result};

/// Inclusive Unicode range of characters that survive normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptRange {
    start: char,
    end: char,
}

impl ScriptRange {
    /// The Tibetan block, U+0F00..=U+0FFF.
    pub const TIBETAN: ScriptRange = ScriptRange {
        start: '\u{0F00}',
        end: '\u{0FFF}',
    };

    /// Build a range from raw code points.
    pub fn new(start: u32, end: u32) -> Result<Self> {
        let start = char::from_u32(start)
            .ok_or_else(|| CorpusError::Config(format!("invalid code point U+{:04X}", start)))?;
        let end = char::from_u32(end)
            .ok_or_else(|| CorpusError::Config(format!("invalid code point U+{:04X}", end)))?;

        if start > end {
            return Err(CorpusError::Config(format!(
                "script range start U+{:04X} is after end U+{:04X}",
                start as u32, end as u32
            )));
        }

        Ok(Self { start, end })
    }

    pub fn contains(&self, c: char) -> bool {
        (self.start..=self.end).contains(&c)
    }
}

impl Default for ScriptRange {
    fn default() -> Self {
        Self::TIBETAN
    }
}

/// Normalize one run of body text.
///
/// Line breaks and non-breaking spaces become plain spaces, then every
/// character outside `script` is dropped without re-inserting any spacing.
/// An empty result means the run contributes nothing.
pub fn normalize(text: &str, script: &ScriptRange) -> String {
    text.chars()
        .map(|c| match c {
            '\n' | '\r' | '\u{00a0}' => ' ',
            _ => c,
        })
        .filter(|c| script.contains(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printable_ascii() -> ScriptRange {
        ScriptRange::new(0x20, 0x7E).unwrap()
    }

    #[test]
    fn test_keeps_tibetan() {
        let text = "བཀྲ་ཤིས་བདེ་ལེགས།";
        assert_eq!(normalize(text, &ScriptRange::TIBETAN), text);
    }

    #[test]
    fn test_drops_latin_digits_and_punctuation() {
        let text = "12. Hello, བཀྲ་ཤིས (world)!";
        assert_eq!(normalize(text, &ScriptRange::TIBETAN), "བཀྲ་ཤིས");
    }

    #[test]
    fn test_removed_runs_collapse_contiguously() {
        let text = "ཀ abc ཁ";
        assert_eq!(normalize(text, &ScriptRange::TIBETAN), "ཀཁ");
    }

    #[test]
    fn test_line_breaks_become_spaces() {
        let text = "first\nsecond\u{00a0}third";
        assert_eq!(normalize(text, &printable_ascii()), "first second third");
    }

    #[test]
    fn test_trims_edges() {
        assert_eq!(normalize("\n  inner  \n", &printable_ascii()), "inner");
    }

    #[test]
    fn test_nothing_in_script_is_empty() {
        assert_eq!(normalize("only latin 123", &ScriptRange::TIBETAN), "");
        assert_eq!(normalize("", &ScriptRange::TIBETAN), "");
    }

    #[test]
    fn test_range_validation() {
        assert!(ScriptRange::new(0x0F00, 0x0FFF).is_ok());
        assert!(ScriptRange::new(0x0FFF, 0x0F00).is_err());
        assert!(ScriptRange::new(0xD800, 0xD900).is_err());
    }

    #[test]
    fn test_default_is_tibetan() {
        assert_eq!(ScriptRange::default(), ScriptRange::TIBETAN);
        assert!(ScriptRange::TIBETAN.contains('\u{0F40}'));
        assert!(!ScriptRange::TIBETAN.contains('a'));
    }
}
