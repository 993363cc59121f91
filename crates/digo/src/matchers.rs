//! Compiled patterns shared by the annotation parser and the email check.

use regex::Regex;
use std::sync::OnceLock;

/// Email shape. Matched anywhere in the value, not anchored.
const EMAIL_PATTERN: &str = r"(?-u)\w[-._\w]*\w@\w[-._\w]*\w\.\w{2,3}";

const MINMAX_PATTERN: &str = r"(?-u)^minmax\(\s*(\d+)\s*\|\s*(\d+)\s*\)";

/// Read-only regex matchers. Compile once and share between decoders.
#[derive(Debug, Clone)]
pub struct Matchers {
    email: Regex,
    minmax: Regex,
}

impl Matchers {
    pub fn new() -> Self {
        Self {
            email: Regex::new(EMAIL_PATTERN).unwrap(),
            minmax: Regex::new(MINMAX_PATTERN).unwrap(),
        }
    }

    /// Process-wide instance, compiled on first use.
    pub fn shared() -> &'static Matchers {
        static MATCHERS: OnceLock<Matchers> = OnceLock::new();
        MATCHERS.get_or_init(Matchers::new)
    }

    pub fn is_email(&self, value: &str) -> bool {
        self.email.is_match(value)
    }

    /// Extracts `(min, max)` from a trimmed `minmax(a|b)` segment.
    ///
    /// Returns `None` when the segment does not have that shape. Digits that
    /// overflow `i64` are read as 0.
    pub fn minmax_bounds(&self, segment: &str) -> Option<(i64, i64)> {
        let caps = self.minmax.captures(segment)?;
        let min = caps[1].parse().unwrap_or(0);
        let max = caps[2].parse().unwrap_or(0);
        Some((min, max))
    }
}

impl Default for Matchers {
    fn default() -> Self {
        Self::new()
    }
}
