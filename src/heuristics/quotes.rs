use super::docstring::TRIPLE_QUOTE;

pub const SINGLE_QUOTE: char = '\'';
pub const DOUBLE_QUOTE: char = '"';

/// Which quote character a file predominantly uses.
///
/// Computed once per file before the line scan and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotePreference {
    pub preferred: char,
    pub alternate: char,
}

impl QuotePreference {
    pub const SINGLE: Self = Self {
        preferred: SINGLE_QUOTE,
        alternate: DOUBLE_QUOTE,
    };

    pub const DOUBLE: Self = Self {
        preferred: DOUBLE_QUOTE,
        alternate: SINGLE_QUOTE,
    };

    /// Estimate the preferred quote from character frequencies.
    ///
    /// Double quotes win only when they outnumber single quotes by more than
    /// two to one (or single quotes are absent). `"""` delimiters are not
    /// counted as double quotes. Ties and ambiguity fall back to single.
    #[must_use]
    pub fn estimate(source: &str) -> Self {
        let single_count = source.chars().filter(|&c| c == SINGLE_QUOTE).count();
        let raw_double = source.chars().filter(|&c| c == DOUBLE_QUOTE).count();
        let triple_count = source.matches(TRIPLE_QUOTE).count();
        let double_count = raw_double.saturating_sub(3 * triple_count);

        if double_count > 0 && (single_count == 0 || double_count > 2 * single_count) {
            Self::DOUBLE
        } else {
            Self::SINGLE
        }
    }

    /// Like [`estimate`](Self::estimate), but `force_double` pins the result to double quotes.
    #[must_use]
    pub fn estimate_with_override(source: &str, force_double: bool) -> Self {
        if force_double {
            Self::DOUBLE
        } else {
            Self::estimate(source)
        }
    }

    /// Human-readable name of the preferred quote.
    #[must_use]
    pub const fn preferred_name(&self) -> &'static str {
        match self.preferred {
            DOUBLE_QUOTE => "double",
            _ => "single",
        }
    }
}

#[cfg(test)]
#[path = "quotes_tests.rs"]
mod tests;
