//! Line-oriented heuristic checks layered on top of the external checkers.
//!
//! Files are treated as plain text: a docstring tracker tags each line, a
//! per-file quote preference is estimated up front, and a small rule set
//! turns both into [`Problem`]s.

mod docstring;
mod quotes;
mod rules;

pub use docstring::{COMMENT_MARKER, DocstringScanner, ScannedLine, TRIPLE_QUOTE};
pub use quotes::{DOUBLE_QUOTE, QuotePreference, SINGLE_QUOTE};
pub use rules::{BUILTIN_QUOTE_EXEMPT, Problem, Rule, RuleSet};
