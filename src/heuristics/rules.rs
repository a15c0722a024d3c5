use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;
use serde::Serialize;

use crate::config::CustomConfig;
use crate::error::{Result, StyleGuardError};

use super::docstring::{DocstringScanner, ScannedLine, TRIPLE_QUOTE};
use super::quotes::QuotePreference;

const BARE_EXCEPT: &str = "except:";
const STATEMENT_SEPARATOR: char = ';';
const PARAM_MARKER: &str = ":param";
const QUOTED_SINGLE: &str = "\"'\"";
const QUOTED_DOUBLE: &str = "'\"'";

/// Files known to embed foreign-language templates, exempt from the quote rule.
pub const BUILTIN_QUOTE_EXEMPT: &[&str] = &["**/templates/*.py", "**/*_template.py"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    MissingFooter,
    BareExcept,
    DebugCall,
    InconsistentQuotes,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MissingFooter => "missing-footer",
            Self::BareExcept => "bare-except",
            Self::DebugCall => "debug-call",
            Self::InconsistentQuotes => "inconsistent-quotes",
        };
        f.write_str(name)
    }
}

/// A single finding of the custom rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub path: PathBuf,
    /// 1-based line number, 0 for file-level problems.
    pub line: usize,
    pub rule: Rule,
    pub message: String,
}

impl Problem {
    #[must_use]
    pub fn new(path: &Path, line: usize, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            line,
            rule,
            message: message.into(),
        }
    }
}

/// Heuristic checks the external checkers do not reliably perform.
#[derive(Debug, Clone)]
pub struct RuleSet {
    footer_marker: Option<String>,
    debug_call: Option<Regex>,
    quote_exempt: GlobSet,
    force_double: bool,
}

impl RuleSet {
    /// Build the rule set from the `[custom]` configuration.
    ///
    /// # Errors
    /// Returns an error if a `quote_exempt` glob is invalid.
    pub fn new(config: &CustomConfig, force_double: bool) -> Result<Self> {
        let footer_marker = Some(config.footer_marker.clone()).filter(|m| !m.is_empty());

        Ok(Self {
            footer_marker,
            debug_call: build_debug_call_regex(&config.debug_modules),
            quote_exempt: build_quote_exempt(&config.quote_exempt)?,
            force_double: force_double || config.prefer_double_quotes,
        })
    }

    /// Read a file and run every rule over it.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn check_file(&self, path: &Path, display: &Path) -> Result<Vec<Problem>> {
        let bytes = fs::read(path).map_err(|e| StyleGuardError::file_read(path, e))?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(self.check(display, &text))
    }

    /// Run every rule over already-loaded file text.
    #[must_use]
    pub fn check(&self, path: &Path, text: &str) -> Vec<Problem> {
        let preference = QuotePreference::estimate_with_override(text, self.force_double);
        self.check_lines(path, text, DocstringScanner::new(text), preference)
    }

    /// Run the rules over a pre-computed line classification.
    ///
    /// Problems come out in detection order: the file-level footer check
    /// first, then per-line findings top to bottom.
    #[must_use]
    pub fn check_lines<'a>(
        &self,
        path: &Path,
        text: &str,
        lines: impl IntoIterator<Item = ScannedLine<'a>>,
        preference: QuotePreference,
    ) -> Vec<Problem> {
        let mut problems = Vec::new();

        if let Some(marker) = &self.footer_marker
            && !text.contains(marker.as_str())
        {
            problems.push(Problem::new(
                path,
                0,
                Rule::MissingFooter,
                format!("missing footer marker '{marker}'"),
            ));
        }

        let quotes_exempt = self.quote_exempt.is_match(path);

        for line in lines.into_iter().filter(ScannedLine::is_checkable) {
            let trimmed = line.text.trim();

            if trimmed.ends_with(BARE_EXCEPT) {
                problems.push(Problem::new(
                    path,
                    line.number,
                    Rule::BareExcept,
                    "bare 'except:' catches everything; name the exception",
                ));
            }

            if let Some(call) = self.debug_call(line.text) {
                problems.push(Problem::new(
                    path,
                    line.number,
                    Rule::DebugCall,
                    format!("leftover debugger call '{call}'"),
                ));
            }

            if !quotes_exempt && has_inconsistent_quotes(line.text, preference) {
                problems.push(Problem::new(
                    path,
                    line.number,
                    Rule::InconsistentQuotes,
                    format!(
                        "inconsistent quotes: this file prefers {} quotes",
                        preference.preferred_name()
                    ),
                ));
            }
        }

        problems
    }

    fn debug_call<'t>(&self, line: &'t str) -> Option<&'t str> {
        if line.contains(STATEMENT_SEPARATOR) {
            return None;
        }
        self.debug_call
            .as_ref()?
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

fn has_inconsistent_quotes(line: &str, preference: QuotePreference) -> bool {
    if line.contains(PARAM_MARKER)
        || line.contains(TRIPLE_QUOTE)
        || line.contains(QUOTED_SINGLE)
        || line.contains(QUOTED_DOUBLE)
    {
        return false;
    }
    line.contains(preference.alternate) && !line.contains(preference.preferred)
}

fn build_debug_call_regex(modules: &[String]) -> Option<Regex> {
    if modules.is_empty() {
        return None;
    }
    let alternatives = modules
        .iter()
        .map(|m| regex::escape(m))
        .collect::<Vec<_>>()
        .join("|");
    // Escaped identifiers cannot produce an invalid pattern.
    Regex::new(&format!(r"\b((?:{alternatives})\.[A-Za-z_]\w*)")).ok()
}

fn build_quote_exempt(extra: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    let patterns = BUILTIN_QUOTE_EXEMPT
        .iter()
        .map(|p| (*p).to_string())
        .chain(extra.iter().cloned());
    for pattern in patterns {
        let glob = Glob::new(&pattern).map_err(|e| StyleGuardError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| StyleGuardError::InvalidPattern {
        pattern: "combined patterns".to_string(),
        source: e,
    })
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
