use serde::Serialize;

/// Outcome of one external checker run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckerResult {
    pub name: String,
    /// Captured stdout followed by stderr, with temporary link paths
    /// rewritten to the original file names.
    pub output: String,
    pub failed: bool,
}

impl CheckerResult {
    #[must_use]
    pub fn new(name: &str, output: String, failed: bool) -> Self {
        Self {
            name: name.to_string(),
            output,
            failed,
        }
    }

    /// A checker that could not be run at all.
    #[must_use]
    pub fn not_run(name: &str, reason: impl Into<String>) -> Self {
        Self::new(name, reason.into(), true)
    }

    #[must_use]
    pub fn has_output(&self) -> bool {
        !self.output.trim().is_empty()
    }
}
