use std::fmt;

/// Outcome of an operation applied to several files
///
/// Items that fail are skipped and the batch carries on; the caller decides
/// from [`BatchReport::has_failures`] whether the run as a whole failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    succeeded: Vec<String>,
    skipped: Vec<(String, String)>,
    ignored: Vec<String>,
}

impl BatchReport {
    pub fn succeed(&mut self, item: impl Into<String>) {
        self.succeeded.push(item.into());
    }

    /// Record an item that could not be processed because of an error
    pub fn skip(&mut self, item: impl Into<String>, reason: impl fmt::Display) {
        self.skipped.push((item.into(), reason.to_string()));
    }

    /// Record an item left out on purpose (bypass list, nothing to do)
    pub fn ignore(&mut self, item: impl Into<String>) {
        self.ignored.push(item.into());
    }

    pub fn succeeded(&self) -> &[String] {
        &self.succeeded
    }

    pub fn skipped(&self) -> &[(String, String)] {
        &self.skipped
    }

    pub fn ignored(&self) -> &[String] {
        &self.ignored
    }

    pub fn has_failures(&self) -> bool {
        !self.skipped.is_empty()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} succeeded, {} skipped, {} ignored",
            self.succeeded.len(),
            self.skipped.len(),
            self.ignored.len()
        )
    }
}
