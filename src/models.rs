
use crate::constants::REPORT_SEPARATOR;

/// A user-submitted report, written once to the report text file.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub summary: String,
    pub detail: String,
}

impl Report {
    pub fn new(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    /// Text written to the report file: summary, blank line, detail
    pub fn contents(&self) -> String {
        format!("{}{}{}", self.summary, REPORT_SEPARATOR, self.detail)
    }
}

/// Remote folder and file path for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    /// Per-day folder, e.g. `/2025-01-15`
    pub folder: String,
    /// Archive path inside the folder, e.g. `/2025-01-15/Crash_on_load.zip`
    pub file: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_contents() {
        assert_eq!(Report::new("S", "D").contents(), "S\n\nD");
        assert_eq!(Report::new("", "").contents(), "\n\n");
    }
}
