//! JSON encoding of an activity counter into a report body.

use crate::core::counter::ActivityCounter;

/// An encoded report, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    body: String,
    titles: usize,
}

impl Report {
    pub fn as_str(&self) -> &str {
        &self.body
    }

    /// Number of distinct titles in the report.
    pub fn titles(&self) -> usize {
        self.titles
    }

    pub fn is_empty(&self) -> bool {
        self.titles == 0
    }

    pub fn into_string(self) -> String {
        self.body
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.body)
    }
}

/// Report encoding errors.
#[derive(Debug)]
pub enum ReportError {
    Serialization(String),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Serialization(e) => write!(f, "Report serialization error: {e}"),
        }
    }
}

impl std::error::Error for ReportError {}

/// Encode the counter as a single-line JSON object `{"title":count,...}`.
///
/// Keys appear in lexicographic order. `"` and `\` inside titles are
/// backslash-escaped and control characters use JSON escapes, so the body
/// always parses as JSON. An empty counter encodes to `{}`.
pub fn encode(counter: &ActivityCounter) -> Result<Report, ReportError> {
    let snapshot = counter.snapshot();
    let body =
        serde_json::to_string(snapshot).map_err(|e| ReportError::Serialization(e.to_string()))?;

    Ok(Report {
        body,
        titles: snapshot.len(),
    })
}
