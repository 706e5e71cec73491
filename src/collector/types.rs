//! The focused-window capability used by the sampling loop.

/// Source of the title of the window currently holding OS focus.
///
/// Implementations return an empty string when no window is focused or the
/// title cannot be read; the loop treats that as "no sample this tick". An
/// `Err` is reserved for failures of the source itself.
pub trait FocusSource {
    fn focused_title(&mut self) -> Result<String, CollectorError>;
}

impl<F> FocusSource for F
where
    F: FnMut() -> Result<String, CollectorError>,
{
    fn focused_title(&mut self) -> Result<String, CollectorError> {
        self()
    }
}

/// Errors raised by a focus source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectorError {
    /// No focus source exists for this platform.
    Unsupported(String),
    /// The platform call failed.
    Query(String),
}

impl std::fmt::Display for CollectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectorError::Unsupported(os) => {
                write!(f, "Focused window tracking is not supported on {os}")
            }
            CollectorError::Query(e) => write!(f, "Focused window query failed: {e}"),
        }
    }
}

impl std::error::Error for CollectorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_source() {
        let mut titles = vec!["b".to_string(), "a".to_string()];
        let mut source =
            move || -> Result<String, CollectorError> { Ok(titles.pop().unwrap_or_default()) };

        assert_eq!(source.focused_title().unwrap(), "a");
        assert_eq!(source.focused_title().unwrap(), "b");
        assert_eq!(source.focused_title().unwrap(), "");
    }

    #[test]
    fn test_failing_source() {
        let mut source =
            || -> Result<String, CollectorError> { Err(CollectorError::Query("gone".to_string())) };
        let err = source.focused_title().unwrap_err();
        assert_eq!(err.to_string(), "Focused window query failed: gone");
    }
}
