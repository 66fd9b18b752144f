#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    ZeroCapacity,
}

impl std::fmt::Display for HistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryError::ZeroCapacity => {
                write!(f, "History capacity must be at least 1")
            }
        }
    }
}

impl std::error::Error for HistoryError {}
