use thiserror::Error;

/// Errors raised by the listing pipeline and the rating utilities.
///
/// Bad record data never ends up here: the normalizer absorbs it.
/// These variants signal programming or configuration mistakes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankingError {
    /// A static reference table is inconsistent or out of sync with the data model
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A caller passed a value outside the operation's contract
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl RankingError {
    pub fn configuration(message: impl Into<String>) -> Self {
        RankingError::Configuration(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        RankingError::InvalidArgument(message.into())
    }

    pub fn unknown_field(entity: &str, field: &str) -> Self {
        RankingError::InvalidArgument(format!("unknown {} field: '{}'", entity, field))
    }
}

pub type RankingResult<T> = Result<T, RankingError>;

/// Add context to snapshot load errors
pub fn load_context(path: &std::path::Path) -> String {
    format!("Failed to load snapshot file: {}", path.display())
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RankingError::unknown_field("player", "shoe_size");
        assert_eq!(err.to_string(), "invalid argument: unknown player field: 'shoe_size'");

        let err = RankingError::configuration("no decay rule for 'mystery'");
        assert!(matches!(err, RankingError::Configuration(_)));
    }
}
