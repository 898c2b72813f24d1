//! Error handling for the estimator

/// Estimator error type
///
/// The pricing engine itself never fails; these errors come from the
/// mutation boundary, the display summary and configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum EstimatorError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown item {key} in category {category}")]
    UnknownItem { category: String, key: String },

    #[error("Unknown global factor: {0}")]
    UnknownFactor(String),

    #[error("Amount for {label} is not finite")]
    NonFiniteAmount { label: String },

    #[error("Amount for {label} is too large to display")]
    AmountOutOfRange { label: String },

    #[error("Invalid configuration value for {key}: {value}")]
    Config { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, EstimatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EstimatorError::UnknownCategory("audio".to_string());
        assert_eq!(err.to_string(), "Unknown category: audio");

        let err = EstimatorError::UnknownItem {
            category: "discovery".to_string(),
            key: "podcast".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown item podcast in category discovery");

        let err = EstimatorError::NonFiniteAmount {
            label: "total".to_string(),
        };
        assert!(err.to_string().contains("total"));

        let err = EstimatorError::AmountOutOfRange {
            label: "total".to_string(),
        };
        assert_eq!(err.to_string(), "Amount for total is too large to display");

        let err = EstimatorError::Config {
            key: "ESTIMATOR_DISPLAY_PLACES".to_string(),
            value: "two".to_string(),
        };
        assert!(err.to_string().contains("ESTIMATOR_DISPLAY_PLACES"));
    }
}
