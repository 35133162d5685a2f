use thiserror::Error;

#[derive(Debug, Error)]
pub enum CarbonLedgerError {
    #[error("No emission factor found for category '{0}'")]
    UnknownCategory(String),

    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        name: String,
        value: f64,
        reason: String,
    },

    #[error("Emission factor for '{category}' must be strictly positive, got {value}")]
    InvalidFactor { category: String, value: f64 },

    #[error("Category '{0}' appears more than once in the factor library")]
    DuplicateCategory(String),

    #[error("Category '{0}' is missing from either the factor table or the scope assignments")]
    UnmappedCategory(String),

    #[error("Scope 3 assignment for '{0}' is missing its sub-category")]
    MissingScope3Category(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Failed to write CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}
