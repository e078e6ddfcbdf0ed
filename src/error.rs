use thiserror::Error;

/// Failures of the neighbourhood price-spread analysis.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// A required logical column could not be matched against the header.
    #[error("could not find {column} column in listings data")]
    MissingColumn { column: &'static str },

    /// Nothing was left to aggregate once invalid rows were dropped.
    #[error("no listings with a valid price and neighbourhood remain after cleaning")]
    EmptyInput,
}
