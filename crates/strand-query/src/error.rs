/// Errors from filter validation and query translation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueryError {
    /// A structured filter field holds a value of the wrong type or range.
    #[error("invalid value for {field}: {value:?}")]
    InvalidFilterValue { field: &'static str, value: String },

    /// No translation rule recognizes the query.
    #[error("unable to parse natural language query: {0:?}")]
    UnparseableQuery(String),

    /// The query parsed but its filters can never match together.
    #[error("query parsed but resulted in conflicting filters: {0}")]
    ConflictingFilters(String),

    /// A built-in translation pattern failed to compile.
    #[error("invalid translation pattern: {0}")]
    InvalidPattern(String),
}

impl QueryError {
    pub(crate) fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidFilterValue {
            field,
            value: value.into(),
        }
    }
}

impl From<regex::Error> for QueryError {
    fn from(err: regex::Error) -> Self {
        Self::InvalidPattern(err.to_string())
    }
}

/// Result alias for query operations.
pub type QueryResult<T> = Result<T, QueryError>;
