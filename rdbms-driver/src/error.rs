use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Datasource `{datasource_code}` not found for tenant `{tenant_id}`")]
    DatasourceNotFound {
        tenant_id: i64,
        datasource_code: String,
    },

    #[error("Unknown dialect '{0}'")]
    UnknownDialect(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Key `{key_name}` has rows with differing key level attributes")]
    InconsistentKeyAttributes { key_name: String },

    #[error("Column `{column_name}` appears more than once in key `{key_name}`")]
    DuplicateKeyColumn {
        key_name: String,
        column_name: String,
    },

    #[error("Key sequence {key_seq} appears more than once in key `{key_name}`")]
    DuplicateKeySequence { key_name: String, key_seq: i32 },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Execution error: {0}")]
    Execution(String),

    #[error("Error from database when executing query `{query}`: `{source}`")]
    QueryFailed {
        query: String,
        #[source]
        source: Box<DriverError>,
    },

    #[error("Invalid number of results returned from query. Expected `{expected}`, got `{actual}`")]
    InvalidNumberOfResults { actual: usize, expected: usize },

    #[error("Unexpected value in column {index}. Expected {expected}, got {actual}")]
    UnexpectedValue {
        index: usize,
        expected: &'static str,
        actual: String,
    },

    #[error("Column index {0} is out of range")]
    ColumnIndexOutOfRange(usize),

    #[error("Table `{table}` not found in `{schema}`")]
    TableNotFound { schema: String, table: String },
}

impl DriverError {
    /// Only connectivity failures may succeed when the caller tries again.
    pub fn is_retryable(&self) -> bool {
        match self {
            DriverError::Connection(_) => true,
            DriverError::QueryFailed { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    pub(crate) fn with_query(self, query: &str) -> Self {
        DriverError::QueryFailed {
            query: query.to_string(),
            source: Box::new(self),
        }
    }
}

pub type Result<T = ()> = std::result::Result<T, DriverError>;
