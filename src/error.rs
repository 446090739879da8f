use thiserror::Error as ThisError;

use crate::protocol::{FetchOrientation, StatusCode, TransportError};

#[derive(Debug, ThisError)]
/// Error type used to indicate a failure to read, decode or describe a result set.
pub enum Error {
    /// The cursor has been assembled without an operation handle to read results from.
    /// Exclusively emitted by [`crate::RowsBuilder::build`].
    #[error("Rows instance is not bound to an operation handle.")]
    InvalidCursor,
    /// The cursor has been assembled without a client to talk to the remote service. Exclusively
    /// emitted by [`crate::RowsBuilder::build`].
    #[error("Instance of Rows missing client.")]
    MissingClient,
    /// The result set metadata returned by the service did not contain a schema.
    #[error("No schema in result set metadata response.")]
    NoSchemaAvailable,
    #[error("Invalid column index: {index}. The result set has {num_cols} columns.")]
    InvalidColumnIndex {
        /// Zero based column index requested by the application.
        index: usize,
        num_cols: usize,
    },
    /// A page before the first row of the result set would have been required.
    #[error("Unable to fetch row page prior to start of results.")]
    FetchPriorToStart,
    /// Only fetching the next or the prior page is supported. Should not happen, as the page
    /// fetcher only ever derives these two orientations.
    #[error("Unhandled fetch result orientation: {0:?}")]
    UnsupportedDirection(FetchOrientation),
    /// The transport failed to deliver the call or its response.
    #[error("Calling '{function}' on the remote service failed:\n{source}")]
    RemoteCallFailed {
        /// Remote call which failed.
        function: &'static str,
        source: TransportError,
    },
    /// The remote service answered with an error status or did not recognize the operation
    /// handle.
    #[error("'{function}' returned status {code:?}: {message}")]
    RemoteStatus {
        /// Remote call which returned the status.
        function: &'static str,
        code: StatusCode,
        /// Error message reported by the service. Always `invalid handle` for
        /// [`StatusCode::InvalidHandle`].
        message: String,
    },
    #[error(
        "The row buffer has room for {actual} values, yet the result set has {expected} columns. \
        Size the buffer to match the number of columns."
    )]
    BufferWidthMismatch { expected: usize, actual: usize },
    /// A column of a fetched page did not have any of its value arrays populated.
    #[error("Column batch does not contain any values.")]
    ColumnWithoutValues,
    #[error(
        "Column batch must contain exactly one array of values, yet {count} arrays are populated."
    )]
    ColumnWithMultipleValues { count: usize },
}

/// Convenience for turning transport errors into [`Error::RemoteCallFailed`] without spelling out
/// a `map_err` closure at each call site.
pub(crate) trait ExtendResult<T> {
    fn remote_call(self, function: &'static str) -> Result<T, Error>;
}

impl<T> ExtendResult<T> for Result<T, TransportError> {
    fn remote_call(self, function: &'static str) -> Result<T, Error> {
        self.map_err(|source| Error::RemoteCallFailed { function, source })
    }
}
