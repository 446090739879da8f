//! # Result sets of a remote SQL execution service
//!
//! Executing a statement on the remote service yields an operation handle. The rows of its result
//! set are not returned at once, but fetched page by page. Each page is column major, with a
//! separate null bitmap for each column. This library fetches these pages on demand, decodes them
//! into row oriented [`Value`]s and describes the columns of the result set.
//!
//! Establishing connections, executing statements and adapting [`Rows`] to the driver interface
//! of a particular application are left to the caller. The remote service is only required to
//! implement [`CliService`].
//!
//! ```
//! use dbsql_rows::{CliService, Cursor, Error, OperationHandle, ResultSetMetadata, Rows,
//!     RowsOptions};
//!
//! fn print_all(client: impl CliService, handle: OperationHandle) -> Result<(), Error> {
//!     let mut rows = Rows::new(client, handle, RowsOptions::default());
//!     println!("{}", rows.column_names()?.join(","));
//!     while let Some(row) = rows.next_row()? {
//!         println!("{row:?}");
//!     }
//!     rows.close()
//! }
//! ```

mod cursor;
mod error;
mod result_set_metadata;

pub mod buffers;
pub mod protocol;

pub use self::{
    buffers::Value,
    cursor::{Cursor, DEFAULT_PAGE_SIZE, PageFetcher, Rows, RowsBuilder, RowsOptions, SchemaCell},
    error::Error,
    protocol::{CliService, ColumnDesc, OperationHandle, TableSchema, TypeId},
    result_set_metadata::{Nullable, ResultSetMetadata, ScanType},
};
// Reexports
/// Reexports `chrono-tz` to enable applications to always use the same time zone type as this
/// crate.
pub use chrono_tz;
