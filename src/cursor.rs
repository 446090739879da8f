mod page_fetcher;
mod schema_cell;

use chrono_tz::Tz;
use log::debug;

use crate::{
    Error, ResultSetMetadata,
    buffers::{Value, decode},
    error::ExtendResult,
    protocol::{CliService, CloseOperationReq, OperationHandle, TableSchema},
    result_set_metadata::{Nullable, ScanType},
};

pub use self::{page_fetcher::PageFetcher, schema_cell::SchemaCell};

/// Number of rows requested with each fetch, unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: i64 = 10_000;

/// Cursors are used to iterate the result sets of executed statements row by row.
///
/// # Example: Collecting all rows
///
/// ```
/// use dbsql_rows::{Cursor, Error, Value};
///
/// fn fetch_all(mut cursor: impl Cursor) -> Result<Vec<Vec<Value>>, Error> {
///     let mut rows = Vec::new();
///     while let Some(row) = cursor.next_row()? {
///         rows.push(row);
///     }
///     Ok(rows)
/// }
/// ```
pub trait Cursor: ResultSetMetadata {
    /// Writes the values of the next row into `dest`, one for each column.
    ///
    /// # Return
    ///
    /// `true` if a row has been written. `false` if all rows of the result set have been read.
    fn next_into(&mut self, dest: &mut [Value]) -> Result<bool, Error>;

    /// Advances the cursor to the next row in the result set and allocates its values. Use
    /// [`Self::next_into`] to reuse the same buffer for every row.
    fn next_row(&mut self) -> Result<Option<Vec<Value>>, Error> {
        let mut row = vec![Value::Null; self.num_result_cols()?];
        let has_row = self.next_into(&mut row)?;
        Ok(has_row.then_some(row))
    }
}

/// Settings of a cursor, supplied by whoever executed the statement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowsOptions {
    /// Maximum number of rows fetched from the remote service at once.
    pub page_size: i64,
    /// Time zone in which timestamp and date text is interpreted.
    pub time_zone: Tz,
}

impl Default for RowsOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            time_zone: Tz::UTC,
        }
    }
}

/// Assembles [`Rows`] from the parts produced by executing a statement.
///
/// ```
/// use dbsql_rows::{CliService, Error, OperationHandle, RowsBuilder};
///
/// fn open(client: impl CliService, handle: OperationHandle) -> Result<(), Error> {
///     let rows = RowsBuilder::new()
///         .client(client)
///         .operation_handle(handle)
///         .page_size(1_000)
///         .time_zone(chrono_tz::Europe::Berlin)
///         .build()?;
///     rows.close()
/// }
/// ```
#[derive(Debug)]
pub struct RowsBuilder<S> {
    client: Option<S>,
    operation_handle: Option<OperationHandle>,
    options: RowsOptions,
    start_row_number: i64,
}

impl<S> Default for RowsBuilder<S> {
    fn default() -> Self {
        Self {
            client: None,
            operation_handle: None,
            options: RowsOptions::default(),
            start_row_number: 0,
        }
    }
}

impl<S> RowsBuilder<S>
where
    S: CliService,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(mut self, client: S) -> Self {
        self.client = Some(client);
        self
    }

    pub fn operation_handle(mut self, operation_handle: OperationHandle) -> Self {
        self.operation_handle = Some(operation_handle);
        self
    }

    pub fn options(mut self, options: RowsOptions) -> Self {
        self.options = options;
        self
    }

    pub fn page_size(mut self, page_size: i64) -> Self {
        self.options.page_size = page_size;
        self
    }

    pub fn time_zone(mut self, time_zone: Tz) -> Self {
        self.options.time_zone = time_zone;
        self
    }

    /// Logical row number of the first row the cursor reads. Defaults to `0`.
    pub fn start_row_number(mut self, row_number: i64) -> Self {
        self.start_row_number = row_number;
        self
    }

    /// Fails with [`Error::MissingClient`] if no client has been set, or with
    /// [`Error::InvalidCursor`] if no operation handle has been set.
    pub fn build(self) -> Result<Rows<S>, Error> {
        let client = self.client.ok_or(Error::MissingClient)?;
        let operation_handle = self.operation_handle.ok_or(Error::InvalidCursor)?;
        let mut rows = Rows::new(client, operation_handle, self.options);
        rows.next_row_number = self.start_row_number;
        Ok(rows)
    }
}

/// Reads the result set of an operation on the remote service, one page at a time.
///
/// Pages are fetched only as rows are requested. The schema is fetched with the first request
/// which needs it and cached afterwards. Every remote call blocks until its response arrives.
///
/// Dropping `Rows` does not release the operation on the server. Call [`Rows::close`] for that.
#[derive(Debug)]
pub struct Rows<S> {
    client: S,
    operation_handle: OperationHandle,
    time_zone: Tz,
    schema: SchemaCell,
    pages: PageFetcher,
    /// Logical number of the row returned by the next call to `next_into`, counted from the start
    /// of the result set.
    next_row_number: i64,
    /// Position of `next_row_number` within the current page.
    next_row_index: usize,
}

impl<S> Rows<S>
where
    S: CliService,
{
    pub fn new(client: S, operation_handle: OperationHandle, options: RowsOptions) -> Self {
        Self {
            client,
            operation_handle,
            time_zone: options.time_zone,
            schema: SchemaCell::Unresolved,
            pages: PageFetcher::new(options.page_size),
            next_row_number: 0,
            next_row_index: 0,
        }
    }

    /// Logical number of the row returned by the next call to [`Cursor::next_into`].
    pub fn next_row_number(&self) -> i64 {
        self.next_row_number
    }

    pub fn operation_handle(&self) -> &OperationHandle {
        &self.operation_handle
    }

    /// Names of the columns. Empty if the schema can not be obtained.
    pub fn columns(&mut self) -> Vec<String> {
        self.column_names().unwrap_or_default()
    }

    /// Native type of the column at `index`. `None` if the index or the schema is not valid.
    pub fn column_type_scan_type(&mut self, index: usize) -> Option<ScanType> {
        self.col_scan_type(index).ok()
    }

    /// Database type name of the column at `index`. Empty if the index or the schema is not
    /// valid.
    pub fn column_type_database_type_name(&mut self, index: usize) -> String {
        self.col_type_name(index)
            .map(str::to_owned)
            .unwrap_or_default()
    }

    /// Nullability of the column at `index`, which is never known.
    pub fn column_type_nullable(&self, _index: usize) -> Nullable {
        Nullable::Unknown
    }

    /// Maximum length of values of the column at `index`, if it applies.
    pub fn column_type_length(&mut self, index: usize) -> Option<i64> {
        self.col_length(index).ok().flatten()
    }

    /// Releases the operation on the remote service.
    pub fn close(mut self) -> Result<(), Error> {
        debug!("Closing operation after reading {} rows.", self.next_row_number);
        let response = self
            .client
            .close_operation(CloseOperationReq {
                operation_handle: &self.operation_handle,
            })
            .remote_call("CloseOperation")?;
        response.status.into_result("CloseOperation")
    }
}

impl<S> ResultSetMetadata for Rows<S>
where
    S: CliService,
{
    fn schema(&mut self) -> Result<&TableSchema, Error> {
        self.schema
            .resolve(&mut self.client, &self.operation_handle)?
            .ok_or(Error::NoSchemaAvailable)
    }
}

impl<S> Cursor for Rows<S>
where
    S: CliService,
{
    fn next_into(&mut self, dest: &mut [Value]) -> Result<bool, Error> {
        let Some((page, row_index)) = self.pages.ensure_page_contains(
            &mut self.client,
            &self.operation_handle,
            self.next_row_number,
        )?
        else {
            return Ok(false);
        };
        self.next_row_index = row_index;

        // Need the column types to convert the values
        let schema = self
            .schema
            .resolve(&mut self.client, &self.operation_handle)?
            .ok_or(Error::NoSchemaAvailable)?;
        if dest.len() != schema.num_cols() {
            return Err(Error::BufferWidthMismatch {
                expected: schema.num_cols(),
                actual: dest.len(),
            });
        }

        for (index, (slot, desc)) in dest.iter_mut().zip(&schema.columns).enumerate() {
            *slot = page
                .column(index)
                .map(|column| decode(column, desc, self.next_row_index, self.time_zone))
                .unwrap_or(Value::Null);
        }

        self.next_row_index += 1;
        self.next_row_number += 1;
        Ok(true)
    }

    fn next_row(&mut self) -> Result<Option<Vec<Value>>, Error> {
        // End of results takes precedence over a missing schema, same as in `next_into`.
        let exhausted = self
            .pages
            .ensure_page_contains(
                &mut self.client,
                &self.operation_handle,
                self.next_row_number,
            )?
            .is_none();
        if exhausted {
            return Ok(None);
        }
        let mut row = vec![Value::Null; self.num_result_cols()?];
        let has_row = self.next_into(&mut row)?;
        Ok(has_row.then_some(row))
    }
}
