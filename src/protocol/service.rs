use super::{RowSet, Status, TableSchema};

/// Error raised by the transport underneath a [`CliService`], e.g. a failed connection or an
/// expired deadline.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Opaque identifier of a statement executed on the remote service. The results of the statement
/// are read through it.
///
/// Holding an operation handle does not keep the server side operation alive, nor does dropping
/// it release the operation. That is done explicitly using [`CliService::close_operation`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct OperationHandle {
    pub guid: Vec<u8>,
    pub secret: Vec<u8>,
    /// `false` if the statement does not produce a result set, e.g. DDL statements.
    pub has_result_set: bool,
}

/// Direction in which a page of results is fetched relative to the page fetched last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOrientation {
    Next,
    Prior,
    Relative,
    Absolute,
    First,
    Last,
}

#[derive(Clone, Copy, Debug)]
pub struct GetResultSetMetadataReq<'h> {
    pub operation_handle: &'h OperationHandle,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct GetResultSetMetadataResp {
    pub status: Status,
    /// May be missing, e.g. if the operation does not have a result set.
    pub schema: Option<TableSchema>,
}

#[derive(Clone, Copy, Debug)]
pub struct FetchResultsReq<'h> {
    pub operation_handle: &'h OperationHandle,
    pub orientation: FetchOrientation,
    /// Upper bound for the number of rows in the returned page.
    pub max_rows: i64,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct FetchResultsResp {
    pub status: Status,
    /// `true` if fetching forward may yield further rows.
    pub has_more_rows: bool,
    pub results: Option<RowSet>,
}

#[derive(Clone, Copy, Debug)]
pub struct CloseOperationReq<'h> {
    pub operation_handle: &'h OperationHandle,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct CloseOperationResp {
    pub status: Status,
}

/// The calls of the remote SQL execution service needed to read the results of an operation.
///
/// Each call blocks until the response arrives. Deadlines and cancellation are the business of
/// the implementation and surface as [`TransportError`]. A non successful [`Status`] in a
/// response is not a transport error, it is inspected by the caller.
pub trait CliService {
    fn get_result_set_metadata(
        &mut self,
        req: GetResultSetMetadataReq<'_>,
    ) -> Result<GetResultSetMetadataResp, TransportError>;

    fn fetch_results(
        &mut self,
        req: FetchResultsReq<'_>,
    ) -> Result<FetchResultsResp, TransportError>;

    fn close_operation(
        &mut self,
        req: CloseOperationReq<'_>,
    ) -> Result<CloseOperationResp, TransportError>;
}

impl<T> CliService for &mut T
where
    T: CliService + ?Sized,
{
    fn get_result_set_metadata(
        &mut self,
        req: GetResultSetMetadataReq<'_>,
    ) -> Result<GetResultSetMetadataResp, TransportError> {
        (**self).get_result_set_metadata(req)
    }

    fn fetch_results(
        &mut self,
        req: FetchResultsReq<'_>,
    ) -> Result<FetchResultsResp, TransportError> {
        (**self).fetch_results(req)
    }

    fn close_operation(
        &mut self,
        req: CloseOperationReq<'_>,
    ) -> Result<CloseOperationResp, TransportError> {
        (**self).close_operation(req)
    }
}

impl<T> CliService for Box<T>
where
    T: CliService + ?Sized,
{
    fn get_result_set_metadata(
        &mut self,
        req: GetResultSetMetadataReq<'_>,
    ) -> Result<GetResultSetMetadataResp, TransportError> {
        (**self).get_result_set_metadata(req)
    }

    fn fetch_results(
        &mut self,
        req: FetchResultsReq<'_>,
    ) -> Result<FetchResultsResp, TransportError> {
        (**self).fetch_results(req)
    }

    fn close_operation(
        &mut self,
        req: CloseOperationReq<'_>,
    ) -> Result<CloseOperationResp, TransportError> {
        (**self).close_operation(req)
    }
}
