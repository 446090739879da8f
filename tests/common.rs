use std::collections::VecDeque;

use dbsql_rows::protocol::{
    CliService, CloseOperationReq, CloseOperationResp, ColumnBatch, ColumnDesc, FetchOrientation,
    FetchResultsReq, FetchResultsResp, GetResultSetMetadataReq, GetResultSetMetadataResp,
    OperationHandle, RowSet, Status, TableSchema, TransportError,
};

/// In memory stand-in for the remote service. Answers with scripted responses and counts the
/// calls made to it.
#[derive(Debug, Default)]
pub struct ServiceStub {
    pub metadata: GetResultSetMetadataResp,
    pub pages: VecDeque<FetchResultsResp>,
    pub close_status: Status,
    pub metadata_calls: usize,
    pub fetch_requests: Vec<(FetchOrientation, i64)>,
    pub closed_handles: Vec<OperationHandle>,
}

impl ServiceStub {
    /// Stub for a result set with the given schema. Pages are appended with [`Self::page`].
    pub fn with_schema(columns: Vec<ColumnDesc>) -> Self {
        Self {
            metadata: GetResultSetMetadataResp {
                status: Status::success(),
                schema: Some(TableSchema::new(columns)),
            },
            ..Self::default()
        }
    }

    pub fn page(
        mut self,
        start_row_offset: i64,
        columns: Vec<ColumnBatch>,
        has_more_rows: bool,
    ) -> Self {
        self.pages.push_back(FetchResultsResp {
            status: Status::success(),
            has_more_rows,
            results: Some(RowSet::new(start_row_offset, columns)),
        });
        self
    }
}

impl CliService for ServiceStub {
    fn get_result_set_metadata(
        &mut self,
        _req: GetResultSetMetadataReq<'_>,
    ) -> Result<GetResultSetMetadataResp, TransportError> {
        self.metadata_calls += 1;
        Ok(self.metadata.clone())
    }

    fn fetch_results(
        &mut self,
        req: FetchResultsReq<'_>,
    ) -> Result<FetchResultsResp, TransportError> {
        self.fetch_requests.push((req.orientation, req.max_rows));
        self.pages
            .pop_front()
            .ok_or_else(|| "Connection reset by peer".into())
    }

    fn close_operation(
        &mut self,
        req: CloseOperationReq<'_>,
    ) -> Result<CloseOperationResp, TransportError> {
        self.closed_handles.push(req.operation_handle.clone());
        Ok(CloseOperationResp {
            status: self.close_status.clone(),
        })
    }
}

pub fn init() {
    // Set environment to something like:
    // RUST_LOG=dbsql_rows=debug cargo test
    let _ = env_logger::builder().is_test(true).try_init();
}
