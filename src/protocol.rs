//! Vocabulary of the remote SQL execution service: the records exchanged with it and the
//! [`CliService`] capability used to talk to it.
//!
//! Two decisions are already baked into this module:
//!
//! * Treat warnings attached to successful responses by logging them with `log`.
//! * Check wire columns for exactly one populated array once, then work with [`ColumnBatch`].

mod row_set;
mod schema;
mod service;
mod status;
mod type_id;

pub use self::{
    row_set::{ColumnBatch, RawColumn, RowSet, TypedColumn},
    schema::{ColumnDesc, TableSchema},
    service::{
        CliService, CloseOperationReq, CloseOperationResp, FetchOrientation, FetchResultsReq,
        FetchResultsResp, GetResultSetMetadataReq, GetResultSetMetadataResp, OperationHandle,
        TransportError,
    },
    status::{Status, StatusCode, log_info_messages},
    type_id::{TypeId, UNBOUNDED_LENGTH},
};
