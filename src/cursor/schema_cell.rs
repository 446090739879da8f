use log::debug;

use crate::{
    Error,
    error::ExtendResult,
    protocol::{CliService, GetResultSetMetadataReq, OperationHandle, TableSchema},
};

/// Result set metadata, fetched at most once per cursor.
#[derive(Debug, Default)]
pub enum SchemaCell {
    /// No metadata request has succeeded yet.
    #[default]
    Unresolved,
    /// Metadata has been fetched. The service may have answered without a schema, which is
    /// remembered just the same.
    Resolved(Option<TableSchema>),
}

impl SchemaCell {
    /// Schema of the operation, issuing a metadata request only if none succeeded before. Failed
    /// requests leave the cell unresolved.
    pub fn resolve(
        &mut self,
        client: &mut impl CliService,
        operation_handle: &OperationHandle,
    ) -> Result<Option<&TableSchema>, Error> {
        match self {
            SchemaCell::Resolved(schema) => Ok(schema.as_ref()),
            SchemaCell::Unresolved => {
                let response = client
                    .get_result_set_metadata(GetResultSetMetadataReq { operation_handle })
                    .remote_call("GetResultSetMetadata")?;
                response.status.into_result("GetResultSetMetadata")?;
                debug!(
                    "Resolved result set metadata. Number of columns: {:?}",
                    response.schema.as_ref().map(TableSchema::num_cols)
                );
                *self = SchemaCell::Resolved(response.schema);
                // Answered from the cell without another request
                self.resolve(client, operation_handle)
            }
        }
    }
}
