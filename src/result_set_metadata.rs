use crate::{
    Error,
    protocol::{ColumnDesc, TableSchema, TypeId},
};

/// Native representation an application should use to hold values of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanType {
    /// The column only ever holds `NULL`.
    Null,
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Text,
    DateTime,
    /// Opaque bytes, e.g. decimals, binary or complex types.
    RawBytes,
    /// Type can not be resolved statically. Inspect each value.
    Unknown,
}

impl ScanType {
    pub fn from_type_id(type_id: TypeId) -> Self {
        match type_id {
            TypeId::Boolean => ScanType::Bool,
            TypeId::TinyInt => ScanType::I8,
            TypeId::SmallInt => ScanType::I16,
            TypeId::Int => ScanType::I32,
            TypeId::BigInt => ScanType::I64,
            TypeId::Float => ScanType::F32,
            TypeId::Double => ScanType::F64,
            TypeId::Null => ScanType::Null,
            TypeId::String | TypeId::Char | TypeId::Varchar => ScanType::Text,
            TypeId::Date | TypeId::Timestamp => ScanType::DateTime,
            TypeId::Decimal
            | TypeId::Binary
            | TypeId::Array
            | TypeId::Struct
            | TypeId::Map
            | TypeId::Union => ScanType::RawBytes,
            TypeId::UserDefined => ScanType::Unknown,
            TypeId::IntervalDayTime | TypeId::IntervalYearMonth => ScanType::Text,
            TypeId::Other(_) => ScanType::Unknown,
        }
    }
}

/// Indication of whether a column is nullable or not.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum Nullable {
    #[default]
    Unknown,
    Nullable,
    NoNulls,
}

/// Provides Metadata of the resulting result set. Implemented by [`crate::Rows`].
///
/// The schema is fetched from the remote service with the first call which needs it and cached
/// afterwards. Column indices start with `0`.
pub trait ResultSetMetadata {
    /// Schema of the result set. Fails with [`Error::NoSchemaAvailable`] if the service did not
    /// provide one.
    fn schema(&mut self) -> Result<&TableSchema, Error>;

    /// Number of columns in the result set.
    fn num_result_cols(&mut self) -> Result<usize, Error> {
        Ok(self.schema()?.num_cols())
    }

    /// Use this if you want to iterate over all column names and allocate a `String` for each one.
    fn column_names(&mut self) -> Result<Vec<String>, Error> {
        Ok(self.schema()?.column_names().map(str::to_owned).collect())
    }

    /// Fetch a column description using the column index. Fails with
    /// [`Error::InvalidColumnIndex`] if `index` is not smaller than the number of columns.
    fn describe_col(&mut self, index: usize) -> Result<&ColumnDesc, Error> {
        let schema = self.schema()?;
        let num_cols = schema.num_cols();
        schema
            .columns
            .get(index)
            .ok_or(Error::InvalidColumnIndex { index, num_cols })
    }

    /// Primitive type of the specified column.
    fn col_type_id(&mut self, index: usize) -> Result<TypeId, Error> {
        Ok(self.describe_col(index)?.type_id)
    }

    /// Native type suited to hold the values of the specified column.
    fn col_scan_type(&mut self, index: usize) -> Result<ScanType, Error> {
        self.col_type_id(index).map(ScanType::from_type_id)
    }

    /// Database type name of the column, e.g. `"STRING"` or `"TIMESTAMP"`.
    fn col_type_name(&mut self, index: usize) -> Result<&'static str, Error> {
        self.col_type_id(index).map(TypeId::type_name)
    }

    /// The protocol does not convey nullability, so this is always [`Nullable::Unknown`] for any
    /// valid column index.
    fn col_nullable(&mut self, index: usize) -> Result<Nullable, Error> {
        self.describe_col(index)?;
        Ok(Nullable::Unknown)
    }

    /// Maximum length of values in the specified column. `Some(i64::MAX)` for variable sized
    /// types without upper bound, `None` if no length applies.
    fn col_length(&mut self, index: usize) -> Result<Option<i64>, Error> {
        self.col_type_id(index).map(TypeId::display_length)
    }
}
