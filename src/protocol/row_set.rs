use crate::Error;

/// Values of one column within a page together with their null bitmap.
///
/// The bitmap holds one bit per row, least significant bit first. It may be shorter than
/// `values`, rows it does not cover are not null.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TypedColumn<T> {
    pub values: Vec<T>,
    pub nulls: Vec<u8>,
}

impl<T> TypedColumn<T> {
    pub fn new(values: Vec<T>, nulls: Vec<u8>) -> Self {
        Self { values, nulls }
    }

    /// A column without any null values.
    pub fn from_values(values: Vec<T>) -> Self {
        Self {
            values,
            nulls: Vec::new(),
        }
    }
}

/// Column major batch of values for a single column. Exactly one kind of array is transported per
/// column, which one depends on the type of the column.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnBatch {
    Bool(TypedColumn<bool>),
    Byte(TypedColumn<i8>),
    I16(TypedColumn<i16>),
    I32(TypedColumn<i32>),
    I64(TypedColumn<i64>),
    Double(TypedColumn<f64>),
    /// Text as well as dates, timestamps, decimals, intervals and complex types.
    String(TypedColumn<String>),
    Binary(TypedColumn<Vec<u8>>),
}

impl ColumnBatch {
    /// Number of rows in this batch.
    pub fn len(&self) -> usize {
        match self {
            ColumnBatch::Bool(col) => col.values.len(),
            ColumnBatch::Byte(col) => col.values.len(),
            ColumnBatch::I16(col) => col.values.len(),
            ColumnBatch::I32(col) => col.values.len(),
            ColumnBatch::I64(col) => col.values.len(),
            ColumnBatch::Double(col) => col.values.len(),
            ColumnBatch::String(col) => col.values.len(),
            ColumnBatch::Binary(col) => col.values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The null bitmap of the populated array.
    pub fn nulls(&self) -> &[u8] {
        match self {
            ColumnBatch::Bool(col) => &col.nulls,
            ColumnBatch::Byte(col) => &col.nulls,
            ColumnBatch::I16(col) => &col.nulls,
            ColumnBatch::I32(col) => &col.nulls,
            ColumnBatch::I64(col) => &col.nulls,
            ColumnBatch::Double(col) => &col.nulls,
            ColumnBatch::String(col) => &col.nulls,
            ColumnBatch::Binary(col) => &col.nulls,
        }
    }
}

/// A column as it is laid out on the wire: one optional slot per array kind. Convert it into a
/// [`ColumnBatch`] using `try_into`, which fails unless exactly one slot is populated.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RawColumn {
    pub bool_val: Option<TypedColumn<bool>>,
    pub byte_val: Option<TypedColumn<i8>>,
    pub i16_val: Option<TypedColumn<i16>>,
    pub i32_val: Option<TypedColumn<i32>>,
    pub i64_val: Option<TypedColumn<i64>>,
    pub double_val: Option<TypedColumn<f64>>,
    pub string_val: Option<TypedColumn<String>>,
    pub binary_val: Option<TypedColumn<Vec<u8>>>,
}

impl TryFrom<RawColumn> for ColumnBatch {
    type Error = Error;

    fn try_from(raw: RawColumn) -> Result<Self, Error> {
        let RawColumn {
            bool_val,
            byte_val,
            i16_val,
            i32_val,
            i64_val,
            double_val,
            string_val,
            binary_val,
        } = raw;
        let mut populated = [
            bool_val.map(ColumnBatch::Bool),
            byte_val.map(ColumnBatch::Byte),
            i16_val.map(ColumnBatch::I16),
            i32_val.map(ColumnBatch::I32),
            i64_val.map(ColumnBatch::I64),
            double_val.map(ColumnBatch::Double),
            string_val.map(ColumnBatch::String),
            binary_val.map(ColumnBatch::Binary),
        ]
        .into_iter()
        .flatten();
        match (populated.next(), populated.count()) {
            (None, _) => Err(Error::ColumnWithoutValues),
            (Some(batch), 0) => Ok(batch),
            (Some(_), others) => Err(Error::ColumnWithMultipleValues { count: others + 1 }),
        }
    }
}

/// Column major rows returned by a single fetch.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RowSet {
    /// Logical row number of the first row in this set, counted from the start of the result.
    pub start_row_offset: i64,
    pub columns: Vec<ColumnBatch>,
}

impl RowSet {
    pub fn new(start_row_offset: i64, columns: Vec<ColumnBatch>) -> Self {
        Self {
            start_row_offset,
            columns,
        }
    }

    /// Converts wire columns, failing on the first column which does not have exactly one
    /// populated array.
    pub fn from_raw_columns(
        start_row_offset: i64,
        columns: impl IntoIterator<Item = RawColumn>,
    ) -> Result<Self, Error> {
        let columns = columns
            .into_iter()
            .map(ColumnBatch::try_from)
            .collect::<Result<_, _>>()?;
        Ok(Self::new(start_row_offset, columns))
    }

    /// Number of rows in the set. All columns share the same length, so the first one is
    /// authoritative. `0` if there are no columns.
    pub fn num_rows(&self) -> usize {
        self.columns.first().map(ColumnBatch::len).unwrap_or(0)
    }
}
