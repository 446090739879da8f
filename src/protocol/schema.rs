use super::TypeId;

/// Describes the name and type of a column in a result set.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct ColumnDesc {
    /// Column name. May be empty if unavailable.
    pub column_name: String,
    /// Primitive type the column has been resolved to.
    pub type_id: TypeId,
    /// One based ordinal position of the column as reported by the service.
    pub position: i32,
    pub comment: Option<String>,
}

impl ColumnDesc {
    /// Column description with `position` and `comment` left at their defaults.
    pub fn new(column_name: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            column_name: column_name.into(),
            type_id,
            ..Default::default()
        }
    }
}

/// Schema of a result set. Ordered and indexed like the columns of each page.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct TableSchema {
    pub columns: Vec<ColumnDesc>,
}

impl TableSchema {
    pub fn new(columns: Vec<ColumnDesc>) -> Self {
        Self { columns }
    }

    pub fn num_cols(&self) -> usize {
        self.columns.len()
    }

    /// Names of the columns in order.
    pub fn column_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.columns.iter().map(|column| column.column_name.as_str())
    }
}
