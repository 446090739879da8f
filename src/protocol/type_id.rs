use std::fmt;

/// Length reported for columns which do not have an upper bound on the size of their values.
pub const UNBOUNDED_LENGTH: i64 = i64::MAX;

/// Enumeration over the primitive column types the remote service reports in a result set
/// schema.
///
/// Complex types (`Array`, `Map`, `Struct`, `Union`) are not described recursively. Their values
/// arrive as opaque text or binary payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TypeId {
    Boolean,
    /// 8 Bit signed integer
    TinyInt,
    /// 16 Bit signed integer
    SmallInt,
    /// 32 Bit signed integer
    Int,
    /// 64 Bit signed integer
    BigInt,
    Float,
    Double,
    String,
    /// Delivered as text in the form `YYYY-MM-DD hh:mm:ss[.fraction]`.
    Timestamp,
    Binary,
    Array,
    Map,
    Struct,
    Union,
    UserDefined,
    Decimal,
    #[default]
    Null,
    /// Delivered as text in the form `YYYY-MM-DD`.
    Date,
    Varchar,
    Char,
    IntervalYearMonth,
    IntervalDayTime,
    /// The service returned a type code which is not part of this enumeration.
    Other(i32),
}

impl TypeId {
    /// Maps the integer code used on the wire to a type id. Unknown codes are preserved in
    /// [`TypeId::Other`].
    pub fn from_i32(code: i32) -> Self {
        match code {
            0 => TypeId::Boolean,
            1 => TypeId::TinyInt,
            2 => TypeId::SmallInt,
            3 => TypeId::Int,
            4 => TypeId::BigInt,
            5 => TypeId::Float,
            6 => TypeId::Double,
            7 => TypeId::String,
            8 => TypeId::Timestamp,
            9 => TypeId::Binary,
            10 => TypeId::Array,
            11 => TypeId::Map,
            12 => TypeId::Struct,
            13 => TypeId::Union,
            14 => TypeId::UserDefined,
            15 => TypeId::Decimal,
            16 => TypeId::Null,
            17 => TypeId::Date,
            18 => TypeId::Varchar,
            19 => TypeId::Char,
            20 => TypeId::IntervalYearMonth,
            21 => TypeId::IntervalDayTime,
            other => TypeId::Other(other),
        }
    }

    /// Name of the type within the protocol's type enumeration, e.g. `"STRING_TYPE"`.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeId::Boolean => "BOOLEAN_TYPE",
            TypeId::TinyInt => "TINYINT_TYPE",
            TypeId::SmallInt => "SMALLINT_TYPE",
            TypeId::Int => "INT_TYPE",
            TypeId::BigInt => "BIGINT_TYPE",
            TypeId::Float => "FLOAT_TYPE",
            TypeId::Double => "DOUBLE_TYPE",
            TypeId::String => "STRING_TYPE",
            TypeId::Timestamp => "TIMESTAMP_TYPE",
            TypeId::Binary => "BINARY_TYPE",
            TypeId::Array => "ARRAY_TYPE",
            TypeId::Map => "MAP_TYPE",
            TypeId::Struct => "STRUCT_TYPE",
            TypeId::Union => "UNION_TYPE",
            TypeId::UserDefined => "USER_DEFINED_TYPE",
            TypeId::Decimal => "DECIMAL_TYPE",
            TypeId::Null => "NULL_TYPE",
            TypeId::Date => "DATE_TYPE",
            TypeId::Varchar => "VARCHAR_TYPE",
            TypeId::Char => "CHAR_TYPE",
            TypeId::IntervalYearMonth => "INTERVAL_YEAR_MONTH_TYPE",
            TypeId::IntervalDayTime => "INTERVAL_DAY_TIME_TYPE",
            TypeId::Other(_) => "<UNSET>",
        }
    }

    /// Database type name of the column, i.e. the enumeration name without its `_TYPE` suffix.
    /// `TypeId::Timestamp` is reported as `"TIMESTAMP"`. Applications branch on these names, so
    /// they must not change.
    pub fn type_name(self) -> &'static str {
        let name = self.as_str();
        name.strip_suffix("_TYPE").unwrap_or(name)
    }

    /// Maximum length of a value in this column, if it is known to be variable sized without
    /// an upper bound. `None` for every other type.
    ///
    /// Complex types are currently delivered as text and therefore also count as unbounded.
    pub fn display_length(self) -> Option<i64> {
        match self {
            TypeId::String
            | TypeId::Varchar
            | TypeId::Binary
            | TypeId::Array
            | TypeId::Map
            | TypeId::Struct => Some(UNBOUNDED_LENGTH),
            _ => None,
        }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
