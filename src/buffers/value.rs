use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::protocol::{ColumnBatch, ColumnDesc, TypeId, TypedColumn};

use super::is_null;

/// Format of timestamp columns transmitted as text. The fraction is optional and may have up to
/// nanosecond precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Format of date columns transmitted as text.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single field of a row.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F64(f64),
    Text(String),
    Bytes(Vec<u8>),
    /// Timestamps and dates (at midnight) in the time zone of the cursor.
    DateTime(DateTime<Tz>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Extracts the value at `row_index` from a column batch.
///
/// Nulls are reported as [`Value::Null`] independent of the column type. Text in `TIMESTAMP` and
/// `DATE` columns is parsed in `time_zone`. Text which does not match [`TIMESTAMP_FORMAT`] or
/// [`DATE_FORMAT`] respectively is returned as [`Value::Text`] instead. A `row_index` outside of
/// the batch yields [`Value::Null`].
pub fn decode(column: &ColumnBatch, desc: &ColumnDesc, row_index: usize, time_zone: Tz) -> Value {
    match column {
        ColumnBatch::String(col) => {
            let Some(text) = element(col, row_index) else {
                return Value::Null;
            };
            let parsed = match desc.type_id {
                TypeId::Timestamp => parse_timestamp(text, time_zone),
                TypeId::Date => parse_date(text, time_zone),
                _ => None,
            };
            parsed
                .map(Value::DateTime)
                .unwrap_or_else(|| Value::Text(text.clone()))
        }
        ColumnBatch::Byte(col) => element(col, row_index).map_or(Value::Null, |&v| Value::I8(v)),
        ColumnBatch::I16(col) => element(col, row_index).map_or(Value::Null, |&v| Value::I16(v)),
        ColumnBatch::I32(col) => element(col, row_index).map_or(Value::Null, |&v| Value::I32(v)),
        ColumnBatch::I64(col) => element(col, row_index).map_or(Value::Null, |&v| Value::I64(v)),
        ColumnBatch::Bool(col) => element(col, row_index).map_or(Value::Null, |&v| Value::Bool(v)),
        ColumnBatch::Double(col) => {
            element(col, row_index).map_or(Value::Null, |&v| Value::F64(v))
        }
        ColumnBatch::Binary(col) => {
            element(col, row_index).map_or(Value::Null, |v| Value::Bytes(v.clone()))
        }
    }
}

/// `None` if the element is null or out of bounds.
fn element<T>(col: &TypedColumn<T>, row_index: usize) -> Option<&T> {
    if is_null(&col.nulls, row_index) {
        None
    } else {
        col.values.get(row_index)
    }
}

fn parse_timestamp(text: &str, time_zone: Tz) -> Option<DateTime<Tz>> {
    let naive = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).ok()?;
    // Ambiguous local times (end of daylight saving time) resolve to the earlier instant. Local
    // times skipped by the time zone are treated like malformed text.
    time_zone.from_local_datetime(&naive).earliest()
}

fn parse_date(text: &str, time_zone: Tz) -> Option<DateTime<Tz>> {
    let midnight = NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()?
        .and_hms_opt(0, 0, 0)?;
    time_zone.from_local_datetime(&midnight).earliest()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, TimeZone};
    use chrono_tz::{Europe::Berlin, Tz, UTC};

    use super::{Value, decode};
    use crate::protocol::{ColumnBatch, ColumnDesc, TypeId, TypedColumn};

    fn text_column(values: &[&str]) -> ColumnBatch {
        ColumnBatch::String(TypedColumn::from_values(
            values.iter().map(|&v| v.to_owned()).collect(),
        ))
    }

    fn at(date: (i32, u32, u32), time: (u32, u32, u32), nano: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .unwrap()
            .and_hms_nano_opt(time.0, time.1, time.2, nano)
            .unwrap()
    }

    fn local(time_zone: Tz, naive: NaiveDateTime) -> Value {
        Value::DateTime(time_zone.from_local_datetime(&naive).unwrap())
    }

    #[test]
    fn nulls_win_over_array_content() {
        let column = ColumnBatch::I64(TypedColumn::new(vec![10, 20, 30], vec![0b101]));
        let desc = ColumnDesc::new("n", TypeId::BigInt);

        let values: Vec<Value> = (0..3).map(|i| decode(&column, &desc, i, UTC)).collect();

        assert_eq!(vec![Value::Null, Value::I64(20), Value::Null], values);
    }

    #[test]
    fn null_timestamp_is_null_not_text() {
        let column = ColumnBatch::String(TypedColumn::new(vec!["garbage".to_owned()], vec![1]));
        let desc = ColumnDesc::new("ts", TypeId::Timestamp);
        assert_eq!(Value::Null, decode(&column, &desc, 0, UTC));
    }

    #[test]
    fn timestamp_with_nanoseconds_in_time_zone() {
        let column = text_column(&["2024-01-02 03:04:05.123456789"]);
        let desc = ColumnDesc::new("ts", TypeId::Timestamp);

        let value = decode(&column, &desc, 0, Berlin);

        assert_eq!(local(Berlin, at((2024, 1, 2), (3, 4, 5), 123_456_789)), value);
    }

    #[test]
    fn timestamp_without_fraction() {
        let column = text_column(&["1999-12-31 23:59:59"]);
        let desc = ColumnDesc::new("ts", TypeId::Timestamp);

        let value = decode(&column, &desc, 0, UTC);

        assert_eq!(local(UTC, at((1999, 12, 31), (23, 59, 59), 0)), value);
    }

    #[test]
    fn date_is_midnight_in_time_zone() {
        let column = text_column(&["2024-02-29"]);
        let desc = ColumnDesc::new("d", TypeId::Date);

        let value = decode(&column, &desc, 0, Berlin);

        assert_eq!(local(Berlin, at((2024, 2, 29), (0, 0, 0), 0)), value);
    }

    #[test]
    fn malformed_temporal_text_is_returned_unchanged() {
        let column = text_column(&["not-a-date"]);

        for type_id in [TypeId::Timestamp, TypeId::Date] {
            let desc = ColumnDesc::new("c", type_id);
            assert_eq!(
                Value::Text("not-a-date".to_owned()),
                decode(&column, &desc, 0, UTC)
            );
        }
    }

    #[test]
    fn text_of_other_types_is_not_parsed() {
        let column = text_column(&["2024-01-02"]);
        let desc = ColumnDesc::new("s", TypeId::String);
        assert_eq!(Some("2024-01-02"), decode(&column, &desc, 0, UTC).as_str());
    }

    #[test]
    fn scalar_arrays() {
        let cases = [
            (
                ColumnBatch::Bool(TypedColumn::from_values(vec![true])),
                TypeId::Boolean,
                Value::Bool(true),
            ),
            (
                ColumnBatch::Byte(TypedColumn::from_values(vec![-3])),
                TypeId::TinyInt,
                Value::I8(-3),
            ),
            (
                ColumnBatch::I16(TypedColumn::from_values(vec![300])),
                TypeId::SmallInt,
                Value::I16(300),
            ),
            (
                ColumnBatch::I32(TypedColumn::from_values(vec![70_000])),
                TypeId::Int,
                Value::I32(70_000),
            ),
            (
                ColumnBatch::Double(TypedColumn::from_values(vec![0.5])),
                TypeId::Double,
                Value::F64(0.5),
            ),
            (
                ColumnBatch::Binary(TypedColumn::from_values(vec![vec![0xca, 0xfe]])),
                TypeId::Binary,
                Value::Bytes(vec![0xca, 0xfe]),
            ),
        ];

        for (column, type_id, expected) in cases {
            let desc = ColumnDesc::new("c", type_id);
            assert_eq!(expected, decode(&column, &desc, 0, UTC));
        }
    }

    #[test]
    fn row_index_beyond_batch_is_null() {
        let column = ColumnBatch::I32(TypedColumn::from_values(vec![1]));
        let desc = ColumnDesc::new("c", TypeId::Int);
        assert_eq!(Value::Null, decode(&column, &desc, 5, UTC));
    }
}
