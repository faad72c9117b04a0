//! Column metadata and type information

use std::fmt;

use serde::{Deserialize, Serialize};

/// Resolution of temporal values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
}

impl TimeUnit {
    /// Number of units in one second
    pub fn per_second(self) -> i64 {
        match self {
            TimeUnit::Nanoseconds => 1_000_000_000,
            TimeUnit::Microseconds => 1_000_000,
            TimeUnit::Milliseconds => 1_000,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Nanoseconds => write!(f, "ns"),
            TimeUnit::Microseconds => write!(f, "μs"),
            TimeUnit::Milliseconds => write!(f, "ms"),
        }
    }
}

/// Declared type of a column
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    #[default]
    Null,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
    Date,
    Time,
    Datetime(TimeUnit, Option<String>),
    Duration(TimeUnit),
    /// Fixed-point decimal with optional precision and a scale
    Decimal(Option<usize>, usize),
    List(Box<DataType>),
    Struct(Vec<Field>),
}

impl DataType {
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, DataType::Float32 | DataType::Float64)
    }

    /// Integers, floats and decimals; these follow the numeric alignment option
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float() || matches!(self, DataType::Decimal(..))
    }

    /// Widen the type to accommodate another type
    pub fn widen(self, other: DataType) -> DataType {
        if self == other {
            return self;
        }

        match (self, other) {
            (DataType::Null, t) | (t, DataType::Null) => t,
            (DataType::Int64 | DataType::UInt64, DataType::Float64)
            | (DataType::Float64, DataType::Int64 | DataType::UInt64)
            | (DataType::Int64, DataType::UInt64)
            | (DataType::UInt64, DataType::Int64) => DataType::Float64,
            (DataType::List(a), DataType::List(b)) => DataType::List(Box::new((*a).widen(*b))),
            (DataType::Date, DataType::Datetime(unit, tz))
            | (DataType::Datetime(unit, tz), DataType::Date) => DataType::Datetime(unit, tz),
            _ => DataType::String,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Null => write!(f, "null"),
            DataType::Boolean => write!(f, "bool"),
            DataType::Int8 => write!(f, "i8"),
            DataType::Int16 => write!(f, "i16"),
            DataType::Int32 => write!(f, "i32"),
            DataType::Int64 => write!(f, "i64"),
            DataType::UInt8 => write!(f, "u8"),
            DataType::UInt16 => write!(f, "u16"),
            DataType::UInt32 => write!(f, "u32"),
            DataType::UInt64 => write!(f, "u64"),
            DataType::Float32 => write!(f, "f32"),
            DataType::Float64 => write!(f, "f64"),
            DataType::String => write!(f, "str"),
            DataType::Date => write!(f, "date"),
            DataType::Time => write!(f, "time"),
            DataType::Datetime(unit, None) => write!(f, "datetime[{}]", unit),
            DataType::Datetime(unit, Some(tz)) => write!(f, "datetime[{}, {}]", unit, tz),
            DataType::Duration(unit) => write!(f, "duration[{}]", unit),
            DataType::Decimal(Some(precision), scale) => {
                write!(f, "decimal[{},{}]", precision, scale)
            }
            DataType::Decimal(None, scale) => write!(f, "decimal[*,{}]", scale),
            DataType::List(inner) => write!(f, "list[{}]", inner),
            DataType::Struct(fields) => write!(f, "struct[{}]", fields.len()),
        }
    }
}

/// A named, typed slot inside a struct column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub dtype: DataType,
}

impl Field {
    pub fn new(name: impl Into<String>, dtype: DataType) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_names() {
        assert_eq!(DataType::Int64.to_string(), "i64");
        assert_eq!(DataType::String.to_string(), "str");
        assert_eq!(
            DataType::List(Box::new(DataType::Int64)).to_string(),
            "list[i64]"
        );
        assert_eq!(DataType::Decimal(Some(10), 2).to_string(), "decimal[10,2]");
        assert_eq!(DataType::Decimal(None, 3).to_string(), "decimal[*,3]");
        assert_eq!(
            DataType::Datetime(TimeUnit::Microseconds, Some("UTC".into())).to_string(),
            "datetime[μs, UTC]"
        );
        assert_eq!(
            DataType::Struct(vec![
                Field::new("a", DataType::Int8),
                Field::new("b", DataType::String)
            ])
            .to_string(),
            "struct[2]"
        );
    }

    #[test]
    fn test_widen() {
        assert_eq!(DataType::Null.widen(DataType::Int64), DataType::Int64);
        assert_eq!(DataType::Int64.widen(DataType::Float64), DataType::Float64);
        assert_eq!(DataType::Int64.widen(DataType::UInt64), DataType::Float64);
        assert_eq!(DataType::UInt64.widen(DataType::Float64), DataType::Float64);
        assert_eq!(DataType::Boolean.widen(DataType::Int64), DataType::String);
        assert_eq!(DataType::default(), DataType::Null);
        assert_eq!(
            DataType::List(Box::new(DataType::Null)).widen(DataType::List(Box::new(DataType::Int64))),
            DataType::List(Box::new(DataType::Int64))
        );
    }
}
