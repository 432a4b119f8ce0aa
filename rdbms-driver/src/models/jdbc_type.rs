use serde::{Deserialize, Serialize};

/// The `java.sql.Types` codes that catalog metadata reports column types with.
///
/// The numeric codes are the lingua franca between dialects: a column read from one
/// database can be rendered for another through them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum JdbcType {
    Bit,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Float,
    Real,
    Double,
    Numeric,
    Decimal,
    Char,
    Varchar,
    LongVarchar,
    NChar,
    NVarchar,
    LongNVarchar,
    Date,
    Time,
    Timestamp,
    TimeWithTimezone,
    TimestampWithTimezone,
    Binary,
    VarBinary,
    LongVarBinary,
    Blob,
    Clob,
    NClob,
    Boolean,
}

const CODES: [(JdbcType, i32); 28] = [
    (JdbcType::Bit, -7),
    (JdbcType::TinyInt, -6),
    (JdbcType::SmallInt, 5),
    (JdbcType::Integer, 4),
    (JdbcType::BigInt, -5),
    (JdbcType::Float, 6),
    (JdbcType::Real, 7),
    (JdbcType::Double, 8),
    (JdbcType::Numeric, 2),
    (JdbcType::Decimal, 3),
    (JdbcType::Char, 1),
    (JdbcType::Varchar, 12),
    (JdbcType::LongVarchar, -1),
    (JdbcType::NChar, -15),
    (JdbcType::NVarchar, -9),
    (JdbcType::LongNVarchar, -16),
    (JdbcType::Date, 91),
    (JdbcType::Time, 92),
    (JdbcType::Timestamp, 93),
    (JdbcType::TimeWithTimezone, 2013),
    (JdbcType::TimestampWithTimezone, 2014),
    (JdbcType::Binary, -2),
    (JdbcType::VarBinary, -3),
    (JdbcType::LongVarBinary, -4),
    (JdbcType::Blob, 2004),
    (JdbcType::Clob, 2005),
    (JdbcType::NClob, 2011),
    (JdbcType::Boolean, 16),
];

impl JdbcType {
    pub fn from_code(code: i32) -> Option<JdbcType> {
        CODES.iter().find(|(_, c)| *c == code).map(|(t, _)| *t)
    }

    pub fn code(&self) -> i32 {
        CODES
            .iter()
            .find(|(t, _)| t == self)
            .map(|(_, c)| *c)
            .unwrap_or_default()
    }

    /// Character and temporal types, whose literal values are written as quoted strings.
    pub fn takes_quoted_literal(&self) -> bool {
        matches!(
            self,
            JdbcType::Char
                | JdbcType::Varchar
                | JdbcType::LongVarchar
                | JdbcType::NChar
                | JdbcType::NVarchar
                | JdbcType::LongNVarchar
                | JdbcType::Clob
                | JdbcType::NClob
                | JdbcType::Date
                | JdbcType::Time
                | JdbcType::Timestamp
                | JdbcType::TimeWithTimezone
                | JdbcType::TimestampWithTimezone
        )
    }

    /// Best effort mapping from a native type name of any supported dialect.
    pub fn from_type_name(type_name: &str) -> Option<JdbcType> {
        let upper = type_name.trim().to_ascii_uppercase();
        // "INT UNSIGNED", "TIMESTAMP(6) WITH TIME ZONE" and friends
        let base = upper
            .split(|c: char| c == '(' || c.is_whitespace())
            .next()
            .unwrap_or_default();

        let jdbc_type = match base {
            "BIT" => JdbcType::Bit,
            "TINYINT" => JdbcType::TinyInt,
            "SMALLINT" | "YEAR" => JdbcType::SmallInt,
            "INT" | "INTEGER" | "MEDIUMINT" => JdbcType::Integer,
            "BIGINT" => JdbcType::BigInt,
            "FLOAT" | "BINARY_FLOAT" | "SMALLDECIMAL" => JdbcType::Float,
            "REAL" => JdbcType::Real,
            "DOUBLE" | "BINARY_DOUBLE" => JdbcType::Double,
            "NUMERIC" => JdbcType::Numeric,
            "DECIMAL" | "NUMBER" | "DEC" => JdbcType::Decimal,
            "CHAR" | "CHARACTER" => JdbcType::Char,
            "VARCHAR" | "VARCHAR2" | "ALPHANUM" => JdbcType::Varchar,
            "TEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT" | "LONG" => JdbcType::LongVarchar,
            "NCHAR" => JdbcType::NChar,
            "NVARCHAR" | "NVARCHAR2" | "SHORTTEXT" => JdbcType::NVarchar,
            "DATE" => JdbcType::Date,
            "TIME" => JdbcType::Time,
            "TIMESTAMP" if upper.contains("TIME ZONE") => JdbcType::TimestampWithTimezone,
            "TIMESTAMP" | "DATETIME" | "SECONDDATE" => JdbcType::Timestamp,
            "BINARY" | "RAW" => JdbcType::Binary,
            "VARBINARY" => JdbcType::VarBinary,
            "LONGBLOB" | "MEDIUMBLOB" | "TINYBLOB" => JdbcType::LongVarBinary,
            "BLOB" => JdbcType::Blob,
            "CLOB" => JdbcType::Clob,
            "NCLOB" => JdbcType::NClob,
            "BOOLEAN" | "BOOL" => JdbcType::Boolean,
            _ => return None,
        };

        Some(jdbc_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for (jdbc_type, code) in CODES {
            assert_eq!(JdbcType::from_code(code), Some(jdbc_type));
            assert_eq!(jdbc_type.code(), code);
        }
        assert_eq!(JdbcType::from_code(1111), None);
    }

    #[test]
    fn maps_native_type_names() {
        assert_eq!(JdbcType::from_type_name("int unsigned"), Some(JdbcType::Integer));
        assert_eq!(JdbcType::from_type_name("VARCHAR2"), Some(JdbcType::Varchar));
        assert_eq!(JdbcType::from_type_name("number"), Some(JdbcType::Decimal));
        assert_eq!(
            JdbcType::from_type_name("TIMESTAMP(6) WITH TIME ZONE"),
            Some(JdbcType::TimestampWithTimezone)
        );
        assert_eq!(JdbcType::from_type_name("datetime"), Some(JdbcType::Timestamp));
        assert_eq!(JdbcType::from_type_name("geometry"), None);
    }
}
