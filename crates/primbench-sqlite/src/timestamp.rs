//! Millisecond Unix timestamps stored as SQLite INTEGER
//!
//! Rows written by other tools sometimes hold RFC 3339 text instead, so
//! decoding accepts both storage classes.

use std::fmt;

use chrono::{DateTime, Utc};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::sqlite::{Sqlite, SqliteTypeInfo, SqliteValueRef};
use sqlx::{Decode, Encode, Type, TypeInfo, ValueRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    pub fn millis(self) -> i64 {
        self.0
    }

    pub fn parse_rfc3339(text: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self(DateTime::parse_from_rfc3339(text)?.timestamp_millis()))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::<Utc>::from_timestamp_millis(self.0) {
            Some(dt) => write!(f, "{}", dt.to_rfc3339()),
            None => write!(f, "{}ms", self.0),
        }
    }
}

impl Type<Sqlite> for Timestamp {
    fn type_info() -> SqliteTypeInfo {
        <i64 as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <i64 as Type<Sqlite>>::compatible(ty) || <&str as Type<Sqlite>>::compatible(ty)
    }
}

impl<'q> Encode<'q, Sqlite> for Timestamp {
    fn encode_by_ref(
        &self,
        buf: &mut <Sqlite as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        <i64 as Encode<'q, Sqlite>>::encode_by_ref(&self.0, buf)
    }
}

impl<'r> Decode<'r, Sqlite> for Timestamp {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let storage = value.type_info().name().to_owned();
        match storage.as_str() {
            "INTEGER" => Ok(Self(<i64 as Decode<Sqlite>>::decode(value)?)),
            "TEXT" => {
                let text = <&str as Decode<Sqlite>>::decode(value)?;
                Ok(Self::parse_rfc3339(text)?)
            }
            other => Err(format!("Timestamp: unsupported storage class {other}").into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rfc3339_offsets() {
        let utc = Timestamp::parse_rfc3339("2024-01-02T03:04:05Z").unwrap();
        let shifted = Timestamp::parse_rfc3339("2024-01-02T05:04:05+02:00").unwrap();
        assert_eq!(utc, shifted);
        assert_eq!(utc.millis(), 1_704_164_645_000);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Timestamp::parse_rfc3339("yesterday").is_err());
        assert!(Timestamp::parse_rfc3339("2024-01-02").is_err());
    }

    #[test]
    fn display_is_rfc3339() {
        assert_eq!(Timestamp(0).to_string(), "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn now_is_after_2024() {
        assert!(Timestamp::now().millis() > 1_704_067_200_000);
    }
}
