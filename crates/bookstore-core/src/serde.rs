//! Response-body formats for timestamps and amounts.

// Module name shadows the `serde` crate; use `::serde` for the external crate.
use ::serde::Serializer;
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;

/// `2025-08-11T11:09:00.000Z`: UTC, millisecond precision.
pub fn to_rfc3339_ms<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Amounts as strings with exactly two fractional digits. The store may hand back `5` for
/// `5.00`.
pub fn to_money_string<S>(amount: &Decimal, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.collect_str(&format_args!("{amount:.2}"))
}
