//! Column encodings shared by the repositories.

use chrono::SecondsFormat;
use storefront_domain::time::Timestamp;

use crate::error::decode_error;

/// Fixed-width RFC 3339 so that text comparison matches time order.
pub(crate) fn encode_time(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_time(raw: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.to_utc())
        .map_err(decode_error)
}

/// Convert a stored integer id into a typed id.
pub(crate) fn decode_id<T>(raw: i64) -> Result<T, sqlx::Error>
where
    T: TryFrom<i64, Error = storefront_domain::error::ValidationError>,
{
    T::try_from(raw).map_err(decode_error)
}
