use std::{fmt, str::FromStr};

use chrono::{DateTime, TimeZone, Utc};
use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::error::{DecodeError, IdentifierError};

/// Milliseconds between the unix epoch and the first second of 2015, the
/// point every identifier timestamp is measured from.
pub const EPOCH_OFFSET_MS: u64 = 1_420_070_400_000;

/// Number of low bits (worker, process, increment) below the timestamp.
pub const TIMESTAMP_SHIFT: u32 = 22;

/// A 64-bit, time-embedding, monotonically increasing identifier.
///
/// Transmitted as a decimal string on the wire, held as a `u64` in memory.
/// `Display` and `FromStr` round trip exactly for every `u64`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Snowflake(u64);

impl Snowflake {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Milliseconds since the unix epoch at which this identifier was minted.
    pub const fn timestamp_millis(&self) -> u64 {
        (self.0 >> TIMESTAMP_SHIFT) + EPOCH_OFFSET_MS
    }

    /// Creation instant embedded in this identifier. Never fails: every `u64`
    /// decodes to an instant well inside chrono's representable range.
    pub fn creation_time(&self) -> DateTime<Utc> {
        // (u64::MAX >> 22) + offset < i64::MAX, the cast is lossless
        let millis = self.timestamp_millis() as i64;
        Utc.timestamp_millis_opt(millis).single().unwrap_or_default()
    }

    /// Parses a wire identifier and decodes its creation instant.
    pub fn decode_timestamp(id: &str) -> Result<DateTime<Utc>, DecodeError> {
        Ok(id.parse::<Snowflake>()?.creation_time())
    }
}

impl From<u64> for Snowflake {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for u64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Snowflake {
    type Err = DecodeError;

    /// Accepts decimal digits only; signs and whitespace are malformed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DecodeError::MalformedIdentifier {
            value: s.to_string(),
        };
        if s.is_empty() || !s.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(malformed());
        }
        s.parse::<u64>().map(Snowflake).map_err(|_| malformed())
    }
}

impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SnowflakeVisitor)
    }
}

struct SnowflakeVisitor;

impl<'de> Visitor<'de> for SnowflakeVisitor {
    type Value = Snowflake;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal identifier string or an unsigned integer")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Snowflake, E> {
        Ok(Snowflake(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Snowflake, E> {
        u64::try_from(value)
            .map(Snowflake)
            .map_err(|_| E::custom(format!("negative identifier {}", value)))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Snowflake, E> {
        value.parse().map_err(E::custom)
    }
}

/// Anything that is looked up by a [`Snowflake`].
pub trait Identifiable {
    fn id(&self) -> Snowflake;

    fn creation_time(&self) -> DateTime<Utc> {
        self.id().creation_time()
    }
}

impl Identifiable for Snowflake {
    fn id(&self) -> Snowflake {
        *self
    }
}

/// Creation instant of an entity that may be absent.
pub fn creation_time_of<T: Identifiable + ?Sized>(
    entity: Option<&T>,
) -> Result<DateTime<Utc>, IdentifierError> {
    entity
        .map(|entity| entity.creation_time())
        .ok_or(IdentifierError::MissingEntity)
}

/// RFC 1123 rendering of an instant, e.g. `Thu, 1 Jan 2015 00:00:00 +0000`.
pub fn format_date_time(time: &DateTime<Utc>) -> String {
    time.to_rfc2822()
}
