//! Timestamp Module
//!
//! Expiry timestamps are kept as decimal numerals rather than native integers,
//! so far-future values written by hand or by tests never lose precision.

use std::cmp::Ordering;
use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// == Public Constants ==
/// Milliseconds in one minute, the multiplier applied to lifespans.
pub const MILLIS_PER_MINUTE: u128 = 60 * 1000;

/// Raw value of the forced-invalid sentinel.
pub const INVALIDATED: &str = "-1";

// == Timestamp ==
/// An absolute Unix timestamp (seconds) stored as a decimal numeral.
///
/// The numeral is kept verbatim: whatever was written is what is read back.
/// Comparisons are numeric and arbitrary-precision, so `"0010"` equals `"10"`
/// and `"-1"` sorts before every non-negative value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Timestamp(String);

impl Timestamp {
    // == Constructors ==
    /// Wraps a raw numeral without validating it.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The `-1` sentinel, stale regardless of the wall clock.
    pub fn invalidated() -> Self {
        Self(INVALIDATED.to_string())
    }

    /// Current Unix time in whole seconds.
    pub fn now() -> Self {
        Self::from_secs(current_timestamp_secs())
    }

    pub fn from_secs(secs: u64) -> Self {
        Self(secs.to_string())
    }

    // == Accessors ==
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is exactly the `-1` sentinel.
    pub fn is_invalidated(&self) -> bool {
        self.0 == INVALIDATED
    }

    /// Returns true if the raw value is an integer numeral.
    pub fn is_numeric(&self) -> bool {
        Numeral::parse(&self.0).is_some()
    }

    // == Comparison ==
    /// Compares two timestamps as integers.
    ///
    /// Returns `None` if either side is not an integer numeral.
    pub fn numeric_cmp(&self, other: &Timestamp) -> Option<Ordering> {
        let lhs = Numeral::parse(&self.0)?;
        let rhs = Numeral::parse(&other.0)?;
        Some(lhs.cmp(&rhs))
    }

    /// Returns true once `now` has reached this timestamp (`now >= self`).
    ///
    /// A value that is not a numeral can never be shown to lie in the future,
    /// so it counts as reached.
    pub fn is_reached_at(&self, now: &Timestamp) -> bool {
        match now.numeric_cmp(self) {
            Some(ordering) => ordering != Ordering::Less,
            None => true,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Timestamp {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for Timestamp {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<u64> for Timestamp {
    fn from(secs: u64) -> Self {
        Self::from_secs(secs)
    }
}

// == Serde ==
// Always written as a JSON string. Hand-edited files may carry plain integers,
// which are accepted and normalized to their decimal form.
impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawTimestamp::deserialize(deserializer)? {
            RawTimestamp::Text(raw) => Self(raw),
            RawTimestamp::Unsigned(value) => Self(value.to_string()),
            RawTimestamp::Signed(value) => Self(value.to_string()),
        })
    }
}

// == Numeral ==
/// A borrowed view of an integer numeral, normalized for comparison.
#[derive(Debug, PartialEq, Eq)]
struct Numeral<'a> {
    negative: bool,
    /// Magnitude digits without leading zeros; empty for zero.
    digits: &'a str,
}

impl<'a> Numeral<'a> {
    fn parse(raw: &'a str) -> Option<Self> {
        let (negative, digits) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits = digits.trim_start_matches('0');
        Some(Self {
            // "-0" is zero
            negative: negative && !digits.is_empty(),
            digits,
        })
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(other.digits))
    }
}

impl Ord for Numeral<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
        }
    }
}

impl PartialOrd for Numeral<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in whole seconds.
pub fn current_timestamp_secs() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}

/// Returns `now + lifespan_ms` as a timestamp.
///
/// `now` is in seconds and the lifespan in milliseconds; the two are added
/// as-is, without unit conversion. The sum is computed in `u128` and cannot
/// overflow for any `u64` clock reading and any minute-based lifespan.
pub fn compute_expiry(now: u64, lifespan_ms: u128) -> Timestamp {
    Timestamp(u128::from(now).saturating_add(lifespan_ms).to_string())
}
