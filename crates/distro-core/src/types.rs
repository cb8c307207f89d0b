//! Strong type definitions for the distro core.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calendar::CalendarDate;
use crate::error::DateError;
use crate::params::ScheduleParams;
use crate::record::encode_params_record;

/// A 32-byte fingerprint of a params record: Blake3(canonical record bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamsDigest(pub [u8; 32]);

impl ParamsDigest {
    /// Digest of the canonical record of `params`.
    pub fn of(params: &ScheduleParams) -> Self {
        Self(*blake3::hash(&encode_params_record(params)).as_bytes())
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut arr = [0u8; 32];
        hex::decode_to_slice(s, &mut arr)?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for ParamsDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParamsDigest({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for ParamsDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Agreed block time of the replicated state machine, Unix seconds (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockTime(i64);

impl BlockTime {
    pub const fn from_unix_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    pub const fn unix_seconds(&self) -> i64 {
        self.0
    }

    /// The UTC calendar date of this block.
    pub fn date(&self) -> Result<CalendarDate, DateError> {
        CalendarDate::from_unix_seconds(self.0)
    }
}
