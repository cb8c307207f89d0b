//! Canonical encoding of the persisted params record.
//!
//! The record is a CBOR map with small integer keys, following RFC 8949
//! core deterministic encoding:
//! - map keys sorted by encoded byte comparison (keys 0-6 encode as single
//!   bytes, so ascending key order)
//! - integers use the smallest valid encoding
//! - definite lengths only
//! - no floats
//!
//! Every participant derives identical record bytes, and thus an identical
//! [`ParamsDigest`](crate::types::ParamsDigest), from identical params.

use ciborium::value::Value;
use std::collections::BTreeSet;

use crate::error::RecordError;
use crate::params::ScheduleParams;

/// Current params record version.
pub const PARAMS_RECORD_VERSION: u64 = 1;

mod keys {
    pub const VERSION: u64 = 0;
    pub const ISSUING_AUTHORITIES: u64 = 1;
    pub const RECEIVING_ADDRESS: u64 = 2;
    pub const DENOM: u64 = 3;
    pub const MAX_SUPPLY: u64 = 4;
    pub const SCHEDULE_START_DATE: u64 = 5;
    pub const HALVING_PERIOD_MONTHS: u64 = 6;

    pub const COUNT: u64 = 7;
}

/// Encode params to canonical record bytes.
pub fn encode_params_record(params: &ScheduleParams) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_uint(&mut buf, 5, keys::COUNT);

    encode_uint(&mut buf, 0, keys::VERSION);
    encode_uint(&mut buf, 0, PARAMS_RECORD_VERSION);

    encode_uint(&mut buf, 0, keys::ISSUING_AUTHORITIES);
    encode_uint(&mut buf, 4, params.issuing_authorities.len() as u64);
    // BTreeSet iterates in sorted order.
    for authority in &params.issuing_authorities {
        encode_text(&mut buf, authority);
    }

    encode_uint(&mut buf, 0, keys::RECEIVING_ADDRESS);
    encode_text(&mut buf, &params.receiving_address);

    encode_uint(&mut buf, 0, keys::DENOM);
    encode_text(&mut buf, &params.denom);

    encode_uint(&mut buf, 0, keys::MAX_SUPPLY);
    encode_uint(&mut buf, 0, params.max_supply);

    encode_uint(&mut buf, 0, keys::SCHEDULE_START_DATE);
    encode_text(&mut buf, &params.schedule_start_date);

    encode_uint(&mut buf, 0, keys::HALVING_PERIOD_MONTHS);
    encode_uint(&mut buf, 0, params.halving_period_months);

    buf
}

/// Decode canonical record bytes.
///
/// Rejects unknown versions, missing or ill-typed fields, and any encoding
/// that is not byte-identical to the canonical re-encoding (extra keys,
/// unsorted or duplicate authorities, oversized integers, trailing bytes).
/// Field values are not validated here; see
/// [`ScheduleParams::validate`](crate::params::ScheduleParams::validate).
pub fn decode_params_record(bytes: &[u8]) -> Result<ScheduleParams, RecordError> {
    let value: Value =
        ciborium::from_reader(bytes).map_err(|e| RecordError::Decoding(e.to_string()))?;

    let map = match &value {
        Value::Map(m) => m,
        _ => return Err(RecordError::Malformed("expected map".into())),
    };

    let get = |key: u64| -> Option<&Value> {
        map.iter()
            .find(|(k, _)| as_u64(k) == Some(key))
            .map(|(_, v)| v)
    };

    let version = get(keys::VERSION)
        .and_then(as_u64)
        .ok_or_else(|| RecordError::Malformed("missing version".into()))?;
    if version != PARAMS_RECORD_VERSION {
        return Err(RecordError::UnsupportedVersion(version));
    }

    let issuing_authorities = match get(keys::ISSUING_AUTHORITIES) {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Text(s) => Ok(s.clone()),
                _ => Err(RecordError::Malformed("invalid issuing authority".into())),
            })
            .collect::<Result<BTreeSet<_>, _>>()?,
        _ => {
            return Err(RecordError::Malformed(
                "missing issuing authorities".into(),
            ))
        }
    };

    let text = |key: u64, name: &str| -> Result<String, RecordError> {
        match get(key) {
            Some(Value::Text(s)) => Ok(s.clone()),
            _ => Err(RecordError::Malformed(format!("missing {name}"))),
        }
    };
    let uint = |key: u64, name: &str| -> Result<u64, RecordError> {
        get(key)
            .and_then(as_u64)
            .ok_or_else(|| RecordError::Malformed(format!("missing {name}")))
    };

    let params = ScheduleParams {
        issuing_authorities,
        receiving_address: text(keys::RECEIVING_ADDRESS, "receiving address")?,
        denom: text(keys::DENOM, "denom")?,
        max_supply: uint(keys::MAX_SUPPLY, "max supply")?,
        schedule_start_date: text(keys::SCHEDULE_START_DATE, "schedule start date")?,
        halving_period_months: uint(keys::HALVING_PERIOD_MONTHS, "halving period months")?,
    };

    if encode_params_record(&params) != bytes {
        return Err(RecordError::NonCanonical);
    }

    Ok(params)
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Integer(i) => u64::try_from(*i).ok(),
        _ => None,
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a text string (major type 3).
fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}
