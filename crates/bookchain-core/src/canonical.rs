//! Canonical CBOR encoding for checkout payloads.
//!
//! Payload bytes feed the content hash, so they must be identical on every
//! platform and for every serde version. This module implements the subset of
//! RFC 8949 Core Deterministic Encoding that payloads need:
//! - Map keys sorted by their encoded bytes
//! - Integers in their shortest form
//! - Definite lengths only
//! - Only text, unsigned integers, booleans and maps; everything else is
//!   refused
//!
//! The encoder never relies on a library's default map ordering; it writes
//! every byte itself. Decoding goes through `ciborium` and then re-encodes to
//! reject anything that is not already canonical.

use ciborium::value::Value;

use crate::block::CheckoutRecord;
use crate::error::CoreError;

/// Payload field keys. Keys 0-23 encode as a single byte.
mod keys {
    pub const BOOK_ID: u64 = 0;
    pub const USER: u64 = 1;
    pub const CHECKOUT_DATE: u64 = 2;
    pub const IS_GENESIS: u64 = 3;
}

const MAJOR_UINT: u8 = 0;
const MAJOR_TEXT: u8 = 3;
const MAJOR_MAP: u8 = 5;

const SIMPLE_FALSE: u8 = 0xf4;
const SIMPLE_TRUE: u8 = 0xf5;

/// Encode a checkout record to its canonical bytes.
pub fn canonical_record_bytes(record: &CheckoutRecord) -> Result<Vec<u8>, CoreError> {
    encode_canonical(&record_to_cbor_value(record))
}

/// Decode a checkout record, accepting only canonical bytes.
pub fn decode_record(bytes: &[u8]) -> Result<CheckoutRecord, CoreError> {
    let value: Value =
        ciborium::from_reader(bytes).map_err(|e| CoreError::Decoding(e.to_string()))?;
    let record = cbor_value_to_record(&value)?;

    if canonical_record_bytes(&record)? != bytes {
        return Err(CoreError::Decoding("non-canonical encoding".into()));
    }
    Ok(record)
}

/// Encode an arbitrary CBOR value canonically.
pub fn encode_canonical(value: &Value) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::new();
    write_value(&mut buf, value)?;
    Ok(buf)
}

fn record_to_cbor_value(record: &CheckoutRecord) -> Value {
    Value::Map(vec![
        (
            Value::Integer(keys::BOOK_ID.into()),
            Value::Text(record.book_id.clone()),
        ),
        (
            Value::Integer(keys::USER.into()),
            Value::Text(record.user.clone()),
        ),
        (
            Value::Integer(keys::CHECKOUT_DATE.into()),
            Value::Text(record.checkout_date.clone()),
        ),
        (
            Value::Integer(keys::IS_GENESIS.into()),
            Value::Bool(record.is_genesis),
        ),
    ])
}

fn cbor_value_to_record(value: &Value) -> Result<CheckoutRecord, CoreError> {
    let Value::Map(entries) = value else {
        return Err(CoreError::MalformedRecord("expected map".into()));
    };

    if entries.len() != 4 {
        return Err(CoreError::MalformedRecord(format!(
            "expected 4 fields, got {}",
            entries.len()
        )));
    }

    let get = |key: u64| -> Option<&Value> {
        entries
            .iter()
            .find(|(k, _)| matches!(k, Value::Integer(i) if i128::from(*i) == key as i128))
            .map(|(_, v)| v)
    };

    let text = |key: u64, name: &str| -> Result<String, CoreError> {
        match get(key) {
            Some(Value::Text(s)) => Ok(s.clone()),
            _ => Err(CoreError::MalformedRecord(format!("missing {}", name))),
        }
    };

    let is_genesis = match get(keys::IS_GENESIS) {
        Some(Value::Bool(b)) => *b,
        _ => return Err(CoreError::MalformedRecord("missing is_genesis".into())),
    };

    Ok(CheckoutRecord {
        book_id: text(keys::BOOK_ID, "book_id")?,
        user: text(keys::USER, "user")?,
        checkout_date: text(keys::CHECKOUT_DATE, "checkout_date")?,
        is_genesis,
    })
}

fn write_value(buf: &mut Vec<u8>, value: &Value) -> Result<(), CoreError> {
    match value {
        Value::Integer(i) => {
            let n = i128::from(*i);
            let n = u64::try_from(n).map_err(|_| {
                CoreError::Encoding(format!("integer out of range for a payload: {}", n))
            })?;
            write_head(buf, MAJOR_UINT, n);
        }
        Value::Text(s) => {
            write_head(buf, MAJOR_TEXT, s.len() as u64);
            buf.extend_from_slice(s.as_bytes());
        }
        Value::Map(entries) => write_map(buf, entries)?,
        Value::Bool(b) => buf.push(if *b { SIMPLE_TRUE } else { SIMPLE_FALSE }),
        Value::Float(_) => {
            return Err(CoreError::Encoding(
                "floats are not allowed in canonical payloads".into(),
            ))
        }
        _ => {
            return Err(CoreError::Encoding(
                "unsupported CBOR value in canonical payload".into(),
            ))
        }
    }
    Ok(())
}

/// Write a major type and argument in the shortest form.
fn write_head(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    match n {
        0..=23 => buf.push(mt | n as u8),
        24..=0xff => {
            buf.push(mt | 24);
            buf.push(n as u8);
        }
        0x100..=0xffff => {
            buf.push(mt | 25);
            buf.extend_from_slice(&(n as u16).to_be_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            buf.push(mt | 26);
            buf.extend_from_slice(&(n as u32).to_be_bytes());
        }
        _ => {
            buf.push(mt | 27);
            buf.extend_from_slice(&n.to_be_bytes());
        }
    }
}

/// Write a map with entries ordered by encoded key bytes.
fn write_map(buf: &mut Vec<u8>, entries: &[(Value, Value)]) -> Result<(), CoreError> {
    let mut encoded: Vec<(Vec<u8>, &Value)> = Vec::with_capacity(entries.len());
    for (k, v) in entries {
        encoded.push((encode_canonical(k)?, v));
    }
    encoded.sort_by(|a, b| a.0.cmp(&b.0));

    if encoded.windows(2).any(|w| w[0].0 == w[1].0) {
        return Err(CoreError::Encoding("duplicate map key".into()));
    }

    write_head(buf, MAJOR_MAP, encoded.len() as u64);
    for (key, value) in encoded {
        buf.extend_from_slice(&key);
        write_value(buf, value)?;
    }
    Ok(())
}
