use super::ScalarType;
use crate::stmt::Value;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use rand::{Rng, RngCore};
use std::sync::{
    atomic::{AtomicU32, Ordering},
    OnceLock,
};

/// Create-time default of a scalar field.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarDefault {
    /// A fixed value of the field's host type
    Literal(Value),

    /// Collision-resistant, time-ordered string id
    Cuid,

    /// Random v4 UUID in hyphenated form
    Uuid,

    /// `bytes` random bytes in the given encoding
    Random { bytes: usize, encoding: RandomEncoding },

    /// Next value of a storage sequence
    Autoincrement,

    /// Time of the create
    Now,

    /// Opaque expression evaluated by the database
    DbGenerated(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomEncoding {
    Hex,
    Base64Url,
}

/// Outcome of generating a default.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated {
    Value(Value),

    /// The storage layer assigns the value when the record is written
    Storage,
}

impl ScalarDefault {
    pub fn name(&self) -> &'static str {
        match self {
            ScalarDefault::Literal(_) => "literal",
            ScalarDefault::Cuid => "cuid",
            ScalarDefault::Uuid => "uuid",
            ScalarDefault::Random { .. } => "random",
            ScalarDefault::Autoincrement => "autoincrement",
            ScalarDefault::Now => "now",
            ScalarDefault::DbGenerated(_) => "dbgenerated",
        }
    }

    /// Checks that this default can produce values of `scalar`.
    pub fn verify(&self, scalar: ScalarType) -> Result<(), String> {
        match self {
            ScalarDefault::Literal(value) if !scalar.admits(value) => Err(format!(
                "literal default of type {} is not a valid {scalar}",
                value.ty_name()
            )),
            ScalarDefault::Cuid | ScalarDefault::Uuid | ScalarDefault::Random { .. }
                if scalar != ScalarType::String =>
            {
                Err(format!(
                    "`{}` defaults are only valid on String fields, not {scalar}",
                    self.name()
                ))
            }
            ScalarDefault::Random { bytes: 0, .. } => {
                Err("`random` defaults need at least one byte".to_string())
            }
            ScalarDefault::Autoincrement
                if !matches!(scalar, ScalarType::Int | ScalarType::BigInt) =>
            {
                Err(format!(
                    "`autoincrement` defaults are only valid on Int and BigInt fields, not {scalar}"
                ))
            }
            ScalarDefault::Now if scalar != ScalarType::DateTime => Err(format!(
                "`now` defaults are only valid on DateTime fields, not {scalar}"
            )),
            ScalarDefault::DbGenerated(expr) if expr.trim().is_empty() => {
                Err("`dbgenerated` defaults need an expression".to_string())
            }
            _ => Ok(()),
        }
    }

    pub fn generate(&self) -> Generated {
        match self {
            ScalarDefault::Literal(value) => Generated::Value(value.clone()),
            ScalarDefault::Cuid => Generated::Value(Value::String(cuid())),
            ScalarDefault::Uuid => Generated::Value(Value::String(uuid::Uuid::new_v4().to_string())),
            ScalarDefault::Random { bytes, encoding } => {
                let mut buf = vec![0u8; *bytes];
                rand::thread_rng().fill_bytes(&mut buf);

                let encoded = match encoding {
                    RandomEncoding::Hex => hex::encode(&buf),
                    RandomEncoding::Base64Url => URL_SAFE_NO_PAD.encode(&buf),
                };
                Generated::Value(Value::String(encoded))
            }
            ScalarDefault::Now => Generated::Value(Value::DateTime(Utc::now())),
            ScalarDefault::Autoincrement | ScalarDefault::DbGenerated(_) => Generated::Storage,
        }
    }
}

/// A cuid (v1): `c`, then base36 blocks for the millisecond timestamp (8),
/// a wrapping counter (4), the host fingerprint (4) and randomness (8).
/// 25 characters, sortable by creation time within one process.
fn cuid() -> String {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    static FINGERPRINT: OnceLock<String> = OnceLock::new();

    const BLOCK: u64 = 36u64.pow(4);

    let timestamp = Utc::now().timestamp_millis().max(0) as u64;
    let counter = u64::from(COUNTER.fetch_add(1, Ordering::Relaxed)) % BLOCK;
    let fingerprint = FINGERPRINT.get_or_init(|| {
        // pid block + per-process salt, standing in for the hostname block
        let pid = u64::from(std::process::id()) % 36u64.pow(2);
        let salt = rand::thread_rng().gen_range(0..36u64.pow(2));
        format!("{}{}", base36(pid, 2), base36(salt, 2))
    });
    let mut rng = rand::thread_rng();

    let mut id = String::with_capacity(25);
    id.push('c');
    id.push_str(&base36(timestamp, 8));
    id.push_str(&base36(counter, 4));
    id.push_str(fingerprint);
    id.push_str(&base36(rng.gen_range(0..BLOCK), 4));
    id.push_str(&base36(rng.gen_range(0..BLOCK), 4));
    id
}

fn base36(mut n: u64, width: usize) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut out = Vec::with_capacity(width);
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    while out.len() < width {
        out.push(b'0');
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}
