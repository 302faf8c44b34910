//! Index selection for the daily and random quote

use chrono::NaiveDate;
use sha2::{Digest, Sha256};

/// Format a date the way it is hashed for the daily pick
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Map a date onto `0..len` using a stable hash of its `YYYY-MM-DD` form.
///
/// Returns `None` when `len` is zero.
pub fn daily_index(date: NaiveDate, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let digest = Sha256::digest(date_key(date).as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let hash = u64::from_be_bytes(prefix);

    Some((hash % len as u64) as usize)
}

/// Pick a random index in `0..len`. Returns `None` when `len` is zero.
pub fn random_index(len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }

    // Low 64 bits of a v4 UUID; only the two variant bits are fixed
    let bits = uuid::Uuid::new_v4().as_u128() as u64 & (u64::MAX >> 2);
    Some((bits % len as u64) as usize)
}
