//! Content hashing and class-name helpers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix of generated class names.
pub const CLASS_NAME_PREFIX: &str = "hs";

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// DJB2-xor hash of `input`, base-36 encoded.
///
/// Runs over UTF-16 code units with 32-bit wrapping arithmetic, so the same
/// text always hashes to the same id.
pub fn hash_string(input: &str) -> String {
    let mut hash: i32 = 5381;
    for unit in input.encode_utf16() {
        hash = hash.wrapping_mul(33) ^ i32::from(unit);
    }
    to_base36(u64::from(hash as u32))
}

/// Class name for a block of CSS: `hs-<hash>`.
pub fn resolve_class_name(css: &str) -> String {
    format!("{CLASS_NAME_PREFIX}-{}", hash_string(css))
}

/// Process-unique id such as `hsc-1a`.
pub fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{}", to_base36(id))
}

/// Join the non-empty class names with spaces.
pub fn combine_class_names<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names
        .into_iter()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }

    let mut buf = Vec::with_capacity(13);
    while value > 0 {
        buf.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    buf.reverse();
    buf.into_iter().map(char::from).collect()
}
