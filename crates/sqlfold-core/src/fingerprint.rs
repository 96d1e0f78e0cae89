//! 64-bit name fingerprints.
//!
//! Function names are compared by fingerprint instead of by string on the hot
//! paths (type inference, aggregate detection). The fingerprint is FNV-1a over
//! the ASCII-lowercased bytes of the name, so `count`, `COUNT` and `Count` share
//! one value.

const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const PRIME: u64 = 0x0100_0000_01b3;

/// Computes the case-insensitive fingerprint of a name.
#[must_use]
pub const fn hash64(name: &str) -> u64 {
    let bytes = name.as_bytes();
    let mut hash = OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i].to_ascii_lowercase();
        hash ^= byte as u64;
        hash = hash.wrapping_mul(PRIME);
        i += 1;
    }
    hash
}

/// Fingerprints of the function names the library reasons about.
pub mod constants {
    use super::hash64;

    pub const COUNT: u64 = hash64("COUNT");
    pub const SUM: u64 = hash64("SUM");
    pub const AVG: u64 = hash64("AVG");
    pub const MIN: u64 = hash64("MIN");
    pub const MAX: u64 = hash64("MAX");
    pub const STDDEV: u64 = hash64("STDDEV");
    pub const VARIANCE: u64 = hash64("VARIANCE");
    pub const ROW_NUMBER: u64 = hash64("ROW_NUMBER");
    pub const RANK: u64 = hash64("RANK");
    pub const DENSE_RANK: u64 = hash64("DENSE_RANK");
    pub const FIRST_VALUE: u64 = hash64("FIRST_VALUE");
    pub const LAST_VALUE: u64 = hash64("LAST_VALUE");
    pub const LISTAGG: u64 = hash64("LISTAGG");
    pub const WM_CONCAT: u64 = hash64("WM_CONCAT");
    pub const GROUP_CONCAT: u64 = hash64("GROUP_CONCAT");
}

/// Returns true if the fingerprint names an aggregate or window function.
#[must_use]
pub const fn is_aggregate(hash: u64) -> bool {
    use constants::{
        AVG, COUNT, DENSE_RANK, FIRST_VALUE, GROUP_CONCAT, LAST_VALUE, LISTAGG, MAX, MIN, RANK,
        ROW_NUMBER, STDDEV, SUM, VARIANCE, WM_CONCAT,
    };
    matches!(
        hash,
        COUNT
            | SUM
            | AVG
            | MIN
            | MAX
            | STDDEV
            | VARIANCE
            | ROW_NUMBER
            | RANK
            | DENSE_RANK
            | FIRST_VALUE
            | LAST_VALUE
            | LISTAGG
            | WM_CONCAT
            | GROUP_CONCAT
    )
}
