//! Byte count conversions.

/// Bytes in one megabyte as reported (binary megabyte).
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Whole megabytes in `bytes`, truncated.
pub const fn bytes_to_mb(bytes: u64) -> u64 {
    bytes / BYTES_PER_MB
}
