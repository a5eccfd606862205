//! Multipart upload sizing
//!
//! Files above the threshold are sent in parts, one part at a time.

/// Default part size: 64 MiB
pub const DEFAULT_PART_SIZE: u64 = 64 * 1024 * 1024;

/// Minimum part size: 5 MiB (S3 requirement)
pub const MIN_PART_SIZE: u64 = 5 * 1024 * 1024;

/// Maximum part size: 5 GiB
pub const MAX_PART_SIZE: u64 = 5 * 1024 * 1024 * 1024;

/// Maximum number of parts: 10,000 (S3 limit)
pub const MAX_PARTS: u64 = 10_000;

/// Files larger than this are uploaded in parts
pub const MULTIPART_THRESHOLD: u64 = DEFAULT_PART_SIZE;

/// Whether a file of this size goes through the multipart path
pub fn needs_multipart(file_size: u64) -> bool {
    file_size > MULTIPART_THRESHOLD
}

/// Part size for a file, grown so the upload fits in `MAX_PARTS`
pub fn part_size_for(file_size: u64) -> u64 {
    if file_size.div_ceil(DEFAULT_PART_SIZE) <= MAX_PARTS {
        DEFAULT_PART_SIZE
    } else {
        file_size
            .div_ceil(MAX_PARTS)
            .clamp(MIN_PART_SIZE, MAX_PART_SIZE)
    }
}

/// `(offset, length)` of every part, in order
pub fn part_ranges(file_size: u64) -> Vec<(u64, u64)> {
    let part_size = part_size_for(file_size);
    let mut ranges = Vec::new();
    let mut offset = 0;
    while offset < file_size {
        let length = part_size.min(file_size - offset);
        ranges.push((offset, length));
        offset += length;
    }
    ranges
}
