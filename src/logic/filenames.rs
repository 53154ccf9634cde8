//! Client-side filenames for saved downloads
//!
//! Names only need to be distinguishable within one session: a timestamp
//! for single results, the 1-based position for batch items.

/// Archive name used for "download all"
pub const BATCH_ARCHIVE_FILENAME: &str = "batch-qr-codes.zip";

/// Filename for a single-URL result generated at `timestamp_ms`
///
/// # Examples
/// ```
/// use qrtui::logic::filenames::single_filename;
///
/// assert_eq!(single_filename(1700000000000), "qr-code-1700000000000.png");
/// ```
pub fn single_filename(timestamp_ms: i64) -> String {
    format!("qr-code-{}.png", timestamp_ms)
}

/// Filename for the batch item at 1-based position `idx`
pub fn batch_item_filename(idx: usize) -> String {
    format!("qr-code-{}.png", idx)
}

/// Current wall clock in unix milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_item_filename_uses_index() {
        assert_eq!(batch_item_filename(1), "qr-code-1.png");
        assert_eq!(batch_item_filename(12), "qr-code-12.png");
    }

    #[test]
    fn test_single_filenames_differ_by_timestamp() {
        assert_ne!(single_filename(1), single_filename(2));
    }

    #[test]
    fn test_now_millis_is_recent() {
        // 2020-01-01 in millis
        assert!(now_millis() > 1_577_836_800_000);
    }
}
