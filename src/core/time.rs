//! Timestamp helpers for checkpoint naming and document headers.

use chrono::{DateTime, Local};

pub fn now_local() -> DateTime<Local> {
    Local::now()
}

/// Compact local timestamp used in checkpoint filenames (`YYYYMMDD_HHMMSS`).
/// Lexicographic order on these strings equals chronological order.
pub fn checkpoint_stamp(ts: &DateTime<Local>) -> String {
    ts.format("%Y%m%d_%H%M%S").to_string()
}

/// Human-readable local timestamp for the `Generated` header line.
pub fn human_stamp(ts: &DateTime<Local>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_stamp_shape() {
        let s = checkpoint_stamp(&now_local());
        assert_eq!(s.len(), 15);
        assert_eq!(s.as_bytes()[8], b'_');
        assert!(s[..8].chars().all(|c| c.is_ascii_digit()));
        assert!(s[9..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_human_stamp_shape() {
        let s = human_stamp(&now_local());
        assert_eq!(s.len(), 19);
        assert_eq!(&s[4..5], "-");
        assert_eq!(&s[10..11], " ");
        assert_eq!(&s[13..14], ":");
    }

    #[test]
    fn test_stamps_agree_on_instant() {
        let now = now_local();
        let compact = checkpoint_stamp(&now);
        let human = human_stamp(&now);
        assert_eq!(&compact[..4], &human[..4]);
        assert_eq!(&compact[4..6], &human[5..7]);
        assert_eq!(&compact[9..11], &human[11..13]);
    }
}
