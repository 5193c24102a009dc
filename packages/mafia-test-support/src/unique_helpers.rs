//! Unique test data so parallel tests never share a session.

use ulid::Ulid;

/// A unique string in the format `{prefix}-{ulid}`.
///
/// ```
/// use mafia_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("player");
/// assert_ne!(a, unique_str("player"));
/// assert!(a.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A unique negative chat id, shaped like a group chat id.
pub fn unique_chat_id() -> i64 {
    let bits = (Ulid::new().random() & 0x0000_ffff_ffff_ffff) as i64;
    -(bits + 1)
}

/// `count` players with ids starting at 1 and unique handles.
pub fn roster(count: usize) -> Vec<(i64, String)> {
    (1..=count as i64)
        .map(|id| (id, unique_str(&format!("p{id}")).to_lowercase()))
        .collect()
}
