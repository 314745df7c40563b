//! Anti-forgery action tokens.
//!
//! A token proves the current session intentionally submitted a request for
//! a specific operation family (action class). Tokens are HMAC-SHA256 over
//! `(tick, action, user id)` where the tick is a rolling time window; a
//! token verifies during the window it was issued in and the one after, so
//! a form left open for a while still submits.
//!
//! One action class covers a whole operation family: single-row trash
//! links, multi-row bulk submits, and undo links all share
//! [`BULK_EVENTS_ACTION`].

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::types::DbId;

type HmacSha256 = Hmac<Sha256>;

/// Action class covering every bulk-event mutation (trash, restore,
/// permanent delete), whether invoked on one row or many.
pub const BULK_EVENTS_ACTION: &str = "bulk-events";

/// Length of a validity window in seconds (12 hours).
pub const TICK_SECS: i64 = 12 * 60 * 60;

/// Issue a token for `action` scoped to `user_id`, valid from `now_unix`
/// until the end of the next tick.
pub fn issue(secret: &str, action: &str, user_id: DbId, now_unix: i64) -> String {
    token_for_tick(secret, action, user_id, now_unix.div_euclid(TICK_SECS))
}

/// Verify a token against the current and previous tick.
///
/// Returns `false` for expired, tampered, wrong-action, or wrong-user
/// tokens. Comparison is constant-time.
pub fn verify(secret: &str, action: &str, user_id: DbId, token: &str, now_unix: i64) -> bool {
    let tick = now_unix.div_euclid(TICK_SECS);
    constant_time_eq(token, &token_for_tick(secret, action, user_id, tick))
        || constant_time_eq(token, &token_for_tick(secret, action, user_id, tick - 1))
}

/// Compute the token for a specific tick.
fn token_for_tick(secret: &str, action: &str, user_id: DbId, tick: i64) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(format!("{tick}|{action}|{user_id}").as_bytes());
    mac.finalize()
        .into_bytes()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Constant-time string comparison.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret";
    const NOW: i64 = 1_700_000_000;

    #[test]
    fn issued_token_verifies() {
        let token = issue(SECRET, BULK_EVENTS_ACTION, 42, NOW);
        assert!(verify(SECRET, BULK_EVENTS_ACTION, 42, &token, NOW));
    }

    #[test]
    fn token_is_hex_sha256_length() {
        let token = issue(SECRET, BULK_EVENTS_ACTION, 42, NOW);
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn token_from_previous_tick_still_verifies() {
        let token = issue(SECRET, BULK_EVENTS_ACTION, 42, NOW);
        assert!(verify(
            SECRET,
            BULK_EVENTS_ACTION,
            42,
            &token,
            NOW + TICK_SECS
        ));
    }

    #[test]
    fn token_two_ticks_old_is_rejected() {
        let token = issue(SECRET, BULK_EVENTS_ACTION, 42, NOW);
        assert!(!verify(
            SECRET,
            BULK_EVENTS_ACTION,
            42,
            &token,
            NOW + 2 * TICK_SECS
        ));
    }

    #[test]
    fn wrong_action_is_rejected() {
        let token = issue(SECRET, BULK_EVENTS_ACTION, 42, NOW);
        assert!(!verify(SECRET, "delete-users", 42, &token, NOW));
    }

    #[test]
    fn wrong_user_is_rejected() {
        let token = issue(SECRET, BULK_EVENTS_ACTION, 42, NOW);
        assert!(!verify(SECRET, BULK_EVENTS_ACTION, 43, &token, NOW));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue(SECRET, BULK_EVENTS_ACTION, 42, NOW);
        assert!(!verify("other_secret", BULK_EVENTS_ACTION, 42, &token, NOW));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let mut token = issue(SECRET, BULK_EVENTS_ACTION, 42, NOW);
        let last = if token.ends_with('0') { '1' } else { '0' };
        token.pop();
        token.push(last);
        assert!(!verify(SECRET, BULK_EVENTS_ACTION, 42, &token, NOW));
    }

    #[test]
    fn empty_token_is_rejected() {
        assert!(!verify(SECRET, BULK_EVENTS_ACTION, 42, "", NOW));
    }
}
