use crate::models::User;

/// Consecutive failed logins before the account flag flips. A successful
/// login resets the counter; the periodic unlock job clears the flag.
pub const MAX_LOGIN_ATTEMPTS: i32 = 5;

pub fn increase_login_limit(count: i32) -> i32 {
    count + 1
}

/// Whether a failure count is past the lock threshold.
pub fn locks_account(count: i32) -> bool {
    count >= MAX_LOGIN_ATTEMPTS
}

pub fn check_locked_status(user: &User) -> bool {
    user.is_locked
}
