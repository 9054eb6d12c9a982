// src/error_recovery.rs
//! Retry with exponential backoff for blocking operations.

use std::time::Duration;

/// Retries an operation with exponential backoff.
///
/// The operation runs at most `max_attempts` times. After each retryable
/// failure except the last, the thread sleeps for the current delay, which
/// then doubles up to `max_delay`. An error that `should_retry` rejects is
/// returned at once; otherwise the last error is returned once every
/// attempt has failed.
pub fn retry_with_backoff<F, R, T, E>(
    mut operation: F,
    should_retry: R,
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
) -> Result<T, E>
where
    F: FnMut(u32) -> Result<T, E>,
    R: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let attempts = max_attempts.max(1);
    let mut delay = initial_delay;
    let mut attempt = 1;

    loop {
        match operation(attempt) {
            Ok(result) => return Ok(result),
            Err(e) if !should_retry(&e) => {
                log::warn!("Attempt {}/{} failed: {}. Not retryable", attempt, attempts, e);
                return Err(e);
            }
            Err(e) if attempt < attempts => {
                log::warn!(
                    "Attempt {}/{} failed: {}. Retrying after {:?}",
                    attempt,
                    attempts,
                    e,
                    delay
                );
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
                delay = std::cmp::min(delay * 2, max_delay);
                attempt += 1;
            }
            Err(e) => {
                log::warn!("Attempt {}/{} failed: {}. Giving up", attempt, attempts, e);
                return Err(e);
            }
        }
    }
}
