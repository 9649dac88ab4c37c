//! Bounded retry with pluggable backoff.
//!
//! The only caller today is the session bridge's token exchange, but nothing
//! here knows about tokens: [`retry`] runs any fallible async operation up to
//! [`RetryPolicy::attempts`] times and waits between attempts through a
//! [`Sleep`] implementation, so tests can observe the delays without waiting.

use std::future::Future;
use std::time::Duration;

use store::config::SessionConfig;

/// Something that can wait.
pub trait Sleep {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// Real timer: `gloo-timers` in the browser, `tokio::time` elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerSleep;

impl Sleep for TimerSleep {
    #[cfg(target_arch = "wasm32")]
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        gloo_timers::future::sleep(duration)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(duration)
    }
}

/// How long to wait before attempt `n + 1`, given that attempt `n` failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    Fixed(Duration),
    /// `n * step`
    Linear(Duration),
    /// `base * 2^(n-1)`, capped at `max`.
    Exponential { base: Duration, max: Duration },
}

impl Backoff {
    /// `attempt` is 1-based: the delay after the first failure is `delay(1)`.
    pub fn delay(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1);
        match *self {
            Backoff::Fixed(d) => d,
            Backoff::Linear(step) => step.saturating_mul(attempt),
            Backoff::Exponential { base, max } => {
                let factor = 1u32.checked_shl(attempt - 1).unwrap_or(u32::MAX);
                base.saturating_mul(factor).min(max)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero behaves like one.
    pub attempts: u32,
    pub backoff: Backoff,
}

impl RetryPolicy {
    pub fn new(attempts: u32, backoff: Backoff) -> Self {
        Self { attempts, backoff }
    }

    /// Token exchange policy from `[session]` in `lessons.toml`.
    pub fn from_config(session: &SessionConfig) -> Self {
        Self {
            attempts: session.token_attempts,
            backoff: Backoff::Linear(Duration::from_millis(session.token_backoff_ms)),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

/// Run `op` until it succeeds or the policy's attempts are used up.
///
/// `op` receives the 1-based attempt number. The last error is returned.
pub async fn retry<T, E, S, F, Fut>(policy: &RetryPolicy, sleeper: &S, mut op: F) -> Result<T, E>
where
    S: Sleep,
    E: std::fmt::Display,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= attempts => return Err(e),
            Err(e) => {
                let delay = policy.backoff.delay(attempt);
                tracing::warn!(attempt, ?delay, "Attempt failed, retrying: {e}");
                sleeper.sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSleep;
    use std::cell::Cell;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_backoff_delays() {
        assert_eq!(Backoff::Fixed(ms(200)).delay(3), ms(200));
        assert_eq!(Backoff::Linear(ms(500)).delay(1), ms(500));
        assert_eq!(Backoff::Linear(ms(500)).delay(2), ms(1000));

        let exp = Backoff::Exponential { base: ms(100), max: ms(1000) };
        assert_eq!(exp.delay(1), ms(100));
        assert_eq!(exp.delay(3), ms(400));
        assert_eq!(exp.delay(10), ms(1000));
        assert_eq!(exp.delay(64), ms(1000));
    }

    #[tokio::test]
    async fn test_succeeds_after_failures() {
        let sleeper = RecordingSleep::default();
        let policy = RetryPolicy::new(3, Backoff::Linear(ms(500)));
        let calls = Cell::new(0);

        let result: Result<&str, String> = retry(&policy, &sleeper, |attempt| {
            calls.set(calls.get() + 1);
            async move {
                if attempt < 3 {
                    Err(format!("fail {attempt}"))
                } else {
                    Ok("token")
                }
            }
        })
        .await;

        assert_eq!(result, Ok("token"));
        assert_eq!(calls.get(), 3);
        assert_eq!(sleeper.delays(), vec![ms(500), ms(1000)]);
    }

    #[tokio::test]
    async fn test_returns_last_error_when_exhausted() {
        let sleeper = RecordingSleep::default();
        let policy = RetryPolicy::new(2, Backoff::Fixed(ms(10)));

        let result: Result<(), String> =
            retry(&policy, &sleeper, |attempt| async move { Err(format!("fail {attempt}")) }).await;

        assert_eq!(result, Err("fail 2".to_string()));
        assert_eq!(sleeper.delays(), vec![ms(10)]);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_tries_once() {
        let sleeper = RecordingSleep::default();
        let policy = RetryPolicy::new(0, Backoff::Fixed(ms(10)));
        let calls = Cell::new(0);

        let _: Result<(), String> = retry(&policy, &sleeper, |_| {
            calls.set(calls.get() + 1);
            async { Err("nope".to_string()) }
        })
        .await;

        assert_eq!(calls.get(), 1);
        assert!(sleeper.delays().is_empty());
    }

    #[test]
    fn test_policy_from_config() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.attempts, 3);
        assert_eq!(policy.backoff, Backoff::Linear(ms(500)));
    }
}
