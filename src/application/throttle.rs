//! In-process fixed-window counters keyed by client address.
//!
//! Both throttles are plain state objects driven by an injected [`Clock`], so
//! they can be shared through `Arc` and exercised in tests without sleeping.
use crate::application::ports::time::Clock;
use chrono::{DateTime, Duration, Utc};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

pub const THROTTLE_WINDOW: Duration = Duration::minutes(15);
pub const CONTACT_MAX_REQUESTS: u32 = 5;
pub const LOGIN_MAX_ATTEMPTS: u32 = 10;
const LOGIN_BACKOFF_BASE_MS: i64 = 1_000;
const LOGIN_BACKOFF_CAP_MS: i64 = 5_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    resets_at: DateTime<Utc>,
    last_failure: Option<DateTime<Utc>>,
}

impl Window {
    fn open(now: DateTime<Utc>) -> Self {
        Self {
            count: 1,
            resets_at: now + THROTTLE_WINDOW,
            last_failure: None,
        }
    }
}

/// Per-client windows plus the time of the next sweep of expired ones.
#[derive(Debug, Default)]
struct WindowTable {
    windows: HashMap<String, Window>,
    next_sweep: Option<DateTime<Utc>>,
}

impl WindowTable {
    /// Drops expired windows, at most once per [`THROTTLE_WINDOW`].
    fn sweep(&mut self, now: DateTime<Utc>) {
        if self.next_sweep.is_some_and(|at| now < at) {
            return;
        }
        let before = self.windows.len();
        self.windows.retain(|_, window| now <= window.resets_at);
        self.next_sweep = Some(now + THROTTLE_WINDOW);
        tracing::debug!(
            dropped = before - self.windows.len(),
            tracked = self.windows.len(),
            "swept expired throttle windows"
        );
    }

    /// Returns the client's current window, or opens a fresh one (counting
    /// this request) and returns `None` when there is none or it has expired.
    fn live_window(&mut self, client: &str, now: DateTime<Utc>) -> Option<&mut Window> {
        self.sweep(now);
        let expired = self.windows.get(client).is_none_or(|w| now > w.resets_at);
        if expired {
            self.windows.insert(client.to_owned(), Window::open(now));
            return None;
        }
        self.windows.get_mut(client)
    }
}

fn lock(table: &Mutex<WindowTable>) -> MutexGuard<'_, WindowTable> {
    // A panic while holding the lock cannot leave a window half-written.
    table
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Contact form limiter: [`CONTACT_MAX_REQUESTS`] per [`THROTTLE_WINDOW`].
pub struct ContactThrottle {
    clock: Arc<dyn Clock>,
    windows: Mutex<WindowTable>,
}

impl ContactThrottle {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            windows: Mutex::new(WindowTable::default()),
        }
    }

    /// Counts the request and reports whether it may proceed.
    pub fn check(&self, client: &str) -> bool {
        let now = self.clock.now();
        let mut windows = lock(&self.windows);
        let Some(window) = windows.live_window(client, now) else {
            return true;
        };
        if window.count >= CONTACT_MAX_REQUESTS {
            return false;
        }
        window.count += 1;
        true
    }

}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginDecision {
    Allowed,
    /// `retry_after` runs to the end of the backoff pause, or to the end of
    /// the window once its attempt budget is spent.
    Denied { retry_after: Duration },
}

/// Login limiter: [`LOGIN_MAX_ATTEMPTS`] per [`THROTTLE_WINDOW`] plus an
/// exponential pause after each recorded failure (1s, 2s, 4s, capped at 5s).
pub struct LoginThrottle {
    clock: Arc<dyn Clock>,
    windows: Mutex<WindowTable>,
}

impl LoginThrottle {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            windows: Mutex::new(WindowTable::default()),
        }
    }

    pub fn check(&self, client: &str) -> LoginDecision {
        let now = self.clock.now();
        let mut windows = lock(&self.windows);
        let Some(window) = windows.live_window(client, now) else {
            return LoginDecision::Allowed;
        };

        if window.count >= LOGIN_MAX_ATTEMPTS {
            return LoginDecision::Denied {
                retry_after: window.resets_at - now,
            };
        }

        if let Some(last_failure) = window.last_failure {
            let backoff = backoff_for(window.count);
            let elapsed = now - last_failure;
            if elapsed < backoff {
                return LoginDecision::Denied {
                    retry_after: backoff - elapsed,
                };
            }
        }

        window.count += 1;
        LoginDecision::Allowed
    }

    pub fn record_failure(&self, client: &str) {
        let now = self.clock.now();
        if let Some(window) = lock(&self.windows).windows.get_mut(client) {
            window.last_failure = Some(now);
        }
    }

    pub fn reset(&self, client: &str) {
        lock(&self.windows).windows.remove(client);
    }

}

fn backoff_for(count: u32) -> Duration {
    let exponent = count.saturating_sub(1).min(16);
    let millis = LOGIN_BACKOFF_BASE_MS
        .saturating_mul(1_i64 << exponent)
        .min(LOGIN_BACKOFF_CAP_MS);
    Duration::milliseconds(millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn starting() -> Arc<Self> {
            Arc::new(Self(Mutex::new(
                Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
            )))
        }

        fn advance(&self, by: Duration) {
            *self.0.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    #[test]
    fn contact_allows_five_per_window_per_client() {
        let clock = ManualClock::starting();
        let throttle = ContactThrottle::new(clock.clone());

        for _ in 0..CONTACT_MAX_REQUESTS {
            assert!(throttle.check("1.2.3.4"));
        }
        assert!(!throttle.check("1.2.3.4"));
        assert!(throttle.check("5.6.7.8"));

        clock.advance(THROTTLE_WINDOW + Duration::seconds(1));
        assert!(throttle.check("1.2.3.4"));
    }

    #[test]
    fn expired_contact_windows_are_dropped() {
        let clock = ManualClock::starting();
        let throttle = ContactThrottle::new(clock.clone());

        for n in 0..500 {
            assert!(throttle.check(&format!("10.0.{}.{}", n / 256, n % 256)));
        }
        assert_eq!(lock(&throttle.windows).windows.len(), 500);

        clock.advance(Duration::days(30));
        assert!(throttle.check("192.0.2.1"));
        assert_eq!(lock(&throttle.windows).windows.len(), 1);
    }

    #[test]
    fn live_windows_survive_a_sweep() {
        let clock = ManualClock::starting();
        let throttle = LoginThrottle::new(clock.clone());

        assert_eq!(throttle.check("old"), LoginDecision::Allowed);
        clock.advance(Duration::minutes(10));
        assert_eq!(throttle.check("recent"), LoginDecision::Allowed);
        throttle.record_failure("recent");

        clock.advance(Duration::minutes(6));
        assert_eq!(throttle.check("newcomer"), LoginDecision::Allowed);
        assert_eq!(lock(&throttle.windows).windows.len(), 2);
        assert_eq!(throttle.check("recent"), LoginDecision::Allowed);
    }

    #[test]
    fn backoff_doubles_up_to_cap() {
        assert_eq!(backoff_for(1), Duration::seconds(1));
        assert_eq!(backoff_for(2), Duration::seconds(2));
        assert_eq!(backoff_for(3), Duration::seconds(4));
        assert_eq!(backoff_for(4), Duration::seconds(5));
        assert_eq!(backoff_for(40), Duration::seconds(5));
    }

    #[test]
    fn login_failure_imposes_a_pause() {
        let clock = ManualClock::starting();
        let throttle = LoginThrottle::new(clock.clone());

        assert_eq!(throttle.check("ip"), LoginDecision::Allowed);
        throttle.record_failure("ip");

        clock.advance(Duration::milliseconds(400));
        assert_eq!(
            throttle.check("ip"),
            LoginDecision::Denied {
                retry_after: Duration::milliseconds(600)
            }
        );

        clock.advance(Duration::milliseconds(600));
        assert_eq!(throttle.check("ip"), LoginDecision::Allowed);
    }

    #[test]
    fn login_budget_is_exhausted_after_ten_attempts() {
        let clock = ManualClock::starting();
        let throttle = LoginThrottle::new(clock.clone());

        for _ in 0..LOGIN_MAX_ATTEMPTS {
            assert_eq!(throttle.check("ip"), LoginDecision::Allowed);
        }
        assert_eq!(
            throttle.check("ip"),
            LoginDecision::Denied {
                retry_after: THROTTLE_WINDOW
            }
        );

        clock.advance(Duration::minutes(5));
        assert_eq!(
            throttle.check("ip"),
            LoginDecision::Denied {
                retry_after: Duration::minutes(10)
            }
        );

        clock.advance(THROTTLE_WINDOW + Duration::seconds(1));
        assert_eq!(throttle.check("ip"), LoginDecision::Allowed);
    }

    #[test]
    fn successful_login_clears_history() {
        let clock = ManualClock::starting();
        let throttle = LoginThrottle::new(clock);

        assert_eq!(throttle.check("ip"), LoginDecision::Allowed);
        throttle.record_failure("ip");
        throttle.reset("ip");
        assert_eq!(throttle.check("ip"), LoginDecision::Allowed);
    }
}
