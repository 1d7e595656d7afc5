//! Bounded readiness polling.

use std::time::Duration;

use sqloracle_core::config::ServiceConfig;
use sqloracle_core::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub attempts: u32,
    pub interval: Duration,
}

impl ReadinessPolicy {
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            attempts: config.effective_ready_attempts(),
            interval: config.effective_ready_interval(),
        }
    }
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self::from_config(&ServiceConfig::default())
    }
}

/// Sleep `interval`, then call `check`, up to `attempts` times. Returns the
/// number of attempts used once `check` reports ready.
///
/// A check error counts as "not ready yet"; only exhausting the attempts is
/// an error.
pub fn poll_until_ready<F>(
    service: &str,
    policy: ReadinessPolicy,
    mut check: F,
) -> Result<u32, ServiceError>
where
    F: FnMut() -> Result<bool, ServiceError>,
{
    for attempt in 1..=policy.attempts {
        std::thread::sleep(policy.interval);
        match check() {
            Ok(true) => {
                tracing::debug!(service, attempt, "service ready");
                return Ok(attempt);
            }
            Ok(false) => tracing::trace!(service, attempt, "service not ready"),
            Err(e) => tracing::trace!(service, attempt, error = %e, "readiness check failed"),
        }
    }
    Err(ServiceError::StartupTimedOut {
        service: service.to_string(),
        attempts: policy.attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast(attempts: u32) -> ReadinessPolicy {
        ReadinessPolicy {
            attempts,
            interval: Duration::ZERO,
        }
    }

    #[test]
    fn ready_on_third_check() {
        let mut calls = 0;
        let used = poll_until_ready("pg-14", fast(5), || {
            calls += 1;
            Ok(calls == 3)
        })
        .unwrap();
        assert_eq!(used, 3);
        assert_eq!(calls, 3);
    }

    #[test]
    fn check_errors_are_retried() {
        let mut calls = 0;
        let used = poll_until_ready("pg-14", fast(4), || {
            calls += 1;
            if calls < 2 {
                Err(ServiceError::CommandFailed {
                    command: "pg_isready".into(),
                    message: "no response".into(),
                })
            } else {
                Ok(true)
            }
        })
        .unwrap();
        assert_eq!(used, 2);
    }

    #[test]
    fn times_out_after_exactly_attempts_checks() {
        let mut calls = 0;
        let err = poll_until_ready("pg-12", fast(15), || {
            calls += 1;
            Ok(false)
        })
        .unwrap_err();
        assert_eq!(calls, 15);
        match err {
            ServiceError::StartupTimedOut { service, attempts } => {
                assert_eq!(service, "pg-12");
                assert_eq!(attempts, 15);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn policy_defaults() {
        let policy = ReadinessPolicy::default();
        assert_eq!(policy.attempts, 15);
        assert_eq!(policy.interval, Duration::from_secs(1));
    }
}
