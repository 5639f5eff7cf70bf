//! Retry logic with exponential backoff for service operations.
//!
//! `RetryContext` runs an operation until it succeeds, fails with a permanent error, or
//! exhausts its attempts. A cache value persists between attempts so data fetched by an
//! earlier attempt is not fetched again.

use std::time::Duration;

use crate::error::{retry::ErrorRetryStrategy, Error};

/// Attempt cap and backoff bounds of a [`RetryContext`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the first retry, doubled for every further retry
    pub base_delay: Duration,
    /// Upper bound of a single delay
    pub max_backoff: Duration,
}

impl RetryPolicy {
    const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);
    const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(30);

    /// Policy with the given attempts and base delay and the default backoff cap.
    ///
    /// A zero attempt count is raised to one so the operation always runs.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_backoff: Self::DEFAULT_MAX_BACKOFF,
        }
    }

    pub fn with_max_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff = max_backoff;
        self
    }

    /// Delay after the `attempt`-th failed attempt: `min(base * 2^(attempt - 1), max_backoff)`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.base_delay
            .saturating_mul(2_u32.pow(exponent))
            .min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_BASE_DELAY)
    }
}

/// Context for executing operations with automatic retry logic and caching.
///
/// # Type Parameters
///
/// - `T` - Cache type persisted between attempts. Use `()` for operations without caching
///   needs.
///
/// # Retry Behavior
///
/// - **Max attempts**: 3 by default, see [`RetryPolicy`]
/// - **Backoff strategy**: Exponential starting at the base delay, capped at `max_backoff`
/// - **Retry conditions**: Only errors with `ErrorRetryStrategy::Retry` are retried
/// - **Permanent failures**: Errors with `ErrorRetryStrategy::Fail` return immediately
///
/// # Example
///
/// ```ignore
/// let mut ctx: RetryContext<()> = RetryContext::new();
///
/// let rosters = ctx
///     .execute_with_retry("roster fetch for league 1048", |_| {
///         let source = source.clone();
///
///         Box::pin(async move { source.fetch_league_rosters("1048").await })
///     })
///     .await?;
/// ```
pub struct RetryContext<T> {
    /// Cache to be used between retries to prevent unnecessary additional fetches
    cache: T,
    policy: RetryPolicy,
}

impl<T> RetryContext<T>
where
    T: Clone + Default,
{
    /// Creates a new retry context with the default policy.
    pub fn new() -> Self {
        Self::with_policy(RetryPolicy::default())
    }

    /// Creates a new retry context with a custom policy.
    pub fn with_policy(policy: RetryPolicy) -> Self {
        Self {
            cache: T::default(),
            policy,
        }
    }

    /// Executes an operation with automatic retry logic and exponential backoff.
    ///
    /// # Arguments
    /// - `description` - Human-readable description for logging (e.g., "player catalog fetch")
    /// - `operation` - Async function that receives mutable cache reference and returns `Result<R, Error>`
    ///
    /// # Returns
    /// - `Ok(R)` - Operation succeeded
    /// - `Err(Error)` - Operation failed permanently or exhausted all retry attempts
    pub async fn execute_with_retry<R, F>(
        &mut self,
        description: &str,
        operation: F,
    ) -> Result<R, Error>
    where
        F: for<'a> Fn(
            &'a mut T,
        ) -> std::pin::Pin<
            Box<dyn std::future::Future<Output = Result<R, Error>> + Send + 'a>,
        >,
    {
        let max_attempts = self.policy.max_attempts;
        let mut attempt_count = 0;

        loop {
            tracing::debug!(
                "Processing {} (attempt {}/{})",
                description,
                attempt_count + 1,
                max_attempts
            );

            match operation(&mut self.cache).await {
                Ok(result) => {
                    tracing::debug!("Successfully processed {}", description);
                    return Ok(result);
                }
                Err(e) => match e.to_retry_strategy() {
                    ErrorRetryStrategy::Fail => {
                        tracing::error!("Permanent error for {}: {:?}", description, e);
                        return Err(e);
                    }
                    ErrorRetryStrategy::Retry => {
                        attempt_count += 1;
                        if attempt_count >= max_attempts {
                            tracing::error!(
                                "Max attempts ({}) exceeded for {}: {:?}",
                                max_attempts,
                                description,
                                e
                            );
                            return Err(e);
                        }

                        let backoff = self.policy.backoff(attempt_count);

                        tracing::warn!(
                            "Retrying {} (attempt {}/{}) after {:?}: {:?}",
                            description,
                            attempt_count,
                            max_attempts,
                            backoff,
                            e
                        );

                        tokio::time::sleep(backoff).await;
                    }
                },
            }
        }
    }
}

impl<T> Default for RetryContext<T>
where
    T: Clone + Default,
{
    fn default() -> Self {
        Self::new()
    }
}
