//! Time budgets for calls that leave the process.
//!
//! The session store and the cache are external services. No caller may
//! block on them indefinitely, so every call goes through [`bounded`].

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::AppError;
use crate::result::AppResult;

/// Await `fut` for at most `budget`.
///
/// An elapsed budget is reported as [`crate::ErrorKind::Infrastructure`],
/// never as an authorization outcome.
pub async fn bounded<T, F>(budget: Duration, operation: &'static str, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(budget, fut).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                operation,
                budget_ms = budget.as_millis() as u64,
                "External call exceeded its time budget"
            );
            Err(AppError::infrastructure(format!("{operation} timed out")))
        }
    }
}
