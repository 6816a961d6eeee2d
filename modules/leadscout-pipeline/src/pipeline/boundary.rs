// Collaborator calls are converted into a `Lookup` right where they return,
// so stage logic branches on a value instead of matching errors inline.

use std::future::Future;
use std::time::Duration;

/// Outcome of one collaborator call.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    /// The call succeeded but had nothing to return.
    Empty,
    Failed(String),
}

impl<T> Lookup<T> {
    pub fn from_result(result: anyhow::Result<Option<T>>) -> Self {
        match result {
            Ok(Some(value)) => Self::Found(value),
            Ok(None) => Self::Empty,
            Err(e) => Self::Failed(format!("{e:#}")),
        }
    }

    /// Run `call`, optionally bounded by `limit`. An elapsed limit is a failure.
    pub async fn capture<F>(call: F, limit: Option<Duration>) -> Self
    where
        F: Future<Output = anyhow::Result<Option<T>>>,
    {
        match limit {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => Self::from_result(result),
                Err(_) => Self::Failed(format!("timed out after {}s", limit.as_secs())),
            },
            None => Self::from_result(call.await),
        }
    }

    /// Keep only found values that pass `f`; everything else collapses to `Empty`
    /// unless it already failed.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Option<U>) -> Lookup<U> {
        match self {
            Self::Found(value) => f(value).map_or(Lookup::Empty, Lookup::Found),
            Self::Empty => Lookup::Empty,
            Self::Failed(reason) => Lookup::Failed(reason),
        }
    }
}

/// A generation call that always produces a value: the real output, or
/// `fallback(reason)` when the call failed.
pub async fn generate_or<T, F>(call: F, fallback: impl FnOnce(&str) -> T) -> (T, Option<String>)
where
    F: Future<Output = anyhow::Result<T>>,
{
    match call.await {
        Ok(value) => (value, None),
        Err(e) => {
            let reason = format!("{e:#}");
            (fallback(&reason), Some(reason))
        }
    }
}
