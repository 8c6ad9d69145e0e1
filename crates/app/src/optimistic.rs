//! Optimistic updates against the API.

use std::future::Future;

use bengkel::optimistic::Optimistic;
use tracing::warn;

use crate::api::{ApiError, ValidationError};

/// Apply `action` to local `state` straight away, then run the remote
/// `effect`. If the server refuses, the local change is rolled back and the
/// server's error is returned.
///
/// # Errors
///
/// Returns a validation error if the action is rejected locally (nothing is
/// sent), or the error from `effect`.
pub async fn apply_optimistically<S, F, Fut, T>(
    state: &mut S,
    action: S::Action,
    effect: F,
) -> Result<T, ApiError>
where
    S: Optimistic,
    S::Error: Into<ValidationError>,
    F: FnOnce(S::Action) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let undo = state
        .apply(&action)
        .map_err(|error| ApiError::Validation(error.into()))?;

    match effect(action).await {
        Ok(value) => Ok(value),
        Err(error) => {
            warn!(%error, "change rejected by server, rolling back");

            state.undo(undo);

            Err(error)
        }
    }
}
