//! Search debouncing.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

/// Quiet period after the last keystroke before a search is sent.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);

/// Drops every query that is followed by another within the quiet period.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    latest: Arc<AtomicU64>,
    delay: Duration,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl SearchDebouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            latest: Arc::new(AtomicU64::new(0)),
            delay,
        }
    }

    /// Wait out the quiet period. Returns the query if nothing newer arrived
    /// in the meantime, `None` if it was superseded.
    pub async fn settle(&self, query: impl Into<String>) -> Option<String> {
        let query = query.into();
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst).wrapping_add(1);

        tokio::time::sleep(self.delay).await;

        (self.latest.load(Ordering::SeqCst) == ticket).then_some(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn only_the_last_keystroke_settles() {
        let debouncer = SearchDebouncer::default();

        let typed_first = debouncer.settle("kam");
        let typed_later = async {
            tokio::time::sleep(Duration::from_millis(150)).await;
            debouncer.settle("kampas rem").await
        };

        let (first, last) = tokio::join!(typed_first, typed_later);

        assert_eq!(first, None);
        assert_eq!(last.as_deref(), Some("kampas rem"));
    }

    #[tokio::test(start_paused = true)]
    async fn queries_spaced_past_the_quiet_period_all_settle() {
        let debouncer = SearchDebouncer::default();

        assert_eq!(debouncer.settle("oli").await.as_deref(), Some("oli"));
        assert_eq!(debouncer.settle("busi").await.as_deref(), Some("busi"));
    }
}
