//! Process-wide caching mode selector
//!
//! Visiting a trigger path activates a mode for a short window, after which the
//! selector falls back to [`CachingMode::None`]. Each activation carries a
//! generation number; a reset timer only clears the cell when no newer
//! activation has happened since it was scheduled.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use super::mode::CachingMode;
use crate::logger;

#[derive(Debug, Default)]
struct Selection {
    mode: CachingMode,
    generation: u64,
}

/// Shared cell holding the active caching mode
#[derive(Debug)]
pub struct ModeSelector {
    selection: Mutex<Selection>,
    reset_after: Duration,
}

impl ModeSelector {
    pub fn new(reset_after: Duration) -> Self {
        Self {
            selection: Mutex::new(Selection::default()),
            reset_after,
        }
    }

    /// Currently active mode
    pub fn current(&self) -> CachingMode {
        self.selection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .mode
    }

    /// Window after which an activation expires
    pub const fn reset_after(&self) -> Duration {
        self.reset_after
    }

    /// Activate `mode` and schedule its reset
    ///
    /// Must be called from within a tokio runtime. Returns the generation of
    /// this activation.
    pub fn activate(self: &Arc<Self>, mode: CachingMode) -> u64 {
        let generation = {
            let mut selection = self.selection.lock().unwrap_or_else(PoisonError::into_inner);
            selection.generation = selection.generation.wrapping_add(1);
            selection.mode = mode;
            selection.generation
        };

        if mode != CachingMode::None {
            let selector = Arc::clone(self);
            tokio::spawn(async move {
                tokio::time::sleep(selector.reset_after).await;
                if selector.expire(generation) {
                    logger::log_mode_expired(mode);
                }
            });
        }

        generation
    }

    /// Reset to `None` if `generation` is still the latest activation
    fn expire(&self, generation: u64) -> bool {
        let mut selection = self.selection.lock().unwrap_or_else(PoisonError::into_inner);
        if selection.generation != generation || selection.mode == CachingMode::None {
            return false;
        }
        selection.mode = CachingMode::None;
        true
    }
}

impl Default for ModeSelector {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    const WINDOW: Duration = Duration::from_millis(100);

    #[tokio::test(start_paused = true)]
    async fn test_activation_expires_after_window() {
        for mode in [
            CachingMode::Expires,
            CachingMode::CacheControl,
            CachingMode::LastModified,
            CachingMode::ETag,
        ] {
            let selector = Arc::new(ModeSelector::new(WINDOW));
            selector.activate(mode);
            assert_eq!(selector.current(), mode);

            sleep(Duration::from_millis(99)).await;
            assert_eq!(selector.current(), mode);

            sleep(Duration::from_millis(2)).await;
            assert_eq!(selector.current(), CachingMode::None);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_activation_survives_older_timer() {
        let selector = Arc::new(ModeSelector::new(WINDOW));
        selector.activate(CachingMode::ETag);

        sleep(Duration::from_millis(60)).await;
        selector.activate(CachingMode::Expires);

        // First timer fires at 100ms and must leave the newer activation alone
        sleep(Duration::from_millis(60)).await;
        assert_eq!(selector.current(), CachingMode::Expires);

        sleep(Duration::from_millis(50)).await;
        assert_eq!(selector.current(), CachingMode::None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_root_clears_immediately() {
        let selector = Arc::new(ModeSelector::new(WINDOW));
        selector.activate(CachingMode::LastModified);
        selector.activate(CachingMode::None);
        assert_eq!(selector.current(), CachingMode::None);

        sleep(Duration::from_millis(150)).await;
        assert_eq!(selector.current(), CachingMode::None);
    }

    #[tokio::test]
    async fn test_generations_increase() {
        let selector = Arc::new(ModeSelector::default());
        let first = selector.activate(CachingMode::ETag);
        let second = selector.activate(CachingMode::ETag);
        assert!(second > first);
        assert_eq!(selector.reset_after(), WINDOW);
    }
}
