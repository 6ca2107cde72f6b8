//! Best score tracking
//!
//! Wraps a `ScoreStore` so a missing or unreadable value counts as 0 and the
//! persisted best only ever goes up.

use crate::persistence::ScoreStore;

/// Best score plus the store it is persisted to
pub struct BestScore {
    best: u32,
    store: Box<dyn ScoreStore>,
}

impl BestScore {
    /// Read the stored best (absent = 0)
    pub fn load(store: Box<dyn ScoreStore>) -> Self {
        let best = store.get_high_score().unwrap_or(0);
        log::info!("Best score: {}", best);
        Self { best, store }
    }

    pub fn get(&self) -> u32 {
        self.best
    }

    /// Offer a finished run's score; persists and returns true if it is a new best
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        self.store.set_high_score(score);
        log::info!("New best score: {}", score);
        true
    }
}

impl std::fmt::Debug for BestScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BestScore").field("best", &self.best).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Store whose writes the test can observe after handing it over
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStore>>);

    impl ScoreStore for SharedStore {
        fn get_high_score(&self) -> Option<u32> {
            self.0.borrow().get_high_score()
        }

        fn set_high_score(&mut self, score: u32) {
            self.0.borrow_mut().set_high_score(score);
        }
    }

    #[test]
    fn test_absent_is_zero() {
        let best = BestScore::load(Box::new(MemoryStore::new()));
        assert_eq!(best.get(), 0);
    }

    #[test]
    fn test_only_improvements_are_written() {
        let shared = SharedStore(Rc::new(RefCell::new(MemoryStore::with_score(5))));
        let mut best = BestScore::load(Box::new(shared.clone()));
        assert_eq!(best.get(), 5);

        assert!(!best.record(3));
        assert!(!best.record(5));
        assert_eq!(shared.0.borrow().writes(), 0);

        assert!(best.record(8));
        assert_eq!(best.get(), 8);
        assert_eq!(shared.get_high_score(), Some(8));
        assert_eq!(shared.0.borrow().writes(), 1);
    }
}
