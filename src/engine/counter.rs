use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide monotonic version stamp for the visible UI, bumped once per
/// observed UI-change event by the platform event feed and by nothing else.
/// Readers treat it as an opaque version, never as a precise event count.
#[derive(Debug, Default)]
pub struct ChangeCounter(AtomicU64);

impl ChangeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observed UI-change event; returns the new value.
    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn value(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_bump_is_monotonic() {
        let counter = ChangeCounter::new();
        assert_eq!(counter.value(), 0);
        assert_eq!(counter.bump(), 1);
        assert_eq!(counter.bump(), 2);
        assert_eq!(counter.value(), 2);
    }

    #[test]
    fn test_concurrent_bumps_are_never_lost() {
        let counter = Arc::new(ChangeCounter::new());
        let before = counter.value();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counter = Arc::clone(&counter);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        counter.bump();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.value(), before + 8 * 1000);
    }
}
