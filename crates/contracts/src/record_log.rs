//! RecordLog - append-only in-memory log shared by a recorder and the
//! session controller.
//!
//! Two writers touch each log: the owning producer thread (driver callback
//! or capture loop) appends data rows, and the controller thread injects
//! markers. Every append takes the mutex, so interleaving is safe and the
//! log stays a single time-ordered sequence.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Mutex-guarded append-only sequence of log rows
#[derive(Debug, Default)]
pub struct RecordLog<T> {
    rows: Mutex<Vec<T>>,
}

impl<T: Clone> RecordLog<T> {
    /// Create an empty log
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }

    /// Append one row
    pub fn append(&self, row: T) {
        self.guard().push(row);
    }

    /// Drop all accumulated rows
    pub fn clear(&self) {
        self.guard().clear();
    }

    /// Number of accumulated rows
    pub fn len(&self) -> usize {
        self.guard().len()
    }

    /// Whether the log holds no rows
    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    /// Clone out the accumulated rows in append order
    ///
    /// Intended for use after recording stops; calling it mid-recording is
    /// safe but observes an arbitrary cut of the stream.
    pub fn snapshot(&self) -> Vec<T> {
        self.guard().clone()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<T>> {
        // A panic on the other writer must not lose the session's data.
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_append_preserves_order() {
        let log = RecordLog::new();
        for i in 0..10 {
            log.append(i);
        }
        assert_eq!(log.snapshot(), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_clear_empties_log() {
        let log = RecordLog::new();
        log.append(1);
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn test_concurrent_two_writer_append() {
        let log = Arc::new(RecordLog::new());

        let producer = {
            let log = Arc::clone(&log);
            thread::spawn(move || {
                for i in 0..500 {
                    log.append(i);
                }
            })
        };
        let injector = {
            let log = Arc::clone(&log);
            thread::spawn(move || {
                for i in 1000..1050 {
                    log.append(i);
                }
            })
        };

        producer.join().expect("producer thread");
        injector.join().expect("injector thread");

        assert_eq!(log.len(), 550);
    }
}
