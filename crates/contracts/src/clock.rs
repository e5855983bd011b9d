//! Shared wall-clock timestamp convention.

use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock seconds since the Unix epoch.
///
/// Each producer stamps its own rows with this on its own thread; streams are
/// aligned only approximately through the shared epoch.
pub fn wall_clock_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_clock_advances() {
        let a = wall_clock_secs();
        let b = wall_clock_secs();
        assert!(b >= a);
        assert!(a > 0.0);
    }
}
