//! Nonce source for private requests
//!
//! Bittrex rejects a signed call whose nonce is not larger than the last one it
//! accepted for the same key. Nonces come from the wall clock at microsecond
//! resolution and are pushed past the previous value when two calls land in
//! the same tick or the clock steps backwards.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Highest nonce handed out by this process
static LAST_NONCE: AtomicU64 = AtomicU64::new(0);

fn clock_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_micros() as u64)
        .unwrap_or(0)
}

/// Generate a nonce for a private request
///
/// Strictly increasing across every call in the process, including calls made
/// concurrently from different threads.
pub fn generate_nonce() -> u64 {
    let now = clock_micros();
    let previous = match LAST_NONCE.fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
        Some(now.max(last + 1))
    }) {
        Ok(previous) | Err(previous) => previous,
    };
    now.max(previous + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_nonce_generation() {
        let nonce1 = generate_nonce();
        let nonce2 = generate_nonce();
        assert!(nonce2 > nonce1);
    }

    #[test]
    fn test_nonce_tracks_clock() {
        let before = clock_micros();
        let nonce = generate_nonce();
        assert!(nonce >= before);
    }

    #[test]
    fn test_tight_loop_is_strictly_increasing() {
        let nonces: Vec<u64> = (0..10_000).map(|_| generate_nonce()).collect();
        assert!(nonces.windows(2).all(|pair| pair[1] > pair[0]));
    }

    #[test]
    fn test_concurrent_nonces_are_unique() {
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| (0..1_000).map(|_| generate_nonce()).collect::<Vec<_>>()))
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for nonce in handle.join().unwrap() {
                assert!(seen.insert(nonce), "nonce {nonce} issued twice");
            }
        }
        assert_eq!(seen.len(), 8_000);
    }
}
