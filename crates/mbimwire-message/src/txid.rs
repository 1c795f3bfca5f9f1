//! Transaction id allocation.

use std::sync::atomic::{AtomicU32, Ordering};

/// Allocates monotonically increasing transaction ids.
///
/// Transaction id 0 is reserved for unsolicited INDICATE_STATUS messages, so
/// the pool starts at 1 and skips 0 when the counter wraps.
#[derive(Debug)]
pub struct TransactionIdPool {
    next: AtomicU32,
}

impl TransactionIdPool {
    /// Create a pool whose first id is 1.
    pub const fn new() -> Self {
        Self {
            next: AtomicU32::new(1),
        }
    }

    /// Allocate the next transaction id.
    pub fn next(&self) -> u32 {
        loop {
            let id = self.next.fetch_add(1, Ordering::Relaxed);
            if id != 0 {
                return id;
            }
        }
    }
}

impl Default for TransactionIdPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one() {
        let pool = TransactionIdPool::new();
        assert_eq!(pool.next(), 1);
        assert_eq!(pool.next(), 2);
        assert_eq!(pool.next(), 3);
    }

    #[test]
    fn test_wrap_skips_zero() {
        let pool = TransactionIdPool {
            next: AtomicU32::new(u32::MAX),
        };
        assert_eq!(pool.next(), u32::MAX);
        assert_eq!(pool.next(), 1);
    }
}
