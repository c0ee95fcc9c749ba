//! Unique keys for blocks, spans, table rows and cells.
//!
//! Lowering never decides how keys look; it asks a [`KeyGenerator`] for a
//! fresh one each time. Production code uses [`RandomKeys`]; tests and
//! snapshots inject [`SequentialKeys`] or a closure to get stable output.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Hands out globally-unique opaque strings.
pub trait KeyGenerator {
    fn next_key(&self) -> String;
}

impl<F> KeyGenerator for F
where
    F: Fn() -> String,
{
    fn next_key(&self) -> String {
        self()
    }
}

/// Random 12 hex character keys from a v4 UUID. Needs no coordination
/// between concurrent callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomKeys;

const RANDOM_KEY_LEN: usize = 12;

impl KeyGenerator for RandomKeys {
    fn next_key(&self) -> String {
        let mut key = uuid::Uuid::new_v4().simple().to_string();
        key.truncate(RANDOM_KEY_LEN);
        key
    }
}

/// Deterministic keys `k0`, `k1`, ... for reproducible output.
#[derive(Debug, Default)]
pub struct SequentialKeys {
    next: AtomicUsize,
}

impl SequentialKeys {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyGenerator for SequentialKeys {
    fn next_key(&self) -> String {
        format!("k{}", self.next.fetch_add(1, Ordering::Relaxed))
    }
}
