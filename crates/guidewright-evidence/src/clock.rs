use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Supplies the current time as milliseconds since the Unix epoch.
///
/// No entity constructor or store method reads the system clock directly —
/// every timestamp in the engine flows through this trait, so tests can
/// replay a fixed or scripted sequence of times and get reproducible
/// results.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Production clock backed by `SystemTime::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before unix epoch")
            .as_millis() as u64
    }
}

/// Test clock returning a fixed value, or a scripted sequence that advances
/// one step per call and holds on the last value once exhausted.
pub struct FixedClock {
    values: Vec<u64>,
    cursor: AtomicU64,
}

impl FixedClock {
    pub fn at(ms: u64) -> Self {
        Self {
            values: vec![ms],
            cursor: AtomicU64::new(0),
        }
    }

    pub fn sequence(values: Vec<u64>) -> Self {
        assert!(!values.is_empty(), "FixedClock sequence must not be empty");
        Self {
            values,
            cursor: AtomicU64::new(0),
        }
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        let i = self.cursor.fetch_add(1, Ordering::SeqCst) as usize;
        *self
            .values
            .get(i)
            .unwrap_or_else(|| self.values.last().unwrap())
    }
}

/// Supplies fresh identifiers. Production code draws random v4 UUIDs; tests
/// draw a deterministic, monotonically increasing sequence.
pub trait UuidSource: Send + Sync {
    fn next_uuid(&self) -> Uuid;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomUuidSource;

impl UuidSource for RandomUuidSource {
    fn next_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

pub struct SequentialUuidSource {
    next: AtomicU64,
}

impl SequentialUuidSource {
    pub fn starting_at(seed: u64) -> Self {
        Self {
            next: AtomicU64::new(seed),
        }
    }
}

impl Default for SequentialUuidSource {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl UuidSource for SequentialUuidSource {
    fn next_uuid(&self) -> Uuid {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        Uuid::from_u128(n as u128)
    }
}
