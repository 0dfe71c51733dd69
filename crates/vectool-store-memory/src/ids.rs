//! Document id generation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Generates a document id unique within the process.
///
/// Format: `doc-<unix nanos>-<sequence>-<random>`, all hex. The atomic
/// sequence alone guarantees uniqueness; the clock and random parts keep
/// ids from different processes apart.
pub fn generate_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let suffix: u32 = rand::random();
    format!("doc-{nanos:x}-{seq:x}-{suffix:08x}")
}
