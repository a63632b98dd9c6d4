//! Memoizing cache with staleness deadlines.
//!
//! Values are keyed by `(subject, computation)`. A lookup returns the stored
//! value while the current tick is before its deadline and recomputes it
//! otherwise. Computations must be [enabled](StaleCache::enable) before their
//! results are stored.
//!
//! Concurrent misses on the same key may each run `recompute`; the last
//! write wins. Recomputation is expected to be a pure function of the
//! subject, so this is tolerated rather than serialized.

pub mod cache;
pub mod clock;

pub use cache::{CacheControl, CacheStats, ComputationId, StaleCache};
pub use clock::{Clock, ManualClock, Tick};
