//! Level-wise fan-out for the hashing pipeline.
//!
//! The tree builder hands each level of hash jobs to [`map_level`], which
//! spreads them over the rayon pool and joins the results in index order
//! before the next level may start.  A process-wide toggle can force the
//! sequential path, which is mostly useful to tests comparing scheduled
//! and sequential runs.

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "parallel")]
static PARALLEL_ENABLED: AtomicBool = AtomicBool::new(true);

#[cfg(feature = "parallel")]
const CHUNK_SIZE: usize = 64;

/// Runs `len` independent jobs of one level, fanning out over the rayon
/// pool when enabled.  Results keep index order; the first failure aborts
/// the whole level.
pub(crate) fn map_level<T, E, F>(len: usize, job: F) -> Result<Vec<T>, E>
where
    T: Send,
    E: Send,
    F: Fn(usize) -> Result<T, E> + Send + Sync,
{
    #[cfg(feature = "parallel")]
    if parallelism_enabled() {
        use rayon::prelude::*;
        let chunk = CHUNK_SIZE.min(len.max(1));
        return (0..len)
            .into_par_iter()
            .with_min_len(chunk)
            .with_max_len(chunk)
            .map(&job)
            .collect();
    }
    (0..len).map(job).collect()
}

/// True when hashing levels may fan out over the rayon pool.
#[cfg(feature = "parallel")]
pub fn parallelism_enabled() -> bool {
    PARALLEL_ENABLED.load(Ordering::SeqCst)
}

/// Always false without the `parallel` feature.
#[cfg(not(feature = "parallel"))]
pub fn parallelism_enabled() -> bool {
    false
}

/// Overrides the toggle until the returned guard drops.
#[cfg(feature = "parallel")]
pub fn set_parallelism(enabled: bool) -> ParallelismGuard {
    let previous = PARALLEL_ENABLED.swap(enabled, Ordering::SeqCst);
    ParallelismGuard { previous }
}

/// No-op without the `parallel` feature.
#[cfg(not(feature = "parallel"))]
pub fn set_parallelism(_enabled: bool) -> ParallelismGuard {
    ParallelismGuard {}
}

/// Restores the previous toggle state on drop.
pub struct ParallelismGuard {
    #[cfg(feature = "parallel")]
    previous: bool,
}

#[cfg(feature = "parallel")]
impl Drop for ParallelismGuard {
    fn drop(&mut self) {
        PARALLEL_ENABLED.store(self.previous, Ordering::SeqCst);
    }
}

#[cfg(not(feature = "parallel"))]
impl Drop for ParallelismGuard {
    fn drop(&mut self) {}
}
