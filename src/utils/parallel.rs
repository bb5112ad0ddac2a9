//! Runtime switch for the optional rayon code paths.
//!
//! With the `parallel` feature enabled, leaf hashing and layer construction
//! fan out over rayon unless parallelism was turned off through
//! [`set_parallelism`]. Results never depend on the switch.

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "parallel")]
static PARALLEL_ENABLED: AtomicBool = AtomicBool::new(true);

const DEFAULT_CHUNK_SIZE: usize = 256;

/// Below this many items the sequential path is always used.
#[cfg_attr(not(feature = "parallel"), allow(dead_code))]
pub(crate) const PARALLEL_THRESHOLD: usize = 1024;

/// Chunk size handed to rayon for `total_items` units of work.
pub fn preferred_chunk_size(total_items: usize) -> usize {
    DEFAULT_CHUNK_SIZE.min(total_items.max(1))
}

#[cfg(feature = "parallel")]
pub fn parallelism_enabled() -> bool {
    PARALLEL_ENABLED.load(Ordering::SeqCst)
}

#[cfg(not(feature = "parallel"))]
pub fn parallelism_enabled() -> bool {
    false
}

/// Enables or disables parallel execution until the returned guard drops.
#[cfg(feature = "parallel")]
pub fn set_parallelism(enabled: bool) -> ParallelismGuard {
    let previous = PARALLEL_ENABLED.swap(enabled, Ordering::SeqCst);
    ParallelismGuard { previous }
}

#[cfg(not(feature = "parallel"))]
pub fn set_parallelism(_enabled: bool) -> ParallelismGuard {
    ParallelismGuard {}
}

/// Restores the previous parallelism setting on drop.
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

/// Maps `f` over `items`, in parallel when enabled and worthwhile.
pub(crate) fn map_items<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        if parallelism_enabled() && items.len() >= PARALLEL_THRESHOLD {
            use rayon::prelude::*;
            return items
                .par_iter()
                .with_min_len(preferred_chunk_size(items.len()))
                .map(f)
                .collect();
        }
    }
    items.iter().map(f).collect()
}

/// Maps `f` over consecutive pairs of `items` (the last chunk may hold one item).
pub(crate) fn map_pairs<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&[T]) -> R + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        if parallelism_enabled() && items.len() >= PARALLEL_THRESHOLD {
            use rayon::prelude::*;
            return items
                .par_chunks(2)
                .with_min_len(preferred_chunk_size(items.len() / 2))
                .map(f)
                .collect();
        }
    }
    items.chunks(2).map(f).collect()
}
