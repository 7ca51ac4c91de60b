//! Work dispatch for the search stages.
//!
//! Every parallel path has a sequential twin. With the `parallel` feature the
//! rayon path runs unless a caller has switched it off through
//! [`set_parallelism`]; the returned guard restores the previous setting.
//! Consumers never rely on completion order: fan-in is either keyed by a
//! caller-supplied key or order-preserving by construction.

use std::collections::HashMap;
use std::hash::Hash;

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "parallel")]
static PARALLEL_ENABLED: AtomicBool = AtomicBool::new(true);

/// Search tasks are coarse, so chunks stay small.
const DEFAULT_CHUNK_SIZE: usize = 4;

pub fn preferred_chunk_size(total_items: usize) -> usize {
    if total_items == 0 {
        1
    } else {
        DEFAULT_CHUNK_SIZE.min(total_items.max(1))
    }
}

#[cfg(feature = "parallel")]
pub fn parallelism_enabled() -> bool {
    PARALLEL_ENABLED.load(Ordering::SeqCst)
}

#[cfg(not(feature = "parallel"))]
pub fn parallelism_enabled() -> bool {
    false
}

#[cfg(feature = "parallel")]
pub fn set_parallelism(enabled: bool) -> ParallelismGuard {
    let previous = PARALLEL_ENABLED.swap(enabled, Ordering::SeqCst);
    ParallelismGuard { previous }
}

#[cfg(not(feature = "parallel"))]
pub fn set_parallelism(_enabled: bool) -> ParallelismGuard {
    ParallelismGuard {}
}

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

/// Runs `task` on every input and files each outcome under `key(input)`.
///
/// Inputs with equal keys collapse to a single entry, so keys must identify
/// their task.
pub fn dispatch_keyed<I, K, R, FK, FT>(inputs: &[I], key: FK, task: FT) -> HashMap<K, R>
where
    I: Sync,
    K: Eq + Hash + Send,
    R: Send,
    FK: Fn(&I) -> K + Sync,
    FT: Fn(&I) -> R + Sync,
{
    #[cfg(feature = "parallel")]
    if parallelism_enabled() {
        use rayon::prelude::*;
        let chunk = preferred_chunk_size(inputs.len());
        return inputs
            .par_iter()
            .with_min_len(chunk)
            .with_max_len(chunk)
            .map(|input| (key(input), task(input)))
            .collect();
    }
    inputs
        .iter()
        .map(|input| (key(input), task(input)))
        .collect()
}

/// Keeps the items for which `keep` holds, in their original order.
pub fn retain_ordered<T, F>(items: Vec<T>, keep: F) -> Vec<T>
where
    T: Send,
    F: Fn(&T) -> bool + Sync,
{
    #[cfg(feature = "parallel")]
    if parallelism_enabled() {
        use rayon::prelude::*;
        let chunk = preferred_chunk_size(items.len());
        return items
            .into_par_iter()
            .with_min_len(chunk)
            .with_max_len(chunk)
            .filter(|item| keep(item))
            .collect();
    }
    items.into_iter().filter(|item| keep(item)).collect()
}

/// Returns `true` when `predicate` holds for some item.
pub fn any_match<T, F>(items: &[T], predicate: F) -> bool
where
    T: Sync,
    F: Fn(&T) -> bool + Sync,
{
    #[cfg(feature = "parallel")]
    if parallelism_enabled() && items.len() > 1 {
        use rayon::prelude::*;
        return items.par_iter().any(|item| predicate(item));
    }
    items.iter().any(predicate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_dispatch_reassociates_results() {
        let inputs: Vec<u32> = (0..37).collect();
        let results = dispatch_keyed(&inputs, |i| *i, |i| i * i);
        assert_eq!(results.len(), 37);
        for i in inputs {
            assert_eq!(results[&i], i * i);
        }
    }

    #[test]
    fn retain_keeps_order() {
        let kept = retain_ordered((0..50).collect::<Vec<u32>>(), |i| i % 3 == 0);
        let expected: Vec<u32> = (0..50).filter(|i| i % 3 == 0).collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn guard_restores_previous_setting() {
        let before = parallelism_enabled();
        {
            let _guard = set_parallelism(false);
            assert!(!parallelism_enabled());
            assert!(any_match(&[1, 2, 3], |v| *v == 2));
        }
        assert_eq!(parallelism_enabled(), before);
    }
}
