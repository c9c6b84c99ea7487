//! Threshold-based parallel dispatch for the pixel passes
//!
//! Small images are walked sequentially; once a buffer holds at least
//! [`PARALLEL_THRESHOLD`] pixels the work is split across the rayon pool.
//! Both paths produce bit-identical results.

use rayon::prelude::*;

use super::PARALLEL_THRESHOLD;

/// Parallel fold/reduce over elements with automatic threshold-based dispatch.
///
/// `reduce_fn` must be associative and `init` must be its identity, since
/// the parallel path folds arbitrary sub-slices and merges them in any order.
pub fn parallel_fold_reduce<T, A, I, F, R>(data: &[T], init: I, fold_fn: F, reduce_fn: R) -> A
where
    T: Sync,
    A: Send,
    I: Fn() -> A + Sync + Send,
    F: Fn(A, &T) -> A + Sync + Send,
    R: Fn(A, A) -> A + Sync + Send,
{
    if data.len() >= PARALLEL_THRESHOLD {
        data.par_iter()
            .fold(&init, &fold_fn)
            .reduce(&init, &reduce_fn)
    } else {
        data.iter().fold(init(), fold_fn)
    }
}

/// Parallel in-place map over elements with automatic threshold-based dispatch.
pub fn parallel_for_each_mut<T, F>(data: &mut [T], f: F)
where
    T: Send + Sync,
    F: Fn(&mut T) + Sync + Send,
{
    if data.len() >= PARALLEL_THRESHOLD {
        data.par_iter_mut().for_each(&f);
    } else {
        data.iter_mut().for_each(f);
    }
}
