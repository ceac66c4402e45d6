//! Fork-join primitives shared by the parallel recursive multipliers.
//!
//! Tasks run on a rayon pool, never on a thread of their own: the global
//! pool (one worker per CPU, or `RAYON_NUM_THREADS`) by default, or a
//! [`ForkJoinPool`] when the caller runs the multiplication through
//! [`ForkJoinPool::install`]. A thread blocked in a join keeps executing
//! queued tasks, so deep recursion does not starve the pool.

use crate::error::{MatmulError, Result};

/// Runs `a` and `b` concurrently and returns once both have finished.
#[inline]
pub fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

/// Runs `f` once per task, all tasks concurrently, and returns only after
/// every one of them has completed.
///
/// Tasks may borrow from the caller's stack; the join is a full barrier, so
/// nothing a task wrote is observed half-done.
///
/// ```
/// use recmatmul::threaded::fork_join::fork_each;
///
/// let mut out = [0u64; 4];
/// fork_each(out.iter_mut().enumerate(), |(i, slot)| *slot = (i as u64 + 1) * 10);
/// assert_eq!(out, [10, 20, 30, 40]);
/// ```
pub fn fork_each<I, T, F>(tasks: I, f: F)
where
    I: IntoIterator<Item = T> + Send,
    T: Send,
    F: Fn(T) + Sync,
{
    let f = &f;
    rayon::scope(move |s| {
        for task in tasks {
            s.spawn(move |_| f(task));
        }
    });
}

/// A bounded pool of worker threads that forked tasks execute on.
pub struct ForkJoinPool(rayon::ThreadPool);

impl ForkJoinPool {
    /// Creates a pool with `num_threads` workers. `0` lets rayon pick
    /// (`RAYON_NUM_THREADS`, else the number of logical CPUs).
    pub fn new(num_threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("recmatmul-{i}"))
            .build()
            .map_err(|err| MatmulError::ThreadPool(err.to_string()))?;
        tracing::debug!(threads = pool.current_num_threads(), "fork-join pool created");
        Ok(Self(pool))
    }

    pub fn num_threads(&self) -> usize {
        self.0.current_num_threads()
    }

    /// Runs `op` inside the pool; every task it forks stays on these workers.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.0.install(op)
    }
}

impl std::fmt::Debug for ForkJoinPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForkJoinPool")
            .field("num_threads", &self.num_threads())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_join_returns_both() {
        let (x, y) = join(|| 2 + 2, || "done");
        assert_eq!((x, y), (4, "done"));
    }

    #[test]
    fn test_fork_each_is_a_barrier() {
        let counter = AtomicUsize::new(0);
        fork_each(0..7, |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(counter.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn test_fork_each_disjoint_writes() {
        let mut buffers = vec![vec![0i64; 16]; 7];
        fork_each(buffers.iter_mut().enumerate(), |(i, buf)| {
            buf.iter_mut().for_each(|v| *v = i as i64);
        });
        for (i, buf) in buffers.iter().enumerate() {
            assert!(buf.iter().all(|&v| v == i as i64));
        }
    }

    #[test]
    fn test_pool_bounds_workers() {
        let pool = ForkJoinPool::new(2).unwrap();
        assert_eq!(pool.num_threads(), 2);
        let inside = pool.install(rayon::current_num_threads);
        assert_eq!(inside, 2);
    }

    #[test]
    fn test_nested_forks_inside_small_pool() {
        // 7 * 7 tasks on a single worker must still complete.
        let pool = ForkJoinPool::new(1).unwrap();
        let counter = AtomicUsize::new(0);
        pool.install(|| {
            fork_each(0..7, |_| {
                fork_each(0..7, |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                });
            });
        });
        assert_eq!(counter.load(Ordering::SeqCst), 49);
    }
}
