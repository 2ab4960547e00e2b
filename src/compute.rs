//! A small worker pool for per-source graph searches.

use std::{
    panic,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
};

pub const MIN_NUM_THREADS: usize = 1;
pub const MAX_NUM_THREADS: usize = 128;

/// Runs `task` once for every source index in `0..num_nodes` and returns the results ordered by
/// source index, whatever the number of threads used.
///
/// Each worker thread grabs the next unprocessed source from a shared counter until none are
/// left, keeping its own list of results which are merged by the caller once every thread is
/// done.
pub fn per_source<R, F>(num_nodes: usize, num_threads: usize, task: F) -> Vec<R>
where
    R: Send,
    F: Fn(usize) -> R + Sync,
{
    let num_threads = num_threads
        .clamp(MIN_NUM_THREADS, MAX_NUM_THREADS)
        .min(num_nodes.max(1));

    if num_threads == 1 {
        return (0..num_nodes).map(task).collect();
    }

    let counter = AtomicUsize::new(0);
    let (counter, task) = (&counter, &task);

    let mut indexed: Vec<(usize, R)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..num_threads)
            .map(|_| {
                scope.spawn(move || {
                    let mut results = Vec::new();
                    loop {
                        let index = counter.fetch_add(1, Ordering::Relaxed);
                        if index >= num_nodes {
                            break;
                        }
                        results.push((index, task(index)));
                    }
                    results
                })
            })
            .collect();

        let mut merged = Vec::with_capacity(num_nodes);
        for handle in handles {
            match handle.join() {
                Ok(results) => merged.extend(results),
                Err(payload) => panic::resume_unwind(payload),
            }
        }
        merged
    });

    indexed.sort_unstable_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, result)| result).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_are_in_source_order() {
        for num_threads in [0, 1, 3, 8, 1000] {
            let results = per_source(50, num_threads, |i| i * 2);

            assert_eq!(results, (0..50).map(|i| i * 2).collect::<Vec<_>>());
        }
    }

    #[test]
    fn no_sources() {
        let results: Vec<usize> = per_source(0, 4, |i| i);

        assert!(results.is_empty());
    }
}
