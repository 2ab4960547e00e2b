//! A module for computing all-pairs shortest path lengths.

use std::collections::VecDeque;

use crate::{compute::per_source, graph::GraphIndex};

/// Breadth-first search from `index` along the directed adjacency lists, returning the hop count
/// to every node, `None` where the node can't be reached.
fn distances_from(index: usize, indices: &[Vec<GraphIndex>]) -> Vec<Option<u32>> {
    let num_nodes = indices.len();

    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut distances: Vec<Option<u32>> = vec![None; num_nodes];

    distances[index] = Some(0);
    queue.push_back(index);

    while let Some(current) = queue.pop_front() {
        // Nodes are only queued once their distance has been set.
        let Some(delta) = distances[current] else {
            continue;
        };

        for &next in &indices[current] {
            let next = next as usize;
            if distances[next].is_none() {
                distances[next] = Some(delta + 1);
                queue.push_back(next);
            }
        }
    }

    distances
}

/// Computes the shortest path length between every ordered pair of nodes, row `i` holding the
/// distances from node `i`.
///
/// The searches are spread over `num_threads` worker threads.
pub fn compute_distances(indices: &[Vec<GraphIndex>], num_threads: usize) -> Vec<Vec<Option<u32>>> {
    per_source(indices.len(), num_threads, |index| distances_from(index, indices))
}
