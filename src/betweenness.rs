//! A module for performing the multi-threaded computation of betweenness

use std::collections::VecDeque;

use crate::{compute::per_source, graph::GraphIndex};

/// this is an implementation of Ulrik Brandes's
/// A Faster Algorithm for Betweenness Centrality
/// http://snap.stanford.edu/class/cs224w-readings/brandes01centrality.pdf
/// page 10, "Algorithm 1: Betweenness centrality in unweighted graphs"
///
/// Returns the dependency of `index` on every other node, the edges in `indices` being followed
/// in their direction only.
fn dependencies_for_node(index: usize, indices: &[Vec<GraphIndex>]) -> Vec<f64> {
    let num_nodes = indices.len();

    let mut sigma: Vec<f64> = vec![0.0; num_nodes];
    let mut distance: Vec<Option<usize>> = vec![None; num_nodes];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); num_nodes];
    let mut delta: Vec<f64> = vec![0.0; num_nodes];
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut stack: Vec<usize> = Vec::with_capacity(num_nodes);

    sigma[index] = 1.0;
    distance[index] = Some(0);
    queue.push_back(index);

    while let Some(v) = queue.pop_front() {
        stack.push(v);
        let Some(dv) = distance[v] else {
            continue;
        };

        for &w in &indices[v] {
            let w = w as usize;
            if distance[w].is_none() {
                distance[w] = Some(dv + 1);
                queue.push_back(w);
            }
            if distance[w] == Some(dv + 1) {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    // Nodes are popped in order of non-increasing distance from the source.
    while let Some(w) = stack.pop() {
        for &v in &predecessors[w] {
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
    }
    delta[index] = 0.0;

    delta
}

/// Computes the unnormalized betweenness of every node of a directed graph given as adjacency
/// lists: for each node `v`, the sum over ordered pairs `(s, t)` with `s != v != t` of the share
/// of shortest `s -> t` paths passing through `v`.
///
/// Sources are processed by `num_threads` worker threads, the partial sums are added up in
/// source order so the result doesn't depend on the thread count.
pub fn compute_betweenness(indices: &[Vec<GraphIndex>], num_threads: usize) -> Vec<f64> {
    let num_nodes = indices.len();

    let dependencies = per_source(num_nodes, num_threads, |index| {
        dependencies_for_node(index, indices)
    });

    let mut betweenness: Vec<f64> = vec![0.0; num_nodes];
    for delta in dependencies {
        for (total, d) in betweenness.iter_mut().zip(delta) {
            *total += d;
        }
    }

    betweenness
}
