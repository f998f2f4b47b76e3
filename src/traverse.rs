//! Breadth-first traversal over vertex adjacency, used to restrict a
//! cross-section to the surface patch connected to the selected vertices.
use log::debug;
use std::collections::VecDeque;

/// Undirected vertex adjacency lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Adjacency {
    neighbors: Vec<Vec<usize>>,
}

impl Adjacency {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            neighbors: vec![Vec::new(); vertex_count],
        }
    }

    /// Builds adjacency from edges; out-of-range and self edges are skipped.
    pub fn from_edges(vertex_count: usize, edges: &[[usize; 2]]) -> Self {
        let mut adj = Self::new(vertex_count);
        for &[a, b] in edges {
            adj.add_edge(a, b);
        }
        adj
    }

    pub fn add_edge(&mut self, a: usize, b: usize) {
        if a == b || a >= self.neighbors.len() || b >= self.neighbors.len() {
            return;
        }
        if !self.neighbors[a].contains(&b) {
            self.neighbors[a].push(b);
            self.neighbors[b].push(a);
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        self.neighbors.get(v).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Vertices reachable from `seeds`, seeds first, then in discovery order.
///
/// `neighbors` yields the adjacent vertices of a vertex; indices at or above
/// `vertex_count` are ignored. Duplicate seeds are visited once.
pub fn connected_component<F, I>(vertex_count: usize, seeds: &[usize], neighbors: F) -> Vec<usize>
where
    F: Fn(usize) -> I,
    I: IntoIterator<Item = usize>,
{
    let mut visited = vec![false; vertex_count];
    let mut order = Vec::new();
    let mut queue = VecDeque::new();
    for &s in seeds {
        if s < vertex_count && !visited[s] {
            visited[s] = true;
            order.push(s);
            queue.push_back(s);
        }
    }
    while let Some(v) = queue.pop_front() {
        for n in neighbors(v) {
            if n < vertex_count && !visited[n] {
                visited[n] = true;
                order.push(n);
                queue.push_back(n);
            }
        }
    }
    debug!(
        "traverse: {} seed(s) reached {} of {} vertices",
        seeds.len(),
        order.len(),
        vertex_count
    );
    order
}

impl Adjacency {
    /// [`connected_component`] over this adjacency.
    pub fn component(&self, seeds: &[usize]) -> Vec<usize> {
        connected_component(self.vertex_count(), seeds, |v| {
            self.neighbors(v).iter().copied()
        })
    }
}
