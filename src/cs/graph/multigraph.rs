use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::cs::error::{InvalidInput, Result};

/// Vertex identifier, unique within a graph.
pub type Vertex = usize;

/// Neighbour -> number of parallel edges.
pub type Adjacency = BTreeMap<Vertex, usize>;

/// An undirected multigraph stored as symmetric adjacency maps.
///
/// Every undirected edge `{u, v}` with `k` parallel copies appears twice:
/// as `k` under `u -> v` and as `k` under `v -> u`. Ordered maps keep
/// iteration, and therefore seeded contraction runs, reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Multigraph {
    adjacency: BTreeMap<Vertex, Adjacency>,
}

impl Multigraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from raw adjacency maps without checking them.
    ///
    /// Use [`Multigraph::validate`] before handing the result to the contractor;
    /// loaders that read one direction at a time rely on this to report
    /// asymmetric input instead of silently repairing it.
    pub fn from_adjacency(adjacency: BTreeMap<Vertex, Adjacency>) -> Self {
        Self { adjacency }
    }

    /// Builds a graph from an undirected edge list. Repeated pairs become
    /// parallel edges.
    pub fn from_edges(edges: &[(Vertex, Vertex)]) -> Self {
        edges.iter().copied().collect()
    }

    /// Adds a vertex with no edges. Does nothing if it already exists.
    pub fn add_vertex(&mut self, v: Vertex) {
        self.adjacency.entry(v).or_default();
    }

    /// Adds one undirected edge between `u` and `v`, creating the vertices
    /// as needed. Adding an existing pair increases its multiplicity.
    ///
    /// # Panics
    /// - if `u == v`; self-loops never contribute to a cut.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex) {
        self.add_edges(u, v, 1);
    }

    /// Adds `count` parallel edges between `u` and `v`.
    ///
    /// # Panics
    /// - if `u == v`.
    pub fn add_edges(&mut self, u: Vertex, v: Vertex, count: usize) {
        assert_ne!(u, v, "self-loop on vertex {}", u);
        if count == 0 {
            self.add_vertex(u);
            self.add_vertex(v);
            return;
        }
        *self.adjacency.entry(u).or_default().entry(v).or_insert(0) += count;
        *self.adjacency.entry(v).or_default().entry(u).or_insert(0) += count;
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges, counting parallel copies.
    pub fn num_edges(&self) -> usize {
        self.adjacency
            .values()
            .map(|nbrs| nbrs.values().sum::<usize>())
            .sum::<usize>()
            / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn contains_vertex(&self, v: Vertex) -> bool {
        self.adjacency.contains_key(&v)
    }

    /// Vertices in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.adjacency.keys().copied()
    }

    /// Vertices with their adjacency maps, in ascending vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (Vertex, &Adjacency)> + '_ {
        self.adjacency.iter().map(|(&v, nbrs)| (v, nbrs))
    }

    /// Neighbours of `v` with their multiplicities, or `None` if `v` is absent.
    pub fn neighbors(&self, v: Vertex) -> Option<&Adjacency> {
        self.adjacency.get(&v)
    }

    /// Number of parallel edges recorded under `u -> v`.
    pub fn multiplicity(&self, u: Vertex, v: Vertex) -> usize {
        self.adjacency
            .get(&u)
            .and_then(|nbrs| nbrs.get(&v))
            .copied()
            .unwrap_or(0)
    }

    /// Total multiplicity of the edges incident to `v`.
    pub fn degree(&self, v: Vertex) -> usize {
        self.adjacency
            .get(&v)
            .map_or(0, |nbrs| nbrs.values().sum())
    }

    /// Checks every precondition of the contraction algorithm: at least two
    /// vertices, no self-loops, positive multiplicities, symmetric adjacency
    /// and connectivity.
    pub fn validate(&self) -> Result<()> {
        let n = self.adjacency.len();
        if n < 2 {
            return Err(InvalidInput::TooFewVertices { found: n }.into());
        }
        self.check_entries()?;
        self.check_connected()?;
        Ok(())
    }

    fn check_entries(&self) -> std::result::Result<(), InvalidInput> {
        for (&u, nbrs) in &self.adjacency {
            for (&v, &forward) in nbrs {
                if u == v {
                    return Err(InvalidInput::SelfLoop(u));
                }
                if forward == 0 {
                    return Err(InvalidInput::ZeroMultiplicity { u, v });
                }
                let backward = self.multiplicity(v, u);
                if forward != backward {
                    return Err(InvalidInput::Asymmetric {
                        u,
                        v,
                        forward,
                        backward,
                    });
                }
            }
        }
        Ok(())
    }

    /// Breadth-first search from the smallest vertex.
    fn check_connected(&self) -> std::result::Result<(), InvalidInput> {
        let total = self.adjacency.len();
        let Some(&root) = self.adjacency.keys().next() else {
            return Ok(());
        };
        let mut seen = BTreeSet::from([root]);
        let mut queue = VecDeque::from([root]);
        while let Some(u) = queue.pop_front() {
            for &v in self.adjacency.get(&u).into_iter().flat_map(|nbrs| nbrs.keys()) {
                if seen.insert(v) {
                    queue.push_back(v);
                }
            }
        }
        let reached = seen.len();
        if reached == total {
            Ok(())
        } else {
            Err(InvalidInput::Disconnected { reached, total })
        }
    }

    pub(crate) fn adjacency_mut(&mut self) -> &mut BTreeMap<Vertex, Adjacency> {
        &mut self.adjacency
    }
}

impl FromIterator<(Vertex, Vertex)> for Multigraph {
    fn from_iter<I: IntoIterator<Item = (Vertex, Vertex)>>(iter: I) -> Self {
        let mut graph = Multigraph::new();
        for (u, v) in iter {
            graph.add_edge(u, v);
        }
        graph
    }
}
