//! Karger's randomized contraction algorithm for the global minimum cut.
//!
//! A single trial contracts uniformly random edges of a multigraph until two
//! super-vertices remain; the parallel edges between them form a cut. One
//! trial finds a minimum cut with probability at least `2 / (n (n - 1))`, so
//! [`karger_min_cut`] repeats independent trials on private copies of the
//! graph and keeps the smallest result.
//!
//! Edges are sampled exactly uniformly, parallel copies included: a start
//! vertex is drawn with probability proportional to its degree, then an end
//! vertex among its neighbours proportional to the edge multiplicity.

use std::collections::BTreeMap;

use log::{debug, trace};
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;

use crate::cs::error::{Error, Result};
use crate::cs::graph::multigraph::{Multigraph, Vertex};

/// Per-vertex total multiplicity, kept in step with the live graph so the
/// start vertex of the next edge can be drawn by degree.
///
/// Slots are fixed at construction; a contracted vertex keeps its slot with
/// weight zero.
#[derive(Debug, Clone)]
struct DegreeTable {
    vertices: Vec<Vertex>,
    slot: BTreeMap<Vertex, usize>,
    degrees: Vec<usize>,
    sampler: WeightedIndex<usize>,
}

impl DegreeTable {
    fn new(graph: &Multigraph) -> Self {
        let vertices: Vec<Vertex> = graph.vertices().collect();
        let slot = vertices.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        let degrees: Vec<usize> = vertices.iter().map(|&v| graph.degree(v)).collect();
        let sampler = WeightedIndex::new(&degrees)
            .expect("a connected graph with two or more vertices has edges");
        Self {
            vertices,
            slot,
            degrees,
            sampler,
        }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vertex {
        self.vertices[self.sampler.sample(rng)]
    }

    fn degree(&self, v: Vertex) -> usize {
        self.slot.get(&v).map_or(0, |&i| self.degrees[i])
    }

    /// Applies new degrees for a handful of vertices.
    fn update(&mut self, changes: &[(Vertex, usize)]) {
        let mut by_slot: Vec<(usize, usize)> = changes
            .iter()
            .map(|&(v, degree)| (self.slot[&v], degree))
            .collect();
        by_slot.sort_unstable();
        for &(i, degree) in &by_slot {
            self.degrees[i] = degree;
        }
        let weights: Vec<(usize, &usize)> = by_slot.iter().map(|(i, d)| (*i, d)).collect();
        if let Err(err) = self.sampler.update_weights(&weights) {
            panic!("degree table lost all weight: {}", err);
        }
    }

    /// Panics unless the in-place patched sampler equals one rebuilt from
    /// the current degrees.
    fn check_sampler(&self) {
        match WeightedIndex::<usize>::new(&self.degrees) {
            Ok(rebuilt) => assert!(
                self.sampler == rebuilt,
                "degree sampler diverged from degree table {:?}",
                self.degrees
            ),
            Err(err) => panic!("degree table has no weight: {}", err),
        }
    }
}

/// A cut found by one trial: its size and the original vertices on each side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cut {
    /// Number of edges crossing the cut, parallel edges counted separately.
    pub size: usize,
    /// The side containing the smallest vertex id, sorted.
    pub left: Vec<Vertex>,
    /// The other side, sorted.
    pub right: Vec<Vertex>,
}

/// Owns the working multigraph of one trial and contracts it.
///
/// The contractor consumes its graph; callers that want to run more trials
/// must hand each one its own clone.
#[derive(Debug, Clone)]
pub struct Contractor {
    graph: Multigraph,
    degrees: DegreeTable,
    members: BTreeMap<Vertex, Vec<Vertex>>,
    contractions: usize,
}

impl Contractor {
    /// Validates `graph` and prepares it for contraction.
    ///
    /// Fails with [`Error::InvalidInput`] if the graph has fewer than two
    /// vertices, is asymmetric, has self-loops or zero multiplicities, or is
    /// disconnected.
    pub fn new(graph: Multigraph) -> Result<Self> {
        graph.validate()?;
        Ok(Self::from_validated(graph))
    }

    pub(crate) fn from_validated(graph: Multigraph) -> Self {
        let degrees = DegreeTable::new(&graph);
        let members = graph.vertices().map(|v| (v, vec![v])).collect();
        Self {
            graph,
            degrees,
            members,
            contractions: 0,
        }
    }

    /// The current (partially contracted) graph.
    pub fn graph(&self) -> &Multigraph {
        &self.graph
    }

    /// Number of super-vertices still alive.
    pub fn num_vertices(&self) -> usize {
        self.graph.num_vertices()
    }

    /// Number of contractions performed so far.
    pub fn contractions(&self) -> usize {
        self.contractions
    }

    /// Original vertices merged into the live vertex `v`.
    pub fn members(&self, v: Vertex) -> Option<&[Vertex]> {
        self.members.get(&v).map(Vec::as_slice)
    }

    /// Draws one edge uniformly at random, parallel copies counted separately.
    pub fn sample_edge<R: Rng + ?Sized>(&self, rng: &mut R) -> (Vertex, Vertex) {
        let start = self.degrees.sample(rng);
        let nbrs = self
            .graph
            .neighbors(start)
            .unwrap_or_else(|| panic!("sampled vertex {} is not live", start));
        let (ends, weights): (Vec<Vertex>, Vec<usize>) =
            nbrs.iter().map(|(&v, &m)| (v, m)).unzip();
        let pick: WeightedIndex<usize> = WeightedIndex::new(&weights)
            .unwrap_or_else(|err| panic!("vertex {} has degree but no edges: {}", start, err));
        (start, ends[pick.sample(rng)])
    }

    /// Samples an edge and contracts it. Returns the contracted pair, or
    /// `None` once only two vertices remain.
    pub fn contract_random_edge<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Option<(Vertex, Vertex)> {
        if self.num_vertices() <= 2 {
            return None;
        }
        let (start, end) = self.sample_edge(rng);
        self.contract_edge(start, end);
        Some((start, end))
    }

    /// Merges `start` into `end`.
    ///
    /// The edges between them are discarded, every other edge of `start` is
    /// redirected to `end` with its multiplicity added onto any existing
    /// `end` edge. Returns the number of discarded parallel edges.
    ///
    /// # Panics
    /// - if `start` and `end` are not adjacent live vertices.
    pub fn contract_edge(&mut self, start: Vertex, end: Vertex) -> usize {
        assert_ne!(start, end, "cannot contract vertex {} into itself", start);
        assert!(
            self.graph.contains_vertex(start) && self.graph.contains_vertex(end),
            "vertex {} or {} is not live",
            start,
            end
        );
        assert!(
            self.graph.multiplicity(start, end) > 0,
            "no edge between {} and {}",
            start,
            end
        );
        let adjacency = self.graph.adjacency_mut();

        let mut moved = adjacency
            .remove(&start)
            .unwrap_or_else(|| panic!("vertex {} is not live", start));
        let discarded = moved
            .remove(&end)
            .unwrap_or_else(|| panic!("no edge between {} and {}", start, end));

        let end_nbrs = adjacency
            .get_mut(&end)
            .unwrap_or_else(|| panic!("vertex {} is not live", end));
        let back = end_nbrs.remove(&start);
        assert_eq!(
            back,
            Some(discarded),
            "asymmetric edge {}-{} during contraction",
            start,
            end
        );
        for (&w, &m) in &moved {
            *end_nbrs.entry(w).or_insert(0) += m;
        }
        let end_degree = end_nbrs.values().sum::<usize>();

        for (&w, &m) in &moved {
            let w_nbrs = adjacency
                .get_mut(&w)
                .unwrap_or_else(|| panic!("neighbour {} of {} is not live", w, start));
            let stale = w_nbrs.remove(&start);
            assert_eq!(stale, Some(m), "asymmetric edge {}-{} during contraction", start, w);
            *w_nbrs.entry(end).or_insert(0) += m;
        }

        self.degrees.update(&[(start, 0), (end, end_degree)]);

        let absorbed = self.members.remove(&start).unwrap_or_default();
        self.members.entry(end).or_default().extend(absorbed);
        self.contractions += 1;

        trace!(
            "contracted {} into {}: discarded {} edges, {} vertices left",
            start,
            end,
            discarded,
            self.graph.num_vertices()
        );
        discarded
    }

    /// Contracts until two vertices remain and returns the resulting cut.
    pub fn run<R: Rng + ?Sized>(mut self, rng: &mut R) -> Cut {
        while self.contract_random_edge(rng).is_some() {
            if cfg!(debug_assertions) {
                self.check_invariants();
            }
        }
        self.into_cut()
    }

    fn into_cut(mut self) -> Cut {
        let survivors: Vec<Vertex> = self.graph.vertices().collect();
        assert_eq!(survivors.len(), 2, "contraction must stop at two vertices");
        let size = self.graph.multiplicity(survivors[0], survivors[1]);

        let mut a = self.members.remove(&survivors[0]).unwrap_or_default();
        let mut b = self.members.remove(&survivors[1]).unwrap_or_default();
        a.sort_unstable();
        b.sort_unstable();
        let (left, right) = if a.first() < b.first() {
            (a, b)
        } else {
            (b, a)
        };
        Cut { size, left, right }
    }

    /// Verifies the working state: symmetric positive multiplicities, no
    /// self-loops, and a degree table matching the live adjacency.
    ///
    /// # Panics
    /// - on any violation. These are programming errors, not input errors.
    pub fn check_invariants(&self) {
        for (v, nbrs) in self.graph.iter() {
            for (&w, &m) in nbrs {
                assert_ne!(v, w, "self-loop on vertex {}", v);
                assert!(m > 0, "non-positive multiplicity {}->{}", v, w);
                assert_eq!(
                    m,
                    self.graph.multiplicity(w, v),
                    "asymmetric multiplicity {}-{}",
                    v,
                    w
                );
            }
            assert_eq!(
                self.degrees.degree(v),
                self.graph.degree(v),
                "degree table diverged for vertex {}",
                v
            );
        }
        for &v in &self.degrees.vertices {
            if !self.graph.contains_vertex(v) {
                assert_eq!(self.degrees.degree(v), 0, "contracted vertex {} kept degree", v);
            }
        }
        self.degrees.check_sampler();
    }
}

/// Runs one contraction trial and returns the size of the cut it finds.
///
/// The graph is consumed; pass a clone to keep the original.
pub fn estimate_min_cut<R: Rng + ?Sized>(graph: Multigraph, rng: &mut R) -> Result<usize> {
    Ok(Contractor::new(graph)?.run(rng).size)
}

/// Configuration for repeated trials.
#[derive(Debug, Clone, Default)]
pub struct KargerConfig {
    trials: Option<usize>,
    seed: Option<u64>,
    parallel: bool,
}

impl KargerConfig {
    /// Defaults: `n²` trials, random seed, sequential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of independent trials.
    pub fn trials(mut self, trials: usize) -> Self {
        self.trials = Some(trials);
        self
    }

    /// Sets the base seed. Trial `i` uses `seed + i`, so the same seed gives
    /// the same best cut whether trials run sequentially or in parallel.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Runs trials on the rayon thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Trials to run for a graph with `num_vertices` vertices.
    pub fn trials_for(&self, num_vertices: usize) -> usize {
        self.trials
            .unwrap_or_else(|| num_vertices.saturating_mul(num_vertices))
    }
}

/// Best cut over a batch of trials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinCutEstimate {
    pub cut: Cut,
    /// Number of trials run.
    pub trials: usize,
    /// Index of the first trial that produced `cut`.
    pub best_trial: usize,
    /// Base seed the trial generators were derived from.
    pub seed: u64,
}

fn trial_rng(seed: u64, trial: usize) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed.wrapping_add(trial as u64))
}

/// Estimates the minimum cut of `graph` by running independent contraction
/// trials and keeping the smallest cut.
///
/// # Arguments
/// - `graph`: The input multigraph. It is validated once and never modified;
///   every trial works on its own clone.
/// - `config`: Trial count, seed and parallelism.
///
/// # Returns
/// The best cut found, or [`Error::InvalidInput`] / [`Error::InvalidParameter`].
pub fn karger_min_cut(graph: &Multigraph, config: &KargerConfig) -> Result<MinCutEstimate> {
    graph.validate()?;
    let trials = config.trials_for(graph.num_vertices());
    if trials == 0 {
        return Err(Error::InvalidParameter(
            "trial count must be positive".to_string(),
        ));
    }
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    debug!(
        "running {} trials on {} vertices / {} edges (seed {}, parallel {})",
        trials,
        graph.num_vertices(),
        graph.num_edges(),
        seed,
        config.parallel
    );

    let run_trial = |trial: usize| {
        let mut rng = trial_rng(seed, trial);
        let cut = Contractor::from_validated(graph.clone()).run(&mut rng);
        (trial, cut)
    };
    let best = if config.parallel {
        (0..trials)
            .into_par_iter()
            .map(run_trial)
            .min_by_key(|(trial, cut)| (cut.size, *trial))
    } else {
        (0..trials)
            .map(run_trial)
            .min_by_key(|(trial, cut)| (cut.size, *trial))
    };
    let (best_trial, cut) =
        best.ok_or_else(|| Error::InvalidParameter("no trials were run".to_string()))?;

    debug!("best cut {} found in trial {}", cut.size, best_trial);
    Ok(MinCutEstimate {
        cut,
        trials,
        best_trial,
        seed,
    })
}
