pub mod adjacency;
pub mod karger;
pub mod multigraph;

pub use adjacency::{load_adjacency_list, parse_adjacency_list, read_adjacency_list};
pub use karger::{estimate_min_cut, karger_min_cut, Contractor, Cut, KargerConfig, MinCutEstimate};
pub use multigraph::{Adjacency, Multigraph, Vertex};
