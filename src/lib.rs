//! Randomized contraction (Karger) estimation of the global minimum cut of an
//! undirected multigraph.
//!
//! ```
//! use karger::{karger_min_cut, KargerConfig, Multigraph};
//!
//! // Two triangles joined by a single bridge.
//! let graph = Multigraph::from_edges(&[(1, 2), (2, 3), (3, 1), (4, 5), (5, 6), (6, 4), (3, 4)]);
//! let estimate = karger_min_cut(&graph, &KargerConfig::new().trials(300).seed(1)).unwrap();
//! assert_eq!(estimate.cut.size, 1);
//! ```

pub mod cs;

pub use cs::{error, graph};
pub use error::{Error, Result};
pub use graph::*;
