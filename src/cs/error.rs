//! Error types shared by the graph routines.

use thiserror::Error;

use crate::cs::graph::Vertex;

/// Result type for graph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a graph is rejected before contraction starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    /// Fewer than two vertices, so no cut exists
    #[error("graph has {found} vertices, at least 2 are required")]
    TooFewVertices { found: usize },

    /// `u -> v` and `v -> u` disagree on the number of parallel edges
    #[error("asymmetric adjacency: {u}->{v} has multiplicity {forward}, {v}->{u} has {backward}")]
    Asymmetric {
        u: Vertex,
        v: Vertex,
        forward: usize,
        backward: usize,
    },

    /// A vertex lists itself as a neighbour
    #[error("self-loop on vertex {0}")]
    SelfLoop(Vertex),

    /// An adjacency entry is present with multiplicity zero
    #[error("zero multiplicity entry {u}->{v}")]
    ZeroMultiplicity { u: Vertex, v: Vertex },

    /// Not every vertex is reachable from the first one
    #[error("graph is disconnected: reached {reached} of {total} vertices")]
    Disconnected { reached: usize, total: usize },
}

/// Errors that can occur while loading graphs or estimating cuts
#[derive(Error, Debug)]
pub enum Error {
    /// The graph does not satisfy the contraction preconditions
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// Malformed adjacency-list text
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Invalid driver parameter
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the validation failure if this is an input error.
    pub fn invalid_input(&self) -> Option<&InvalidInput> {
        match self {
            Error::InvalidInput(reason) => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err: Error = InvalidInput::TooFewVertices { found: 1 }.into();
        assert_eq!(
            err.to_string(),
            "invalid input: graph has 1 vertices, at least 2 are required"
        );

        let err = Error::Parse {
            line: 3,
            message: "bad token".to_string(),
        };
        assert_eq!(err.to_string(), "parse error on line 3: bad token");
    }

    #[test]
    fn test_invalid_input_accessor() {
        let err: Error = InvalidInput::SelfLoop(4).into();
        assert_eq!(err.invalid_input(), Some(&InvalidInput::SelfLoop(4)));

        let err = Error::InvalidParameter("trials must be positive".to_string());
        assert!(err.invalid_input().is_none());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
