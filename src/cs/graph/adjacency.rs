//! Adjacency-list text loader.
//!
//! Each non-empty line holds a vertex id followed by its neighbours,
//! separated by tabs or spaces:
//!
//! ```text
//! 1	2	3	3
//! 2	1
//! 3	1	1
//! ```
//!
//! A neighbour listed `k` times is `k` parallel edges. Every edge must be
//! listed from both ends with the same count; the loader does not repair
//! one-sided entries, [`Multigraph::validate`] reports them instead.
//! Lines starting with `#` are ignored.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::debug;

use crate::cs::error::{Error, Result};
use crate::cs::graph::multigraph::{Adjacency, Multigraph, Vertex};

fn parse_vertex(token: &str, line: usize) -> Result<Vertex> {
    token.parse().map_err(|_| Error::Parse {
        line,
        message: format!("invalid vertex id {:?}", token),
    })
}

fn parse_line(text: &str, line: usize) -> Result<Option<(Vertex, Adjacency)>> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }
    let mut tokens = text.split_whitespace();
    let vertex = match tokens.next() {
        Some(token) => parse_vertex(token, line)?,
        None => return Ok(None),
    };
    let mut nbrs = Adjacency::new();
    for token in tokens {
        *nbrs.entry(parse_vertex(token, line)?).or_insert(0) += 1;
    }
    Ok(Some((vertex, nbrs)))
}

/// Parses adjacency-list text into a multigraph.
///
/// Fails with [`Error::Parse`] on non-numeric tokens or a vertex that heads
/// more than one line. The result is not validated.
pub fn parse_adjacency_list(text: &str) -> Result<Multigraph> {
    read_adjacency_list(text.as_bytes())
}

/// Reads adjacency-list text from any reader.
pub fn read_adjacency_list<R: Read>(reader: R) -> Result<Multigraph> {
    let mut adjacency: BTreeMap<Vertex, Adjacency> = BTreeMap::new();
    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line_no = index + 1;
        let Some((vertex, nbrs)) = parse_line(&line?, line_no)? else {
            continue;
        };
        if adjacency.insert(vertex, nbrs).is_some() {
            return Err(Error::Parse {
                line: line_no,
                message: format!("vertex {} listed more than once", vertex),
            });
        }
    }
    // Neighbours that never head a line still exist as vertices; validation
    // then reports the missing reverse entries.
    let referenced: Vec<Vertex> = adjacency
        .values()
        .flat_map(|nbrs| nbrs.keys().copied())
        .filter(|v| !adjacency.contains_key(v))
        .collect();
    for v in referenced {
        adjacency.entry(v).or_default();
    }
    Ok(Multigraph::from_adjacency(adjacency))
}

/// Loads an adjacency-list file.
pub fn load_adjacency_list<P: AsRef<Path>>(path: P) -> Result<Multigraph> {
    let path = path.as_ref();
    let graph = read_adjacency_list(File::open(path)?)?;
    debug!(
        "loaded {}: {} vertices, {} edges",
        path.display(),
        graph.num_vertices(),
        graph.num_edges()
    );
    Ok(graph)
}
