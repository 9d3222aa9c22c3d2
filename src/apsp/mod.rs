//! All-pairs shortest paths over dense distance matrices.

pub mod floyd_warshall;

pub use floyd_warshall::{all_pairs_shortest_paths, init_distances, relax};
