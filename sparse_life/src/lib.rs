//! Sparse, incrementally counted Conway's Game of Life (B3/S23) on an
//! unbounded integer lattice.

pub mod grid;

pub use grid::{Cell, Coord, SparseGrid, StepStats, next_state};
