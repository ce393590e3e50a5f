//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Move generation node counts against known positions
//! - `draw.rs` - Draw detection (50-move, insufficient material, stalemate)
//! - `edge_cases.rs` - Special positions and edge cases
//! - `proptest.rs` - Property-based tests
