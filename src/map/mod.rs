//! This module encapsulates the maze layout and the rules for placing entities within it.
pub mod builder;
pub mod placement;
