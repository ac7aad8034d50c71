//! **maze_scad** generates perfect mazes and renders them as text diagrams or as OpenSCAD scripts for 3D printing.

pub mod cells;
pub mod generators;
pub mod grid_traits;
pub mod passages;
pub mod renderers;
pub mod squaregrid;
pub mod units;
mod utils;
