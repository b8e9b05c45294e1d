//! **card_mazes** generates perfect mazes and draws them in decorative wall styles for printable
//! greeting cards.
//!
//! A maze is carved by one of the `generators` into a `grid::WallGrid`, then painted onto any
//! `canvas::Canvas` by a wall style from `renderers`.

pub mod canvas;
pub mod cells;
pub mod colour;
pub mod config;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod occupancy;
pub mod pathing;
pub mod renderers;
pub mod union_find;
pub mod units;
mod utils;
