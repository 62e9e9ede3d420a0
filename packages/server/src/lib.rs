//! Shared slideshow server library.
//!
//! Viewers attach to a room identified by a folder path and see a synchronized,
//! rotating sequence of pictures drawn from a large backing collection. Only a
//! bounded window of each folder is kept in memory.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
