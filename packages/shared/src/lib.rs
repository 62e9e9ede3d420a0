//! Shared utilities for the Utsushie slideshow server.

pub mod logger;
pub mod random;
pub mod time;
