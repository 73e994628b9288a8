//! Engine systems.
//!
//! Submodules overview
//! - [`animation`] – advance every live effect
//! - [`audio`] – headless audio thread consuming sound commands
//! - [`render`] – lower and upper draw passes
//! - [`time`] – update simulation time

pub mod animation;
pub mod audio;
pub mod render;
pub mod time;
