//! Messages exchanged with background threads.
//!
//! Submodules:
//! - [`audio`] – commands for the audio thread
pub mod audio;
