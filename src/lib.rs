//! fxplayer library.
//!
//! Playback of two-layer sprite-sheet effects: frame timing and looping,
//! rotation-aware light projection, positional sound, and a shared registry
//! of live effects driven by bevy_ecs systems.

pub mod components;
pub mod events;
pub mod resources;
pub mod systems;
