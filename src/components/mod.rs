//! Value types and per-effect state.
//!
//! Submodules overview:
//! - [`animationinstance`] – one playing two-layer effect and its lifecycle
//! - [`facing`] – eight-way facing and its sprite angle
//! - [`layer`] – per-layer frame timer and loop countdown
//! - [`mapposition`] – world position and tile location
//! - [`rotation`] – rotation angle and point rotation
//! - [`sprite`] – sprite-sheet frame rectangles
//! - [`tint`] – RGBA color

pub mod animationinstance;
pub mod facing;
pub mod layer;
pub mod mapposition;
pub mod rotation;
pub mod sprite;
pub mod tint;
