//! ECS resources and the collaborators effects talk to.
//!
//! Overview
//! - `animationstore` – shared, immutable effect definitions
//! - `audio` – positional sound handles and the bridge to the audio thread
//! - `playbackconfig` – INI-backed settings for the driver
//! - `registry` – the locked set of live effects
//! - `renderqueue` – sprite and light commands recorded per frame
//! - `texturestore` – texture sizes keyed by category and name
//! - `worldtime` – millisecond clocks
pub mod animationstore;
pub mod audio;
pub mod playbackconfig;
pub mod registry;
pub mod renderqueue;
pub mod texturestore;
pub mod worldtime;
