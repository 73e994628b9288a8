//! Per-layer playback state.
//!
//! An effect has two independently timed layers, drawn in different passes.
//! Each [`LayerState`] advances one frame every `frame_speed_ms` and counts
//! playthroughs down from the definition's `loop_count`.
//!
//! # Loop counting
//!
//! `loops_remaining` starts at `loop_count` and is decremented each time the
//! frame index wraps. The layer only finishes when the counter drops *below*
//! zero, so a `loop_count` of `N` plays `N + 1` full passes. With infinite
//! looping the counter is reset instead and the layer never finishes.

use crate::resources::animationstore::LayerDefinition;

/// Which of the two layers of an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerId {
    Lower,
    Upper,
}

impl LayerId {
    pub const ALL: [LayerId; 2] = [LayerId::Lower, LayerId::Upper];

    pub fn index(self) -> usize {
        match self {
            LayerId::Lower => 0,
            LayerId::Upper => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerPhase {
    Playing,
    /// Terminal. A finished layer is never drawn and never advances again.
    Finished,
}

/// What a single [`LayerState::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerTick {
    /// Not due yet, or already finished.
    Idle,
    Advanced,
    /// Advanced past the last frame and started another pass.
    Wrapped,
    /// Advanced past the last frame with no loops left.
    Finished,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayerState {
    pub frame_index: u32,
    pub loops_remaining: i32,
    /// Clock time (ms) at which the next frame is due.
    pub next_advance_at: u64,
    pub phase: LayerPhase,
}

impl LayerState {
    /// Fresh state for `definition`, first advance due one frame after `now`.
    pub fn new(definition: &LayerDefinition, now: u64) -> Self {
        Self {
            frame_index: 0,
            loops_remaining: definition.loop_count,
            next_advance_at: now.saturating_add(definition.frame_speed_ms),
            phase: LayerPhase::Playing,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == LayerPhase::Playing
    }

    /// Advance at most one frame if the layer is due at `now`.
    pub fn tick(&mut self, definition: &LayerDefinition, now: u64, infinite: bool) -> LayerTick {
        if !self.is_playing() || now < self.next_advance_at {
            return LayerTick::Idle;
        }

        let mut result = LayerTick::Advanced;
        self.frame_index += 1;
        if self.frame_index >= definition.frame_count {
            self.frame_index = 0;
            self.loops_remaining -= 1;
            result = LayerTick::Wrapped;
            if self.loops_remaining < 0 {
                if infinite {
                    self.loops_remaining = definition.loop_count;
                } else {
                    self.phase = LayerPhase::Finished;
                    result = LayerTick::Finished;
                }
            }
        }
        // re-armed from `now`, not from the missed deadline
        self.next_advance_at = now.saturating_add(definition.frame_speed_ms);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(frame_count: u32, frame_speed_ms: u64, loop_count: i32) -> LayerDefinition {
        LayerDefinition {
            frame_count,
            frame_speed_ms,
            loop_count,
            ..Default::default()
        }
    }

    /// Tick at every frame boundary until the layer finishes, counting wraps.
    fn passes_until_finished(def: &LayerDefinition, limit: u32) -> Option<u32> {
        let mut state = LayerState::new(def, 0);
        let mut passes = 0;
        let mut now = 0;
        for _ in 0..limit {
            now += def.frame_speed_ms;
            match state.tick(def, now, false) {
                LayerTick::Wrapped => passes += 1,
                LayerTick::Finished => return Some(passes + 1),
                _ => {}
            }
        }
        None
    }

    #[test]
    fn test_new_schedules_first_advance() {
        let def = layer(4, 100, 2);
        let state = LayerState::new(&def, 1_000);
        assert_eq!(state.frame_index, 0);
        assert_eq!(state.loops_remaining, 2);
        assert_eq!(state.next_advance_at, 1_100);
        assert!(state.is_playing());
    }

    #[test]
    fn test_tick_before_deadline_is_idle() {
        let def = layer(4, 100, 0);
        let mut state = LayerState::new(&def, 0);
        assert_eq!(state.tick(&def, 99, false), LayerTick::Idle);
        assert_eq!(state.frame_index, 0);
        assert_eq!(state.next_advance_at, 100);
    }

    #[test]
    fn test_tick_at_deadline_advances_and_rearms() {
        let def = layer(4, 100, 0);
        let mut state = LayerState::new(&def, 0);
        assert_eq!(state.tick(&def, 100, false), LayerTick::Advanced);
        assert_eq!(state.frame_index, 1);
        assert_eq!(state.next_advance_at, 200);
    }

    #[test]
    fn test_late_tick_rearms_from_now() {
        let def = layer(4, 100, 0);
        let mut state = LayerState::new(&def, 0);
        state.tick(&def, 250, false);
        assert_eq!(state.frame_index, 1);
        assert_eq!(state.next_advance_at, 350);
    }

    #[test]
    fn test_zero_loops_plays_once() {
        let def = layer(4, 100, 0);
        let mut state = LayerState::new(&def, 0);
        for t in [100, 200, 300] {
            assert_eq!(state.tick(&def, t, false), LayerTick::Advanced);
        }
        assert_eq!(state.tick(&def, 400, false), LayerTick::Finished);
        assert_eq!(state.phase, LayerPhase::Finished);
        assert_eq!(state.frame_index, 0);
        assert_eq!(state.loops_remaining, -1);
    }

    #[test]
    fn test_loop_count_n_plays_n_plus_one_passes() {
        for n in 0..5 {
            let def = layer(3, 50, n);
            assert_eq!(passes_until_finished(&def, 1_000), Some(n as u32 + 1));
        }
    }

    #[test]
    fn test_finished_layer_stays_finished() {
        let def = layer(1, 10, 0);
        let mut state = LayerState::new(&def, 0);
        assert_eq!(state.tick(&def, 10, false), LayerTick::Finished);
        assert_eq!(state.tick(&def, 1_000, false), LayerTick::Idle);
        assert_eq!(state.frame_index, 0);
        assert_eq!(state.phase, LayerPhase::Finished);
    }

    #[test]
    fn test_infinite_resets_loop_counter() {
        let def = layer(2, 10, 1);
        let mut state = LayerState::new(&def, 0);
        let mut now = 0;
        for _ in 0..100 {
            now += 10;
            let tick = state.tick(&def, now, true);
            assert_ne!(tick, LayerTick::Finished);
            assert!(state.is_playing());
            assert!(state.loops_remaining >= 0);
            assert!(state.frame_index < def.frame_count);
        }
        // 100 advances over 2 frames = 50 wraps; counter cycles 1, 0, reset to 1
        assert_eq!(state.loops_remaining, 1);
    }

    #[test]
    fn test_frame_index_stays_in_range() {
        let def = layer(5, 7, 3);
        let mut state = LayerState::new(&def, 0);
        for now in 0..500 {
            state.tick(&def, now, false);
            assert!(state.frame_index < def.frame_count);
        }
    }
}
