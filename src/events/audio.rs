//! Commands sent to the audio backend.

/// Identifies one playing positional sound.
pub type SoundHandleId = u64;

/// Commands sent *to* the audio thread
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCmd {
    PlayMapSound {
        handle: SoundHandleId,
        id: String,
        tile_x: i32,
        tile_y: i32,
        map_id: i32,
        looped: bool,
        distance: i32,
    },
    UpdateMapSound {
        handle: SoundHandleId,
        tile_x: i32,
        tile_y: i32,
        map_id: i32,
    },
    /// Per-frame refresh so the backend can recompute volume and falloff.
    RefreshMapSound {
        handle: SoundHandleId,
    },
    StopMapSound {
        handle: SoundHandleId,
    },
    Shutdown,
}
