//! Headless audio backend.
//!
//! [`audio_thread`] runs on its own OS thread and consumes
//! [`AudioCmd`](crate::events::audio::AudioCmd) messages. Device output is
//! outside this crate; the thread tracks which map sounds are live, logs the
//! traffic and reports totals when it shuts down, which is what the headless
//! driver and the tests need.
//!
//! The thread must be created via
//! [`crate::resources::audio::setup_audio`] and terminated via
//! [`crate::resources::audio::shutdown_audio`].

use crossbeam_channel::Receiver;
use log::{debug, trace, warn};
use rustc_hash::FxHashMap;

use crate::events::audio::{AudioCmd, SoundHandleId};

/// Totals reported when the audio thread exits.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AudioStats {
    pub started: usize,
    pub stopped: usize,
    pub moved: usize,
    /// Per-frame refreshes of live sounds.
    pub refreshed: usize,
    /// Sounds still live at shutdown.
    pub leaked: usize,
}

#[derive(Debug)]
struct LiveSound {
    id: String,
    tile_x: i32,
    tile_y: i32,
    map_id: i32,
}

/// Entry point of the dedicated audio thread.
///
/// Blocks on the command channel until it receives [`AudioCmd::Shutdown`] or
/// every sender is gone.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>) -> AudioStats {
    debug!("[audio] thread starting (id={:?})", std::thread::current().id());

    let mut live: FxHashMap<SoundHandleId, LiveSound> = FxHashMap::default();
    let mut stats = AudioStats::default();

    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::PlayMapSound {
                handle,
                id,
                tile_x,
                tile_y,
                map_id,
                looped,
                distance,
            } => {
                debug!(
                    "[audio] play handle={} id='{}' at ({}, {}) map={} looped={} distance={}",
                    handle, id, tile_x, tile_y, map_id, looped, distance
                );
                stats.started += 1;
                live.insert(
                    handle,
                    LiveSound {
                        id,
                        tile_x,
                        tile_y,
                        map_id,
                    },
                );
            }
            AudioCmd::UpdateMapSound {
                handle,
                tile_x,
                tile_y,
                map_id,
            } => match live.get_mut(&handle) {
                Some(sound) => {
                    sound.tile_x = tile_x;
                    sound.tile_y = tile_y;
                    sound.map_id = map_id;
                    stats.moved += 1;
                }
                None => warn!("[audio] update for unknown handle={}", handle),
            },
            AudioCmd::RefreshMapSound { handle } => {
                if live.contains_key(&handle) {
                    stats.refreshed += 1;
                } else {
                    trace!("[audio] refresh for unknown handle={}", handle);
                }
            }
            AudioCmd::StopMapSound { handle } => match live.remove(&handle) {
                Some(sound) => {
                    debug!(
                        "[audio] stop handle={} id='{}' last at ({}, {}) map={}",
                        handle, sound.id, sound.tile_x, sound.tile_y, sound.map_id
                    );
                    stats.stopped += 1;
                }
                None => warn!("[audio] stop for unknown handle={}", handle),
            },
            AudioCmd::Shutdown => break,
        }
    }

    stats.leaked = live.len();
    if stats.leaked > 0 {
        warn!("[audio] {} sounds still playing at shutdown", stats.leaked);
    }
    debug!("[audio] thread exiting: {:?}", stats);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn play(handle: SoundHandleId) -> AudioCmd {
        AudioCmd::PlayMapSound {
            handle,
            id: "fire".to_string(),
            tile_x: 0,
            tile_y: 0,
            map_id: 0,
            looped: false,
            distance: 12,
        }
    }

    #[test]
    fn test_counts_and_leaks() {
        let (tx, rx) = unbounded();
        tx.send(play(1)).unwrap();
        tx.send(play(2)).unwrap();
        tx.send(AudioCmd::UpdateMapSound {
            handle: 2,
            tile_x: 3,
            tile_y: 4,
            map_id: 1,
        })
        .unwrap();
        tx.send(AudioCmd::RefreshMapSound { handle: 2 }).unwrap();
        tx.send(AudioCmd::RefreshMapSound { handle: 2 }).unwrap();
        tx.send(AudioCmd::StopMapSound { handle: 1 }).unwrap();
        tx.send(AudioCmd::RefreshMapSound { handle: 1 }).unwrap();
        tx.send(AudioCmd::Shutdown).unwrap();
        let stats = audio_thread(rx);
        assert_eq!(
            stats,
            AudioStats {
                started: 2,
                stopped: 1,
                moved: 1,
                refreshed: 2,
                leaked: 1,
            }
        );
    }

    #[test]
    fn test_unknown_handles_are_ignored() {
        let (tx, rx) = unbounded();
        tx.send(AudioCmd::StopMapSound { handle: 9 }).unwrap();
        tx.send(AudioCmd::UpdateMapSound {
            handle: 9,
            tile_x: 0,
            tile_y: 0,
            map_id: 0,
        })
        .unwrap();
        drop(tx);
        let stats = audio_thread(rx);
        assert_eq!(stats, AudioStats::default());
    }
}
