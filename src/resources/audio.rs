//! Positional sounds and the bridge to the audio thread.
//!
//! An effect owns at most one [`MapSound`], created through a
//! [`SoundFactory`]. The shipped factory, [`ChannelSoundFactory`], turns every
//! call into an [`AudioCmd`] on a `crossbeam_channel`, so the effect never
//! touches the audio device itself.
//!
//! Use [`setup_audio`] once during initialization to spawn the audio thread
//! and insert the [`AudioBridge`] resource. Call [`shutdown_audio`] during
//! teardown to stop the thread.

use std::sync::atomic::{AtomicU64, Ordering};

use bevy_ecs::prelude::*;
use crossbeam_channel::{Sender, unbounded};

use crate::events::audio::{AudioCmd, SoundHandleId};
use crate::systems::audio::{AudioStats, audio_thread};

/// A sound placed on the map.
///
/// Exclusively owned by one effect. `stop` releases the sound; implementations
/// must tolerate it being called once and then dropped. `update` is called
/// once per tick while the owning effect is live.
pub trait MapSound: Send {
    fn update(&mut self);
    fn stop(&mut self);
    fn update_position(&mut self, tile_x: i32, tile_y: i32, map_id: i32);
}

pub trait SoundFactory {
    /// Start `id` at the given map location. `None` when nothing could be played.
    fn create_map_sound(
        &self,
        id: &str,
        tile_x: i32,
        tile_y: i32,
        map_id: i32,
        looped: bool,
        distance: i32,
    ) -> Option<Box<dyn MapSound>>;
}

/// Factory that never plays anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSoundFactory;

impl SoundFactory for SilentSoundFactory {
    fn create_map_sound(&self, _: &str, _: i32, _: i32, _: i32, _: bool, _: i32) -> Option<Box<dyn MapSound>> {
        None
    }
}

/// Factory that forwards sound commands to the audio thread.
#[derive(Debug)]
pub struct ChannelSoundFactory {
    tx_cmd: Sender<AudioCmd>,
    next_handle: AtomicU64,
}

impl ChannelSoundFactory {
    pub fn new(tx_cmd: Sender<AudioCmd>) -> Self {
        Self {
            tx_cmd,
            next_handle: AtomicU64::new(1),
        }
    }
}

impl SoundFactory for ChannelSoundFactory {
    fn create_map_sound(
        &self,
        id: &str,
        tile_x: i32,
        tile_y: i32,
        map_id: i32,
        looped: bool,
        distance: i32,
    ) -> Option<Box<dyn MapSound>> {
        let handle = self.next_handle.fetch_add(1, Ordering::Relaxed);
        self.tx_cmd
            .send(AudioCmd::PlayMapSound {
                handle,
                id: id.to_string(),
                tile_x,
                tile_y,
                map_id,
                looped,
                distance,
            })
            .ok()?;
        Some(Box::new(ChannelMapSound {
            handle,
            tx_cmd: self.tx_cmd.clone(),
            stopped: false,
        }))
    }
}

/// Sound handle backed by the audio command channel.
///
/// Dropping an unstopped handle stops the sound.
#[derive(Debug)]
pub struct ChannelMapSound {
    handle: SoundHandleId,
    tx_cmd: Sender<AudioCmd>,
    stopped: bool,
}

impl MapSound for ChannelMapSound {
    fn update(&mut self) {
        if self.stopped {
            return;
        }
        let _ = self.tx_cmd.send(AudioCmd::RefreshMapSound {
            handle: self.handle,
        });
    }

    fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        // ignore send error on shutdown
        let _ = self.tx_cmd.send(AudioCmd::StopMapSound {
            handle: self.handle,
        });
    }

    fn update_position(&mut self, tile_x: i32, tile_y: i32, map_id: i32) {
        if self.stopped {
            return;
        }
        let _ = self.tx_cmd.send(AudioCmd::UpdateMapSound {
            handle: self.handle,
            tile_x,
            tile_y,
            map_id,
        });
    }
}

impl Drop for ChannelMapSound {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Shared bridge between the ECS world and the audio thread.
#[derive(Resource)]
pub struct AudioBridge {
    pub sounds: ChannelSoundFactory,
    /// Sender for raw [`AudioCmd`] messages (ECS -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
    /// Join handle for the background audio thread.
    pub handle: std::thread::JoinHandle<AudioStats>,
}

/// Spawn the audio thread and register the [`AudioBridge`] resource.
pub fn setup_audio(world: &mut World) {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let handle = std::thread::spawn(move || audio_thread(rx_cmd));

    world.insert_resource(AudioBridge {
        sounds: ChannelSoundFactory::new(tx_cmd.clone()),
        tx_cmd,
        handle,
    });
}

/// Gracefully request shutdown of the audio thread and join it.
///
/// Returns the thread's final statistics when the bridge existed.
pub fn shutdown_audio(world: &mut World) -> Option<AudioStats> {
    let bridge = world.remove_resource::<AudioBridge>()?;
    let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
    bridge.handle.join().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::Receiver;

    fn factory() -> (ChannelSoundFactory, Receiver<AudioCmd>) {
        let (tx, rx) = unbounded();
        (ChannelSoundFactory::new(tx), rx)
    }

    #[test]
    fn test_create_sends_play() {
        let (factory, rx) = factory();
        let sound = factory.create_map_sound("fire", 0, 0, 0, true, 12);
        assert!(sound.is_some());
        assert_eq!(
            rx.try_recv().unwrap(),
            AudioCmd::PlayMapSound {
                handle: 1,
                id: "fire".to_string(),
                tile_x: 0,
                tile_y: 0,
                map_id: 0,
                looped: true,
                distance: 12,
            }
        );
    }

    #[test]
    fn test_handles_are_unique() {
        let (factory, rx) = factory();
        let _a = factory.create_map_sound("a", 0, 0, 0, false, 12);
        let _b = factory.create_map_sound("b", 0, 0, 0, false, 12);
        let handles: Vec<_> = rx
            .try_iter()
            .filter_map(|cmd| match cmd {
                AudioCmd::PlayMapSound { handle, .. } => Some(handle),
                _ => None,
            })
            .collect();
        assert_eq!(handles, vec![1, 2]);
    }

    #[test]
    fn test_stop_is_sent_once() {
        let (factory, rx) = factory();
        let mut sound = factory.create_map_sound("fire", 0, 0, 0, true, 12).unwrap();
        sound.stop();
        sound.stop();
        sound.update_position(1, 2, 3);
        sound.update();
        drop(sound);
        let stops = rx
            .try_iter()
            .filter(|cmd| matches!(cmd, AudioCmd::StopMapSound { .. }))
            .count();
        assert_eq!(stops, 1);
    }

    #[test]
    fn test_stopped_sound_sends_nothing_more() {
        let (factory, rx) = factory();
        let mut sound = factory.create_map_sound("fire", 0, 0, 0, true, 12).unwrap();
        sound.stop();
        sound.update();
        sound.update_position(1, 2, 3);
        let cmds: Vec<_> = rx.try_iter().skip(1).collect();
        assert_eq!(cmds, vec![AudioCmd::StopMapSound { handle: 1 }]);
    }

    #[test]
    fn test_update_sends_refresh() {
        let (factory, rx) = factory();
        let mut sound = factory.create_map_sound("fire", 0, 0, 0, true, 12).unwrap();
        sound.update();
        sound.update();
        let refreshes = rx
            .try_iter()
            .filter(|cmd| *cmd == AudioCmd::RefreshMapSound { handle: 1 })
            .count();
        assert_eq!(refreshes, 2);
    }

    #[test]
    fn test_drop_stops_sound() {
        let (factory, rx) = factory();
        let sound = factory.create_map_sound("fire", 0, 0, 0, true, 12).unwrap();
        drop(sound);
        let cmds: Vec<_> = rx.try_iter().collect();
        assert_eq!(cmds.last(), Some(&AudioCmd::StopMapSound { handle: 1 }));
    }

    #[test]
    fn test_update_position_is_forwarded() {
        let (factory, rx) = factory();
        let mut sound = factory.create_map_sound("fire", 0, 0, 0, true, 12).unwrap();
        sound.update_position(4, 5, 6);
        let cmds: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            cmds[1],
            AudioCmd::UpdateMapSound {
                handle: 1,
                tile_x: 4,
                tile_y: 5,
                map_id: 6,
            }
        );
    }

    #[test]
    fn test_create_fails_when_receiver_gone() {
        let (factory, rx) = factory();
        drop(rx);
        assert!(factory.create_map_sound("fire", 0, 0, 0, true, 12).is_none());
    }

    #[test]
    fn test_silent_factory_plays_nothing() {
        assert!(SilentSoundFactory.create_map_sound("fire", 0, 0, 0, true, 12).is_none());
    }

    #[test]
    fn test_setup_and_shutdown_audio() {
        let mut world = World::new();
        setup_audio(&mut world);
        {
            let bridge = world.resource::<AudioBridge>();
            let mut sound = bridge.sounds.create_map_sound("fire", 0, 0, 0, true, 12).unwrap();
            sound.stop();
        }
        let stats = shutdown_audio(&mut world).unwrap();
        assert_eq!(stats.started, 1);
        assert_eq!(stats.stopped, 1);
        assert!(!world.contains_resource::<AudioBridge>());
    }
}
