//! Snapshot-and-restore pause across the world pool and ambience beds.
//!
//! Pause policy: world channels and ambience beds are paused; UI channels
//! stay live so menu interaction keeps its feedback sounds while the game is
//! paused.

use crate::ambience::AmbienceChannel;
use crate::pool::{ChannelId, ChannelPool};

/// Captures the exact subset of playing channels at `pause_all` and restores
/// it at the matching `unpause_all`. Owns no channels itself.
#[derive(Default)]
pub struct PauseCoordinator {
    paused: Option<Vec<ChannelId>>,
}

impl PauseCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True between a `pause_all` and its matching `unpause_all`.
    pub fn is_paused(&self) -> bool {
        self.paused.is_some()
    }

    /// Pauses every currently-playing world channel and records the set;
    /// ambience beds are paused unconditionally. Returns how many pooled
    /// channels were captured.
    pub fn pause_all(
        &mut self,
        world: &mut ChannelPool,
        ambience: &mut [AmbienceChannel],
    ) -> usize {
        if self.paused.is_some() {
            log::debug!("pause_all while already paused; replacing the captured set");
        }

        let mut captured = Vec::new();
        for (id, channel) in world.iter_mut() {
            if channel.is_playing() {
                channel.pause();
                captured.push(id);
            }
        }
        for bed in ambience.iter_mut() {
            bed.pause();
        }

        let count = captured.len();
        self.paused = Some(captured);
        log::debug!("paused {count} world channels");
        count
    }

    /// Resumes exactly the captured set and clears it; ambience beds are
    /// resumed unconditionally. Without a prior `pause_all` this is a logged
    /// no-op for the pools (callers must pair the calls).
    pub fn unpause_all(
        &mut self,
        world: &mut ChannelPool,
        ambience: &mut [AmbienceChannel],
    ) -> usize {
        let count = match self.paused.take() {
            Some(captured) => {
                let count = captured.len();
                for id in captured {
                    world.channel_mut(id).resume();
                }
                count
            }
            None => {
                log::warn!("unpause_all without a matching pause_all");
                0
            }
        };

        for bed in ambience.iter_mut() {
            bed.resume();
        }
        count
    }
}
