//! The central API object that owns the whole playback core.
//!
//! `SoundStage` runs on the game's update thread. It owns both channel
//! pools, the banks, the music and reverb controllers, the pause
//! coordinator and the ambience beds, and it is the only way callers reach
//! them: everything is constructed once in [`SoundStage::new`] and wired by
//! explicit references, with no ambient global lookup.
//!
//! # Architecture
//!
//! - **Host engine**: supplies a [`ChannelDeviceFactory`] and a
//!   [`ReverbDevice`]; decodes clips and renders whatever the devices are
//!   told to play.
//! - **This crate**: arbitration and sequencing above that seam — pooling,
//!   request resolution, music preemption, pause snapshots.
//!
//! All timer work (fades, hit intros) happens inside [`SoundStage::tick`],
//! called once per frame with the frame delta.

use crate::ambience::{AmbienceChannel, AmbienceId};
use crate::bank::{Clip, SetId, SoundBank};
use crate::channel::{Category, ChannelDeviceFactory, ResolvedParams};
use crate::config::SoundStageDesc;
use crate::dispatch::{PlayRequest, SoundDispatcher};
use crate::error::{Result, SoundStageError};
use crate::events::SoundStageEvent;
use crate::math::Vec3;
use crate::music::{MusicController, MusicLibrary, MusicState};
use crate::pause::PauseCoordinator;
use crate::pool::{ChannelId, ChannelPool};
use crate::reverb::{ReverbController, ReverbDevice};
use crossbeam_channel::{unbounded, Receiver, Sender};

/// The two SFX banks a stage serves.
pub struct StageBanks {
    /// Spatialized gameplay sounds.
    pub world: SoundBank,
    /// Interface sounds.
    pub ui: SoundBank,
}

/// Owns and coordinates every component of the playback core.
pub struct SoundStage {
    desc: SoundStageDesc,
    banks: StageBanks,
    dispatcher: SoundDispatcher,
    world_pool: ChannelPool,
    ui_pool: ChannelPool,
    music: MusicController,
    reverb: ReverbController,
    pause: PauseCoordinator,
    ambience: Vec<AmbienceChannel>,
    devices: Box<dyn ChannelDeviceFactory>,
    event_sender: Sender<SoundStageEvent>,
    event_receiver: Receiver<SoundStageEvent>,
}

impl SoundStage {
    /// Builds the full core from host-supplied content and devices.
    ///
    /// # Errors
    ///
    /// `Configuration` if the descriptor is unusable (zero channel cap).
    pub fn new(
        desc: SoundStageDesc,
        banks: StageBanks,
        music_library: MusicLibrary,
        mut devices: Box<dyn ChannelDeviceFactory>,
        reverb_device: Box<dyn ReverbDevice>,
    ) -> Result<Self> {
        if desc.channel_cap == 0 {
            return Err(SoundStageError::Configuration(
                "channel cap must be at least 1".into(),
            ));
        }

        let (event_sender, event_receiver) = unbounded();
        let music = MusicController::new(
            devices.create_device(Category::Music),
            music_library,
            desc.music_volume,
            event_sender.clone(),
        );
        let reverb = ReverbController::new(
            reverb_device,
            desc.reverb_transition_secs,
            event_sender.clone(),
        );

        Ok(Self {
            dispatcher: SoundDispatcher::new(desc.spatial_blend),
            world_pool: ChannelPool::new(Category::World, desc.channel_cap),
            ui_pool: ChannelPool::new(Category::Ui, desc.channel_cap),
            music,
            reverb,
            pause: PauseCoordinator::new(),
            ambience: Vec::new(),
            devices,
            event_sender,
            event_receiver,
            desc,
            banks,
        })
    }

    /// Advances all active timer state machines by `dt` seconds. Call once
    /// per frame.
    pub fn tick(&mut self, dt: f32) {
        self.music.tick(dt);
    }

    /// Events emitted since the last drain; see [`SoundStageEvent`].
    pub fn events(&self) -> &Receiver<SoundStageEvent> {
        &self.event_receiver
    }

    pub fn desc(&self) -> &SoundStageDesc {
        &self.desc
    }

    // --- SFX ---------------------------------------------------------------

    /// Plays a world-bank clip at `position` with randomized parameters.
    ///
    /// `Vec3::ZERO` is the non-spatial sentinel: sounds played there come
    /// out 2D regardless of the configured blend.
    ///
    /// Returns `Ok(None)` when the pool is at its cap and the request was
    /// dropped — bounded degradation, not an error.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` for an invalid clip index.
    pub fn play_sound(
        &mut self,
        clip_index: usize,
        position: Vec3,
        request: &PlayRequest,
    ) -> Result<Option<ChannelId>> {
        let clip = self.banks.world.clip(clip_index)?;
        let params = self.dispatcher.resolve(Category::World, position, request);
        Self::start_on(
            &mut self.world_pool,
            self.devices.as_mut(),
            &self.event_sender,
            clip,
            params,
        )
    }

    /// Plays a uniformly random member of a world-bank sound set.
    ///
    /// # Errors
    ///
    /// `InvalidState` for a set id that did not come from the world bank.
    pub fn play_sound_set(
        &mut self,
        set: SetId,
        position: Vec3,
        request: &PlayRequest,
    ) -> Result<Option<ChannelId>> {
        let clip_index = {
            let members = self.banks.world.set(set)?.members();
            members[self.dispatcher.pick_member(members.len())]
        };
        self.play_sound(clip_index, position, request)
    }

    /// Resolves a world-bank sound set by name. `None` for an unknown name.
    pub fn sound_set(&self, name: &str) -> Option<SetId> {
        self.banks.world.sound_set(name)
    }

    /// Plays a UI-bank clip. UI channels are always non-spatial.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` for an invalid clip index.
    pub fn play_ui_sound(
        &mut self,
        clip_index: usize,
        request: &PlayRequest,
    ) -> Result<Option<ChannelId>> {
        let clip = self.banks.ui.clip(clip_index)?;
        let params = self.dispatcher.resolve(Category::Ui, Vec3::ZERO, request);
        Self::start_on(
            &mut self.ui_pool,
            self.devices.as_mut(),
            &self.event_sender,
            clip,
            params,
        )
    }

    /// Acquires a channel and starts the clip on it; absorbs pool
    /// exhaustion into a logged, evented drop.
    fn start_on(
        pool: &mut ChannelPool,
        devices: &mut dyn ChannelDeviceFactory,
        events: &Sender<SoundStageEvent>,
        clip: Clip,
        params: ResolvedParams,
    ) -> Result<Option<ChannelId>> {
        let category = pool.category();
        let id = match pool.acquire(|| devices.create_device(category)) {
            Ok(id) => id,
            Err(SoundStageError::ResourceExhausted { .. }) => {
                log::warn!("{category} pool exhausted; dropping sound request");
                let _ = events.send(SoundStageEvent::ChannelDropped { category });
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        pool.channel_mut(id).play(&clip, &params);
        let _ = events.send(SoundStageEvent::ChannelStarted {
            category,
            channel: id,
            clip: clip.handle(),
        });
        Ok(Some(id))
    }

    /// Stops every pooled channel immediately, returning them to the idle
    /// pool. Music and ambience beds are unaffected.
    pub fn stop_all_sounds(&mut self) {
        for (_, channel) in self.world_pool.iter_mut() {
            channel.stop();
        }
        for (_, channel) in self.ui_pool.iter_mut() {
            channel.stop();
        }
    }

    pub fn world_pool(&self) -> &ChannelPool {
        &self.world_pool
    }

    pub fn ui_pool(&self) -> &ChannelPool {
        &self.ui_pool
    }

    // --- Music -------------------------------------------------------------

    pub fn play_music_clip(&mut self, index: usize, looping: bool) {
        self.music.play_clip(index, looping);
    }

    pub fn play_music_hit(&mut self, index: usize) {
        self.music.play_hit(index);
    }

    pub fn end_music(&mut self, fade_secs: f32) {
        self.music.end_music(fade_secs);
    }

    pub fn end_music_now(&mut self) {
        self.music.end_now();
    }

    pub fn pause_music(&mut self) {
        self.music.pause();
    }

    pub fn unpause_music(&mut self) {
        self.music.resume();
    }

    pub fn music_state(&self) -> MusicState {
        self.music.state()
    }

    pub fn music_is_playing(&self) -> bool {
        self.music.is_playing()
    }

    // --- Reverb ------------------------------------------------------------

    pub fn set_reverb_state(&mut self, index: usize) {
        self.reverb.set_state(index);
    }

    pub fn reverb_state(&self) -> usize {
        self.reverb.current()
    }

    // --- Pause -------------------------------------------------------------

    /// Pauses all playing world channels and every ambience bed. UI
    /// channels stay live.
    pub fn pause_sounds(&mut self) {
        let count = self.pause.pause_all(&mut self.world_pool, &mut self.ambience);
        let _ = self
            .event_sender
            .send(SoundStageEvent::SoundsPaused { count });
    }

    /// Resumes exactly the channels captured by the matching
    /// [`pause_sounds`](Self::pause_sounds), plus every ambience bed.
    pub fn unpause_sounds(&mut self) {
        let count = self
            .pause
            .unpause_all(&mut self.world_pool, &mut self.ambience);
        let _ = self
            .event_sender
            .send(SoundStageEvent::SoundsResumed { count });
    }

    // --- Ambience ----------------------------------------------------------

    /// Creates a new ambience bed channel and returns its id.
    pub fn add_ambience(&mut self) -> AmbienceId {
        let device = self.devices.create_device(Category::Ambience);
        self.ambience.push(AmbienceChannel::new(device));
        AmbienceId(self.ambience.len() - 1)
    }

    pub fn ambience_mut(&mut self, id: AmbienceId) -> Option<&mut AmbienceChannel> {
        self.ambience.get_mut(id.0)
    }
}
