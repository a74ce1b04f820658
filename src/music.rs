//! The layered music model: one logical music state, one channel.
//!
//! Music supports a single (optionally looped) clip, two-stage hit sequences
//! (a one-shot intro chained into a looping main clip), and a linear
//! fade-out. Every new request tears the prior state down synchronously
//! before starting, so no two music states ever coexist and at most one
//! timer is in flight per controller. Timers are plain elapsed/duration
//! fields advanced by [`MusicController::tick`].

use crate::bank::Clip;
use crate::channel::ChannelDevice;
use crate::events::SoundStageEvent;
use crate::math::lerp;
use crossbeam_channel::Sender;

/// The intro-to-main swap must beat the device's own end-of-clip stop, so
/// the cutoff sits just short of the intro's full length.
const INTRO_CUTOFF_FACTOR: f32 = 0.99999;

/// A two-stage music cue: a one-shot intro followed automatically by a
/// looping main clip.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MusicHit {
    pub intro: Clip,
    pub main: Clip,
}

impl MusicHit {
    pub fn new(intro: Clip, main: Clip) -> Self {
        Self { intro, main }
    }
}

/// Externally authored music content: plain clips addressed by index, and
/// hit sequences addressed by index.
#[derive(Clone, Debug, Default)]
pub struct MusicLibrary {
    pub clips: Vec<Clip>,
    pub hits: Vec<MusicHit>,
}

impl MusicLibrary {
    pub fn new(clips: Vec<Clip>, hits: Vec<MusicHit>) -> Self {
        Self { clips, hits }
    }
}

/// Exactly one of these is current at any time; transitions always pass
/// through a full teardown of the previous state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MusicState {
    Idle,
    /// A plain clip is on the channel (looping or one-shot).
    Loop { clip: usize },
    /// A hit intro is playing; the timer counts toward `cutoff`.
    HitIntro { hit: usize, elapsed: f32, cutoff: f32 },
    /// A hit's looping main clip took over.
    HitMain { hit: usize },
    /// Volume is ramping to zero; reaching `duration` ends the music.
    FadingOut {
        start_volume: f32,
        elapsed: f32,
        duration: f32,
    },
}

/// Owns the single music channel and arbitrates preemption between
/// competing requests.
pub struct MusicController {
    device: Box<dyn ChannelDevice>,
    library: MusicLibrary,
    state: MusicState,
    /// Volume the channel is (re)started at.
    volume: f32,
    /// Mirror of the device volume, so a fade can start from wherever the
    /// previous fade or start left it.
    channel_volume: f32,
    playing: bool,
    events: Sender<SoundStageEvent>,
}

impl MusicController {
    pub fn new(
        device: Box<dyn ChannelDevice>,
        library: MusicLibrary,
        volume: f32,
        events: Sender<SoundStageEvent>,
    ) -> Self {
        Self {
            device,
            library,
            state: MusicState::Idle,
            volume,
            channel_volume: 0.0,
            playing: false,
            events,
        }
    }

    pub fn state(&self) -> MusicState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Plays a plain music clip by index.
    ///
    /// An out-of-range index is a warning and leaves the current state
    /// untouched; otherwise any prior state is torn down first.
    pub fn play_clip(&mut self, index: usize, looping: bool) {
        let Some(clip) = self.library.clips.get(index).copied() else {
            log::warn!(
                "music clip index {index} is not valid ({} clips)",
                self.library.clips.len()
            );
            return;
        };

        self.teardown();
        self.start_channel(&clip, looping);
        self.state = MusicState::Loop { clip: index };
        let _ = self.events.send(SoundStageEvent::MusicStarted {
            clip: clip.handle(),
        });
        log::debug!("music clip {index} started (looping: {looping})");
    }

    /// Starts a two-stage hit sequence by index.
    ///
    /// If another hit's intro is still in flight it is force-completed first
    /// (a corrective action, not an error); its timer can never fire
    /// afterwards. Any other prior state is torn down silently.
    pub fn play_hit(&mut self, index: usize) {
        let Some(hit) = self.library.hits.get(index).copied() else {
            log::warn!(
                "music hit index {index} is not valid ({} hits)",
                self.library.hits.len()
            );
            return;
        };

        if matches!(self.state, MusicState::HitIntro { .. }) {
            log::warn!("starting a music hit while another intro is in flight; ending it");
            self.end_now();
        } else {
            self.teardown();
        }

        let cutoff = hit.intro.length_secs() * INTRO_CUTOFF_FACTOR;
        self.start_channel(&hit.intro, false);
        self.state = MusicState::HitIntro {
            hit: index,
            elapsed: 0.0,
            cutoff,
        };
        let _ = self
            .events
            .send(SoundStageEvent::MusicHitStarted { hit: index });
        log::debug!("music hit {index} intro started (cutoff {cutoff} s)");
    }

    /// Fades the music out linearly over `fade_secs`, then ends it.
    ///
    /// Only valid while music is playing; otherwise a logged no-op. Starting
    /// a new fade replaces an in-flight one from the current volume, and
    /// releases any pending hit-intro timer.
    pub fn end_music(&mut self, fade_secs: f32) {
        if !self.playing {
            log::warn!("end_music called while no music is playing");
            return;
        }
        if fade_secs <= 0.0 {
            self.end_now();
            return;
        }

        self.state = MusicState::FadingOut {
            start_volume: self.channel_volume,
            elapsed: 0.0,
            duration: fade_secs,
        };
        log::debug!(
            "music fading out over {fade_secs} s from volume {}",
            self.channel_volume
        );
    }

    /// Immediate teardown: stop the channel, zero the volume, cancel any
    /// in-flight timer, go idle. Also the terminal step of every fade.
    pub fn end_now(&mut self) {
        let was_playing = self.playing;
        self.teardown();
        if was_playing {
            let _ = self.events.send(SoundStageEvent::MusicEnded);
        }
        log::debug!("music ended");
    }

    /// Pauses the music channel in place.
    pub fn pause(&mut self) {
        self.device.pause();
    }

    /// Resumes a paused music channel.
    pub fn resume(&mut self) {
        self.device.resume();
    }

    /// Advances whichever timer is active by `dt` seconds. Call once per
    /// frame; all suspension points of the music model live here.
    pub fn tick(&mut self, dt: f32) {
        match self.state {
            MusicState::HitIntro {
                hit,
                elapsed,
                cutoff,
            } => {
                let elapsed = elapsed + dt;
                // Either clock may reach the cutoff first: the accumulated
                // tick time, or the device's own playback position.
                if elapsed >= cutoff || self.device.playback_position() >= cutoff {
                    self.chain_hit(hit);
                } else {
                    self.state = MusicState::HitIntro {
                        hit,
                        elapsed,
                        cutoff,
                    };
                }
            }
            MusicState::FadingOut {
                start_volume,
                elapsed,
                duration,
            } => {
                let elapsed = elapsed + dt;
                if elapsed >= duration {
                    self.end_now();
                } else {
                    let volume = lerp(start_volume, 0.0, elapsed / duration);
                    self.device.set_volume(volume);
                    self.channel_volume = volume;
                    self.state = MusicState::FadingOut {
                        start_volume,
                        elapsed,
                        duration,
                    };
                }
            }
            _ => {}
        }
    }

    /// Swaps the intro out for the hit's looping main clip.
    fn chain_hit(&mut self, hit: usize) {
        let main = self.library.hits[hit].main;
        self.device.stop();
        self.device.assign_clip(main.handle());
        self.device.start();
        self.device.set_looping(true);
        self.state = MusicState::HitMain { hit };
        let _ = self.events.send(SoundStageEvent::MusicHitChained { hit });
        log::debug!("music hit {hit} chained to its main clip");
    }

    fn start_channel(&mut self, clip: &Clip, looping: bool) {
        self.device.assign_clip(clip.handle());
        self.device.set_looping(looping);
        self.device.start();
        self.device.set_volume(self.volume);
        self.channel_volume = self.volume;
        self.playing = true;
    }

    fn teardown(&mut self) {
        self.device.stop();
        self.device.set_volume(0.0);
        self.channel_volume = 0.0;
        self.playing = false;
        self.state = MusicState::Idle;
    }
}
