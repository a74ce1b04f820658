//! The output-channel seam between the playback core and the host engine.
//!
//! The crate never touches an audio device directly. The host implements
//! [`ChannelDevice`] over whatever output unit it has (a mixer voice, an
//! engine audio source) and hands the core a [`ChannelDeviceFactory`] so the
//! pools can grow on demand. [`Channel`] wraps one device with the state the
//! core tracks about it.

use crate::bank::{Clip, ClipHandle};
use crate::math::Vec3;

/// Which call site a channel serves. Also used by device factories to route
/// new devices to the right host mixer group.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Spatialized gameplay sounds.
    World,
    /// Interface sounds; always non-spatial.
    Ui,
    /// The single music channel.
    Music,
    /// Looping environmental beds.
    Ambience,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::World => write!(f, "world"),
            Category::Ui => write!(f, "ui"),
            Category::Music => write!(f, "music"),
            Category::Ambience => write!(f, "ambience"),
        }
    }
}

/// Host-supplied playable output unit.
///
/// The core drives these as opaque resources: it assigns a clip, pushes
/// float-valued parameters, and starts/stops/pauses playback. `is_playing`
/// must report `false` once the device has run off the end of a non-looping
/// clip — pool reuse and the pause snapshot both key off it.
pub trait ChannelDevice {
    fn assign_clip(&mut self, clip: ClipHandle);
    fn start(&mut self);
    fn stop(&mut self);
    fn pause(&mut self);
    fn resume(&mut self);
    fn set_position(&mut self, position: Vec3);
    fn set_volume(&mut self, volume: f32);
    fn set_pitch(&mut self, pitch: f32);
    fn set_pan(&mut self, pan: f32);
    /// Device-scale priority, already mapped by the dispatcher.
    fn set_priority(&mut self, priority: u8);
    /// 0.0 = fully 2D, 1.0 = fully spatialized.
    fn set_spatial_blend(&mut self, blend: f32);
    fn set_looping(&mut self, looping: bool);
    fn is_playing(&self) -> bool;
    /// Seconds into the currently assigned clip, as the device reports it.
    fn playback_position(&self) -> f32;
}

/// Builds devices for the pools (and the music/ambience channels) on demand.
pub trait ChannelDeviceFactory {
    fn create_device(&mut self, category: Category) -> Box<dyn ChannelDevice>;
}

/// Fully resolved playback parameters, ready to be applied to a device.
///
/// Produced by the dispatcher; `priority` is already on the device scale and
/// `spatial_blend` already accounts for the category and position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResolvedParams {
    pub position: Vec3,
    pub volume: f32,
    pub pitch: f32,
    pub pan: f32,
    pub priority: u8,
    pub spatial_blend: f32,
}

/// A reusable stateful output unit bound to at most one clip at a time.
///
/// Channels are owned by their pool for the process lifetime; an idle channel
/// is reassigned, never destroyed.
pub struct Channel {
    device: Box<dyn ChannelDevice>,
    category: Category,
    clip: Option<ClipHandle>,
}

impl Channel {
    pub(crate) fn new(device: Box<dyn ChannelDevice>, category: Category) -> Self {
        Self {
            device,
            category,
            clip: None,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// The clip most recently played on this channel.
    pub fn clip(&self) -> Option<ClipHandle> {
        self.clip
    }

    pub fn is_playing(&self) -> bool {
        self.device.is_playing()
    }

    /// Configures the device and starts playback as one step, so no caller
    /// can observe a half-configured channel mid-play.
    pub(crate) fn play(&mut self, clip: &Clip, params: &ResolvedParams) {
        self.device.assign_clip(clip.handle());
        self.device.set_position(params.position);
        self.device.set_spatial_blend(params.spatial_blend);
        self.device.set_volume(params.volume);
        self.device.set_pitch(params.pitch);
        self.device.set_priority(params.priority);
        self.device.set_pan(params.pan);
        self.device.start();
        self.clip = Some(clip.handle());
    }

    pub(crate) fn pause(&mut self) {
        self.device.pause();
    }

    pub(crate) fn resume(&mut self) {
        self.device.resume();
    }

    pub(crate) fn stop(&mut self) {
        self.device.stop();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared mock device for the unit tests across the crate.

    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    pub struct MockState {
        pub clip: Option<ClipHandle>,
        pub playing: bool,
        pub paused: bool,
        pub looping: bool,
        pub position: Vec3,
        pub volume: f32,
        pub pitch: f32,
        pub pan: f32,
        pub priority: u8,
        pub spatial_blend: f32,
        /// Test-controlled stand-in for the device playback clock.
        pub playback_position: f32,
        /// Every clip handle passed to `start`, in order.
        pub started_clips: Vec<ClipHandle>,
        pub stop_count: usize,
        pub pause_count: usize,
        pub resume_count: usize,
    }

    pub struct MockDevice {
        pub state: Rc<RefCell<MockState>>,
    }

    impl MockDevice {
        pub fn new() -> (Self, Rc<RefCell<MockState>>) {
            let state = Rc::new(RefCell::new(MockState::default()));
            (
                Self {
                    state: state.clone(),
                },
                state,
            )
        }
    }

    impl ChannelDevice for MockDevice {
        fn assign_clip(&mut self, clip: ClipHandle) {
            self.state.borrow_mut().clip = Some(clip);
        }

        fn start(&mut self) {
            let mut st = self.state.borrow_mut();
            st.playing = true;
            st.paused = false;
            st.playback_position = 0.0;
            let clip = st.clip;
            if let Some(clip) = clip {
                st.started_clips.push(clip);
            }
        }

        fn stop(&mut self) {
            let mut st = self.state.borrow_mut();
            st.playing = false;
            st.stop_count += 1;
        }

        fn pause(&mut self) {
            let mut st = self.state.borrow_mut();
            if st.playing {
                st.playing = false;
                st.paused = true;
            }
            st.pause_count += 1;
        }

        fn resume(&mut self) {
            let mut st = self.state.borrow_mut();
            if st.paused {
                st.paused = false;
                st.playing = true;
            }
            st.resume_count += 1;
        }

        fn set_position(&mut self, position: Vec3) {
            self.state.borrow_mut().position = position;
        }

        fn set_volume(&mut self, volume: f32) {
            self.state.borrow_mut().volume = volume;
        }

        fn set_pitch(&mut self, pitch: f32) {
            self.state.borrow_mut().pitch = pitch;
        }

        fn set_pan(&mut self, pan: f32) {
            self.state.borrow_mut().pan = pan;
        }

        fn set_priority(&mut self, priority: u8) {
            self.state.borrow_mut().priority = priority;
        }

        fn set_spatial_blend(&mut self, blend: f32) {
            self.state.borrow_mut().spatial_blend = blend;
        }

        fn set_looping(&mut self, looping: bool) {
            self.state.borrow_mut().looping = looping;
        }

        fn is_playing(&self) -> bool {
            self.state.borrow().playing
        }

        fn playback_position(&self) -> f32 {
            self.state.borrow().playback_position
        }
    }

    /// Factory that keeps a handle on every device it hands out, so tests
    /// can poke at device state after the fact.
    #[derive(Default)]
    pub struct MockFactory {
        pub created: Rc<RefCell<Vec<(Category, Rc<RefCell<MockState>>)>>>,
    }

    impl MockFactory {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn device_state(&self, index: usize) -> Rc<RefCell<MockState>> {
            self.created.borrow()[index].1.clone()
        }

        pub fn created_count(&self) -> usize {
            self.created.borrow().len()
        }
    }

    impl ChannelDeviceFactory for MockFactory {
        fn create_device(&mut self, category: Category) -> Box<dyn ChannelDevice> {
            let (device, state) = MockDevice::new();
            self.created.borrow_mut().push((category, state));
            Box::new(device)
        }
    }
}
