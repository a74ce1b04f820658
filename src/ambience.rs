//! Looping environmental beds, outside the pooled SFX lifecycle.
//!
//! Ambience channels are long-lived: started once per area and left looping.
//! The pause coordinator pauses and resumes them unconditionally, playing or
//! not, which keeps the pause path free of per-bed bookkeeping.

use crate::bank::Clip;
use crate::channel::ChannelDevice;

/// Index of an ambience channel within one stage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AmbienceId(pub(crate) usize);

impl std::fmt::Display for AmbienceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AmbienceId({})", self.0)
    }
}

/// A single looping bed over its own device.
pub struct AmbienceChannel {
    device: Box<dyn ChannelDevice>,
}

impl AmbienceChannel {
    pub fn new(device: Box<dyn ChannelDevice>) -> Self {
        Self { device }
    }

    /// Assigns the bed clip and starts it looping at `volume`.
    pub fn start(&mut self, clip: &Clip, volume: f32) {
        self.device.assign_clip(clip.handle());
        self.device.set_looping(true);
        self.device.set_volume(volume);
        self.device.start();
    }

    pub fn stop(&mut self) {
        self.device.stop();
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.device.set_volume(volume);
    }

    pub fn is_playing(&self) -> bool {
        self.device.is_playing()
    }

    pub(crate) fn pause(&mut self) {
        self.device.pause();
    }

    pub(crate) fn resume(&mut self) {
        self.device.resume();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{Clip, ClipHandle};
    use crate::channel::testing::MockDevice;

    #[test]
    fn test_start_loops_the_bed() {
        let (device, state) = MockDevice::new();
        let mut bed = AmbienceChannel::new(Box::new(device));
        bed.start(&Clip::new(ClipHandle(3), 120.0), 0.6);

        let st = state.borrow();
        assert!(st.playing);
        assert!(st.looping);
        assert_eq!(st.volume, 0.6);
        assert_eq!(st.clip, Some(ClipHandle(3)));
    }
}
