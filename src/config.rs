//! Configuration for soundstage

/// Tuning knobs for a [`SoundStage`](crate::stage::SoundStage).
///
/// The defaults match the shipped game content; hosts usually only override
/// `channel_cap` for platforms with tighter voice budgets.
#[derive(Debug, Clone)]
pub struct SoundStageDesc {
    /// Hard cap on the number of channels per pool. Requests past the cap
    /// are dropped, not queued.
    pub channel_cap: usize,
    /// Spatial blend applied to world sounds played away from the origin.
    pub spatial_blend: f32,
    /// Volume the music channel is (re)started at.
    pub music_volume: f32,
    /// Blend time handed to the reverb device on every snapshot change.
    pub reverb_transition_secs: f32,
}

impl Default for SoundStageDesc {
    fn default() -> Self {
        Self {
            channel_cap: 50,
            spatial_blend: 0.9,
            music_volume: 0.5,
            reverb_transition_secs: 3.0,
        }
    }
}

impl SoundStageDesc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel_cap(mut self, cap: usize) -> Self {
        self.channel_cap = cap;
        self
    }

    pub fn spatial_blend(mut self, blend: f32) -> Self {
        self.spatial_blend = blend;
        self
    }

    pub fn music_volume(mut self, volume: f32) -> Self {
        self.music_volume = volume;
        self
    }

    pub fn reverb_transition_secs(mut self, secs: f32) -> Self {
        self.reverb_transition_secs = secs;
        self
    }
}
