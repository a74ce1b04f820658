//! Game audio playback core: pooled SFX channels, a layered music model,
//! reverb states and pause coordination, all above an opaque host device
//! seam.
//!
//! The host engine implements [`ChannelDevice`]/[`ChannelDeviceFactory`] and
//! [`ReverbDevice`]; this crate owns everything above them — bounded channel
//! pools, randomized request resolution, music preemption and fades, and the
//! pause snapshot. All state lives in a single [`SoundStage`] driven by
//! `tick(dt)` once per frame; there are no globals and no background
//! threads.

pub mod ambience;
pub mod bank;
pub mod channel;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod math;
pub mod music;
pub mod pause;
pub mod pool;
pub mod reverb;
pub mod stage;

pub use ambience::{AmbienceChannel, AmbienceId};
pub use bank::{Clip, ClipHandle, SetId, SoundBank, SoundSet};
pub use channel::{Category, Channel, ChannelDevice, ChannelDeviceFactory};
pub use config::SoundStageDesc;
pub use dispatch::{PlayRequest, SoundDispatcher};
pub use error::{Result, SoundStageError};
pub use events::SoundStageEvent;
pub use math::Vec3;
pub use music::{MusicController, MusicHit, MusicLibrary, MusicState};
pub use pause::PauseCoordinator;
pub use pool::{ChannelId, ChannelPool};
pub use reverb::{ReverbController, ReverbDevice};
pub use stage::{SoundStage, StageBanks};
