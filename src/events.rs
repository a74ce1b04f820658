//! Event types for soundstage
//!
//! Every notable transition in the core is mirrored onto an event channel the
//! host can drain once per frame (for debug overlays, music-reactive logic,
//! test assertions). Delivery is an unbounded crossbeam channel owned by the
//! [`SoundStage`](crate::stage::SoundStage).

use crate::bank::ClipHandle;
use crate::channel::Category;
use crate::pool::ChannelId;

#[derive(Debug, Clone, PartialEq)]
pub enum SoundStageEvent {
    /// A pooled channel was configured and started.
    ChannelStarted {
        category: Category,
        channel: ChannelId,
        clip: ClipHandle,
    },
    /// A request was dropped because its pool was at the cap.
    ChannelDropped { category: Category },
    /// The music channel started a clip (loop or one-shot).
    MusicStarted { clip: ClipHandle },
    /// A hit sequence started its intro clip.
    MusicHitStarted { hit: usize },
    /// A hit intro ran out and the looping main clip took over.
    MusicHitChained { hit: usize },
    /// Music reached idle, either directly or at the end of a fade.
    MusicEnded,
    /// The reverb controller issued a snapshot transition.
    ReverbTransition { from: usize, to: usize },
    /// `pause_all` captured this many playing channels.
    SoundsPaused { count: usize },
    /// `unpause_all` resumed this many captured channels.
    SoundsResumed { count: usize },
}

impl SoundStageEvent {
    /// True for events emitted by the music controller.
    pub fn is_music_event(&self) -> bool {
        matches!(
            self,
            Self::MusicStarted { .. }
                | Self::MusicHitStarted { .. }
                | Self::MusicHitChained { .. }
                | Self::MusicEnded
        )
    }

    /// True for events that indicate degraded service rather than normal
    /// operation.
    pub fn is_degradation(&self) -> bool {
        matches!(self, Self::ChannelDropped { .. })
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            Self::ChannelStarted { category, .. } | Self::ChannelDropped { category } => {
                Some(*category)
            }
            _ => None,
        }
    }
}
