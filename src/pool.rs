//! Capped, growable pools of reusable output channels.
//!
//! Unbounded channel creation under high request rates (explosions, UI spam)
//! turns into frame-time spikes and device exhaustion on the host side. The
//! pool converts that into bounded degradation: grow up to a hard cap, then
//! fail the acquire and let the caller drop the sound.

use crate::channel::{Category, Channel, ChannelDevice};
use crate::error::{Result, SoundStageError};

/// Index of a channel within one pool. Only meaningful against the pool
/// that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChannelId(pub(crate) usize);

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChannelId({})", self.0)
    }
}

/// An ordered, growable collection of [`Channel`]s for one category.
///
/// Channels are scanned in pool order and the first idle one wins; there is
/// no LRU bookkeeping. Once created, a channel lives for the lifetime of the
/// pool and is reused whenever its device reports it idle.
pub struct ChannelPool {
    category: Category,
    channels: Vec<Channel>,
    cap: usize,
}

impl ChannelPool {
    pub fn new(category: Category, cap: usize) -> Self {
        Self {
            category,
            channels: Vec::new(),
            cap,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns the number of channels currently in the pool.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Returns true if the pool has no channels yet.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Finds an idle channel, or grows the pool by one using `make_device`
    /// while under the cap.
    ///
    /// # Errors
    ///
    /// `ResourceExhausted` when the pool is at its cap and every channel is
    /// busy. The pool is left unchanged; callers drop the request.
    pub fn acquire(
        &mut self,
        make_device: impl FnOnce() -> Box<dyn ChannelDevice>,
    ) -> Result<ChannelId> {
        if let Some(index) = self.channels.iter().position(|c| !c.is_playing()) {
            return Ok(ChannelId(index));
        }

        if self.channels.len() >= self.cap {
            return Err(SoundStageError::ResourceExhausted {
                category: self.category,
                cap: self.cap,
            });
        }

        self.channels
            .push(Channel::new(make_device(), self.category));
        log::debug!(
            "{} pool grew to {} channels",
            self.category,
            self.channels.len()
        );
        Ok(ChannelId(self.channels.len() - 1))
    }

    pub fn channel(&self, id: ChannelId) -> &Channel {
        &self.channels[id.0]
    }

    pub fn channel_mut(&mut self, id: ChannelId) -> &mut Channel {
        &mut self.channels[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChannelId, &Channel)> {
        self.channels
            .iter()
            .enumerate()
            .map(|(i, c)| (ChannelId(i), c))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ChannelId, &mut Channel)> {
        self.channels
            .iter_mut()
            .enumerate()
            .map(|(i, c)| (ChannelId(i), c))
    }
}
