//! Sound banks: read-only indexed clip collections plus named sound sets.
//!
//! Banks are authored externally and loaded once. Set names are resolved to
//! indices at construction time, so runtime lookups never chase strings
//! through the set list.

use crate::error::{Result, SoundStageError};
use std::collections::HashMap;

/// Opaque handle to host-decoded audio content.
///
/// The crate never inspects the audio itself; the host maps handles back to
/// whatever asset representation it uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClipHandle(pub u64);

impl std::fmt::Display for ClipHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ClipHandle({})", self.0)
    }
}

/// A playable audio asset reference: the host handle plus the clip length.
///
/// The length is the only piece of metadata the crate needs (hit-intro
/// timing); everything else stays on the host side.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Clip {
    handle: ClipHandle,
    length_secs: f32,
}

impl Clip {
    pub fn new(handle: ClipHandle, length_secs: f32) -> Self {
        Self {
            handle,
            length_secs,
        }
    }

    pub fn handle(&self) -> ClipHandle {
        self.handle
    }

    pub fn length_secs(&self) -> f32 {
        self.length_secs
    }
}

/// Handle for a sound set inside one bank.
///
/// Obtained from [`SoundBank::sound_set`]; only meaningful against the bank
/// that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SetId(pub(crate) usize);

impl std::fmt::Display for SetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SetId({})", self.0)
    }
}

/// A named group of clips played as random variants of one logical sound.
#[derive(Clone, Debug)]
pub struct SoundSet {
    name: String,
    members: Vec<usize>,
}

impl SoundSet {
    /// `members` are indices into the owning bank's clip list.
    pub fn new(name: impl Into<String>, members: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }
}

/// Read-only indexed collection of [`Clip`]s plus named [`SoundSet`]s.
pub struct SoundBank {
    clips: Vec<Clip>,
    sets: Vec<SoundSet>,
    set_index: HashMap<String, SetId>,
}

impl SoundBank {
    /// Builds a bank, validating the authored content up front: every set
    /// must be non-empty, reference only in-range clips, and carry a unique
    /// name. Rejecting bad content here keeps the play paths free of
    /// per-request validation.
    pub fn new(clips: Vec<Clip>, sets: Vec<SoundSet>) -> Result<Self> {
        let mut set_index = HashMap::with_capacity(sets.len());
        for (i, set) in sets.iter().enumerate() {
            if set.members.is_empty() {
                return Err(SoundStageError::Configuration(format!(
                    "sound set '{}' has no members",
                    set.name
                )));
            }
            for &member in &set.members {
                if member >= clips.len() {
                    return Err(SoundStageError::Configuration(format!(
                        "sound set '{}' references clip {} but the bank holds {} clips",
                        set.name,
                        member,
                        clips.len()
                    )));
                }
            }
            if set_index.insert(set.name.clone(), SetId(i)).is_some() {
                return Err(SoundStageError::Configuration(format!(
                    "duplicate sound set name '{}'",
                    set.name
                )));
            }
        }
        Ok(Self {
            clips,
            sets,
            set_index,
        })
    }

    /// A bank with clips only, no sets. UI banks are usually shaped this way.
    pub fn from_clips(clips: Vec<Clip>) -> Self {
        Self {
            clips,
            sets: Vec::new(),
            set_index: HashMap::new(),
        }
    }

    /// Looks up a clip by bank index.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` for an invalid index — an authoring bug the caller
    /// should hear about, not a runtime condition to recover from.
    pub fn clip(&self, index: usize) -> Result<Clip> {
        self.clips
            .get(index)
            .copied()
            .ok_or(SoundStageError::IndexOutOfRange {
                index,
                len: self.clips.len(),
            })
    }

    /// Resolves a set name to its id. `None` for an unknown name.
    pub fn sound_set(&self, name: &str) -> Option<SetId> {
        self.set_index.get(name).copied()
    }

    /// Fetches a set by id.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the id did not come from this bank.
    pub fn set(&self, id: SetId) -> Result<&SoundSet> {
        self.sets
            .get(id.0)
            .ok_or_else(|| SoundStageError::InvalidState(format!("unknown sound set id {id}")))
    }

    /// Returns the number of clips in the bank.
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Returns true if the bank contains no clips.
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn set_count(&self) -> usize {
        self.sets.len()
    }
}
