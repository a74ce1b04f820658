//! Resolves play requests into concrete per-channel parameters.
//!
//! Content authors specify a base volume/pitch plus a variance; every request
//! draws the final values uniformly from that range so repeated sounds don't
//! machine-gun. Priority arrives on the caller scale (0 = most important) and
//! is inverted to the device scale here.

use crate::channel::{Category, ResolvedParams};
use crate::math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Caller-facing playback request.
///
/// `priority` uses the authoring convention: lower is more important, 0 is
/// highest. `pan` is stereo pan in `[-1, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlayRequest {
    pub volume: f32,
    pub vol_var: f32,
    pub pitch: f32,
    pub pitch_var: f32,
    pub priority: u8,
    pub pan: f32,
}

impl Default for PlayRequest {
    fn default() -> Self {
        Self {
            volume: 1.0,
            vol_var: 0.0,
            pitch: 1.0,
            pitch_var: 0.0,
            priority: 0,
            pan: 0.0,
        }
    }
}

/// Turns requests into [`ResolvedParams`] and picks random set members.
pub struct SoundDispatcher {
    rng: StdRng,
    spatial_blend: f32,
}

impl SoundDispatcher {
    pub fn new(spatial_blend: f32) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            spatial_blend,
        }
    }

    /// Deterministic variant for tests.
    pub fn with_seed(spatial_blend: f32, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            spatial_blend,
        }
    }

    /// Maps a caller-scale priority (0 = highest) to the device scale.
    ///
    /// This mapping is load-bearing: existing content was authored against
    /// it, so it stays exactly `128 - p`, saturating for p > 128.
    pub fn device_priority(priority: u8) -> u8 {
        128u8.saturating_sub(priority)
    }

    /// Resolves a request for the given category and position.
    ///
    /// UI sounds and world sounds at the origin sentinel are non-spatial
    /// (blend 0); any other world sound gets the configured blend.
    pub fn resolve(
        &mut self,
        category: Category,
        position: Vec3,
        request: &PlayRequest,
    ) -> ResolvedParams {
        let spatial_blend = match category {
            Category::World if position != Vec3::ZERO => self.spatial_blend,
            _ => 0.0,
        };
        ResolvedParams {
            position,
            volume: self.jitter(request.volume, request.vol_var),
            pitch: self.jitter(request.pitch, request.pitch_var),
            pan: request.pan,
            priority: Self::device_priority(request.priority),
            spatial_blend,
        }
    }

    /// Uniform random index into a set of `len` members.
    pub fn pick_member(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "sound sets are validated non-empty at load");
        self.rng.gen_range(0..len)
    }

    fn jitter(&mut self, base: f32, var: f32) -> f32 {
        if var <= 0.0 {
            return base;
        }
        self.rng.gen_range(base - var..=base + var)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_mapping_is_exact() {
        for p in [0u8, 1, 17, 64, 127, 128] {
            assert_eq!(SoundDispatcher::device_priority(p), 128 - p);
        }
        // Beyond the authored range, saturate instead of wrapping.
        assert_eq!(SoundDispatcher::device_priority(200), 0);
    }

    #[test]
    fn test_volume_jitter_stays_in_range_and_spreads() {
        let mut dispatcher = SoundDispatcher::with_seed(0.9, 0x5eed);
        let request = PlayRequest {
            volume: 1.0,
            vol_var: 0.2,
            ..Default::default()
        };

        let mut sum = 0.0f64;
        let mut low_half = 0usize;
        let mut high_half = 0usize;
        for _ in 0..10_000 {
            let params = dispatcher.resolve(Category::Ui, Vec3::ZERO, &request);
            assert!(params.volume >= 0.8 && params.volume <= 1.2);
            sum += params.volume as f64;
            if params.volume < 1.0 {
                low_half += 1;
            } else {
                high_half += 1;
            }
        }

        let mean = sum / 10_000.0;
        assert!((mean - 1.0).abs() < 0.01, "mean drifted to {mean}");
        // Uniform draws land in both halves, no clustering at one side.
        assert!(low_half > 4_000 && high_half > 4_000);
    }

    #[test]
    fn test_zero_variance_is_passthrough() {
        let mut dispatcher = SoundDispatcher::with_seed(0.9, 1);
        let request = PlayRequest {
            volume: 0.7,
            pitch: 1.3,
            ..Default::default()
        };
        let params = dispatcher.resolve(Category::Ui, Vec3::ZERO, &request);
        assert_eq!(params.volume, 0.7);
        assert_eq!(params.pitch, 1.3);
    }

    #[test]
    fn test_spatial_blend_rules() {
        let mut dispatcher = SoundDispatcher::with_seed(0.9, 2);
        let request = PlayRequest::default();

        let world_away = dispatcher.resolve(Category::World, Vec3::new(4.0, 0.0, 1.0), &request);
        assert_eq!(world_away.spatial_blend, 0.9);

        // The origin is the non-spatial sentinel for world sounds.
        let world_origin = dispatcher.resolve(Category::World, Vec3::ZERO, &request);
        assert_eq!(world_origin.spatial_blend, 0.0);

        let ui = dispatcher.resolve(Category::Ui, Vec3::new(4.0, 0.0, 1.0), &request);
        assert_eq!(ui.spatial_blend, 0.0);
    }

    #[test]
    fn test_pick_member_covers_all_members() {
        let mut dispatcher = SoundDispatcher::with_seed(0.9, 3);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[dispatcher.pick_member(4)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
