//! Math types for soundstage

pub use glam::Vec3;

/// Linear interpolation with `t` clamped to `[0, 1]`.
///
/// Fade timers feed raw `elapsed / duration` ratios in here, so the clamp
/// keeps the final tick of a fade from overshooting past the target.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}
