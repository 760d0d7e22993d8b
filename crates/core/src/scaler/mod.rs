//! Linear signal scaling
//!
//! Maps a value from one linear range onto another. Used to turn normalized
//! actuator commands into servo pulse widths.

/// Remap `value` from `[old_min, old_max]` onto `[new_min, new_max]`.
///
/// The mapping is affine and unclamped: values outside the source range land
/// outside the target range. The caller guarantees `old_max != old_min`.
pub fn scale_range(value: f32, old_min: f32, old_max: f32, new_min: f32, new_max: f32) -> f32 {
    ((value - old_min) / (old_max - old_min)) * (new_max - new_min) + new_min
}
