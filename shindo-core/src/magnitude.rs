//! Composite acceleration magnitude
//!
//! Converts the three corrected axis values from ADC counts to gal and
//! combines them into one direction-independent scalar per tick.

use libm::sqrtf;

/// Euclidean norm of `corrected` after scaling each axis by `gain`
///
/// `gain` is the ADC-count-to-gal factor, so the result is in gal.
pub fn composite_magnitude(corrected: [f32; 3], gain: f32) -> f32 {
    let [x, y, z] = corrected.map(|c| c * gain);
    sqrtf(x * x + y * y + z * z)
}
