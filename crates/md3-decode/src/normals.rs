//! Compressed normal decoding.

use glam::Vec3;
use std::f64::consts::TAU;

/// Decode a normal stored as two angle bytes.
///
/// Each byte is a fraction of a full turn (`byte * 2π / 255`). The vector is
/// a direct spherical-to-Cartesian conversion and is not renormalized:
///
/// ```text
/// (-cos(lat) * sin(lng), -sin(lat) * sin(lng), cos(lng))
/// ```
///
/// The axis assignment and signs match data authored against this decoder.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn decode_normal(zenith: u8, azimuth: u8) -> Vec3 {
    let lat = f64::from(zenith) * TAU / 255.0;
    let lng = f64::from(azimuth) * TAU / 255.0;
    let (slat, clat) = lat.sin_cos();
    let (slng, clng) = lng.sin_cos();

    Vec3::new(
        (-clat * slng) as f32,
        (-slat * slng) as f32,
        clng as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_angles_point_up_z() {
        let n = decode_normal(0, 0);
        assert!(n.abs_diff_eq(Vec3::Z, 1e-7), "{n:?}");
    }

    #[test]
    fn mid_range_matches_spherical_conversion() {
        let n = decode_normal(127, 127);
        let angle = 127.0f64 * 2.0 * std::f64::consts::PI / 255.0;
        let expected = Vec3::new(
            (-angle.cos() * angle.sin()) as f32,
            (-angle.sin() * angle.sin()) as f32,
            angle.cos() as f32,
        );
        assert!(n.abs_diff_eq(expected, 1e-6), "{n:?} vs {expected:?}");
    }

    #[test]
    fn quarter_turn_azimuth() {
        // lng just under π/2: mostly along -X when zenith is 0.
        let n = decode_normal(0, 64);
        assert!(n.x < -0.99);
        assert!(n.y.abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn unit_length(zenith: u8, azimuth: u8) {
            let n = decode_normal(zenith, azimuth);
            prop_assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }
}
