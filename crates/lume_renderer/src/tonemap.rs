//! Tone mapping from scene-linear radiance to display color.
//!
//! Pipeline per pixel: scale radiance by the exposure for the configured
//! EV100, then run the selected operator. Every operator maps [0, inf)
//! into [0, 1]. Gamma encoding is part of the Reinhard operator only; the
//! ACES and PBR Neutral fits are their own complete display transforms.

use lume_math::Vec3;

const GAMMA: f32 = 2.2;

/// Exposure multiplier for a given EV100.
///
/// Higher EV100 means a brighter scene and therefore less exposure.
#[inline]
pub fn exposure_from_ev100(ev100: f32) -> f32 {
    1.0 / 2.0f32.powf(ev100 * 1.2)
}

/// Display transfer curve applied to exposed radiance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToneMap {
    /// Classic `c / (1 + c)` rolloff followed by 1/2.2 gamma encoding.
    Reinhard,
    /// ACES filmic fit (Narkowicz rational approximation).
    AcesFilmic,
    /// Khronos PBR Neutral; hue-preserving below the knee.
    PbrNeutral,
}

impl ToneMap {
    /// Map exposed linear radiance to display color in [0, 1].
    pub fn apply(&self, color: Vec3) -> Vec3 {
        match self {
            ToneMap::Reinhard => gamma_encode(reinhard(color)),
            ToneMap::AcesFilmic => aces_filmic(color).clamp(Vec3::ZERO, Vec3::ONE),
            ToneMap::PbrNeutral => pbr_neutral(color).clamp(Vec3::ZERO, Vec3::ONE),
        }
    }
}

#[inline]
fn gamma_encode(color: Vec3) -> Vec3 {
    Vec3::new(
        color.x.powf(1.0 / GAMMA),
        color.y.powf(1.0 / GAMMA),
        color.z.powf(1.0 / GAMMA),
    )
}

#[inline]
fn reinhard(color: Vec3) -> Vec3 {
    color / (Vec3::ONE + color)
}

fn aces_filmic(color: Vec3) -> Vec3 {
    let a = 2.51;
    let b = 0.03;
    let c = 2.43;
    let d = 0.59;
    let e = 0.14;
    let num = color * (a * color + Vec3::splat(b));
    let den = color * (c * color + Vec3::splat(d)) + Vec3::splat(e);
    num / den
}

fn pbr_neutral(color: Vec3) -> Vec3 {
    const START_COMPRESSION: f32 = 0.8 - 0.04;
    const DESATURATION: f32 = 0.15;

    // Quadratic black-level offset below 0.08 keeps shadows from lifting
    let x = color.min_element();
    let offset = if x < 0.08 { x - 6.25 * x * x } else { 0.04 };
    let color = color - Vec3::splat(offset);

    let peak = color.max_element();
    if peak < START_COMPRESSION {
        return color;
    }

    let d = 1.0 - START_COMPRESSION;
    let new_peak = 1.0 - d * d / (peak + d - START_COMPRESSION);
    let color = color * (new_peak / peak);

    // Desaturate toward white as the peak compresses
    let g = 1.0 - 1.0 / (DESATURATION * (peak - new_peak) + 1.0);
    color.lerp(Vec3::splat(new_peak), g)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exposure_from_ev100() {
        assert!((exposure_from_ev100(0.0) - 1.0).abs() < 1e-6);
        assert!((exposure_from_ev100(1.0) - 2.0f32.powf(-1.2)).abs() < 1e-6);
        // Each extra EV darkens by 2^1.2
        let ratio = exposure_from_ev100(3.0) / exposure_from_ev100(4.0);
        assert!((ratio - 2.0f32.powf(1.2)).abs() < 1e-4);
    }

    #[test]
    fn test_black_maps_to_black() {
        for tm in [ToneMap::Reinhard, ToneMap::AcesFilmic, ToneMap::PbrNeutral] {
            assert_eq!(tm.apply(Vec3::ZERO), Vec3::ZERO);
        }
    }

    #[test]
    fn test_output_in_unit_range() {
        for tm in [ToneMap::Reinhard, ToneMap::AcesFilmic, ToneMap::PbrNeutral] {
            for scale in [0.01f32, 0.5, 1.0, 10.0, 1000.0] {
                let out = tm.apply(Vec3::new(scale, scale * 0.5, scale * 0.1));
                assert!(out.min_element() >= 0.0, "{:?} at {}", tm, scale);
                assert!(out.max_element() <= 1.0, "{:?} at {}", tm, scale);
            }
        }
    }

    #[test]
    fn test_reinhard_midpoint() {
        // c = 1 maps to 0.5 before gamma
        let out = ToneMap::Reinhard.apply(Vec3::ONE);
        let expected = 0.5f32.powf(1.0 / GAMMA);
        assert!((out.x - expected).abs() < 1e-5);
    }

    #[test]
    fn test_aces_is_the_bare_fit() {
        // x = 0.5: (0.5 * 1.285) / (0.5 * 1.805 + 0.14) = 0.61631,
        // with no gamma stage on top
        let out = ToneMap::AcesFilmic.apply(Vec3::splat(0.5));
        assert!((out.x - 0.61631).abs() < 1e-4, "got {}", out.x);
    }

    #[test]
    fn test_neutral_is_the_bare_fit() {
        // Below the knee the curve is just the 0.04 black offset,
        // with no gamma stage on top
        let out = ToneMap::PbrNeutral.apply(Vec3::splat(0.5));
        assert!((out.x - 0.46).abs() < 1e-5, "got {}", out.x);
    }

    #[test]
    fn test_monotonic_in_luminance() {
        for tm in [ToneMap::Reinhard, ToneMap::AcesFilmic, ToneMap::PbrNeutral] {
            let mut prev = -1.0f32;
            let mut c = 0.0f32;
            while c < 20.0 {
                let out = tm.apply(Vec3::splat(c)).x;
                assert!(out >= prev - 1e-5, "{:?} not monotone at {}", tm, c);
                prev = out;
                c += 0.05;
            }
        }
    }

    #[test]
    fn test_aces_saturates_high_end() {
        let out = aces_filmic(Vec3::splat(100.0));
        assert!(out.x > 0.99);
    }

    #[test]
    fn test_neutral_preserves_hue_below_knee() {
        // Below the compression knee only the constant black offset moves
        // the channels, so channel differences are preserved.
        let c = Vec3::new(0.5, 0.3, 0.2);
        let out = pbr_neutral(c);
        assert!(((out.x - out.y) - (c.x - c.y)).abs() < 1e-5);
        assert!(((out.y - out.z) - (c.y - c.z)).abs() < 1e-5);
    }

    #[test]
    fn test_neutral_compresses_above_knee() {
        let out = pbr_neutral(Vec3::splat(5.0));
        assert!(out.max_element() < 1.0);
        assert!(out.max_element() > 0.76);
    }
}
