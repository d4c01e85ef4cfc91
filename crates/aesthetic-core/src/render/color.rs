//! Per-pixel colour terms.
//!
//! Matrix coefficients follow the W3C Filter Effects definitions of the CSS
//! filter functions, so results line up with what a browser shows for the
//! same `filter` string.
//!
//! ```text
//! contrast(a):   c' = (c − 0.5) × a + 0.5
//! brightness(a): c' = c × a
//! saturate(s), sepia(a), hue-rotate(θ): c' = M × c
//! ```

use glam::{Mat3, Vec3};

use crate::filter::params::ParameterId;

/// A single colour-space term ready to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorOp {
    /// `c × slope + intercept` on every channel.
    Linear { slope: f32, intercept: f32 },
    /// 3×3 colour matrix.
    Matrix(Mat3),
}

impl ColorOp {
    /// Build the op for one pipeline term. Blur is spatial and returns `None`.
    pub fn for_term(id: ParameterId, value: f32) -> Option<Self> {
        match id {
            ParameterId::Contrast => Some(Self::Linear {
                slope: value,
                intercept: 0.5 - 0.5 * value,
            }),
            ParameterId::Brightness => Some(Self::Linear {
                slope: value,
                intercept: 0.0,
            }),
            ParameterId::Saturate => Some(Self::Matrix(saturate_matrix(value))),
            ParameterId::Sepia => Some(Self::Matrix(sepia_matrix(value))),
            ParameterId::HueRotate => Some(Self::Matrix(hue_rotate_matrix(value))),
            ParameterId::Blur => None,
        }
    }

    /// Apply to one straight-alpha pixel, clamping the result to `[0, 1]`.
    /// Channels that overflow to `NaN` come out as 0.
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let v = Vec3::from_array(rgb);
        let out = match *self {
            Self::Linear { slope, intercept } => v * slope + Vec3::splat(intercept),
            Self::Matrix(m) => m * v,
        };
        out.to_array()
            .map(|c| if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) })
    }
}

/// Build a matrix from row-major coefficients.
fn from_rows(rows: [[f32; 3]; 3]) -> Mat3 {
    Mat3::from_cols_array_2d(&rows).transpose()
}

/// `saturate(s)`: 0 = grayscale, 1 = unchanged, >1 = oversaturated.
pub fn saturate_matrix(s: f32) -> Mat3 {
    from_rows([
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ])
}

/// `sepia(a)`: identity at 0, full sepia tone at 1. Amounts above 1 clamp.
pub fn sepia_matrix(amount: f32) -> Mat3 {
    let k = 1.0 - amount.clamp(0.0, 1.0);
    from_rows([
        [0.393 + 0.607 * k, 0.769 - 0.769 * k, 0.189 - 0.189 * k],
        [0.349 - 0.349 * k, 0.686 + 0.314 * k, 0.168 - 0.168 * k],
        [0.272 - 0.272 * k, 0.534 - 0.534 * k, 0.131 + 0.869 * k],
    ])
}

/// `hue-rotate(θ)` with θ in degrees.
pub fn hue_rotate_matrix(degrees: f32) -> Mat3 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    from_rows([
        [
            0.213 + 0.787 * cos - 0.213 * sin,
            0.715 - 0.715 * cos - 0.715 * sin,
            0.072 - 0.072 * cos + 0.928 * sin,
        ],
        [
            0.213 - 0.213 * cos + 0.143 * sin,
            0.715 + 0.285 * cos + 0.140 * sin,
            0.072 - 0.072 * cos - 0.283 * sin,
        ],
        [
            0.213 - 0.213 * cos - 0.787 * sin,
            0.715 - 0.715 * cos + 0.715 * sin,
            0.072 + 0.928 * cos + 0.072 * sin,
        ],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_close(actual: [f32; 3], expected: [f32; 3]) {
        for c in 0..3 {
            assert!(
                (actual[c] - expected[c]).abs() < EPSILON,
                "channel {c}: {:.6} vs {:.6}",
                actual[c],
                expected[c]
            );
        }
    }

    #[test]
    fn test_contrast_zero_is_mid_grey() {
        let op = ColorOp::for_term(ParameterId::Contrast, 0.0).unwrap();
        assert_close(op.apply([0.1, 0.7, 0.9]), [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_contrast_keeps_mid_grey_fixed() {
        let op = ColorOp::for_term(ParameterId::Contrast, 1.4).unwrap();
        assert_close(op.apply([0.5, 0.5, 0.5]), [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_saturate_zero_produces_grayscale() {
        let op = ColorOp::for_term(ParameterId::Saturate, 0.0).unwrap();
        let out = op.apply([0.8, 0.4, 0.2]);
        assert!((out[0] - out[1]).abs() < EPSILON);
        assert!((out[1] - out[2]).abs() < EPSILON);
    }

    #[test]
    fn test_saturate_one_is_identity() {
        let op = ColorOp::for_term(ParameterId::Saturate, 1.0).unwrap();
        assert_close(op.apply([0.5, 0.3, 0.7]), [0.5, 0.3, 0.7]);
    }

    #[test]
    fn test_sepia_full_on_white() {
        let op = ColorOp::for_term(ParameterId::Sepia, 1.0).unwrap();
        // Row sums of the sepia matrix, clamped.
        assert_close(op.apply([1.0, 1.0, 1.0]), [1.0, 1.0, 0.937]);
    }

    #[test]
    fn test_sepia_above_one_clamps() {
        assert_eq!(sepia_matrix(3.0), sepia_matrix(1.0));
    }

    #[test]
    fn test_hue_rotation_360_is_identity() {
        let op = ColorOp::for_term(ParameterId::HueRotate, 360.0).unwrap();
        let out = op.apply([0.5, 0.3, 0.7]);
        for (c, expected) in [0.5, 0.3, 0.7].into_iter().enumerate() {
            assert!((out[c] - expected).abs() < 1e-3, "ch{c} {:.6}", out[c]);
        }
    }

    #[test]
    fn test_hue_rotation_keeps_grey() {
        let op = ColorOp::for_term(ParameterId::HueRotate, -20.0).unwrap();
        let out = op.apply([0.4, 0.4, 0.4]);
        assert!((out[0] - 0.4).abs() < 1e-3);
        assert!((out[2] - 0.4).abs() < 1e-3);
    }

    #[test]
    fn test_blur_has_no_color_op() {
        assert!(ColorOp::for_term(ParameterId::Blur, 2.0).is_none());
    }

    #[test]
    fn test_out_of_range_values_clamp() {
        let op = ColorOp::for_term(ParameterId::Brightness, -3.0).unwrap();
        assert_close(op.apply([0.5, 0.5, 0.5]), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_overflowing_matrix_stays_in_range() {
        let op = ColorOp::for_term(ParameterId::Saturate, f32::MAX).unwrap();
        for c in op.apply([1.0, 0.25, 1.0]) {
            assert!((0.0..=1.0).contains(&c), "{c}");
        }
    }
}
