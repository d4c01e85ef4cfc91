//! The six filter parameters and the two default tables.
//!
//! `FilterParams` is the plain value set the pipeline is built from. There are
//! two named defaults on purpose: [`FilterParams::NEUTRAL`] is what a preset's
//! unspecified slots fall back to, [`FilterParams::CUSTOM_DEFAULTS`] is what the
//! sliders return to on reset.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Identifies one of the six pipeline slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterId {
    /// Contrast ratio. 1.0 = neutral.
    Contrast,
    /// Saturation ratio. 1.0 = neutral, 0.0 = grayscale.
    Saturate,
    /// Brightness multiplier. 1.0 = neutral, 0.0 = black.
    Brightness,
    /// Sepia amount. 0.0 = neutral, 1.0 = full sepia.
    Sepia,
    /// Hue rotation in degrees. 0.0 = neutral.
    HueRotate,
    /// Gaussian blur radius in pixels. 0.0 = neutral.
    Blur,
}

impl ParameterId {
    /// Fixed pipeline order. Composition is not commutative, so every
    /// consumer iterates in this order.
    pub const ORDER: [ParameterId; 6] = [
        ParameterId::Contrast,
        ParameterId::Saturate,
        ParameterId::Brightness,
        ParameterId::Sepia,
        ParameterId::HueRotate,
        ParameterId::Blur,
    ];

    /// CSS filter function name for this slot.
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Contrast => "contrast",
            Self::Saturate => "saturate",
            Self::Brightness => "brightness",
            Self::Sepia => "sepia",
            Self::HueRotate => "hue-rotate",
            Self::Blur => "blur",
        }
    }

    /// Unit the value of this slot is expressed in.
    pub const fn unit(self) -> Unit {
        match self {
            Self::HueRotate => Unit::Degree,
            Self::Blur => Unit::Pixel,
            _ => Unit::Ratio,
        }
    }

    /// Position of this slot in [`ParameterId::ORDER`].
    pub const fn index(self) -> usize {
        match self {
            Self::Contrast => 0,
            Self::Saturate => 1,
            Self::Brightness => 2,
            Self::Sepia => 3,
            Self::HueRotate => 4,
            Self::Blur => 5,
        }
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

impl FromStr for ParameterId {
    type Err = FilterError;

    /// Accepts the slider names used by the UI (`hueRotate`) as well as the
    /// CSS function names (`hue-rotate`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contrast" => Ok(Self::Contrast),
            "saturate" => Ok(Self::Saturate),
            "brightness" => Ok(Self::Brightness),
            "sepia" => Ok(Self::Sepia),
            "hueRotate" | "hue-rotate" => Ok(Self::HueRotate),
            "blur" => Ok(Self::Blur),
            other => Err(FilterError::InvalidParameter(other.to_string())),
        }
    }
}

/// Unit attached to a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    /// Unitless multiplier.
    Ratio,
    /// Angle in degrees.
    Degree,
    /// Length in pixels.
    Pixel,
}

impl Unit {
    /// CSS suffix for values in this unit.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Ratio => "",
            Self::Degree => "deg",
            Self::Pixel => "px",
        }
    }
}

/// One slot with its value and unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterParameter {
    pub id: ParameterId,
    pub value: f32,
    pub unit: Unit,
}

impl FilterParameter {
    pub const fn new(id: ParameterId, value: f32) -> Self {
        Self {
            id,
            value,
            unit: id.unit(),
        }
    }
}

/// Values for all six slots.
///
/// Ranges are not enforced here. Out-of-range values pass through to the
/// renderer, which clamps per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    pub contrast: f32,
    pub saturate: f32,
    pub brightness: f32,
    pub sepia: f32,
    /// Degrees.
    pub hue_rotate: f32,
    /// Pixels.
    pub blur: f32,
}

impl FilterParams {
    /// Pass-through values. Fills the slots a preset leaves unspecified.
    pub const NEUTRAL: Self = Self {
        contrast: 1.0,
        saturate: 1.0,
        brightness: 1.0,
        sepia: 0.0,
        hue_rotate: 0.0,
        blur: 0.0,
    };

    /// Slider positions restored by a reset.
    pub const CUSTOM_DEFAULTS: Self = Self {
        contrast: 1.4,
        saturate: 0.5,
        brightness: 0.8,
        sepia: 0.0,
        hue_rotate: -20.0,
        blur: 0.0,
    };

    /// Read one slot.
    pub const fn get(&self, id: ParameterId) -> f32 {
        match id {
            ParameterId::Contrast => self.contrast,
            ParameterId::Saturate => self.saturate,
            ParameterId::Brightness => self.brightness,
            ParameterId::Sepia => self.sepia,
            ParameterId::HueRotate => self.hue_rotate,
            ParameterId::Blur => self.blur,
        }
    }

    /// Overwrite one slot, leaving the other five untouched.
    pub fn set(&mut self, id: ParameterId, value: f32) {
        let slot = match id {
            ParameterId::Contrast => &mut self.contrast,
            ParameterId::Saturate => &mut self.saturate,
            ParameterId::Brightness => &mut self.brightness,
            ParameterId::Sepia => &mut self.sepia,
            ParameterId::HueRotate => &mut self.hue_rotate,
            ParameterId::Blur => &mut self.blur,
        };
        *slot = value;
    }

    /// Neutral values with the given overrides applied in order.
    pub fn neutral_with(overrides: &[(ParameterId, f32)]) -> Self {
        let mut params = Self::NEUTRAL;
        for &(id, value) in overrides {
            params.set(id, value);
        }
        params
    }

    /// All six slots in pipeline order.
    pub fn to_parameters(&self) -> [FilterParameter; 6] {
        ParameterId::ORDER.map(|id| FilterParameter::new(id, self.get(id)))
    }
}

impl Default for FilterParams {
    /// Slider defaults, not the neutral pipeline.
    fn default() -> Self {
        Self::CUSTOM_DEFAULTS
    }
}
