use error_stack::report;
use thiserror::Error;

/// An opaque RGB color with each component normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
#[serde(try_from = "[f32; 3]")]
pub struct RgbColor {
    red: f32,
    green: f32,
    blue: f32,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Color components must be finite floats between 0 and 1")]
    OutOfRange,
}

impl RgbColor {
    pub fn new(red: f32, green: f32, blue: f32) -> error_stack::Result<Self, ColorError> {
        for (name, component) in [("red", red), ("green", green), ("blue", blue)] {
            if !(0.0..=1.0).contains(&component) {
                return Err(report!(ColorError::OutOfRange)
                    .attach_printable(format!("{name} component is {component}")));
            }
        }

        Ok(RgbColor { red, green, blue })
    }

    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        RgbColor {
            red: f32::from(red) / 255.0,
            green: f32::from(green) / 255.0,
            blue: f32::from(blue) / 255.0,
        }
    }

    pub fn red(&self) -> f32 {
        self.red
    }

    pub fn green(&self) -> f32 {
        self.green
    }

    pub fn blue(&self) -> f32 {
        self.blue
    }

    /// Component-wise comparison within `tolerance`. The API stores colors as
    /// floats and may hand them back with rounding noise.
    pub fn approx_eq(&self, other: &RgbColor, tolerance: f32) -> bool {
        (self.red - other.red).abs() <= tolerance
            && (self.green - other.green).abs() <= tolerance
            && (self.blue - other.blue).abs() <= tolerance
    }
}

impl TryFrom<[f32; 3]> for RgbColor {
    type Error = String;

    fn try_from([red, green, blue]: [f32; 3]) -> Result<Self, Self::Error> {
        RgbColor::new(red, green, blue).map_err(|report| format!("{report:?}"))
    }
}
