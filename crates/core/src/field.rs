use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A named per-point scalar attribute of a [`PointCloud`](crate::PointCloud).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    X,
    Y,
    Z,
    Intensity,
    NormalX,
    NormalY,
    NormalZ,
    R,
    G,
    B,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unknown point field `{0}`")]
    UnknownField(String),
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::X,
        Field::Y,
        Field::Z,
        Field::Intensity,
        Field::NormalX,
        Field::NormalY,
        Field::NormalZ,
        Field::R,
        Field::G,
        Field::B,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::X => "x",
            Field::Y => "y",
            Field::Z => "z",
            Field::Intensity => "intensity",
            Field::NormalX => "normal_x",
            Field::NormalY => "normal_y",
            Field::NormalZ => "normal_z",
            Field::R => "r",
            Field::G => "g",
            Field::B => "b",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.trim().to_ascii_lowercase().as_str() {
            "x" => Field::X,
            "y" => Field::Y,
            "z" => Field::Z,
            "intensity" | "i" => Field::Intensity,
            "normal_x" | "nx" => Field::NormalX,
            "normal_y" | "ny" => Field::NormalY,
            "normal_z" | "nz" => Field::NormalZ,
            "r" | "red" => Field::R,
            "g" | "green" => Field::G,
            "b" | "blue" => Field::B,
            _ => return Err(FieldError::UnknownField(s.to_string())),
        };
        Ok(field)
    }
}

/// Range test on one scalar field.
///
/// With `negative == false` a point is admitted when `min <= value <= max`.
/// With `negative == true` the interval is cut out instead: a point is
/// dropped when `min < value < max`, so the bounds themselves survive.
/// A NaN value fails every comparison and is admitted in both modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldLimits {
    pub field: Field,
    pub min: f32,
    pub max: f32,
    pub negative: bool,
}

impl FieldLimits {
    pub fn new(field: Field, min: f32, max: f32) -> Self {
        Self {
            field,
            min,
            max,
            negative: false,
        }
    }

    pub fn negative(mut self, negative: bool) -> Self {
        self.negative = negative;
        self
    }

    pub fn admits(&self, value: f32) -> bool {
        if self.negative {
            !(value > self.min && value < self.max)
        } else {
            !(value > self.max || value < self.min)
        }
    }
}
