//! Declared parameter kinds, their storage categories and bounding policies

use crate::graphics::{Canvas, Color, Group, Image};
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Storage category a declared kind reduces to for validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreKind {
    Int,
    Float,
    String,
    Color,
    Canvas,
    VectorGroup,
    Image,
}

impl CoreKind {
    /// Whether bounds and clamping apply to this kind
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }

    /// Default value every parameter of this kind starts with
    pub fn default_value(self) -> Value {
        match self {
            Self::Int => Value::Int(0),
            Self::Float => Value::Float(0.0),
            Self::String => Value::String(String::new()),
            Self::Color => Value::Color(Color::default()),
            Self::Canvas => Value::Canvas(Canvas::default()),
            Self::VectorGroup => Value::Group(Group::default()),
            Self::Image => Value::Image(Image::default()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Color => "color",
            Self::Canvas => "canvas",
            Self::VectorGroup => "vector_group",
            Self::Image => "image",
        }
    }
}

impl std::fmt::Display for CoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind a parameter is declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredKind {
    Int,
    Float,
    String,
    Toggle,
    Angle,
    Color,
    Canvas,
    VectorGroup,
    Image,
    Seed,
    Menu,
    Text,
    File,
    Font,
}

impl DeclaredKind {
    pub const ALL: [DeclaredKind; 14] = [
        Self::Int,
        Self::Float,
        Self::String,
        Self::Toggle,
        Self::Angle,
        Self::Color,
        Self::Canvas,
        Self::VectorGroup,
        Self::Image,
        Self::Seed,
        Self::Menu,
        Self::Text,
        Self::File,
        Self::Font,
    ];

    pub fn core_kind(self) -> CoreKind {
        match self {
            Self::Int | Self::Toggle | Self::Seed => CoreKind::Int,
            Self::Float | Self::Angle => CoreKind::Float,
            Self::String | Self::Menu | Self::Text | Self::File | Self::Font => CoreKind::String,
            Self::Color => CoreKind::Color,
            Self::Canvas => CoreKind::Canvas,
            Self::VectorGroup => CoreKind::VectorGroup,
            Self::Image => CoreKind::Image,
        }
    }

    /// Range enforced regardless of the configured bounding method
    pub fn fixed_range(self) -> Option<(f64, f64)> {
        match self {
            Self::Toggle => Some((0.0, 1.0)),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Toggle => "toggle",
            Self::Angle => "angle",
            Self::Color => "color",
            Self::Canvas => "canvas",
            Self::VectorGroup => "vector_group",
            Self::Image => "image",
            Self::Seed => "seed",
            Self::Menu => "menu",
            Self::Text => "text",
            Self::File => "file",
            Self::Font => "font",
        }
    }
}

impl std::fmt::Display for DeclaredKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DeclaredKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| format!("unknown parameter kind: {}", s))
    }
}

/// Policy for numeric values that fall outside a parameter's range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundingMethod {
    /// Range is informational only
    #[default]
    None,
    /// Range is a hint for editors; values outside it are kept
    Soft,
    /// Values are clamped into the range
    Hard,
}

impl std::fmt::Display for BoundingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Soft => write!(f, "soft"),
            Self::Hard => write!(f, "hard"),
        }
    }
}
