//! Parameter values

use crate::graphics::{Canvas, Color, Group, Image};
use crate::kind::CoreKind;
use serde::{Deserialize, Serialize};

/// A value stored for a node parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Color(Color),
    Canvas(Canvas),
    Group(Group),
    Image(Image),
}

impl Value {
    /// Storage category this value belongs to
    pub fn kind(&self) -> CoreKind {
        match self {
            Self::Int(_) => CoreKind::Int,
            Self::Float(_) => CoreKind::Float,
            Self::String(_) => CoreKind::String,
            Self::Color(_) => CoreKind::Color,
            Self::Canvas(_) => CoreKind::Canvas,
            Self::Group(_) => CoreKind::VectorGroup,
            Self::Image(_) => CoreKind::Image,
        }
    }

    /// Numeric view of ints and floats
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{:?}", v),
            Self::String(v) => write!(f, "{:?}", v),
            Self::Color(c) => write!(f, "rgba({}, {}, {}, {})", c.r, c.g, c.b, c.a),
            Self::Canvas(c) => write!(f, "canvas({}x{})", c.width, c.height),
            Self::Group(g) => write!(f, "group({} paths)", g.paths.len()),
            Self::Image(i) => write!(f, "image({}x{})", i.width, i.height),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Color> for Value {
    fn from(v: Color) -> Self {
        Self::Color(v)
    }
}

impl From<Canvas> for Value {
    fn from(v: Canvas) -> Self {
        Self::Canvas(v)
    }
}

impl From<Group> for Value {
    fn from(v: Group) -> Self {
        Self::Group(v)
    }
}

impl From<Image> for Value {
    fn from(v: Image) -> Self {
        Self::Image(v)
    }
}
