//! Graphics payloads carried by parameter values
//!
//! These types are opaque to the parameter engine: it only checks which kind
//! of payload a value holds, never what is inside.

use serde::{Deserialize, Serialize};

/// RGBA color with components in 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }
}

impl Default for Color {
    /// Opaque black
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

/// A drawing surface holding a background and a set of vector groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub background: Color,
    #[serde(default)]
    pub items: Vec<Group>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            background: Color::rgb(1.0, 1.0, 1.0),
            items: Vec::new(),
        }
    }
}

/// A group of vector paths, each path a list of points
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub paths: Vec<Vec<[f64; 2]>>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, points: Vec<[f64; 2]>) -> Self {
        self.paths.push(points);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Raster image stored as tightly packed RGBA8 pixels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub pixels: Vec<u8>,
}

impl Image {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
