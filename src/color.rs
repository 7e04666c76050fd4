use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::vec3::Vec3;

pub const WHITE: Vec3 = Vec3::new(255.0, 255.0, 255.0);
pub const BLACK: Vec3 = Vec3::new(0.0, 0.0, 0.0);
pub const RED: Vec3 = Vec3::new(255.0, 0.0, 0.0);
pub const GREEN: Vec3 = Vec3::new(0.0, 255.0, 0.0);
pub const BLUE: Vec3 = Vec3::new(0.0, 0.0, 255.0);
pub const YELLOW: Vec3 = Vec3::new(150.0, 150.0, 0.0);
pub const CYAN: Vec3 = Vec3::new(0.0, 190.0, 220.0);
pub const GREY: Vec3 = Vec3::new(100.0, 100.0, 100.0);

const PALETTE: [(&str, Vec3); 8] = [
    ("white", WHITE),
    ("black", BLACK),
    ("red", RED),
    ("green", GREEN),
    ("blue", BLUE),
    ("yellow", YELLOW),
    ("cyan", CYAN),
    ("grey", GREY),
];

pub fn by_name(name: &str) -> Option<Vec3> {
    PALETTE
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, c)| *c)
}

/// A color as written in a scene file: a palette name or an `[r, g, b]`
/// triple in 0..=255.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorDesc {
    Named(String),
    Rgb(Vec3),
}

impl Default for ColorDesc {
    fn default() -> Self {
        ColorDesc::Named("white".to_owned())
    }
}

impl ColorDesc {
    pub fn resolve(&self) -> Result<Vec3> {
        let c = match self {
            ColorDesc::Named(name) => by_name(name)
                .ok_or_else(|| Error::InvalidScene(format!("unknown color '{name}'")))?,
            ColorDesc::Rgb(c) => *c,
        };
        check_color(c)?;
        Ok(c)
    }
}

pub fn check_color(c: Vec3) -> Result<()> {
    let in_range = |v: f64| (0.0..=255.0).contains(&v);
    if in_range(c.x) && in_range(c.y) && in_range(c.z) {
        Ok(())
    } else {
        Err(Error::InvalidScene(format!(
            "color components must be in 0..=255: {:?}",
            c
        )))
    }
}

/// Truncates, does not round.
pub fn to_rgb8(c: Vec3) -> [u8; 3] {
    [
        c.x.clamp(0.0, 255.0) as u8,
        c.y.clamp(0.0, 255.0) as u8,
        c.z.clamp(0.0, 255.0) as u8,
    ]
}
