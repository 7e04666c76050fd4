use crate::color::check_color;
use crate::error::{Error, Result};
use crate::vec3::{Float, Vec3};

pub const DEFAULT_BIAS: Float = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub albedo: Float,
    pub reflective: bool,
    /// Offset along the normal for secondary ray origins.
    pub bias: Float,
}

impl Material {
    pub fn new(color: Vec3, albedo: Float, reflective: bool) -> Result<Material> {
        Material::with_bias(color, albedo, reflective, DEFAULT_BIAS)
    }
    pub fn with_bias(color: Vec3, albedo: Float, reflective: bool, bias: Float) -> Result<Material> {
        check_color(color)?;
        if !(0.0..=1.0).contains(&albedo) {
            return Err(Error::InvalidScene(format!(
                "albedo must be in [0, 1], got {albedo}"
            )));
        }
        if !(bias > 0.0 && bias.is_finite()) {
            return Err(Error::InvalidScene(format!(
                "bias must be positive, got {bias}"
            )));
        }
        Ok(Material {
            color,
            albedo,
            reflective,
            bias,
        })
    }
}
