use crate::error::{Error, Result};
use crate::vec3::Float;
use crate::vec3::Point;
use crate::vec3::Vec3;
use colored::Colorize;

/// Inverse-square falloff scale of point lights.
pub const POINT_LIGHT_FALLOFF: Float = 50.0;

#[derive(Debug, Clone)]
pub struct AmbientLight {
    pub color: Vec3,
    pub power: Float,
}

#[derive(Debug, Clone)]
pub struct PointLight {
    pub pos: Point,
    pub color: Vec3,
    pub power: Float,
}

/// Light at infinity; `dir` is the unit direction the light travels in.
#[derive(Debug, Clone)]
pub struct VectorLight {
    pub dir: Vec3,
    pub color: Vec3,
    pub power: Float,
}

#[derive(Debug, Clone)]
pub enum Light {
    Directional(VectorLight),
    Point(PointLight),
    Ambient(AmbientLight),
}

fn check_power(power: Float) -> Result<()> {
    if power >= 0.0 && power.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidScene(format!(
            "light power must be non-negative, got {power}"
        )))
    }
}

impl Light {
    pub fn directional(dir: Vec3, color: Vec3, power: Float) -> Result<Light> {
        check_power(power)?;
        let dir = dir.try_normalize().ok_or_else(|| {
            Error::InvalidScene(format!("directional light needs a direction, got {:?}", dir))
        })?;
        Ok(Light::Directional(VectorLight { dir, color, power }))
    }
    pub fn point(pos: Point, color: Vec3, power: Float) -> Result<Light> {
        check_power(power)?;
        if !pos.is_finite() {
            return Err(Error::InvalidScene(format!("point light at {:?}", pos)));
        }
        Ok(Light::Point(PointLight { pos, color, power }))
    }
    pub fn ambient(color: Vec3, power: Float) -> Result<Light> {
        check_power(power)?;
        Ok(Light::Ambient(AmbientLight { color, power }))
    }

    /// Direction from `point` towards the light. Zero for ambient light.
    pub fn shadow_direction(&self, point: Point) -> Vec3 {
        match self {
            Light::Directional(l) => -l.dir,
            Light::Point(l) => l.pos - point,
            Light::Ambient(_) => Vec3::zero(),
        }
    }

    pub fn intensity_at(&self, point: Point, normal: Vec3) -> Float {
        match self {
            Light::Directional(l) => (-l.dir).dot(normal).max(0.0) * l.power,
            Light::Point(l) => {
                let light_vec = l.pos - point;
                let dist_sq = light_vec.dot(light_vec);
                match light_vec.try_normalize() {
                    Some(to_light) => {
                        to_light.dot(normal).max(0.0) * l.power * (POINT_LIGHT_FALLOFF / dist_sq)
                    }
                    None => 0.0,
                }
            }
            Light::Ambient(l) => l.power,
        }
    }

    pub fn display(&self) {
        let (name, s) = match self {
            Light::Directional(l) => ("vec-light", format!("{:3} {:?} {:?}", l.power, l.dir, l.color)),
            Light::Point(l) => ("point-light", format!("{:3} {:?} {:?}", l.power, l.pos, l.color)),
            Light::Ambient(l) => ("ambient", format!("{:3} {:?}", l.power, l.color)),
        };
        println!("-- {:12}: {}", name.blue(), s.dimmed());
    }
}
