pub mod aabb;
pub mod camera;
pub mod color;
pub mod error;
pub mod image;
pub mod light;
pub mod material;
pub mod render;
pub mod scene;
pub mod three_d;
pub mod vec3;

pub use error::{Error, Result};

use vec3::Float;
use vec3::Point;
use vec3::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub orig: Point,
    pub dir: Vec3,
}

impl Ray {
    /// Ray from `orig` through `end`. Panics if both points coincide.
    pub fn new(orig: Point, end: Point) -> Ray {
        Ray {
            orig,
            dir: (end - orig).normalize(),
        }
    }
    pub fn try_new(orig: Point, end: Point) -> Option<Ray> {
        (end - orig).try_normalize().map(|dir| Ray { orig, dir })
    }
    pub fn point_at(&self, t: Float) -> Point {
        self.orig + self.dir * t
    }
}

/// Where a ray meets a primitive. `distance` may be non-positive; only
/// forward hits count towards the scene collision.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub point: Point,
    pub distance: Float,
    pub normal: Vec3,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub num_rays_primary: u64,
    pub num_rays_shadow: u64,
    pub num_rays_reflection: u64,
    pub num_intersects_sphere: u64,
    pub num_intersects_box: u64,
}

impl RenderStats {
    pub fn add(&mut self, other: RenderStats) {
        self.num_rays_primary      += other.num_rays_primary;
        self.num_rays_shadow       += other.num_rays_shadow;
        self.num_rays_reflection   += other.num_rays_reflection;
        self.num_intersects_sphere += other.num_intersects_sphere;
        self.num_intersects_box    += other.num_intersects_box;
    }
}

pub struct ProgressFunc {
    pub func: Box<dyn Fn(f32) + Send + Sync>,
}
