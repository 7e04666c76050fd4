use crate::color;
use crate::color::to_rgb8;
use crate::error::{Error, Result};
use crate::scene::Scene;
use crate::three_d::Primitive;
use crate::vec3::Float;
use crate::vec3::Point;
use crate::vec3::Vec3;
use crate::Ray;
use crate::RenderStats;
use colored::Colorize;

/// Weight of the reflected color when blending a mirror bounce.
const REFLECTION_WEIGHT: Float = 0.9;

#[derive(Debug, Clone, Copy)]
pub struct SceneHit<'a> {
    pub primitive: &'a Primitive,
    pub point: Point,
    pub normal: Vec3,
    pub distance: Float,
}

/// Pinhole camera looking down -Z. The rays are generated once, column by
/// column, and owned by the camera.
#[derive(Debug, Clone)]
pub struct Camera {
    pub near_plane: Float,
    pub width: u32,
    pub height: u32,
    pub fov: Float,
    pub pos: Point,
    pub background: Vec3,
    rays: Vec<Ray>,
}

impl Camera {
    pub fn new(near_plane: Float, width: u32, height: u32, fov: Float, pos: Point) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidCamera(format!("resolution {width}x{height}")));
        }
        if !(near_plane > 0.0 && near_plane.is_finite()) {
            return Err(Error::InvalidCamera(format!("near plane {near_plane}")));
        }
        if !(fov > 0.0 && fov < std::f64::consts::PI) {
            return Err(Error::InvalidCamera(format!("fov {fov} rad")));
        }
        if !pos.is_finite() {
            return Err(Error::InvalidCamera(format!("position {:?}", pos)));
        }
        let mut c = Self {
            near_plane,
            width,
            height,
            fov,
            pos,
            background: color::WHITE,
            rays: vec![],
        };
        c.rays = c.generate_rays();
        Ok(c)
    }

    pub fn with_background(mut self, background: Vec3) -> Self {
        self.background = background;
        self
    }

    pub fn aspect(&self) -> Float {
        self.width as Float / self.height as Float
    }

    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    // evenly spaced in [0, 1], both ends included
    fn lin_space(i: u32, n: u32) -> Float {
        if n > 1 {
            i as Float / (n - 1) as Float
        } else {
            0.0
        }
    }

    fn generate_rays(&self) -> Vec<Ray> {
        let half_width = (self.fov / 2.0).tan() * self.near_plane;
        let half_height = half_width / self.aspect();
        let mut rays = Vec::with_capacity(self.width as usize * self.height as usize);

        for w in 0..self.width {
            let u = Self::lin_space(w, self.width);
            for h in 0..self.height {
                let v = Self::lin_space(h, self.height);
                let pixel = Vec3::new(
                    (1.0 - 2.0 * u) * half_width,
                    (1.0 - 2.0 * v) * half_height,
                    -self.near_plane,
                );
                rays.push(Ray::new(self.pos, self.pos + pixel));
            }
        }
        rays
    }

    /// Nearest forward hit; on equal distances the first primitive wins.
    pub fn check_ray_scene_collision<'a>(
        stats: &mut RenderStats,
        ray: &Ray,
        scene: &'a Scene,
    ) -> Option<SceneHit<'a>> {
        let mut nearest: Option<SceneHit<'a>> = None;

        for obj in &scene.primitives {
            let Some(hit) = obj.check_intersection(stats, ray) else {
                continue;
            };
            if hit.distance <= 0.0 {
                continue;
            }
            if nearest.is_none_or(|n| hit.distance < n.distance) {
                nearest = Some(SceneHit {
                    primitive: obj,
                    point: hit.point,
                    normal: hit.normal,
                    distance: hit.distance,
                });
            }
        }
        nearest
    }

    fn is_shadowed(stats: &mut RenderStats, shadow_ray: &Ray, scene: &Scene) -> bool {
        stats.num_rays_shadow += 1;
        Self::check_ray_scene_collision(stats, shadow_ray, scene).is_some()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn shade(
        stats: &mut RenderStats,
        point: Point,
        normal: Vec3,
        bias: Float,
        base_color: Vec3,
        albedo: Float,
        scene: &Scene,
    ) -> Vec3 {
        let check_point = point + normal * bias;

        let total = scene.lights.iter().fold(0.0, |acc, light| {
            let shadow_dir = light.shadow_direction(point);
            let occluded = match Ray::try_new(check_point, check_point + shadow_dir) {
                Some(shadow_ray) => Self::is_shadowed(stats, &shadow_ray, scene),
                // ambient light: nothing to test against
                None => false,
            };
            if occluded {
                acc
            } else {
                acc + light.intensity_at(point, normal)
            }
        });

        base_color * (albedo * total.clamp(0.0, 1.0))
    }

    /// One mirror bounce. Returns `base_color` when the reflected ray escapes.
    #[allow(clippy::too_many_arguments)]
    pub fn reflect(
        stats: &mut RenderStats,
        point: Point,
        normal: Vec3,
        bias: Float,
        incident: &Ray,
        base_color: Vec3,
        scene: &Scene,
    ) -> Vec3 {
        stats.num_rays_reflection += 1;
        let check_point = point + normal * bias;
        let reflected = Ray {
            orig: check_point,
            dir: incident.dir.reflect(normal).normalize(),
        };
        match Self::check_ray_scene_collision(stats, &reflected, scene) {
            Some(hit) => {
                let m = hit.primitive.material();
                let c_reflect =
                    Self::shade(stats, hit.point, hit.normal, bias, m.color, m.albedo, scene);
                base_color * (1.0 - REFLECTION_WEIGHT) + c_reflect * REFLECTION_WEIGHT
            }
            None => base_color,
        }
    }

    pub fn trace(&self, stats: &mut RenderStats, ray: &Ray, scene: &Scene) -> Vec3 {
        stats.num_rays_primary += 1;
        let Some(hit) = Self::check_ray_scene_collision(stats, ray, scene) else {
            return self.background;
        };
        let m = hit.primitive.material();
        let c = Self::shade(stats, hit.point, hit.normal, m.bias, m.color, m.albedo, scene);
        if m.reflective {
            Self::reflect(stats, hit.point, hit.normal, m.bias, ray, c, scene)
        } else {
            c
        }
    }

    /// RGB bytes of one pixel column, top row first.
    pub fn render_column(&self, stats: &mut RenderStats, column: u32, scene: &Scene) -> Vec<u8> {
        let h = self.height as usize;
        let start = column as usize * h;
        self.rays[start..start + h]
            .iter()
            .flat_map(|ray| to_rgb8(self.trace(stats, ray, scene)))
            .collect()
    }

    /// Fills a column with the background color.
    pub fn blank_column(&self) -> Vec<u8> {
        let c = to_rgb8(self.background);
        c.iter().copied().cycle().take(3 * self.height as usize).collect()
    }

    /// Sequential render of the whole image, in ray generation order.
    pub fn render_pixels(&self, scene: &Scene) -> Vec<u8> {
        let mut stats = RenderStats::default();
        (0..self.width)
            .flat_map(|w| self.render_column(&mut stats, w, scene))
            .collect()
    }

    pub fn display(&self) {
        let s = "camera:".green();
        let s_pos = format!("pos: {:?}", self.pos).dimmed();
        let s_fov = format!("fov: {:.3} rad near: {}", self.fov, self.near_plane).dimmed();
        let s_res = format!("res: {}x{}", self.width, self.height).dimmed();
        println!("-- {s} {s_pos}");
        println!("-- {s} {s_fov}");
        println!("-- {s} {s_res}");
    }
}
