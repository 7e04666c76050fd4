use colored::Colorize;

use crate::aabb::Aabb;
use crate::error::{Error, Result};
use crate::material::Material;
use crate::vec3::Float;
use crate::vec3::Point;
use crate::vec3::Vec3;
use crate::Hit;
use crate::Ray;
use crate::RenderStats;

#[derive(Debug, Clone)]
pub struct Sphere {
    pub center: Point,
    pub radius: Float,
    pub material: Material,
}

impl Sphere {
    pub fn new(center: Point, radius: Float, material: Material) -> Result<Sphere> {
        if !center.is_finite() {
            return Err(Error::InvalidScene(format!("sphere center {:?}", center)));
        }
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(Error::InvalidScene(format!(
                "sphere radius must be positive, got {radius}"
            )));
        }
        Ok(Sphere {
            center,
            radius,
            material,
        })
    }

    pub fn check_intersection(&self, ray: &Ray) -> Option<Hit> {
        let oc = ray.orig - self.center;
        let a = ray.dir.dot(ray.dir);
        let b = 2.0 * ray.dir.dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;

        let delta = b * b - 4.0 * a * c;
        if delta <= 0.0 {
            return None;
        }
        let delta_sqrt = delta.sqrt();
        let t1 = (-b + delta_sqrt) / (2.0 * a);
        let t2 = (-b - delta_sqrt) / (2.0 * a);

        let t = if t1 * t2 > 0.0 {
            if t1 < 0.0 {
                // sphere is behind the ray
                return None;
            }
            t1.min(t2)
        } else if t1 > 0.0 {
            // origin is inside: exit point
            t1
        } else {
            t2
        };

        let point = ray.point_at(t);
        let mut normal = self.get_normal(point);
        if self.check_point_in_object(ray.orig) {
            normal = -normal;
        }
        Some(Hit {
            point,
            distance: t,
            normal,
        })
    }

    pub fn get_normal(&self, point: Point) -> Vec3 {
        (point - self.center).normalize()
    }

    pub fn check_point_in_object(&self, point: Point) -> bool {
        (point - self.center).norm() < self.radius
    }
}

#[derive(Debug, Clone)]
pub enum Primitive {
    Sphere(Sphere),
    Box(Aabb),
}

impl Primitive {
    pub fn check_intersection(&self, stats: &mut RenderStats, ray: &Ray) -> Option<Hit> {
        match self {
            Primitive::Sphere(s) => {
                stats.num_intersects_sphere += 1;
                s.check_intersection(ray)
            }
            Primitive::Box(b) => {
                stats.num_intersects_box += 1;
                b.check_intersection(ray)
            }
        }
    }
    pub fn get_normal(&self, point: Point) -> Vec3 {
        match self {
            Primitive::Sphere(s) => s.get_normal(point),
            Primitive::Box(b) => b.get_normal(point),
        }
    }
    pub fn check_point_in_object(&self, point: Point) -> bool {
        match self {
            Primitive::Sphere(s) => s.check_point_in_object(point),
            Primitive::Box(b) => b.check_point_in_object(point),
        }
    }
    pub fn material(&self) -> &Material {
        match self {
            Primitive::Sphere(s) => &s.material,
            Primitive::Box(b) => &b.material,
        }
    }
    pub fn display(&self) {
        let (kind, s) = match self {
            Primitive::Sphere(sp) => (
                "sphere",
                format!("{:?} radius={}", sp.center, sp.radius),
            ),
            Primitive::Box(b) => ("box", format!("{:?} extents={:?}", b.center, b.extents)),
        };
        let m = self.material();
        let s = format!("{s} albedo={} reflective={}", m.albedo, m.reflective).dimmed();
        println!("-- {:12}: {s}", kind.blue());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::RED;

    fn sphere(center: Point, radius: Float) -> Sphere {
        Sphere::new(center, radius, Material::new(RED, 0.9, false).unwrap()).unwrap()
    }

    #[test]
    fn hit_in_front() {
        let s = sphere(Vec3::new(0.0, 0.0, -60.0), 20.0);
        let ray = Ray::new(Vec3::zero(), Vec3::new(0.0, 0.0, -1.0));
        let hit = s.check_intersection(&ray).expect("hit");
        assert!((hit.distance - 40.0).abs() < 1e-9);
        assert!((hit.normal - Vec3::new(0.0, 0.0, 1.0)).norm() < 1e-9);
        assert!((hit.point - Vec3::new(0.0, 0.0, -40.0)).norm() < 1e-9);
    }

    #[test]
    fn hit_lies_on_surface_with_unit_normal() {
        let s = sphere(Vec3::new(3.0, -2.0, -30.0), 7.5);
        for (x, y) in [(0.0, 0.0), (0.1, -0.05), (-0.15, 0.02), (0.2, 0.2)] {
            let ray = Ray::new(Vec3::zero(), Vec3::new(x, y, -1.0));
            if let Some(hit) = s.check_intersection(&ray) {
                let r = (ray.point_at(hit.distance) - s.center).norm();
                assert!((r - s.radius).abs() < 1e-9);
                assert!((hit.normal.norm() - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn miss_and_behind() {
        let s = sphere(Vec3::new(0.0, 0.0, -60.0), 20.0);
        let sideways = Ray::new(Vec3::zero(), Vec3::new(1.0, 0.0, 0.0));
        assert!(s.check_intersection(&sideways).is_none());
        let away = Ray::new(Vec3::zero(), Vec3::new(0.0, 0.0, 1.0));
        assert!(s.check_intersection(&away).is_none());
    }

    #[test]
    fn grazing_ray_misses() {
        let s = sphere(Vec3::new(0.0, 0.0, -10.0), 1.0);
        let tangent = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, -1.0));
        assert!(s.check_intersection(&tangent).is_none());
    }

    #[test]
    fn inside_gets_exit_point_and_inward_normal() {
        let s = sphere(Vec3::zero(), 5.0);
        assert!(s.check_point_in_object(Vec3::new(1.0, 0.0, 0.0)));
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
        let hit = s.check_intersection(&ray).expect("hit");
        assert!((hit.distance - 4.0).abs() < 1e-9);
        assert!((hit.normal - Vec3::new(-1.0, 0.0, 0.0)).norm() < 1e-9);
        // facing against the ray direction
        assert!(hit.normal.dot(ray.dir) < 0.0);
    }

    #[test]
    fn rejects_bad_radius() {
        let m = Material::new(RED, 0.5, false).unwrap();
        assert!(Sphere::new(Vec3::zero(), 0.0, m.clone()).is_err());
        assert!(Sphere::new(Vec3::zero(), -1.0, m).is_err());
    }

    #[test]
    fn primitive_dispatch_counts_tests() {
        let p = Primitive::Sphere(sphere(Vec3::new(0.0, 0.0, -5.0), 1.0));
        let mut stats = RenderStats::default();
        let ray = Ray::new(Vec3::zero(), Vec3::new(0.0, 0.0, -1.0));
        assert!(p.check_intersection(&mut stats, &ray).is_some());
        assert_eq!(stats.num_intersects_sphere, 1);
        assert!(!p.check_point_in_object(Vec3::zero()));
        assert_eq!(p.get_normal(Vec3::new(0.0, 0.0, -4.0)), Vec3::new(0.0, 0.0, 1.0));
    }
}
