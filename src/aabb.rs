use crate::error::{Error, Result};
use crate::material::Material;
use crate::vec3::Float;
use crate::vec3::Point;
use crate::vec3::Vec3;
use crate::Hit;
use crate::Ray;

/*
 * Axis-Aligned box primitive.
 *
 *          +-------+ p_max
 *         /       /|
 *        +-------+ |
 *        |   c   | +
 *        |       |/
 *  p_min +-------+
 *
 * p_min = c - extents / 2, p_max = c + extents / 2
 */

#[derive(Debug, Clone)]
pub struct Aabb {
    pub center: Point,
    pub extents: Vec3,
    pub p_min: Point,
    pub p_max: Point,
    pub material: Material,
}

// Outward face normals, in tie-break order: X+, X-, Y+, Y-, Z+, Z-.
const FACES: [Vec3; 6] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(0.0, -1.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 0.0, -1.0),
];

impl Aabb {
    pub fn new(center: Point, extents: Vec3, material: Material) -> Result<Aabb> {
        if !center.is_finite() || !extents.is_finite() {
            return Err(Error::InvalidScene(format!(
                "box center {:?} extents {:?}",
                center, extents
            )));
        }
        if !extents.all_gt(Vec3::zero()) {
            return Err(Error::InvalidScene(format!(
                "box extents must be positive, got {:?}",
                extents
            )));
        }
        Ok(Aabb {
            center,
            extents,
            p_min: center - extents / 2.0,
            p_max: center + extents / 2.0,
            material,
        })
    }

    pub fn check_intersection(&self, ray: &Ray) -> Option<Hit> {
        let mut t_near = Float::NEG_INFINITY;
        let mut t_far = Float::INFINITY;

        for axis in 0..3 {
            let o = ray.orig[axis];
            let d = ray.dir[axis];
            if d == 0.0 {
                // parallel to this slab
                if o < self.p_min[axis] || o > self.p_max[axis] {
                    return None;
                }
                continue;
            }
            let mut t1 = (self.p_min[axis] - o) / d;
            let mut t2 = (self.p_max[axis] - o) / d;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_near = t_near.max(t1);
            t_far = t_far.min(t2);
            if t_near > t_far || t_far < 0.0 {
                return None;
            }
        }

        let inside = self.check_point_in_object(ray.orig);
        let t = if inside && t_near < 0.0 { t_far } else { t_near };
        let point = ray.point_at(t);
        let mut normal = self.get_normal(point);
        if inside {
            normal = -normal;
        }
        Some(Hit {
            point,
            distance: t,
            normal,
        })
    }

    /// Outward normal of the face plane nearest to `point`.
    pub fn get_normal(&self, point: Point) -> Vec3 {
        let dists = [
            (point.x - self.p_max.x).abs(),
            (point.x - self.p_min.x).abs(),
            (point.y - self.p_max.y).abs(),
            (point.y - self.p_min.y).abs(),
            (point.z - self.p_max.z).abs(),
            (point.z - self.p_min.z).abs(),
        ];
        let mut best = 0;
        for i in 1..dists.len() {
            if dists[i] < dists[best] {
                best = i;
            }
        }
        FACES[best]
    }

    pub fn check_point_in_object(&self, point: Point) -> bool {
        self.p_min.all_lt(point) && point.all_lt(self.p_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::GREY;

    fn unit_box(center: Point) -> Aabb {
        Aabb::new(
            center,
            Vec3::new(2.0, 2.0, 2.0),
            Material::new(GREY, 1.0, false).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn corners() {
        let b = unit_box(Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(b.p_min, Vec3::new(-1.0, -1.0, -6.0));
        assert_eq!(b.p_max, Vec3::new(1.0, 1.0, -4.0));
    }

    #[test]
    fn hit_front_face() {
        let b = unit_box(Vec3::new(0.0, 0.0, -5.0));
        let ray = Ray::new(Vec3::new(0.2, 0.3, 0.0), Vec3::new(0.2, 0.3, -1.0));
        let hit = b.check_intersection(&ray).expect("hit");
        assert!((hit.distance - 4.0).abs() < 1e-9);
        assert_eq!(hit.normal, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn oblique_hit_unit_normal() {
        let b = unit_box(Vec3::new(0.0, 0.0, -5.0));
        let ray = Ray::new(Vec3::new(3.0, 0.0, -5.0), Vec3::new(0.0, 0.1, -5.2));
        let hit = b.check_intersection(&ray).expect("hit");
        assert!((hit.normal.norm() - 1.0).abs() < 1e-12);
        assert_eq!(hit.normal, Vec3::new(1.0, 0.0, 0.0));
        assert!((hit.point.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn parallel_ray_outside_slab_misses() {
        let b = unit_box(Vec3::new(0.0, 0.0, -5.0));
        // dir.x == 0 and origin.x outside [-1, 1]; the other slabs would overlap
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(5.0, 0.0, -1.0));
        assert_eq!(ray.dir.x, 0.0);
        assert!(b.check_intersection(&ray).is_none());
        // same in y, with x aimed straight at the box
        let ray = Ray::new(Vec3::new(0.0, -3.0, 0.0), Vec3::new(0.0, -3.0, -1.0));
        assert!(b.check_intersection(&ray).is_none());
    }

    #[test]
    fn parallel_ray_inside_slab_hits() {
        let b = unit_box(Vec3::new(0.0, 0.0, -5.0));
        let ray = Ray::new(Vec3::new(0.5, -0.5, 0.0), Vec3::new(0.5, -0.5, -1.0));
        assert!(b.check_intersection(&ray).is_some());
    }

    #[test]
    fn behind_misses() {
        let b = unit_box(Vec3::new(0.0, 0.0, -5.0));
        let ray = Ray::new(Vec3::zero(), Vec3::new(0.0, 0.0, 1.0));
        assert!(b.check_intersection(&ray).is_none());
    }

    #[test]
    fn inside_exits_with_inward_normal() {
        let b = unit_box(Vec3::zero());
        assert!(b.check_point_in_object(Vec3::new(0.5, 0.0, 0.0)));
        let ray = Ray::new(Vec3::new(0.5, 0.0, 0.0), Vec3::new(0.5, 1.0, 0.0));
        let hit = b.check_intersection(&ray).expect("hit");
        assert!((hit.distance - 1.0).abs() < 1e-9);
        assert_eq!(hit.normal, Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn surface_point_is_not_inside() {
        let b = unit_box(Vec3::zero());
        assert!(!b.check_point_in_object(Vec3::new(1.0, 0.0, 0.0)));
        assert!(!b.check_point_in_object(Vec3::new(0.0, 0.0, 3.0)));
    }

    #[test]
    fn normal_ties_follow_face_order() {
        let b = unit_box(Vec3::zero());
        // equidistant from the X+ and Y+ planes
        assert_eq!(b.get_normal(Vec3::new(1.0, 1.0, 0.0)), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(b.get_normal(Vec3::new(-1.0, 1.0, 0.0)), Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(b.get_normal(Vec3::new(0.0, -1.0, -1.0)), Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn rejects_flat_box() {
        let m = Material::new(GREY, 1.0, false).unwrap();
        assert!(Aabb::new(Vec3::zero(), Vec3::new(1.0, 0.0, 1.0), m).is_err());
    }
}
