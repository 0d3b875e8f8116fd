//! Axis-aligned bounding boxes and sphere-distance tests.
//!
//! Every collision query in the simulation goes through here: platform
//! landings, projectile containment, pickup proximity, and build placement.

use glam::Vec3;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` with full extents `size`
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Height of the top face
    pub fn top(&self) -> f32 {
        self.max.y
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Whether the point sits above the box footprint in the xz plane
    pub fn contains_xz(&self, p: Vec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.z >= self.min.z && p.z <= self.max.z
    }
}

/// Sphere test on squared distance, avoiding the sqrt
pub fn within(a: Vec3, b: Vec3, radius: f32) -> bool {
    a.distance_squared(b) <= radius * radius
}

/// Intersect a downward-facing ray cast from `origin` along `dir` with the top
/// face of the box. Returns the distance along the ray, if hit.
pub fn ray_hits_top(origin: Vec3, dir: Vec3, aabb: &Aabb) -> Option<f32> {
    let top = aabb.top();
    if dir.y.abs() < 1e-6 {
        return None;
    }
    let t = (top - origin.y) / dir.y;
    if t <= 0.0 {
        return None;
    }
    let hit = origin + dir * t;
    if aabb.contains_xz(hit) {
        Some(t)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_intersection_and_containment() {
        let a = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        let b = Aabb::from_center_size(Vec3::new(1.5, 0.0, 0.0), Vec3::splat(2.0));
        let c = Aabb::from_center_size(Vec3::new(5.0, 0.0, 0.0), Vec3::splat(2.0));

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.contains_point(Vec3::new(0.9, 0.9, -0.9)));
        assert!(!a.contains_point(Vec3::new(1.1, 0.0, 0.0)));
    }

    #[test]
    fn sphere_test_uses_radius() {
        assert!(within(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0), 1.5));
        assert!(!within(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), 1.5));
    }

    #[test]
    fn ray_hits_platform_top_within_footprint() {
        let platform = Aabb::from_center_size(Vec3::new(0.0, 2.0, 0.0), Vec3::new(4.0, 1.0, 4.0));
        let origin = Vec3::new(0.0, 5.0, 5.0);
        let dir = (Vec3::new(0.0, 2.5, 0.0) - origin).normalize();

        let t = ray_hits_top(origin, dir, &platform).expect("ray should hit");
        let hit = origin + dir * t;
        assert!((hit.y - platform.top()).abs() < 1e-4);
        assert!(platform.contains_xz(hit));

        // A ray pointing away never hits
        assert!(ray_hits_top(origin, Vec3::new(0.0, 1.0, 0.0), &platform).is_none());
    }
}
