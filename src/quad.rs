//! Quad primitive.
//!
//! A finite parallelogram spanned by two edge vectors from a corner point.

use glam::Vec3A;
use std::sync::Arc;

use crate::hittable::HitRecord;
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Parallelogram primitive spanned by edge vectors `u` and `v` from corner `q`.
///
/// The plane normal, plane offset and the projection vector `w` are
/// precomputed at construction so each hit test recovers the planar
/// coordinates in O(1) without solving a 2x2 system.
#[derive(Debug, Clone)]
pub struct Quad {
    /// Origin corner of the parallelogram.
    q: Vec3A,
    /// First edge vector.
    u: Vec3A,
    /// Second edge vector.
    v: Vec3A,
    /// Projection vector n / (n.n) with n = u x v.
    w: Vec3A,
    /// Unit plane normal.
    normal: Vec3A,
    /// Plane offset, normal . q.
    d: f32,
    /// Material properties determining light interaction.
    material: Arc<Material>,
}

impl Quad {
    /// Create a new quad from a corner point and two edge vectors.
    pub fn new(q: Vec3A, u: Vec3A, v: Vec3A, material: Arc<Material>) -> Self {
        let n = u.cross(v);
        let normal = n.normalize();
        let d = normal.dot(q);
        let w = n / n.dot(n);

        Self {
            q,
            u,
            v,
            w,
            normal,
            d,
            material,
        }
    }

    /// Test for ray intersection within the given parameter range.
    ///
    /// Rejects near-parallel rays, solves the plane equation for t, then
    /// projects the hit point into the (u, v) basis; the point is interior
    /// iff both planar coordinates fall in [0, 1].
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let denom = self.normal.dot(r.direction);

        // No hit if the ray is parallel to the plane.
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = (self.d - self.normal.dot(r.origin)) / denom;
        if !ray_t.contains(t) {
            return None;
        }

        let intersection = r.at(t);
        let planar_hit_vector = intersection - self.q;
        let alpha = self.w.dot(planar_hit_vector.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar_hit_vector));

        if !Interval::UNIT.contains(alpha) || !Interval::UNIT.contains(beta) {
            return None;
        }

        let mut rec = HitRecord {
            t,
            p: intersection,
            normal: Vec3A::ZERO,
            u: alpha,
            v: beta,
            front_face: false,
            material: &self.material,
        };
        rec.set_face_normal(r, self.normal);

        Some(rec)
    }
}
