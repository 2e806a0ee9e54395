use nalgebra::{Point3, Vector3};

use super::{Aabb, AabbError, Float};

#[inline]
fn norm_squared<Real: Float>(v: &Vector3<Real>) -> Real {
    v.x * v.x + v.y * v.y + v.z * v.z
}

/// Sphere enclosing a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere<Real: Float> {
    pub center: Point3<Real>,
    pub radius: Real,
}

impl<Real: Float> BoundingSphere<Real> {
    #[inline]
    pub fn new(center: Point3<Real>, radius: Real) -> Self {
        Self { center, radius }
    }

    /// A sphere centered on the bounding box of `points`, just large enough to contain all of
    /// them.
    ///
    /// Not necessarily the smallest enclosing sphere.
    pub fn from_points(points: &[Point3<Real>]) -> Result<Self, AabbError<Real>> {
        let center = Aabb::from_points(points)?.center();
        let radius = points
            .iter()
            .map(|p| norm_squared(&(p - center)))
            .fold(Real::ZERO, Real::max)
            .sqrt();
        Ok(Self { center, radius })
    }

    #[inline]
    pub fn contains(&self, p: &Point3<Real>) -> bool {
        norm_squared(&(p - self.center)).sqrt() <= self.radius
    }
}

impl<Real: Float> From<Aabb<Real>> for BoundingSphere<Real> {
    fn from(b: Aabb<Real>) -> Self {
        Self {
            center: b.center(),
            radius: norm_squared(&b.half_extents()).sqrt(),
        }
    }
}
