use nalgebra::Point3;

use super::{Aabb, BoundingSphere};

/// The bounding volume owned by a [Mesh](crate::Mesh).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundingVolume {
    Box(Aabb<f32>),
    Sphere(BoundingSphere<f32>),
}

impl Default for BoundingVolume {
    fn default() -> Self {
        Self::Box(Aabb::new_invalid())
    }
}

impl BoundingVolume {
    /// Refit `self` around `points`, keeping its shape.
    ///
    /// If `points` is empty, `self` is left unchanged.
    pub fn compute_from_points(&mut self, points: &[Point3<f32>]) {
        let refit = match self {
            Self::Box(_) => Aabb::from_points(points).map(Self::Box),
            Self::Sphere(_) => BoundingSphere::from_points(points).map(Self::Sphere),
        };
        if let Ok(v) = refit {
            *self = v;
        }
    }

    pub fn contains(&self, p: &Point3<f32>) -> bool {
        match self {
            Self::Box(b) => b.contains(p),
            Self::Sphere(s) => s.contains(p),
        }
    }

    pub fn center(&self) -> Point3<f32> {
        match self {
            Self::Box(b) => b.center(),
            Self::Sphere(s) => s.center,
        }
    }

    #[inline]
    pub fn as_aabb(&self) -> Option<&Aabb<f32>> {
        match self {
            Self::Box(b) => Some(b),
            Self::Sphere(_) => None,
        }
    }
}

impl From<Aabb<f32>> for BoundingVolume {
    fn from(b: Aabb<f32>) -> Self {
        Self::Box(b)
    }
}

impl From<BoundingSphere<f32>> for BoundingVolume {
    fn from(s: BoundingSphere<f32>) -> Self {
        Self::Sphere(s)
    }
}
