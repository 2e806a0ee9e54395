use nalgebra::{Point3, Vector3};

use super::Float;

#[derive(Debug, thiserror::Error)]
pub enum AabbError<Real: Float> {
    #[error("minimum corner {0:?} lies beyond maximum corner {1:?}")]
    Inverted(Point3<Real>, Point3<Real>),
    #[error("cannot bound an empty set of points")]
    Empty,
}

/// Axis-Aligned Bounding Box
///
/// Similar to [`parry3d::bounding_volume::Aabb`], except generic over the Real type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb<Real: Float> {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl<Real: Float> Default for Aabb<Real> {
    fn default() -> Self {
        Self::new_invalid()
    }
}

impl<Real: Float> Aabb<Real> {
    #[inline]
    pub fn new(mins: Point3<Real>, maxs: Point3<Real>) -> Self {
        Self { mins, maxs }
    }

    /// # Errors
    ///
    /// * [`Inverted`](AabbError::Inverted) if any component of `mins` exceeds that of `maxs`.
    pub fn try_new(mins: Point3<Real>, maxs: Point3<Real>) -> Result<Self, AabbError<Real>> {
        if mins.x > maxs.x || mins.y > maxs.y || mins.z > maxs.z {
            return Err(AabbError::Inverted(mins, maxs));
        }
        Ok(Self { mins, maxs })
    }

    /// A box containing nothing; expanding it to a point yields a box around only that point.
    pub fn new_invalid() -> Self {
        Self {
            mins: nalgebra::point![Real::MAX, Real::MAX, Real::MAX],
            maxs: nalgebra::point![Real::MIN, Real::MIN, Real::MIN],
        }
    }

    /// The smallest box containing every point of `points`.
    ///
    /// # Errors
    ///
    /// * [`Empty`](AabbError::Empty) if `points` yields nothing.
    pub fn from_points<'p>(
        points: impl IntoIterator<Item = &'p Point3<Real>>,
    ) -> Result<Self, AabbError<Real>> {
        let mut res = Self::new_invalid();
        for p in points {
            res.expand_to(p);
        }
        if res.is_valid() {
            Ok(res)
        } else {
            Err(AabbError::Empty)
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        let Self { mins: i, maxs: a } = self;
        i.x <= a.x && i.y <= a.y && i.z <= a.z
    }

    #[inline]
    pub fn contains(&self, p: &Point3<Real>) -> bool {
        let Self { mins: i, maxs: a } = self;
        (p.x >= i.x && p.y >= i.y && p.z >= i.z) && (p.x <= a.x && p.y <= a.y && p.z <= a.z)
    }

    /// Determine the center of `self`.
    #[inline]
    pub fn center(&self) -> Point3<Real> {
        let Self { mins: i, maxs: a } = self;
        nalgebra::point![
            (i.x + a.x) / Real::TWO,
            (i.y + a.y) / Real::TWO,
            (i.z + a.z) / Real::TWO
        ]
    }

    /// Distance from the center to each face.
    #[inline]
    pub fn half_extents(&self) -> Vector3<Real> {
        (self.maxs - self.mins) / Real::TWO
    }

    /// Grow `self` such that it contains `p`.
    #[inline]
    pub fn expand_to(&mut self, p: &Point3<Real>) {
        self.mins = self.mins.inf(p);
        self.maxs = self.maxs.sup(p);
    }

    /// The smallest box containing both `self` and `other`.
    #[inline]
    pub fn merged(&self, other: &Self) -> Self {
        Self {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    pub fn intersects(&self, other: &Self) -> bool {
        let (a, b) = (self, other);
        a.mins.x <= b.maxs.x
            && a.maxs.x >= b.mins.x
            && a.mins.y <= b.maxs.y
            && a.maxs.y >= b.mins.y
            && a.mins.z <= b.maxs.z
            && a.maxs.z >= b.mins.z
    }
}

#[cfg(feature = "parry")]
impl From<parry3d::bounding_volume::Aabb> for Aabb<parry3d::math::Real> {
    fn from(p: parry3d::bounding_volume::Aabb) -> Self {
        Self {
            mins: p.mins,
            maxs: p.maxs,
        }
    }
}

#[cfg(feature = "parry")]
impl From<Aabb<parry3d::math::Real>> for parry3d::bounding_volume::Aabb {
    fn from(e: Aabb<parry3d::math::Real>) -> Self {
        Self {
            mins: e.mins,
            maxs: e.maxs,
        }
    }
}
