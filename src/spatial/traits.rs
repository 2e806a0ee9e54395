use polymesh_common::item_with;

/// Scalar type of a bounding volume; implemented for `f32` and `f64`.
pub trait Float:
    num_traits::Float
    + nalgebra::Scalar
    + nalgebra::SimdPartialOrd
    + std::ops::AddAssign
    + std::ops::SubAssign
    + std::ops::MulAssign
    + std::ops::DivAssign
    + Copy
    + Send
    + Sync
{
    const ZERO: Self;
    const TWO: Self;

    const MIN: Self;
    const MAX: Self;
}

item_with! {Real: f32, f64 => impl Float for Real {
    const ZERO: Self = 0.0;
    const TWO: Self = 2.0;

    const MIN: Self = Self::MIN;
    const MAX: Self = Self::MAX;
}}
