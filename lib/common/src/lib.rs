//! Small helpers shared between the polymesh crates.

use num_traits::{AsPrimitive, PrimInt};

/// Trait for integer types which can be stored in an index stream and used to address a vertex.
pub trait ArrayIndex:
    PrimInt + AsPrimitive<usize> + AsPrimitive<u32> + std::fmt::Debug + Send + Sync + 'static
{
    /// Widen `self` to a vertex index.
    #[inline]
    fn to_vertex(self) -> u32 {
        AsPrimitive::<u32>::as_(self)
    }
}
impl<P> ArrayIndex for P where
    P: PrimInt + AsPrimitive<usize> + AsPrimitive<u32> + std::fmt::Debug + Send + Sync + 'static
{
}

/// Duplicate an [item](https://doc.rust-lang.org/nightly/reference/items.html) `$imp` for each
/// type in the list, making the current type available within `$imp` under the alias `$Alias`.
///
/// Please use traits instead of this, where reasonable.
#[macro_export]
macro_rules! item_with {
    {$Alias:ident: $($Ty:ty),+ => $imp:item} => {
        $(
            const _: () = { // anonymous module
                type $Alias = $Ty;
                $imp
            };
        )+
    };
}

#[cfg(test)]
mod test {
    use super::ArrayIndex;

    #[test]
    fn widen_index() {
        assert_eq!(200u8.to_vertex(), 200);
        assert_eq!(65_000u16.to_vertex(), 65_000);
        assert_eq!(7i32.to_vertex(), 7);
    }
}
