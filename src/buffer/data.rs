//! Raw, typed storage behind a vertex buffer.

use polymesh_common::ArrayIndex;

/// Numeric type of each component stored in a [VertexBuffer](crate::VertexBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericFormat {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,
}

impl NumericFormat {
    pub const fn size(self) -> usize {
        use std::mem::size_of;
        match self {
            NumericFormat::I8 => size_of::<i8>(),
            NumericFormat::U8 => size_of::<u8>(),
            NumericFormat::I16 => size_of::<i16>(),
            NumericFormat::U16 => size_of::<u16>(),
            NumericFormat::I32 => size_of::<i32>(),
            NumericFormat::U32 => size_of::<u32>(),
            NumericFormat::F32 => size_of::<f32>(),
            NumericFormat::F64 => size_of::<f64>(),
        }
    }

    #[inline]
    pub const fn is_integer(self) -> bool {
        !matches!(self, NumericFormat::F32 | NumericFormat::F64)
    }

    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            NumericFormat::I8
                | NumericFormat::I16
                | NumericFormat::I32
                | NumericFormat::F32
                | NumericFormat::F64
        )
    }
}

/// Raw, typed contents of a [VertexBuffer](crate::VertexBuffer).
#[derive(Debug, Clone, PartialEq)]
pub enum VertexData {
    I8(Vec<i8>),
    U8(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

/// Evaluate `$body` with `$v` bound to the inner `Vec` of whichever variant `$data` holds.
macro_rules! each_variant {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            VertexData::I8($v) => $body,
            VertexData::U8($v) => $body,
            VertexData::I16($v) => $body,
            VertexData::U16($v) => $body,
            VertexData::I32($v) => $body,
            VertexData::U32($v) => $body,
            VertexData::F32($v) => $body,
            VertexData::F64($v) => $body,
        }
    };
}

impl VertexData {
    pub fn format(&self) -> NumericFormat {
        match self {
            VertexData::I8(_) => NumericFormat::I8,
            VertexData::U8(_) => NumericFormat::U8,
            VertexData::I16(_) => NumericFormat::I16,
            VertexData::U16(_) => NumericFormat::U16,
            VertexData::I32(_) => NumericFormat::I32,
            VertexData::U32(_) => NumericFormat::U32,
            VertexData::F32(_) => NumericFormat::F32,
            VertexData::F64(_) => NumericFormat::F64,
        }
    }

    /// Number of scalar values stored.
    #[inline]
    pub fn len(&self) -> usize {
        each_variant!(self, v => v.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The stored values as raw bytes, in native byte order.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        each_variant!(self, v => bytemuck::cast_slice(v.as_slice()))
    }

    /// Borrow the stored values as `[T]`, if `T` matches the stored format.
    #[inline]
    pub fn as_slice<T: ComponentType>(&self) -> Option<&[T]> {
        T::view(self)
    }

    /// Mutably borrow the stored values as `[T]`, if `T` matches the stored format.
    #[inline]
    pub fn as_slice_mut<T: ComponentType>(&mut self) -> Option<&mut [T]> {
        T::view_mut(self)
    }

    /// View the stored values as vertex indices; `None` for floating-point data.
    pub fn indices(&self) -> Option<IndexSlice<'_>> {
        Some(match self {
            VertexData::I8(v) => IndexSlice::I8(v),
            VertexData::U8(v) => IndexSlice::U8(v),
            VertexData::I16(v) => IndexSlice::I16(v),
            VertexData::U16(v) => IndexSlice::U16(v),
            VertexData::I32(v) => IndexSlice::I32(v),
            VertexData::U32(v) => IndexSlice::U32(v),
            VertexData::F32(_) | VertexData::F64(_) => return None,
        })
    }

    /// Widen the stored values to `f32`.
    ///
    /// If `normalized`, integers are scaled into `[0, 1]` (unsigned) or `[-1, 1]` (signed);
    /// otherwise 8- and 16-bit integers convert exactly.
    ///
    /// Returns `None` if the conversion could lose information (32-bit integers & `f64`).
    pub fn to_floats(&self, normalized: bool) -> Option<Vec<f32>> {
        fn widen<T: Copy + Into<f32>>(v: &[T], scale: Option<f32>) -> Vec<f32> {
            match scale {
                Some(max) => v.iter().map(|&x| (Into::<f32>::into(x) / max).max(-1.0)).collect(),
                None => v.iter().map(|&x| Into::<f32>::into(x)).collect(),
            }
        }
        let scale = |max: f32| normalized.then_some(max);
        Some(match self {
            VertexData::F32(v) => v.clone(),
            VertexData::I8(v) => widen(v, scale(i8::MAX as f32)),
            VertexData::U8(v) => widen(v, scale(u8::MAX as f32)),
            VertexData::I16(v) => widen(v, scale(i16::MAX as f32)),
            VertexData::U16(v) => widen(v, scale(u16::MAX as f32)),
            VertexData::I32(_) | VertexData::U32(_) | VertexData::F64(_) => return None,
        })
    }
}

/// A borrowed stream of vertex indices, in any integer format.
#[derive(Debug, Clone, Copy)]
pub enum IndexSlice<'data> {
    I8(&'data [i8]),
    U8(&'data [u8]),
    I16(&'data [i16]),
    U16(&'data [u16]),
    I32(&'data [i32]),
    U32(&'data [u32]),
}

impl<'data> IndexSlice<'data> {
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            IndexSlice::I8(v) => v.len(),
            IndexSlice::U8(v) => v.len(),
            IndexSlice::I16(v) => v.len(),
            IndexSlice::U16(v) => v.len(),
            IndexSlice::I32(v) => v.len(),
            IndexSlice::U32(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The vertex index at position `i` of the stream.
    #[inline]
    pub fn get(&self, i: usize) -> Option<u32> {
        #[inline(always)]
        fn at<I: ArrayIndex>(v: &[I], i: usize) -> Option<u32> {
            v.get(i).map(|&x| x.to_vertex())
        }
        match self {
            IndexSlice::I8(v) => at(v, i),
            IndexSlice::U8(v) => at(v, i),
            IndexSlice::I16(v) => at(v, i),
            IndexSlice::U16(v) => at(v, i),
            IndexSlice::I32(v) => at(v, i),
            IndexSlice::U32(v) => at(v, i),
        }
    }

    /// Iterate through every index of the stream.
    pub fn iter(self) -> impl Iterator<Item = u32> + 'data {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

/// Trait for scalar types which may be stored in [VertexData].
pub trait ComponentType: bytemuck::Pod + Send + Sync + 'static {
    const FORMAT: NumericFormat;

    fn wrap(values: Vec<Self>) -> VertexData;
    fn view(data: &VertexData) -> Option<&[Self]>;
    fn view_mut(data: &mut VertexData) -> Option<&mut [Self]>;
}

macro_rules! impl_component_type {
    ($($Target:ident: $Variant:ident),+) => {
        $(
            impl ComponentType for $Target {
                const FORMAT: NumericFormat = NumericFormat::$Variant;

                #[inline]
                fn wrap(values: Vec<Self>) -> VertexData {
                    VertexData::$Variant(values)
                }

                #[inline]
                fn view(data: &VertexData) -> Option<&[Self]> {
                    match data {
                        VertexData::$Variant(v) => Some(v),
                        _ => None,
                    }
                }

                #[inline]
                fn view_mut(data: &mut VertexData) -> Option<&mut [Self]> {
                    match data {
                        VertexData::$Variant(v) => Some(v),
                        _ => None,
                    }
                }
            }

            impl From<Vec<$Target>> for VertexData {
                #[inline]
                fn from(values: Vec<$Target>) -> Self {
                    VertexData::$Variant(values)
                }
            }
        )+
    };
}

impl_component_type!(i8: I8, u8: U8, i16: I16, u16: U16, i32: I32, u32: U32, f32: F32, f64: F64);

impl<T: ComponentType, const N: usize> From<[T; N]> for VertexData {
    #[inline]
    fn from(values: [T; N]) -> Self {
        T::wrap(values.to_vec())
    }
}

impl<T: ComponentType> From<&[T]> for VertexData {
    #[inline]
    fn from(values: &[T]) -> Self {
        T::wrap(values.to_vec())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalized_widening() {
        let colors = VertexData::from(vec![0u8, 255, 51]);
        assert_eq!(colors.to_floats(true).unwrap(), vec![0.0, 1.0, 0.2]);
        assert_eq!(colors.to_floats(false).unwrap(), vec![0.0, 255.0, 51.0]);

        let signed = VertexData::from(vec![i8::MIN, 0, i8::MAX]);
        assert_eq!(signed.to_floats(true).unwrap(), vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn lossy_widening() {
        assert!(VertexData::from(vec![1u32]).to_floats(false).is_none());
        assert!(VertexData::from(vec![1.0f64]).to_floats(false).is_none());
    }

    #[test]
    fn byte_view() {
        let data = VertexData::from(vec![1u16, 2, 3]);
        assert_eq!(data.as_bytes().len(), 6);
        assert_eq!(data.format().size() * data.len(), 6);
    }
}
