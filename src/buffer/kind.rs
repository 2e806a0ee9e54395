use static_assertions::const_assert_eq;

use crate::NumericFormat;

/// A bounded channel number, as used by attributes which may appear more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot<const N: usize>(u8);

impl<const N: usize> Slot<N> {
    /// Number of channels available.
    pub const COUNT: usize = N;

    /// `None` if `index` ∉ `0..N`.
    #[inline]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < N {
            Some(Self(index))
        } else {
            None
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Number of texture coordinate channels.
pub const TEXCOORD_SLOTS: usize = 8;
/// Number of application-defined attribute kinds.
pub const CUSTOM_SLOTS: usize = 16;

const TEXCOORD_BASE: usize = 6;
const CUSTOM_BASE: usize = 24;

/// Total number of distinct [AttributeKinds](AttributeKind); every kind's
/// [ordinal](AttributeKind::ordinal) lies within `0..KIND_SLOTS`.
pub const KIND_SLOTS: usize = CUSTOM_BASE + CUSTOM_SLOTS;

const_assert_eq!(TEXCOORD_BASE + TEXCOORD_SLOTS + 10, CUSTOM_BASE);

/// The property of a vertex described by a [VertexBuffer](crate::VertexBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Position,
    Normal,
    Tangent,
    Binormal,
    /// Point sprite size.
    Size,
    Color,
    TexCoord(Slot<TEXCOORD_SLOTS>),
    BoneIndex,
    BoneWeight,
    /// Bone indices used by hardware skinning.
    HwBoneIndex,
    /// Bone weights used by hardware skinning.
    HwBoneWeight,
    BindPosePosition,
    BindPoseNormal,
    BindPoseTangent,
    /// Vertex indices; the main index stream.
    Index,
    /// All other attributes packed into a single buffer.
    InterleavedData,
    /// Per-instance transforms.
    InstanceData,
    /// Application-defined attribute.
    Custom(Slot<CUSTOM_SLOTS>),
}

impl AttributeKind {
    /// Texture coordinate channel `index`, if it exists.
    #[inline]
    pub const fn texcoord(index: u8) -> Option<Self> {
        match Slot::new(index) {
            Some(s) => Some(Self::TexCoord(s)),
            None => None,
        }
    }

    /// Application-defined kind `id`, if it exists.
    #[inline]
    pub const fn custom(id: u8) -> Option<Self> {
        match Slot::new(id) {
            Some(s) => Some(Self::Custom(s)),
            None => None,
        }
    }

    /// Dense position of this kind within `0..KIND_SLOTS`.
    pub const fn ordinal(self) -> usize {
        match self {
            Self::Position => 0,
            Self::Normal => 1,
            Self::Tangent => 2,
            Self::Binormal => 3,
            Self::Size => 4,
            Self::Color => 5,
            Self::TexCoord(s) => TEXCOORD_BASE + s.get() as usize,
            Self::BoneIndex => 14,
            Self::BoneWeight => 15,
            Self::HwBoneIndex => 16,
            Self::HwBoneWeight => 17,
            Self::BindPosePosition => 18,
            Self::BindPoseNormal => 19,
            Self::BindPoseTangent => 20,
            Self::Index => 21,
            Self::InterleavedData => 22,
            Self::InstanceData => 23,
            Self::Custom(s) => CUSTOM_BASE + s.get() as usize,
        }
    }

    /// Inverse of [ordinal](Self::ordinal).
    pub const fn from_ordinal(ordinal: usize) -> Option<Self> {
        Some(match ordinal {
            0 => Self::Position,
            1 => Self::Normal,
            2 => Self::Tangent,
            3 => Self::Binormal,
            4 => Self::Size,
            5 => Self::Color,
            o if o >= TEXCOORD_BASE && o < TEXCOORD_BASE + TEXCOORD_SLOTS => {
                return Self::texcoord((o - TEXCOORD_BASE) as u8)
            }
            14 => Self::BoneIndex,
            15 => Self::BoneWeight,
            16 => Self::HwBoneIndex,
            17 => Self::HwBoneWeight,
            18 => Self::BindPosePosition,
            19 => Self::BindPoseNormal,
            20 => Self::BindPoseTangent,
            21 => Self::Index,
            22 => Self::InterleavedData,
            23 => Self::InstanceData,
            o if o >= CUSTOM_BASE && o < KIND_SLOTS => {
                return Self::custom((o - CUSTOM_BASE) as u8)
            }
            _ => return None,
        })
    }

    /// Whether integer data of this kind is read as fixed-point fractions unless stated
    /// otherwise.
    #[inline]
    pub const fn normalized_by_default(self, format: NumericFormat) -> bool {
        matches!(self, Self::Color) && format.is_integer()
    }
}
