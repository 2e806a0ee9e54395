//! Primitive topologies.

use std::num::NonZeroU8;

/// The method by which a stream of vertices (or indices) is interpreted as primitives.
///
/// List modes split the stream into fixed, disjoint groups. The remaining modes overlap each
/// element with the ones before it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Every vertex is a point.
    Points,
    /// Every two vertices form a line segment.
    Lines,
    /// The first two vertices form a segment; each later vertex continues from the previous one.
    LineStrip,
    /// A [LineStrip](Mode::LineStrip) whose last vertex connects back to the first.
    LineLoop,
    /// Every three vertices form a triangle.
    #[default]
    Triangles,
    /// The first three vertices form a triangle; each later vertex forms a triangle with the
    /// previous two.
    TriangleStrip,
    /// The first three vertices form a triangle; each later vertex forms a triangle with the
    /// previous one and the very first.
    TriangleFan,
    /// A mix of triangle lists, strips, and fans, described by a
    /// [HybridLayout](crate::HybridLayout).
    Hybrid,
    /// Tessellation patches of a fixed number of vertices.
    Patch(NonZeroU8),
}

impl Mode {
    /// Patch mode for triangle tessellation.
    pub const TRIANGLE_PATCH: Mode = Mode::Patch(match NonZeroU8::new(3) {
        Some(n) => n,
        None => unreachable!(),
    });

    /// Whether the stream is split into fixed, non-overlapping groups.
    #[inline]
    pub const fn is_list(self) -> bool {
        matches!(
            self,
            Mode::Points | Mode::Lines | Mode::Triangles | Mode::Patch(_)
        )
    }

    /// Whether the final element wraps around to the first vertex.
    #[inline]
    pub const fn wraps(self) -> bool {
        matches!(self, Mode::LineLoop)
    }

    /// Number of vertices in a single element.
    pub const fn group_size(self) -> usize {
        match self {
            Mode::Points => 1,
            Mode::Lines | Mode::LineStrip | Mode::LineLoop => 2,
            Mode::Triangles | Mode::TriangleStrip | Mode::TriangleFan | Mode::Hybrid => 3,
            Mode::Patch(n) => n.get() as usize,
        }
    }

    /// Whether each element of this mode is a triangle.
    #[inline]
    pub const fn is_triangles(self) -> bool {
        self.group_size() == 3
    }

    /// Number of elements described by a stream of `len` vertices or indices.
    ///
    /// Returns `None` for [Hybrid](Mode::Hybrid), whose count depends on its layout.
    pub const fn element_count(self, len: usize) -> Option<usize> {
        Some(match self {
            Mode::Points => len,
            Mode::Lines | Mode::Triangles | Mode::Patch(_) => len / self.group_size(),
            Mode::LineStrip | Mode::TriangleStrip | Mode::TriangleFan => {
                len.saturating_sub(self.group_size() - 1)
            }
            Mode::LineLoop => {
                if len >= 2 {
                    len
                } else {
                    0
                }
            }
            Mode::Hybrid => return None,
        })
    }

    /// Position within the stream of corner `corner` of element `element`, where the stream
    /// holds `len` entries.
    ///
    /// Odd triangles of a strip swap their first two corners so that every triangle keeps the
    /// winding of the first: strip triangle 1 is `(2, 1, 3)`.
    ///
    /// Returns `None` for [Hybrid](Mode::Hybrid), and for an empty [LineLoop](Mode::LineLoop).
    #[inline]
    pub const fn slot(self, element: usize, corner: usize, len: usize) -> Option<usize> {
        Some(match self {
            Mode::Points | Mode::Lines | Mode::Triangles | Mode::Patch(_) => {
                element * self.group_size() + corner
            }
            Mode::LineStrip => element + corner,
            Mode::LineLoop => {
                if len == 0 {
                    return None;
                }
                (element + corner) % len
            }
            Mode::TriangleStrip => {
                if element % 2 == 1 && corner < 2 {
                    element + 1 - corner
                } else {
                    element + corner
                }
            }
            Mode::TriangleFan => {
                if corner == 0 {
                    0
                } else {
                    element + corner
                }
            }
            Mode::Hybrid => return None,
        })
    }
}

#[cfg(test)]
mod test {
    use super::Mode;

    #[test]
    fn strip_slots() {
        let tri = |e| [0, 1, 2].map(|c| Mode::TriangleStrip.slot(e, c, 6).unwrap());
        assert_eq!(tri(0), [0, 1, 2]);
        assert_eq!(tri(1), [2, 1, 3]);
        assert_eq!(tri(2), [2, 3, 4]);
        assert_eq!(tri(3), [4, 3, 5]);
    }

    #[test]
    fn loop_wraps() {
        assert_eq!(Mode::LineLoop.slot(3, 1, 4), Some(0));
        assert_eq!(Mode::LineLoop.slot(0, 0, 0), None);
        assert!(Mode::LineLoop.wraps());
        assert!(!Mode::LineStrip.wraps());
    }
}
