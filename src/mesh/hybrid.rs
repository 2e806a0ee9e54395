use crate::{MeshError, Mode};

/// A contiguous run of the index stream governed by a single triangle mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub mode: Mode,
    /// Position of the first index of this segment within the stream.
    pub offset: usize,
    /// Number of indices in this segment.
    pub len: usize,
}

impl Segment {
    /// Number of triangles in this segment.
    #[inline]
    pub fn element_count(&self) -> usize {
        self.mode.element_count(self.len).unwrap_or(0)
    }
}

/// Layout of a [Hybrid](Mode::Hybrid) index stream.
///
/// The stream is split into consecutive segments of `element_lengths[i]` indices each. Segments
/// before `strip_start` are triangle lists, segments from `strip_start` up to `fan_start` are
/// triangle strips, and the rest are triangle fans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HybridLayout {
    strip_start: usize,
    fan_start: usize,
    element_lengths: Vec<u32>,
}

impl HybridLayout {
    /// # Errors
    ///
    /// * [`InvalidHybridLayout`](MeshError::InvalidHybridLayout) if `strip_start > fan_start`.
    pub fn new(
        [strip_start, fan_start]: [usize; 2],
        element_lengths: Vec<u32>,
    ) -> Result<Self, MeshError> {
        if strip_start > fan_start {
            return Err(MeshError::InvalidHybridLayout {
                strip_start,
                fan_start,
            });
        }
        Ok(Self {
            strip_start,
            fan_start,
            element_lengths,
        })
    }

    /// `[strip_start, fan_start]`
    #[inline]
    pub fn mode_start(&self) -> [usize; 2] {
        [self.strip_start, self.fan_start]
    }

    #[inline]
    pub fn element_lengths(&self) -> &[u32] {
        &self.element_lengths
    }

    fn segment_mode(&self, segment: usize) -> Mode {
        if segment >= self.fan_start {
            Mode::TriangleFan
        } else if segment >= self.strip_start {
            Mode::TriangleStrip
        } else {
            Mode::Triangles
        }
    }

    /// Every segment, in stream order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.element_lengths
            .iter()
            .enumerate()
            .scan(0usize, |offset, (i, &len)| {
                let seg = Segment {
                    mode: self.segment_mode(i),
                    offset: *offset,
                    len: len as usize,
                };
                *offset += len as usize;
                Some(seg)
            })
    }

    /// Number of indices covered by all segments.
    pub fn index_count(&self) -> usize {
        self.element_lengths.iter().map(|&l| l as usize).sum()
    }

    /// Number of triangles across all segments.
    pub fn element_count(&self) -> usize {
        self.segments().map(|s| s.element_count()).sum()
    }

    /// Find the segment containing triangle `element`, and the index of that triangle within it.
    pub fn locate(&self, mut element: usize) -> Option<(Segment, usize)> {
        for seg in self.segments() {
            let count = seg.element_count();
            if element < count {
                return Some((seg, element));
            }
            element -= count;
        }
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn segments_follow_mode_start() {
        let layout = HybridLayout::new([1, 2], vec![6, 4, 5]).unwrap();
        let segs = layout.segments().collect::<Vec<_>>();
        assert_eq!(segs[0].mode, Mode::Triangles);
        assert_eq!(segs[1].mode, Mode::TriangleStrip);
        assert_eq!(segs[1].offset, 6);
        assert_eq!(segs[2].mode, Mode::TriangleFan);
        assert_eq!(segs[2].offset, 10);
        assert_eq!(layout.element_count(), 2 + 2 + 3);
        assert_eq!(layout.index_count(), 15);
        let (seg, local) = layout.locate(3).unwrap();
        assert_eq!((seg.mode, local), (Mode::TriangleStrip, 1));
        assert!(layout.locate(7).is_none());
    }

    #[test]
    fn rejects_inverted_starts() {
        assert!(matches!(
            HybridLayout::new([2, 1], vec![]),
            Err(MeshError::InvalidHybridLayout { .. })
        ));
    }
}
