//! Decoding primitives out of a [Mesh]'s buffers.

use nalgebra::{Point3, Vector3};

use crate::{AttributeKind, Mesh, MeshError, Mode};

use super::position_stride;

/// Positions of the corners of a single triangle of a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [Point3<f32>; 3],
    /// Index of this triangle within its mesh.
    pub index: usize,
}

impl Triangle {
    /// Unit normal, by counter-clockwise winding; `None` for degenerate triangles.
    pub fn normal(&self) -> Option<Vector3<f32>> {
        let [a, b, c] = &self.points;
        (b - a).cross(&(c - a)).try_normalize(f32::EPSILON)
    }

    pub fn centroid(&self) -> Point3<f32> {
        let [a, b, c] = &self.points;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }
}

/// The vertex indices of a single primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Point(u32),
    Line([u32; 2]),
    Triangle([u32; 3]),
    Patch(Vec<u32>),
}

impl Element {
    pub fn vertices(&self) -> &[u32] {
        match self {
            Element::Point(v) => std::slice::from_ref(v),
            Element::Line(v) => v,
            Element::Triangle(v) => v,
            Element::Patch(v) => v,
        }
    }
}

impl Mesh {
    /// Length of the stream elements are decoded from: the index buffer if there is one,
    /// otherwise the vertices themselves.
    fn stream_len(&self) -> usize {
        match self.buffer(AttributeKind::Index) {
            Some(ib) => ib.len(),
            None => self
                .buffer(AttributeKind::Position)
                .map_or(0, |pb| pb.element_count()),
        }
    }

    fn check_element(&self, index: usize) -> Result<(), MeshError> {
        let len = self.triangle_count()?;
        if index >= len {
            return Err(MeshError::IndexOutOfRange {
                what: "element",
                index,
                len,
            });
        }
        Ok(())
    }

    /// Resolve the vertex index of every corner of element `element` into `out`.
    fn fill_vertices(&self, element: usize, out: &mut [u32]) -> Result<(), MeshError> {
        let (mode, offset, len, local) = match self.mode() {
            Mode::Hybrid => {
                let layout = self
                    .hybrid_layout()
                    .ok_or(MeshError::InvalidState("hybrid mode requires a segment layout"))?;
                let (seg, local) =
                    layout
                        .locate(element)
                        .ok_or_else(|| MeshError::IndexOutOfRange {
                            what: "element",
                            index: element,
                            len: layout.element_count(),
                        })?;
                (seg.mode, seg.offset, seg.len, local)
            }
            mode => (mode, 0, self.stream_len(), element),
        };
        // counts may be stale; the stream can shrink after they were computed
        if len == 0 {
            return Err(MeshError::IndexOutOfRange {
                what: "element",
                index: element,
                len: 0,
            });
        }
        for (corner, o) in out.iter_mut().enumerate() {
            let slot = mode
                .slot(local, corner, len)
                .ok_or(MeshError::InvalidState("segment mode cannot be decoded"))?;
            if slot >= len {
                return Err(MeshError::IndexOutOfRange {
                    what: "stream position",
                    index: offset + slot,
                    len: offset + len,
                });
            }
            *o = (offset + slot) as u32;
        }

        let Some(ib) = self.buffer(AttributeKind::Index) else {
            return Ok(());
        };
        let data = ib.read();
        let indices = data.indices().ok_or(MeshError::FormatMismatch {
            kind: ib.kind(),
            format: ib.format(),
            requested: "vertex indices",
        })?;
        for o in out.iter_mut() {
            *o = indices.get(*o as usize).ok_or(MeshError::IndexOutOfRange {
                what: "index stream position",
                index: *o as usize,
                len: indices.len(),
            })?;
        }
        Ok(())
    }

    fn require_triangles(&self) -> Result<(), MeshError> {
        if !self.mode().is_triangles() {
            return Err(MeshError::InvalidState("mode does not produce triangles"));
        }
        Ok(())
    }

    /// The vertex indices of element `index`, whatever the mode.
    ///
    /// # Errors
    ///
    /// * [`InvalidState`](MeshError::InvalidState) if counts have never been computed.
    /// * [`IndexOutOfRange`](MeshError::IndexOutOfRange) if `index` ∉ `0..triangle_count`.
    pub fn element(&self, index: usize) -> Result<Element, MeshError> {
        self.check_element(index)?;
        Ok(match self.mode() {
            Mode::Points => {
                let mut v = [0; 1];
                self.fill_vertices(index, &mut v)?;
                Element::Point(v[0])
            }
            Mode::Lines | Mode::LineStrip | Mode::LineLoop => {
                let mut v = [0; 2];
                self.fill_vertices(index, &mut v)?;
                Element::Line(v)
            }
            Mode::Triangles | Mode::TriangleStrip | Mode::TriangleFan | Mode::Hybrid => {
                let mut v = [0; 3];
                self.fill_vertices(index, &mut v)?;
                Element::Triangle(v)
            }
            Mode::Patch(n) => {
                let mut v = vec![0; n.get() as usize];
                self.fill_vertices(index, &mut v)?;
                Element::Patch(v)
            }
        })
    }

    /// The vertex indices of triangle `index`.
    ///
    /// # Errors
    ///
    /// * [`InvalidState`](MeshError::InvalidState) if the mode does not produce triangles, or if
    ///   counts have never been computed.
    /// * [`IndexOutOfRange`](MeshError::IndexOutOfRange) if `index` ∉ `0..triangle_count`.
    pub fn triangle_indices(&self, index: usize) -> Result<[u32; 3], MeshError> {
        self.require_triangles()?;
        self.check_element(index)?;
        let mut v = [0; 3];
        self.fill_vertices(index, &mut v)?;
        Ok(v)
    }

    /// [Self::triangle_indices], without checking `index` against the cached triangle count.
    ///
    /// # Panics
    ///
    /// * if the mode does not produce triangles
    /// * if `index` refers past the end of the index (or position) stream
    pub fn triangle_indices_unchecked(&self, index: usize) -> [u32; 3] {
        let mut v = [0; 3];
        if let Err(e) = self
            .require_triangles()
            .and_then(|_| self.fill_vertices(index, &mut v))
        {
            panic!("cannot decode triangle {index}: {e}");
        }
        v
    }

    /// The corner positions of triangle `index`.
    ///
    /// # Errors
    ///
    /// As [Self::triangle_indices], and:
    ///
    /// * [`InvalidState`](MeshError::InvalidState) if there is no position buffer.
    /// * [`FormatMismatch`](MeshError::FormatMismatch) if positions are not `f32` triples.
    pub fn triangle_positions(&self, index: usize) -> Result<[Point3<f32>; 3], MeshError> {
        let ids = self.triangle_indices(index)?;
        let pb = self
            .buffer(AttributeKind::Position)
            .ok_or(MeshError::InvalidState(
                "triangle positions require a position buffer",
            ))?;
        let stride = position_stride(pb)?;
        pb.map::<f32, Result<_, MeshError>>(|v| {
            let mut points = [Point3::origin(); 3];
            for (p, &id) in points.iter_mut().zip(&ids) {
                let start = id as usize * stride;
                let c = v.get(start..start + 3).ok_or(MeshError::IndexOutOfRange {
                    what: "vertex",
                    index: id as usize,
                    len: v.len() / stride,
                })?;
                *p = nalgebra::point![c[0], c[1], c[2]];
            }
            Ok(points)
        })?
    }

    /// Triangle `index`, with its corner positions.
    ///
    /// # Errors
    ///
    /// As [Self::triangle_positions].
    #[inline]
    pub fn triangle(&self, index: usize) -> Result<Triangle, MeshError> {
        Ok(Triangle {
            points: self.triangle_positions(index)?,
            index,
        })
    }
}
