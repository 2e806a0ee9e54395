//! The renderable [Mesh].

mod hybrid;
mod triangle;

pub use hybrid::*;
pub use triangle::*;

use nalgebra::Point3;

use crate::{
    AttributeKind, BoundingVolume, BufferStore, CloneFields, Cloner, MeshError, Mode, Usage,
    VertexBuffer, VertexData,
};

/// Cached vertex and element counts of a [Mesh].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Counts {
    /// Number of elements in the position buffer.
    pub vertices: usize,
    /// Number of primitives; triangles for triangle modes, lines for line modes, and so on.
    pub elements: usize,
}

/// A set of vertex attribute buffers, interpreted as primitives according to a [Mode].
///
/// # Considerations
///
/// * Counts are cached, and only recomputed by [update_counts](Self::update_counts); mutating
///   buffers leaves them stale until then.
/// * Cloning is shallow: the clone shares buffer storage with the original, but owns its own
///   mode, counts, and bound. Use [deep_clone](Self::deep_clone) for independent storage.
#[derive(Debug, Default)]
pub struct Mesh {
    buffers: BufferStore,
    /// Coarser index streams; by convention, level 0 matches the main index buffer.
    lod_levels: Vec<VertexBuffer>,
    mode: Mode,
    hybrid: Option<HybridLayout>,
    counts: Option<Counts>,
    max_num_weights: u8,
    bound: BoundingVolume,
    /// Renderer-side handle; e.g. a vertex array object.
    id: Option<u32>,
}

impl Clone for Mesh {
    /// Shallow copy; buffer storage is shared, the renderer handle is not.
    fn clone(&self) -> Self {
        Self {
            buffers: self.buffers.clone(),
            lod_levels: self.lod_levels.clone(),
            mode: self.mode,
            hybrid: self.hybrid.clone(),
            counts: self.counts,
            max_num_weights: self.max_num_weights,
            bound: self.bound,
            id: None,
        }
    }
}

impl CloneFields for Mesh {
    fn clone_fields(&mut self, cloner: &mut Cloner) {
        for buf in self.buffers.iter_mut() {
            buf.clone_fields(cloner);
        }
        self.lod_levels.clone_fields(cloner);
    }
}

impl Mesh {
    /// Construct an empty [Triangles](Mode::Triangles) mesh.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Copy `self` such that the copy shares no buffer storage with the original.
    pub fn deep_clone(&self) -> Self {
        Cloner::new().clone_graph(self)
    }

    // -- mode --

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Change the primitive mode. Counts are stale until the next
    /// [update_counts](Self::update_counts).
    #[inline]
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    #[inline]
    pub fn hybrid_layout(&self) -> Option<&HybridLayout> {
        self.hybrid.as_ref()
    }

    /// Set the segment layout used when the mode is [Hybrid](Mode::Hybrid).
    #[inline]
    pub fn set_hybrid_layout(&mut self, layout: Option<HybridLayout>) {
        self.hybrid = layout;
    }

    // -- misc. scalars --

    #[inline]
    pub fn max_num_weights(&self) -> u8 {
        self.max_num_weights
    }

    /// Set the maximum number of bone weights affecting any single vertex.
    ///
    /// # Errors
    ///
    /// * [`InvalidWeightCount`](MeshError::InvalidWeightCount) if `n > 4`.
    pub fn set_max_num_weights(&mut self, n: u8) -> Result<(), MeshError> {
        if n > 4 {
            return Err(MeshError::InvalidWeightCount(n));
        }
        self.max_num_weights = n;
        Ok(())
    }

    #[inline]
    pub fn id(&self) -> Option<u32> {
        self.id
    }

    #[inline]
    pub fn set_id(&mut self, id: u32) {
        self.id = Some(id);
    }

    #[inline]
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    // -- buffers --

    /// Attach a buffer of `kind`, or replace the contents of the existing one.
    ///
    /// See [BufferStore::set].
    pub fn set_buffer(
        &mut self,
        kind: AttributeKind,
        components: u8,
        data: impl Into<VertexData>,
    ) -> Result<(), MeshError> {
        let buf = self.buffers.set(kind, components, data.into())?;
        tracing::trace!(
            ?kind,
            components,
            format = ?buf.format(),
            len = buf.len(),
            "set mesh buffer"
        );
        Ok(())
    }

    /// Attach a complete buffer.
    ///
    /// # Errors
    ///
    /// * [`BufferAlreadySet`](MeshError::BufferAlreadySet) if a buffer of the same kind exists.
    pub fn insert_buffer(&mut self, buffer: VertexBuffer) -> Result<(), MeshError> {
        tracing::trace!(kind = ?buffer.kind(), "inserting mesh buffer");
        self.buffers.insert(buffer)
    }

    /// Detach the buffer of `kind`; does nothing if there is none.
    pub fn clear_buffer(&mut self, kind: AttributeKind) {
        if self.buffers.remove(kind).is_some() {
            tracing::trace!(?kind, "cleared mesh buffer");
        }
    }

    #[inline]
    pub fn buffer(&self, kind: AttributeKind) -> Option<&VertexBuffer> {
        self.buffers.get(kind)
    }

    /// Copy the buffer of `kind` out as `f32`, if it exists.
    ///
    /// # Errors
    ///
    /// * [`FormatMismatch`](MeshError::FormatMismatch); see [VertexBuffer::as_floats].
    pub fn buffer_as_floats(&self, kind: AttributeKind) -> Result<Option<Vec<f32>>, MeshError> {
        self.buffers
            .get(kind)
            .map(VertexBuffer::as_floats)
            .transpose()
    }

    /// Every buffer, for lookup by kind.
    #[inline]
    pub fn buffers(&self) -> &BufferStore {
        &self.buffers
    }

    /// Every buffer, in the order in which they were attached.
    #[inline]
    pub fn buffer_list(&self) -> &[VertexBuffer] {
        self.buffers.as_slice()
    }

    /// Mark every buffer as [Static](Usage::Static).
    pub fn set_static(&mut self) {
        for buf in self.buffers.iter_mut() {
            buf.set_usage(Usage::Static);
        }
    }

    // -- level of detail --

    #[inline]
    pub fn num_lod_levels(&self) -> usize {
        self.lod_levels.len()
    }

    /// # Errors
    ///
    /// * [`IndexOutOfRange`](MeshError::IndexOutOfRange) if `lod` ∉ `0..self.num_lod_levels()`.
    pub fn lod_level(&self, lod: usize) -> Result<&VertexBuffer, MeshError> {
        self.lod_levels
            .get(lod)
            .ok_or(MeshError::IndexOutOfRange {
                what: "LOD level",
                index: lod,
                len: self.lod_levels.len(),
            })
    }

    #[inline]
    pub fn lod_levels(&self) -> &[VertexBuffer] {
        &self.lod_levels
    }

    /// Replace the LOD index streams, ordered from finest to coarsest.
    ///
    /// Without a position buffer, indices are checked by the next
    /// [update_counts](Self::update_counts) instead.
    ///
    /// # Errors
    ///
    /// * [`FormatMismatch`](MeshError::FormatMismatch) if a level is not an integer
    ///   [Index](AttributeKind::Index) buffer.
    /// * [`IndexOutOfRange`](MeshError::IndexOutOfRange) if a level refers to a vertex beyond
    ///   the end of the position buffer.
    pub fn set_lod_levels(&mut self, levels: Vec<VertexBuffer>) -> Result<(), MeshError> {
        if let Some(vertices) = self
            .buffers
            .get(AttributeKind::Position)
            .map(VertexBuffer::element_count)
        {
            check_lod_levels(&levels, vertices)?;
        } else {
            for level in &levels {
                check_lod_format(level)?;
            }
        }
        tracing::debug!(levels = levels.len(), "set mesh LOD levels");
        self.lod_levels = levels;
        Ok(())
    }

    pub fn clear_lod_levels(&mut self) {
        self.lod_levels.clear();
    }

    // -- counts --

    fn element_count_of(&self, len: usize) -> Result<usize, MeshError> {
        if let Some(n) = self.mode.element_count(len) {
            return Ok(n);
        }
        let layout = self
            .hybrid
            .as_ref()
            .ok_or(MeshError::InvalidState("hybrid mode requires a segment layout"))?;
        if layout.index_count() > len {
            return Err(MeshError::InvalidState(
                "hybrid segments extend past the end of the stream",
            ));
        }
        Ok(layout.element_count())
    }

    /// Recompute the vertex count from the position buffer, and the element count from the index
    /// buffer (or from the vertex count, if there is no index buffer).
    ///
    /// # Errors
    ///
    /// * [`InvalidState`](MeshError::InvalidState) if the buffers are already interleaved, or if
    ///   the mode is [Hybrid](Mode::Hybrid) without a valid [HybridLayout].
    /// * [`IndexOutOfRange`](MeshError::IndexOutOfRange) if a LOD level refers to a vertex beyond
    ///   the end of the position buffer.
    pub fn update_counts(&mut self) -> Result<Counts, MeshError> {
        if self.buffers.contains(AttributeKind::InterleavedData) {
            return Err(MeshError::InvalidState(
                "counts must be updated before buffers are interleaved",
            ));
        }
        let vertices = self
            .buffers
            .get(AttributeKind::Position)
            .map_or(0, VertexBuffer::element_count);
        // levels may predate the positions, or the positions may have shrunk since
        check_lod_levels(&self.lod_levels, vertices)?;
        let stream = match self.buffers.get(AttributeKind::Index) {
            Some(ib) => ib.len(),
            None => vertices,
        };
        let counts = Counts {
            vertices,
            elements: self.element_count_of(stream)?,
        };
        tracing::trace!(
            vertices,
            elements = counts.elements,
            mode = ?self.mode,
            "updated mesh counts"
        );
        self.counts = Some(counts);
        Ok(counts)
    }

    /// The counts as of the last [update_counts](Self::update_counts).
    ///
    /// # Errors
    ///
    /// * [`InvalidState`](MeshError::InvalidState) if counts have never been computed.
    #[inline]
    pub fn counts(&self) -> Result<Counts, MeshError> {
        self.counts.ok_or(MeshError::InvalidState(
            "counts requested before they were computed",
        ))
    }

    #[inline]
    pub fn vertex_count(&self) -> Result<usize, MeshError> {
        self.counts().map(|c| c.vertices)
    }

    /// Number of triangles, or of elements for non-triangle modes.
    #[inline]
    pub fn triangle_count(&self) -> Result<usize, MeshError> {
        self.counts().map(|c| c.elements)
    }

    /// Number of triangles (or elements) described by LOD level `lod`.
    ///
    /// # Errors
    ///
    /// * [`IndexOutOfRange`](MeshError::IndexOutOfRange) if `lod` ∉ `0..self.num_lod_levels()`.
    /// * [`InvalidState`](MeshError::InvalidState) for [Hybrid](Mode::Hybrid) meshes, whose
    ///   layout only describes the main index stream.
    pub fn lod_triangle_count(&self, lod: usize) -> Result<usize, MeshError> {
        let level = self.lod_level(lod)?;
        if self.mode == Mode::Hybrid {
            return Err(MeshError::InvalidState(
                "hybrid layout only describes the main index stream",
            ));
        }
        self.element_count_of(level.len())
    }

    // -- bounds --

    #[inline]
    pub fn bound(&self) -> &BoundingVolume {
        &self.bound
    }

    #[inline]
    pub fn set_bound(&mut self, bound: BoundingVolume) {
        self.bound = bound;
    }

    /// Refit the bounding volume around the position buffer.
    ///
    /// Does nothing if there is no position buffer.
    ///
    /// # Errors
    ///
    /// * [`FormatMismatch`](MeshError::FormatMismatch) if positions are not `f32` triples.
    pub fn update_bound(&mut self) -> Result<(), MeshError> {
        let Some(pb) = self.buffers.get(AttributeKind::Position) else {
            return Ok(());
        };
        let points = read_positions(pb)?;
        self.bound.compute_from_points(&points);
        tracing::trace!(points = points.len(), bound = ?self.bound, "updated mesh bound");
        Ok(())
    }
}

fn check_lod_format(level: &VertexBuffer) -> Result<(), MeshError> {
    if level.kind() != AttributeKind::Index || !level.format().is_integer() {
        return Err(MeshError::FormatMismatch {
            kind: level.kind(),
            format: level.format(),
            requested: "LOD index stream",
        });
    }
    Ok(())
}

/// Every level must be an integer index stream referring only to vertices `0..vertices`.
fn check_lod_levels(levels: &[VertexBuffer], vertices: usize) -> Result<(), MeshError> {
    for level in levels {
        check_lod_format(level)?;
        let data = level.read();
        let Some(indices) = data.indices() else {
            continue;
        };
        if let Some(index) = indices.iter().find(|&i| i as usize >= vertices) {
            return Err(MeshError::IndexOutOfRange {
                what: "LOD vertex index",
                index: index as usize,
                len: vertices,
            });
        };
    }
    Ok(())
}

/// Stride, in floats, between consecutive positions.
pub(crate) fn position_stride(pb: &VertexBuffer) -> Result<usize, MeshError> {
    if pb.components() < 3 {
        return Err(MeshError::FormatMismatch {
            kind: pb.kind(),
            format: pb.format(),
            requested: "3-component positions",
        });
    }
    Ok(pb.components() as usize)
}

fn read_positions(pb: &VertexBuffer) -> Result<Vec<Point3<f32>>, MeshError> {
    let stride = position_stride(pb)?;
    pb.map::<f32, _>(|v| {
        v.chunks_exact(stride)
            .map(|c| nalgebra::point![c[0], c[1], c[2]])
            .collect()
    })
}
