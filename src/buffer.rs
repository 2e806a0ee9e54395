//! Typed per-vertex attribute storage.
//!
//! A [VertexBuffer] describes one attribute of every vertex of a mesh: its [kind](AttributeKind),
//! how many components make up one element, and the [raw data](VertexData) itself. The data is
//! held behind an [Arc], so that shallow copies of a buffer (and of the meshes holding it) share
//! storage; writes through one copy are visible through all of them.

mod data;
mod kind;
mod store;

use std::sync::Arc;

pub use data::*;
pub use kind::*;
use parking_lot::{RwLock, RwLockReadGuard};
pub use store::*;

use crate::MeshError;

/// Storage shared between shallow copies of a [VertexBuffer].
pub type SharedData = Arc<RwLock<VertexData>>;

/// Hint to the renderer about how often a buffer's contents change.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Usage {
    /// Set once, drawn many times.
    #[default]
    Static,
    /// Modified repeatedly, drawn many times.
    Dynamic,
    /// Modified every frame, drawn a few times.
    Stream,
}

/// A single vertex attribute stream.
///
/// # Invariants
///
/// * `1 <= components <= 4`
/// * the length of the data is a multiple of `components`
/// * the stored format never changes; in-place writes go through typed slices
#[derive(Debug, Clone)]
pub struct VertexBuffer {
    kind: AttributeKind,
    components: u8,
    format: NumericFormat,
    normalized: bool,
    usage: Usage,
    data: SharedData,
}

pub(crate) fn check_layout(
    kind: AttributeKind,
    components: u8,
    len: usize,
) -> Result<(), MeshError> {
    if !(1..=4).contains(&components) || len % components as usize != 0 {
        return Err(MeshError::InvalidLayout {
            kind,
            components,
            len,
        });
    }
    Ok(())
}

impl VertexBuffer {
    /// Construct a buffer of `components`-wide elements.
    ///
    /// Integer [Color](AttributeKind::Color) data is normalized; see
    /// [with_normalized](Self::with_normalized) to override.
    ///
    /// # Errors
    ///
    /// * [`InvalidLayout`](MeshError::InvalidLayout) if `components` ∉ `1..=4`, or if the length
    ///   of `data` is not a multiple of `components`.
    pub fn new(
        kind: AttributeKind,
        components: u8,
        data: impl Into<VertexData>,
    ) -> Result<Self, MeshError> {
        let data = data.into();
        check_layout(kind, components, data.len())?;
        let format = data.format();
        Ok(Self {
            kind,
            components,
            format,
            normalized: kind.normalized_by_default(format),
            usage: Usage::default(),
            data: Arc::new(RwLock::new(data)),
        })
    }

    /// Set whether integer data is read as fixed-point fractions.
    #[inline]
    pub fn with_normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    #[inline]
    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = usage;
        self
    }

    #[inline(always)]
    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    #[inline(always)]
    pub fn components(&self) -> u8 {
        self.components
    }

    #[inline(always)]
    pub fn format(&self) -> NumericFormat {
        self.format
    }

    #[inline(always)]
    pub fn normalized(&self) -> bool {
        self.normalized
    }

    #[inline(always)]
    pub fn usage(&self) -> Usage {
        self.usage
    }

    #[inline]
    pub fn set_usage(&mut self, usage: Usage) {
        self.usage = usage;
    }

    /// Number of scalar values stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `components`-wide elements stored.
    #[inline]
    pub fn element_count(&self) -> usize {
        self.len() / self.components as usize
    }

    /// Lock the underlying data for reading.
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, VertexData> {
        self.data.read()
    }

    fn mismatch(&self, requested: &'static str) -> MeshError {
        MeshError::FormatMismatch {
            kind: self.kind,
            format: self.format,
            requested,
        }
    }

    /// Borrow the data as `[T]` for the duration of `f`.
    ///
    /// # Errors
    ///
    /// * [`FormatMismatch`](MeshError::FormatMismatch) if `T` is not the stored format.
    pub fn map<T: ComponentType, R>(&self, f: impl FnOnce(&[T]) -> R) -> Result<R, MeshError> {
        let data = self.data.read();
        let slice = data
            .as_slice::<T>()
            .ok_or_else(|| self.mismatch(std::any::type_name::<T>()))?;
        Ok(f(slice))
    }

    /// Mutably borrow the data as `[T]` for the duration of `f`.
    ///
    /// Writes are visible to every buffer sharing this one's storage.
    ///
    /// # Errors
    ///
    /// * [`FormatMismatch`](MeshError::FormatMismatch) if `T` is not the stored format.
    pub fn update<T: ComponentType, R>(
        &self,
        f: impl FnOnce(&mut [T]) -> R,
    ) -> Result<R, MeshError> {
        let mut data = self.data.write();
        match data.as_slice_mut::<T>() {
            Some(slice) => Ok(f(slice)),
            None => Err(self.mismatch(std::any::type_name::<T>())),
        }
    }

    /// Borrow the raw bytes of the data for the duration of `f`; e.g. for upload to the GPU.
    #[inline]
    pub fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(self.data.read().as_bytes())
    }

    /// Copy the data out as `f32`, scaling normalized integers.
    ///
    /// # Errors
    ///
    /// * [`FormatMismatch`](MeshError::FormatMismatch) if the stored format cannot be widened to
    ///   `f32` without loss.
    pub fn as_floats(&self) -> Result<Vec<f32>, MeshError> {
        self.data
            .read()
            .to_floats(self.normalized)
            .ok_or_else(|| self.mismatch("f32"))
    }

    /// Whether `self` and `other` share the same storage.
    #[inline]
    pub fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Copy `self` into a buffer with its own storage.
    pub fn deep_copy(&self) -> Self {
        Self {
            data: Arc::new(RwLock::new(self.data.read().clone())),
            ..self.clone()
        }
    }

    #[inline]
    pub(crate) fn storage(&self) -> &SharedData {
        &self.data
    }

    #[inline]
    pub(crate) fn set_storage(&mut self, data: SharedData) {
        self.data = data;
    }

    /// Replace the contents of the shared storage, keeping the layout.
    pub(crate) fn replace_data(&self, data: VertexData) -> Result<(), MeshError> {
        if data.format() != self.format {
            return Err(self.incompatible(self.components, data.format()));
        }
        check_layout(self.kind, self.components, data.len())?;
        *self.data.write() = data;
        Ok(())
    }

    pub(crate) fn incompatible(&self, components: u8, format: NumericFormat) -> MeshError {
        MeshError::IncompatibleBuffer {
            kind: self.kind,
            existing: (self.components, self.format),
            requested: (components, format),
        }
    }
}
