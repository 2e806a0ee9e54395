//! Per-kind lookup of the buffers attached to a mesh.

use crate::{AttributeKind, MeshError, VertexBuffer, VertexData, KIND_SLOTS};

use super::check_layout;

/// The set of [VertexBuffers](VertexBuffer) attached to a mesh; at most one per
/// [AttributeKind].
///
/// Lookups go through a table indexed by [ordinal](AttributeKind::ordinal); iteration walks a
/// dense list kept in insertion order.
#[derive(Debug, Clone)]
pub struct BufferStore {
    slots: [Option<usize>; KIND_SLOTS],
    list: Vec<VertexBuffer>,
}

impl Default for BufferStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferStore {
    pub fn new() -> Self {
        Self {
            slots: [None; KIND_SLOTS],
            list: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub fn contains(&self, kind: AttributeKind) -> bool {
        self.slots[kind.ordinal()].is_some()
    }

    #[inline]
    pub fn get(&self, kind: AttributeKind) -> Option<&VertexBuffer> {
        self.slots[kind.ordinal()].map(|i| &self.list[i])
    }

    /// Every buffer, in the order in which they were first set.
    #[inline]
    pub fn as_slice(&self) -> &[VertexBuffer] {
        &self.list
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, VertexBuffer> {
        self.list.iter()
    }

    #[inline]
    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, VertexBuffer> {
        self.list.iter_mut()
    }

    /// The kinds of every buffer, in iteration order.
    pub fn kinds(&self) -> impl Iterator<Item = AttributeKind> + '_ {
        self.list.iter().map(VertexBuffer::kind)
    }

    /// Attach a buffer.
    ///
    /// # Errors
    ///
    /// * [`BufferAlreadySet`](MeshError::BufferAlreadySet) if a buffer of the same kind exists.
    pub fn insert(&mut self, buffer: VertexBuffer) -> Result<(), MeshError> {
        let slot = &mut self.slots[buffer.kind().ordinal()];
        if slot.is_some() {
            return Err(MeshError::BufferAlreadySet(buffer.kind()));
        }
        *slot = Some(self.list.len());
        self.list.push(buffer);
        Ok(())
    }

    /// Attach a new buffer of `kind`, or replace the contents of the existing one.
    ///
    /// An existing buffer keeps its usage and normalization, and its storage is updated in
    /// place, so that every copy sharing it observes the new data.
    ///
    /// # Errors
    ///
    /// * [`IncompatibleBuffer`](MeshError::IncompatibleBuffer) if a buffer of `kind` exists with a
    ///   different component count or format.
    /// * [`InvalidLayout`](MeshError::InvalidLayout) if `data` cannot be split into
    ///   `components`-wide elements.
    pub fn set(
        &mut self,
        kind: AttributeKind,
        components: u8,
        data: VertexData,
    ) -> Result<&VertexBuffer, MeshError> {
        match self.slots[kind.ordinal()] {
            Some(i) => {
                let existing = &self.list[i];
                if existing.components() != components || existing.format() != data.format() {
                    return Err(existing.incompatible(components, data.format()));
                }
                check_layout(kind, components, data.len())?;
                existing.replace_data(data)?;
                Ok(existing)
            }
            None => {
                let buffer = VertexBuffer::new(kind, components, data)?;
                self.insert(buffer)?;
                Ok(&self.list[self.list.len() - 1])
            }
        }
    }

    /// Detach the buffer of `kind`, if any.
    pub fn remove(&mut self, kind: AttributeKind) -> Option<VertexBuffer> {
        let index = self.slots[kind.ordinal()].take()?;
        let removed = self.list.remove(index);
        for slot in self.slots.iter_mut().flatten() {
            if *slot > index {
                *slot -= 1;
            }
        }
        Some(removed)
    }
}

impl<'store> IntoIterator for &'store BufferStore {
    type Item = &'store VertexBuffer;
    type IntoIter = std::slice::Iter<'store, VertexBuffer>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn remove_keeps_order() {
        let mut store = BufferStore::new();
        for kind in [
            AttributeKind::Position,
            AttributeKind::Normal,
            AttributeKind::Color,
        ] {
            store.set(kind, 1, vec![0.0f32].into()).unwrap();
        }
        store.remove(AttributeKind::Normal).unwrap();
        assert_eq!(
            store.kinds().collect::<Vec<_>>(),
            vec![AttributeKind::Position, AttributeKind::Color]
        );
        assert_eq!(
            store.get(AttributeKind::Color).unwrap().kind(),
            AttributeKind::Color
        );
        assert!(store.remove(AttributeKind::Normal).is_none());
    }
}
