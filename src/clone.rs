//! Cloning groups of meshes together.
//!
//! Shallow copies share buffer storage. When a whole graph of objects is copied, any storage
//! shared *within* the source graph should stay shared within the copy, while the copy as a
//! whole becomes independent of the source. [Cloner] tracks which storage it has already copied
//! and re-points every later reference to the same copy.

use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;

use crate::{SharedData, VertexBuffer};

/// Types holding shared storage which a [Cloner] should re-point.
pub trait CloneFields: Clone {
    /// Called on a shallow copy of an object; replace every shared reference it holds with the
    /// cloner's copy of that reference.
    fn clone_fields(&mut self, cloner: &mut Cloner);
}

/// Deep-copies object graphs, copying each piece of shared storage exactly once.
#[derive(Debug, Default)]
pub struct Cloner {
    // keyed by source address; the source is kept alive so that its address is not reused
    storage: HashMap<usize, (SharedData, SharedData)>,
}

impl Cloner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct storage blocks copied so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Whether `source` has already been copied by `self`.
    #[inline]
    pub fn is_cloned(&self, source: &SharedData) -> bool {
        self.storage.contains_key(&(Arc::as_ptr(source) as usize))
    }

    /// The copy of `source`, copying it if this is its first appearance.
    pub fn clone_storage(&mut self, source: &SharedData) -> SharedData {
        let (_, copy) = self
            .storage
            .entry(Arc::as_ptr(source) as usize)
            .or_insert_with(|| {
                tracing::trace!(len = source.read().len(), "copying shared buffer storage");
                (
                    source.clone(),
                    Arc::new(RwLock::new(source.read().clone())),
                )
            });
        copy.clone()
    }

    /// Deep-copy `value`, re-pointing shared storage at copies made by `self`.
    pub fn clone_graph<T: CloneFields>(&mut self, value: &T) -> T {
        let mut res = value.clone();
        res.clone_fields(self);
        res
    }
}

impl CloneFields for VertexBuffer {
    fn clone_fields(&mut self, cloner: &mut Cloner) {
        let copy = cloner.clone_storage(self.storage());
        self.set_storage(copy);
    }
}

impl<T: CloneFields> CloneFields for Vec<T> {
    fn clone_fields(&mut self, cloner: &mut Cloner) {
        for t in self {
            t.clone_fields(cloner);
        }
    }
}

impl<T: CloneFields> CloneFields for Option<T> {
    fn clone_fields(&mut self, cloner: &mut Cloner) {
        if let Some(t) = self {
            t.clone_fields(cloner);
        }
    }
}
