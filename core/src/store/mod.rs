//! Handle-addressed record storage.
//!
//! Every entity, constraint and group in a sketch lives in a [`HandleStore`].
//! Records keep their insertion order; a record's handle is assigned once on
//! insertion and never changes afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::error;

/// A typed integer handle. Zero is reserved for "no handle".
pub trait RawHandle: Copy + Eq + fmt::Debug {
    fn from_raw(v: u32) -> Self;
    fn raw(self) -> u32;
}

/// A record that can live in a [`HandleStore`].
pub trait Handled {
    type Handle: RawHandle;

    fn handle(&self) -> Self::Handle;
    fn set_handle(&mut self, h: Self::Handle);
    /// Scratch marker used for bulk deletion; zero means "keep".
    fn tag(&self) -> i32;
    fn set_tag(&mut self, tag: i32);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandleStore<T> {
    elems: Vec<T>,
}

impl<T> Default for HandleStore<T> {
    fn default() -> Self {
        Self { elems: Vec::new() }
    }
}

impl<T: Handled> HandleStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `1 + max(live handles)` to `record`, append it and return the
    /// new handle.
    ///
    /// The next handle is derived from the live maximum rather than a
    /// persistent counter, so removing the highest record lets its handle be
    /// handed out again.
    pub fn add_and_assign_id(&mut self, mut record: T) -> T::Handle {
        let max = self.elems.iter().map(|e| e.handle().raw()).max().unwrap_or(0);
        let Some(next) = max.checked_add(1) else {
            error!("handle space exhausted, {} items", self.elems.len());
            panic!("handle space exhausted, {} items", self.elems.len());
        };
        let h = T::Handle::from_raw(next);
        record.set_handle(h);
        self.elems.push(record);
        h
    }

    /// Look up a live handle. Panics if it is absent: callers must only pass
    /// handles they know to be live.
    pub fn find_by_id(&self, h: T::Handle) -> &T {
        match self.elems.iter().find(|e| e.handle() == h) {
            Some(e) => e,
            None => self.lookup_failed(h),
        }
    }

    pub fn find_by_id_mut(&mut self, h: T::Handle) -> &mut T {
        match self.elems.iter().position(|e| e.handle() == h) {
            Some(i) => &mut self.elems[i],
            None => self.lookup_failed(h),
        }
    }

    /// Same lookup as [`find_by_id`](Self::find_by_id), tolerating a stale
    /// handle.
    pub fn find_by_id_or_null(&self, h: T::Handle) -> Option<&T> {
        self.elems.iter().find(|e| e.handle() == h)
    }

    pub fn find_by_id_or_null_mut(&mut self, h: T::Handle) -> Option<&mut T> {
        self.elems.iter_mut().find(|e| e.handle() == h)
    }

    fn lookup_failed(&self, h: T::Handle) -> ! {
        error!(
            "failed to look up item {:08x}, searched {} items",
            h.raw(),
            self.elems.len()
        );
        panic!("failed to look up item {:08x}, searched {} items", h.raw(), self.elems.len());
    }

    pub fn clear_tags(&mut self) {
        for e in &mut self.elems {
            e.set_tag(0);
        }
    }

    /// Tag the record with handle `h`; no-op if there is none.
    pub fn tag_by_handle(&mut self, h: T::Handle, tag: i32) {
        for e in self.elems.iter_mut().filter(|e| e.handle() == h) {
            e.set_tag(tag);
        }
    }

    /// Drop every record with a non-zero tag. Survivors keep their relative
    /// order and the backing capacity is left untouched.
    pub fn remove_tagged(&mut self) -> usize {
        let before = self.elems.len();
        self.elems.retain(|e| e.tag() == 0);
        before - self.elems.len()
    }

    /// Hand all records and capacity to `other`, leaving `self` empty.
    pub fn move_ownership_into(&mut self, other: &mut HandleStore<T>) {
        other.elems = std::mem::take(&mut self.elems);
    }

    pub fn contains(&self, h: T::Handle) -> bool {
        self.find_by_id_or_null(h).is_some()
    }

    pub fn handles(&self) -> impl Iterator<Item = T::Handle> + '_ {
        self.elems.iter().map(|e| e.handle())
    }
}

impl<T: Clone> HandleStore<T> {
    /// Independent copy into `other`, reserving the same capacity as `self`.
    pub fn duplicate_into(&self, other: &mut HandleStore<T>) {
        let mut elems = Vec::with_capacity(self.elems.capacity());
        elems.extend(self.elems.iter().cloned());
        other.elems = elems;
    }
}

impl<T> HandleStore<T> {
    /// Release storage and reset to empty.
    pub fn clear(&mut self) {
        self.elems = Vec::new();
    }

    pub fn len(&self) -> usize {
        self.elems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.elems.capacity()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elems.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.elems.iter_mut()
    }
}

impl<'a, T> IntoIterator for &'a HandleStore<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elems.iter()
    }
}
