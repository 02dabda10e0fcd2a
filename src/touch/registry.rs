use std::collections::BTreeMap;

use super::{core::GestureRecord, types::TouchId};

/// Active touches, keyed by identifier. Iteration is in ascending identifier
/// order, which fixes "point 1" and "point 2" of a dual touch.
#[derive(Default)]
pub(crate) struct TouchRegistry {
    records: BTreeMap<TouchId, GestureRecord>,
}

impl TouchRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn contains(&self, id: TouchId) -> bool {
        self.records.contains_key(&id)
    }

    pub(crate) fn insert(&mut self, id: TouchId, record: GestureRecord) {
        self.records.insert(id, record);
    }

    pub(crate) fn get(&self, id: TouchId) -> Option<&GestureRecord> {
        self.records.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: TouchId) -> Option<&mut GestureRecord> {
        self.records.get_mut(&id)
    }

    pub(crate) fn remove(&mut self, id: TouchId) -> Option<GestureRecord> {
        self.records.remove(&id)
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = TouchId> + '_ {
        self.records.keys().copied()
    }

    /// The two records of a dual touch, in ascending identifier order.
    pub(crate) fn pair(&self) -> Option<[(TouchId, &GestureRecord); 2]> {
        if self.records.len() != 2 {
            return None;
        }
        let mut iter = self.records.iter();
        let (first_id, first) = iter.next()?;
        let (second_id, second) = iter.next()?;
        Some([(*first_id, first), (*second_id, second)])
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (TouchId, GestureRecord)> {
        std::mem::take(&mut self.records).into_iter()
    }
}
