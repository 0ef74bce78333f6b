use crate::api::types::EntityId;

/// Flat storage with stable ids and deferred removal.
///
/// `retire` only marks an entry; it stays in place (and is skipped by the
/// iterators) until `compact` runs at a frame boundary. Ids are handed out
/// in increasing order and never reused, so lookups stay valid across
/// compaction.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    entries: Vec<Entry<T>>,
    next_id: u32,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    id: EntityId,
    retired: bool,
    value: T,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(64),
            next_id: 1,
        }
    }

    /// Insert a value, returning its id.
    pub fn insert(&mut self, value: T) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            retired: false,
            value,
        });
        id
    }

    /// Insert a value built from its own id.
    pub fn insert_with(&mut self, build: impl FnOnce(EntityId) -> T) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            retired: false,
            value: build(id),
        });
        id
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        // Ids are pushed in increasing order and compaction preserves order.
        self.entries.binary_search_by_key(&id.0, |e| e.id.0).ok()
    }

    /// Mark an entry for removal. Returns true if it was live.
    pub fn retire(&mut self, id: EntityId) -> bool {
        match self.index_of(id) {
            Some(idx) if !self.entries[idx].retired => {
                self.entries[idx].retired = true;
                true
            }
            _ => false,
        }
    }

    /// Drop all retired entries.
    pub fn compact(&mut self) {
        self.entries.retain(|e| !e.retired);
    }

    /// Get a live entry.
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.index_of(id)
            .map(|idx| &self.entries[idx])
            .filter(|e| !e.retired)
            .map(|e| &e.value)
    }

    /// Get a live entry mutably.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        let idx = self.index_of(id)?;
        let entry = &mut self.entries[idx];
        if entry.retired {
            None
        } else {
            Some(&mut entry.value)
        }
    }

    /// Iterate over live entries.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.entries
            .iter()
            .filter(|e| !e.retired)
            .map(|e| (e.id, &e.value))
    }

    /// Iterate over live entries mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.entries
            .iter_mut()
            .filter(|e| !e.retired)
            .map(|e| (e.id, &mut e.value))
    }

    /// Live ids, copied out so the arena can be mutated while walking them.
    pub fn ids(&self) -> Vec<EntityId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| !e.retired).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}
