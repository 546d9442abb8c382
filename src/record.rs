//! Record Store - Generic Collection CRUD
//!
//! TigerStyle: One storage key, one ordered collection, whole-array writes.
//!
//! A collection is a JSON array persisted under a single storage key.
//! Every mutation is a full read-modify-write of that array: read the
//! collection, change one element, write the whole thing back. Lookup is
//! a linear scan by identifier; collections here are personal-tracking
//! sized, not bulk data, so no index is kept.
//!
//! Missing targets are values, not errors: `update` of an unknown id is
//! `None`, `remove` is `false`. Storage failures never surface at all
//! (see [`JsonStorage`](crate::storage::JsonStorage)).

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clock::{SystemTime, TimeSource};
use crate::storage::JsonStorage;

// =============================================================================
// Record Trait
// =============================================================================

/// A storable item with a unique string identifier.
///
/// `ID_FIELD` names the identifier field in serialized form; the accessor
/// pair must read and write that same field. Within one collection,
/// identifier values are unique.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Serialized name of the identifier field.
    const ID_FIELD: &'static str = crate::constants::RECORD_ID_FIELD;

    /// The record's identifier; empty means "not yet assigned".
    fn record_id(&self) -> &str;

    /// Assign the record's identifier.
    fn set_record_id(&mut self, id: String);
}

// =============================================================================
// Id Strategy
// =============================================================================

/// How [`RecordStore::add`] generates identifiers for records that
/// arrive without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// UUID v4 from the OS random source.
    #[default]
    Random,
    /// Current epoch milliseconds as a string.
    ///
    /// Known weakness, kept intentionally from the original system: two
    /// adds within the same millisecond produce the same id. Only for
    /// environments without a usable random source.
    Timestamp,
}

impl IdStrategy {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn generate(self, clock: &dyn TimeSource) -> String {
        match self {
            Self::Random => uuid::Uuid::new_v4().to_string(),
            Self::Timestamp => clock.now().timestamp_millis().to_string(),
        }
    }
}

// =============================================================================
// Record Store
// =============================================================================

/// Generic CRUD over one collection.
#[derive(Debug, Clone)]
pub struct RecordStore<T: Record> {
    storage: JsonStorage,
    key: String,
    ids: IdStrategy,
    clock: Arc<dyn TimeSource>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T: Record> RecordStore<T> {
    /// Create a store for the collection under `key`.
    ///
    /// Defaults: random (UUID v4) identifiers, system clock.
    #[must_use]
    pub fn new(storage: JsonStorage, key: impl Into<String>) -> Self {
        let key = key.into();
        assert!(!key.is_empty(), "storage key cannot be empty");
        Self {
            storage,
            key,
            ids: IdStrategy::default(),
            clock: Arc::new(SystemTime),
            _marker: std::marker::PhantomData,
        }
    }

    /// Use a different identifier strategy.
    #[must_use]
    pub fn with_id_strategy(mut self, ids: IdStrategy) -> Self {
        self.ids = ids;
        self
    }

    /// Use a different time source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn TimeSource>) -> Self {
        self.clock = clock;
        self
    }

    /// Storage key this store owns.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Full collection in insertion order.
    ///
    /// Missing key or undecodable payload yields an empty vec.
    #[must_use]
    pub fn list(&self) -> Vec<T> {
        self.storage.read_collection(&self.key)
    }

    /// Append `record` to the collection and persist it.
    ///
    /// A record arriving without an identifier gets one generated and
    /// assigned; the returned record always carries a non-empty id.
    pub fn add(&self, mut record: T) -> T {
        let mut items: Vec<T> = self.storage.read_collection(&self.key);

        if record.record_id().is_empty() {
            record.set_record_id(self.ids.generate(self.clock.as_ref()));
        }
        debug_assert!(
            serialized_id(&record).is_some_and(|id| !id.is_empty()),
            "record must serialize a non-empty `{}` field",
            T::ID_FIELD
        );

        items.push(record.clone());
        self.storage.write(&self.key, &items);

        tracing::debug!(
            key = %self.key,
            id = %record.record_id(),
            count = items.len(),
            "added record"
        );
        record
    }

    /// Overlay `patch`'s top-level fields onto the record with this id.
    ///
    /// Patch fields win; fields absent from the patch are retained. The
    /// record keeps its position in the collection. Returns `None` with
    /// no side effects when the id is unknown, when the patch is not an
    /// object, or when the merged record no longer decodes as `T`.
    pub fn update(&self, id: &str, patch: &serde_json::Value) -> Option<T> {
        if !patch.is_object() {
            tracing::warn!(key = %self.key, id = %id, "update patch is not an object, ignored");
            return None;
        }

        let mut items: Vec<T> = self.storage.read_collection(&self.key);
        let idx = items.iter().position(|item| item.record_id() == id)?;

        let mut merged = match serde_json::to_value(&items[idx]) {
            Ok(serde_json::Value::Object(fields)) => fields,
            Ok(_) | Err(_) => {
                tracing::warn!(key = %self.key, id = %id, "record did not serialize to an object");
                return None;
            }
        };
        if let serde_json::Value::Object(fields) = patch {
            for (field, value) in fields {
                merged.insert(field.clone(), value.clone());
            }
        }

        let updated: T = match serde_json::from_value(serde_json::Value::Object(merged)) {
            Ok(updated) => updated,
            Err(e) => {
                tracing::warn!(key = %self.key, id = %id, error = %e, "patch produced an undecodable record, ignored");
                return None;
            }
        };

        items[idx] = updated.clone();
        self.storage.write(&self.key, &items);

        tracing::debug!(key = %self.key, id = %id, "updated record");
        Some(updated)
    }

    /// Remove the record with this id.
    ///
    /// Returns `false` with no side effects when the id is unknown.
    /// Relative order of the remaining records is preserved.
    pub fn remove(&self, id: &str) -> bool {
        let mut items: Vec<T> = self.storage.read_collection(&self.key);
        let Some(idx) = items.iter().position(|item| item.record_id() == id) else {
            return false;
        };

        items.remove(idx);
        self.storage.write(&self.key, &items);

        tracing::debug!(key = %self.key, id = %id, count = items.len(), "removed record");
        true
    }

    /// Erase the whole collection, key included.
    pub fn clear(&self) {
        self.storage.erase(&self.key);
        tracing::debug!(key = %self.key, "cleared collection");
    }
}

/// Identifier as it appears in the record's serialized form.
fn serialized_id<T: Record>(record: &T) -> Option<String> {
    let value = serde_json::to_value(record).ok()?;
    value.get(T::ID_FIELD)?.as_str().map(str::to_string)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::StorageBackend;
    use crate::storage::MemoryBackend;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        title: String,
        pinned: bool,
    }

    impl Record for Note {
        fn record_id(&self) -> &str {
            &self.id
        }

        fn set_record_id(&mut self, id: String) {
            self.id = id;
        }
    }

    fn note(title: &str) -> Note {
        Note {
            id: String::new(),
            title: title.to_string(),
            pinned: false,
        }
    }

    fn store() -> (RecordStore<Note>, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::new());
        let storage = JsonStorage::new(backend.clone());
        (RecordStore::new(storage, "test:notes"), backend)
    }

    #[test]
    fn test_add_generates_id() {
        let (store, _) = store();

        let added = store.add(note("first"));

        assert!(!added.record_id().is_empty());
        assert_eq!(store.list(), vec![added]);
    }

    #[test]
    fn test_add_keeps_existing_id() {
        let (store, _) = store();
        let mut item = note("first");
        item.id = "custom-id".to_string();

        let added = store.add(item);

        assert_eq!(added.id, "custom-id");
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let (store, _) = store();

        store.add(note("a"));
        store.add(note("b"));
        store.add(note("c"));

        let titles: Vec<String> = store.list().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_list_on_malformed_payload_is_empty() {
        let (store, backend) = store();
        backend.plant("test:notes", "not json");

        assert!(store.list().is_empty());
    }

    #[test]
    fn test_update_unknown_id_is_none_without_side_effects() {
        let (store, _) = store();
        store.add(note("a"));
        let before = store.list();

        let result = store.update("missing", &json!({"title": "x"}));

        assert_eq!(result, None);
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_update_overlays_patch_and_retains_rest() {
        let (store, _) = store();
        let added = store.add(note("a"));

        let updated = store
            .update(&added.id, &json!({"pinned": true}))
            .expect("record exists");

        assert_eq!(updated.title, "a");
        assert!(updated.pinned);
        assert_eq!(updated.id, added.id);
    }

    #[test]
    fn test_update_keeps_position_and_length() {
        let (store, _) = store();
        store.add(note("a"));
        let b = store.add(note("b"));
        store.add(note("c"));

        store.update(&b.id, &json!({"title": "B"}));

        let titles: Vec<String> = store.list().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["a", "B", "c"]);
    }

    #[test]
    fn test_update_with_undecodable_patch_is_none_without_side_effects() {
        let (store, _) = store();
        let added = store.add(note("a"));
        let before = store.list();

        // `pinned` must be a bool; the merged record no longer decodes.
        let result = store.update(&added.id, &json!({"pinned": "yes"}));

        assert_eq!(result, None);
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_update_with_non_object_patch_is_none() {
        let (store, _) = store();
        let added = store.add(note("a"));

        assert_eq!(store.update(&added.id, &json!(42)), None);
    }

    #[test]
    fn test_remove_unknown_id_is_false_without_side_effects() {
        let (store, _) = store();
        store.add(note("a"));

        assert!(!store.remove("missing"));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_remove_takes_exactly_one_record() {
        let (store, _) = store();
        store.add(note("a"));
        let b = store.add(note("b"));
        store.add(note("c"));

        assert!(store.remove(&b.id));

        let titles: Vec<String> = store.list().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[test]
    fn test_clear_erases_everything() {
        let (store, backend) = store();
        store.add(note("a"));
        store.add(note("b"));

        store.clear();

        assert!(store.list().is_empty());
        assert_eq!(backend.read("test:notes").unwrap(), None);
    }

    #[test]
    fn test_random_ids_are_unique() {
        let (store, _) = store();

        let a = store.add(note("a"));
        let b = store.add(note("b"));

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_timestamp_ids_come_from_clock() {
        let backend = Arc::new(MemoryBackend::new());
        let clock = Arc::new(ManualClock::new());
        clock.advance_ms(1_234);
        let store: RecordStore<Note> = RecordStore::new(JsonStorage::new(backend), "test:notes")
            .with_id_strategy(IdStrategy::Timestamp)
            .with_clock(clock.clone());

        let added = store.add(note("a"));

        assert_eq!(added.id, "1234");
    }

    #[test]
    fn test_timestamp_ids_collide_within_same_millisecond() {
        // Pins the intentionally preserved weakness of the timestamp
        // strategy rather than silently fixing it.
        let backend = Arc::new(MemoryBackend::new());
        let clock = Arc::new(ManualClock::new());
        let store: RecordStore<Note> = RecordStore::new(JsonStorage::new(backend), "test:notes")
            .with_id_strategy(IdStrategy::Timestamp)
            .with_clock(clock);

        let a = store.add(note("a"));
        let b = store.add(note("b"));

        assert_eq!(a.id, b.id);
    }
}
