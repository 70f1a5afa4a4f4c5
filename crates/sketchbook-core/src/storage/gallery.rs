//! Saved drawings on top of a key/value store.
//!
//! Two kinds of records are kept: an index holding the ordered list of
//! drawing ids, and one JSON record per drawing.

use super::{KeyValueStore, StorageError, StorageResult};
use crate::drawing::{Drawing, now_millis};
use std::sync::Arc;

/// Key of the drawing id index.
pub const INDEX_KEY: &str = "drawings:index";

/// Prefix of per-drawing record keys.
pub const RECORD_PREFIX: &str = "drawing:";

fn record_key(id: &str) -> String {
    format!("{}{}", RECORD_PREFIX, id)
}

/// Manages the collection of saved drawings.
pub struct Gallery<S: KeyValueStore> {
    store: Arc<S>,
}

impl<S: KeyValueStore> Clone for Gallery<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore> Gallery<S> {
    /// Create a gallery over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Saved drawing ids in insertion order.
    pub async fn ids(&self) -> StorageResult<Vec<String>> {
        match self.store.get(INDEX_KEY).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    async fn write_ids(&self, ids: &[String]) -> StorageResult<()> {
        let json = serde_json::to_string(ids)?;
        self.store.set(INDEX_KEY, json).await
    }

    /// Save a drawing, refreshing its thumbnail and modification time.
    ///
    /// The drawing is copied when called; edits made while the save is in
    /// flight are not included. Returns the record as stored.
    pub async fn save(&self, drawing: &Drawing) -> StorageResult<Drawing> {
        let mut record = drawing.clone();
        record.touch();

        let json = record.to_json()?;
        self.store.set(&record_key(&record.id), json).await?;

        let mut ids = self.ids().await?;
        if !ids.contains(&record.id) {
            ids.push(record.id.clone());
            self.write_ids(&ids).await?;
        }

        log::info!("Saved drawing {} ({} strokes)", record.id, record.strokes.len());
        Ok(record)
    }

    /// Load a single drawing, `None` if it doesn't exist.
    pub async fn load(&self, id: &str) -> StorageResult<Option<Drawing>> {
        match self.store.get(&record_key(id)).await? {
            Some(json) => {
                let drawing = Drawing::from_json(&json).map_err(|e| {
                    log::warn!("Failed to decode drawing {}: {}", id, e);
                    StorageError::Serialization(format!("Failed to parse drawing {}: {}", id, e))
                })?;
                Ok(Some(drawing))
            }
            None => Ok(None),
        }
    }

    /// Load every saved drawing, most recently updated first.
    ///
    /// A record that fails to decode aborts the whole listing. Index entries
    /// without a record are skipped.
    pub async fn list(&self) -> StorageResult<Vec<Drawing>> {
        let mut drawings = Vec::new();
        for id in self.ids().await? {
            match self.load(&id).await? {
                Some(drawing) => drawings.push(drawing),
                None => log::warn!("Index references missing drawing {}", id),
            }
        }
        drawings.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(drawings)
    }

    /// Delete a drawing and drop it from the index.
    pub async fn delete(&self, id: &str) -> StorageResult<()> {
        self.store.remove(&record_key(id)).await?;

        let mut ids = self.ids().await?;
        let before = ids.len();
        ids.retain(|existing| existing != id);
        if ids.len() != before {
            self.write_ids(&ids).await?;
        }

        log::info!("Deleted drawing {}", id);
        Ok(())
    }

    /// Change a drawing's name.
    pub async fn rename(&self, id: &str, name: &str) -> StorageResult<Drawing> {
        let mut drawing = self
            .load(id)
            .await?
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;

        drawing.name = name.to_string();
        drawing.updated_at = now_millis().max(drawing.updated_at);
        self.store.set(&record_key(id), drawing.to_json()?).await?;

        log::info!("Renamed drawing {} to {:?}", id, name);
        Ok(drawing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{BoxFuture, MemoryStore, block_on};
    use crate::stroke::{SerializableColor, Stroke, StrokePoint, StrokeStyle};

    fn gallery() -> Gallery<MemoryStore> {
        Gallery::new(Arc::new(MemoryStore::new()))
    }

    fn stroke() -> Stroke {
        Stroke::from_points(
            vec![StrokePoint::new(0.0, 0.0, 0.5), StrokePoint::new(10.0, 10.0, 0.5)],
            SerializableColor::black(),
            2.0,
            StrokeStyle::Pen,
        )
    }

    #[test]
    fn test_save_and_load() {
        let gallery = gallery();
        let drawing = Drawing::new("First", vec![stroke()], 200, 100);

        let saved = block_on(gallery.save(&drawing)).unwrap();
        assert!(!saved.thumbnail_svg.is_empty());

        let loaded = block_on(gallery.load(&drawing.id)).unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(block_on(gallery.ids()).unwrap(), vec![drawing.id.clone()]);
    }

    #[test]
    fn test_resave_keeps_single_index_entry() {
        let gallery = gallery();
        let drawing = Drawing::new("First", Vec::new(), 200, 100);

        let saved = block_on(gallery.save(&drawing)).unwrap();
        assert!(saved.thumbnail_svg.is_empty());

        let edited = saved.with_strokes(vec![stroke()], 200, 100);
        let saved_again = block_on(gallery.save(&edited)).unwrap();
        assert_eq!(saved_again.created_at, drawing.created_at);
        assert!(!saved_again.thumbnail_svg.is_empty());
        assert_eq!(block_on(gallery.ids()).unwrap().len(), 1);
    }

    #[test]
    fn test_index_keeps_insertion_order() {
        let gallery = gallery();
        let a = Drawing::new("A", Vec::new(), 10, 10);
        let b = Drawing::new("B", Vec::new(), 10, 10);
        block_on(gallery.save(&a)).unwrap();
        block_on(gallery.save(&b)).unwrap();
        block_on(gallery.save(&a)).unwrap();

        assert_eq!(block_on(gallery.ids()).unwrap(), vec![a.id, b.id]);
    }

    #[test]
    fn test_list_sorted_by_updated_desc() {
        let gallery = gallery();
        let mut old = Drawing::new("Old", Vec::new(), 10, 10);
        old.updated_at = 1_000;
        let mut new = Drawing::new("New", Vec::new(), 10, 10);
        new.updated_at = 2_000;

        let store = gallery.store();
        block_on(store.set(&record_key(&old.id), old.to_json().unwrap())).unwrap();
        block_on(store.set(&record_key(&new.id), new.to_json().unwrap())).unwrap();
        let index = serde_json::to_string(&[&old.id, &new.id]).unwrap();
        block_on(store.set(INDEX_KEY, index)).unwrap();

        let names: Vec<_> = block_on(gallery.list())
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["New", "Old"]);
    }

    #[test]
    fn test_list_aborts_on_corrupt_record() {
        let gallery = gallery();
        let good = Drawing::new("Good", Vec::new(), 10, 10);
        block_on(gallery.save(&good)).unwrap();

        let bad_id = "broken";
        let store = gallery.store();
        block_on(store.set(&record_key(bad_id), "{not json".to_string())).unwrap();
        let index = serde_json::to_string(&[good.id.as_str(), bad_id]).unwrap();
        block_on(store.set(INDEX_KEY, index)).unwrap();

        let result = block_on(gallery.list());
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_list_skips_missing_record() {
        let gallery = gallery();
        let good = Drawing::new("Good", Vec::new(), 10, 10);
        block_on(gallery.save(&good)).unwrap();
        let index = serde_json::to_string(&[good.id.as_str(), "ghost"]).unwrap();
        block_on(gallery.store().set(INDEX_KEY, index)).unwrap();

        assert_eq!(block_on(gallery.list()).unwrap().len(), 1);
    }

    #[test]
    fn test_delete() {
        let gallery = gallery();
        let a = Drawing::new("A", Vec::new(), 10, 10);
        let b = Drawing::new("B", Vec::new(), 10, 10);
        block_on(gallery.save(&a)).unwrap();
        block_on(gallery.save(&b)).unwrap();

        block_on(gallery.delete(&a.id)).unwrap();
        assert_eq!(block_on(gallery.ids()).unwrap(), vec![b.id.clone()]);
        assert!(block_on(gallery.load(&a.id)).unwrap().is_none());
        block_on(gallery.delete(&a.id)).unwrap();
    }

    #[test]
    fn test_rename() {
        let gallery = gallery();
        let drawing = Drawing::new("Before", vec![stroke()], 10, 10);
        block_on(gallery.save(&drawing)).unwrap();

        let renamed = block_on(gallery.rename(&drawing.id, "After")).unwrap();
        assert_eq!(renamed.name, "After");
        let loaded = block_on(gallery.load(&drawing.id)).unwrap().unwrap();
        assert_eq!(loaded.name, "After");
        assert_eq!(loaded.strokes, drawing.strokes);

        let missing = block_on(gallery.rename("nope", "X"));
        assert!(matches!(missing, Err(StorageError::NotFound(_))));
    }

    /// Store whose writes always fail.
    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> BoxFuture<'_, StorageResult<Option<String>>> {
            Box::pin(async { Ok(None) })
        }

        fn set(&self, _key: &str, _value: String) -> BoxFuture<'_, StorageResult<()>> {
            Box::pin(async { Err(StorageError::Io("disk full".to_string())) })
        }

        fn remove(&self, _key: &str) -> BoxFuture<'_, StorageResult<()>> {
            Box::pin(async { Err(StorageError::Io("disk full".to_string())) })
        }
    }

    #[test]
    fn test_save_failure_leaves_input_untouched() {
        let gallery = Gallery::new(Arc::new(FailingStore));
        let drawing = Drawing::new("Doomed", vec![stroke()], 10, 10);
        let before = drawing.clone();

        let result = block_on(gallery.save(&drawing));
        assert!(matches!(result, Err(StorageError::Io(_))));
        assert_eq!(drawing, before);
    }
}
