//! JSONL-backed collection store
//!
//! One `{collection}.jsonl` file per collection. Mutations append a record
//! line; deletes compact the file. Loading replays lines with last write
//! winning per id, so an interrupted append never loses earlier records.

use eyre::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::record::{Filter, Record};

/// Per-collection statistics
#[derive(Debug, Clone)]
pub struct CollectionStats {
    /// Collection name
    pub name: String,
    /// Number of live records
    pub record_count: usize,
    /// Size of the backing file in bytes
    pub file_bytes: u64,
}

/// The main record store
pub struct Store {
    /// Base path for collection files
    base_path: PathBuf,
    /// In-memory collections, keyed by collection name then record id
    collections: HashMap<String, HashMap<String, Value>>,
}

impl Store {
    /// Open or create a store at the given directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).context("Failed to create store directory")?;

        let mut store = Self {
            base_path,
            collections: HashMap::new(),
        };
        store.load()?;
        debug!(base_path = %store.base_path.display(), "Opened trip store");
        Ok(store)
    }

    /// Reload all collections from disk, dropping in-memory state
    pub fn sync(&mut self) -> Result<()> {
        debug!("Store::sync: called");
        self.collections.clear();
        self.load()
    }

    fn load(&mut self) -> Result<()> {
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map(|e| e == "jsonl").unwrap_or(false)
                && let Some(name) = path.file_stem().and_then(|s| s.to_str())
            {
                let records = Self::load_collection(&path)
                    .context(format!("Failed to load collection: {}", path.display()))?;
                debug!(collection = name, count = records.len(), "Loaded collection");
                self.collections.insert(name.to_string(), records);
            }
        }
        Ok(())
    }

    /// Replay a JSONL file; later lines win for duplicate ids
    fn load_collection(path: &Path) -> Result<HashMap<String, Value>> {
        let content = fs::read_to_string(path)?;
        let mut records = HashMap::new();

        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(line)
                .context(format!("Malformed record line in {}", path.display()))?;
            match value.get("id").and_then(|v| v.as_str()) {
                Some(id) => {
                    records.insert(id.to_string(), value);
                }
                None => warn!(file = %path.display(), "Skipping record line without id"),
            }
        }

        Ok(records)
    }

    fn collection_file(&self, collection: &str) -> PathBuf {
        self.base_path.join(format!("{}.jsonl", collection))
    }

    /// Append one record line to a collection file
    fn append(&self, collection: &str, value: &Value) -> Result<()> {
        let path = self.collection_file(collection);
        let line = serde_json::to_string(value)? + "\n";

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .context(format!("Failed to open collection file: {}", path.display()))?;
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// Rewrite a collection file from the in-memory map (compaction)
    fn rewrite(&self, collection: &str) -> Result<()> {
        let path = self.collection_file(collection);
        let mut lines = String::new();

        if let Some(records) = self.collections.get(collection) {
            let mut values: Vec<&Value> = records.values().collect();
            values.sort_by(|a, b| {
                let ka = a.get("id").and_then(|i| i.as_str()).unwrap_or("");
                let kb = b.get("id").and_then(|i| i.as_str()).unwrap_or("");
                ka.cmp(kb)
            });
            for value in values {
                lines.push_str(&serde_json::to_string(value)?);
                lines.push('\n');
            }
        }

        fs::write(&path, lines).context(format!("Failed to rewrite collection file: {}", path.display()))
    }

    /// Create a new record; fails if the id already exists
    pub fn create<T: Record>(&mut self, record: T) -> Result<String> {
        let collection = T::collection_name();
        let id = record.id().to_string();

        let exists = self
            .collections
            .get(collection)
            .map(|c| c.contains_key(&id))
            .unwrap_or(false);
        if exists {
            return Err(eyre::eyre!("Record already exists: {}/{}", collection, id));
        }

        let value = serde_json::to_value(&record)?;
        self.append(collection, &value)?;
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), value);

        debug!(collection, %id, "Created record");
        Ok(id)
    }

    /// Fetch a record by id
    pub fn get<T: Record>(&self, id: &str) -> Result<Option<T>> {
        let collection = T::collection_name();
        match self.collections.get(collection).and_then(|c| c.get(id)) {
            Some(value) => {
                let record: T = serde_json::from_value(value.clone())
                    .context(format!("Failed to deserialize record: {}/{}", collection, id))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Update an existing record; fails if it does not exist
    pub fn update<T: Record>(&mut self, record: T) -> Result<()> {
        let collection = T::collection_name();
        let id = record.id().to_string();

        let exists = self
            .collections
            .get(collection)
            .map(|c| c.contains_key(&id))
            .unwrap_or(false);
        if !exists {
            return Err(eyre::eyre!("Record not found: {}/{}", collection, id));
        }

        let value = serde_json::to_value(&record)?;
        self.append(collection, &value)?;
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id, value);
        Ok(())
    }

    /// Delete a record; returns whether it existed
    pub fn delete<T: Record>(&mut self, id: &str) -> Result<bool> {
        self.delete_raw(T::collection_name(), id)
    }

    /// Delete by collection name, without knowing the record type
    pub fn delete_raw(&mut self, collection: &str, id: &str) -> Result<bool> {
        let removed = self
            .collections
            .get_mut(collection)
            .map(|c| c.remove(id).is_some())
            .unwrap_or(false);

        if removed {
            self.rewrite(collection)?;
            debug!(collection, %id, "Deleted record");
        }
        Ok(removed)
    }

    /// List records matching every filter, ordered by updated_at then id
    pub fn list<T: Record>(&self, filters: &[Filter]) -> Result<Vec<T>> {
        let collection = T::collection_name();
        let mut records: Vec<T> = Vec::new();

        if let Some(values) = self.collections.get(collection) {
            for value in values.values() {
                let record: T = serde_json::from_value(value.clone())
                    .context(format!("Failed to deserialize record in {}", collection))?;
                let fields = record.indexed_fields();
                if filters.iter().all(|f| f.matches(&fields)) {
                    records.push(record);
                }
            }
        }

        records.sort_by(|a, b| {
            a.updated_at()
                .cmp(&b.updated_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(records)
    }

    /// Number of live records in T's collection
    pub fn count<T: Record>(&self) -> usize {
        self.collections
            .get(T::collection_name())
            .map(|c| c.len())
            .unwrap_or(0)
    }

    /// Names of collections present in the store
    pub fn collection_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.collections.keys().cloned().collect();
        names.sort();
        names
    }

    /// Raw JSON records of a collection, ordered by id (for inspection tooling)
    pub fn raw_records(&self, collection: &str) -> Vec<Value> {
        let mut values: Vec<Value> = self
            .collections
            .get(collection)
            .map(|c| c.values().cloned().collect())
            .unwrap_or_default();
        values.sort_by(|a, b| {
            let ka = a.get("id").and_then(|i| i.as_str()).unwrap_or("");
            let kb = b.get("id").and_then(|i| i.as_str()).unwrap_or("");
            ka.cmp(kb)
        });
        values
    }

    /// Statistics for every collection in the store
    pub fn stats(&self) -> Result<Vec<CollectionStats>> {
        let mut stats = Vec::new();
        for name in self.collection_names() {
            let file_bytes = fs::metadata(self.collection_file(&name))
                .map(|m| m.len())
                .unwrap_or(0);
            let record_count = self.collections.get(&name).map(|c| c.len()).unwrap_or(0);
            stats.push(CollectionStats {
                name,
                record_count,
                file_bytes,
            });
        }
        Ok(stats)
    }
}
