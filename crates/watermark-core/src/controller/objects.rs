use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::Result;

type Objects = Arc<Mutex<HashMap<u64, Arc<[u8]>>>>;

/// Registry of transient local objects (downloaded blobs awaiting a save).
///
/// Each object lives exactly as long as the [`ObjectHandle`] returned by
/// [`ObjectStore::create`].
#[derive(Clone, Default)]
pub struct ObjectStore {
    objects: Objects,
    next_id: Arc<AtomicU64>,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, bytes: impl Into<Arc<[u8]>>) -> ObjectHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let bytes = bytes.into();
        lock(&self.objects).insert(id, bytes.clone());
        debug!("created object {id} ({} bytes)", bytes.len());
        ObjectHandle {
            id,
            bytes,
            objects: self.objects.clone(),
        }
    }

    /// Number of objects not yet released.
    pub fn live_count(&self) -> usize {
        lock(&self.objects).len()
    }
}

impl fmt::Debug for ObjectStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStore")
            .field("live", &self.live_count())
            .finish()
    }
}

/// A live object. Dropping the handle releases it.
pub struct ObjectHandle {
    id: u64,
    bytes: Arc<[u8]>,
    objects: Objects,
}

impl ObjectHandle {
    /// Local reference string, shaped like a browser object URL.
    pub fn url(&self) -> String {
        format!("blob:watermark/{}", self.id)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

}

impl Drop for ObjectHandle {
    fn drop(&mut self) {
        lock(&self.objects).remove(&self.id);
        debug!("released object {}", self.id);
    }
}

impl fmt::Debug for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectHandle")
            .field("id", &self.id)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn lock(objects: &Objects) -> std::sync::MutexGuard<'_, HashMap<u64, Arc<[u8]>>> {
    objects.lock().unwrap_or_else(|e| e.into_inner())
}

/// Where a downloaded file ends up.
pub trait SaveTarget {
    /// Save `object` under `filename`.
    ///
    /// The target owns the handle and releases the object by dropping it once
    /// the save has finished, whatever the result. A target that finishes on
    /// another thread moves the handle there.
    fn save(&mut self, filename: &str, object: ObjectHandle) -> Result<()>;
}
