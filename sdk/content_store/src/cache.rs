use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dashmap::DashMap;

use crate::address::ContentAddress;

/// Verified, immutable content.
pub type Blob = Arc<[u8]>;

/// Byte-bounded cache of verified blobs, evicting oldest insertions first.
///
/// Content never changes for a given address, so entries are never stale.
#[derive(Debug)]
pub struct BlobCache {
    entries: DashMap<String, Blob>,
    order: Mutex<VecDeque<String>>,
    used: AtomicUsize,
    capacity: usize,
}

impl BlobCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            order: Mutex::new(VecDeque::new()),
            used: AtomicUsize::new(0),
            capacity,
        }
    }

    pub fn get(&self, address: &ContentAddress) -> Option<Blob> {
        self.entries.get(address.as_str()).map(|e| Arc::clone(e.value()))
    }

    pub fn insert(&self, address: &ContentAddress, blob: Blob) {
        if blob.len() > self.capacity {
            return;
        }
        let Ok(mut order) = self.order.lock() else {
            return;
        };
        if self.entries.contains_key(address.as_str()) {
            return;
        }

        while self.used.load(Ordering::Relaxed) + blob.len() > self.capacity {
            let Some(oldest) = order.pop_front() else {
                break;
            };
            if let Some((_, evicted)) = self.entries.remove(&oldest) {
                self.used.fetch_sub(evicted.len(), Ordering::Relaxed);
            }
        }

        self.used.fetch_add(blob.len(), Ordering::Relaxed);
        order.push_back(address.as_str().to_owned());
        self.entries.insert(address.as_str().to_owned(), blob);
    }

    pub fn used_bytes(&self) -> usize {
        self.used.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
