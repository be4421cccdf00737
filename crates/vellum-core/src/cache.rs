//! LRU image cache for rasterized controls.
//!
//! Bounds memory usage by evicting the least-recently-used images when the
//! total cached pixel count exceeds a configurable limit. One cache is
//! shared by every painter through an `Arc`; the bookkeeping lives behind a
//! `Mutex` so paint calls that are not causally ordered can query and
//! populate it safely. Images are built before they are inserted and are
//! never mutated afterwards, so a reader never sees a half-built image.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::CacheConfig;
use crate::key::StateKey;
use crate::pixmap::Pixmap;

/// Hit/miss/eviction counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub evictions: u64,
}

impl CacheStats {
    /// Fraction of lookups served from the cache, 0.0 when unused.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct CacheState {
    entries: HashMap<StateKey, Arc<Pixmap>>,
    /// Front = most recently used, back = least recently used.
    order: VecDeque<StateKey>,
    current_pixels: usize,
    max_pixels: usize,
    stats: CacheStats,
}

impl CacheState {
    fn evict_to(&mut self, budget: usize) {
        while self.current_pixels > budget {
            let Some(evicted_key) = self.order.pop_back() else {
                break;
            };
            if let Some(evicted) = self.entries.remove(&evicted_key) {
                self.current_pixels -= evicted.pixel_count();
                self.stats.evictions += 1;
            }
        }
    }
}

/// Pixel-budgeted LRU cache of rasterized control images.
pub struct ImageCache {
    inner: Mutex<CacheState>,
}

impl ImageCache {
    /// Create a new cache holding at most `max_pixels` pixels.
    pub fn new(max_pixels: usize) -> Self {
        Self {
            inner: Mutex::new(CacheState {
                entries: HashMap::new(),
                order: VecDeque::new(),
                current_pixels: 0,
                max_pixels,
                stats: CacheStats::default(),
            }),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_pixels)
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // Every mutation leaves the maps consistent, so a panic elsewhere
        // cannot leave a torn state behind.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a cached image, promoting it to the most-recently-used
    /// position.
    ///
    /// Any entry may have been evicted since it was stored, so callers must
    /// always be ready to rebuild on `None`.
    pub fn get(&self, key: &StateKey) -> Option<Arc<Pixmap>> {
        let mut state = self.lock();
        match state.entries.get(key).map(Arc::clone) {
            Some(image) => {
                state.order.retain(|k| k != key);
                state.order.push_front(key.clone());
                state.stats.hits += 1;
                Some(image)
            }
            None => {
                state.stats.misses += 1;
                None
            }
        }
    }

    /// Insert an image, evicting least-recently-used entries as needed to
    /// stay within the pixel budget.
    ///
    /// Keys whose state is animating are ignored, as are images larger than
    /// the whole budget.
    pub fn put(&self, key: StateKey, image: Arc<Pixmap>) {
        if key.state().is_animating() {
            return;
        }
        let size = image.pixel_count();
        let mut state = self.lock();
        if size > state.max_pixels {
            log::debug!(
                "image {}x{} exceeds cache budget of {} pixels; not cached",
                image.width(),
                image.height(),
                state.max_pixels
            );
            return;
        }

        // A racing painter may have stored the same key already.
        if let Some(old) = state.entries.remove(&key) {
            state.current_pixels -= old.pixel_count();
            state.order.retain(|k| k != &key);
        }

        let budget = state.max_pixels - size;
        state.evict_to(budget);

        state.current_pixels += size;
        state.stats.inserts += 1;
        state.order.push_front(key.clone());
        state.entries.insert(key, image);
    }

    /// Whether an image of the given pixel size could be stored at all.
    pub fn is_cachable(&self, width: u32, height: u32) -> bool {
        width as usize * height as usize <= self.lock().max_pixels
    }

    /// Change the pixel budget, evicting down to it immediately.
    pub fn set_max_pixels(&self, max_pixels: usize) {
        let mut state = self.lock();
        state.max_pixels = max_pixels;
        state.evict_to(max_pixels);
    }

    pub fn max_pixels(&self) -> usize {
        self.lock().max_pixels
    }

    /// Check whether `key` is present (without promoting it).
    pub fn contains(&self, key: &StateKey) -> bool {
        self.lock().entries.contains_key(key)
    }

    /// Drop all cached images. Counters are kept.
    pub fn flush(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.order.clear();
        state.current_pixels = 0;
    }

    /// Total pixels currently cached.
    pub fn pixel_count(&self) -> usize {
        self.lock().current_pixels
    }

    /// Number of cached images.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Returns `true` when the cache holds no images.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
