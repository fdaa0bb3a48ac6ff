//! The rendering cache (spec.md §4.8 "Rendering cache"): a
//! `page -> compressed pixmap` map kept current by a single background
//! worker thread, so a page-turn or a resolution change never blocks the
//! UI thread on a PDF render.
//!
//! Requests coalesce: if a second request for the same page arrives while
//! the worker is still busy with an earlier one, only the latest request
//! survives (spec.md §5 "Cancellation & timeouts" — the worker never
//! queues stale work). Shutdown joins the worker thread with a bounded
//! timeout, the same `mpsc` + `recv_timeout` shape the daemon tray thread
//! in this codebase uses to hand back readiness without blocking forever.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use log::{debug, warn};

use crate::backend::{PageCrop, PdfBackend, RenderedPixmap};
use crate::error::{EngineError, Result};

const SHUTDOWN_JOIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Key a cache entry is stored under: which page, which crop, and at what
/// resolution it was last rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub page: u32,
    pub part: PageCrop,
}

struct CacheEntry {
    resolution_bits: u64,
    page_width: f64,
    page_height: f64,
    compressed: Vec<u8>,
    width: u32,
    height: u32,
}

impl CacheEntry {
    fn resolution(&self) -> f64 {
        f64::from_bits(self.resolution_bits)
    }

    fn is_stale_for(&self, resolution: f64, page_width: f64, page_height: f64) -> bool {
        let expected_w = resolution * page_width;
        let expected_h = resolution * page_height;
        let actual_w = resolution * self.page_width;
        let actual_h = resolution * self.page_height;
        (self.resolution() - resolution).abs() > 1e-9
            || (expected_w - actual_w).abs() > 2.0
            || (expected_h - actual_h).abs() > 2.0
    }

    fn byte_len(&self) -> usize {
        self.compressed.len()
    }
}

/// A request the worker thread executes: render `key` at `resolution` for
/// `page_width`/`page_height` and push a compressed entry back in.
struct RenderJob {
    key: CacheKey,
    resolution: f64,
    page_width: f64,
    page_height: f64,
    generation: u64,
}

struct Shared {
    backend: Arc<dyn PdfBackend>,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    total_bytes: AtomicU64,
    max_memory: u64,
    max_cache_pages: usize,
}

/// The rendering cache: a synchronous front end plus a background worker
/// that fills it in. `get_cached` never blocks; `get` blocks until the
/// entry exists, rendering inline if the worker isn't running (e.g. in
/// tests that construct a [`RenderCache`] without calling [`RenderCache::spawn_worker`]).
pub struct RenderCache {
    shared: Arc<Shared>,
    job_tx: Option<mpsc::Sender<RenderJob>>,
    worker: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
    next_generation: AtomicU64,
    current_generation: Arc<AtomicU64>,
}

impl RenderCache {
    pub fn new(backend: Arc<dyn PdfBackend>, max_memory: u64, max_cache_pages: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                backend,
                entries: Mutex::new(HashMap::new()),
                total_bytes: AtomicU64::new(0),
                max_memory,
                max_cache_pages,
            }),
            job_tx: None,
            worker: None,
            shutdown: Arc::new(AtomicBool::new(false)),
            next_generation: AtomicU64::new(0),
            current_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Starts the background worker thread. A cache with no worker still
    /// functions (renders happen inline on `get`); this is how tests avoid
    /// spawning real OS threads.
    pub fn spawn_worker(&mut self) {
        if self.worker.is_some() {
            return;
        }
        let (tx, rx) = mpsc::channel::<RenderJob>();
        let shared = Arc::clone(&self.shared);
        let shutdown = Arc::clone(&self.shutdown);
        let current_generation = Arc::clone(&self.current_generation);
        let handle = std::thread::spawn(move || {
            while let Ok(job) = rx.recv() {
                if shutdown.load(Ordering::Acquire) {
                    break;
                }
                // A newer job superseded this one while it sat in the queue.
                if job.generation < current_generation.load(Ordering::Acquire) {
                    debug!("dropping superseded render job for page {}", job.key.page);
                    continue;
                }
                render_and_store(&shared, &job);
            }
        });
        self.job_tx = Some(tx);
        self.worker = Some(handle);
    }

    /// Returns the cached pixmap for `key` at `resolution` if present and
    /// not stale, without triggering a render.
    pub fn get_cached(&self, key: CacheKey, resolution: f64, page_width: f64, page_height: f64) -> Option<RenderedPixmap> {
        let entries = self.shared.entries.lock().expect("cache mutex poisoned");
        let entry = entries.get(&key)?;
        if entry.is_stale_for(resolution, page_width, page_height) {
            return None;
        }
        decompress(entry)
    }

    /// Returns the cached pixmap, requesting a fresh render if missing or
    /// stale. With a worker running this enqueues the job and returns
    /// `None` immediately (caller re-polls `get_cached` once notified);
    /// without one it renders synchronously.
    pub fn get(&self, key: CacheKey, resolution: f64, page_width: f64, page_height: f64) -> Option<RenderedPixmap> {
        if let Some(pixmap) = self.get_cached(key, resolution, page_width, page_height) {
            return Some(pixmap);
        }
        self.request(key, resolution, page_width, page_height);
        if self.worker.is_none() {
            return self.get_cached(key, resolution, page_width, page_height);
        }
        None
    }

    /// Enqueues a render for `key`, superseding any job already queued for
    /// a page that hasn't started rendering yet.
    pub fn request(&self, key: CacheKey, resolution: f64, page_width: f64, page_height: f64) {
        let generation = self.next_generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.current_generation.store(generation, Ordering::Release);
        let job = RenderJob {
            key,
            resolution,
            page_width,
            page_height,
            generation,
        };
        match &self.job_tx {
            Some(tx) => {
                if tx.send(job).is_err() {
                    warn!("render cache worker channel closed; rendering inline");
                    render_and_store(&self.shared, &RenderJob {
                        key,
                        resolution,
                        page_width,
                        page_height,
                        generation,
                    });
                }
            }
            None => render_and_store(&self.shared, &job),
        }
    }

    pub fn clear_page(&self, page: u32) {
        let mut entries = self.shared.entries.lock().expect("cache mutex poisoned");
        entries.retain(|key, entry| {
            let keep = key.page != page;
            if !keep {
                self.shared.total_bytes.fetch_sub(entry.byte_len() as u64, Ordering::AcqRel);
            }
            keep
        });
    }

    pub fn clear_all(&self) {
        let mut entries = self.shared.entries.lock().expect("cache mutex poisoned");
        entries.clear();
        self.shared.total_bytes.store(0, Ordering::Release);
    }

    /// Invalidates every cached entry that no longer matches `resolution`
    /// (spec.md §6 "change of viewport resolution").
    pub fn change_resolution(&self, resolution: f64, page_size: impl Fn(u32) -> Option<(f64, f64)>) {
        let mut entries = self.shared.entries.lock().expect("cache mutex poisoned");
        entries.retain(|key, entry| {
            let Some((w, h)) = page_size(key.page) else {
                return false;
            };
            let keep = !entry.is_stale_for(resolution, w, h);
            if !keep {
                self.shared.total_bytes.fetch_sub(entry.byte_len() as u64, Ordering::AcqRel);
            }
            keep
        });
    }

    pub fn current_size_bytes(&self) -> u64 {
        self.shared.total_bytes.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.shared.entries.lock().expect("cache mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shuts the worker thread down, waiting up to ten seconds for it to
    /// drain its queue and exit before giving up (spec.md §5).
    pub fn shutdown(&mut self) -> Result<()> {
        self.shutdown.store(true, Ordering::Release);
        self.job_tx.take();
        if let Some(handle) = self.worker.take() {
            let (done_tx, done_rx) = mpsc::channel::<()>();
            let joiner = std::thread::spawn(move || {
                let _ = handle.join();
                let _ = done_tx.send(());
            });
            match done_rx.recv_timeout(SHUTDOWN_JOIN_TIMEOUT) {
                Ok(()) => {
                    let _ = joiner.join();
                    Ok(())
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    warn!("render cache worker did not shut down within the timeout");
                    Err(EngineError::CacheWorkerUnavailable)
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => Ok(()),
            }
        } else {
            Ok(())
        }
    }
}

fn render_and_store(shared: &Shared, job: &RenderJob) {
    let Some(pixmap) = shared.backend.render(job.key.page, job.resolution, job.key.part) else {
        warn!("backend declined to render page {}", job.key.page);
        return;
    };
    let Some(compressed) = compress(&pixmap) else {
        warn!("failed to compress rendered page {} for caching", job.key.page);
        return;
    };
    let entry = CacheEntry {
        resolution_bits: job.resolution.to_bits(),
        page_width: job.page_width,
        page_height: job.page_height,
        width: pixmap.width,
        height: pixmap.height,
        compressed,
    };
    let mut entries = shared.entries.lock().expect("cache mutex poisoned");
    if let Some(old) = entries.insert(job.key, entry) {
        shared.total_bytes.fetch_sub(old.byte_len() as u64, Ordering::AcqRel);
    }
    let new_len = entries.get(&job.key).map(|e| e.byte_len()).unwrap_or(0);
    shared.total_bytes.fetch_add(new_len as u64, Ordering::AcqRel);
    evict_if_over_budget(shared, &mut entries);
}

/// Evicts arbitrary entries (oldest-inserted order is not tracked; this is
/// a soft cap, not an LRU) until both budgets are satisfied.
fn evict_if_over_budget(shared: &Shared, entries: &mut HashMap<CacheKey, CacheEntry>) {
    while entries.len() > shared.max_cache_pages
        || shared.total_bytes.load(Ordering::Acquire) > shared.max_memory
    {
        let Some(victim) = entries.keys().next().copied() else {
            break;
        };
        if let Some(entry) = entries.remove(&victim) {
            shared.total_bytes.fetch_sub(entry.byte_len() as u64, Ordering::AcqRel);
        }
    }
}

/// Encodes a rendered pixmap as a literal PNG byte stream — cache entries
/// are stored exactly as they'd be written to disk, so a cache dump is
/// trivially inspectable with any image viewer.
fn compress(pixmap: &RenderedPixmap) -> Option<Vec<u8>> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, pixmap.width, pixmap.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().ok()?;
        writer.write_image_data(&pixmap.rgba).ok()?;
    }
    Some(bytes)
}

fn decompress(entry: &CacheEntry) -> Option<RenderedPixmap> {
    let decoder = png::Decoder::new(entry.compressed.as_slice());
    let mut reader = decoder.read_info().ok()?;
    let mut rgba = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut rgba).ok()?;
    rgba.truncate(info.buffer_size());
    Some(RenderedPixmap {
        width: entry.width,
        height: entry.height,
        rgba,
    })
}

impl Drop for RenderCache {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::test_double::FakeBackend;

    fn cache() -> RenderCache {
        let backend = Arc::new(FakeBackend::new(4, 100.0, 200.0));
        RenderCache::new(backend, 10 * 1024 * 1024, 10)
    }

    #[test]
    fn inline_render_without_worker_populates_cache() {
        let cache = cache();
        let key = CacheKey { page: 0, part: PageCrop::Full };
        assert!(cache.get_cached(key, 2.0, 100.0, 200.0).is_none());
        let pixmap = cache.get(key, 2.0, 100.0, 200.0);
        assert!(pixmap.is_some());
        assert!(cache.get_cached(key, 2.0, 100.0, 200.0).is_some());
    }

    #[test]
    fn resolution_change_invalidates_mismatched_entries() {
        let mut cache = cache();
        let key = CacheKey { page: 0, part: PageCrop::Full };
        cache.get(key, 2.0, 100.0, 200.0);
        assert!(cache.get_cached(key, 2.0, 100.0, 200.0).is_some());
        cache.change_resolution(4.0, |_| Some((100.0, 200.0)));
        assert!(cache.get_cached(key, 2.0, 100.0, 200.0).is_none());
        let _ = cache.shutdown();
    }

    #[test]
    fn clear_page_removes_only_that_page() {
        let cache = cache();
        let key0 = CacheKey { page: 0, part: PageCrop::Full };
        let key1 = CacheKey { page: 1, part: PageCrop::Full };
        cache.get(key0, 2.0, 100.0, 200.0);
        cache.get(key1, 2.0, 100.0, 200.0);
        cache.clear_page(0);
        assert!(cache.get_cached(key0, 2.0, 100.0, 200.0).is_none());
        assert!(cache.get_cached(key1, 2.0, 100.0, 200.0).is_some());
    }

    #[test]
    fn worker_thread_renders_and_shuts_down_cleanly() {
        let mut cache = cache();
        cache.spawn_worker();
        let key = CacheKey { page: 2, part: PageCrop::Full };
        cache.request(key, 2.0, 100.0, 200.0);
        let mut pixmap = None;
        for _ in 0..200 {
            if let Some(p) = cache.get_cached(key, 2.0, 100.0, 200.0) {
                pixmap = Some(p);
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(pixmap.is_some());
        assert!(cache.shutdown().is_ok());
    }
}
