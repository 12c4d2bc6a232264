//! C2 — the memory-mapped SPSC ring buffer primitive.
//!
//! # Memory ordering
//!
//! **Producer (`enqueue`):**
//! 1. Load `consumer_tail` with Acquire — synchronizes with the consumer's
//!    Release store, so a freed slot is visible before we reuse it.
//! 2. Load `producer_head` with Relaxed — only this producer ever writes it.
//! 3. Write the record into slot `producer_head mod CAPACITY`.
//! 4. Store `producer_head + 1` with Release — publishes the write so the
//!    consumer's Acquire load of `producer_head` is guaranteed to see it.
//!
//! **Consumer (`dequeue`):**
//! 1. Load `producer_head` with Acquire — synchronizes with the producer's
//!    Release store above.
//! 2. Load `consumer_tail` with Relaxed — only this consumer ever writes it.
//! 3. Copy the record out of slot `consumer_tail mod CAPACITY`.
//! 4. Store `consumer_tail + 1` with Release — publishes that the slot is
//!    free, synchronizing with the producer's next Acquire load of
//!    `consumer_tail`.
//!
//! Sequentially-consistent stores would also satisfy this protocol; weaker
//! orderings (`Relaxed` on the published counter) would not.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;

use memmap2::{MmapMut, MmapOptions};
use tracing::warn;

use crate::boundary::{CAPACITY, MAGIC};
use crate::error::{CreateError, OpenError};
use crate::header::RingHeader;
use crate::invariants::{
    debug_assert_bounded_count, debug_assert_monotonic, debug_assert_no_wrap,
    debug_assert_tail_not_past_head,
};
use crate::record::WireRecord;

/// Result of a non-blocking `enqueue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Ok,
    Full,
}

fn total_size<R: WireRecord>() -> u64 {
    RingHeader::SIZE as u64 + CAPACITY * std::mem::size_of::<R>() as u64
}

/// A single file-backed SPSC ring carrying records of type `R`.
///
/// `enqueue`/`dequeue` never block and never touch the filesystem; only
/// `create`, `open`, `flush`, and `close` do blocking I/O and belong on the
/// startup/shutdown path, never the hot path.
pub struct Ring<R: WireRecord> {
    path: PathBuf,
    file: File,
    mmap: MmapMut,
    _record: std::marker::PhantomData<R>,
}

// Safety: the mapping is shared across the producer and consumer processes
// by contract (§5); within one process a `Ring` handle is only ever driven
// from the single owning role (enforced by the registry/adapter layer, not
// by this type), so sharing the handle across threads is sound as long as
// callers uphold that single-writer / single-reader discipline.
unsafe impl<R: WireRecord> Send for Ring<R> {}
unsafe impl<R: WireRecord> Sync for Ring<R> {}

impl<R: WireRecord> Ring<R> {
    fn header(&self) -> &RingHeader {
        // Safety: the mapping is at least `RingHeader::SIZE` bytes (enforced
        // by `create`/`open`) and is kept alive for the lifetime of `self`.
        unsafe { &*self.mmap.as_ptr().cast::<RingHeader>() }
    }

    fn slot_ptr(&self, seq: u64) -> *mut R {
        let idx = (seq % CAPACITY) as usize;
        // Safety: `idx < CAPACITY` and the data region starts right after
        // the header and holds exactly `CAPACITY` records of type `R`.
        unsafe {
            self.mmap
                .as_ptr()
                .add(RingHeader::SIZE)
                .cast::<R>()
                .add(idx)
                .cast_mut()
        }
    }

    fn best_effort_mlock(mmap: &MmapMut, path: &Path) {
        #[cfg(unix)]
        {
            let ptr = mmap.as_ptr().cast::<libc::c_void>();
            let len = mmap.len();
            let rc = unsafe { libc::mlock(ptr, len) };
            if rc != 0 {
                warn!(
                    path = %path.display(),
                    "mlock failed for ring mapping; proceeding without it (check ulimit -l / CAP_IPC_LOCK)"
                );
            }
        }
        #[cfg(not(unix))]
        {
            let _ = (mmap, path);
        }
    }

    fn best_effort_munlock(&self) {
        #[cfg(unix)]
        {
            let ptr = self.mmap.as_ptr().cast::<libc::c_void>();
            let len = self.mmap.len();
            unsafe {
                libc::munlock(ptr, len);
            }
        }
    }

    /// Creates a brand-new ring file at `path`, replacing any existing file.
    ///
    /// Removes an existing file, creates exclusively with `0o666`, truncates
    /// to the exact total size, maps read/write, best-effort `mlock`s the
    /// mapping, writes the header with release-ordered stores, and flushes.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, CreateError> {
        let path = path.as_ref().to_path_buf();
        let _ = std::fs::remove_file(&path);

        #[cfg(unix)]
        let file = {
            use std::os::unix::fs::OpenOptionsExt;
            OpenOptions::new()
                .read(true)
                .write(true)
                .create_new(true)
                .mode(0o666)
                .open(&path)
                .map_err(|source| CreateError::CannotCreateFile {
                    path: path.clone(),
                    source,
                })?
        };
        #[cfg(not(unix))]
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| CreateError::CannotCreateFile {
                path: path.clone(),
                source,
            })?;

        let size = total_size::<R>();
        file.set_len(size).map_err(|source| CreateError::CannotSizeFile {
            path: path.clone(),
            source,
        })?;
        file.sync_all().map_err(|source| CreateError::CannotSizeFile {
            path: path.clone(),
            source,
        })?;

        let mmap = unsafe {
            MmapOptions::new()
                .map_mut(&file)
                .map_err(|source| CreateError::CannotMap {
                    path: path.clone(),
                    source,
                })?
        };

        Self::best_effort_mlock(&mmap, &path);

        let ring = Self {
            path,
            file,
            mmap,
            _record: std::marker::PhantomData,
        };

        let header = ring.header();
        header.producer_head.store(0, Ordering::Release);
        header.consumer_tail.store(0, Ordering::Release);
        header.magic.store(MAGIC, Ordering::Release);
        header.capacity.store(CAPACITY as u32, Ordering::Release);

        ring.mmap
            .flush()
            .map_err(|source| CreateError::CannotFlush {
                path: ring.path.clone(),
                source,
            })?;

        Ok(ring)
    }

    /// Attaches to an existing ring file, verifying size, magic, and
    /// capacity before the handle is considered valid.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, OpenError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| OpenError::CannotOpen {
                path: path.clone(),
                source,
            })?;

        let expected = total_size::<R>();
        let actual = file
            .metadata()
            .map_err(|source| OpenError::CannotOpen {
                path: path.clone(),
                source,
            })?
            .len();
        if actual != expected {
            return Err(OpenError::SizeMismatch {
                path,
                actual,
                expected,
            });
        }

        let mmap = unsafe {
            MmapOptions::new()
                .map_mut(&file)
                .map_err(|source| OpenError::CannotMap {
                    path: path.clone(),
                    source,
                })?
        };

        Self::best_effort_mlock(&mmap, &path);

        let ring = Self {
            path,
            file,
            mmap,
            _record: std::marker::PhantomData,
        };

        let header = ring.header();
        let magic = header.magic.load(Ordering::Acquire);
        if magic != MAGIC {
            return Err(OpenError::BadMagic {
                path: ring.path,
                found: magic,
                expected: MAGIC,
            });
        }
        let capacity = header.capacity.load(Ordering::Acquire);
        if u64::from(capacity) != CAPACITY {
            return Err(OpenError::CapacityMismatch {
                path: ring.path,
                found: capacity,
                expected: CAPACITY as u32,
            });
        }

        Ok(ring)
    }

    /// Single-producer, non-blocking enqueue. Never touches the filesystem.
    pub fn enqueue(&self, record: R) -> EnqueueOutcome {
        let header = self.header();
        let consumer_tail = header.consumer_tail.load(Ordering::Acquire);
        let producer_head = header.producer_head.load(Ordering::Relaxed);

        let next_head = producer_head + 1;
        if next_head - consumer_tail > CAPACITY {
            return EnqueueOutcome::Full;
        }

        // Safety: this slot is not in the consumer's published range
        // [consumer_tail, producer_head), so only the producer touches it.
        unsafe {
            self.slot_ptr(producer_head).write(record);
        }

        debug_assert_bounded_count!(next_head - consumer_tail, CAPACITY);
        debug_assert_monotonic!("producer_head", producer_head, next_head);
        debug_assert_no_wrap!("producer_head", producer_head, next_head);

        header.producer_head.store(next_head, Ordering::Release);
        EnqueueOutcome::Ok
    }

    /// Single-consumer, non-blocking dequeue. Never touches the filesystem.
    pub fn dequeue(&self) -> Option<R> {
        let header = self.header();
        let producer_head = header.producer_head.load(Ordering::Acquire);
        let consumer_tail = header.consumer_tail.load(Ordering::Relaxed);

        if consumer_tail == producer_head {
            return None;
        }

        // Safety: slot `consumer_tail` was published by the producer's
        // Release store above, observed via our Acquire load.
        let record = unsafe { self.slot_ptr(consumer_tail).read() };

        let next_tail = consumer_tail + 1;
        debug_assert_tail_not_past_head!(next_tail, producer_head);
        debug_assert_monotonic!("consumer_tail", consumer_tail, next_tail);

        header.consumer_tail.store(next_tail, Ordering::Release);
        Some(record)
    }

    /// Advisory depth snapshot; may be stale the instant it is read.
    pub fn depth(&self) -> u64 {
        let header = self.header();
        let head = header.producer_head.load(Ordering::Relaxed);
        let tail = header.consumer_tail.load(Ordering::Relaxed);
        head - tail
    }

    /// Constant capacity of every ring in this transport.
    pub fn capacity(&self) -> u64 {
        CAPACITY
    }

    /// The path this ring is backed by.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `msync`s the mapping.
    pub fn flush(&self) -> std::io::Result<()> {
        self.mmap.flush()
    }

    /// Flushes, best-effort unlocks, and unmaps. Consumes the handle, so
    /// calling it twice is a type error rather than a runtime hazard.
    pub fn close(self) {
        let _ = self.mmap.flush();
        self.best_effort_munlock();
        // `mmap` and `file` are dropped here, unmapping and closing the fd.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CancelRecord;

    fn tmp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("xgw-ring-test-{name}-{}", std::process::id()))
    }

    #[test]
    fn create_then_open_sees_magic_and_capacity() {
        let path = tmp_path("create-open");
        let ring = Ring::<CancelRecord>::create(&path).unwrap();
        drop(ring);

        let ring = Ring::<CancelRecord>::open(&path).unwrap();
        assert_eq!(ring.capacity(), CAPACITY);
        assert_eq!(ring.depth(), 0);
        ring.close();
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn open_rejects_wrong_size_file() {
        let path = tmp_path("size-mismatch");
        std::fs::write(&path, b"too small").unwrap();
        let err = Ring::<CancelRecord>::open(&path);
        assert!(matches!(err, Err(OpenError::SizeMismatch { .. })));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn enqueue_dequeue_round_trips_fifo() {
        let path = tmp_path("fifo");
        let ring = Ring::<CancelRecord>::create(&path).unwrap();

        for i in 0..10u64 {
            let rec = CancelRecord {
                order_id: i,
                user_id: 1,
                symbol: 7,
            };
            assert_eq!(ring.enqueue(rec), EnqueueOutcome::Ok);
        }
        assert_eq!(ring.depth(), 10);

        for i in 0..10u64 {
            let rec = ring.dequeue().unwrap();
            assert_eq!(rec.order_id, i);
        }
        assert!(ring.dequeue().is_none());

        ring.close();
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn full_after_capacity_enqueues_then_succeeds_after_one_dequeue() {
        let path = tmp_path("full");
        let ring = Ring::<CancelRecord>::create(&path).unwrap();

        for i in 0..CAPACITY {
            let rec = CancelRecord {
                order_id: i,
                user_id: 1,
                symbol: 1,
            };
            assert_eq!(ring.enqueue(rec), EnqueueOutcome::Ok);
        }
        assert_eq!(ring.depth(), CAPACITY);

        let overflow = CancelRecord {
            order_id: 999,
            user_id: 1,
            symbol: 1,
        };
        assert_eq!(ring.enqueue(overflow), EnqueueOutcome::Full);

        assert!(ring.dequeue().is_some());
        assert_eq!(ring.enqueue(overflow), EnqueueOutcome::Ok);
        assert!(ring.depth() <= CAPACITY);

        ring.close();
        let _ = std::fs::remove_file(&path);
    }
}
