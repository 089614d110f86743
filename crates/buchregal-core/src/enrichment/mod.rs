//! Background enrichment sweep
//!
//! A long-running pass that fills missing covers, genres and blurbs
//! record by record. At most one sweep is in flight: the guard is an
//! explicit atomic flag plus a single task slot that callers can query,
//! cancel and await, not a scan for a thread with a known name.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use buchregal_llm::{BlurbProvider, BlurbRequest};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::SweepConfig;
use crate::sources::CoverLookup;
use crate::store::{Field, RecordStore};

#[derive(Debug, Clone)]
pub struct SweepOptions {
    /// Pause between records, the remote-quota pacing.
    pub record_delay: Duration,
    pub fill_covers: bool,
    pub fill_notes: bool,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self::from_config(&SweepConfig::default())
    }
}

impl SweepOptions {
    pub fn from_config(config: &SweepConfig) -> Self {
        Self {
            record_delay: Duration::from_millis(config.record_delay_ms),
            fill_covers: config.fill_covers,
            fill_notes: config.fill_notes,
        }
    }
}

/// What one sweep run accomplished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Records that received at least one new cell.
    pub enriched: usize,
    /// Records that needed nothing.
    pub skipped: usize,
    /// Records where a lookup or write failed; the sweep moved on.
    pub failed: usize,
    pub cancelled: bool,
}

/// Single-flight guard around the sweep task.
#[derive(Default)]
pub struct EnrichmentSweep {
    running: Arc<AtomicBool>,
    cancel: Arc<AtomicBool>,
    handle: Mutex<Option<JoinHandle<SweepSummary>>>,
}

impl EnrichmentSweep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a sweep unless one is already in flight. Returns whether a
    /// task was spawned. Must be called inside a tokio runtime.
    pub fn spawn<S, P>(
        &self,
        store: Arc<Mutex<S>>,
        lookup: Option<Arc<CoverLookup>>,
        blurbs: Option<Arc<P>>,
        options: SweepOptions,
    ) -> bool
    where
        S: RecordStore + 'static,
        P: BlurbProvider + Send + Sync + 'static,
    {
        if self.running.swap(true, Ordering::SeqCst) {
            debug!("enrichment sweep already in flight, skipped");
            return false;
        }
        self.cancel.store(false, Ordering::SeqCst);

        let running = Arc::clone(&self.running);
        let cancel = Arc::clone(&self.cancel);
        let handle = tokio::spawn(async move {
            let summary = run_sweep(store, lookup, blurbs, options, cancel).await;
            running.store(false, Ordering::SeqCst);
            summary
        });

        *self.handle.lock().unwrap() = Some(handle);
        true
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Ask the in-flight sweep to stop after the current record.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    /// Wait for the in-flight sweep; `None` when nothing was spawned or
    /// the summary was already collected.
    pub async fn await_finished(&self) -> Option<SweepSummary> {
        let handle = self.handle.lock().unwrap().take()?;
        handle.await.ok()
    }
}

async fn run_sweep<S, P>(
    store: Arc<Mutex<S>>,
    lookup: Option<Arc<CoverLookup>>,
    blurbs: Option<Arc<P>>,
    options: SweepOptions,
    cancel: Arc<AtomicBool>,
) -> SweepSummary
where
    S: RecordStore,
    P: BlurbProvider + Send + Sync,
{
    let mut summary = SweepSummary::default();

    let books = match store.lock().unwrap().read_all() {
        Ok(books) => books,
        Err(error) => {
            warn!(%error, "enrichment sweep aborted: read failed");
            summary.failed += 1;
            return summary;
        }
    };

    for book in books {
        if cancel.load(Ordering::SeqCst) {
            summary.cancelled = true;
            break;
        }

        let mut touched = false;
        let mut record_failed = false;

        if options.fill_covers && book.cover_url.is_none() {
            if let Some(lookup) = &lookup {
                let meta = lookup.fetch(&book.title, &book.author).await;
                if let Some(cover) = &meta.cover_url {
                    match store.lock().unwrap().update_field(&book.title, Field::Cover, cover) {
                        Ok(()) => touched = true,
                        Err(error) => {
                            warn!(title = %book.title, %error, "cover write failed");
                            record_failed = true;
                        }
                    }
                }
                if book.genre.trim().is_empty() {
                    if let Some(genre) = &meta.genre {
                        match store.lock().unwrap().update_field(&book.title, Field::Genre, genre) {
                            Ok(()) => touched = true,
                            Err(error) => {
                                warn!(title = %book.title, %error, "genre write failed");
                                record_failed = true;
                            }
                        }
                    }
                }
            }
        }

        // Blurbs go into empty notes only; user text is never overwritten,
        // and wishlist entries wait until they are read.
        if options.fill_notes && book.note.trim().is_empty() && !book.status.is_wishlist() {
            if let Some(provider) = &blurbs {
                let mut request = BlurbRequest::new(&book.title, &book.author);
                if !book.genre.trim().is_empty() {
                    request = request.with_genre(&book.genre);
                }
                match provider.generate(&request).await {
                    Ok(response) => {
                        match store
                            .lock()
                            .unwrap()
                            .update_field(&book.title, Field::Note, &response.blurb)
                        {
                            Ok(()) => touched = true,
                            Err(error) => {
                                warn!(title = %book.title, %error, "blurb write failed");
                                record_failed = true;
                            }
                        }
                    }
                    Err(error) => {
                        warn!(title = %book.title, %error, "blurb generation failed");
                        record_failed = true;
                    }
                }
            }
        }

        if record_failed {
            summary.failed += 1;
        } else if touched {
            summary.enriched += 1;
        } else {
            summary.skipped += 1;
        }

        if !options.record_delay.is_zero() {
            tokio::time::sleep(options.record_delay).await;
        }
    }

    debug!(
        enriched = summary.enriched,
        skipped = summary.skipped,
        failed = summary.failed,
        cancelled = summary.cancelled,
        "enrichment sweep finished"
    );
    summary
}
