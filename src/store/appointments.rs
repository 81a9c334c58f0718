//! Appointment aggregation store.
//!
//! The portal's listing endpoint cannot filter by status, so this store
//! bulk-fetches one oversized page, reduces it to the records matching a
//! pinned lifecycle status, flattens them for display, and re-paginates
//! the reduced set client-side. Pagination totals therefore reflect the
//! filtered set, never the server's raw numbers.
//!
//! One instance backs one list view (e.g. the completed-appointments
//! tab). Construct explicitly and share behind `Arc`; there is no
//! global singleton, so tests and multi-view shells create as many
//! isolated instances as they need.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde::Serialize;

use crate::api::{AppointmentsApi, ListAppointmentsQuery, SortDir};
use crate::config::DEFAULT_BULK_PAGE_SIZE;
use crate::error::{ApiError, StoreError};
use crate::models::{AppointmentPage, AppointmentStatus, NormalizedAppointment};
use crate::normalize::normalize_record;
use crate::notify::NotificationCenter;
use crate::store::paging;

/// Default sort field forwarded to the server.
pub const DEFAULT_SORT_FIELD: &str = "created_date";

/// Single user-visible message for every fetch failure. The typed
/// `ApiError` taxonomy goes to the log, not to the toast.
const FETCH_FAILURE_MESSAGE: &str = "Could not load appointments. Please try again.";

// ═══════════════════════════════════════════════════════════
// View-facing state
// ═══════════════════════════════════════════════════════════

/// Current filter values.
///
/// `status` is pinned at store construction and not editable afterwards;
/// the remaining fields are forwarded to the server query.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub search_term: String,
    pub sort_by: String,
    pub sort_dir: SortDir,
    pub status: AppointmentStatus,
}

impl FilterState {
    /// Filter defaults for a given pinned status.
    pub fn defaults(status: AppointmentStatus) -> Self {
        Self {
            search_term: String::new(),
            sort_by: DEFAULT_SORT_FIELD.to_string(),
            sort_dir: SortDir::Desc,
            status,
        }
    }
}

/// A single filter mutation. Applying one resets to the first page and
/// triggers a refetch.
#[derive(Debug, Clone)]
pub enum FilterUpdate {
    SearchTerm(String),
    SortBy(String),
    SortDir(SortDir),
}

/// Pagination metadata recomputed from the filtered set.
///
/// `total_elements` counts the filtered records, `total_pages` is
/// `max(1, ceil(total_elements / page_size))` after a successful fetch,
/// and `last` holds exactly when `page_no` is the final page (or there
/// are no pages at all). After a failed fetch the whole window collapses
/// to zero with `last == true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    pub page_no: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub last: bool,
}

impl PaginationState {
    fn initial(page_size: u32) -> Self {
        Self {
            page_no: 0,
            page_size,
            total_elements: 0,
            total_pages: 0,
            last: true,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Store
// ═══════════════════════════════════════════════════════════

struct StoreState {
    filters: FilterState,
    pagination: PaginationState,
    /// The full filtered, normalized set; the visible page is a slice.
    records: Vec<NormalizedAppointment>,
    loading: bool,
}

/// Aggregator store for one status-pinned appointment list view.
pub struct AppointmentStore<A> {
    api: A,
    notifications: Arc<NotificationCenter>,
    bulk_page_size: u32,
    state: RwLock<StoreState>,
    /// Sequence number of the most recently issued fetch. A completed
    /// response is applied only while it still carries this number, so
    /// the last-issued fetch wins over the last-to-complete one.
    fetch_seq: AtomicU64,
}

impl<A: AppointmentsApi> AppointmentStore<A> {
    /// Create a store pinned to `status`, paginating at `page_size`.
    pub fn new(
        api: A,
        status: AppointmentStatus,
        page_size: u32,
        notifications: Arc<NotificationCenter>,
    ) -> Self {
        Self {
            api,
            notifications,
            bulk_page_size: DEFAULT_BULK_PAGE_SIZE,
            state: RwLock::new(StoreState {
                filters: FilterState::defaults(status),
                pagination: PaginationState::initial(page_size),
                records: Vec::new(),
                loading: false,
            }),
            fetch_seq: AtomicU64::new(0),
        }
    }

    /// Override the oversized page size used for the bulk fetch.
    pub fn with_bulk_page_size(mut self, page_size: u32) -> Self {
        self.bulk_page_size = page_size;
        self
    }

    // ── Operations ──────────────────────────────────────────

    /// Refresh the store from the server.
    ///
    /// Issues one bulk GET, filters the result to the pinned status,
    /// normalizes the survivors and recomputes pagination, replacing the
    /// previous state wholesale. A failed fetch clears the record set,
    /// collapses pagination and pushes one failure notification; it is
    /// never retried automatically.
    pub fn fetch(&self) -> Result<(), StoreError> {
        let (seq, query) = self.begin_fetch()?;
        let result = self.api.list_appointments(&query);
        self.apply(seq, result)
    }

    /// Move to `new_page_no` and refetch.
    ///
    /// A request outside `0..total_pages` is a no-op: no state change,
    /// no network call.
    pub fn change_page(&self, new_page_no: u32) -> Result<(), StoreError> {
        {
            let state = self.read_state()?;
            if new_page_no >= state.pagination.total_pages {
                tracing::debug!(
                    new_page_no,
                    total_pages = state.pagination.total_pages,
                    "Ignoring out-of-range page request"
                );
                return Ok(());
            }
        }
        {
            let mut state = self.write_state()?;
            state.pagination.page_no = new_page_no;
        }
        self.fetch()
    }

    /// Apply one filter change, reset to the first page and refetch.
    pub fn update_filter(&self, update: FilterUpdate) -> Result<(), StoreError> {
        {
            let mut state = self.write_state()?;
            match update {
                FilterUpdate::SearchTerm(term) => state.filters.search_term = term,
                FilterUpdate::SortBy(field) => state.filters.sort_by = field,
                FilterUpdate::SortDir(dir) => state.filters.sort_dir = dir,
            }
            state.pagination.page_no = 0;
        }
        self.fetch()
    }

    /// Restore filter defaults (keeping the pinned status), reset to the
    /// first page and refetch.
    pub fn reset_filters(&self) -> Result<(), StoreError> {
        {
            let mut state = self.write_state()?;
            let status = state.filters.status;
            state.filters = FilterState::defaults(status);
            state.pagination.page_no = 0;
        }
        self.fetch()
    }

    // ── View accessors ──────────────────────────────────────

    /// The currently visible page of normalized records.
    ///
    /// When `page_no` has drifted out of range (the filtered set shrank
    /// underneath it), the slice is empty, with no silent correction.
    pub fn current_page(&self) -> Result<Vec<NormalizedAppointment>, StoreError> {
        let state = self.read_state()?;
        let (start, end) = paging::page_bounds(
            state.pagination.page_no,
            state.pagination.page_size,
            state.records.len(),
        );
        Ok(state.records[start..end].to_vec())
    }

    pub fn pagination(&self) -> Result<PaginationState, StoreError> {
        Ok(self.read_state()?.pagination)
    }

    pub fn filters(&self) -> Result<FilterState, StoreError> {
        Ok(self.read_state()?.filters.clone())
    }

    /// Whether a fetch is in flight. A poisoned lock reads as idle.
    pub fn is_loading(&self) -> bool {
        self.state.read().map(|s| s.loading).unwrap_or(false)
    }

    /// The lifecycle status this store is pinned to.
    pub fn pinned_status(&self) -> Result<AppointmentStatus, StoreError> {
        Ok(self.read_state()?.filters.status)
    }

    // ── Fetch internals ─────────────────────────────────────

    /// Issue a new fetch ticket: bump the sequence number, raise the
    /// loading flag and snapshot the query derived from current filters.
    fn begin_fetch(&self) -> Result<(u64, ListAppointmentsQuery), StoreError> {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let mut state = self.write_state()?;
        state.loading = true;

        let trimmed = state.filters.search_term.trim();
        let query = ListAppointmentsQuery {
            page_no: 0,
            page_size: self.bulk_page_size,
            sort_by: state.filters.sort_by.clone(),
            sort_dir: state.filters.sort_dir,
            search_term: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        };
        Ok((seq, query))
    }

    /// Apply a completed fetch, unless a newer one was issued meanwhile.
    ///
    /// State replacement is atomic: records and pagination change
    /// together under one write guard, never as a partial merge. A stale
    /// response (success or failure) is dropped without touching state;
    /// the in-flight newer fetch owns the loading flag.
    fn apply(
        &self,
        seq: u64,
        result: Result<AppointmentPage, ApiError>,
    ) -> Result<(), StoreError> {
        let mut state = self.write_state()?;
        if seq != self.fetch_seq.load(Ordering::SeqCst) {
            tracing::debug!(seq, "Discarding stale fetch response");
            return Ok(());
        }

        match result {
            Ok(page) => {
                let records: Vec<NormalizedAppointment> = page
                    .content
                    .iter()
                    .filter(|record| record.status == state.filters.status)
                    .map(normalize_record)
                    .collect();

                let total_pages =
                    paging::total_pages(records.len(), state.pagination.page_size);
                state.pagination.total_elements = records.len() as u64;
                state.pagination.total_pages = total_pages;
                state.pagination.last =
                    paging::is_last_page(state.pagination.page_no, total_pages);
                state.records = records;
                state.loading = false;

                tracing::debug!(
                    total_elements = state.pagination.total_elements,
                    total_pages,
                    page_no = state.pagination.page_no,
                    "Applied appointment fetch"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "Appointment fetch failed");
                state.records.clear();
                state.pagination.page_no = 0;
                state.pagination.total_elements = 0;
                state.pagination.total_pages = 0;
                state.pagination.last = true;
                state.loading = false;
                self.notifications.push_error(FETCH_FAILURE_MESSAGE);
            }
        }
        Ok(())
    }

    fn read_state(&self) -> Result<std::sync::RwLockReadGuard<'_, StoreState>, StoreError> {
        self.state.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write_state(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, StoreState>, StoreError> {
        self.state.write().map_err(|_| StoreError::LockPoisoned)
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
