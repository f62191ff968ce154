//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//!
//! Samples, users and the analysis catalog load through independent chains
//! and each writes only its own signals.

use dioxus::prelude::*;
use lab_core::analysis::Analysis;
use lab_core::category::AnalysisType;
use lab_core::sample::Sample;
use lab_core::user::User;
use lab_core::LabError;
use lab_stats::PaginationState;
use log::{error, warn};

/// Rows per page of the samples table.
pub const SAMPLES_PER_PAGE: u32 = 10;

/// Shared dashboard state.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Every sample, once all pages have loaded
    pub samples: Signal<Vec<Sample>>,
    pub samples_loading: Signal<bool>,
    /// Every user, once all pages have loaded
    pub users: Signal<Vec<User>>,
    pub users_loading: Signal<bool>,
    /// Banner text of the last failure
    pub error_msg: Signal<Option<String>>,
    /// Set after a missing or rejected token; further loads are skipped
    pub auth_blocked: Signal<bool>,
    /// Analysis type whose catalog is shown
    pub analysis_type: Signal<AnalysisType>,
    pub analyses: Signal<Vec<Analysis>>,
    pub analyses_loading: Signal<bool>,
    /// Client-side paging of the samples table
    pub table_page: Signal<PaginationState>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            samples: Signal::new(Vec::new()),
            samples_loading: Signal::new(true),
            users: Signal::new(Vec::new()),
            users_loading: Signal::new(true),
            error_msg: Signal::new(None),
            auth_blocked: Signal::new(false),
            analysis_type: Signal::new(AnalysisType::Fisicoquimico),
            analyses: Signal::new(Vec::new()),
            analyses_loading: Signal::new(false),
            table_page: Signal::new(PaginationState::new(SAMPLES_PER_PAGE, 0)),
        }
    }

    pub fn loading(&self) -> bool {
        (self.samples_loading)() || (self.users_loading)()
    }

    /// Show `err` in the banner. Auth failures also block further loads.
    pub fn fail(&mut self, err: &LabError) {
        if let LabError::Cancelled = err {
            return;
        }
        if err.is_auth() {
            warn!("[LAB] session rejected: {}", err);
            self.auth_blocked.set(true);
        } else {
            error!("[LAB] load failed: {}", err);
        }
        self.error_msg.set(Some(err.banner_message()));
    }

    /// Store a completed samples load and reset table paging to fit it.
    pub fn set_samples(&mut self, samples: Vec<Sample>) {
        let total = samples.len();
        self.samples.set(samples);
        self.table_page.with_mut(|page| page.set_total(total));
    }

    pub fn go_to_page(&mut self, page: u32) {
        self.table_page.with_mut(|state| state.go_to(page));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
