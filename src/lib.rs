//! CarePort client data layer.
//!
//! Typed access to the CarePort hospital-portal REST API plus the
//! appointment aggregation store the list views bind to. The store
//! bulk-fetches appointments, filters them to one pinned lifecycle
//! status, flattens nested customer/doctor objects for display, and
//! re-paginates the filtered set client-side.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use careport_client::api::HttpAppointmentsApi;
//! use careport_client::auth::TokenStore;
//! use careport_client::config::ApiConfig;
//! use careport_client::models::AppointmentStatus;
//! use careport_client::notify::NotificationCenter;
//! use careport_client::store::AppointmentStore;
//!
//! let tokens = Arc::new(TokenStore::new());
//! tokens.set("bearer-token-from-login");
//!
//! let api = HttpAppointmentsApi::new(&ApiConfig::from_env(), Arc::clone(&tokens));
//! let notifications = Arc::new(NotificationCenter::new());
//! let store = AppointmentStore::new(
//!     api,
//!     AppointmentStatus::Completed,
//!     10,
//!     Arc::clone(&notifications),
//! );
//!
//! store.fetch().unwrap();
//! for appointment in store.current_page().unwrap() {
//!     println!("{} {}", appointment.customer_last_name, appointment.customer_first_name);
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod notify;
pub mod store;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for host applications.
///
/// Honors `RUST_LOG` when set, otherwise falls back to the crate
/// default filter. Call once at startup.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
