//! Appointment wire types.
//!
//! Raw records arrive with nested `customer` and `doctor` sub-objects;
//! the store flattens them through `normalize` before display. The
//! server owns every field here; this client never writes an
//! appointment back, and in particular never changes `status`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of an appointment, as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Pending,
    Approved,
    Completed,
    Cancelled,
    /// Statuses this client version does not know about.
    #[serde(other)]
    Other,
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Other => "OTHER",
        };
        write!(f, "{s}")
    }
}

/// Patient sub-object embedded in a raw record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRef {
    pub id: Uuid,
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Doctor sub-object embedded in a raw record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorRef {
    pub id: Uuid,
    pub full_name: String,
    #[serde(default)]
    pub specialization: String,
}

/// A raw appointment record as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: Uuid,
    pub status: AppointmentStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_date: DateTime<Utc>,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub prescription: Option<String>,
    pub customer: CustomerRef,
    pub doctor: DoctorRef,
}

/// Listing response envelope.
///
/// The server reports its own pagination metadata here. The aggregator
/// parses it (it is the wire contract) but recomputes totals from the
/// status-filtered set, so these numbers never reach the views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppointmentPage {
    pub content: Vec<AppointmentRecord>,
    pub page_no: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub last: bool,
}

/// Display-ready projection of a raw record.
///
/// Nested sub-objects are hoisted to scalar fields; the customer's
/// display name is split into first/last components. Built fresh on
/// every fetch cycle and replaced wholesale, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAppointment {
    pub id: Uuid,
    pub status: AppointmentStatus,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub doctor_name: String,
    pub doctor_specialization: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_date: DateTime<Utc>,
    pub symptoms: Option<String>,
    pub diagnosis: Option<String>,
    pub prescription: Option<String>,
}
