//! Appointment record normalizer.
//!
//! Flattens the nested customer/doctor sub-objects of a raw record into
//! the scalar fields the list views bind to.
//!
//! The display-name split is the portal's historical rule: the last
//! whitespace-delimited token is the first name, the remainder is the
//! last name. It is not locale-aware (single-token names get an empty
//! last name, multi-part family names stay glued together). Kept behind
//! one function so a replacement can swap it out in a single place.

use crate::models::{AppointmentRecord, NormalizedAppointment};

/// Split a display name into `(first_name, last_name)`.
///
/// `"Nguyen Van A"` → `("A", "Nguyen Van")`; `"Anna"` → `("Anna", "")`.
pub fn split_display_name(full_name: &str) -> (String, String) {
    let trimmed = full_name.trim();
    match trimmed.rsplit_once(char::is_whitespace) {
        Some((rest, first)) => (first.to_string(), rest.trim_end().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}

/// Project a raw record into its display-ready form.
pub fn normalize_record(record: &AppointmentRecord) -> NormalizedAppointment {
    let (first_name, last_name) = split_display_name(&record.customer.full_name);

    NormalizedAppointment {
        id: record.id,
        status: record.status,
        customer_first_name: first_name,
        customer_last_name: last_name,
        customer_email: record.customer.email.clone(),
        customer_phone: record.customer.phone.clone(),
        doctor_name: record.doctor.full_name.clone(),
        doctor_specialization: record.doctor.specialization.clone(),
        start_time: record.start_time,
        end_time: record.end_time,
        created_date: record.created_date,
        symptoms: record.symptoms.clone(),
        diagnosis: record.diagnosis.clone(),
        prescription: record.prescription.clone(),
    }
}
