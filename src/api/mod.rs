//! HTTP boundary for the portal API.

mod client;

pub use client::{
    AppointmentsApi, HttpAppointmentsApi, ListAppointmentsQuery, MockAppointmentsApi, SortDir,
};
