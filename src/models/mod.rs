//! Wire and view models for the portal API.

mod appointment;

pub use appointment::{
    AppointmentPage, AppointmentRecord, AppointmentStatus, CustomerRef, DoctorRef,
    NormalizedAppointment,
};
