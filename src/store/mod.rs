//! Client-side aggregation stores.

mod appointments;
pub mod paging;

pub use appointments::{
    AppointmentStore, FilterState, FilterUpdate, PaginationState, DEFAULT_SORT_FIELD,
};
