//! Domain layer of the college console.
//!
//! Everything here is pure: entity records and DTOs mirrored from the REST
//! backend, the per-entity resource table, form validation, pagination,
//! the keyed load lifecycle, the nested batch registration model, and
//! route/role navigation. I/O lives in `campus-client`.

pub mod dates;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod navigation;
pub mod pagination;
pub mod registration;
pub mod resource;
pub mod types;
pub mod validation;
