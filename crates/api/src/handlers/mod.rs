//! Request handlers.
//!
//! Handlers delegate fetching to the shared
//! [`StudentPortal`](sbtet_upstream::StudentPortal), interpret the payload
//! with `sbtet_core`, and map failures via [`AppError`](crate::error::AppError).

pub mod attendance;
pub mod results;
