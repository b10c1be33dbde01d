//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers validate input with `kennel_core`, delegate persistence to the
//! repositories in `kennel_db` and map errors via [`AppError`](crate::error::AppError).

pub mod applications;
pub mod contracts;
pub mod customers;
pub mod dogs;
pub mod events;
pub mod health;
pub mod leads;
pub mod litters;
pub mod messages;
pub mod pages;
pub mod photos;
pub mod puppies;
pub mod search;
