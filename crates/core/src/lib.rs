//! Domain logic for the kennel manager backend.
//!
//! Everything here is free of I/O so it can be shared by the repository
//! layer, the HTTP handlers and their tests.

pub mod applications;
pub mod calendar;
pub mod contacts;
pub mod contracts;
pub mod dogs;
pub mod error;
pub mod health;
pub mod litters;
pub mod messages;
pub mod milestones;
pub mod pages;
pub mod pagination;
pub mod photos;
pub mod puppies;
pub mod rules;
pub mod search;
pub mod types;
pub mod uploads;
pub mod validate;
