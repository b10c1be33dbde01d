//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - A `Deserialize` list-params struct for query-string filters

pub mod application;
pub mod contract;
pub mod customer;
pub mod dog;
pub mod event;
pub mod health;
pub mod lead;
pub mod litter;
pub mod message;
pub mod page;
pub mod photo;
pub mod puppy;
pub mod search;
