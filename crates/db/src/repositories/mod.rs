//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod application_repo;
pub mod contract_repo;
pub mod customer_repo;
pub mod dog_repo;
pub mod event_repo;
pub mod event_rule_repo;
pub mod health_repo;
pub mod lead_repo;
pub mod litter_repo;
pub mod message_repo;
pub mod page_repo;
pub mod photo_repo;
pub mod puppy_repo;
pub mod search_repo;

pub use application_repo::{ApplicationFormRepo, ApplicationQuestionRepo, SubmissionRepo};
pub use contract_repo::{ContractRepo, SignOutcome};
pub use customer_repo::CustomerRepo;
pub use dog_repo::DogRepo;
pub use event_repo::EventRepo;
pub use event_rule_repo::EventRuleRepo;
pub use health_repo::{HealthRecordRepo, VaccinationRepo};
pub use lead_repo::LeadRepo;
pub use litter_repo::LitterRepo;
pub use message_repo::MessageRepo;
pub use page_repo::PageRepo;
pub use photo_repo::PhotoRepo;
pub use puppy_repo::PuppyRepo;
pub use search_repo::SearchRepo;
