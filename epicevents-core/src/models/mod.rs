/// Database models for Epic Events
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `collaborator`: employee accounts with their role
/// - `client`: company/contact records owned by a sales collaborator
/// - `contract`: financial agreements tied to a client
/// - `event`: scheduled occasions tied to a signed contract
///
/// Model methods are the raw persistence layer; permission checks live in
/// [`crate::services`].

pub mod client;
pub mod collaborator;
pub mod contract;
pub mod event;

pub use client::{Client, CreateClient, UpdateClient};
pub use collaborator::{Collaborator, CreateCollaborator, Role, UpdateCollaborator};
pub use contract::{Contract, ContractFilter, ContractStatus, CreateContract, UpdateContract};
pub use event::{CreateEvent, Event, UpdateEvent};
