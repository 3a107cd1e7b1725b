//! CRCRMS Core
//!
//! This crate holds the domain model for criminal records, crime reports and
//! investigations, the role-scoped access policy, and the record service
//! through which every surface (HTTP API, CLI) reads and mutates records.

pub mod access;
pub mod credentials;
pub mod evidence;
pub mod model;
pub mod service;
pub mod store;
pub mod validate;

use thiserror::Error;
use uuid::Uuid;

pub use access::{Action, Actor, Resource, Scope, Target};
pub use evidence::{BlobStore, EvidenceUpload, MemoryBlobStore};
pub use model::*;
pub use service::RecordService;
pub use store::{MemoryStore, RecordStore};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payload too large: {0}")]
    TooLarge(String),

    #[error("Storage error: {0}")]
    Store(String),

    #[error("Blob storage error: {0}")]
    Blob(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        CoreError::NotFound { entity, id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
