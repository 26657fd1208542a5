//! The lifecycle contract resource handlers drive when reconciling declared
//! state against the service.
//!
//! # Contract
//! - After `create` returns `e`, `read(&e.id)` yields an entity equal to `e`.
//! - `update` is a full replace: pass the complete desired entity, including
//!   fields that did not change. Nothing is merged.
//! - `import` adopts an existing id and is exactly a `read`.
//! - After `delete(id)` succeeds, `read(id)` fails with an error for which
//!   `ApiError::is_not_found` holds, so cleanup can treat "already gone" as
//!   done while still halting on transport or decode failures.

use crate::client::DevOpsClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::Resource;

/// Result of comparing tracked state with what the service holds now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drift<R> {
    InSync,
    Changed(R),
    Gone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Deleted,
    AlreadyGone,
}

pub trait ResourceLifecycle<R: Resource> {
    fn create(&self, desired: &R) -> Result<R, ApiError>;

    fn read(&self, id: &str) -> Result<R, ApiError>;

    fn update(&self, id: &str, desired: &R) -> Result<R, ApiError>;

    fn delete(&self, id: &str) -> Result<(), ApiError>;

    fn import(&self, id: &str) -> Result<R, ApiError> {
        self.read(id)
    }

    /// Re-read `prior` and report whether the service still matches it.
    fn refresh(&self, prior: &R) -> Result<Drift<R>, ApiError> {
        match self.read(prior.id()) {
            Ok(current) if &current == prior => Ok(Drift::InSync),
            Ok(current) => Ok(Drift::Changed(current)),
            Err(err) if err.is_not_found() => Ok(Drift::Gone),
            Err(err) => Err(err),
        }
    }

    /// Delete `id`, treating a resource that no longer exists as removed.
    fn destroy(&self, id: &str) -> Result<Removal, ApiError> {
        match self.delete(id) {
            Ok(()) => Ok(Removal::Deleted),
            Err(err) if err.is_not_found() => Ok(Removal::AlreadyGone),
            Err(err) => Err(err),
        }
    }
}

impl<T: Transport, R: Resource> ResourceLifecycle<R> for DevOpsClient<T> {
    fn create(&self, desired: &R) -> Result<R, ApiError> {
        DevOpsClient::create(self, desired)
    }

    fn read(&self, id: &str) -> Result<R, ApiError> {
        self.get(id)
    }

    fn update(&self, id: &str, desired: &R) -> Result<R, ApiError> {
        DevOpsClient::update(self, id, desired)
    }

    fn delete(&self, id: &str) -> Result<(), ApiError> {
        DevOpsClient::delete::<R>(self, id)
    }
}
