//! Domain entities exchanged with the DevOps API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any schema drift between the two crates.
//!
//! Every field is required on decode, so a response missing `id`, `name` or
//! `engineers` fails loudly instead of producing a zero value. An empty `id`
//! marks an entity that has not been created yet and is left out of request
//! bodies.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The four resource kinds served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Engineer,
    Developer,
    Operations,
    DevOps,
}

impl ResourceKind {
    /// URL path segment of the kind's collection.
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Engineer => "engineers",
            ResourceKind::Developer => "developers",
            ResourceKind::Operations => "operations",
            ResourceKind::DevOps => "devops",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Engineer => "engineer",
            ResourceKind::Developer => "developer team",
            ResourceKind::Operations => "operations team",
            ResourceKind::DevOps => "devops team",
        };
        f.write_str(name)
    }
}

/// An entity the client can list, read, create, update and delete.
pub trait Resource: Serialize + DeserializeOwned + Clone + PartialEq + fmt::Debug {
    const KIND: ResourceKind;

    /// Server-assigned identifier; empty before the first create.
    fn id(&self) -> &str;

    /// Copy of the entity with its own id cleared. Nested entities keep theirs.
    fn without_id(&self) -> Self;
}

/// An individual engineer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Engineer {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub email: String,
}

impl Engineer {
    /// An engineer that has not been created yet.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// A developer team. `engineers` keeps the order the service returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Developer {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub engineers: Vec<Engineer>,
}

impl Developer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            engineers: Vec::new(),
        }
    }

    pub fn with_engineers(mut self, engineers: Vec<Engineer>) -> Self {
        self.engineers = engineers;
        self
    }
}

/// An operations team. Same shape as `Developer`, separate collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Operations {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub engineers: Vec<Engineer>,
}

impl Operations {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            engineers: Vec::new(),
        }
    }

    pub fn with_engineers(mut self, engineers: Vec<Engineer>) -> Self {
        self.engineers = engineers;
        self
    }
}

/// Exactly one developer team paired with exactly one operations team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DevOps {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub dev: Developer,
    pub ops: Operations,
}

impl DevOps {
    pub fn new(dev: Developer, ops: Operations) -> Self {
        Self {
            id: String::new(),
            dev,
            ops,
        }
    }
}

impl Resource for Engineer {
    const KIND: ResourceKind = ResourceKind::Engineer;

    fn id(&self) -> &str {
        &self.id
    }

    fn without_id(&self) -> Self {
        Self {
            id: String::new(),
            ..self.clone()
        }
    }
}

impl Resource for Developer {
    const KIND: ResourceKind = ResourceKind::Developer;

    fn id(&self) -> &str {
        &self.id
    }

    fn without_id(&self) -> Self {
        Self {
            id: String::new(),
            ..self.clone()
        }
    }
}

impl Resource for Operations {
    const KIND: ResourceKind = ResourceKind::Operations;

    fn id(&self) -> &str {
        &self.id
    }

    fn without_id(&self) -> Self {
        Self {
            id: String::new(),
            ..self.clone()
        }
    }
}

impl Resource for DevOps {
    const KIND: ResourceKind = ResourceKind::DevOps;

    fn id(&self) -> &str {
        &self.id
    }

    fn without_id(&self) -> Self {
        Self {
            id: String::new(),
            ..self.clone()
        }
    }
}
