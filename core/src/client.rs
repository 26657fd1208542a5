//! Resource client for the DevOps API.
//!
//! # Design
//! `DevOpsClient` holds only its base URL, the engineer lookup strategy and
//! a `Transport`; nothing changes after construction, so one client can be
//! shared across threads. Each CRUD operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. The executing methods (`list`, `get`,
//! `create`, `update`, `delete` and the per-kind wrappers) compose the two
//! halves around a single `Transport::execute` call.
//!
//! # Known limitations
//! - With `EngineerLookup::ListScan`, `get_engineer` fetches the whole
//!   collection and scans it, O(n) per call. Nothing is cached.
//! - Team membership has no dedicated operation: read the team, rebuild its
//!   `engineers` list and `update` the whole entity.
//! - Calls block for up to the configured timeout and cannot be cancelled
//!   from here.
//! - `UreqTransport` caps a response body at `MAX_BODY_BYTES`; a larger
//!   body fails as a transport error.

use tracing::debug;

use crate::codec::{decode, encode};
use crate::config::{ClientConfig, EngineerLookup};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{DevOps, Developer, Engineer, Operations, Resource, ResourceKind};

/// Synchronous client for the engineers, developers, operations and devops
/// collections.
#[derive(Debug, Clone)]
pub struct DevOpsClient<T = UreqTransport> {
    base_url: String,
    engineer_lookup: EngineerLookup,
    transport: T,
}

impl DevOpsClient<UreqTransport> {
    /// Client with the default timeout and engineer lookup.
    pub fn new(base_url: &str) -> Self {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new(config.timeout))
    }
}

impl<T> DevOpsClient<T> {
    /// Client executing its requests through `transport`. The config's
    /// timeout is the transport's concern and is not applied here.
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            engineer_lookup: config.engineer_lookup,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn engineer_lookup(&self) -> EngineerLookup {
        self.engineer_lookup
    }

    /// Whether `get::<R>` uses the item endpoint rather than a list scan.
    pub fn uses_item_get(&self, kind: ResourceKind) -> bool {
        kind != ResourceKind::Engineer || self.engineer_lookup == EngineerLookup::ItemGet
    }

    fn collection_url<R: Resource>(&self) -> String {
        format!("{}/{}", self.base_url, R::KIND.collection())
    }

    fn item_url<R: Resource>(&self, id: &str) -> String {
        format!("{}/{}/{id}", self.base_url, R::KIND.collection())
    }

    pub fn build_list<R: Resource>(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url::<R>(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get<R: Resource>(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.item_url::<R>(id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// The body never carries an id; the service assigns one.
    pub fn build_create<R: Resource>(&self, entity: &R) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_url::<R>(),
            headers: json_headers(),
            body: Some(encode(&entity.without_id())?),
        })
    }

    pub fn build_update<R: Resource>(&self, id: &str, entity: &R) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.item_url::<R>(id),
            headers: json_headers(),
            body: Some(encode(entity)?),
        })
    }

    pub fn build_delete<R: Resource>(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_url::<R>(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list<R: Resource>(&self, response: HttpResponse) -> Result<Vec<R>, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_get<R: Resource>(&self, response: HttpResponse) -> Result<R, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// Parse a create response. The service must have assigned an id.
    pub fn parse_create<R: Resource>(&self, response: HttpResponse) -> Result<R, ApiError> {
        check_status(&response)?;
        let created: R = decode(&response.body)?;
        if created.id().is_empty() {
            return Err(ApiError::Decode(format!(
                "service returned a new {} without an id",
                R::KIND
            )));
        }
        Ok(created)
    }

    /// Parse an update response for `id`. Ids never change, so a response
    /// carrying a different id is malformed.
    pub fn parse_update<R: Resource>(&self, id: &str, response: HttpResponse) -> Result<R, ApiError> {
        check_status(&response)?;
        let updated: R = decode(&response.body)?;
        if updated.id() != id {
            return Err(ApiError::Decode(format!(
                "update of {} {id} returned id {:?}",
                R::KIND,
                updated.id()
            )));
        }
        Ok(updated)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

impl<T: Transport> DevOpsClient<T> {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.path, "sending request");
        self.transport.execute(&request)
    }

    pub fn list<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        let response = self.send(self.build_list::<R>())?;
        self.parse_list(response)
    }

    /// Fetch one entity by id, by item GET or list scan depending on the kind
    /// and the configured `EngineerLookup`.
    pub fn get<R: Resource>(&self, id: &str) -> Result<R, ApiError> {
        if !self.uses_item_get(R::KIND) {
            return self.find_in_list(id);
        }
        let response = self.send(self.build_get::<R>(id))?;
        self.parse_get(response)
    }

    /// List the collection and return the entity whose id matches.
    pub fn find_in_list<R: Resource>(&self, id: &str) -> Result<R, ApiError> {
        self.list::<R>()?
            .into_iter()
            .find(|entity| entity.id() == id)
            .ok_or_else(|| {
                debug!(kind = %R::KIND, id, "no match in collection");
                ApiError::NotFound {
                    status: None,
                    detail: format!("{} {id}", R::KIND),
                }
            })
    }

    /// Create `entity`. Its id, if any, is dropped from the request; the
    /// returned value carries the id the service assigned.
    pub fn create<R: Resource>(&self, entity: &R) -> Result<R, ApiError> {
        let response = self.send(self.build_create(entity)?)?;
        self.parse_create(response)
    }

    /// Replace the entity at `id` with `entity` in full.
    pub fn update<R: Resource>(&self, id: &str, entity: &R) -> Result<R, ApiError> {
        let response = self.send(self.build_update(id, entity)?)?;
        self.parse_update(id, response)
    }

    pub fn delete<R: Resource>(&self, id: &str) -> Result<(), ApiError> {
        let response = self.send(self.build_delete::<R>(id))?;
        self.parse_delete(response)
    }

    pub fn list_engineers(&self) -> Result<Vec<Engineer>, ApiError> {
        self.list()
    }

    pub fn get_engineer(&self, id: &str) -> Result<Engineer, ApiError> {
        self.get(id)
    }

    pub fn create_engineer(&self, engineer: &Engineer) -> Result<Engineer, ApiError> {
        self.create(engineer)
    }

    pub fn update_engineer(&self, id: &str, engineer: &Engineer) -> Result<Engineer, ApiError> {
        self.update(id, engineer)
    }

    pub fn delete_engineer(&self, id: &str) -> Result<(), ApiError> {
        self.delete::<Engineer>(id)
    }

    pub fn list_developers(&self) -> Result<Vec<Developer>, ApiError> {
        self.list()
    }

    pub fn get_developer(&self, id: &str) -> Result<Developer, ApiError> {
        self.get(id)
    }

    pub fn create_developer(&self, developer: &Developer) -> Result<Developer, ApiError> {
        self.create(developer)
    }

    /// Sends `developer.engineers` as given; membership is replaced, not merged.
    pub fn update_developer(&self, id: &str, developer: &Developer) -> Result<Developer, ApiError> {
        self.update(id, developer)
    }

    pub fn delete_developer(&self, id: &str) -> Result<(), ApiError> {
        self.delete::<Developer>(id)
    }

    pub fn list_operations(&self) -> Result<Vec<Operations>, ApiError> {
        self.list()
    }

    pub fn get_operations(&self, id: &str) -> Result<Operations, ApiError> {
        self.get(id)
    }

    pub fn create_operations(&self, operations: &Operations) -> Result<Operations, ApiError> {
        self.create(operations)
    }

    pub fn update_operations(&self, id: &str, operations: &Operations) -> Result<Operations, ApiError> {
        self.update(id, operations)
    }

    pub fn delete_operations(&self, id: &str) -> Result<(), ApiError> {
        self.delete::<Operations>(id)
    }

    pub fn list_devops(&self) -> Result<Vec<DevOps>, ApiError> {
        self.list()
    }

    pub fn get_devops(&self, id: &str) -> Result<DevOps, ApiError> {
        self.get(id)
    }

    pub fn create_devops(&self, devops: &DevOps) -> Result<DevOps, ApiError> {
        self.create(devops)
    }

    pub fn update_devops(&self, id: &str, devops: &DevOps) -> Result<DevOps, ApiError> {
        self.update(id, devops)
    }

    pub fn delete_devops(&self, id: &str) -> Result<(), ApiError> {
        self.delete::<DevOps>(id)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

/// Map statuses outside `[200, 300)` to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        let detail = if response.body.is_empty() {
            "HTTP 404".to_string()
        } else {
            response.body_text()
        };
        return Err(ApiError::NotFound {
            status: Some(404),
            detail,
        });
    }
    Err(ApiError::Remote {
        status: response.status,
        body: response.body_text(),
    })
}
