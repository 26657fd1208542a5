use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Engineer {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Shared shape of developer and operations teams.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Team {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub engineers: Vec<Engineer>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DevOps {
    #[serde(default)]
    pub id: String,
    pub dev: Team,
    pub ops: Team,
}

/// A record stored in one of the collections.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

impl Record for Engineer {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Record for Team {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Record for DevOps {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Insertion-ordered collection.
pub type Db<T> = Arc<RwLock<Vec<T>>>;

/// Toggles for behavior that differs between deployments of the service.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServiceOptions {
    /// Serve `GET /engineers/{id}`. The production service does not.
    pub engineer_item_get: bool,
}

pub fn app() -> Router {
    app_with(ServiceOptions::default())
}

pub fn app_with(options: ServiceOptions) -> Router {
    Router::new()
        .merge(collection::<Engineer>("engineers", options.engineer_item_get))
        .merge(collection::<Team>("developers", true))
        .merge(collection::<Team>("operations", true))
        .merge(collection::<DevOps>("devops", true))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, ServiceOptions::default()).await
}

pub async fn run_with(listener: TcpListener, options: ServiceOptions) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(options)).await
}

fn collection<T: Record>(name: &str, item_get: bool) -> Router {
    let db: Db<T> = Arc::new(RwLock::new(Vec::new()));
    let item = put(update_record::<T>).delete(delete_record::<T>);
    let item = if item_get { item.get(get_record::<T>) } else { item };
    Router::new()
        .route(&format!("/{name}"), get(list_records::<T>).post(create_record::<T>))
        .route(&format!("/{name}/{{id}}"), item)
        .with_state(db)
}

async fn list_records<T: Record>(State(db): State<Db<T>>) -> Json<Vec<T>> {
    Json(db.read().await.clone())
}

async fn create_record<T: Record>(State(db): State<Db<T>>, Json(mut record): Json<T>) -> (StatusCode, Json<T>) {
    record.set_id(Uuid::new_v4().to_string());
    debug!(id = record.id(), "created record");
    db.write().await.push(record.clone());
    (StatusCode::CREATED, Json(record))
}

async fn get_record<T: Record>(State(db): State<Db<T>>, Path(id): Path<String>) -> Result<Json<T>, StatusCode> {
    let records = db.read().await;
    records
        .iter()
        .find(|r| r.id() == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Full replace: every field comes from the body except the id, which is
/// taken from the path.
async fn update_record<T: Record>(
    State(db): State<Db<T>>,
    Path(id): Path<String>,
    Json(mut record): Json<T>,
) -> Result<Json<T>, StatusCode> {
    let mut records = db.write().await;
    let slot = records.iter_mut().find(|r| r.id() == id).ok_or(StatusCode::NOT_FOUND)?;
    record.set_id(id);
    *slot = record.clone();
    debug!(id = record.id(), "replaced record");
    Ok(Json(record))
}

async fn delete_record<T: Record>(State(db): State<Db<T>>, Path(id): Path<String>) -> StatusCode {
    let mut records = db.write().await;
    match records.iter().position(|r| r.id() == id) {
        Some(index) => {
            records.remove(index);
            debug!(id, "deleted record");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}
