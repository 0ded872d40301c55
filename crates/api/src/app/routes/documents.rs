//! Per-municipality files: the document library and payment notes.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde_json::{json, Value as JsonValue};

use infoco_auth::Capability;
use infoco_business::{FileUpload, ManagedFile, PaymentNote, PaymentNoteUpload, DOCUMENT_FOLDERS};
use infoco_core::RecordId;

use crate::app::dto::Items;
use crate::app::errors::ApiResult;
use crate::app::services::Dashboard;
use crate::authz;

pub fn document_routes() -> Router {
    Router::new()
        .route("/", get(document_tree))
        .route("/:municipality/:folder", get(list_files).post(add_file))
        .route("/:municipality/:folder/:id", delete(delete_file))
}

pub fn payment_note_routes() -> Router {
    Router::new()
        .route("/", get(note_tree))
        .route("/:municipality", get(list_notes).post(add_note))
        .route("/:municipality/:id", delete(delete_note))
}

async fn document_tree(Extension(dashboard): Extension<Arc<Dashboard>>) -> ApiResult<Json<JsonValue>> {
    let state = dashboard.lock().await;
    authz::require(&state, Capability::ManageDocuments)?;
    Ok(Json(json!({
        "folders": DOCUMENT_FOLDERS,
        "tree": state.workspace.documents(),
    })))
}

async fn list_files(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path((municipality, folder)): Path<(String, String)>,
) -> ApiResult<Json<Items<ManagedFile>>> {
    let state = dashboard.lock().await;
    authz::require(&state, Capability::ManageDocuments)?;
    let files = state.workspace.documents().files(&municipality, &folder).to_vec();
    Ok(Json(files.into()))
}

async fn add_file(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path((municipality, folder)): Path<(String, String)>,
    Json(upload): Json<FileUpload>,
) -> ApiResult<(StatusCode, Json<JsonValue>)> {
    let mut state = dashboard.lock().await;
    authz::require(&state, Capability::ManageDocuments)?;
    let id = state
        .workspace
        .update_documents(|lib| lib.add_file(&municipality, &folder, upload))?;
    tracing::info!(%municipality, %folder, %id, "document stored");
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn delete_file(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path((municipality, folder, id)): Path<(String, String, RecordId)>,
) -> ApiResult<StatusCode> {
    let mut state = dashboard.lock().await;
    authz::require(&state, Capability::ManageDocuments)?;
    state
        .workspace
        .update_documents(|lib| Ok(lib.delete_file(&municipality, &folder, id)))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn note_tree(Extension(dashboard): Extension<Arc<Dashboard>>) -> ApiResult<Json<JsonValue>> {
    let state = dashboard.lock().await;
    authz::require(&state, Capability::ManageNotes)?;
    Ok(Json(json!({ "tree": state.workspace.payment_notes() })))
}

async fn list_notes(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path(municipality): Path<String>,
) -> ApiResult<Json<Items<PaymentNote>>> {
    let state = dashboard.lock().await;
    authz::require(&state, Capability::ManageNotes)?;
    let notes = state.workspace.payment_notes().list(&municipality).to_vec();
    Ok(Json(notes.into()))
}

async fn add_note(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path(municipality): Path<String>,
    Json(upload): Json<PaymentNoteUpload>,
) -> ApiResult<(StatusCode, Json<JsonValue>)> {
    let mut state = dashboard.lock().await;
    authz::require(&state, Capability::ManageNotes)?;
    let id = state
        .workspace
        .update_payment_notes(|notes| notes.add(&municipality, upload))?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn delete_note(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path((municipality, id)): Path<(String, RecordId)>,
) -> ApiResult<StatusCode> {
    let mut state = dashboard.lock().await;
    authz::require(&state, Capability::ManageNotes)?;
    state
        .workspace
        .update_payment_notes(|notes| Ok(notes.delete(&municipality, id)))?;
    Ok(StatusCode::NO_CONTENT)
}
