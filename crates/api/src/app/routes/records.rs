//! One router shape for every collection: list, drafts, submit, remove,
//! and (where references exist) resolved display rows.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value as JsonValue;

use infoco_auth::{AccountSummary, CredentialRecord};
use infoco_business::{
    rows, Asset, Employee, EmployeeExpense, ExternalSystem, IntegrationSummary, InternalExpense,
    LeaveRequest, Municipality, Notification, PayrollRecord, Resolve, Supplier, Task, Transaction,
    UpdatePost,
};
use infoco_core::{Record, RecordId};
use infoco_infra::{Collections, Holds};
use infoco_records::Submitted;

use crate::app::dto::Items;
use crate::app::errors::{ApiError, ApiResult};
use crate::app::services::Dashboard;
use crate::authz::{self, Access};

/// How a collection is shown over the wire.
pub trait Exposure: Record {
    type Listed: Serialize + Send;

    /// Removing records is not offered for every collection.
    const REMOVABLE: bool = true;

    fn listed(&self) -> Self::Listed;

    /// Strip secrets from an edit draft before it leaves the process.
    fn redact(_draft: &mut Self::Draft) {}
}

macro_rules! exposed_as_is {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Exposure for $ty {
                type Listed = $ty;

                fn listed(&self) -> Self::Listed {
                    self.clone()
                }
            }
        )+
    };
}

exposed_as_is!(
    Employee,
    Task,
    Municipality,
    EmployeeExpense,
    InternalExpense,
    Asset,
    Notification,
    Supplier,
    Transaction,
    PayrollRecord,
    UpdatePost,
);

impl Exposure for LeaveRequest {
    type Listed = LeaveRequest;

    const REMOVABLE: bool = false;

    fn listed(&self) -> Self::Listed {
        self.clone()
    }
}

impl Exposure for CredentialRecord {
    type Listed = AccountSummary;

    fn listed(&self) -> Self::Listed {
        self.summary()
    }

    fn redact(draft: &mut Self::Draft) {
        draft.password.clear();
    }
}

impl Exposure for ExternalSystem {
    type Listed = IntegrationSummary;

    fn listed(&self) -> Self::Listed {
        IntegrationSummary::from(self)
    }

    fn redact(draft: &mut Self::Draft) {
        draft.access_token.clear();
    }
}

/// `/{collection}` routes for `T`.
pub fn router<T>() -> Router
where
    T: Exposure,
    Collections: Holds<T>,
{
    let by_id = if T::REMOVABLE {
        put(update::<T>).delete(remove::<T>)
    } else {
        put(update::<T>)
    };
    Router::new()
        .route("/", get(list::<T>).post(create::<T>))
        .route("/draft", get(new_draft::<T>))
        .route("/:id", by_id)
        .route("/:id/draft", get(edit_draft::<T>))
}

/// `/{collection}/rows`: records with their foreign ids resolved to names.
pub fn rows_router<T>() -> Router
where
    T: Resolve,
    Collections: Holds<T>,
{
    Router::new().route("/rows", get(list_rows::<T>))
}

async fn list<T>(Extension(dashboard): Extension<Arc<Dashboard>>) -> ApiResult<Json<Items<T::Listed>>>
where
    T: Exposure,
    Collections: Holds<T>,
{
    let state = dashboard.lock().await;
    authz::require_collection(&state, T::COLLECTION, Access::Read)?;
    let items: Vec<_> = state.workspace.list::<T>().iter().map(T::listed).collect();
    Ok(Json(items.into()))
}

async fn list_rows<T>(Extension(dashboard): Extension<Arc<Dashboard>>) -> ApiResult<Json<JsonValue>>
where
    T: Resolve,
    Collections: Holds<T>,
{
    let state = dashboard.lock().await;
    authz::require_collection(&state, T::COLLECTION, Access::Read)?;
    let directory = state.workspace.directory();
    let items = Items::from(rows(state.workspace.list::<T>(), &directory));
    Ok(Json(serde_json::to_value(items)?))
}

async fn new_draft<T>(Extension(dashboard): Extension<Arc<Dashboard>>) -> ApiResult<Json<T::Draft>>
where
    T: Exposure,
    Collections: Holds<T>,
{
    let state = dashboard.lock().await;
    authz::require_collection(&state, T::COLLECTION, Access::Write)?;
    Ok(Json(T::new_draft()))
}

async fn edit_draft<T>(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path(id): Path<RecordId>,
) -> ApiResult<Json<T::Draft>>
where
    T: Exposure,
    Collections: Holds<T>,
{
    let state = dashboard.lock().await;
    authz::require_collection(&state, T::COLLECTION, Access::Write)?;
    let mut draft = state.workspace.get::<T>(id)?.to_draft();
    T::redact(&mut draft);
    Ok(Json(draft))
}

async fn create<T>(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Json(body): Json<JsonValue>,
) -> ApiResult<(StatusCode, Json<Submitted>)>
where
    T: Exposure,
    Collections: Holds<T>,
{
    let draft = draft_from::<T>(body, None)?;
    let mut state = dashboard.lock().await;
    authz::require_collection(&state, T::COLLECTION, Access::Write)?;
    let outcome = state.workspace.mutate::<T, _, _>(|store| store.table().submit(draft))?;
    tracing::info!(collection = %T::COLLECTION, id = %outcome.id(), "record created");
    Ok((StatusCode::CREATED, Json(outcome)))
}

async fn update<T>(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path(id): Path<RecordId>,
    Json(body): Json<JsonValue>,
) -> ApiResult<Json<Submitted>>
where
    T: Exposure,
    Collections: Holds<T>,
{
    let draft = draft_from::<T>(body, Some(id))?;
    let mut state = dashboard.lock().await;
    authz::require_collection(&state, T::COLLECTION, Access::Write)?;
    let outcome = state.workspace.mutate::<T, _, _>(|store| store.table().submit(draft))?;
    Ok(Json(outcome))
}

async fn remove<T>(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path(id): Path<RecordId>,
) -> ApiResult<StatusCode>
where
    T: Exposure,
    Collections: Holds<T>,
{
    let mut state = dashboard.lock().await;
    authz::require_collection(&state, T::COLLECTION, Access::Write)?;
    let removed = state.workspace.mutate::<T, _, _>(|store| Ok(store.table().remove(id)))?;
    if removed.is_some() {
        tracing::info!(collection = %T::COLLECTION, %id, "record removed");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Decode a draft, with the id taken from the path (or dropped for creates).
fn draft_from<T: Record>(mut body: JsonValue, id: Option<RecordId>) -> ApiResult<T::Draft> {
    let Some(fields) = body.as_object_mut() else {
        return Err(ApiError::bad_request("expected a JSON object"));
    };
    match id {
        Some(id) => fields.insert("id".to_string(), id.get().into()),
        None => fields.remove("id"),
    };
    serde_json::from_value(body).map_err(|e| ApiError::bad_request(format!("invalid draft: {e}")))
}

#[cfg(test)]
mod tests {
    use infoco_business::TaskDraft;
    use serde_json::json;

    use super::*;

    #[test]
    fn creates_ignore_a_client_supplied_id() {
        let draft = draft_from::<Task>(json!({ "id": 7, "title": "T" }), None).unwrap();
        assert_eq!(draft.id, None);
        assert_eq!(draft.title.as_deref(), Some("T"));
    }

    #[test]
    fn updates_take_the_id_from_the_path() {
        let draft: TaskDraft = draft_from::<Task>(json!({ "id": 1, "title": "T" }), Some(RecordId::new(4))).unwrap();
        assert_eq!(draft.id, Some(RecordId::new(4)));
    }

    #[test]
    fn secrets_are_stripped_from_edit_drafts() {
        let account = infoco_infra::seed::accounts().remove(0);
        let mut draft = account.to_draft();
        CredentialRecord::redact(&mut draft);
        assert!(draft.password.is_empty());
    }
}
