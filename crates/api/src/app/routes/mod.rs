use axum::{routing::get, Router};

use infoco_auth::CredentialRecord;
use infoco_business::{
    Asset, Employee, EmployeeExpense, ExternalSystem, InternalExpense, LeaveRequest, Municipality,
    Notification, PayrollRecord, Supplier, Task, Transaction, UpdatePost,
};
use infoco_core::Record;
use infoco_infra::{Collections, Holds};

pub mod actions;
pub mod ai;
pub mod documents;
pub mod navigation;
pub mod permissions;
pub mod records;
pub mod reports;
pub mod session;
pub mod settings;
pub mod system;

use records::Exposure;

fn collection<T>(extra: Router) -> (String, Router)
where
    T: Exposure,
    Collections: Holds<T>,
{
    (format!("/{}", T::COLLECTION), records::router::<T>().merge(extra))
}

/// Router for every endpoint that needs an active session.
pub fn router() -> Router {
    let collections = [
        collection::<Employee>(Router::new()),
        collection::<Task>(
            records::rows_router::<Task>().route("/filter", get(reports::filtered_tasks)),
        ),
        collection::<Municipality>(Router::new()),
        collection::<EmployeeExpense>(records::rows_router::<EmployeeExpense>()),
        collection::<InternalExpense>(
            records::rows_router::<InternalExpense>()
                .route("/summary", get(reports::internal_expense_summary)),
        ),
        collection::<Asset>(
            records::rows_router::<Asset>()
                .route("/summary", get(reports::asset_summary))
                .merge(actions::asset_routes()),
        ),
        collection::<Notification>(actions::notification_routes()),
        collection::<Supplier>(Router::new()),
        collection::<Transaction>(records::rows_router::<Transaction>()),
        collection::<PayrollRecord>(
            records::rows_router::<PayrollRecord>().merge(actions::payroll_routes()),
        ),
        collection::<LeaveRequest>(records::rows_router::<LeaveRequest>()),
        collection::<CredentialRecord>(Router::new()),
        collection::<UpdatePost>(records::rows_router::<UpdatePost>()),
        collection::<ExternalSystem>(Router::new()),
    ];

    let router = Router::new()
        .nest("/session", session::router())
        .nest("/navigation", navigation::router())
        .nest("/permissions", permissions::router())
        .nest("/documents", documents::document_routes())
        .nest("/payment-notes", documents::payment_note_routes())
        .route("/settings/login-image", axum::routing::put(settings::set_login_image))
        .route("/reports", get(reports::task_report))
        .route("/finance/summary", get(reports::finance_summary))
        .route("/dashboard/stats", get(reports::dashboard_stats))
        .route("/analyze", axum::routing::post(ai::analyze))
        .route("/news", get(ai::news));

    collections
        .into_iter()
        .fold(router, |router, (path, routes)| router.nest(&path, routes))
}
