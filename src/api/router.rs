//! Route table.
//!
//! Every [`Operation`] contributes exactly one route, at the method and path
//! the decision table records for it. Reads are served without credentials.
//! Operations whose rule names a role sit behind the [`authenticate`] stage,
//! which rejects the request before the handler runs.

use super::{
    extract::authenticate,
    handlers::{comments, projects, tasks},
    state::AppState,
};
use crate::task::services::{Operation, RouteMethod};
use axum::{
    Router, middleware,
    routing::{MethodFilter, MethodRouter, on},
};

/// Builds the HTTP router over `state`.
#[must_use]
pub fn router(state: AppState) -> Router {
    let mut public = Router::new();
    let mut protected = Router::new();
    for operation in Operation::ALL {
        let path = operation.path_pattern();
        if operation.rule().requires_identity() {
            protected = protected.route(path, endpoint(operation));
        } else {
            public = public.route(path, endpoint(operation));
        }
    }

    let gated = protected.route_layer(middleware::from_fn_with_state(state.clone(), authenticate));
    public.merge(gated).with_state(state)
}

fn endpoint(operation: Operation) -> MethodRouter<AppState> {
    let filter = method_filter(operation.method());
    match operation {
        Operation::ListTasks => on(filter, tasks::list),
        Operation::GetTask => on(filter, tasks::get),
        Operation::CreateTask => on(filter, tasks::create),
        Operation::UpdateTask => on(filter, tasks::update),
        Operation::DeleteTask => on(filter, tasks::remove),
        Operation::ChangeTaskState => on(filter, tasks::change_state),
        Operation::ChangeTaskResolution => on(filter, tasks::change_resolution),
        Operation::ChangeTaskProgress => on(filter, tasks::change_progress),
        Operation::CreateComment => on(filter, comments::create),
        Operation::GetComment => on(filter, comments::get),
        Operation::ListProjects => on(filter, projects::list),
        Operation::GetProject => on(filter, projects::get),
        Operation::CreateProject => on(filter, projects::create),
    }
}

const fn method_filter(method: RouteMethod) -> MethodFilter {
    match method {
        RouteMethod::Get => MethodFilter::GET,
        RouteMethod::Post => MethodFilter::POST,
        RouteMethod::Put => MethodFilter::PUT,
        RouteMethod::Delete => MethodFilter::DELETE,
    }
}
