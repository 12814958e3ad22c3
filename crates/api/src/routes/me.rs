use axum::routing::get;
use axum::Router;

use crate::handlers::me;
use crate::state::AppState;

/// Routes mounted at `/me`.
///
/// ```text
/// GET  /                  -> profile
/// GET  /courses           -> enrolled_courses
/// GET  /authored-courses  -> authored_courses (author role)
/// GET  /topups            -> topup_history
/// POST /topups            -> top_up
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(me::profile))
        .route("/courses", get(me::enrolled_courses))
        .route("/authored-courses", get(me::authored_courses))
        .route("/topups", get(me::topup_history).post(me::top_up))
}
