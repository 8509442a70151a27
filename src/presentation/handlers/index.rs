use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum_extra::extract::cookie::CookieJar;
use minijinja::context;

use crate::application::ports::LlmClient;
use crate::presentation::state::AppState;
use crate::presentation::templates::CHAT_PAGE;

use super::error::error_response;
use super::session::resolve_session;

/// Serves the chat page. Every visit starts the browser's session over with an
/// empty history.
#[tracing::instrument(skip(state, jar))]
pub async fn index_handler<L>(State(state): State<AppState<L>>, jar: CookieJar) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    let (session, jar) = resolve_session(jar);

    if let Err(e) = state.session_store.clear(&session).await {
        tracing::error!(error = %e, "Failed to clear session history");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Error interno del servidor");
    }

    let page = state
        .templates
        .get_template(CHAT_PAGE)
        .and_then(|template| template.render(context! { session_id => session.as_str() }));

    match page {
        Ok(html) => {
            tracing::debug!(session_id = %session, "Chat page served");
            (jar, Html(html)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to render chat page");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Error interno del servidor")
        }
    }
}
