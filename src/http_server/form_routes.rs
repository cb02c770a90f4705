//! Form routes
//!
//! - `GET /forms` lists form names
//! - `GET /forms/:name` serves the rendered form page
//! - `POST /forms/:name` aggregates and validates a submission, either
//!   urlencoded or multipart

use std::sync::Arc;

use axum::{
    extract::{FromRequest, Multipart, Path, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use serde_json::json;

use crate::observability::{log_event, Event};
use crate::payload::{FileHandle, FlatEntry};
use crate::validate::validate_form_data;

use super::errors::{HttpError, HttpResult};
use super::state::{FormsState, HostedForm};

pub fn form_routes(state: Arc<FormsState>) -> Router {
    Router::new()
        .route("/forms", get(list_forms_handler))
        .route("/forms/:name", get(form_page_handler).post(submit_form_handler))
        .with_state(state)
}

async fn list_forms_handler(State(state): State<Arc<FormsState>>) -> impl IntoResponse {
    Json(json!({ "forms": state.names() }))
}

fn find_form<'a>(state: &'a FormsState, name: &str) -> HttpResult<&'a HostedForm> {
    state.get(name).ok_or_else(|| {
        log_event(Event::FormNotFound, &[("form", name)]);
        HttpError::UnknownForm(name.to_string())
    })
}

async fn form_page_handler(
    State(state): State<Arc<FormsState>>,
    Path(name): Path<String>,
) -> HttpResult<Html<String>> {
    let form = find_form(&state, &name)?;
    let page = state.render_page(form);
    state.metrics.increment_forms_rendered();
    log_event(Event::FormRendered, &[("form", name.as_str())]);
    Ok(Html(page))
}

async fn submit_form_handler(
    State(state): State<Arc<FormsState>>,
    Path(name): Path<String>,
    request: Request,
) -> HttpResult<Response> {
    let form = find_form(&state, &name)?;
    let entries = read_entries(request).await?;

    state.metrics.increment_submissions_received();
    let count = entries.len().to_string();
    log_event(
        Event::SubmissionReceived,
        &[("form", name.as_str()), ("entries", count.as_str())],
    );

    let result = validate_form_data(&form.schema, entries).map_err(|err| {
        state.metrics.increment_submissions_rejected();
        log_event(
            Event::SubmissionRejected,
            &[("form", name.as_str()), ("code", err.code())],
        );
        HttpError::from(err)
    })?;

    state.metrics.record_validation(result.valid);
    if result.valid {
        log_event(Event::ValidationPassed, &[("form", name.as_str())]);
        Ok((
            StatusCode::OK,
            Json(json!({ "valid": true, "data": result.coerced_output })),
        )
            .into_response())
    } else {
        let issues = result.errors.len().to_string();
        log_event(
            Event::ValidationFailed,
            &[("form", name.as_str()), ("issues", issues.as_str())],
        );
        Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "valid": false, "errors": result.errors })),
        )
            .into_response())
    }
}

/// Reads the body as ordered flat entries; repeated keys are kept.
async fn read_entries(request: Request) -> HttpResult<Vec<FlatEntry>> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    if is_multipart {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| HttpError::InvalidBody(e.to_string()))?;
        read_multipart(multipart).await
    } else {
        let Form(pairs): Form<Vec<(String, String)>> = Form::from_request(request, &())
            .await
            .map_err(|e| HttpError::InvalidBody(e.to_string()))?;
        Ok(pairs.into_iter().map(FlatEntry::from).collect())
    }
}

async fn read_multipart(mut multipart: Multipart) -> HttpResult<Vec<FlatEntry>> {
    let mut entries = Vec::new();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::InvalidBody(e.to_string()))?
    {
        let Some(key) = field.name().map(str::to_string) else {
            continue;
        };

        match field.file_name().map(str::to_string) {
            // An empty file input submits a nameless part
            Some(file_name) if file_name.is_empty() => continue,
            Some(file_name) => {
                let content_type = field.content_type().map(str::to_string);
                // Only the size is kept; chunks are dropped as they arrive
                let mut size = 0u64;
                while let Some(chunk) = field
                    .chunk()
                    .await
                    .map_err(|e| HttpError::InvalidBody(e.to_string()))?
                {
                    size += chunk.len() as u64;
                }
                let file = FileHandle {
                    file_name,
                    content_type,
                    size: Some(size),
                };
                entries.push(FlatEntry::new(key, file));
            }
            None => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| HttpError::InvalidBody(e.to_string()))?;
                entries.push(FlatEntry::new(key, text));
            }
        }
    }

    Ok(entries)
}
