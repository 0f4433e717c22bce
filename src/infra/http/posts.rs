//! Create, edit and delete handlers for blog posts.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::{
    application::{error::ErrorReport, posts::PostServiceError},
    domain::posts::{PostForm, PostFormErrors},
    presentation::views::{
        LayoutChrome, LayoutContext, PostEditorTemplate, PostEditorView, render_error_response,
        render_not_found_response, render_template_response,
    },
};

use super::{
    post_error_to_http,
    public::{HttpState, parse_post_id},
};

const SOURCE: &str = "infra::http::posts";

pub(super) async fn new_post_form(State(state): State<HttpState>) -> Response {
    let chrome = state.chrome.load("/new-post").with_title("New Post");
    let view = PostEditorView::new_post(&PostForm::default(), None);
    editor_response(chrome, view, StatusCode::OK)
}

pub(super) async fn create_post(
    State(state): State<HttpState>,
    Form(form): Form<PostForm>,
) -> Response {
    let chrome = state.chrome.load("/new-post").with_title("New Post");

    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            let view = PostEditorView::new_post(&form, Some(&errors));
            return invalid_form_response(chrome, view, &errors);
        }
    };

    match state.posts.create(draft).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(err @ PostServiceError::DuplicateTitle { .. }) => {
            let view = PostEditorView::new_post(&form, None);
            duplicate_title_response(chrome, view, &form.title, &err)
        }
        Err(err) => render_error_response(chrome, post_error_to_http(SOURCE, err)),
    }
}

pub(super) async fn edit_post_form(
    State(state): State<HttpState>,
    Path(raw_id): Path<String>,
) -> Response {
    let chrome = state.chrome.load("").with_title("Edit Post");
    let Some(id) = parse_post_id(&raw_id) else {
        return render_not_found_response(chrome);
    };

    match state.posts.find_by_id(id).await {
        Ok(Some(post)) => {
            let view = PostEditorView::edit_post(id, &PostForm::from(&post), None);
            editor_response(chrome, view, StatusCode::OK)
        }
        Ok(None) => render_not_found_response(chrome),
        Err(err) => render_error_response(chrome, post_error_to_http(SOURCE, err)),
    }
}

pub(super) async fn update_post(
    State(state): State<HttpState>,
    Path(raw_id): Path<String>,
    Form(form): Form<PostForm>,
) -> Response {
    let chrome = state.chrome.load("").with_title("Edit Post");
    let Some(id) = parse_post_id(&raw_id) else {
        return render_not_found_response(chrome);
    };

    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            let view = PostEditorView::edit_post(id, &form, Some(&errors));
            return invalid_form_response(chrome, view, &errors);
        }
    };

    match state.posts.update(id, draft).await {
        Ok(()) => Redirect::to("/").into_response(),
        Err(err @ PostServiceError::DuplicateTitle { .. }) => {
            let view = PostEditorView::edit_post(id, &form, None);
            duplicate_title_response(chrome, view, &form.title, &err)
        }
        Err(PostServiceError::NotFound { .. }) => render_not_found_response(chrome),
        Err(err) => render_error_response(chrome, post_error_to_http(SOURCE, err)),
    }
}

/// Deleting a post that is already gone still lands on the home page.
pub(super) async fn delete_post(
    State(state): State<HttpState>,
    Path(raw_id): Path<String>,
) -> Response {
    let chrome = state.chrome.load("");
    let Some(id) = parse_post_id(&raw_id) else {
        return render_not_found_response(chrome);
    };

    match state.posts.delete(id).await {
        Ok(()) => Redirect::to("/").into_response(),
        Err(PostServiceError::NotFound { id }) => {
            debug!(target: "plainblog::http", id, "post already absent");
            Redirect::to("/").into_response()
        }
        Err(err) => render_error_response(chrome, post_error_to_http(SOURCE, err)),
    }
}

fn editor_response(chrome: LayoutChrome, view: PostEditorView, status: StatusCode) -> Response {
    let view = LayoutContext::new(chrome, view);
    render_template_response(PostEditorTemplate { view }, status)
}

fn invalid_form_response(
    chrome: LayoutChrome,
    view: PostEditorView,
    errors: &PostFormErrors,
) -> Response {
    let mut response = editor_response(chrome, view, StatusCode::UNPROCESSABLE_ENTITY);
    let fields = errors
        .fields()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    ErrorReport::from_message(
        SOURCE,
        StatusCode::UNPROCESSABLE_ENTITY,
        format!("invalid fields: {fields}"),
    )
    .attach(&mut response);
    response
}

fn duplicate_title_response(
    chrome: LayoutChrome,
    view: PostEditorView,
    title: &str,
    err: &PostServiceError,
) -> Response {
    let notice = format!("A post titled “{}” already exists.", title.trim());
    let mut response = editor_response(chrome, view.with_notice(notice), StatusCode::CONFLICT);
    ErrorReport::from_error(SOURCE, StatusCode::CONFLICT, err).attach(&mut response);
    response
}
