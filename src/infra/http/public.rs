use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    middleware,
    response::Response,
    routing::get,
};

use crate::{
    application::{chrome::ChromeService, posts::PostService, repos::PostsRepo},
    config::SiteSettings,
    infra::assets::serve_static,
    presentation::views::{
        AboutTemplate, AboutView, ContactTemplate, ContactView, HeaderView, IndexTemplate,
        IndexView, LayoutContext, PostDetailView, PostTemplate, render_error_response,
        render_not_found_response, render_template_response,
    },
};

use super::{
    db_health_response,
    middleware::{log_responses, set_request_context},
    post_error_to_http, posts,
};

#[derive(Clone)]
pub struct HttpState {
    pub posts: Arc<PostService>,
    pub chrome: Arc<ChromeService>,
    pub contact_email: Option<String>,
}

impl HttpState {
    pub fn new(repo: Arc<dyn PostsRepo>, site: &SiteSettings) -> Self {
        Self {
            posts: Arc::new(PostService::new(repo, site.timezone)),
            chrome: Arc::new(ChromeService::new(site.title.clone(), site.timezone)),
            contact_email: site.contact_email.clone(),
        }
    }
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/post/{id}", get(post_detail))
        .route(
            "/new-post",
            get(posts::new_post_form).post(posts::create_post),
        )
        .route(
            "/edit/{id}",
            get(posts::edit_post_form).post(posts::update_post),
        )
        .route(
            "/delete/{id}",
            get(posts::delete_post).post(posts::delete_post),
        )
        .route("/about", get(about))
        .route("/contact", get(contact))
        .route("/static/{*path}", get(serve_static))
        .route("/_health/db", get(public_health))
        .fallback(fallback)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

/// Ids are integers; anything else cannot name a post.
pub(super) fn parse_post_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

async fn index(State(state): State<HttpState>) -> Response {
    let chrome = state.chrome.load("/");

    match state.posts.list_all().await {
        Ok(posts) => {
            let content = IndexView::new(state.chrome.site_title(), &posts);
            let view = LayoutContext::new(chrome, content);
            render_template_response(IndexTemplate { view }, StatusCode::OK)
        }
        Err(err) => render_error_response(chrome, post_error_to_http("infra::http::index", err)),
    }
}

async fn post_detail(
    State(state): State<HttpState>,
    Path(raw_id): Path<String>,
) -> Response {
    let chrome = state.chrome.load("");
    let Some(id) = parse_post_id(&raw_id) else {
        return render_not_found_response(chrome);
    };

    match state.posts.find_by_id(id).await {
        Ok(Some(post)) => {
            let view = LayoutContext::new(
                chrome.with_title(&post.title),
                PostDetailView::from(&post),
            );
            render_template_response(PostTemplate { view }, StatusCode::OK)
        }
        Ok(None) => render_not_found_response(chrome),
        Err(err) => render_error_response(
            chrome,
            post_error_to_http("infra::http::post_detail", err),
        ),
    }
}

async fn about(State(state): State<HttpState>) -> Response {
    let chrome = state.chrome.load("/about").with_title("About");
    let content = AboutView {
        header: HeaderView::plain("About Me", "This is what I do."),
    };
    render_template_response(
        AboutTemplate {
            view: LayoutContext::new(chrome, content),
        },
        StatusCode::OK,
    )
}

async fn contact(State(state): State<HttpState>) -> Response {
    let chrome = state.chrome.load("/contact").with_title("Contact");
    let content = ContactView {
        header: HeaderView::plain("Contact Me", "Have questions? I have answers."),
        email: state.contact_email.clone(),
    };
    render_template_response(
        ContactTemplate {
            view: LayoutContext::new(chrome, content),
        },
        StatusCode::OK,
    )
}

async fn public_health(State(state): State<HttpState>) -> Response {
    db_health_response(state.posts.health_check().await)
}

async fn fallback(State(state): State<HttpState>, request: Request<Body>) -> Response {
    render_not_found_response(state.chrome.load(request.uri().path()))
}
