use crate::application::error::{ErrorReport, HttpError};
use crate::domain::posts::{PostField, PostForm, PostFormErrors, PostRecord};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => plain_error_response(err),
    }
}

pub fn render_not_found_response(chrome: LayoutChrome) -> Response {
    let content = ErrorPageView::not_found();
    let view = LayoutContext::new(chrome.with_title("Page Not Found"), content);
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

/// Render the shared error page for `error` and attach its report.
pub fn render_error_response(chrome: LayoutChrome, error: HttpError) -> Response {
    let status = error.status();
    let content = ErrorPageView::from_http_error(&error);
    let view = LayoutContext::new(chrome.with_title(&content.title), content);
    let mut response = render_template_response(ErrorTemplate { view }, status);
    error.into_report().attach(&mut response);
    response
}

// Last resort when the error page itself cannot be rendered.
fn plain_error_response(error: HttpError) -> Response {
    let mut response = (error.status(), error.public_message()).into_response();
    error.into_report().attach(&mut response);
    response
}

#[derive(Clone)]
pub struct NavigationView {
    pub entries: Vec<NavigationLinkView>,
}

#[derive(Clone)]
pub struct FooterView {
    pub copy: String,
}

#[derive(Clone)]
pub struct BrandView {
    pub title: String,
    pub href: String,
}

#[derive(Clone)]
pub struct NavigationLinkView {
    pub label: String,
    pub href: String,
    pub is_active: bool,
}

#[derive(Clone)]
pub struct PageMetaView {
    pub title: String,
    pub site_title: String,
}

impl PageMetaView {
    /// Document title: `Page | Site`, or just the site name on the home page.
    pub fn document_title(&self) -> String {
        if self.title.is_empty() || self.title == self.site_title {
            self.site_title.clone()
        } else {
            format!("{} | {}", self.title, self.site_title)
        }
    }
}

#[derive(Clone)]
pub struct LayoutChrome {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub meta: PageMetaView,
}

impl LayoutChrome {
    pub fn with_title(self, title: &str) -> Self {
        Self {
            meta: PageMetaView {
                title: title.to_string(),
                ..self.meta
            },
            ..self
        }
    }
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub meta: PageMetaView,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            brand: chrome.brand,
            navigation: chrome.navigation,
            footer: chrome.footer,
            meta: chrome.meta,
            content,
        }
    }
}

/// Masthead shown above the page content.
#[derive(Clone)]
pub struct HeaderView {
    pub heading: String,
    pub subheading: String,
    pub image_url: Option<String>,
}

impl HeaderView {
    pub fn plain(heading: impl Into<String>, subheading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            subheading: subheading.into(),
            image_url: None,
        }
    }
}

#[derive(Clone)]
pub struct PostCard {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: String,
    pub href: String,
    pub edit_href: String,
    pub delete_href: String,
}

impl From<&PostRecord> for PostCard {
    fn from(post: &PostRecord) -> Self {
        Self {
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            author: post.author.clone(),
            date: post.date.clone(),
            href: format!("/post/{}", post.id),
            edit_href: format!("/edit/{}", post.id),
            delete_href: format!("/delete/{}", post.id),
        }
    }
}

pub struct IndexView {
    pub header: HeaderView,
    pub posts: Vec<PostCard>,
}

impl IndexView {
    pub fn new(site_title: &str, posts: &[PostRecord]) -> Self {
        Self {
            header: HeaderView::plain(site_title, "A collection of thoughts and notes."),
            posts: posts.iter().map(PostCard::from).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: LayoutContext<IndexView>,
}

pub struct PostDetailView {
    pub header: HeaderView,
    pub byline: String,
    /// Sanitized when the post was saved.
    pub body_html: String,
    pub edit_href: String,
}

impl From<&PostRecord> for PostDetailView {
    fn from(post: &PostRecord) -> Self {
        Self {
            header: HeaderView {
                heading: post.title.clone(),
                subheading: post.subtitle.clone(),
                image_url: Some(post.img_url.clone()),
            },
            byline: format!("Posted by {} on {}", post.author, post.date),
            body_html: post.body.clone(),
            edit_href: format!("/edit/{}", post.id),
        }
    }
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub view: LayoutContext<PostDetailView>,
}

pub struct PostFieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub value: String,
    pub multiline: bool,
    pub errors: Vec<String>,
}

pub struct PostEditorView {
    pub header: HeaderView,
    pub action: String,
    pub submit_label: &'static str,
    pub notice: Option<String>,
    pub fields: Vec<PostFieldView>,
}

impl PostEditorView {
    pub fn new_post(form: &PostForm, errors: Option<&PostFormErrors>) -> Self {
        Self::build(
            HeaderView::plain("New Post", "You're going to make a great blog post!"),
            "/new-post".to_string(),
            "Submit Post",
            form,
            errors,
        )
    }

    pub fn edit_post(id: i64, form: &PostForm, errors: Option<&PostFormErrors>) -> Self {
        Self::build(
            HeaderView::plain("Edit Post", "Make it even better."),
            format!("/edit/{id}"),
            "Save Changes",
            form,
            errors,
        )
    }

    pub fn with_notice(self, notice: impl Into<String>) -> Self {
        Self {
            notice: Some(notice.into()),
            ..self
        }
    }

    fn build(
        header: HeaderView,
        action: String,
        submit_label: &'static str,
        form: &PostForm,
        errors: Option<&PostFormErrors>,
    ) -> Self {
        let fields = PostField::ALL
            .into_iter()
            .map(|field| PostFieldView {
                name: field.as_str(),
                label: field.label(),
                input_type: match field {
                    PostField::ImgUrl => "url",
                    _ => "text",
                },
                value: form.value(field).to_string(),
                multiline: field == PostField::Body,
                errors: errors.map(|errors| errors.messages(field)).unwrap_or_default(),
            })
            .collect();

        Self {
            header,
            action,
            submit_label,
            notice: None,
            fields,
        }
    }
}

#[derive(Template)]
#[template(path = "post_form.html")]
pub struct PostEditorTemplate {
    pub view: LayoutContext<PostEditorView>,
}

pub struct AboutView {
    pub header: HeaderView,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub view: LayoutContext<AboutView>,
}

pub struct ContactView {
    pub header: HeaderView,
    pub email: Option<String>,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub view: LayoutContext<ContactView>,
}

pub struct ErrorPageView {
    pub header: HeaderView,
    pub title: String,
    pub message: String,
    pub primary_action: Option<ErrorAction>,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            header: HeaderView::plain("Page Not Found", ""),
            title: "Page Not Found".to_string(),
            message: "The page you requested does not exist.".to_string(),
            primary_action: Some(ErrorAction::home()),
        }
    }

    pub fn from_http_error(error: &HttpError) -> Self {
        let title = error
            .status()
            .canonical_reason()
            .unwrap_or("Error")
            .to_string();
        Self {
            header: HeaderView::plain(title.clone(), ""),
            title,
            message: error.public_message().to_string(),
            primary_action: Some(ErrorAction::home()),
        }
    }
}

pub struct ErrorAction {
    pub href: String,
    pub label: String,
}

impl ErrorAction {
    pub fn home() -> Self {
        Self {
            href: "/".to_string(),
            label: "Back to home".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::posts::FieldError;

    fn record() -> PostRecord {
        PostRecord {
            id: 3,
            title: "Hello".into(),
            subtitle: "World".into(),
            date: "March 07, 2024".into(),
            body: "<p>Body</p>".into(),
            author: "A".into(),
            img_url: "http://x/y.png".into(),
        }
    }

    #[test]
    fn cards_link_by_stable_id() {
        let card = PostCard::from(&record());
        assert_eq!(card.href, "/post/3");
        assert_eq!(card.edit_href, "/edit/3");
        assert_eq!(card.delete_href, "/delete/3");
    }

    #[test]
    fn detail_view_carries_byline() {
        let view = PostDetailView::from(&record());
        assert_eq!(view.byline, "Posted by A on March 07, 2024");
        assert_eq!(view.header.image_url.as_deref(), Some("http://x/y.png"));
    }

    #[test]
    fn editor_lists_fields_with_errors() {
        let mut errors = PostFormErrors::default();
        errors.push(PostField::ImgUrl, FieldError::InvalidUrl);
        let view = PostEditorView::edit_post(3, &PostForm::from(&record()), Some(&errors));

        assert_eq!(view.action, "/edit/3");
        let names: Vec<_> = view.fields.iter().map(|field| field.name).collect();
        assert_eq!(names, ["title", "subtitle", "author", "img_url", "body"]);
        let img = &view.fields[3];
        assert_eq!(img.input_type, "url");
        assert_eq!(img.errors, vec!["Invalid URL.".to_string()]);
        assert!(view.fields[4].multiline);
    }

    #[test]
    fn document_title_joins_page_and_site() {
        let meta = PageMetaView {
            title: "About".into(),
            site_title: "My Blog".into(),
        };
        assert_eq!(meta.document_title(), "About | My Blog");
        let home = PageMetaView {
            title: String::new(),
            ..meta
        };
        assert_eq!(home.document_title(), "My Blog");
    }
}
