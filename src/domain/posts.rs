//! Blog posts and the form used to write or edit them.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use super::sanitize::sanitize_post_body;

/// Column width shared by every single-line post field.
pub const MAX_FIELD_LENGTH: usize = 250;

/// A stored blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    /// Creation date as `Month DD, YYYY`; written once when the post is created.
    pub date: String,
    /// Sanitized HTML.
    pub body: String,
    pub author: String,
    pub img_url: String,
}

/// Validated post fields, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub img_url: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PostField {
    Title,
    Subtitle,
    Author,
    ImgUrl,
    Body,
}

impl PostField {
    pub const ALL: [PostField; 5] = [
        PostField::Title,
        PostField::Subtitle,
        PostField::Author,
        PostField::ImgUrl,
        PostField::Body,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PostField::Title => "title",
            PostField::Subtitle => "subtitle",
            PostField::Author => "author",
            PostField::ImgUrl => "img_url",
            PostField::Body => "body",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PostField::Title => "Blog Post Title",
            PostField::Subtitle => "Subtitle",
            PostField::Author => "Your Name",
            PostField::ImgUrl => "Blog Image URL",
            PostField::Body => "Blog Content",
        }
    }

    /// Line breaks and tabs are only meaningful in the body.
    fn rejects_char(self, ch: char) -> bool {
        match self {
            PostField::Body => ch.is_control() && !matches!(ch, '\n' | '\r' | '\t'),
            _ => ch.is_control(),
        }
    }

    fn max_length(self) -> Option<usize> {
        match self {
            PostField::Body => None,
            _ => Some(MAX_FIELD_LENGTH),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("This field is required.")]
    Required,
    #[error("Field cannot be longer than {} characters.", MAX_FIELD_LENGTH)]
    TooLong,
    #[error("Invalid URL.")]
    InvalidUrl,
    #[error("Field contains control characters.")]
    ControlCharacters,
}

/// Every field-level problem found in a submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("post form has {} invalid field(s)", .errors.len())]
pub struct PostFormErrors {
    errors: BTreeMap<PostField, Vec<FieldError>>,
}

impl PostFormErrors {
    pub fn push(&mut self, field: PostField, error: FieldError) {
        self.errors.entry(field).or_default().push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn for_field(&self, field: PostField) -> &[FieldError] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = PostField> + '_ {
        self.errors.keys().copied()
    }

    pub fn messages(&self, field: PostField) -> Vec<String> {
        self.for_field(field)
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

/// Raw form submission shared by the new-post and edit-post pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PostForm {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub img_url: String,
    pub body: String,
}

impl PostForm {
    pub fn value(&self, field: PostField) -> &str {
        match field {
            PostField::Title => &self.title,
            PostField::Subtitle => &self.subtitle,
            PostField::Author => &self.author,
            PostField::ImgUrl => &self.img_url,
            PostField::Body => &self.body,
        }
    }

    /// Check every field and produce a trimmed, sanitized draft.
    ///
    /// All failing fields are reported together so the form can show each
    /// message next to its input.
    pub fn validate(&self) -> Result<PostDraft, PostFormErrors> {
        let mut errors = PostFormErrors::default();

        for field in PostField::ALL {
            let value = self.value(field).trim();
            if value.is_empty() {
                errors.push(field, FieldError::Required);
                continue;
            }
            if let Some(max) = field.max_length() {
                if value.chars().count() > max {
                    errors.push(field, FieldError::TooLong);
                }
            }
            if value.chars().any(|ch| field.rejects_char(ch)) {
                errors.push(field, FieldError::ControlCharacters);
            }
        }

        let img_url = self.img_url.trim();
        if !img_url.is_empty()
            && errors.for_field(PostField::ImgUrl).is_empty()
            && !is_valid_image_url(img_url)
        {
            errors.push(PostField::ImgUrl, FieldError::InvalidUrl);
        }

        let body = sanitize_post_body(self.body.trim());
        if errors.for_field(PostField::Body).is_empty() && body.trim().is_empty() {
            errors.push(PostField::Body, FieldError::Required);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PostDraft {
            title: self.title.trim().to_string(),
            subtitle: self.subtitle.trim().to_string(),
            author: self.author.trim().to_string(),
            img_url: img_url.to_string(),
            body,
        })
    }
}

impl From<&PostRecord> for PostForm {
    fn from(post: &PostRecord) -> Self {
        Self {
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            author: post.author.clone(),
            img_url: post.img_url.clone(),
            body: post.body.clone(),
        }
    }
}

/// The URL ends up inside a CSS `url('...')`, so quoting and grouping
/// characters are refused even where a URL parser would accept them.
fn is_valid_image_url(value: &str) -> bool {
    if value
        .chars()
        .any(|ch| ch.is_whitespace() || matches!(ch, '\'' | '"' | '(' | ')' | '\\' | '<' | '>'))
    {
        return false;
    }

    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}
