//! Allow-list sanitizer for rich-text post bodies.
//!
//! Bodies arrive as HTML from the editor and are rendered unescaped on the
//! post page, so everything outside the allow-list is stripped before the
//! body reaches storage.

use std::collections::HashSet;

use ammonia::Builder as AmmoniaBuilder;
use once_cell::sync::Lazy;

static POST_BODY_SANITIZER: Lazy<AmmoniaBuilder<'static>> = Lazy::new(build_post_body_sanitizer);

/// Strip disallowed markup from a post body.
pub fn sanitize_post_body(raw: &str) -> String {
    POST_BODY_SANITIZER.clean(raw).to_string()
}

fn build_post_body_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    let tags: HashSet<&'static str> = HashSet::from([
        "a",
        "abbr",
        "blockquote",
        "br",
        "code",
        "del",
        "div",
        "em",
        "figcaption",
        "figure",
        "h1",
        "h2",
        "h3",
        "h4",
        "h5",
        "h6",
        "hr",
        "i",
        "img",
        "ins",
        "kbd",
        "li",
        "ol",
        "p",
        "pre",
        "s",
        "span",
        "strong",
        "sub",
        "sup",
        "u",
        "table",
        "tbody",
        "td",
        "th",
        "thead",
        "tr",
        "ul",
    ]);
    builder.tags(tags);

    let generic: HashSet<&'static str> = HashSet::from(["class", "title", "lang", "dir"]);
    builder.generic_attributes(generic);

    builder.add_tag_attributes("a", &["target"]);
    builder.add_tag_attributes("img", &["alt", "width", "height", "loading"]);
    builder.add_tag_attributes("th", &["align", "colspan", "rowspan", "scope"]);
    builder.add_tag_attributes("td", &["align", "colspan", "rowspan"]);

    builder
}
