use chrono_tz::Tz;
use time::OffsetDateTime;

use crate::presentation::views::{
    BrandView, FooterView, LayoutChrome, NavigationLinkView, NavigationView, PageMetaView,
};
use crate::util::timezone::localized_date;

const NAVIGATION: [(&str, &str); 4] = [
    ("Home", "/"),
    ("About", "/about"),
    ("Contact", "/contact"),
    ("New Post", "/new-post"),
];

/// Builds the layout shared by every page.
#[derive(Clone)]
pub struct ChromeService {
    site_title: String,
    timezone: Tz,
}

impl ChromeService {
    pub fn new(site_title: impl Into<String>, timezone: Tz) -> Self {
        Self {
            site_title: site_title.into(),
            timezone,
        }
    }

    pub fn site_title(&self) -> &str {
        &self.site_title
    }

    /// Chrome for the page at `path`, with the matching navigation entry marked.
    pub fn load(&self, path: &str) -> LayoutChrome {
        let entries = NAVIGATION
            .iter()
            .map(|(label, href)| NavigationLinkView {
                label: (*label).to_string(),
                href: (*href).to_string(),
                is_active: *href == path,
            })
            .collect();

        let year = localized_date(OffsetDateTime::now_utc(), self.timezone).year();

        LayoutChrome {
            brand: BrandView {
                title: self.site_title.clone(),
                href: "/".to_string(),
            },
            navigation: NavigationView { entries },
            footer: FooterView {
                copy: format!("Copyright © {} {}", self.site_title, year),
            },
            meta: PageMetaView {
                title: String::new(),
                site_title: self.site_title.clone(),
            },
        }
    }
}
