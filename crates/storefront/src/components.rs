//! Shared page fragments (navbar, footer) injected into placeholders.
//!
//! A [`Page`] is an HTML document held as a string. Elements are located by
//! `id` or class on their start tag and their inner HTML is replaced
//! wholesale, the same as assigning `innerHTML` in a browser.
//!
//! Fragment loading never fails the page: each failure is logged and the
//! placeholder is left untouched.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::config::StorefrontConfig;

/// Navbar fragment path and the element it is injected into.
pub const NAVBAR_COMPONENT: (&str, &str) = ("/templates/components/navbar.html", "navbar-placeholder");

/// Footer fragment path and the element it is injected into.
pub const FOOTER_COMPONENT: (&str, &str) = ("/templates/components/footer.html", "footer-placeholder");

static START_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([A-Za-z][A-Za-z0-9-]*)((?:\s[^>]*)?)>").expect("valid start-tag regex")
});
static ANY_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9-]*)[^>]*>").expect("valid tag regex")
});
static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("valid attribute regex")
});

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Errors that can occur when loading a fragment.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! status: {status} for {path}")]
    Status { path: String, status: u16 },

    #[error("Invalid component path {path}: {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Target element with ID \"{0}\" not found")]
    TargetNotFound(String),
}

/// How to find an element in a [`Page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementSelector {
    /// `#id`
    Id(String),
    /// `.class`, matching any one token of the `class` attribute.
    Class(String),
}

impl ElementSelector {
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    #[must_use]
    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    fn matches(&self, attributes: &str) -> bool {
        ATTRIBUTE_RE.captures_iter(attributes).any(|caps| {
            let name = caps.get(1).map_or("", |m| m.as_str());
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            match self {
                Self::Id(id) => name.eq_ignore_ascii_case("id") && value == id,
                Self::Class(class) => {
                    name.eq_ignore_ascii_case("class")
                        && value.split_ascii_whitespace().any(|token| token == class)
                }
            }
        })
    }
}

impl std::fmt::Display for ElementSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Class(class) => write!(f, ".{class}"),
        }
    }
}

/// An HTML document being assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    html: String,
}

impl Page {
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn into_html(self) -> String {
        self.html
    }

    /// Inner HTML of the first element matching `selector`.
    #[must_use]
    pub fn inner_html(&self, selector: &ElementSelector) -> Option<&str> {
        let (start, end) = find_content(&self.html, selector)?;
        self.html.get(start..end)
    }

    /// Replace the inner HTML of the first element matching `selector`.
    ///
    /// Returns `false` if no such element exists or it cannot hold content.
    pub fn set_inner_html(&mut self, selector: &ElementSelector, content: &str) -> bool {
        let Some((start, end)) = find_content(&self.html, selector) else {
            return false;
        };
        self.html.replace_range(start..end, content);
        true
    }
}

/// Byte range of the content of the first element matching `selector`.
fn find_content(html: &str, selector: &ElementSelector) -> Option<(usize, usize)> {
    let caps = START_TAG_RE.captures_iter(html).find(|caps| {
        caps.get(2)
            .is_some_and(|attributes| selector.matches(attributes.as_str()))
    })?;
    let tag = caps.get(0)?;
    let name = caps.get(1)?.as_str();

    if tag.as_str().ends_with("/>") || VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name)) {
        return None;
    }

    let content_start = tag.end();
    let rest = html.get(content_start..)?;

    let mut depth = 1usize;
    let same_tag = ANY_TAG_RE
        .captures_iter(rest)
        .filter(|m| m.get(2).is_some_and(|n| n.as_str().eq_ignore_ascii_case(name)));
    for m in same_tag {
        let whole = m.get(0)?;
        let closing = m.get(1).is_some_and(|slash| !slash.as_str().is_empty());
        if closing {
            depth -= 1;
            if depth == 0 {
                return Some((content_start, content_start + whole.start()));
            }
        } else if !whole.as_str().ends_with("/>") {
            depth += 1;
        }
    }

    None
}

/// Fetches fragments and injects them into a [`Page`].
#[derive(Debug, Clone)]
pub struct ComponentLoader {
    client: reqwest::Client,
    base_url: Url,
}

impl ComponentLoader {
    /// Create a loader for the configured asset origin.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ComponentError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.assets_base_url.clone(),
        })
    }

    #[must_use]
    pub const fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Fetch the fragment at `path` (resolved against the asset origin).
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx status.
    pub async fn fetch_component(&self, path: &str) -> Result<String, ComponentError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|source| ComponentError::InvalidPath {
                path: path.to_string(),
                source,
            })?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ComponentError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }

    /// Fetch the fragment at `path` and inject it into `#target_id`.
    ///
    /// # Errors
    ///
    /// Returns error if the fetch fails or the page has no such element.
    pub async fn load_component(
        &self,
        page: &mut Page,
        path: &str,
        target_id: &str,
    ) -> Result<(), ComponentError> {
        let html = self.fetch_component(path).await?;
        inject(page, target_id, &html)
    }

    /// Load the navbar and footer into their placeholders.
    ///
    /// Both fragments are fetched concurrently. Failures are logged and
    /// skipped; returns how many fragments were injected.
    pub async fn initialize_components(&self, page: &mut Page) -> usize {
        let (navbar_path, navbar_target) = NAVBAR_COMPONENT;
        let (footer_path, footer_target) = FOOTER_COMPONENT;

        let (navbar, footer) = tokio::join!(
            self.fetch_component(navbar_path),
            self.fetch_component(footer_path)
        );

        let mut loaded = 0;
        for (path, target, fetched) in [
            (navbar_path, navbar_target, navbar),
            (footer_path, footer_target, footer),
        ] {
            match fetched.and_then(|html| inject(page, target, &html)) {
                Ok(()) => {
                    tracing::debug!(component = %path, target = %target, "Component loaded");
                    loaded += 1;
                }
                Err(e) => {
                    tracing::error!(component = %path, error = %e, "Failed to load component");
                }
            }
        }
        loaded
    }
}

fn inject(page: &mut Page, target_id: &str, html: &str) -> Result<(), ComponentError> {
    if page.set_inner_html(&ElementSelector::id(target_id), html) {
        Ok(())
    } else {
        Err(ComponentError::TargetNotFound(target_id.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SHELL: &str = r#"<html><body>
<div id="navbar-placeholder"></div>
<main><div class="products-grid loading"><div class="product-card">old</div></div></main>
<div id='footer-placeholder'>loading</div>
</body></html>"#;

    fn loader_for(server: &MockServer) -> ComponentLoader {
        ComponentLoader::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap())
    }

    #[test]
    fn test_set_inner_html_by_id() {
        let mut page = Page::new(SHELL);
        assert!(page.set_inner_html(&ElementSelector::id("navbar-placeholder"), "<nav>Nav</nav>"));
        assert!(page.html().contains(r#"<div id="navbar-placeholder"><nav>Nav</nav></div>"#));
    }

    #[test]
    fn test_single_quoted_attributes() {
        let page = Page::new(SHELL);
        assert_eq!(
            page.inner_html(&ElementSelector::id("footer-placeholder")),
            Some("loading")
        );
    }

    #[test]
    fn test_class_selector_handles_nested_elements() {
        let mut page = Page::new(SHELL);
        let grid = ElementSelector::class("products-grid");
        assert_eq!(
            page.inner_html(&grid),
            Some(r#"<div class="product-card">old</div>"#)
        );

        assert!(page.set_inner_html(&grid, "new"));
        assert!(page.html().contains(r#"<div class="products-grid loading">new</div></main>"#));
    }

    #[test]
    fn test_missing_and_void_targets() {
        let mut page = Page::new(r#"<p>hi</p><img id="logo" src="x.png">"#);
        assert!(!page.set_inner_html(&ElementSelector::id("nowhere"), "x"));
        assert!(!page.set_inner_html(&ElementSelector::id("logo"), "x"));
        assert_eq!(page.html(), r#"<p>hi</p><img id="logo" src="x.png">"#);
    }

    #[test]
    fn test_nesting_counts_only_same_tag_name() {
        let page = Page::new(
            r#"<div id="target"><DIV>a</DIV><dialog>b</dialog><div/></div><p>after</p>"#,
        );
        assert_eq!(
            page.inner_html(&ElementSelector::id("target")),
            Some("<DIV>a</DIV><dialog>b</dialog><div/>")
        );
    }

    #[test]
    fn test_id_must_match_exactly() {
        let page = Page::new(r#"<div id="navbar-placeholder-old">a</div><div id="navbar-placeholder">b</div>"#);
        assert_eq!(
            page.inner_html(&ElementSelector::id("navbar-placeholder")),
            Some("b")
        );
    }

    #[tokio::test]
    async fn test_initialize_components_injects_both() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/templates/components/navbar.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<nav>Menu</nav>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/templates/components/footer.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<footer>Foot</footer>"))
            .mount(&server)
            .await;

        let mut page = Page::new(SHELL);
        let loaded = loader_for(&server).initialize_components(&mut page).await;

        assert_eq!(loaded, 2);
        assert_eq!(
            page.inner_html(&ElementSelector::id("navbar-placeholder")),
            Some("<nav>Menu</nav>")
        );
        assert_eq!(
            page.inner_html(&ElementSelector::id("footer-placeholder")),
            Some("<footer>Foot</footer>")
        );
    }

    #[tokio::test]
    async fn test_failed_fragment_leaves_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/templates/components/navbar.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<nav>Menu</nav>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/templates/components/footer.html"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut page = Page::new(SHELL);
        let loaded = loader_for(&server).initialize_components(&mut page).await;

        assert_eq!(loaded, 1);
        assert_eq!(
            page.inner_html(&ElementSelector::id("footer-placeholder")),
            Some("loading")
        );
    }

    #[tokio::test]
    async fn test_load_component_reports_status_and_missing_target() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/templates/components/navbar.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<nav/>"))
            .mount(&server)
            .await;
        let loader = loader_for(&server);
        let mut page = Page::new("<body></body>");

        let missing_target = loader
            .load_component(&mut page, NAVBAR_COMPONENT.0, NAVBAR_COMPONENT.1)
            .await;
        assert!(matches!(missing_target, Err(ComponentError::TargetNotFound(_))));

        let not_found = loader
            .load_component(&mut page, "/templates/components/missing.html", "x")
            .await;
        assert!(matches!(
            not_found,
            Err(ComponentError::Status { status: 404, .. })
        ));
    }
}
