use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::dom::{FeedDocument, PostElement, ID_ATTRIBUTE, PERMALINK_SELECTOR, POST_SELECTOR, TEXT_SELECTOR};

/// One post container lifted out of a parsed page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotPost {
    pub id: Option<String>,
    pub permalink: Option<String>,
    pub text: Option<String>,
}

impl PostElement for SnapshotPost {
    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            ID_ATTRIBUTE => self.id.clone(),
            _ => None,
        }
    }

    fn permalink(&self) -> Option<String> {
        self.permalink.clone()
    }

    fn text(&self) -> Option<String> {
        self.text.clone()
    }
}

/// A rendered feed page reduced to its post containers.
///
/// Parsing happens eagerly so no `scraper::Html` outlives the call; the
/// snapshot is plain owned data that can cross await points.
#[derive(Debug, Clone, Default)]
pub struct HtmlSnapshot {
    posts: Vec<SnapshotPost>,
}

impl HtmlSnapshot {
    pub fn parse(html: &str) -> Self {
        Self::parse_with_base(html, None)
    }

    /// Relative permalink hrefs are resolved against `base_url` when given,
    /// the way a browser reports `link.href`.
    pub fn parse_with_base(html: &str, base_url: Option<&str>) -> Self {
        let base = base_url.and_then(|b| Url::parse(b).ok());
        let document = Html::parse_document(html);

        // Constant selectors; parse failures would be a typo caught by tests.
        let (Ok(post_selector), Ok(text_selector), Ok(link_selector)) = (
            Selector::parse(POST_SELECTOR),
            Selector::parse(TEXT_SELECTOR),
            Selector::parse(PERMALINK_SELECTOR),
        ) else {
            tracing::error!("Invalid feed selectors");
            return Self::default();
        };

        let posts = document
            .select(&post_selector)
            .map(|article| SnapshotPost {
                id: article.value().attr(ID_ATTRIBUTE).map(str::to_string),
                permalink: article
                    .select(&link_selector)
                    .next()
                    .and_then(|link| link.value().attr("href"))
                    .map(|href| resolve_href(href, base.as_ref())),
                text: article.select(&text_selector).next().map(inner_text),
            })
            .collect();

        Self { posts }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

impl FeedDocument for HtmlSnapshot {
    type Post = SnapshotPost;

    fn posts(&self) -> Vec<SnapshotPost> {
        self.posts.clone()
    }
}

fn inner_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

fn resolve_href(href: &str, base: Option<&Url>) -> String {
    match base.and_then(|b| b.join(href).ok()) {
        Some(resolved) => resolved.to_string(),
        None => href.to_string(),
    }
}
