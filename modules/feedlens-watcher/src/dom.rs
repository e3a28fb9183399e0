// Document surface consumed by the watcher.
//
// FeedDocument yields the post containers currently rendered; PostElement is
// the read-only view of one container. HtmlSnapshot implements both over a
// parsed page, and a browser binding can implement them over live nodes.

/// Post containers.
pub const POST_SELECTOR: &str = r#"article[data-testid="tweet"]"#;

/// The text element inside a post container.
pub const TEXT_SELECTOR: &str = r#"[data-testid="tweetText"]"#;

/// Any element whose href marks it as a post permalink.
pub const PERMALINK_SELECTOR: &str = r#"[href*="/status/"]"#;

/// Explicit identifier attribute on a post container.
pub const ID_ATTRIBUTE: &str = "data-tweet-id";

pub trait PostElement {
    /// Value of an attribute on the container itself.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Absolute href of the first permalink-shaped link inside the container.
    fn permalink(&self) -> Option<String>;

    /// Rendered text of the text element, or `None` when the post has no
    /// text element.
    fn text(&self) -> Option<String>;
}

pub trait FeedDocument {
    type Post: PostElement;

    /// Every post container currently in the document, in document order.
    fn posts(&self) -> Vec<Self::Post>;
}
