use std::fmt;

use crate::dom::{PostElement, ID_ATTRIBUTE};

/// Identity of a post, best effort.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PostKey {
    /// Explicit identifier attribute on the container.
    Id(String),
    /// Href of the post's permalink.
    Permalink(String),
    /// Neither was available. A fresh value is minted on every derivation,
    /// so the same post seen in two scans gets two keys and is analyzed twice.
    Random(String),
}

impl PostKey {
    /// Identifier attribute, else permalink, else a random key.
    /// Empty values count as absent.
    pub fn derive(post: &impl PostElement) -> Self {
        if let Some(id) = post.attribute(ID_ATTRIBUTE).filter(|v| !v.is_empty()) {
            return PostKey::Id(id);
        }
        if let Some(href) = post.permalink().filter(|v| !v.is_empty()) {
            return PostKey::Permalink(href);
        }
        let key = PostKey::Random(uuid::Uuid::new_v4().simple().to_string());
        tracing::debug!(%key, "Post has no stable identity, using random key");
        key
    }

    /// Whether the key survives a re-render of the same post.
    pub fn is_stable(&self) -> bool {
        !matches!(self, PostKey::Random(_))
    }
}

impl fmt::Display for PostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostKey::Id(v) | PostKey::Permalink(v) | PostKey::Random(v) => f.write_str(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotPost;

    fn post(id: Option<&str>, permalink: Option<&str>) -> SnapshotPost {
        SnapshotPost {
            id: id.map(String::from),
            permalink: permalink.map(String::from),
            text: Some("text".to_string()),
        }
    }

    #[test]
    fn id_attribute_wins() {
        let key = PostKey::derive(&post(Some("42"), Some("https://x.com/a/status/42")));
        assert_eq!(key, PostKey::Id("42".to_string()));
        assert!(key.is_stable());
    }

    #[test]
    fn permalink_when_no_id() {
        let key = PostKey::derive(&post(None, Some("https://x.com/a/status/7")));
        assert_eq!(key, PostKey::Permalink("https://x.com/a/status/7".to_string()));
    }

    #[test]
    fn empty_id_falls_through() {
        let key = PostKey::derive(&post(Some(""), Some("https://x.com/a/status/7")));
        assert!(matches!(key, PostKey::Permalink(_)));
    }

    #[test]
    fn random_fallback_is_not_stable() {
        let bare = post(None, None);
        let first = PostKey::derive(&bare);
        let second = PostKey::derive(&bare);
        assert!(matches!(first, PostKey::Random(_)));
        assert!(!first.is_stable());
        assert_ne!(first, second);
    }
}
