//! Link classification for in-page navigation

use std::fmt;

use serde::{Deserialize, Serialize};

/// A same-page fragment such as `#about`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Anchor(String);

impl Anchor {
    /// Build an anchor from an element id
    pub fn for_id(id: &str) -> Self {
        Self(format!("#{}", id))
    }

    /// Element id the fragment points at
    pub fn id(&self) -> &str {
        &self.0[1..]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a click on a link with the given `href` should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    /// Intercept and scroll within the page
    Fragment(Anchor),
    /// `#` or `#!`: leave it to the host
    Placeholder,
    /// Anything else: default navigation
    External(&'a str),
}

pub fn classify_href(href: &str) -> LinkTarget<'_> {
    match href {
        "" => LinkTarget::External(href),
        "#" | "#!" => LinkTarget::Placeholder,
        _ if href.starts_with('#') => LinkTarget::Fragment(Anchor(href.to_string())),
        _ => LinkTarget::External(href),
    }
}
