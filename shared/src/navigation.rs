//! Page navigation over a closed set of page identifiers.
//!
//! Exactly one page is active. Explicit navigation, address-fragment changes
//! and startup all go through [`Pages::resolve`]: a known token activates its
//! page, anything else activates the default page.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const DEFAULT_PAGES: &[&str] = &["dashboard", "flights", "add-flight", "settings"];

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("at least one page must be declared")]
    NoPages,
    #[error("default page '{0}' is not a declared page")]
    UnknownDefault(String),
    #[error("page '{0}' is declared twice")]
    DuplicatePage(String),
}

/// Outcome of resolving a page token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub page: PageId,
    /// The token was not a known page and the default was used instead.
    pub fell_back: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pages {
    ids: Vec<PageId>,
    default: PageId,
}

impl Default for Pages {
    fn default() -> Self {
        Self {
            ids: DEFAULT_PAGES.iter().copied().map(PageId::new).collect(),
            default: PageId::new(crate::DEFAULT_PAGE),
        }
    }
}

impl Pages {
    pub fn new<I, S>(ids: I, default: impl Into<String>) -> Result<Self, NavigationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut pages: Vec<PageId> = Vec::new();
        for id in ids {
            let id = PageId::new(id);
            if pages.contains(&id) {
                return Err(NavigationError::DuplicatePage(id.0));
            }
            pages.push(id);
        }
        if pages.is_empty() {
            return Err(NavigationError::NoPages);
        }

        let default = PageId::new(default);
        if !pages.contains(&default) {
            return Err(NavigationError::UnknownDefault(default.0));
        }

        Ok(Self {
            ids: pages,
            default,
        })
    }

    pub fn ids(&self) -> &[PageId] {
        &self.ids
    }

    pub fn default_page(&self) -> &PageId {
        &self.default
    }

    pub fn contains(&self, token: &str) -> bool {
        self.ids.iter().any(|id| id.as_str() == token)
    }

    /// Resolve a page token or an address fragment (a leading `#` is ignored).
    pub fn resolve(&self, token: &str) -> Resolved {
        let token = fragment_token(token);
        match self.ids.iter().find(|id| id.as_str() == token) {
            Some(page) => Resolved {
                page: page.clone(),
                fell_back: false,
            },
            None => Resolved {
                page: self.default.clone(),
                fell_back: true,
            },
        }
    }

    /// Make the resolved page active. Returns whether the active page changed;
    /// activating the already-active page leaves everything as it was.
    pub fn activate(&self, active: &mut PageId, token: &str) -> bool {
        let Resolved { page, fell_back } = self.resolve(token);
        if fell_back {
            tracing::debug!(token, fallback = %page, "unknown page, using default");
        }
        if *active == page {
            return false;
        }
        *active = page;
        true
    }
}

/// Strip the leading `#` of an address fragment.
pub fn fragment_token(fragment: &str) -> &str {
    fragment.strip_prefix('#').unwrap_or(fragment)
}
