//! Site pages and the slot types images are placed into.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A page of the portfolio site that images can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Home,
    About,
    Work,
}

impl Page {
    /// Pages accepted by the page-scoped single image lookup.
    pub const LOOKUP_ALLOWED: &'static [Page] = &[Page::Work];

    /// The tag string stored in the `page` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::About => "about",
            Page::Work => "work",
        }
    }

    /// Whether single-image lookups may be scoped to this page.
    pub fn allows_lookup(&self) -> bool {
        Self::LOOKUP_ALLOWED.contains(self)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "home" => Ok(Page::Home),
            "about" => Ok(Page::About),
            "work" => Ok(Page::Work),
            other => Err(crate::Error::Validation(format!("Unknown page '{other}'"))),
        }
    }
}

/// Slot type identifiers. Matching is exact string equality.
pub mod slot {
    pub const SLIDER: &str = "slider";
    pub const CONTAINER_FIRST: &str = "container-first";
    pub const FEATURE_WORK: &str = "feature-work";
    pub const LOGOS_BRAND: &str = "logos-brand";
    pub const CONTAINER_SECOND: &str = "container-second";
    pub const FOOTER: &str = "footer";
    pub const CONTAINER_FOOTER: &str = "container-footer";
    pub const CONTAINER_LEFT_ABOUT: &str = "container-left-about";
    pub const CONTAINER_RIGHT_ABOUT: &str = "container-right-about";
    pub const COLUMN1: &str = "column1";
    pub const COLUMN2: &str = "column2";
    pub const COLUMN3: &str = "column3";
    pub const COLUMN4: &str = "column4";
}
