//! Display badges for status and type enums.
//!
//! Each enum maps every variant to a label and a tone through an exhaustive
//! `match`, so adding a variant without a badge does not compile. Raw values
//! that are not a known variant get a neutral badge showing the raw text.

use serde::Serialize;

/// Color family of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Green,
    Gray,
    Blue,
    Orange,
    Red,
    Neutral,
}

impl BadgeTone {
    /// CSS class used by the web templates.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Green => "badge badge-green",
            Self::Gray => "badge badge-gray",
            Self::Blue => "badge badge-blue",
            Self::Orange => "badge badge-orange",
            Self::Red => "badge badge-red",
            Self::Neutral => "badge badge-neutral",
        }
    }
}

/// A rendered badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: String,
    pub tone: BadgeTone,
}

impl Badge {
    pub fn css_class(&self) -> &'static str {
        self.tone.css_class()
    }
}

/// A closed set of values stored as text and shown as a badge.
pub trait Categorical: Copy + PartialEq + Send + Sync + 'static {
    /// Every variant, in display order.
    const ALL: &'static [Self];

    /// Strict parse of the stored text.
    fn parse(raw: &str) -> Option<Self>;

    /// Stored text.
    fn as_str(&self) -> &'static str;

    /// Human label.
    fn label(&self) -> &'static str;

    fn tone(&self) -> BadgeTone;

    fn badge(&self) -> Badge {
        Badge {
            label: self.label().to_string(),
            tone: self.tone(),
        }
    }
}

/// Badge for text that may or may not be a known variant.
pub fn badge_for_raw<T: Categorical>(raw: &str) -> Badge {
    match T::parse(raw) {
        Some(value) => value.badge(),
        None => Badge {
            label: raw.to_string(),
            tone: BadgeTone::Neutral,
        },
    }
}

/// Category type for record kinds without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoCategory {}

impl Categorical for NoCategory {
    const ALL: &'static [Self] = &[];

    fn parse(_raw: &str) -> Option<Self> {
        None
    }

    fn as_str(&self) -> &'static str {
        match *self {}
    }

    fn label(&self) -> &'static str {
        match *self {}
    }

    fn tone(&self) -> BadgeTone {
        match *self {}
    }
}
