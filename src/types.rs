//! Manifest types.
//!
//! These are written to `manifest.json` and read back on the next run to
//! decide whether anything changed. Field order here is the field order in
//! the emitted JSON, and optional paths serialize as `null` rather than being
//! omitted, so front-end consumers can rely on every key being present.

use serde::{Deserialize, Serialize};

/// The whole content tree plus its generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// ISO-8601 UTC timestamp, millisecond precision (`2024-09-01T12:00:00.000Z`)
    pub generated_at: String,
    pub units: Vec<Unit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Directory name as found on disk
    pub name: String,
    /// Display title derived from the name
    pub title: String,
    /// `/`-separated path to the icon, rooted at the content directory's parent
    pub icon: Option<String>,
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub name: String,
    pub title: String,
    pub icon: Option<String>,
    pub tabs: Vec<Tab>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub name: String,
    pub title: String,
    pub icon: Option<String>,
    pub cards: Vec<Card>,
}

/// Innermost level: a single piece of content with its media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub title: String,
    /// Background image path (never SVG)
    pub bgimage: Option<String>,
    /// Whether a `writing` entry exists in the card directory
    pub has_writing: bool,
    pub media: Vec<Media>,
}

/// A media file inside a card. `name` is the bare filename; clients join it
/// with the card's path themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub name: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl Manifest {
    /// Total number of cards across all units.
    pub fn card_count(&self) -> usize {
        self.units
            .iter()
            .flat_map(|u| &u.lessons)
            .flat_map(|l| &l.tabs)
            .map(|t| t.cards.len())
            .sum()
    }
}
