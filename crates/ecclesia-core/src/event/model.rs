//! Event domain models.

use crate::badge::{BadgeTone, Categorical};
use crate::error::ChurchResult;
use crate::forms;
use ecclesia_db::queries::events::{EventRow, EventValues};
use serde::{Deserialize, Serialize};

/// A church event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub date: String,
    pub time: Option<String>,
    pub location: Option<String>,
    pub expected_attendees: u32,
    pub confirmed_attendees: u32,
    pub description: Option<String>,
    pub status: EventStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Event {
    /// Create an Event from a database row.
    pub fn from_row(row: EventRow) -> Self {
        let status = EventStatus::parse(&row.status).unwrap_or_else(|| {
            tracing::warn!(id = %row.id, status = %row.status, "unknown event status");
            EventStatus::default()
        });

        Self {
            id: row.id,
            name: row.name,
            date: row.date,
            time: row.time,
            location: row.location,
            expected_attendees: u32::try_from(row.expected_attendees).unwrap_or(0),
            confirmed_attendees: u32::try_from(row.confirmed_attendees).unwrap_or(0),
            description: row.description,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    /// "confirmed/expected".
    pub fn attendance(&self) -> String {
        format!("{}/{}", self.confirmed_attendees, self.expected_attendees)
    }
}

/// Event lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Planned,
    Confirmed,
    Completed,
    Cancelled,
}

impl Categorical for EventStatus {
    const ALL: &'static [Self] = &[
        Self::Planned,
        Self::Confirmed,
        Self::Completed,
        Self::Cancelled,
    ];

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "planned" => Some(Self::Planned),
            "confirmed" => Some(Self::Confirmed),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::Confirmed => "Confirmed",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    fn tone(&self) -> BadgeTone {
        match self {
            Self::Planned => BadgeTone::Blue,
            Self::Confirmed => BadgeTone::Green,
            Self::Completed => BadgeTone::Gray,
            Self::Cancelled => BadgeTone::Red,
        }
    }
}

/// Event form state. Attendee counts are kept as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDraft {
    pub name: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub expected_attendees: String,
    pub confirmed_attendees: String,
    pub description: String,
    pub status: EventStatus,
}

impl EventDraft {
    pub fn from_event(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            date: event.date.clone(),
            time: event.time.clone().unwrap_or_default(),
            location: event.location.clone().unwrap_or_default(),
            expected_attendees: event.expected_attendees.to_string(),
            confirmed_attendees: event.confirmed_attendees.to_string(),
            description: event.description.clone().unwrap_or_default(),
            status: event.status,
        }
    }

    /// Validate and convert to stored values. Non-numeric counts become 0.
    pub fn to_values(&self) -> ChurchResult<EventValues> {
        Ok(EventValues {
            name: forms::required("Name", &self.name)?,
            date: forms::date("Date", &self.date)?,
            time: forms::optional_time("Time", &self.time)?,
            location: forms::optional(&self.location),
            expected_attendees: i64::from(forms::parse_or_zero::<u32>(&self.expected_attendees)),
            confirmed_attendees: i64::from(forms::parse_or_zero::<u32>(&self.confirmed_attendees)),
            description: forms::optional(&self.description),
            status: self.status.as_str().to_string(),
        })
    }
}
