use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::{error, info};

use crate::events::model::{EventDisplay, EventRecord};
use crate::events::query::{EventFilterCriteria, EventQuery};
use crate::events::store::{Attendee, EventStore};

/// Read side of the events pages. Store failures never reach callers: lists
/// come back empty, single lookups come back `None`.
#[derive(Clone)]
pub struct EventCatalog {
    store: Rc<dyn EventStore>,
    tz: Tz,
}

impl EventCatalog {
    pub fn new(store: Rc<dyn EventStore>, tz: Tz) -> Self {
        Self { store, tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    fn project(&self, records: &[EventRecord]) -> Vec<EventDisplay> {
        records.iter().map(|r| EventDisplay::project(r, self.tz)).collect()
    }

    async fn fetch(&self, query: &EventQuery) -> Vec<EventRecord> {
        match self.store.select_events(query).await {
            Ok(records) => records,
            Err(e) => {
                error!("Error fetching events: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn list_events(&self, criteria: &EventFilterCriteria) -> Vec<EventDisplay> {
        let query = EventQuery::from_criteria(criteria, self.tz);
        let mut records = self.fetch(&query).await;
        records.retain(|r| query.matches(r));
        self.project(&records)
    }

    pub async fn list_upcoming(&self, limit: usize) -> Vec<EventDisplay> {
        self.list_upcoming_at(limit, Utc::now()).await
    }

    pub async fn list_upcoming_at(&self, limit: usize, now: DateTime<Utc>) -> Vec<EventDisplay> {
        let records = self.fetch(&EventQuery::upcoming(now, limit)).await;
        let mut events = self.project(&records);
        events.truncate(limit);
        events
    }

    pub async fn get_event(&self, id: &str) -> Option<EventDisplay> {
        let records = self.fetch(&EventQuery::by_id(id)).await;
        records
            .iter()
            .find(|r| r.id == id)
            .map(|r| EventDisplay::project(r, self.tz))
    }

    pub async fn register_attendee(&self, event_id: &str, user_id: &str) -> bool {
        let attendee = Attendee {
            event_id: event_id.to_string(),
            user_id: user_id.to_string(),
        };
        match self.store.insert_attendee(&attendee).await {
            Ok(()) => {
                info!("Registered attendee for event {}", event_id);
                true
            }
            Err(e) => {
                error!("Error registering for event {}: {}", event_id, e);
                false
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Ascending => "Soonest first",
            SortDirection::Descending => "Latest first",
        }
    }
}

/// Stable: events with equal timestamps keep their relative order.
/// Undated events sort before dated ones when ascending.
pub fn sort_by_date(events: &mut [EventDisplay], direction: SortDirection) {
    match direction {
        SortDirection::Ascending => events.sort_by(|a, b| a.starts_at.cmp(&b.starts_at)),
        SortDirection::Descending => events.sort_by(|a, b| b.starts_at.cmp(&a.starts_at)),
    }
}

/// Tags outgoing queries so a slow response can't overwrite a newer one.
#[derive(Debug, Default)]
pub struct QuerySequencer {
    latest: Cell<u64>,
}

impl QuerySequencer {
    pub fn issue(&self) -> u64 {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        next
    }

    pub fn is_current(&self, tag: u64) -> bool {
        self.latest.get() == tag
    }
}
