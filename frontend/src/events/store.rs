use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use log::warn;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::error::{RemoteError, RemoteResult};
use crate::events::model::EventRecord;
use crate::events::query::EventQuery;

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Attendee {
    pub event_id: String,
    pub user_id: String,
}

/// The hosted tables behind the events pages.
#[async_trait(?Send)]
pub trait EventStore {
    async fn select_events(&self, query: &EventQuery) -> RemoteResult<Vec<EventRecord>>;
    async fn insert_attendee(&self, attendee: &Attendee) -> RemoteResult<()>;
}

/// PostgREST endpoint of the hosted project, authenticated with the public anon key.
pub struct SupabaseStore {
    base_url: String,
    anon_key: String,
}

impl SupabaseStore {
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorize(&self, request: Request) -> Request {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", self.anon_key))
    }
}

async fn ensure_ok(response: Response) -> RemoteResult<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(RemoteError::Status { status, body })
}

#[async_trait(?Send)]
impl EventStore for SupabaseStore {
    async fn select_events(&self, query: &EventQuery) -> RemoteResult<Vec<EventRecord>> {
        let url = format!("{}?{}", self.table_url("events"), query.to_query_string());
        let response = self
            .authorize(Request::get(&url))
            .header("Accept", "application/json")
            .send()
            .await?;
        let response = ensure_ok(response).await?;
        Ok(response.json::<Vec<EventRecord>>().await?)
    }

    async fn insert_attendee(&self, attendee: &Attendee) -> RemoteResult<()> {
        let response = self
            .authorize(Request::post(&self.table_url("event_attendees")))
            .header("Prefer", "return=minimal")
            .json(attendee)?
            .send()
            .await?;
        ensure_ok(response).await?;
        Ok(())
    }
}

/// Stands in when the build carries no store credentials.
pub struct UnconfiguredStore;

#[async_trait(?Send)]
impl EventStore for UnconfiguredStore {
    async fn select_events(&self, _query: &EventQuery) -> RemoteResult<Vec<EventRecord>> {
        Err(RemoteError::NotConfigured)
    }

    async fn insert_attendee(&self, _attendee: &Attendee) -> RemoteResult<()> {
        Err(RemoteError::NotConfigured)
    }
}

pub fn store_from_config(config: &SiteConfig) -> Rc<dyn EventStore> {
    match config.store_credentials() {
        Some((url, key)) => Rc::new(SupabaseStore::new(url, key)),
        None => {
            warn!("SUPABASE_URL / SUPABASE_ANON_KEY not set, events will be empty");
            Rc::new(UnconfiguredStore)
        }
    }
}
