use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};

pub const CURRENCY_SYMBOL: &str = "₹";

/// Row of the hosted `events` table. Read-only on our side.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct EventRecord {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: String,
    pub presenter: String,
    pub duration: u32,
    pub format: String,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub available_seats: Option<u32>,
}

// Ids come back as integers or uuids depending on how the table was created.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

impl EventRecord {
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.start_date)
    }
}

/// Accepts RFC 3339 and the Postgres text forms (`2024-05-04 18:30:00+00`, no offset = UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Presentation shape of an [`EventRecord`], rebuilt on every fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct EventDisplay {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub presenter: String,
    pub format: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub date: String,
    pub time: String,
    pub duration: String,
    pub image_path: Option<String>,
    pub price: Option<String>,
    pub original_price: Option<String>,
    pub discount: Option<String>,
    pub available_seats: Option<u32>,
}

impl EventDisplay {
    pub fn project(record: &EventRecord, tz: Tz) -> Self {
        let starts_at = record.starts_at();
        let (date, time) = match starts_at {
            Some(utc) => {
                let local = utc.with_timezone(&tz);
                (
                    local.format("%a, %b %-d, %Y").to_string(),
                    local.format("%-I:%M %p").to_string(),
                )
            }
            None => (record.start_date.clone(), String::new()),
        };

        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            presenter: record.presenter.clone(),
            format: record.format.clone(),
            starts_at,
            date,
            time,
            duration: format!("{} minutes", record.duration),
            image_path: record.image_path.clone(),
            price: record.price.map(format_currency),
            original_price: record.original_price.map(format_currency),
            discount: record
                .discount_percentage
                .map(|pct| format!("{}% OFF", format_number(pct))),
            available_seats: record.available_seats,
        }
    }
}

pub fn format_currency(amount: f64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, format_number(amount))
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}
