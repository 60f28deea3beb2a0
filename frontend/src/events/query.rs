use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use urlencoding::encode;

use crate::events::model::{parse_timestamp, EventDisplay, EventRecord};

/// The columns the filters look at, shared by raw rows and their display projection.
pub trait EventFields {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn presenter(&self) -> &str;
    fn format(&self) -> &str;
    fn starts_at(&self) -> Option<DateTime<Utc>>;
}

impl EventFields for EventRecord {
    fn id(&self) -> &str {
        &self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    fn presenter(&self) -> &str {
        &self.presenter
    }
    fn format(&self) -> &str {
        &self.format
    }
    fn starts_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.start_date)
    }
}

impl EventFields for EventDisplay {
    fn id(&self) -> &str {
        &self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    fn presenter(&self) -> &str {
        &self.presenter
    }
    fn format(&self) -> &str {
        &self.format
    }
    fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.starts_at
    }
}

/// What the visitor picked on the events page. Every populated criterion narrows the result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventFilterCriteria {
    pub search: Option<String>,
    pub presenter: Option<String>,
    pub format: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl EventFilterCriteria {
    pub fn is_empty(&self) -> bool {
        EventQuery::from_criteria(self, chrono_tz::UTC) == EventQuery::default()
    }

    /// Same predicate the remote query applies, for re-filtering an already loaded list.
    pub fn matches<E: EventFields>(&self, event: &E, tz: Tz) -> bool {
        EventQuery::from_criteria(self, tz).matches(event)
    }
}

/// A request against the `events` table, always ordered by ascending `start_date`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventQuery {
    pub id: Option<String>,
    pub search: Option<String>,
    pub presenter: Option<String>,
    pub format: Option<String>,
    /// Inclusive.
    pub starts_from: Option<DateTime<Utc>>,
    /// Inclusive.
    pub starts_until: Option<DateTime<Utc>>,
    /// Exclusive.
    pub starts_after: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

fn term(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// LIKE treats `%` and `_` as wildcards; the terms are plain substrings.
fn like_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

// PostgREST reserves `,.:()` inside logic trees, so values there are double-quoted.
fn quoted(value: &str) -> String {
    let pattern = format!("*{}*", like_literal(value));
    format!("\"{}\"", pattern.replace('\\', "\\\\").replace('"', "\\\""))
}

/// First instant at or after `local` that exists on the wall clock in `tz`.
fn resolve_local(tz: Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    // DST gaps are at most a few hours wide.
    (0..=24 * 60)
        .find_map(|minutes| tz.from_local_datetime(&(local + Duration::minutes(minutes))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

impl EventQuery {
    /// Date bounds cover whole days in the display timezone.
    pub fn from_criteria(criteria: &EventFilterCriteria, tz: Tz) -> Self {
        let day_start = |date: NaiveDate, time: NaiveTime| resolve_local(tz, date.and_time(time));
        let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);

        Self {
            search: term(&criteria.search),
            presenter: term(&criteria.presenter),
            format: term(&criteria.format),
            starts_from: criteria.start_date.and_then(|d| day_start(d, NaiveTime::MIN)),
            starts_until: criteria.end_date.and_then(|d| day_start(d, end_of_day)),
            ..Self::default()
        }
    }

    pub fn upcoming(now: DateTime<Utc>, limit: usize) -> Self {
        Self {
            starts_after: Some(now),
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn by_id(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            limit: Some(1),
            ..Self::default()
        }
    }

    pub fn matches<E: EventFields>(&self, event: &E) -> bool {
        if let Some(id) = &self.id {
            if event.id() != id {
                return false;
            }
        }
        if let Some(presenter) = &self.presenter {
            if !contains_ci(event.presenter(), presenter) {
                return false;
            }
        }
        if let Some(format) = &self.format {
            if !contains_ci(event.format(), format) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let hit = contains_ci(event.title(), search)
                || event.description().map_or(false, |d| contains_ci(d, search))
                || contains_ci(event.presenter(), search)
                || contains_ci(event.format(), search);
            if !hit {
                return false;
            }
        }

        if self.starts_from.is_none() && self.starts_until.is_none() && self.starts_after.is_none() {
            return true;
        }
        let Some(starts) = event.starts_at() else {
            return false;
        };
        self.starts_from.map_or(true, |from| starts >= from)
            && self.starts_until.map_or(true, |until| starts <= until)
            && self.starts_after.map_or(true, |after| starts > after)
    }

    /// Query string for `GET /rest/v1/events`.
    pub fn to_query_string(&self) -> String {
        let mut params: Vec<(String, String)> = vec![
            ("select".into(), "*".into()),
            ("order".into(), "start_date.asc".into()),
        ];

        if let Some(id) = &self.id {
            params.push(("id".into(), format!("eq.{}", id)));
        }
        if let Some(presenter) = &self.presenter {
            params.push(("presenter".into(), format!("ilike.*{}*", like_literal(presenter))));
        }
        if let Some(format) = &self.format {
            params.push(("format".into(), format!("ilike.*{}*", like_literal(format))));
        }
        if let Some(search) = &self.search {
            let pattern = quoted(search);
            let any_of = ["title", "description", "presenter", "format"]
                .iter()
                .map(|column| format!("{}.ilike.{}", column, pattern))
                .collect::<Vec<_>>()
                .join(",");
            params.push(("or".into(), format!("({})", any_of)));
        }
        if let Some(from) = &self.starts_from {
            params.push(("start_date".into(), format!("gte.{}", timestamp(from))));
        }
        if let Some(until) = &self.starts_until {
            params.push(("start_date".into(), format!("lte.{}", timestamp(until))));
        }
        if let Some(after) = &self.starts_after {
            params.push(("start_date".into(), format!("gt.{}", timestamp(after))));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".into(), limit.to_string()));
        }

        params
            .iter()
            .map(|(key, value)| format!("{}={}", key, encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str, description: Option<&str>, presenter: &str, format: &str, start: &str) -> EventRecord {
        EventRecord {
            id: id.into(),
            title: title.into(),
            description: description.map(str::to_string),
            start_date: start.into(),
            presenter: presenter.into(),
            duration: 60,
            format: format.into(),
            image_path: None,
            price: None,
            original_price: None,
            discount_percentage: None,
            available_seats: None,
        }
    }

    fn criteria() -> EventFilterCriteria {
        EventFilterCriteria::default()
    }

    #[test]
    fn search_hits_any_text_column() {
        let r = record("1", "Portfolio Review", Some("Bring your typography work"), "Meera", "Live Session", "2026-11-01T10:00:00Z");
        let c = EventFilterCriteria { search: Some("TYPOGRAPHY".into()), ..criteria() };
        assert!(c.matches(&r, chrono_tz::UTC));
        let c = EventFilterCriteria { search: Some("live".into()), ..criteria() };
        assert!(c.matches(&r, chrono_tz::UTC));
        let c = EventFilterCriteria { search: Some("motion".into()), ..criteria() };
        assert!(!c.matches(&r, chrono_tz::UTC));
    }

    #[test]
    fn distinct_criteria_are_combined() {
        let r = record("1", "Grids", None, "Arun Kumar", "Live Session", "2026-11-01T10:00:00Z");
        let c = EventFilterCriteria {
            presenter: Some("arun".into()),
            format: Some("Virtual Workshop".into()),
            ..criteria()
        };
        assert!(!c.matches(&r, chrono_tz::UTC));
    }

    #[test]
    fn blank_terms_are_ignored() {
        let c = EventFilterCriteria { search: Some("   ".into()), presenter: Some(String::new()), ..criteria() };
        assert!(c.is_empty());
        assert_eq!(EventQuery::from_criteria(&c, chrono_tz::UTC), EventQuery::default());
    }

    #[test]
    fn date_bounds_include_whole_days() {
        let c = EventFilterCriteria {
            start_date: NaiveDate::from_ymd_opt(2026, 11, 1),
            end_date: NaiveDate::from_ymd_opt(2026, 11, 1),
            ..criteria()
        };
        let early = record("1", "a", None, "p", "f", "2026-11-01T00:00:00Z");
        let late = record("2", "a", None, "p", "f", "2026-11-01T23:30:00Z");
        let next = record("3", "a", None, "p", "f", "2026-11-02T00:00:00Z");
        let undated = record("4", "a", None, "p", "f", "soon");
        assert!(c.matches(&early, chrono_tz::UTC));
        assert!(c.matches(&late, chrono_tz::UTC));
        assert!(!c.matches(&next, chrono_tz::UTC));
        assert!(!c.matches(&undated, chrono_tz::UTC));
    }

    #[test]
    fn bounds_follow_display_timezone() {
        let c = EventFilterCriteria { start_date: NaiveDate::from_ymd_opt(2026, 11, 2), ..criteria() };
        // 20:00 UTC on the 1st is already the 2nd in Kolkata
        let r = record("1", "a", None, "p", "f", "2026-11-01T20:00:00Z");
        assert!(c.matches(&r, chrono_tz::Asia::Kolkata));
        assert!(!c.matches(&r, chrono_tz::UTC));
    }

    #[test]
    fn upcoming_is_strictly_after_now() {
        let now = DateTime::parse_from_rfc3339("2026-11-01T10:00:00Z").unwrap().with_timezone(&Utc);
        let q = EventQuery::upcoming(now, 3);
        assert!(!q.matches(&record("1", "a", None, "p", "f", "2026-11-01T10:00:00Z")));
        assert!(q.matches(&record("2", "a", None, "p", "f", "2026-11-01T10:00:01Z")));
    }

    #[test]
    fn query_string_for_filters() {
        let c = EventFilterCriteria {
            presenter: Some("Arun".into()),
            start_date: NaiveDate::from_ymd_opt(2026, 11, 1),
            ..criteria()
        };
        let qs = EventQuery::from_criteria(&c, chrono_tz::UTC).to_query_string();
        assert_eq!(
            qs,
            "select=%2A&order=start_date.asc&presenter=ilike.%2AArun%2A&start_date=gte.2026-11-01T00%3A00%3A00.000Z"
        );
    }

    #[test]
    fn search_becomes_a_quoted_or_group() {
        let q = EventQuery { search: Some("ux, ui".into()), ..EventQuery::default() };
        let qs = q.to_query_string();
        let or = qs.split('&').find(|p| p.starts_with("or=")).unwrap();
        let decoded = urlencoding::decode(or.trim_start_matches("or=")).unwrap();
        assert_eq!(
            decoded,
            r#"(title.ilike."*ux, ui*",description.ilike."*ux, ui*",presenter.ilike."*ux, ui*",format.ilike."*ux, ui*")"#
        );
    }

    #[test]
    fn projected_events_filter_like_rows() {
        let r = record("1", "Grids", Some("Layout fundamentals"), "Arun Kumar", "Live Session", "2026-11-01T10:00:00Z");
        let display = EventDisplay::project(&r, chrono_tz::UTC);
        let c = EventFilterCriteria {
            search: Some("layout".into()),
            end_date: NaiveDate::from_ymd_opt(2026, 11, 1),
            ..criteria()
        };
        assert!(c.matches(&display, chrono_tz::UTC));
        assert!(c.matches(&r, chrono_tz::UTC));
    }

    #[test]
    fn lookup_by_id_is_limited() {
        let qs = EventQuery::by_id("42").to_query_string();
        assert!(qs.contains("id=eq.42"));
        assert!(qs.ends_with("limit=1"));
    }

    #[test]
    fn like_wildcards_in_terms_are_literal() {
        let q = EventQuery {
            presenter: Some("a_b".into()),
            search: Some("100%".into()),
            ..EventQuery::default()
        };
        let qs = q.to_query_string();
        let param = |name: &str| {
            let raw = qs.split('&').find(|p| p.starts_with(name)).unwrap();
            urlencoding::decode(&raw[name.len()..]).unwrap().into_owned()
        };
        assert_eq!(param("presenter="), r"ilike.*a\_b*");
        assert!(param("or=").starts_with(r#"(title.ilike."*100\\%*","#));

        let r = record("1", "1000 screens", None, "axb", "f", "2026-11-01T10:00:00Z");
        assert!(!q.matches(&r));
        let r = record("2", "100% pixel perfect", None, "Sara_b", "f", "2026-11-01T10:00:00Z");
        assert!(q.matches(&r));
    }

    #[test]
    fn midnight_dst_gap_keeps_the_bound() {
        // Santiago skips 00:00-01:00 local on 2024-09-08.
        let c = EventFilterCriteria { start_date: NaiveDate::from_ymd_opt(2024, 9, 8), ..criteria() };
        let q = EventQuery::from_criteria(&c, chrono_tz::America::Santiago);
        let expected = DateTime::parse_from_rfc3339("2024-09-08T04:00:00Z").unwrap().with_timezone(&Utc);
        assert_eq!(q.starts_from, Some(expected));

        let before = record("1", "a", None, "p", "f", "2024-09-08T03:30:00Z");
        assert!(!c.matches(&before, chrono_tz::America::Santiago));
    }
}
