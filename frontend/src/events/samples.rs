use crate::events::model::EventRecord;

fn sample(
    id: &str,
    title: &str,
    description: &str,
    start_date: &str,
    presenter: &str,
    duration: u32,
    format: &str,
    price: f64,
    original_price: f64,
) -> EventRecord {
    let discount = ((original_price - price) / original_price * 100.0).round();
    EventRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(description.to_string()),
        start_date: start_date.to_string(),
        presenter: presenter.to_string(),
        duration,
        format: format.to_string(),
        image_path: Some(format!("/assets/events/sample-{}.jpg", id)),
        price: Some(price),
        original_price: Some(original_price),
        discount_percentage: Some(discount),
        available_seats: Some(40),
    }
}

/// Shown in the landing page's upcoming section when the store has nothing to offer.
pub fn sample_events() -> Vec<EventRecord> {
    vec![
        sample(
            "sample-1",
            "Design Systems from Scratch",
            "Build a token-driven component library and hand it off without the usual drift.",
            "2026-11-21T12:30:00Z",
            "Arun Kumar",
            90,
            "Virtual Workshop",
            499.0,
            999.0,
        ),
        sample(
            "sample-2",
            "Portfolio Teardown",
            "Live reviews of community portfolios with concrete fixes you can ship this week.",
            "2026-11-28T13:30:00Z",
            "Meera Shah",
            60,
            "Live Session",
            199.0,
            399.0,
        ),
        sample(
            "sample-3",
            "Motion for Product Designers",
            "Prototype micro-interactions that developers can actually implement.",
            "2026-12-05T12:30:00Z",
            "Kabir Rao",
            120,
            "Virtual Workshop",
            799.0,
            1499.0,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::model::EventDisplay;

    #[test]
    fn samples_project_cleanly() {
        let displays: Vec<EventDisplay> = sample_events()
            .iter()
            .map(|r| EventDisplay::project(r, chrono_tz::Asia::Kolkata))
            .collect();
        assert_eq!(displays.len(), 3);
        assert!(displays.iter().all(|d| d.starts_at.is_some() && !d.time.is_empty()));
        assert_eq!(displays[0].discount.as_deref(), Some("50% OFF"));
    }
}
