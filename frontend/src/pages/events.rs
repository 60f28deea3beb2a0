use std::collections::HashSet;
use std::rc::Rc;

use chrono::NaiveDate;
use gloo_timers::callback::Timeout;
use log::{debug, info};
use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::event_card::EventCard;
use crate::context::SiteContext;
use crate::events::catalog::{sort_by_date, QuerySequencer, SortDirection};
use crate::events::model::EventDisplay;
use crate::events::query::EventFilterCriteria;

const SEARCH_DEBOUNCE_MS: u32 = 300;
const FORMATS: [&str; 3] = ["Virtual Workshop", "Live Session", "Webinar"];

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Anonymous id kept in local storage, used as the attendee's user id.
fn visitor_id() -> String {
    let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
    if let Some(existing) = storage.as_ref().and_then(|s| s.get_item("visitor_id").ok().flatten()) {
        return existing;
    }
    let id = format!("visitor-{}", chrono::Utc::now().timestamp_millis());
    if let Some(storage) = storage {
        if let Err(e) = storage.set_item("visitor_id", &id) {
            debug!("Could not persist visitor id: {:?}", e);
        }
    }
    id
}

/// Event ids this visitor has reserved a seat for.
#[derive(Default, PartialEq)]
struct Registrations(HashSet<String>);

impl Registrations {
    fn contains(&self, event_id: &str) -> bool {
        self.0.contains(event_id)
    }
}

impl Reducible for Registrations {
    type Action = String;

    fn reduce(self: Rc<Self>, event_id: String) -> Rc<Self> {
        if self.contains(&event_id) {
            return self;
        }
        let mut next = self.0.clone();
        next.insert(event_id);
        Rc::new(Self(next))
    }
}

#[function_component(Events)]
pub fn events() -> Html {
    let site = use_context::<SiteContext>();
    let search_text = use_state(String::new);
    let search = use_state(|| None::<String>);
    let presenter = use_state(|| None::<String>);
    let format = use_state(|| None::<String>);
    let start_date = use_state(|| None::<NaiveDate>);
    let end_date = use_state(|| None::<NaiveDate>);
    let direction = use_state(|| SortDirection::Ascending);
    let results = use_state(Vec::<EventDisplay>::new);
    let is_loading = use_state(|| true);
    let registered = use_reducer(Registrations::default);
    let sequencer = use_mut_ref(QuerySequencer::default);
    let debounce = use_mut_ref(|| None::<Timeout>);

    let criteria = EventFilterCriteria {
        search: (*search).clone(),
        presenter: (*presenter).clone(),
        format: (*format).clone(),
        start_date: *start_date,
        end_date: *end_date,
    };

    {
        let results = results.clone();
        let is_loading = is_loading.clone();
        let sequencer = sequencer.clone();
        use_effect_with_deps(
            move |(criteria, site): &(EventFilterCriteria, Option<SiteContext>)| {
                if let Some(site) = site.clone() {
                    let criteria = criteria.clone();
                    let tag = sequencer.borrow().issue();
                    is_loading.set(true);

                    // Narrow what is already on screen while the store answers.
                    let tz = site.catalog.timezone();
                    results.set(results.iter().filter(|e| criteria.matches(*e, tz)).cloned().collect());

                    spawn_local(async move {
                        let events = site.catalog.list_events(&criteria).await;
                        if !sequencer.borrow().is_current(tag) {
                            info!("Dropping stale events response #{}", tag);
                            return;
                        }
                        results.set(events);
                        is_loading.set(false);
                    });
                }
                || ()
            },
            (criteria.clone(), site.clone()),
        );
    }

    let on_search = {
        let search_text = search_text.clone();
        let search = search.clone();
        let debounce = debounce.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            search_text.set(value.clone());
            let search = search.clone();
            // replacing the handle cancels the pending timeout
            *debounce.borrow_mut() = Some(Timeout::new(SEARCH_DEBOUNCE_MS, move || {
                search.set(non_empty(value));
            }));
        })
    };

    let on_presenter = {
        let presenter = presenter.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            presenter.set(non_empty(input.value()));
        })
    };

    let on_format = {
        let format = format.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            format.set(non_empty(select.value()));
        })
    };

    let on_start = {
        let start_date = start_date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            start_date.set(parse_date(&input.value()));
        })
    };

    let on_end = {
        let end_date = end_date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            end_date.set(parse_date(&input.value()));
        })
    };

    let toggle_sort = {
        let direction = direction.clone();
        Callback::from(move |_: MouseEvent| direction.set(direction.toggled()))
    };

    let clear_filters = {
        let search_text = search_text.clone();
        let search = search.clone();
        let presenter = presenter.clone();
        let format = format.clone();
        let start_date = start_date.clone();
        let end_date = end_date.clone();
        let debounce = debounce.clone();
        Callback::from(move |_: MouseEvent| {
            debounce.borrow_mut().take();
            search_text.set(String::new());
            search.set(None);
            presenter.set(None);
            format.set(None);
            start_date.set(None);
            end_date.set(None);
        })
    };

    let on_register = {
        let site = site.clone();
        let registered = registered.clone();
        Callback::from(move |event_id: String| {
            let Some(site) = site.clone() else {
                return;
            };
            let registered = registered.dispatcher();
            spawn_local(async move {
                if site.catalog.register_attendee(&event_id, &visitor_id()).await {
                    site.analytics.event("event_register", json!({ "event_id": event_id }));
                    registered.dispatch(event_id);
                }
            });
        })
    };

    let mut shown = (*results).clone();
    sort_by_date(&mut shown, *direction);

    html! {
        <div class="events-page">
            <section class="events-hero">
                <h1>{"Events"}</h1>
                <p>{"Workshops, live sessions and webinars from the community."}</p>
            </section>

            <section class="event-filters">
                <input
                    type="search"
                    class="filter-search"
                    placeholder="Search events"
                    value={(*search_text).clone()}
                    oninput={on_search}
                />
                <input
                    type="text"
                    placeholder="Presenter"
                    value={(*presenter).clone().unwrap_or_default()}
                    onchange={on_presenter}
                />
                <select onchange={on_format}>
                    <option value="" selected={format.is_none()}>{"Any format"}</option>
                    {
                        FORMATS.iter().map(|f| html! {
                            <option value={*f} selected={format.as_deref() == Some(*f)}>{*f}</option>
                        }).collect::<Html>()
                    }
                </select>
                <label>
                    {"From"}
                    <input
                        type="date"
                        value={start_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()}
                        onchange={on_start}
                    />
                </label>
                <label>
                    {"To"}
                    <input
                        type="date"
                        value={end_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()}
                        onchange={on_end}
                    />
                </label>
                <button class="sort-toggle" onclick={toggle_sort}>{direction.label()}</button>
                if !criteria.is_empty() {
                    <button class="clear-filters" onclick={clear_filters}>{"Clear"}</button>
                }
            </section>

            <section class="event-grid">
                {
                    if *is_loading && shown.is_empty() {
                        html! { <p class="events-status">{"Loading events..."}</p> }
                    } else if shown.is_empty() {
                        html! { <p class="events-status">{"No events match your filters."}</p> }
                    } else {
                        shown.iter().map(|event| html! {
                            <EventCard
                                key={event.id.clone()}
                                event={event.clone()}
                                on_register={on_register.clone()}
                                registered={registered.contains(&event.id)}
                            />
                        }).collect::<Html>()
                    }
                }
            </section>

            <style>
                {r#"
                .events-page {
                    padding-top: 74px;
                    min-height: 100vh;
                    background: #161616;
                    color: #fff;
                }

                .events-hero {
                    text-align: center;
                    padding: 4rem 2rem 2rem;
                }

                .events-hero h1 {
                    font-size: 3rem;
                    background: linear-gradient(45deg, #fff, #ff8a4c);
                    -webkit-background-clip: text;
                    -webkit-text-fill-color: transparent;
                }

                .event-filters {
                    display: flex;
                    flex-wrap: wrap;
                    gap: 0.75rem;
                    justify-content: center;
                    max-width: 1100px;
                    margin: 0 auto;
                    padding: 0 2rem;
                }

                .event-filters input, .event-filters select, .event-filters button {
                    padding: 0.6rem 0.9rem;
                    border-radius: 8px;
                    border: 1px solid rgba(255, 255, 255, 0.15);
                    background: rgba(0, 0, 0, 0.3);
                    color: #fff;
                }

                .event-filters label {
                    display: flex;
                    align-items: center;
                    gap: 0.4rem;
                    color: rgba(255, 255, 255, 0.7);
                }

                .filter-search {
                    flex: 1 1 240px;
                }

                .event-grid {
                    display: grid;
                    grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
                    gap: 1.5rem;
                    max-width: 1100px;
                    margin: 0 auto;
                    padding: 2rem;
                }

                .event-card {
                    background: rgba(30, 30, 30, 0.7);
                    border: 1px solid rgba(255, 138, 76, 0.1);
                    border-radius: 16px;
                    overflow: hidden;
                }

                .event-card-image {
                    position: relative;
                }

                .event-card-image img {
                    width: 100%;
                    height: 160px;
                    object-fit: cover;
                }

                .event-discount {
                    position: absolute;
                    top: 0.75rem;
                    left: 0.75rem;
                    background: #ff5f8f;
                    padding: 0.25rem 0.6rem;
                    border-radius: 999px;
                    font-size: 0.8rem;
                    font-weight: 600;
                }

                .event-card-body {
                    padding: 1.25rem;
                }

                .event-title {
                    display: block;
                    color: #fff;
                    font-size: 1.2rem;
                    font-weight: 600;
                    margin: 0.5rem 0;
                    text-decoration: none;
                }

                .event-format, .event-presenter, .event-when {
                    color: rgba(255, 255, 255, 0.65);
                    font-size: 0.9rem;
                }

                .event-original-price {
                    margin-left: 0.5rem;
                    text-decoration: line-through;
                    color: rgba(255, 255, 255, 0.4);
                }

                .event-seats {
                    margin-left: auto;
                    font-size: 0.85rem;
                    color: #ff8a4c;
                }

                .event-pricing {
                    display: flex;
                    align-items: baseline;
                }

                .event-register {
                    margin-top: 1rem;
                    width: 100%;
                    padding: 0.7rem;
                    border: none;
                    border-radius: 8px;
                    background: #ff8a4c;
                    color: #fff;
                    cursor: pointer;
                }

                .event-register:disabled {
                    background: rgba(255, 255, 255, 0.15);
                    cursor: default;
                }

                .events-status {
                    grid-column: 1 / -1;
                    text-align: center;
                    color: rgba(255, 255, 255, 0.6);
                }
                "#}
            </style>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registrations_accumulate_across_dispatches() {
        let state = Rc::new(Registrations::default());
        // two reservations resolving one after the other
        let state = state.reduce("a".to_string());
        let state = state.reduce("b".to_string());
        assert!(state.contains("a"));
        assert!(state.contains("b"));
    }

    #[test]
    fn repeated_registration_keeps_state() {
        let state = Rc::new(Registrations::default()).reduce("a".to_string());
        let again = state.clone().reduce("a".to_string());
        assert!(Rc::ptr_eq(&state, &again));
    }
}
