use yew::prelude::*;
use yew_router::prelude::*;

use crate::events::model::EventDisplay;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct EventCardProps {
    pub event: EventDisplay,
    #[prop_or_default]
    pub on_register: Option<Callback<String>>,
    #[prop_or_default]
    pub registered: bool,
}

#[function_component(EventCard)]
pub fn event_card(props: &EventCardProps) -> Html {
    let event = &props.event;
    let image = event
        .image_path
        .clone()
        .unwrap_or_else(|| "/assets/events/placeholder.jpg".to_string());

    let register = props.on_register.as_ref().map(|on_register| {
        let on_register = on_register.clone();
        let id = event.id.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_register.emit(id.clone());
        })
    });

    html! {
        <article class="event-card">
            <div class="event-card-image">
                <img src={image} alt={event.title.clone()} />
                if let Some(discount) = &event.discount {
                    <span class="event-discount">{discount}</span>
                }
            </div>
            <div class="event-card-body">
                <span class="event-format">{&event.format}</span>
                <Link<Route> to={Route::EventDetail { id: event.id.clone() }} classes="event-title">
                    {&event.title}
                </Link<Route>>
                <p class="event-presenter">{"with "}{&event.presenter}</p>
                <p class="event-when">
                    {&event.date}
                    if !event.time.is_empty() {
                        {" · "}{&event.time}
                    }
                    {" · "}{&event.duration}
                </p>
                <div class="event-pricing">
                    if let Some(price) = &event.price {
                        <span class="event-price">{price}</span>
                    }
                    if let Some(original) = &event.original_price {
                        <span class="event-original-price">{original}</span>
                    }
                    if let Some(seats) = event.available_seats {
                        <span class="event-seats">{format!("{} seats left", seats)}</span>
                    }
                </div>
                if let Some(onclick) = register {
                    <button class="event-register" onclick={onclick} disabled={props.registered}>
                        { if props.registered { "Reserved" } else { "Reserve a seat" } }
                    </button>
                }
            </div>
        </article>
    }
}
