use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::context::SiteContext;
use crate::events::model::EventDisplay;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct EventDetailProps {
    pub id: String,
    pub on_join: Callback<()>,
}

enum Lookup {
    Loading,
    Missing,
    Found(EventDisplay),
}

#[function_component(EventDetail)]
pub fn event_detail(props: &EventDetailProps) -> Html {
    let site = use_context::<SiteContext>();
    let lookup = use_state(|| Lookup::Loading);

    {
        let lookup = lookup.clone();
        use_effect_with_deps(
            move |(id, site): &(String, Option<SiteContext>)| {
                lookup.set(Lookup::Loading);
                match site.clone() {
                    Some(site) => {
                        let id = id.clone();
                        spawn_local(async move {
                            match site.catalog.get_event(&id).await {
                                Some(event) => lookup.set(Lookup::Found(event)),
                                None => lookup.set(Lookup::Missing),
                            }
                        });
                    }
                    None => lookup.set(Lookup::Missing),
                }
                || ()
            },
            (props.id.clone(), site),
        );
    }

    let join = {
        let on_join = props.on_join.clone();
        Callback::from(move |_: MouseEvent| on_join.emit(()))
    };

    let body = match &*lookup {
        Lookup::Loading => html! { <p class="events-status">{"Loading event..."}</p> },
        Lookup::Missing => html! {
            <div class="event-missing">
                <p>{"We couldn't find that event. It may have ended or been rescheduled."}</p>
                <Link<Route> to={Route::Events} classes="see-all">{"Back to all events"}</Link<Route>>
            </div>
        },
        Lookup::Found(event) => html! {
            <article class="event-detail">
                if let Some(image) = &event.image_path {
                    <img class="event-detail-image" src={image.clone()} alt={event.title.clone()} />
                }
                <span class="event-format">{&event.format}</span>
                <h1>{&event.title}</h1>
                <p class="event-presenter">{"Presented by "}{&event.presenter}</p>
                <p class="event-when">{&event.date}{" · "}{&event.time}{" · "}{&event.duration}</p>
                if let Some(description) = &event.description {
                    <p class="event-description">{description}</p>
                }
                <div class="event-pricing">
                    if let Some(price) = &event.price {
                        <span class="event-price">{price}</span>
                    }
                    if let Some(original) = &event.original_price {
                        <span class="event-original-price">{original}</span>
                    }
                    if let Some(discount) = &event.discount {
                        <span class="event-discount-inline">{discount}</span>
                    }
                </div>
                <button class="cta-button" onclick={join}>{"Join the community to attend"}</button>
            </article>
        },
    };

    html! {
        <div class="event-detail-page">
            { body }
            <style>
                {r#"
                .event-detail-page {
                    padding: 8rem 2rem 4rem;
                    min-height: 100vh;
                    background: #161616;
                    color: #fff;
                }

                .event-detail, .event-missing {
                    max-width: 720px;
                    margin: 0 auto;
                }

                .event-detail-image {
                    width: 100%;
                    border-radius: 16px;
                    margin-bottom: 1.5rem;
                }

                .event-description {
                    line-height: 1.7;
                    color: rgba(255, 255, 255, 0.8);
                }

                .event-discount-inline {
                    margin-left: 0.75rem;
                    color: #ff5f8f;
                    font-weight: 600;
                }
                "#}
            </style>
        </div>
    }
}
