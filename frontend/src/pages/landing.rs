use yew::prelude::*;
use yew_router::prelude::*;
use log::info;
use wasm_bindgen_futures::spawn_local;

use crate::components::event_card::EventCard;
use crate::context::SiteContext;
use crate::events::model::EventDisplay;
use crate::events::samples::sample_events;
use crate::pages::faq::FaqSection;
use crate::Route;

const UPCOMING_LIMIT: usize = 3;

const FEATURES: [(&str, &str, &str); 3] = [
    ("🎨", "Hands-on workshops", "Small virtual workshops run by designers who ship, with files you keep."),
    ("🧭", "Portfolio reviews", "Monthly teardown sessions where the community gives specific, kind feedback."),
    ("🤝", "Mentoring circles", "Get paired with someone a few steps ahead of you and meet every other week."),
];

const TESTIMONIALS: [(&str, &str, &str); 3] = [
    ("The portfolio jam got me two interview calls in a month. The feedback was blunt in the best way.", "Priya N.", "Product Designer"),
    ("I came for the Figma workshops and stayed for the people. It's the only group chat I don't mute.", "Rahul S.", "UI Designer"),
    ("As a self-taught designer this was the first place where nobody made me feel behind.", "Ananya K.", "Visual Designer"),
];

#[derive(Properties, PartialEq)]
pub struct LandingProps {
    pub on_join: Callback<()>,
}

#[function_component(Landing)]
pub fn landing(props: &LandingProps) -> Html {
    let site = use_context::<SiteContext>();
    let upcoming = use_state(Vec::<EventDisplay>::new);

    // Scroll to top only on initial mount
    {
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            (),
        );
    }

    {
        let upcoming = upcoming.clone();
        use_effect_with_deps(
            move |site: &Option<SiteContext>| {
                if let Some(site) = site.clone() {
                    spawn_local(async move {
                        let events = site.catalog.list_upcoming(UPCOMING_LIMIT).await;
                        if events.is_empty() {
                            info!("No upcoming events from store, showing samples");
                            let tz = site.catalog.timezone();
                            upcoming.set(
                                sample_events()
                                    .iter()
                                    .map(|r| EventDisplay::project(r, tz))
                                    .collect(),
                            );
                        } else {
                            upcoming.set(events);
                        }
                    });
                }
                || ()
            },
            site,
        );
    }

    let join = {
        let on_join = props.on_join.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_join.emit(());
        })
    };

    html! {
        <div class="landing">
            <section class="hero">
                <h1 class="hero-title">{"Design better, together."}</h1>
                <p class="hero-subtitle">
                    {"Design Circle is a community of designers who learn in public: workshops, portfolio reviews and mentoring, all in one place."}
                </p>
                <div class="hero-actions">
                    <button class="cta-button" onclick={join.clone()}>
                        <span>{"Join the community"}</span>
                        <i class="arrow">{"→"}</i>
                    </button>
                    <Link<Route> to={Route::Events} classes="secondary-button">
                        {"Browse events"}
                    </Link<Route>>
                </div>
            </section>

            <section class="main-features">
                {
                    FEATURES.iter().map(|(icon, title, text)| html! {
                        <div class="feature-card">
                            <span class="feature-icon">{*icon}</span>
                            <h3>{*title}</h3>
                            <p>{*text}</p>
                        </div>
                    }).collect::<Html>()
                }
            </section>

            <section class="upcoming-events">
                <div class="section-header">
                    <h2>{"Upcoming events"}</h2>
                    <Link<Route> to={Route::Events} classes="see-all">{"See all →"}</Link<Route>>
                </div>
                <div class="event-grid">
                    { for upcoming.iter().map(|event| html! { <EventCard key={event.id.clone()} event={event.clone()} /> }) }
                </div>
            </section>

            <section class="testimonials">
                <h2>{"What members say"}</h2>
                <div class="testimonial-grid">
                    {
                        TESTIMONIALS.iter().map(|(quote, name, role)| html! {
                            <blockquote class="testimonial">
                                <p>{format!("“{}”", quote)}</p>
                                <footer>
                                    <strong>{*name}</strong>
                                    <span>{*role}</span>
                                </footer>
                            </blockquote>
                        }).collect::<Html>()
                    }
                </div>
            </section>

            <FaqSection />

            <section class="final-cta">
                <h2>{"Your next design friend is already here."}</h2>
                <button class="cta-button" onclick={join}>
                    <span>{"Join the community"}</span>
                    <i class="arrow">{"→"}</i>
                </button>
            </section>

            <style>
                {r#"
                .landing {
                    min-height: 100vh;
                    background: #161616;
                    color: #ffffff;
                    overflow-x: hidden;
                }

                .hero {
                    padding: 10rem 2rem 6rem;
                    text-align: center;
                }

                .hero-title {
                    font-size: 4rem;
                    font-weight: 700;
                    background: linear-gradient(45deg, #fff, #ff8a4c);
                    -webkit-background-clip: text;
                    -webkit-text-fill-color: transparent;
                }

                .hero-subtitle {
                    max-width: 640px;
                    margin: 1.5rem auto 2.5rem;
                    color: rgba(255, 255, 255, 0.8);
                    font-size: 1.2rem;
                    line-height: 1.6;
                }

                .hero-actions {
                    display: flex;
                    gap: 1rem;
                    justify-content: center;
                    flex-wrap: wrap;
                }

                .cta-button {
                    display: inline-flex;
                    align-items: center;
                    gap: 0.5rem;
                    padding: 1rem 2rem;
                    border: none;
                    border-radius: 999px;
                    background: linear-gradient(45deg, #ff8a4c, #ff5f8f);
                    color: #fff;
                    font-size: 1rem;
                    font-weight: 600;
                    cursor: pointer;
                }

                .secondary-button {
                    padding: 1rem 2rem;
                    border-radius: 999px;
                    border: 1px solid rgba(255, 255, 255, 0.3);
                    color: #fff;
                    text-decoration: none;
                }

                .main-features, .testimonial-grid, .event-grid {
                    display: grid;
                    grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
                    gap: 1.5rem;
                    max-width: 1100px;
                    margin: 0 auto;
                    padding: 2rem;
                }

                .feature-card, .testimonial, .event-card {
                    background: rgba(30, 30, 30, 0.7);
                    border: 1px solid rgba(255, 138, 76, 0.1);
                    border-radius: 16px;
                    padding: 1.5rem;
                }

                .feature-icon {
                    font-size: 2rem;
                }

                .upcoming-events, .testimonials, .final-cta {
                    padding: 4rem 0;
                }

                .section-header {
                    display: flex;
                    justify-content: space-between;
                    align-items: baseline;
                    max-width: 1100px;
                    margin: 0 auto;
                    padding: 0 2rem;
                }

                .see-all {
                    color: #ff8a4c;
                    text-decoration: none;
                }

                .testimonials h2, .final-cta {
                    text-align: center;
                }

                .testimonial footer {
                    display: flex;
                    flex-direction: column;
                    margin-top: 1rem;
                    color: rgba(255, 255, 255, 0.6);
                }

                @media (max-width: 768px) {
                    .hero-title {
                        font-size: 2.5rem;
                    }
                }
                "#}
            </style>
        </div>
    }
}
