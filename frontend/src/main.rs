use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};
use web_sys::MouseEvent;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

mod analytics;
mod config;
mod context;
mod error;
mod lead {
    pub mod form;
    pub mod submit;
    pub mod validation;
}
mod events {
    pub mod catalog;
    pub mod model;
    pub mod query;
    pub mod samples;
    pub mod store;
}
mod components {
    pub mod event_card;
    pub mod join_modal;
}
mod pages {
    pub mod event_detail;
    pub mod events;
    pub mod faq;
    pub mod landing;
}

use components::join_modal::JoinModal;
use config::SiteConfig;
use context::SiteContext;
use pages::{
    event_detail::EventDetail,
    events::Events,
    landing::Landing,
};


#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/events")]
    Events,
    #[at("/events/:id")]
    EventDetail { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}


fn switch(routes: Route, on_join: &Callback<()>) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Landing on_join={on_join.clone()} /> }
        },
        Route::Events => {
            info!("Rendering Events page");
            html! { <Events /> }
        },
        Route::EventDetail { id } => {
            info!("Rendering Event page {}", id);
            html! { <EventDetail id={id} on_join={on_join.clone()} /> }
        },
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! {
                <div class="not-found">
                    <h1>{"Page not found"}</h1>
                    <Link<Route> to={Route::Home} classes="see-all">{"Back home"}</Link<Route>>
                </div>
            }
        },
    }
}


#[derive(Properties, PartialEq)]
pub struct NavProps {
    pub on_join: Callback<()>,
}

#[function_component(Nav)]
pub fn nav(props: &NavProps) -> Html {
    let menu_open = use_state(|| false);
    let is_scrolled = use_state(|| false);

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(move |_| {
            let window = web_sys::window();
            let scroll_callback = Closure::wrap(Box::new(move || {
                if let Some(scroll_y) = web_sys::window().and_then(|w| w.scroll_y().ok()) {
                    is_scrolled.set(scroll_y > 80.0);
                }
            }) as Box<dyn FnMut()>);

            if let Some(window) = &window {
                let _ = window.add_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref());
            }

            move || {
                if let Some(window) = window {
                    let _ = window.remove_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref());
                }
            }
        }, ());
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    let join = {
        let menu_open = menu_open.clone();
        let on_join = props.on_join.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(false);
            on_join.emit(());
        })
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav class={classes!("top-nav", (*is_scrolled).then(|| "scrolled"))}>
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"design circle"}
                </Link<Route>>

                <button class="burger-menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    <div onclick={close_menu.clone()}>
                        <Link<Route> to={Route::Events} classes="nav-link">
                            {"Events"}
                        </Link<Route>>
                    </div>
                    <div onclick={close_menu}>
                        <a href="/#faq" class="nav-link">{"FAQ"}</a>
                    </div>
                    <button class="nav-join-button" onclick={join}>
                        {"Join community"}
                    </button>
                </div>
            </div>
            <style>
                {r#"
                .top-nav {
                    position: fixed;
                    top: 0;
                    width: 100%;
                    z-index: 50;
                    transition: background 0.3s ease;
                }
                .top-nav.scrolled {
                    background: rgba(22, 22, 22, 0.9);
                    backdrop-filter: blur(8px);
                }
                .nav-content {
                    display: flex;
                    justify-content: space-between;
                    align-items: center;
                    max-width: 1100px;
                    margin: 0 auto;
                    padding: 1rem 2rem;
                }
                .nav-logo {
                    color: #fff;
                    font-weight: 700;
                    font-size: 1.3rem;
                    text-decoration: none;
                }
                .nav-right {
                    display: flex;
                    gap: 1.5rem;
                    align-items: center;
                }
                .nav-link {
                    color: rgba(255, 255, 255, 0.85);
                    text-decoration: none;
                }
                .nav-join-button {
                    padding: 0.6rem 1.2rem;
                    border: none;
                    border-radius: 999px;
                    background: linear-gradient(45deg, #ff8a4c, #ff5f8f);
                    color: #fff;
                    font-weight: 600;
                    cursor: pointer;
                }
                .burger-menu {
                    display: none;
                    flex-direction: column;
                    gap: 4px;
                    background: none;
                    border: none;
                    cursor: pointer;
                }
                .burger-menu span {
                    width: 24px;
                    height: 2px;
                    background: #fff;
                }
                @media (max-width: 768px) {
                    .burger-menu {
                        display: flex;
                    }
                    .nav-right {
                        display: none;
                    }
                    .nav-right.mobile-menu-open {
                        display: flex;
                        flex-direction: column;
                        position: absolute;
                        top: 100%;
                        left: 0;
                        right: 0;
                        padding: 1.5rem;
                        background: rgba(22, 22, 22, 0.97);
                    }
                }
                "#}
            </style>
        </nav>
    }
}


/// Reports a page view whenever the path changes.
#[function_component(RouteTracker)]
fn route_tracker() -> Html {
    let site = use_context::<SiteContext>();
    let path = use_location().map(|l| l.path().to_string()).unwrap_or_default();

    use_effect_with_deps(
        move |path: &String| {
            if let Some(site) = site {
                site.analytics.page_view(path);
            }
            || ()
        },
        path,
    );

    html! {}
}


#[function_component]
fn App() -> Html {
    let site = use_state(|| SiteContext::from_config(SiteConfig::load()));
    let join_open = use_state(|| false);

    {
        let site = (*site).clone();
        use_effect_with_deps(move |_| {
            site.analytics.init();
            || ()
        }, ());
    }

    let open_join = {
        let join_open = join_open.clone();
        Callback::from(move |_: ()| join_open.set(true))
    };
    let close_join = {
        let join_open = join_open.clone();
        Callback::from(move |_: ()| join_open.set(false))
    };

    let render = {
        let open_join = open_join.clone();
        Callback::from(move |route: Route| switch(route, &open_join))
    };

    html! {
        <ContextProvider<SiteContext> context={(*site).clone()}>
            <BrowserRouter>
                <RouteTracker />
                <Nav on_join={open_join} />
                <Switch<Route> render={render} />
                if *join_open {
                    <JoinModal on_close={close_join} />
                }
            </BrowserRouter>
        </ContextProvider<SiteContext>>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
