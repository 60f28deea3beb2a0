use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlFormElement, HtmlInputElement, KeyboardEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::context::SiteContext;
use crate::lead::form::{FormPhase, LeadForm, LeadFormAction, SubmitAttempt};
use crate::lead::submit::deliver;
use crate::lead::validation::Field;

#[derive(Properties, PartialEq)]
pub struct JoinModalProps {
    pub on_close: Callback<()>,
}

struct InputConfig {
    field: Field,
    label: &'static str,
    input_type: &'static str,
    placeholder: &'static str,
    pattern: Option<&'static str>,
}

const FIELDS: [InputConfig; 4] = [
    InputConfig {
        field: Field::Name,
        label: "Full name",
        input_type: "text",
        placeholder: "Your name",
        pattern: Some(r"[A-Za-z\s]{2,}"),
    },
    InputConfig {
        field: Field::Email,
        label: "Email",
        input_type: "email",
        placeholder: "you@studio.com",
        pattern: None,
    },
    InputConfig {
        field: Field::Mobile,
        label: "Mobile number",
        input_type: "tel",
        placeholder: "10-digit mobile number",
        pattern: Some("[0-9]{10}"),
    },
    InputConfig {
        field: Field::Linkedin,
        label: "LinkedIn (optional)",
        input_type: "url",
        placeholder: "https://linkedin.com/in/you",
        pattern: None,
    },
];

/// The "join community" popover. Mounted only while open, so every open starts a fresh form.
#[function_component(JoinModal)]
pub fn join_modal(props: &JoinModalProps) -> Html {
    let site = use_context::<SiteContext>();
    let form = use_reducer(LeadForm::default);
    let form_ref = use_node_ref();
    let panel_ref = use_node_ref();

    {
        let on_close = props.on_close.clone();
        use_click_away(panel_ref.clone(), move |_: Event| on_close.emit(()));
    }
    {
        let on_close = props.on_close.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                on_close.emit(());
            }
        });
    }

    let on_submit = {
        let form = form.clone();
        let form_ref = form_ref.clone();
        let site = site.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let element = form_ref.cast::<HtmlFormElement>();
            let native_valid = element.as_ref().map_or(true, |f| f.check_validity());

            match form.preview_submit(native_valid) {
                SubmitAttempt::Ignored => {}
                SubmitAttempt::Rejected => {
                    form.dispatch(LeadFormAction::Submit { native_valid });
                    if let Some(f) = element {
                        f.report_validity();
                    }
                }
                SubmitAttempt::Started(lead) => {
                    let Some(site) = site.clone() else {
                        log::error!("Join form rendered without site context");
                        return;
                    };
                    form.dispatch(LeadFormAction::Submit { native_valid });
                    let dispatcher = form.dispatcher();
                    spawn_local(async move {
                        let completion = deliver(&*site.webhook, &lead).await;
                        if completion.delivered {
                            site.analytics.event("lead_submitted", json!({}));
                        } else {
                            site.analytics.event("lead_submit_failed", json!({}));
                        }
                        dispatcher.dispatch(LeadFormAction::Complete(completion));
                    });
                }
            }
        })
    };

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let body = match form.phase() {
        FormPhase::Completed(done) => html! {
            <div class="join-complete">
                <h2>{"You're in!"}</h2>
                <p>{&done.message}</p>
                <a class="whatsapp-button" href={done.whatsapp_link.clone()} target="_blank" rel="noopener noreferrer">
                    {"Join the WhatsApp community"}
                </a>
            </div>
        },
        phase => {
            let submitting = *phase == FormPhase::Submitting;
            html! {
                <form ref={form_ref} class="join-form" onsubmit={on_submit}>
                    <h2>{"Join the Design Circle"}</h2>
                    <p class="join-subtitle">{"Workshops, portfolio reviews and a community that ships."}</p>
                    { for FIELDS.iter().map(|input| render_field(input, &form, submitting)) }
                    <button type="submit" class="join-submit" disabled={submitting}>
                        { if submitting { "Submitting..." } else { "Join now" } }
                    </button>
                </form>
            }
        }
    };

    html! {
        <div class="join-overlay">
            <div class="join-panel" ref={panel_ref}>
                <button class="join-close" onclick={close} aria-label="Close">{"✕"}</button>
                { body }
            </div>
            <style>
                {r#"
                .join-overlay {
                    position: fixed;
                    inset: 0;
                    background: rgba(10, 10, 10, 0.7);
                    backdrop-filter: blur(6px);
                    display: flex;
                    align-items: center;
                    justify-content: center;
                    z-index: 100;
                }
                .join-panel {
                    position: relative;
                    width: 100%;
                    max-width: 440px;
                    background: #1e1e1e;
                    border: 1px solid rgba(255, 138, 76, 0.2);
                    border-radius: 16px;
                    padding: 2.5rem;
                    color: #fff;
                }
                .join-close {
                    position: absolute;
                    top: 1rem;
                    right: 1rem;
                    background: none;
                    border: none;
                    color: rgba(255, 255, 255, 0.6);
                    font-size: 1.2rem;
                    cursor: pointer;
                }
                .join-form label {
                    display: block;
                    margin-top: 1rem;
                    font-size: 0.9rem;
                    color: rgba(255, 255, 255, 0.8);
                }
                .join-form input {
                    width: 100%;
                    padding: 0.75rem;
                    margin-top: 0.35rem;
                    border-radius: 8px;
                    border: 1px solid rgba(255, 255, 255, 0.15);
                    background: rgba(0, 0, 0, 0.3);
                    color: #fff;
                }
                .join-form input.invalid {
                    border-color: #ff6b6b;
                }
                .field-error {
                    color: #ff6b6b;
                    font-size: 0.8rem;
                    margin-top: 0.25rem;
                }
                .join-submit, .whatsapp-button {
                    display: inline-block;
                    margin-top: 1.5rem;
                    width: 100%;
                    padding: 0.9rem;
                    border: none;
                    border-radius: 8px;
                    background: linear-gradient(45deg, #ff8a4c, #ff5f8f);
                    color: #fff;
                    font-weight: 600;
                    text-align: center;
                    text-decoration: none;
                    cursor: pointer;
                }
                .join-submit:disabled {
                    opacity: 0.6;
                    cursor: wait;
                }
                .whatsapp-button {
                    background: #25d366;
                }
                "#}
            </style>
        </div>
    }
}

fn render_field(input: &InputConfig, form: &UseReducerHandle<LeadForm>, submitting: bool) -> Html {
    let field = input.field;
    let state = form.field(field);
    let value = form.draft().get(field).to_string();

    let oninput = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.dispatch(LeadFormAction::Update(field, input.value()));
        })
    };
    let onblur = {
        let form = form.clone();
        Callback::from(move |e: FocusEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.dispatch(LeadFormAction::Blur(field, input.value()));
        })
    };

    let error = if state.touched { state.error } else { None };

    html! {
        <label>
            {input.label}
            <input
                name={field.input_name()}
                type={input.input_type}
                placeholder={input.placeholder}
                pattern={input.pattern}
                required={field.is_required()}
                disabled={submitting}
                class={classes!(error.is_some().then(|| "invalid"))}
                value={value}
                oninput={oninput}
                onblur={onblur}
            />
            if let Some(message) = error {
                <div class="field-error">{message}</div>
            }
        </label>
    }
}
