use yew::prelude::*;
use web_sys::MouseEvent;
use yew::{Children, Properties};

#[derive(Properties, PartialEq)]
struct FaqItemProps {
    question: String,
    children: Children,
}

#[function_component(FaqItem)]
fn faq_item(props: &FaqItemProps) -> Html {
    let is_open = use_state(|| false);

    let toggle = {
        let is_open = is_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            is_open.set(!*is_open);
        })
    };

    html! {
        <div class={classes!("faq-item", if *is_open { "open" } else { "" })}>
            <button class="faq-question" onclick={toggle}>
                <span class="question-text">{&props.question}</span>
                <span class="toggle-icon">{if *is_open { "−" } else { "+" }}</span>
            </button>
            <div class="faq-answer">
                { for props.children.iter() }
            </div>
        </div>
    }
}

#[function_component(FaqSection)]
pub fn faq_section() -> Html {
    html! {
        <section class="faq-section" id="faq">
            <h2>{"Frequently Asked Questions"}</h2>

            <FaqItem question="Who is the Design Circle for?">
                <p>
                    {"Product, UI and visual designers at any stage. Students sit next to design leads in our sessions, and both get something out of it."}
                </p>
            </FaqItem>

            <FaqItem question="Is joining the community free?">
                <p>
                    {"Yes. Joining gets you into the WhatsApp community, weekly prompts and the monthly portfolio jam. Some workshops are paid and always listed with their price up front."}
                </p>
            </FaqItem>

            <FaqItem question="What happens after I fill in the join form?">
                <p>
                    {"You'll get a link to our WhatsApp community straight away. A community host says hello within a day and points you to the next beginner-friendly session."}
                </p>
            </FaqItem>

            <FaqItem question="Are workshops recorded?">
                <p>
                    {"Virtual workshops are recorded and shared with everyone who reserved a seat. Live sessions and portfolio reviews are not recorded so people can share work in progress."}
                </p>
            </FaqItem>

            <FaqItem question="Why do you ask for my LinkedIn?">
                <p>
                    {"It's optional. We use it to pair people for mentoring and to invite presenters, nothing else."}
                </p>
            </FaqItem>

            <style>
                {r#"
                .faq-section {
                    max-width: 800px;
                    margin: 0 auto;
                    padding: 4rem 2rem;
                }

                .faq-section h2 {
                    font-size: 2rem;
                    margin-bottom: 2rem;
                    text-align: center;
                    background: linear-gradient(45deg, #fff, #ff8a4c);
                    -webkit-background-clip: text;
                    -webkit-text-fill-color: transparent;
                }

                .faq-item {
                    border-bottom: 1px solid rgba(255, 255, 255, 0.1);
                }

                .faq-question {
                    width: 100%;
                    display: flex;
                    justify-content: space-between;
                    align-items: center;
                    padding: 1.25rem 0;
                    background: none;
                    border: none;
                    color: #fff;
                    font-size: 1.1rem;
                    text-align: left;
                    cursor: pointer;
                }

                .faq-answer {
                    max-height: 0;
                    overflow: hidden;
                    transition: max-height 0.3s ease;
                    color: rgba(255, 255, 255, 0.75);
                    line-height: 1.6;
                }

                .faq-item.open .faq-answer {
                    max-height: 400px;
                    padding-bottom: 1.25rem;
                }
                "#}
            </style>
        </section>
    }
}
