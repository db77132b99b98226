use super::{
    dom::Debouncer,
    reveal::{Reveal, SectionHeader},
};
use crate::{
    contact::{deliver, ContactForm, Field, SimulatedTransport},
    timing::INPUT_DEBOUNCE_MS,
};
use gloo_timers::callback::Timeout;
use std::collections::HashMap;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

fn event_value(event: &InputEvent) -> String {
    event
        .target_dyn_into::<HtmlInputElement>()
        .map(|input| input.value())
        .or_else(|| {
            event
                .target_dyn_into::<HtmlTextAreaElement>()
                .map(|area| area.value())
        })
        .unwrap_or_default()
}

#[function_component(Contact)]
pub fn contact() -> Html {
    let form = use_mut_ref(ContactForm::default);
    let redraw = use_force_update();
    let pending_checks = use_mut_ref(HashMap::<Field, Debouncer>::new);

    let banner_step = form
        .borrow()
        .banner
        .as_ref()
        .map(|active| (active.id, active.phase));
    {
        let form = form.clone();
        let redraw = redraw.clone();
        use_effect_with(banner_step, move |step| {
            let timeout = step.map(|(id, phase)| {
                Timeout::new(phase.duration_ms(), move || {
                    form.borrow_mut().advance_banner(id);
                    redraw.force_update();
                })
            });
            move || drop(timeout)
        });
    }

    let on_input = |field: Field| {
        let form = form.clone();
        let redraw = redraw.clone();
        let pending_checks = pending_checks.clone();
        Callback::from(move |event: InputEvent| {
            form.borrow_mut().input(field, event_value(&event));

            let debouncer = pending_checks
                .borrow_mut()
                .entry(field)
                .or_insert_with(|| Debouncer::new(INPUT_DEBOUNCE_MS))
                .clone();
            {
                let form = form.clone();
                let redraw = redraw.clone();
                debouncer.call(move || {
                    form.borrow_mut().validate_field(field);
                    redraw.force_update();
                });
            }
            redraw.force_update();
        })
    };

    let on_blur = |field: Field| {
        let form = form.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: FocusEvent| {
            form.borrow_mut().validate_field(field);
            redraw.force_update();
        })
    };

    let on_submit = {
        let form = form.clone();
        let redraw = redraw.clone();
        let pending_checks = pending_checks.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            for debouncer in pending_checks.borrow().values() {
                debouncer.cancel();
            }

            let message = form.borrow_mut().begin_submit();
            redraw.force_update();
            let Some(message) = message else {
                return;
            };

            let form = form.clone();
            let redraw = redraw.clone();
            spawn_local(async move {
                let outcome = deliver(message, &SimulatedTransport::default()).await;
                form.borrow_mut().finish_submit(outcome);
                redraw.force_update();
            });
        })
    };

    let current = form.borrow();
    let field_view = |field: Field| {
        let error = current.errors.get(field);
        let value = current.values.get(field).to_string();
        let class = classes!("form-input", error.is_some().then_some("error"));
        let control = if field == Field::Message {
            html! {
                <textarea
                    id={field.id()}
                    name={field.id()}
                    rows="5"
                    class={class}
                    value={value}
                    aria-describedby={field.error_id()}
                    oninput={on_input(field)}
                    onblur={on_blur(field)}
                />
            }
        } else {
            let kind = if field == Field::Email { "email" } else { "text" };
            html! {
                <input
                    id={field.id()}
                    name={field.id()}
                    type={kind}
                    class={class}
                    value={value}
                    aria-describedby={field.error_id()}
                    oninput={on_input(field)}
                    onblur={on_blur(field)}
                />
            }
        };

        html! {
            <div class="form-group">
                <label for={field.id()}>{field.label()}</label>
                {control}
                <span id={field.error_id()} class={classes!("error-message", error.is_some().then_some("show"))}>
                    {error.unwrap_or_default()}
                </span>
            </div>
        }
    };

    let banner = current.banner.as_ref().map(|active| {
        let kind = active.banner.kind;
        let style = format!(
            "background: {}; opacity: {};",
            kind.background(),
            active.phase.opacity()
        );
        html! {
            <div class={classes!("form-message", kind.class())} style={style} role="status">
                {active.banner.message.clone()}
            </div>
        }
    });

    html! {
        <section id="contact" class="contact">
            <div class="container">
                <SectionHeader title="Contato" subtitle="Vamos conversar sobre o seu próximo projeto" />
                <div class="contact-grid">
                    <Reveal class="contact-info">
                        <div class="contact-item">
                            <i class="fas fa-envelope" aria-hidden="true"></i>
                            <span>{"rafael@example.com"}</span>
                        </div>
                        <div class="contact-item">
                            <i class="fas fa-map-marker-alt" aria-hidden="true"></i>
                            <span>{"São Paulo, Brasil"}</span>
                        </div>
                    </Reveal>
                    <Reveal class="contact-form-wrapper">
                        <form class="contact-form" novalidate="novalidate" onsubmit={on_submit}>
                            { for Field::ALL.into_iter().map(field_view) }
                            <button type="submit" class="btn btn-primary" disabled={current.sending}>
                                {current.submit_label()}
                            </button>
                            {banner.unwrap_or_default()}
                        </form>
                    </Reveal>
                </div>
            </div>
        </section>
    }
}
