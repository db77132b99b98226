use super::{
    nav::{section_link, ScrollIndicator},
    particles::ParticleCanvas,
    AppContext,
};
use crate::typing::TypingEngine;
use gloo_timers::callback::Timeout;
use std::rc::Rc;
use yew::prelude::*;

const ENTRANCE_STAGGER_MS: u32 = 200;
const ENTRANCE_PARTS: u32 = 5;

#[function_component(Hero)]
pub fn hero() -> Html {
    let Some(app) = use_context::<AppContext>() else {
        return html! {};
    };
    let entered = use_state_eq(|| 0_u32);

    {
        let entered = entered.clone();
        use_effect_with(app.is_loading(), move |loading| {
            let timeouts: Vec<Timeout> = if *loading {
                Vec::new()
            } else {
                (0..ENTRANCE_PARTS)
                    .map(|index| {
                        let entered = entered.clone();
                        Timeout::new(index * ENTRANCE_STAGGER_MS, move || entered.set(index + 1))
                    })
                    .collect()
            };
            move || drop(timeouts)
        });
    }

    let part = |index: u32, class: &'static str| classes!(class, (*entered > index).then_some("animate-in"));

    html! {
        <section id="home" class="hero">
            <ParticleCanvas />
            <div class="hero-content container">
                <p class={part(0, "hero-greeting")}>{"Olá, eu sou"}</p>
                <h1 class={part(1, "hero-title")}><TypingText /></h1>
                <p class={part(2, "hero-subtitle")}>{"Desenvolvedor Full Stack"}</p>
                <p class={part(3, "hero-description")}>
                    {"Construo aplicações web modernas, rápidas e acessíveis, do banco de dados à interface."}
                </p>
                <div class={part(4, "hero-buttons")}>
                    <a class="btn btn-primary" href="#projects" onclick={section_link("projects", &app)}>
                        {"Ver Projetos"}
                    </a>
                    <a class="btn btn-secondary" href="#contact" onclick={section_link("contact", &app)}>
                        {"Entre em Contato"}
                    </a>
                </div>
            </div>
            <ScrollIndicator />
        </section>
    }
}

struct TypingTick;

impl Reducible for TypingEngine {
    type Action = TypingTick;

    fn reduce(self: Rc<Self>, _: TypingTick) -> Rc<Self> {
        let mut next = (*self).clone();
        match next.tick() {
            Some(_) => Rc::new(next),
            None => self,
        }
    }
}

#[function_component(TypingText)]
fn typing_text() -> Html {
    let Some(app) = use_context::<AppContext>() else {
        return html! {};
    };
    let typing = use_reducer(TypingEngine::default);

    {
        let dispatcher = typing.dispatcher();
        let delay = app.typing_delay(&typing);
        let step = (typing.text_index(), typing.char_count(), typing.phase());
        use_effect_with((step, delay), move |(_, delay)| {
            let timeout = delay.map(|delay| Timeout::new(delay, move || dispatcher.dispatch(TypingTick)));
            move || drop(timeout)
        });
    }

    html! {
        <>
            <span class="typing-text">{typing.visible_text().to_string()}</span>
            <span class="typing-cursor" aria-hidden="true">{"|"}</span>
        </>
    }
}
