use super::{
    dom,
    reveal::{reveal_classes, use_reveal, Reveal, SectionHeader},
};
use crate::{
    about::{Stat, INTRO, STATS, TIMELINE},
    timing::CancellationToken,
    tween::{counter, counter_label},
};
use yew::prelude::*;

#[function_component(About)]
pub fn about() -> Html {
    html! {
        <section id="about" class="about">
            <div class="container">
                <SectionHeader title="Sobre Mim" subtitle="Conheça um pouco da minha trajetória" />
                <div class="about-grid">
                    <Reveal class="about-content">
                        { for INTRO.iter().map(|paragraph| html! { <p>{*paragraph}</p> }) }
                        <div class="stats">
                            { for STATS.iter().map(|stat| html! { <Counter stat={*stat} /> }) }
                        </div>
                    </Reveal>
                    <div class="timeline">
                        { for TIMELINE.iter().map(|entry| html! {
                            <Reveal class="timeline-item">
                                <span class="timeline-date">{entry.period}</span>
                                <h3>{entry.role}</h3>
                                <h4>{entry.place}</h4>
                                <p>{entry.summary}</p>
                            </Reveal>
                        }) }
                    </div>
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct CounterProps {
    stat: Stat,
}

#[function_component(Counter)]
fn counter_view(props: &CounterProps) -> Html {
    let node = use_node_ref();
    let revealed = use_reveal(node.clone());
    let label = use_state_eq(|| "0".to_string());
    let stat = props.stat;

    {
        let label = label.clone();
        use_effect_with(revealed, move |revealed| {
            let token = CancellationToken::new();
            if *revealed {
                let mut tween = counter(stat.target);
                dom::run_frames(token.clone(), move || {
                    tween.step();
                    label.set(counter_label(&tween));
                    !tween.is_finished()
                });
            }
            move || token.cancel()
        });
    }

    html! {
        <div ref={node} class={classes!("stat", reveal_classes(revealed))}>
            <span class="stat-number">
                <span class="counter" data-target={stat.target.to_string()}>{(*label).clone()}</span>
                {stat.suffix}
            </span>
            <span class="stat-label">{stat.label}</span>
        </div>
    }
}
