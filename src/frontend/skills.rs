use super::{
    dom,
    reveal::{reveal_classes, use_reveal, SectionHeader},
};
use crate::{
    skills::{bar_delay, Skill, SkillCategory, SKILL_CATEGORIES},
    timing::CancellationToken,
    tween::{skill_bar, width_style},
};
use gloo_timers::callback::Timeout;
use yew::prelude::*;

#[function_component(Skills)]
pub fn skills() -> Html {
    html! {
        <section id="skills" class="skills">
            <div class="container">
                <SectionHeader title="Habilidades" subtitle="Tecnologias com as quais trabalho no dia a dia" />
                <div class="skills-grid">
                    { for SKILL_CATEGORIES.iter().map(|category| html! {
                        <CategoryCard category={*category} />
                    }) }
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct CategoryCardProps {
    category: SkillCategory,
}

#[function_component(CategoryCard)]
fn category_card(props: &CategoryCardProps) -> Html {
    let node = use_node_ref();
    let revealed = use_reveal(node.clone());
    let category = props.category;

    html! {
        <div ref={node} class={classes!("skill-category", reveal_classes(revealed))}>
            <h3><i class={category.icon} aria-hidden="true"></i>{" "}{category.title}</h3>
            <div class="skill-list">
                { for category.skills.iter().enumerate().map(|(index, skill)| html! {
                    <SkillBar skill={*skill} index={index} active={revealed} />
                }) }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SkillBarProps {
    skill: Skill,
    index: usize,
    active: bool,
}

#[function_component(SkillBar)]
fn skill_bar_view(props: &SkillBarProps) -> Html {
    let width = use_state_eq(|| 0.0_f64);
    let level = props.skill.level;
    let delay = bar_delay(props.index);

    {
        let width = width.clone();
        use_effect_with(props.active, move |active| {
            let token = CancellationToken::new();
            let start = active.then(|| {
                let token = token.clone();
                Timeout::new(delay, move || {
                    let mut tween = skill_bar(level);
                    dom::run_frames(token, move || {
                        width.set(tween.step());
                        !tween.is_finished()
                    });
                })
            });
            move || {
                token.cancel();
                drop(start);
            }
        });
    }

    html! {
        <div class="skill-item">
            <div class="skill-info">
                <span class="skill-name">{props.skill.name}</span>
                <span class="skill-percentage">{format!("{level}%")}</span>
            </div>
            <div class="skill-bar">
                <div class="skill-progress" data-progress={level.to_string()} style={width_style(*width)}></div>
            </div>
        </div>
    }
}
