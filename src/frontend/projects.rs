use super::{
    dom::{warn_on_error, Listener},
    reveal::{reveal_classes, use_reveal, SectionHeader},
    AppContext,
};
use crate::{
    projects::{
        find_project, plan_filter, CardTransition, CardVisibility, Project, ProjectFilter, CARD_HIDE_MS,
        PROJECTS,
    },
    state::AppAction,
};
use gloo_timers::callback::Timeout;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use yew::prelude::*;

pub enum CardStep {
    Apply(bool),
    Settle,
}

impl Reducible for CardVisibility {
    type Action = CardStep;

    fn reduce(self: Rc<Self>, action: CardStep) -> Rc<Self> {
        let next = match action {
            CardStep::Apply(show) => self.apply(show),
            CardStep::Settle => self.settle(),
        };
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

#[function_component(Projects)]
pub fn projects() -> Html {
    let Some(app) = use_context::<AppContext>() else {
        return html! {};
    };
    let filter = app.active_filter;
    let categories: Vec<_> = PROJECTS.iter().map(|project| project.category).collect();
    let plan = plan_filter(filter, &categories);

    html! {
        <section id="projects" class="projects">
            <div class="container">
                <SectionHeader title="Projetos" subtitle="Alguns trabalhos recentes" />
                <div class="project-filters" role="group" aria-label="Filtrar projetos">
                    { for ProjectFilter::BUTTONS.iter().map(|(option, label)| {
                        let option = *option;
                        let onclick = {
                            let dispatcher = app.dispatcher();
                            Callback::from(move |_: MouseEvent| dispatcher.dispatch(AppAction::SetFilter(option)))
                        };
                        html! {
                            <button
                                type="button"
                                class={classes!("filter-btn", (option == filter).then_some("active"))}
                                data-filter={option.as_str()}
                                aria-pressed={(option == filter).to_string()}
                                onclick={onclick}
                            >
                                {*label}
                            </button>
                        }
                    }) }
                </div>
                <div class="projects-grid">
                    { for PROJECTS.iter().zip(plan).map(|(project, transition)| html! {
                        <ProjectCard project={*project} transition={transition} />
                    }) }
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    project: Project,
    transition: CardTransition,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let Some(app) = use_context::<AppContext>() else {
        return html! {};
    };
    let node = use_node_ref();
    let revealed = use_reveal(node.clone());
    let visibility = use_reducer_eq(CardVisibility::default);
    let project = props.project;

    {
        let dispatcher = visibility.dispatcher();
        use_effect_with(props.transition, move |transition| {
            let CardTransition { show, delay_ms: delay, .. } = *transition;
            let settle = (!show).then(|| {
                let dispatcher = dispatcher.clone();
                Timeout::new(delay.saturating_add(CARD_HIDE_MS), move || {
                    dispatcher.dispatch(CardStep::Settle)
                })
            });
            let apply = Timeout::new(delay, move || dispatcher.dispatch(CardStep::Apply(show)));
            move || {
                drop(apply);
                drop(settle);
            }
        });
    }

    let open_details = {
        let dispatcher = app.dispatcher();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            dispatcher.dispatch(AppAction::OpenProject(project.id));
        })
    };

    html! {
        <article
            ref={node}
            class={classes!(
                "project-card",
                reveal_classes(revealed),
                visibility.has_hidden_class().then_some("hidden"),
            )}
            data-category={project.category.as_str()}
            style={visibility.display_style()}
        >
            <div class="project-image">
                <img src={project.image} alt={project.title} loading="lazy" />
            </div>
            <div class="project-content">
                <h3 class="project-title">{project.title}</h3>
                <p class="project-description">{project.description}</p>
                <div class="project-tech">
                    { for project.technologies.iter().map(|tech| html! { <span class="tech-tag">{*tech}</span> }) }
                </div>
                <div class="project-links">
                    <a href="#" class="project-link" data-modal={project.id} onclick={open_details}>
                        <i class="fas fa-eye" aria-hidden="true"></i>{" Detalhes"}
                    </a>
                    <a href={project.repo_url} class="project-link" target="_blank" rel="noopener noreferrer">
                        <i class="fab fa-github" aria-hidden="true"></i>{" Código"}
                    </a>
                </div>
            </div>
        </article>
    }
}

fn detail_list(title: &'static str, items: &'static [&'static str]) -> Html {
    html! {
        <div class="modal-section">
            <h4>{title}</h4>
            <ul>
                { for items.iter().map(|item| html! { <li>{*item}</li> }) }
            </ul>
        </div>
    }
}

#[function_component(ProjectModal)]
pub fn project_modal() -> Html {
    let Some(app) = use_context::<AppContext>() else {
        return html! {};
    };
    let project = app.open_project.and_then(find_project);
    let is_open = project.is_some();

    {
        let dispatcher = app.dispatcher();
        use_effect_with(is_open, move |open| {
            let listener = open
                .then(|| {
                    Listener::on_document("keydown", move |event| {
                        let escape = event
                            .dyn_ref::<KeyboardEvent>()
                            .is_some_and(|event| event.key() == "Escape");
                        if escape {
                            dispatcher.dispatch(AppAction::CloseProject);
                        }
                    })
                })
                .and_then(|listener| warn_on_error("modal keyboard handling", listener));
            move || drop(listener)
        });
    }

    let close = {
        let dispatcher = app.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(AppAction::CloseProject))
    };

    let Some(project) = project else {
        return html! { <div class="modal" aria-hidden="true"></div> };
    };

    html! {
        <div class="modal active" role="dialog" aria-modal="true" aria-labelledby="modal-title">
            <div class="modal-overlay" onclick={close.clone()}></div>
            <div class="modal-content">
                <button type="button" class="modal-close" aria-label="Fechar" onclick={close}>
                    <i class="fas fa-times" aria-hidden="true"></i>
                </button>
                <img class="modal-image" src={project.image} alt={project.title} />
                <div class="modal-body">
                    <h2 id="modal-title">{project.title}</h2>
                    <p>{project.description}</p>
                    <div class="project-tech">
                        { for project.technologies.iter().map(|tech| html! { <span class="tech-tag">{*tech}</span> }) }
                    </div>
                    {detail_list("Funcionalidades", project.features)}
                    {detail_list("Desafios", project.challenges)}
                    {detail_list("Resultados", project.results)}
                    <div class="modal-actions">
                        <a href={project.demo_url} class="btn btn-primary" target="_blank" rel="noopener noreferrer">
                            <i class="fas fa-external-link-alt" aria-hidden="true"></i>{" Ver Demo"}
                        </a>
                        <a href={project.repo_url} class="btn btn-secondary" target="_blank" rel="noopener noreferrer">
                            <i class="fab fa-github" aria-hidden="true"></i>{" Ver Código"}
                        </a>
                    </div>
                </div>
            </div>
        </div>
    }
}
