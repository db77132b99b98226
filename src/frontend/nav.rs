use super::{
    dom::{self, warn_on_error, BrowserStorage, Debouncer, Listener},
    AppContext,
};
use crate::{
    navigation::{href_for, is_desktop_width, ScrollView, SectionBounds, SECTIONS},
    state::AppAction,
    theme::persist_theme,
    timing::{ThrottleGate, RESIZE_DEBOUNCE_MS, SCROLL_THROTTLE_MS},
};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, Node};
use yew::prelude::*;

pub enum ScrollEvent {
    Scrolled { y: f64, sections: Vec<SectionBounds> },
    Clicked(&'static str),
}

impl Reducible for ScrollView {
    type Action = ScrollEvent;

    fn reduce(self: Rc<Self>, action: ScrollEvent) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ScrollEvent::Scrolled { y, sections } => next.scroll(y, &sections),
            ScrollEvent::Clicked(id) => next.click(id),
        }
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

fn read_scroll() -> ScrollEvent {
    ScrollEvent::Scrolled {
        y: dom::scroll_y(),
        sections: dom::section_bounds(SECTIONS.iter().map(|section| section.id)),
    }
}

/// Refreshed at most once per throttle window.
#[hook]
pub fn use_scroll_view() -> UseReducerHandle<ScrollView> {
    let view = use_reducer_eq(ScrollView::default);

    {
        let dispatcher = view.dispatcher();
        use_effect_with((), move |_| {
            dispatcher.dispatch(read_scroll());

            let mut gate = ThrottleGate::new(SCROLL_THROTTLE_MS);
            let listener = Listener::on_window("scroll", move |_| {
                if gate.allow(dom::now_ms()) {
                    dispatcher.dispatch(read_scroll());
                }
            });
            let listener = warn_on_error("scroll tracking", listener);
            move || drop(listener)
        });
    }

    view
}

pub fn section_link(id: &'static str, app: &AppContext) -> Callback<MouseEvent> {
    let dispatcher = app.dispatcher();
    Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        warn_on_error("smooth scroll", dom::scroll_to_section(id));
        dispatcher.dispatch(AppAction::CloseMenu);
    })
}

#[function_component(Header)]
pub fn header() -> Html {
    let Some(app) = use_context::<AppContext>() else {
        return html! {};
    };
    let view = use_scroll_view();
    let nav_ref = use_node_ref();
    let hamburger_ref = use_node_ref();

    {
        let dispatcher = app.dispatcher();
        let nav_ref = nav_ref.clone();
        let hamburger_ref = hamburger_ref.clone();
        use_effect_with(app.menu_open, move |open| {
            let listener = open
                .then(|| {
                    Listener::on_document("click", move |event| {
                        let Some(target) = event.target().and_then(|target| target.dyn_into::<Node>().ok())
                        else {
                            return;
                        };
                        let inside = [&nav_ref, &hamburger_ref].iter().any(|node| {
                            node.cast::<Element>()
                                .is_some_and(|element| element.contains(Some(&target)))
                        });
                        if !inside {
                            dispatcher.dispatch(AppAction::CloseMenu);
                        }
                    })
                })
                .and_then(|listener| warn_on_error("menu outside click", listener));
            move || drop(listener)
        });
    }

    {
        let dispatcher = app.dispatcher();
        use_effect_with((), move |_| {
            let debouncer = Debouncer::new(RESIZE_DEBOUNCE_MS);
            let listener = {
                let debouncer = debouncer.clone();
                Listener::on_window("resize", move |_| {
                    let dispatcher = dispatcher.clone();
                    debouncer.call(move || {
                        if is_desktop_width(dom::inner_width()) {
                            dispatcher.dispatch(AppAction::CloseMenu);
                        }
                    });
                })
            };
            let listener = warn_on_error("menu resize handling", listener);
            move || {
                drop(listener);
                debouncer.cancel();
            }
        });
    }

    let active = view.active();
    let on_hamburger = {
        let dispatcher = app.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(AppAction::ToggleMenu))
    };

    html! {
        <header class={classes!("header", view.scrolled.then_some("scrolled"))}>
            <nav class="navbar container">
                <a class="nav-logo" href={href_for("home")} onclick={section_link("home", &app)}>
                    {"RM"}
                </a>
                <ul ref={nav_ref} class={classes!("nav-menu", app.menu_open.then_some("active"))}>
                    { for SECTIONS.iter().map(|section| {
                        let onclick = {
                            let follow = section_link(section.id, &app);
                            let dispatcher = view.dispatcher();
                            let id = section.id;
                            Callback::from(move |event: MouseEvent| {
                                dispatcher.dispatch(ScrollEvent::Clicked(id));
                                follow.emit(event);
                            })
                        };
                        html! {
                            <li class="nav-item">
                                <a
                                    class={classes!("nav-link", (active == Some(section.id)).then_some("active"))}
                                    href={href_for(section.id)}
                                    onclick={onclick}
                                >
                                    {section.label}
                                </a>
                            </li>
                        }
                    }) }
                </ul>
                <div class="nav-actions">
                    <ThemeToggle />
                    <button
                        ref={hamburger_ref}
                        type="button"
                        class={classes!("hamburger", app.menu_open.then_some("active"))}
                        aria-label="Abrir menu"
                        aria-expanded={app.menu_open.to_string()}
                        onclick={on_hamburger}
                    >
                        <span class="bar"></span>
                        <span class="bar"></span>
                        <span class="bar"></span>
                    </button>
                </div>
            </nav>
        </header>
    }
}

#[function_component(ThemeToggle)]
fn theme_toggle() -> Html {
    let Some(app) = use_context::<AppContext>() else {
        return html! {};
    };
    let theme = app.theme;

    let onclick = {
        let dispatcher = app.dispatcher();
        Callback::from(move |_: MouseEvent| {
            let next = theme.toggled();
            persist_theme(next, &mut BrowserStorage::local());
            dispatcher.dispatch(AppAction::SetTheme(next));
        })
    };

    html! {
        <button
            class="theme-toggle"
            type="button"
            aria-label={theme.toggle_label()}
            title={theme.toggle_label()}
            onclick={onclick}
        >
            <i class={theme.icon_class()} aria-hidden="true"></i>
        </button>
    }
}

#[function_component(ScrollIndicator)]
pub fn scroll_indicator() -> Html {
    let Some(app) = use_context::<AppContext>() else {
        return html! {};
    };
    let view = use_scroll_view();
    let style = if view.indicator_visible {
        "opacity: 1;"
    } else {
        "opacity: 0; pointer-events: none;"
    };

    html! {
        <a class="scroll-indicator" href={href_for("about")} style={style} onclick={section_link("about", &app)}>
            <span class="sr-only">{"Rolar para a seção Sobre"}</span>
            <i class="fas fa-chevron-down" aria-hidden="true"></i>
        </a>
    }
}
