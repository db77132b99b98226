mod about;
mod contact;
mod dom;
mod hero;
mod nav;
mod particles;
mod projects;
mod reveal;
mod skills;

use crate::{
    state::{AppAction, AppState, LoadingPhase},
    theme::{apply_theme, load_theme},
};
use dom::{warn_on_error, BrowserStorage, Listener, RootStyle};
use gloo_timers::callback::Timeout;
use std::rc::Rc;
use yew::prelude::*;

pub type AppContext = UseReducerHandle<AppState>;

impl Reducible for AppState {
    type Action = AppAction;

    fn reduce(self: Rc<Self>, action: AppAction) -> Rc<Self> {
        let mut next = (*self).clone();
        if next.apply(action) {
            Rc::new(next)
        } else {
            self
        }
    }
}

fn initial_state() -> AppState {
    let theme = load_theme(&BrowserStorage::local());
    log::info!("starting with {} theme", theme.as_str());
    AppState::new(theme)
}

#[function_component(App)]
fn app() -> Html {
    let state = use_reducer(initial_state);

    use_effect_with(state.theme, |theme| {
        if let Some(mut target) = warn_on_error("theme palette", RootStyle::current()) {
            apply_theme(*theme, &mut target);
        }
        || ()
    });

    {
        let dispatcher = state.dispatcher();
        use_effect_with(state.loading, move |phase| {
            let timeout = phase
                .duration_ms()
                .map(|delay| Timeout::new(delay, move || dispatcher.dispatch(AppAction::AdvanceLoading)));
            move || drop(timeout)
        });
    }

    {
        let dispatcher = state.dispatcher();
        use_effect_with((), move |_| {
            dispatcher.dispatch(AppAction::VisibilityChanged(dom::page_visible()));

            let listener = Listener::on_document("visibilitychange", move |_| {
                let visible = dom::page_visible();
                log::info!("page visibility changed, visible={visible}");
                dispatcher.dispatch(AppAction::VisibilityChanged(visible));
            });
            let listener = warn_on_error("visibility tracking", listener);
            move || drop(listener)
        });
    }

    use_effect_with(state.scroll_locked(), |locked| {
        warn_on_error("scroll lock", dom::set_scroll_locked(*locked));
        || ()
    });

    html! {
        <ContextProvider<AppContext> context={state}>
            <LoadingScreen />
            <nav::Header />
            <main>
                <hero::Hero />
                <about::About />
                <skills::Skills />
                <projects::Projects />
                <contact::Contact />
            </main>
            <Footer />
            <projects::ProjectModal />
        </ContextProvider<AppContext>>
    }
}

#[function_component(LoadingScreen)]
fn loading_screen() -> Html {
    let Some(app) = use_context::<AppContext>() else {
        return html! {};
    };

    match app.loading {
        LoadingPhase::Done => html! {},
        phase => html! {
            <div
                class={classes!("loading-screen", (phase == LoadingPhase::Hiding).then_some("hidden"))}
                aria-hidden="true"
            >
                <div class="loader"></div>
                <p class="loading-text">{"Carregando..."}</p>
            </div>
        },
    }
}

#[function_component(Footer)]
fn footer() -> Html {
    html! {
        <footer class="footer">
            <div class="container">
                <p>{"© Rafael Mota. Feito com Rust e WebAssembly."}</p>
                <div class="social-links">
                    <a href="https://github.com" target="_blank" rel="noopener noreferrer" aria-label="GitHub">
                        <i class="fab fa-github" aria-hidden="true"></i>
                    </a>
                    <a href="https://linkedin.com" target="_blank" rel="noopener noreferrer" aria-label="LinkedIn">
                        <i class="fab fa-linkedin" aria-hidden="true"></i>
                    </a>
                </div>
            </div>
        </footer>
    }
}

pub fn run() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let root = match dom::element_by_id("app") {
        Ok(root) => root,
        Err(error) => {
            log::error!("cannot mount the page: {error}");
            return;
        }
    };

    log::info!("mounting portfolio page");
    yew::Renderer::<App>::with_root(root).render();
}
