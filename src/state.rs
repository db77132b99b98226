use crate::{
    projects::{find_project, ProjectFilter},
    theme::Theme,
    typing::TypingEngine,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadingPhase {
    #[default]
    Showing,
    /// The overlay has the `hidden` class and is fading out.
    Hiding,
    Done,
}

impl LoadingPhase {
    pub fn duration_ms(self) -> Option<u32> {
        match self {
            Self::Showing => Some(1_500),
            Self::Hiding => Some(500),
            Self::Done => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Showing => Self::Hiding,
            Self::Hiding | Self::Done => Self::Done,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AppAction {
    ToggleMenu,
    CloseMenu,
    SetTheme(Theme),
    AdvanceLoading,
    VisibilityChanged(bool),
    SetFilter(ProjectFilter),
    OpenProject(&'static str),
    CloseProject,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub menu_open: bool,
    pub theme: Theme,
    pub loading: LoadingPhase,
    pub page_visible: bool,
    pub active_filter: ProjectFilter,
    pub open_project: Option<&'static str>,
}

impl AppState {
    pub fn new(theme: Theme) -> Self {
        Self {
            menu_open: false,
            theme,
            loading: LoadingPhase::default(),
            page_visible: true,
            active_filter: ProjectFilter::default(),
            open_project: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading != LoadingPhase::Done
    }

    pub fn scroll_locked(&self) -> bool {
        self.menu_open || self.open_project.is_some()
    }

    /// Next typing step to schedule. Nothing is scheduled while the page is
    /// hidden.
    pub fn typing_delay(&self, engine: &TypingEngine) -> Option<u32> {
        engine.next_delay_ms().filter(|_| self.page_visible)
    }

    pub fn particles_running(&self) -> bool {
        !self.is_loading() && self.page_visible
    }

    pub fn apply(&mut self, action: AppAction) -> bool {
        match action {
            AppAction::ToggleMenu => {
                self.menu_open = !self.menu_open;
                true
            }
            AppAction::CloseMenu => std::mem::replace(&mut self.menu_open, false),
            AppAction::SetTheme(theme) => std::mem::replace(&mut self.theme, theme) != theme,
            AppAction::AdvanceLoading => {
                let next = self.loading.next();
                std::mem::replace(&mut self.loading, next) != next
            }
            AppAction::VisibilityChanged(visible) => {
                std::mem::replace(&mut self.page_visible, visible) != visible
            }
            AppAction::SetFilter(filter) => {
                std::mem::replace(&mut self.active_filter, filter) != filter
            }
            AppAction::OpenProject(id) => {
                if find_project(id).is_none() {
                    log::warn!("no project with id {id:?}, modal stays closed");
                    return false;
                }
                self.open_project.replace(id) != Some(id)
            }
            AppAction::CloseProject => self.open_project.take().is_some(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}
