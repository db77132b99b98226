use crate::storage::KeyValueStore;

pub const THEME_KEY: &str = "portfolio-theme";
pub const LIGHT_BODY_CLASS: &str = "light-theme";

const DARK_PALETTE: &[(&str, &str)] = &[
    ("--bg-primary", "#282c34"),
    ("--bg-secondary", "#21252b"),
    ("--bg-tertiary", "#1e2127"),
    ("--text-primary", "#abb2bf"),
    ("--text-secondary", "#5c6370"),
    ("--border-color", "#3e4451"),
];

const LIGHT_PALETTE: &[(&str, &str)] = &[
    ("--bg-primary", "#ffffff"),
    ("--bg-secondary", "#f8f9fa"),
    ("--bg-tertiary", "#e9ecef"),
    ("--text-primary", "#212529"),
    ("--text-secondary", "#6c757d"),
    ("--border-color", "#dee2e6"),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Light => "claro",
            Self::Dark => "escuro",
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().display_name();
        format!("Mudar para o tema {next}")
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Light => "fas fa-sun",
            Self::Dark => "fas fa-moon",
        }
    }

    pub fn palette(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Light => LIGHT_PALETTE,
            Self::Dark => DARK_PALETTE,
        }
    }
}

pub trait ThemeTarget {
    fn set_variable(&mut self, name: &str, value: &str);
    fn set_light_class(&mut self, enabled: bool);
}

pub fn apply_theme(theme: Theme, target: &mut impl ThemeTarget) {
    for (name, value) in theme.palette() {
        target.set_variable(name, value);
    }
    target.set_light_class(theme == Theme::Light);
}

pub fn load_theme(store: &impl KeyValueStore) -> Theme {
    store
        .get(THEME_KEY)
        .and_then(|value| Theme::parse(&value))
        .unwrap_or_default()
}

pub fn persist_theme(theme: Theme, store: &mut impl KeyValueStore) {
    store.set(THEME_KEY, theme.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::collections::BTreeMap;

    #[derive(Default, PartialEq, Debug, Clone)]
    struct RecordingTarget {
        variables: BTreeMap<String, String>,
        light: bool,
    }

    impl ThemeTarget for RecordingTarget {
        fn set_variable(&mut self, name: &str, value: &str) {
            self.variables.insert(name.to_string(), value.to_string());
        }

        fn set_light_class(&mut self, enabled: bool) {
            self.light = enabled;
        }
    }

    #[test]
    fn missing_or_unknown_value_defaults_to_dark() {
        let mut store = MemoryStore::new();
        assert_eq!(load_theme(&store), Theme::Dark);

        store.set(THEME_KEY, "sepia");
        assert_eq!(load_theme(&store), Theme::Dark);

        store.set(THEME_KEY, "light");
        assert_eq!(load_theme(&store), Theme::Light);
    }

    #[test]
    fn light_palette_sets_body_class() {
        let mut target = RecordingTarget::default();
        apply_theme(Theme::Light, &mut target);

        assert!(target.light);
        assert_eq!(target.variables["--bg-primary"], "#ffffff");
        assert_eq!(target.variables.len(), 6);
    }

    #[test]
    fn palettes_cover_same_variables() {
        let dark: Vec<_> = Theme::Dark.palette().iter().map(|(name, _)| *name).collect();
        let light: Vec<_> = Theme::Light.palette().iter().map(|(name, _)| *name).collect();

        assert_eq!(dark, light);
    }

    #[test]
    fn toggling_twice_restores_variables_and_storage() {
        let mut store = MemoryStore::new();
        let mut target = RecordingTarget::default();

        let initial = load_theme(&store);
        apply_theme(initial, &mut target);
        persist_theme(initial, &mut store);
        let before = (target.clone(), store.get(THEME_KEY));

        let mut theme = initial;
        for _ in 0..2 {
            theme = theme.toggled();
            apply_theme(theme, &mut target);
            persist_theme(theme, &mut store);
        }

        assert_eq!(theme, Theme::Dark);
        assert_eq!((target, store.get(THEME_KEY)), before);
    }

    #[test]
    fn icon_and_label_follow_theme() {
        assert_eq!(Theme::Dark.icon_class(), "fas fa-moon");
        assert_eq!(Theme::Light.icon_class(), "fas fa-sun");
        assert_eq!(Theme::Dark.toggle_label(), "Mudar para o tema claro");
    }
}
