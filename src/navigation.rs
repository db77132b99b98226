pub const HEADER_OFFSET: f64 = 80.0;
/// How far below the viewport top a section must reach to count as active.
pub const ACTIVE_PROBE_OFFSET: f64 = 100.0;
pub const SCROLLED_THRESHOLD: f64 = 50.0;
pub const INDICATOR_HIDE_THRESHOLD: f64 = 100.0;
pub const MOBILE_BREAKPOINT: f64 = 768.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavSection {
    pub id: &'static str,
    pub label: &'static str,
}

pub const SECTIONS: &[NavSection] = &[
    NavSection {
        id: "home",
        label: "Início",
    },
    NavSection {
        id: "about",
        label: "Sobre",
    },
    NavSection {
        id: "skills",
        label: "Habilidades",
    },
    NavSection {
        id: "projects",
        label: "Projetos",
    },
    NavSection {
        id: "contact",
        label: "Contato",
    },
];

pub fn href_for(id: &str) -> String {
    format!("#{id}")
}

pub fn target_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// The last section whose vertical span contains the probe line.
pub fn active_section(scroll_y: f64, sections: &[SectionBounds]) -> Option<&str> {
    let probe = scroll_y + ACTIVE_PROBE_OFFSET;
    sections
        .iter()
        .rev()
        .find(|section| probe >= section.top && probe < section.top + section.height)
        .map(|section| section.id.as_str())
}

pub fn scroll_target(section_top: f64) -> f64 {
    section_top - HEADER_OFFSET
}

pub fn header_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLLED_THRESHOLD
}

pub fn indicator_visible(scroll_y: f64) -> bool {
    scroll_y <= INDICATOR_HIDE_THRESHOLD
}

pub fn is_desktop_width(width: f64) -> bool {
    width > MOBILE_BREAKPOINT
}

/// A clicked link stays highlighted until the next scroll event. Between
/// sections the last matched section stays highlighted.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollView {
    pub scrolled: bool,
    pub indicator_visible: bool,
    tracked: Option<String>,
    clicked: Option<&'static str>,
}

impl Default for ScrollView {
    fn default() -> Self {
        Self {
            scrolled: false,
            indicator_visible: true,
            tracked: None,
            clicked: None,
        }
    }
}

impl ScrollView {
    pub fn scroll(&mut self, scroll_y: f64, sections: &[SectionBounds]) {
        self.scrolled = header_scrolled(scroll_y);
        self.indicator_visible = indicator_visible(scroll_y);
        if let Some(id) = active_section(scroll_y, sections) {
            self.tracked = Some(id.to_string());
        }
        self.clicked = None;
    }

    pub fn click(&mut self, id: &'static str) {
        self.clicked = Some(id);
    }

    pub fn active(&self) -> Option<&str> {
        self.clicked.or(self.tracked.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(id: &str, top: f64, height: f64) -> SectionBounds {
        SectionBounds {
            id: id.to_string(),
            top,
            height,
        }
    }

    #[test]
    fn target_id_strips_hash() {
        assert_eq!(target_id("#about"), Some("about"));
        assert_eq!(target_id("#"), None);
        assert_eq!(target_id("about"), None);
    }

    #[test]
    fn active_section_uses_probe_offset() {
        let sections = vec![
            bounds("home", 0.0, 700.0),
            bounds("about", 700.0, 600.0),
            bounds("skills", 1300.0, 500.0),
        ];

        assert_eq!(active_section(0.0, &sections), Some("home"));
        assert_eq!(active_section(599.0, &sections), Some("home"));
        assert_eq!(active_section(600.0, &sections), Some("about"));
        assert_eq!(active_section(1250.0, &sections), Some("skills"));
        assert_eq!(active_section(5000.0, &sections), None);
    }

    #[test]
    fn overlapping_sections_prefer_the_later_one() {
        let sections = vec![bounds("a", 0.0, 1000.0), bounds("b", 50.0, 200.0)];

        assert_eq!(active_section(0.0, &sections), Some("b"));
    }

    #[test]
    fn gap_between_sections_keeps_last_highlight() {
        let sections = vec![bounds("home", 0.0, 500.0), bounds("about", 800.0, 400.0)];
        let mut view = ScrollView::default();

        view.scroll(100.0, &sections);
        assert_eq!(view.active(), Some("home"));
        view.scroll(550.0, &sections);
        assert_eq!(view.active(), Some("home"));
        view.scroll(750.0, &sections);
        assert_eq!(view.active(), Some("about"));
        assert!(view.scrolled);
        assert!(!view.indicator_visible);
    }

    #[test]
    fn clicked_link_holds_until_next_scroll() {
        let sections = vec![bounds("home", 0.0, 500.0), bounds("about", 500.0, 400.0)];
        let mut view = ScrollView::default();
        view.scroll(0.0, &sections);

        view.click("about");
        assert_eq!(view.active(), Some("about"));

        view.scroll(0.0, &sections);
        assert_eq!(view.active(), Some("home"));
    }

    #[test]
    fn thresholds() {
        assert!(!header_scrolled(50.0));
        assert!(header_scrolled(50.5));
        assert!(indicator_visible(100.0));
        assert!(!indicator_visible(101.0));
        assert!(!is_desktop_width(768.0));
        assert!(is_desktop_width(769.0));
        assert_eq!(scroll_target(900.0), 820.0);
    }

    #[test]
    fn every_section_has_an_href() {
        let hrefs: Vec<String> = SECTIONS.iter().map(|section| href_for(section.id)).collect();

        assert_eq!(hrefs[0], "#home");
        assert!(hrefs.iter().all(|href| target_id(href).is_some()));
    }
}
