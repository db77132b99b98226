pub const BAR_STAGGER_MS: u32 = 200;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Skill {
    pub name: &'static str,
    pub level: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkillCategory {
    pub title: &'static str,
    pub icon: &'static str,
    pub skills: &'static [Skill],
}

pub const SKILL_CATEGORIES: &[SkillCategory] = &[
    SkillCategory {
        title: "Frontend",
        icon: "fas fa-laptop-code",
        skills: &[
            Skill {
                name: "HTML & CSS",
                level: 95.0,
            },
            Skill {
                name: "JavaScript",
                level: 90.0,
            },
            Skill {
                name: "React",
                level: 85.0,
            },
            Skill {
                name: "TypeScript",
                level: 80.0,
            },
        ],
    },
    SkillCategory {
        title: "Backend",
        icon: "fas fa-server",
        skills: &[
            Skill {
                name: "Node.js",
                level: 85.0,
            },
            Skill {
                name: "Rust",
                level: 75.0,
            },
            Skill {
                name: "PostgreSQL",
                level: 80.0,
            },
        ],
    },
    SkillCategory {
        title: "Ferramentas",
        icon: "fas fa-tools",
        skills: &[
            Skill {
                name: "Git",
                level: 90.0,
            },
            Skill {
                name: "Docker",
                level: 70.0,
            },
            Skill {
                name: "Figma",
                level: 65.0,
            },
        ],
    },
];

pub fn bar_delay(index: usize) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(BAR_STAGGER_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_percentages() {
        for category in SKILL_CATEGORIES {
            assert!(!category.skills.is_empty());
            for skill in category.skills {
                assert!((0.0..=100.0).contains(&skill.level), "{}", skill.name);
            }
        }
    }

    #[test]
    fn bars_cascade() {
        assert_eq!(bar_delay(0), 0);
        assert_eq!(bar_delay(3), 600);
        assert_eq!(bar_delay(usize::MAX), u32::MAX);
    }
}
