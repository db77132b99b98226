#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stat {
    pub target: u32,
    pub suffix: &'static str,
    pub label: &'static str,
}

pub const STATS: &[Stat] = &[
    Stat {
        target: 50,
        suffix: "+",
        label: "Projetos concluídos",
    },
    Stat {
        target: 5,
        suffix: "+",
        label: "Anos de experiência",
    },
    Stat {
        target: 30,
        suffix: "+",
        label: "Clientes satisfeitos",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimelineEntry {
    pub period: &'static str,
    pub role: &'static str,
    pub place: &'static str,
    pub summary: &'static str,
}

pub const TIMELINE: &[TimelineEntry] = &[
    TimelineEntry {
        period: "2023 - Atual",
        role: "Desenvolvedor Full Stack Sênior",
        place: "Tech Solutions",
        summary: "Liderança técnica de produtos web e APIs de alto tráfego.",
    },
    TimelineEntry {
        period: "2021 - 2023",
        role: "Desenvolvedor Full Stack",
        place: "Digital Agency",
        summary: "Aplicações React e Node.js para clientes de varejo e saúde.",
    },
    TimelineEntry {
        period: "2019 - 2021",
        role: "Desenvolvedor Frontend",
        place: "StartUp Inc",
        summary: "Interfaces responsivas e design system da plataforma.",
    },
];

pub const INTRO: &[&str] = &[
    "Sou desenvolvedor full stack apaixonado por transformar ideias em produtos digitais rápidos, acessíveis e fáceis de manter.",
    "Trabalho de ponta a ponta: do design da interface à modelagem de dados e à infraestrutura de deploy.",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_have_positive_targets() {
        assert!(STATS.iter().all(|stat| stat.target > 0));
    }

    #[test]
    fn timeline_is_newest_first() {
        let starts: Vec<&str> = TIMELINE.iter().map(|entry| &entry.period[..4]).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        assert_eq!(starts, sorted);
    }
}
