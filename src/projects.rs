pub const CARD_STAGGER_MS: u32 = 50;
/// Time the fade-out runs before a hidden card leaves the layout.
pub const CARD_HIDE_MS: u32 = 300;

pub const DEFAULT_FEATURES: &[&str] = &[
    "Interface responsiva e moderna",
    "Integração com APIs externas",
    "Sistema de autenticação",
    "Dashboard administrativo",
    "Testes automatizados",
];

pub const DEFAULT_CHALLENGES: &[&str] = &[
    "Otimização de performance",
    "Implementação de real-time features",
    "Arquitetura escalável",
];

pub const DEFAULT_RESULTS: &[&str] = &[
    "Aumento de 40% na conversão",
    "Redução de 60% no tempo de carregamento",
    "Melhoria na experiência do usuário",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Web,
    Mobile,
    Api,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mobile => "mobile",
            Self::Api => "api",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "web" => Some(Self::Web),
            "mobile" => Some(Self::Mobile),
            "api" => Some(Self::Api),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProjectFilter {
    #[default]
    All,
    Only(Category),
}

impl ProjectFilter {
    pub const BUTTONS: &'static [(ProjectFilter, &'static str)] = &[
        (ProjectFilter::All, "Todos"),
        (ProjectFilter::Only(Category::Web), "Web"),
        (ProjectFilter::Only(Category::Mobile), "Mobile"),
        (ProjectFilter::Only(Category::Api), "API"),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.as_str(),
        }
    }

    /// Unknown names fall back to showing everything.
    pub fn parse(value: &str) -> Self {
        Category::parse(value).map_or(Self::All, Self::Only)
    }

    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub category: Category,
    pub technologies: &'static [&'static str],
    pub features: &'static [&'static str],
    pub challenges: &'static [&'static str],
    pub results: &'static [&'static str],
    pub demo_url: &'static str,
    pub repo_url: &'static str,
}

pub const PROJECTS: &[Project] = &[
    Project {
        id: "ecommerce",
        title: "E-commerce Platform",
        description: "Loja virtual completa com carrinho, pagamentos e painel administrativo.",
        image: "/images/projects/ecommerce.svg",
        category: Category::Web,
        technologies: &["React", "Node.js", "PostgreSQL", "Stripe"],
        features: &[
            "Carrinho persistente entre sessões",
            "Checkout com pagamentos via Stripe",
            "Painel administrativo de pedidos",
            "Busca com filtros por categoria",
        ],
        challenges: DEFAULT_CHALLENGES,
        results: DEFAULT_RESULTS,
        demo_url: "#",
        repo_url: "#",
    },
    Project {
        id: "task-manager",
        title: "Task Manager",
        description: "Aplicativo de produtividade com sincronização em tempo real entre equipes.",
        image: "/images/projects/task-manager.svg",
        category: Category::Web,
        technologies: &["Vue.js", "Firebase", "Tailwind"],
        features: DEFAULT_FEATURES,
        challenges: &[
            "Sincronização offline-first",
            "Resolução de conflitos de edição",
            "Notificações em tempo real",
        ],
        results: DEFAULT_RESULTS,
        demo_url: "#",
        repo_url: "#",
    },
    Project {
        id: "fitness-app",
        title: "Fitness Tracker",
        description: "App mobile para registrar treinos, metas e evolução com gráficos.",
        image: "/images/projects/fitness.svg",
        category: Category::Mobile,
        technologies: &["React Native", "Expo", "SQLite"],
        features: DEFAULT_FEATURES,
        challenges: DEFAULT_CHALLENGES,
        results: DEFAULT_RESULTS,
        demo_url: "#",
        repo_url: "#",
    },
    Project {
        id: "weather-app",
        title: "Weather Now",
        description: "Previsão do tempo com geolocalização e alertas personalizados.",
        image: "/images/projects/weather.svg",
        category: Category::Mobile,
        technologies: &["Flutter", "Dart", "OpenWeather"],
        features: DEFAULT_FEATURES,
        challenges: DEFAULT_CHALLENGES,
        results: DEFAULT_RESULTS,
        demo_url: "#",
        repo_url: "#",
    },
    Project {
        id: "payments-api",
        title: "Payments API",
        description: "API REST para processamento de pagamentos com filas e idempotência.",
        image: "/images/projects/payments-api.svg",
        category: Category::Api,
        technologies: &["Rust", "Axum", "PostgreSQL", "Redis"],
        features: &[
            "Chaves de idempotência por requisição",
            "Processamento assíncrono com filas",
            "Webhooks assinados",
        ],
        challenges: DEFAULT_CHALLENGES,
        results: &[
            "Latência p99 abaixo de 50 ms",
            "Zero cobranças duplicadas em produção",
        ],
        demo_url: "#",
        repo_url: "#",
    },
    Project {
        id: "blog-cms",
        title: "Headless CMS",
        description: "CMS headless com API GraphQL e editor de conteúdo em Markdown.",
        image: "/images/projects/cms.svg",
        category: Category::Api,
        technologies: &["GraphQL", "Node.js", "MongoDB"],
        features: DEFAULT_FEATURES,
        challenges: DEFAULT_CHALLENGES,
        results: DEFAULT_RESULTS,
        demo_url: "#",
        repo_url: "#",
    },
];

pub fn find_project(id: &str) -> Option<&'static Project> {
    PROJECTS.iter().find(|project| project.id == id)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardTransition {
    pub index: usize,
    pub show: bool,
    pub delay_ms: u32,
}

pub fn plan_filter(filter: ProjectFilter, categories: &[Category]) -> Vec<CardTransition> {
    categories
        .iter()
        .enumerate()
        .map(|(index, category)| CardTransition {
            index,
            show: filter.matches(*category),
            delay_ms: stagger_delay(index),
        })
        .collect()
}

pub fn stagger_delay(index: usize) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(CARD_STAGGER_MS)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CardVisibility {
    #[default]
    Shown,
    /// Has the `hidden` class and is fading out, still in the layout.
    Fading,
    Hidden,
}

impl CardVisibility {
    pub fn apply(self, show: bool) -> Self {
        match (self, show) {
            (_, true) => Self::Shown,
            (Self::Hidden, false) => Self::Hidden,
            (_, false) => Self::Fading,
        }
    }

    /// Called once the fade-out delay has elapsed. A card shown again in the
    /// meantime stays shown.
    pub fn settle(self) -> Self {
        match self {
            Self::Fading => Self::Hidden,
            other => other,
        }
    }

    pub fn has_hidden_class(self) -> bool {
        !matches!(self, Self::Shown)
    }

    pub fn display_style(self) -> &'static str {
        match self {
            Self::Hidden => "display: none;",
            Self::Shown | Self::Fading => "display: block;",
        }
    }
}
