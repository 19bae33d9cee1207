//! Per-category capability checklists.
//!
//! A capability is evidenced when any technology in the category mentions
//! one of its markers as whole words. Technologies are compared after
//! [`normalize`], so markers are written lowercase with spaces
//! (`vercel analytics` matches `Vercel-Analytics-1.0.0`, `gin` does not
//! match `Login-Kit`).

use crate::types::{Category, Priority};

/// An expected capability and the markers that evidence it.
#[derive(Debug, Clone, Copy)]
pub struct Capability {
    /// Gap description emitted when no marker matches.
    pub gap: &'static str,
    pub markers: &'static [&'static str],
}

const fn capability(gap: &'static str, markers: &'static [&'static str]) -> Capability {
    Capability { gap, markers }
}

/// How a gap count maps to a priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityScheme {
    /// `low` below `medium_from`, `high` above `high_above`, `medium` between.
    ThreeTier { medium_from: usize, high_above: usize },
    /// `low` below `medium_from`, `medium` otherwise. Never `high`.
    TwoTier { medium_from: usize },
}

impl PriorityScheme {
    pub fn classify(&self, gap_count: usize) -> Priority {
        match *self {
            Self::ThreeTier {
                medium_from,
                high_above,
            } => {
                if gap_count > high_above {
                    Priority::High
                } else if gap_count >= medium_from {
                    Priority::Medium
                } else {
                    Priority::Low
                }
            }
            Self::TwoTier { medium_from } => {
                if gap_count >= medium_from {
                    Priority::Medium
                } else {
                    Priority::Low
                }
            }
        }
    }
}

/// Everything the gap engine knows about one category.
#[derive(Debug, Clone, Copy)]
pub struct Checklist {
    pub category: Category,
    pub capabilities: &'static [Capability],
    /// Gaps reported regardless of what was detected.
    pub standing_gaps: &'static [&'static str],
    /// `gap substring -> recommendation`, first match wins.
    pub recommendations: &'static [(&'static str, &'static str)],
    pub priority: PriorityScheme,
}

/// Lowercase and turn `-`/`_` separators into spaces.
pub fn normalize(technology: &str) -> String {
    technology
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect()
}

/// Words of a normalized name; any non-alphanumeric character separates.
fn words(normalized: &str) -> Vec<&str> {
    normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Whether the words of `marker` appear consecutively in `technology`.
fn mentions(technology: &[&str], marker: &str) -> bool {
    let marker = words(marker);
    !marker.is_empty() && technology.windows(marker.len()).any(|w| w == marker.as_slice())
}

impl Checklist {
    /// Gaps for this category, in checklist order, standing gaps last.
    pub fn gaps(&self, technologies: &[String]) -> Vec<String> {
        let normalized: Vec<String> = technologies.iter().map(|t| normalize(t)).collect();
        let normalized: Vec<Vec<&str>> = normalized.iter().map(|t| words(t)).collect();

        let mut gaps: Vec<String> = self
            .capabilities
            .iter()
            .filter(|cap| {
                !cap.markers
                    .iter()
                    .any(|marker| normalized.iter().any(|t| mentions(t, marker)))
            })
            .map(|cap| cap.gap.to_string())
            .collect();
        gaps.extend(self.standing_gaps.iter().map(|g| g.to_string()));
        gaps
    }

    /// One recommendation per gap with a lookup entry, in gap order.
    pub fn recommendations_for(&self, gaps: &[String]) -> Vec<String> {
        gaps.iter()
            .filter_map(|gap| {
                self.recommendations
                    .iter()
                    .find(|(needle, _)| gap.contains(*needle))
                    .map(|(_, rec)| rec.to_string())
            })
            .collect()
    }
}

/// The checklist for `category`.
pub fn checklist(category: Category) -> &'static Checklist {
    match category {
        Category::Frontend => &FRONTEND,
        Category::Backend => &BACKEND,
        Category::Database => &DATABASE,
        Category::Infrastructure => &INFRASTRUCTURE,
        Category::Platforms => &PLATFORMS,
        Category::Ai => &AI,
        Category::Development => &DEVELOPMENT,
        Category::Integrations => &INTEGRATIONS,
    }
}

// ============================================================================
// Checklists
// ============================================================================

static FRONTEND: Checklist = Checklist {
    category: Category::Frontend,
    capabilities: &[
        capability(
            "No UI framework detected",
            &[
                "react", "vue", "angular", "svelte", "solidjs", "preact", "next.js", "nuxt", "astro",
                "remix", "gatsby",
            ],
        ),
        capability("No type system detected (TypeScript recommended)", &["typescript"]),
        capability(
            "No CSS framework or styling system detected",
            &[
                "tailwind",
                "styled components",
                "emotion",
                "sass",
                "bootstrap",
                "material ui",
                "chakra",
                "ant design",
                "radix",
            ],
        ),
        capability(
            "No state management library detected",
            &[
                "redux", "zustand", "jotai", "mobx", "recoil", "pinia", "vuex", "tanstack query",
                "swr",
            ],
        ),
    ],
    standing_gaps: &[],
    recommendations: &[
        ("UI framework", "Adopt a component framework such as React or Vue"),
        ("type system", "Introduce TypeScript for compile-time type safety"),
        (
            "CSS framework",
            "Adopt Tailwind CSS or a component library for consistent styling",
        ),
        (
            "state management",
            "Add a state management library such as Zustand or Redux Toolkit",
        ),
    ],
    priority: PriorityScheme::ThreeTier {
        medium_from: 1,
        high_above: 2,
    },
};

static BACKEND: Checklist = Checklist {
    category: Category::Backend,
    capabilities: &[
        capability(
            "No API framework or backend service detected",
            &[
                "express",
                "fastify",
                "nestjs",
                "koa",
                "hono",
                "hapi",
                "next.js api routes",
                "django",
                "flask",
                "fastapi",
                "rails",
                "sinatra",
                "laravel",
                "symfony",
                "gin",
                "echo",
                "fiber",
                "actix",
                "axum",
                "rocket",
                "supabase",
                "firebase",
                "graphql",
                "trpc",
            ],
        ),
        capability(
            "No authentication solution detected",
            &[
                "nextauth", "auth.js", "passport", "clerk", "jwt", "lucia", "devise", "supabase",
                "firebase",
            ],
        ),
        capability(
            "No input validation library detected",
            &["zod", "joi", "yup", "class validator", "pydantic"],
        ),
    ],
    standing_gaps: &[],
    recommendations: &[
        (
            "API framework",
            "Introduce a dedicated API layer (Express, FastAPI or framework API routes)",
        ),
        (
            "authentication",
            "Adopt a managed authentication provider such as Auth.js, Clerk or Supabase Auth",
        ),
        ("validation", "Validate request payloads with a schema library such as Zod"),
    ],
    priority: PriorityScheme::ThreeTier {
        medium_from: 1,
        high_above: 2,
    },
};

static DATABASE: Checklist = Checklist {
    category: Category::Database,
    capabilities: &[
        capability(
            "No database detected",
            &["postgresql", "mysql", "mongodb", "sqlite", "firestore", "supabase"],
        ),
        capability(
            "No ORM or query builder detected",
            &[
                "prisma",
                "drizzle",
                "typeorm",
                "sequelize",
                "knex",
                "kysely",
                "mongoose",
                "sqlalchemy",
                "django orm",
                "activerecord",
                "eloquent",
                "doctrine",
                "gorm",
                "diesel",
                "sqlx",
                "seaorm",
            ],
        ),
        capability("No caching layer detected", &["redis", "memcached"]),
    ],
    standing_gaps: &["No backup strategy documented"],
    recommendations: &[
        (
            "No database",
            "Choose a managed database such as PostgreSQL (Supabase, Neon) for persistent data",
        ),
        ("ORM", "Adopt an ORM such as Prisma or Drizzle for type-safe queries"),
        ("caching", "Add a caching layer such as Redis for frequently read data"),
        ("backup", "Document and automate database backups with periodic restore drills"),
    ],
    priority: PriorityScheme::ThreeTier {
        medium_from: 1,
        high_above: 2,
    },
};

static INFRASTRUCTURE: Checklist = Checklist {
    category: Category::Infrastructure,
    capabilities: &[
        capability("No containerization detected", &["docker", "kubernetes", "helm"]),
        capability(
            "No CI/CD pipeline detected",
            &["github actions", "gitlab ci", "circleci", "jenkins", "travis"],
        ),
        capability(
            "No monitoring or error tracking detected",
            &["sentry", "datadog", "new relic", "prometheus", "opentelemetry"],
        ),
        capability(
            "No infrastructure as code detected",
            &["terraform", "pulumi", "aws cdk", "serverless"],
        ),
    ],
    standing_gaps: &[],
    recommendations: &[
        ("containerization", "Containerize the application with Docker for reproducible builds"),
        ("CI/CD", "Set up a CI/CD pipeline (e.g. GitHub Actions) for tests and deploys"),
        ("monitoring", "Add error tracking and monitoring such as Sentry or OpenTelemetry"),
        ("infrastructure as code", "Describe infrastructure as code with Terraform or Pulumi"),
    ],
    priority: PriorityScheme::ThreeTier {
        medium_from: 1,
        high_above: 2,
    },
};

static PLATFORMS: Checklist = Checklist {
    category: Category::Platforms,
    capabilities: &[
        capability(
            "No deployment platform detected",
            &[
                "vercel", "netlify", "fly.io", "heroku", "render", "railway", "firebase", "supabase",
            ],
        ),
        capability(
            "No product analytics detected",
            &[
                "posthog",
                "mixpanel",
                "segment",
                "google analytics",
                "amplitude",
                "vercel analytics",
            ],
        ),
        capability(
            "No mobile platform support",
            &["react native", "expo", "capacitor", "flutter"],
        ),
        capability("No desktop platform support", &["electron", "tauri"]),
    ],
    standing_gaps: &[],
    recommendations: &[
        ("deployment platform", "Deploy on a managed platform such as Vercel or Fly.io"),
        ("analytics", "Instrument product analytics (PostHog, Mixpanel) to measure usage"),
    ],
    priority: PriorityScheme::TwoTier { medium_from: 1 },
};

static AI: Checklist = Checklist {
    category: Category::Ai,
    capabilities: &[
        capability(
            "No AI model provider integrated",
            &[
                "openai",
                "anthropic",
                "gemini",
                "cohere",
                "mistral",
                "hugging face",
                "ollama",
                "replicate",
            ],
        ),
        capability(
            "No AI orchestration framework detected",
            &["langchain", "llamaindex", "vercel ai sdk", "transformers"],
        ),
        capability(
            "No vector store for retrieval detected",
            &["pinecone", "chroma", "pgvector", "weaviate", "qdrant"],
        ),
    ],
    standing_gaps: &[],
    recommendations: &[
        ("model provider", "Evaluate an LLM provider (OpenAI, Anthropic) for AI features"),
        (
            "orchestration framework",
            "Use an orchestration SDK such as the Vercel AI SDK or LangChain",
        ),
        (
            "vector store",
            "Add a vector store (pgvector, Pinecone) for retrieval-augmented generation",
        ),
    ],
    priority: PriorityScheme::TwoTier { medium_from: 1 },
};

static DEVELOPMENT: Checklist = Checklist {
    category: Category::Development,
    capabilities: &[
        capability(
            "No linter configured",
            &[
                "eslint", "biome", "ruff", "flake8", "pylint", "rubocop", "phpstan", "golangci",
                "clippy",
            ],
        ),
        capability(
            "No code formatter configured",
            &["prettier", "biome", "black", "ruff", "php cs fixer", "rustfmt"],
        ),
        capability(
            "No test framework detected",
            &[
                "jest",
                "vitest",
                "mocha",
                "playwright",
                "cypress",
                "testing library",
                "pytest",
                "rspec",
                "phpunit",
                "testify",
                "proptest",
                "criterion",
            ],
        ),
        capability("No static type checking detected", &["typescript", "mypy"]),
        capability("No git hooks configured", &["husky", "lint staged", "pre commit"]),
    ],
    standing_gaps: &[],
    recommendations: &[
        ("linter", "Configure a linter (ESLint, Ruff) and enforce it in CI"),
        ("formatter", "Adopt an automatic code formatter such as Prettier"),
        ("test framework", "Add a test framework (Vitest, Jest, pytest) with CI coverage"),
        ("type checking", "Enable static type checking to catch errors before runtime"),
    ],
    priority: PriorityScheme::ThreeTier {
        medium_from: 2,
        high_above: 3,
    },
};

static INTEGRATIONS: Checklist = Checklist {
    category: Category::Integrations,
    capabilities: &[
        capability(
            "No payment processing integration",
            &["stripe", "paddle", "lemonsqueezy"],
        ),
        capability(
            "No transactional email service",
            &["resend", "sendgrid", "nodemailer", "postmark", "mailgun"],
        ),
        capability(
            "No error tracking integration",
            &["sentry", "bugsnag", "rollbar", "logrocket"],
        ),
        capability(
            "No analytics integration",
            &[
                "posthog",
                "mixpanel",
                "segment",
                "vercel analytics",
                "google analytics",
            ],
        ),
    ],
    standing_gaps: &[],
    recommendations: &[
        ("payment", "Integrate a payment provider such as Stripe if the product is monetized"),
        ("email", "Use a transactional email service such as Resend or Postmark"),
        ("error tracking", "Report runtime errors to a tracker such as Sentry"),
        ("analytics", "Add an analytics integration to understand user behavior"),
    ],
    priority: PriorityScheme::TwoTier { medium_from: 2 },
};
