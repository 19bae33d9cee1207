//! Detection rule tables.
//!
//! Tables are evaluated top to bottom and every matching rule contributes.
//! The same technology may appear in several categories (Supabase is a
//! backend, a database and a platform); that is intended.

use super::rules::Effect::{Label, Versioned};
use super::rules::Predicate::{
    Config, Dependency, DependencyPrefix, Directory, Path, PathSuffix,
};
use super::rules::{rule, Rule};
use crate::types::Category;

// ============================================================================
// Frameworks
// ============================================================================

pub const FRAMEWORK_RULES: &[Rule] = &[
    rule(Dependency("next"), Label("Next.js")),
    rule(Config("next.config.js"), Label("Next.js")),
    rule(Config("next.config.mjs"), Label("Next.js")),
    rule(Config("next.config.ts"), Label("Next.js")),
    rule(Dependency("react"), Label("React")),
    rule(Dependency("vue"), Label("Vue.js")),
    rule(Dependency("nuxt"), Label("Nuxt")),
    rule(Config("nuxt.config.ts"), Label("Nuxt")),
    rule(Dependency("@angular/core"), Label("Angular")),
    rule(Config("angular.json"), Label("Angular")),
    rule(Dependency("svelte"), Label("Svelte")),
    rule(Dependency("@sveltejs/kit"), Label("SvelteKit")),
    rule(Config("svelte.config.js"), Label("Svelte")),
    rule(Dependency("solid-js"), Label("SolidJS")),
    rule(Dependency("@remix-run/react"), Label("Remix")),
    rule(Dependency("astro"), Label("Astro")),
    rule(Dependency("gatsby"), Label("Gatsby")),
    rule(Dependency("tailwindcss"), Label("Tailwind CSS")),
    rule(Config("tailwind.config.js"), Label("Tailwind CSS")),
    rule(Config("tailwind.config.ts"), Label("Tailwind CSS")),
    rule(Dependency("express"), Label("Express")),
    rule(Dependency("fastify"), Label("Fastify")),
    rule(Dependency("@nestjs/core"), Label("NestJS")),
    rule(Dependency("koa"), Label("Koa")),
    rule(Dependency("hono"), Label("Hono")),
    rule(Dependency("electron"), Label("Electron")),
    rule(Dependency("react-native"), Label("React Native")),
    rule(Dependency("expo"), Label("Expo")),
    rule(Dependency("django"), Label("Django")),
    rule(Dependency("flask"), Label("Flask")),
    rule(Dependency("fastapi"), Label("FastAPI")),
    rule(Dependency("rails"), Label("Ruby on Rails")),
    rule(Dependency("sinatra"), Label("Sinatra")),
    rule(Dependency("laravel/framework"), Label("Laravel")),
    rule(Dependency("symfony/framework-bundle"), Label("Symfony")),
    rule(Dependency("github.com/gin-gonic/gin"), Label("Gin")),
    rule(Dependency("github.com/labstack/echo/v4"), Label("Echo")),
    rule(Dependency("github.com/gofiber/fiber/v2"), Label("Fiber")),
    rule(Dependency("actix-web"), Label("Actix Web")),
    rule(Dependency("axum"), Label("Axum")),
    rule(Dependency("rocket"), Label("Rocket")),
];

// ============================================================================
// Categories
// ============================================================================

const FRONTEND_RULES: &[Rule] = &[
    rule(Dependency("next"), Versioned("Next.js")),
    rule(Dependency("react"), Versioned("React")),
    rule(Dependency("vue"), Versioned("Vue")),
    rule(Dependency("nuxt"), Versioned("Nuxt")),
    rule(Dependency("@angular/core"), Versioned("Angular")),
    rule(Dependency("svelte"), Versioned("Svelte")),
    rule(Dependency("@sveltejs/kit"), Versioned("SvelteKit")),
    rule(Dependency("solid-js"), Versioned("SolidJS")),
    rule(Dependency("preact"), Versioned("Preact")),
    rule(Dependency("astro"), Versioned("Astro")),
    rule(Dependency("@remix-run/react"), Versioned("Remix")),
    rule(Dependency("gatsby"), Versioned("Gatsby")),
    rule(Dependency("typescript"), Versioned("TypeScript")),
    rule(Dependency("tailwindcss"), Versioned("Tailwind-CSS")),
    rule(Dependency("styled-components"), Versioned("Styled-Components")),
    rule(Dependency("@emotion/react"), Versioned("Emotion")),
    rule(Dependency("sass"), Versioned("Sass")),
    rule(Dependency("bootstrap"), Versioned("Bootstrap")),
    rule(Dependency("@mui/material"), Versioned("Material-UI")),
    rule(Dependency("@chakra-ui/react"), Versioned("Chakra-UI")),
    rule(Dependency("antd"), Versioned("Ant-Design")),
    rule(DependencyPrefix("@radix-ui/"), Versioned("Radix-UI")),
    rule(Dependency("redux"), Versioned("Redux")),
    rule(Dependency("@reduxjs/toolkit"), Versioned("Redux-Toolkit")),
    rule(Dependency("zustand"), Versioned("Zustand")),
    rule(Dependency("jotai"), Versioned("Jotai")),
    rule(Dependency("mobx"), Versioned("MobX")),
    rule(Dependency("recoil"), Versioned("Recoil")),
    rule(Dependency("pinia"), Versioned("Pinia")),
    rule(Dependency("vuex"), Versioned("Vuex")),
    rule(Dependency("@tanstack/react-query"), Versioned("TanStack-Query")),
    rule(Dependency("swr"), Versioned("SWR")),
    rule(Dependency("framer-motion"), Versioned("Framer-Motion")),
    rule(Config("tsconfig.json"), Label("TypeScript")),
    rule(Config("tailwind.config.js"), Label("Tailwind CSS")),
    rule(Config("tailwind.config.ts"), Label("Tailwind CSS")),
    rule(Config("angular.json"), Label("Angular")),
    rule(Config("svelte.config.js"), Label("Svelte")),
    rule(Config("nuxt.config.ts"), Label("Nuxt")),
    rule(Config("next.config.js"), Label("Next.js")),
    rule(Config("next.config.mjs"), Label("Next.js")),
    rule(Config("next.config.ts"), Label("Next.js")),
];

const BACKEND_RULES: &[Rule] = &[
    rule(Dependency("express"), Versioned("Express")),
    rule(Dependency("fastify"), Versioned("Fastify")),
    rule(Dependency("@nestjs/core"), Versioned("NestJS")),
    rule(Dependency("koa"), Versioned("Koa")),
    rule(Dependency("hono"), Versioned("Hono")),
    rule(Dependency("@hapi/hapi"), Versioned("Hapi")),
    rule(Dependency("next"), Versioned("Next.js-API-Routes")),
    rule(Dependency("@supabase/supabase-js"), Versioned("Supabase")),
    rule(Dependency("firebase-admin"), Versioned("Firebase-Admin")),
    rule(Dependency("firebase"), Versioned("Firebase")),
    rule(Dependency("graphql"), Versioned("GraphQL")),
    rule(Dependency("@apollo/server"), Versioned("Apollo-Server")),
    rule(Dependency("@trpc/server"), Versioned("tRPC")),
    rule(Dependency("next-auth"), Versioned("NextAuth")),
    rule(Dependency("@auth/core"), Versioned("Auth.js")),
    rule(Dependency("passport"), Versioned("Passport")),
    rule(DependencyPrefix("@clerk/"), Versioned("Clerk")),
    rule(Dependency("jsonwebtoken"), Versioned("JWT")),
    rule(Dependency("lucia"), Versioned("Lucia")),
    rule(Dependency("zod"), Versioned("Zod")),
    rule(Dependency("joi"), Versioned("Joi")),
    rule(Dependency("yup"), Versioned("Yup")),
    rule(Dependency("class-validator"), Versioned("Class-Validator")),
    rule(Dependency("django"), Versioned("Django")),
    rule(Dependency("djangorestframework"), Versioned("Django-REST-Framework")),
    rule(Dependency("flask"), Versioned("Flask")),
    rule(Dependency("fastapi"), Versioned("FastAPI")),
    rule(Dependency("pydantic"), Versioned("Pydantic")),
    rule(Dependency("celery"), Versioned("Celery")),
    rule(Dependency("rails"), Versioned("Rails")),
    rule(Dependency("sinatra"), Versioned("Sinatra")),
    rule(Dependency("devise"), Versioned("Devise")),
    rule(Dependency("laravel/framework"), Versioned("Laravel")),
    rule(Dependency("symfony/framework-bundle"), Versioned("Symfony")),
    rule(Dependency("github.com/gin-gonic/gin"), Versioned("Gin")),
    rule(Dependency("github.com/labstack/echo/v4"), Versioned("Echo")),
    rule(Dependency("github.com/gofiber/fiber/v2"), Versioned("Fiber")),
    rule(Dependency("actix-web"), Versioned("Actix-Web")),
    rule(Dependency("axum"), Versioned("Axum")),
    rule(Dependency("rocket"), Versioned("Rocket")),
    rule(Dependency("tokio"), Versioned("Tokio")),
    rule(Config("supabase/config.toml"), Label("Supabase")),
];

const DATABASE_RULES: &[Rule] = &[
    rule(Dependency("@supabase/supabase-js"), Label("PostgreSQL")),
    rule(Dependency("@supabase/supabase-js"), Label("Supabase")),
    rule(Dependency("pg"), Label("PostgreSQL")),
    rule(Dependency("postgres"), Label("PostgreSQL")),
    rule(Dependency("psycopg2"), Label("PostgreSQL")),
    rule(Dependency("psycopg2-binary"), Label("PostgreSQL")),
    rule(Dependency("asyncpg"), Label("PostgreSQL")),
    rule(Dependency("github.com/lib/pq"), Label("PostgreSQL")),
    rule(Dependency("github.com/jackc/pgx/v5"), Label("PostgreSQL")),
    rule(Dependency("mysql2"), Label("MySQL")),
    rule(Dependency("mysql"), Label("MySQL")),
    rule(Dependency("pymysql"), Label("MySQL")),
    rule(Dependency("mongodb"), Label("MongoDB")),
    rule(Dependency("pymongo"), Label("MongoDB")),
    rule(Dependency("better-sqlite3"), Label("SQLite")),
    rule(Dependency("sqlite3"), Label("SQLite")),
    rule(Dependency("rusqlite"), Label("SQLite")),
    rule(Dependency("firebase"), Label("Firestore")),
    rule(Dependency("@prisma/client"), Versioned("Prisma")),
    rule(Dependency("prisma"), Versioned("Prisma")),
    rule(Dependency("drizzle-orm"), Versioned("Drizzle-ORM")),
    rule(Dependency("typeorm"), Versioned("TypeORM")),
    rule(Dependency("sequelize"), Versioned("Sequelize")),
    rule(Dependency("knex"), Versioned("Knex")),
    rule(Dependency("kysely"), Versioned("Kysely")),
    rule(Dependency("mongoose"), Versioned("Mongoose")),
    rule(Dependency("sqlalchemy"), Versioned("SQLAlchemy")),
    rule(Dependency("django"), Label("Django-ORM")),
    rule(Dependency("activerecord"), Versioned("ActiveRecord")),
    rule(Dependency("rails"), Label("ActiveRecord")),
    rule(Dependency("laravel/framework"), Label("Eloquent-ORM")),
    rule(Dependency("doctrine/orm"), Versioned("Doctrine-ORM")),
    rule(Dependency("gorm.io/gorm"), Versioned("GORM")),
    rule(Dependency("diesel"), Versioned("Diesel")),
    rule(Dependency("sqlx"), Versioned("SQLx")),
    rule(Dependency("sea-orm"), Versioned("SeaORM")),
    rule(Dependency("redis"), Versioned("Redis")),
    rule(Dependency("ioredis"), Versioned("Redis")),
    rule(Dependency("@upstash/redis"), Versioned("Upstash-Redis")),
    rule(Dependency("github.com/redis/go-redis/v9"), Versioned("Redis")),
    rule(Dependency("memcached"), Versioned("Memcached")),
    rule(Dependency("pymemcache"), Versioned("Memcached")),
    rule(Config("prisma/schema.prisma"), Label("Prisma Schema")),
    rule(Config("supabase/config.toml"), Label("Supabase")),
    rule(Directory("supabase/migrations"), Label("SQL Migrations")),
];

const INFRASTRUCTURE_RULES: &[Rule] = &[
    rule(Config("Dockerfile"), Label("Docker")),
    rule(Config("docker-compose.yml"), Label("Docker Compose")),
    rule(Path("docker-compose.yaml"), Label("Docker Compose")),
    rule(Path("compose.yaml"), Label("Docker Compose")),
    rule(Directory("k8s"), Label("Kubernetes")),
    rule(Directory("kubernetes"), Label("Kubernetes")),
    rule(Path("Chart.yaml"), Label("Helm")),
    rule(Directory(".github/workflows"), Label("GitHub Actions")),
    rule(Config(".gitlab-ci.yml"), Label("GitLab CI")),
    rule(Directory(".circleci"), Label("CircleCI")),
    rule(Path("Jenkinsfile"), Label("Jenkins")),
    rule(Path(".travis.yml"), Label("Travis CI")),
    rule(Config("vercel.json"), Label("Vercel")),
    rule(Config("netlify.toml"), Label("Netlify")),
    rule(Path("fly.toml"), Label("Fly.io")),
    rule(Path("render.yaml"), Label("Render")),
    rule(Path("railway.json"), Label("Railway")),
    rule(Path("Procfile"), Label("Heroku")),
    rule(Path("serverless.yml"), Label("Serverless Framework")),
    rule(PathSuffix(".tf"), Label("Terraform")),
    rule(Dependency("@pulumi/pulumi"), Versioned("Pulumi")),
    rule(Dependency("aws-cdk-lib"), Versioned("AWS-CDK")),
    rule(Dependency("aws-sdk"), Versioned("AWS-SDK")),
    rule(DependencyPrefix("@aws-sdk/"), Label("AWS SDK")),
    rule(Dependency("boto3"), Label("AWS SDK")),
    rule(DependencyPrefix("@sentry/"), Label("Sentry")),
    rule(Dependency("sentry-sdk"), Label("Sentry")),
    rule(Dependency("dd-trace"), Versioned("Datadog")),
    rule(Dependency("newrelic"), Versioned("New-Relic")),
    rule(Dependency("prom-client"), Versioned("Prometheus")),
    rule(DependencyPrefix("@opentelemetry/"), Label("OpenTelemetry")),
    rule(Dependency("opentelemetry"), Versioned("OpenTelemetry")),
];

const PLATFORM_RULES: &[Rule] = &[
    rule(Dependency("@supabase/supabase-js"), Versioned("Supabase")),
    rule(Dependency("firebase"), Versioned("Firebase")),
    rule(Config("firebase.json"), Label("Firebase")),
    rule(Config("vercel.json"), Label("Vercel")),
    rule(Dependency("@vercel/analytics"), Versioned("Vercel-Analytics")),
    rule(Config("netlify.toml"), Label("Netlify")),
    rule(Path("fly.toml"), Label("Fly.io")),
    rule(Path("Procfile"), Label("Heroku")),
    rule(Path("render.yaml"), Label("Render")),
    rule(Path("railway.json"), Label("Railway")),
    rule(DependencyPrefix("@clerk/"), Label("Clerk")),
    rule(Dependency("react-native"), Versioned("React-Native")),
    rule(Dependency("expo"), Versioned("Expo")),
    rule(Dependency("electron"), Versioned("Electron")),
    rule(Dependency("@capacitor/core"), Versioned("Capacitor")),
    rule(Dependency("@tauri-apps/api"), Versioned("Tauri")),
    rule(Path("pubspec.yaml"), Label("Flutter")),
    rule(Dependency("posthog-js"), Versioned("PostHog")),
    rule(Dependency("mixpanel-browser"), Versioned("Mixpanel")),
    rule(Dependency("@segment/analytics-next"), Versioned("Segment")),
    rule(Dependency("react-ga4"), Versioned("Google-Analytics")),
    rule(DependencyPrefix("@amplitude/"), Label("Amplitude")),
];

const AI_RULES: &[Rule] = &[
    rule(Dependency("openai"), Versioned("OpenAI")),
    rule(Dependency("async-openai"), Versioned("OpenAI")),
    rule(Dependency("github.com/sashabaranov/go-openai"), Versioned("OpenAI")),
    rule(Dependency("@anthropic-ai/sdk"), Versioned("Anthropic")),
    rule(Dependency("anthropic"), Versioned("Anthropic")),
    rule(Dependency("@google/generative-ai"), Versioned("Gemini")),
    rule(Dependency("google-generativeai"), Versioned("Gemini")),
    rule(Dependency("cohere-ai"), Versioned("Cohere")),
    rule(Dependency("cohere"), Versioned("Cohere")),
    rule(Dependency("@mistralai/mistralai"), Versioned("Mistral")),
    rule(Dependency("@huggingface/inference"), Versioned("Hugging-Face")),
    rule(Dependency("transformers"), Versioned("Hugging-Face-Transformers")),
    rule(Dependency("ollama"), Versioned("Ollama")),
    rule(Dependency("replicate"), Versioned("Replicate")),
    rule(Dependency("ai"), Versioned("Vercel-AI-SDK")),
    rule(Dependency("langchain"), Versioned("LangChain")),
    rule(Dependency("@langchain/core"), Versioned("LangChain")),
    rule(Dependency("llamaindex"), Versioned("LlamaIndex")),
    rule(Dependency("llama-index"), Versioned("LlamaIndex")),
    rule(Dependency("@pinecone-database/pinecone"), Versioned("Pinecone")),
    rule(Dependency("pinecone-client"), Versioned("Pinecone")),
    rule(Dependency("chromadb"), Versioned("Chroma")),
    rule(Dependency("pgvector"), Versioned("pgvector")),
    rule(Dependency("weaviate-ts-client"), Versioned("Weaviate")),
    rule(Dependency("weaviate-client"), Versioned("Weaviate")),
    rule(Dependency("@qdrant/js-client-rest"), Versioned("Qdrant")),
    rule(Dependency("qdrant-client"), Versioned("Qdrant")),
    rule(Dependency("torch"), Versioned("PyTorch")),
    rule(Dependency("tensorflow"), Versioned("TensorFlow")),
    rule(Dependency("@tensorflow/tfjs"), Versioned("TensorFlow.js")),
    rule(Dependency("scikit-learn"), Versioned("scikit-learn")),
];

const DEVELOPMENT_RULES: &[Rule] = &[
    rule(Dependency("typescript"), Versioned("TypeScript")),
    rule(Dependency("eslint"), Versioned("ESLint")),
    rule(Dependency("prettier"), Versioned("Prettier")),
    rule(Dependency("@biomejs/biome"), Versioned("Biome")),
    rule(Dependency("jest"), Versioned("Jest")),
    rule(Dependency("vitest"), Versioned("Vitest")),
    rule(Dependency("mocha"), Versioned("Mocha")),
    rule(Dependency("@playwright/test"), Versioned("Playwright")),
    rule(Dependency("cypress"), Versioned("Cypress")),
    rule(Dependency("@testing-library/react"), Versioned("Testing-Library")),
    rule(Dependency("vite"), Versioned("Vite")),
    rule(Dependency("webpack"), Versioned("Webpack")),
    rule(Dependency("esbuild"), Versioned("esbuild")),
    rule(Dependency("turbo"), Versioned("Turborepo")),
    rule(Dependency("husky"), Versioned("Husky")),
    rule(Dependency("lint-staged"), Versioned("lint-staged")),
    rule(DependencyPrefix("@storybook/"), Label("Storybook")),
    rule(Dependency("pytest"), Versioned("pytest")),
    rule(Dependency("black"), Versioned("Black")),
    rule(Dependency("ruff"), Versioned("Ruff")),
    rule(Dependency("mypy"), Versioned("mypy")),
    rule(Dependency("flake8"), Versioned("Flake8")),
    rule(Dependency("pylint"), Versioned("Pylint")),
    rule(Dependency("pre-commit"), Versioned("pre-commit")),
    rule(Dependency("rspec-rails"), Versioned("RSpec")),
    rule(Dependency("rspec"), Versioned("RSpec")),
    rule(Dependency("rubocop"), Versioned("RuboCop")),
    rule(Dependency("phpunit/phpunit"), Versioned("PHPUnit")),
    rule(Dependency("phpstan/phpstan"), Versioned("PHPStan")),
    rule(Dependency("friendsofphp/php-cs-fixer"), Versioned("PHP-CS-Fixer")),
    rule(Dependency("github.com/stretchr/testify"), Versioned("Testify")),
    rule(Dependency("proptest"), Versioned("proptest")),
    rule(Dependency("criterion"), Versioned("Criterion")),
    rule(Config("tsconfig.json"), Label("TypeScript")),
    rule(Config(".eslintrc.json"), Label("ESLint")),
    rule(Path("eslint.config.js"), Label("ESLint")),
    rule(Path("eslint.config.mjs"), Label("ESLint")),
    rule(Config(".prettierrc"), Label("Prettier")),
    rule(Config("jest.config.js"), Label("Jest")),
    rule(Path(".pre-commit-config.yaml"), Label("pre-commit")),
    rule(Directory(".husky"), Label("Husky")),
    rule(Path("rustfmt.toml"), Label("rustfmt")),
    rule(Path("clippy.toml"), Label("Clippy")),
    rule(Path(".golangci.yml"), Label("golangci-lint")),
    rule(Path(".rubocop.yml"), Label("RuboCop")),
];

const INTEGRATION_RULES: &[Rule] = &[
    rule(Dependency("stripe"), Versioned("Stripe")),
    rule(Dependency("@stripe/stripe-js"), Versioned("Stripe-JS")),
    rule(Dependency("@paddle/paddle-js"), Versioned("Paddle")),
    rule(Dependency("@lemonsqueezy/lemonsqueezy.js"), Versioned("LemonSqueezy")),
    rule(Dependency("resend"), Versioned("Resend")),
    rule(Dependency("@sendgrid/mail"), Versioned("SendGrid")),
    rule(Dependency("nodemailer"), Versioned("Nodemailer")),
    rule(Dependency("postmark"), Versioned("Postmark")),
    rule(Dependency("mailgun.js"), Versioned("Mailgun")),
    rule(DependencyPrefix("@sentry/"), Label("Sentry")),
    rule(Dependency("sentry-sdk"), Label("Sentry")),
    rule(Dependency("@bugsnag/js"), Versioned("Bugsnag")),
    rule(Dependency("rollbar"), Versioned("Rollbar")),
    rule(Dependency("logrocket"), Versioned("LogRocket")),
    rule(Dependency("posthog-js"), Versioned("PostHog")),
    rule(Dependency("mixpanel-browser"), Versioned("Mixpanel")),
    rule(Dependency("@segment/analytics-next"), Versioned("Segment")),
    rule(Dependency("@vercel/analytics"), Versioned("Vercel-Analytics")),
    rule(Dependency("twilio"), Versioned("Twilio")),
    rule(Dependency("@slack/web-api"), Versioned("Slack")),
    rule(Dependency("@octokit/rest"), Versioned("GitHub-API")),
    rule(Dependency("algoliasearch"), Versioned("Algolia")),
    rule(Dependency("cloudinary"), Versioned("Cloudinary")),
    rule(Dependency("uploadthing"), Versioned("UploadThing")),
    rule(Dependency("@aws-sdk/client-s3"), Versioned("AWS-S3")),
    rule(Dependency("pusher"), Versioned("Pusher")),
];

/// Rule table per category, in report order.
pub const CATEGORY_RULES: &[(Category, &[Rule])] = &[
    (Category::Frontend, FRONTEND_RULES),
    (Category::Backend, BACKEND_RULES),
    (Category::Database, DATABASE_RULES),
    (Category::Infrastructure, INFRASTRUCTURE_RULES),
    (Category::Platforms, PLATFORM_RULES),
    (Category::Ai, AI_RULES),
    (Category::Development, DEVELOPMENT_RULES),
    (Category::Integrations, INTEGRATION_RULES),
];

// ============================================================================
// Developer Tooling
// ============================================================================

/// Tool names by dependency presence.
pub const DEV_TOOL_RULES: &[Rule] = &[
    rule(Dependency("typescript"), Label("TypeScript")),
    rule(Dependency("eslint"), Label("ESLint")),
    rule(Dependency("prettier"), Label("Prettier")),
    rule(Dependency("@biomejs/biome"), Label("Biome")),
    rule(Dependency("jest"), Label("Jest")),
    rule(Dependency("vitest"), Label("Vitest")),
    rule(Dependency("mocha"), Label("Mocha")),
    rule(Dependency("@playwright/test"), Label("Playwright")),
    rule(Dependency("cypress"), Label("Cypress")),
    rule(Dependency("vite"), Label("Vite")),
    rule(Dependency("webpack"), Label("Webpack")),
    rule(Dependency("turbo"), Label("Turborepo")),
    rule(Dependency("husky"), Label("Husky")),
    rule(Dependency("lint-staged"), Label("lint-staged")),
    rule(DependencyPrefix("@storybook/"), Label("Storybook")),
    rule(Dependency("nodemon"), Label("Nodemon")),
    rule(Dependency("ts-node"), Label("ts-node")),
    rule(Dependency("pytest"), Label("pytest")),
    rule(Dependency("black"), Label("Black")),
    rule(Dependency("ruff"), Label("Ruff")),
    rule(Dependency("mypy"), Label("mypy")),
    rule(Dependency("flake8"), Label("Flake8")),
    rule(Dependency("rspec-rails"), Label("RSpec")),
    rule(Dependency("rspec"), Label("RSpec")),
    rule(Dependency("rubocop"), Label("RuboCop")),
    rule(Dependency("phpunit/phpunit"), Label("PHPUnit")),
    rule(Dependency("phpstan/phpstan"), Label("PHPStan")),
    rule(Dependency("github.com/stretchr/testify"), Label("Testify")),
    rule(Dependency("proptest"), Label("proptest")),
    rule(Dependency("criterion"), Label("Criterion")),
];

// ============================================================================
// Sub-analyses
// ============================================================================

pub const CONTAINERIZATION_RULES: &[Rule] = &[
    rule(Config("Dockerfile"), Label("Docker")),
    rule(Config("docker-compose.yml"), Label("Docker Compose")),
    rule(Path("docker-compose.yaml"), Label("Docker Compose")),
    rule(Path("compose.yaml"), Label("Docker Compose")),
    rule(Directory("k8s"), Label("Kubernetes")),
    rule(Directory("kubernetes"), Label("Kubernetes")),
    rule(Path("Chart.yaml"), Label("Helm")),
];

pub const CI_CD_RULES: &[Rule] = &[
    rule(Directory(".github/workflows"), Label("GitHub Actions")),
    rule(Config(".gitlab-ci.yml"), Label("GitLab CI")),
    rule(Directory(".circleci"), Label("CircleCI")),
    rule(Path("Jenkinsfile"), Label("Jenkins")),
    rule(Path(".travis.yml"), Label("Travis CI")),
];

pub const HOSTING_RULES: &[Rule] = &[
    rule(Config("vercel.json"), Label("Vercel")),
    rule(Config("netlify.toml"), Label("Netlify")),
    rule(Config("firebase.json"), Label("Firebase Hosting")),
    rule(Path("fly.toml"), Label("Fly.io")),
    rule(Path("render.yaml"), Label("Render")),
    rule(Path("railway.json"), Label("Railway")),
    rule(Path("Procfile"), Label("Heroku")),
    rule(Path("serverless.yml"), Label("AWS Lambda")),
    rule(PathSuffix(".tf"), Label("Terraform")),
];

pub const MONITORING_RULES: &[Rule] = &[
    rule(DependencyPrefix("@sentry/"), Label("Sentry")),
    rule(Dependency("sentry-sdk"), Label("Sentry")),
    rule(Dependency("dd-trace"), Label("Datadog")),
    rule(Dependency("newrelic"), Label("New Relic")),
    rule(Dependency("prom-client"), Label("Prometheus")),
    rule(DependencyPrefix("@opentelemetry/"), Label("OpenTelemetry")),
    rule(Dependency("opentelemetry"), Label("OpenTelemetry")),
    rule(Dependency("logrocket"), Label("LogRocket")),
];

pub const DATABASE_ENGINE_RULES: &[Rule] = &[
    rule(Dependency("@supabase/supabase-js"), Label("PostgreSQL")),
    rule(Config("supabase/config.toml"), Label("PostgreSQL")),
    rule(Dependency("pg"), Label("PostgreSQL")),
    rule(Dependency("postgres"), Label("PostgreSQL")),
    rule(Dependency("psycopg2"), Label("PostgreSQL")),
    rule(Dependency("psycopg2-binary"), Label("PostgreSQL")),
    rule(Dependency("asyncpg"), Label("PostgreSQL")),
    rule(Dependency("github.com/lib/pq"), Label("PostgreSQL")),
    rule(Dependency("github.com/jackc/pgx/v5"), Label("PostgreSQL")),
    rule(Dependency("mysql2"), Label("MySQL")),
    rule(Dependency("mysql"), Label("MySQL")),
    rule(Dependency("pymysql"), Label("MySQL")),
    rule(Dependency("mongodb"), Label("MongoDB")),
    rule(Dependency("pymongo"), Label("MongoDB")),
    rule(Dependency("mongoose"), Label("MongoDB")),
    rule(Dependency("better-sqlite3"), Label("SQLite")),
    rule(Dependency("sqlite3"), Label("SQLite")),
    rule(Dependency("rusqlite"), Label("SQLite")),
    rule(Dependency("firebase"), Label("Firestore")),
];

pub const ORM_RULES: &[Rule] = &[
    rule(Dependency("@prisma/client"), Label("Prisma")),
    rule(Dependency("prisma"), Label("Prisma")),
    rule(Config("prisma/schema.prisma"), Label("Prisma")),
    rule(Dependency("drizzle-orm"), Label("Drizzle")),
    rule(Dependency("typeorm"), Label("TypeORM")),
    rule(Dependency("sequelize"), Label("Sequelize")),
    rule(Dependency("knex"), Label("Knex")),
    rule(Dependency("kysely"), Label("Kysely")),
    rule(Dependency("mongoose"), Label("Mongoose")),
    rule(Dependency("sqlalchemy"), Label("SQLAlchemy")),
    rule(Dependency("django"), Label("Django ORM")),
    rule(Dependency("activerecord"), Label("ActiveRecord")),
    rule(Dependency("rails"), Label("ActiveRecord")),
    rule(Dependency("laravel/framework"), Label("Eloquent")),
    rule(Dependency("doctrine/orm"), Label("Doctrine")),
    rule(Dependency("gorm.io/gorm"), Label("GORM")),
    rule(Dependency("diesel"), Label("Diesel")),
    rule(Dependency("sqlx"), Label("SQLx")),
    rule(Dependency("sea-orm"), Label("SeaORM")),
];

pub const CACHING_RULES: &[Rule] = &[
    rule(Dependency("redis"), Label("Redis")),
    rule(Dependency("ioredis"), Label("Redis")),
    rule(Dependency("@upstash/redis"), Label("Upstash Redis")),
    rule(Dependency("github.com/redis/go-redis/v9"), Label("Redis")),
    rule(Dependency("memcached"), Label("Memcached")),
    rule(Dependency("pymemcache"), Label("Memcached")),
];

pub const AI_PROVIDER_RULES: &[Rule] = &[
    rule(Dependency("openai"), Label("OpenAI")),
    rule(Dependency("async-openai"), Label("OpenAI")),
    rule(Dependency("github.com/sashabaranov/go-openai"), Label("OpenAI")),
    rule(Dependency("@anthropic-ai/sdk"), Label("Anthropic")),
    rule(Dependency("anthropic"), Label("Anthropic")),
    rule(Dependency("@google/generative-ai"), Label("Google Gemini")),
    rule(Dependency("google-generativeai"), Label("Google Gemini")),
    rule(Dependency("cohere-ai"), Label("Cohere")),
    rule(Dependency("cohere"), Label("Cohere")),
    rule(Dependency("@mistralai/mistralai"), Label("Mistral")),
    rule(Dependency("@huggingface/inference"), Label("Hugging Face")),
    rule(Dependency("ollama"), Label("Ollama")),
    rule(Dependency("replicate"), Label("Replicate")),
];

pub const AI_FRAMEWORK_RULES: &[Rule] = &[
    rule(Dependency("ai"), Label("Vercel AI SDK")),
    rule(Dependency("langchain"), Label("LangChain")),
    rule(Dependency("@langchain/core"), Label("LangChain")),
    rule(Dependency("llamaindex"), Label("LlamaIndex")),
    rule(Dependency("llama-index"), Label("LlamaIndex")),
    rule(Dependency("transformers"), Label("Transformers")),
    rule(Dependency("torch"), Label("PyTorch")),
    rule(Dependency("tensorflow"), Label("TensorFlow")),
    rule(Dependency("@tensorflow/tfjs"), Label("TensorFlow.js")),
    rule(Dependency("scikit-learn"), Label("scikit-learn")),
];

pub const VECTOR_STORE_RULES: &[Rule] = &[
    rule(Dependency("@pinecone-database/pinecone"), Label("Pinecone")),
    rule(Dependency("pinecone-client"), Label("Pinecone")),
    rule(Dependency("chromadb"), Label("Chroma")),
    rule(Dependency("pgvector"), Label("pgvector")),
    rule(Dependency("weaviate-ts-client"), Label("Weaviate")),
    rule(Dependency("weaviate-client"), Label("Weaviate")),
    rule(Dependency("@qdrant/js-client-rest"), Label("Qdrant")),
    rule(Dependency("qdrant-client"), Label("Qdrant")),
];
