//! Built-in tables used when the configuration does not provide its own.

use crate::types::config::TechnologyRule;
use crate::types::scoring::{MaturityStage, RiskLevel};
use std::collections::{BTreeMap, HashMap};

pub const STOPWORDS: &[&str] = &[
    "fix", "update", "add", "change", "remove", "delete", "merge", "commit", "push", "pull",
    "clone", "fork", "issue", "pr", "bug", "feature", "test", "docs", "refactor", "style", "perf",
    "security", "ci", "api", "file", "path", "code", "function", "class", "method", "variable",
    "parameter", "return", "new", "old",
];

pub const TECH_KEYWORDS: &[&str] = &[
    // languages
    "python", "javascript", "typescript", "java", "go", "rust", "cpp", "c++", "c#", "ruby", "php",
    "swift", "kotlin", "scala", "r", "matlab", "julia", "dart", "elixir",
    // frontend
    "react", "vue", "angular", "svelte", "nextjs", "nuxt", "gatsby", "vite", "webpack", "rollup",
    "babel", "tailwind",
    // backend
    "django", "flask", "fastapi", "spring", "express", "nestjs", "koa", "fastify", "rails",
    "laravel", "aspnet", "gin",
    // databases
    "postgresql", "mysql", "mongodb", "redis", "elasticsearch", "sqlite", "mariadb", "oracle",
    "dynamodb", "cassandra",
    // ml
    "tensorflow", "pytorch", "keras", "scikit-learn", "pandas", "numpy", "opencv", "nlp", "gpt",
    "llm", "transformer", "bert", "attention", "diffusion", "gan", "rl", "rlhf",
    // cloud native
    "kubernetes", "docker", "terraform", "ansible", "jenkins", "gitlab", "github", "aws", "azure",
    "gcp", "serverless", "microservice", "service-mesh", "istio", "envoy",
    // other
    "graphql", "rest", "grpc", "websocket", "oauth", "jwt", "blockchain", "web3", "crypto", "defi",
    "nft",
];

const LANGUAGES: &[(&str, &str)] = &[
    ("react", "JavaScript"),
    ("angular", "TypeScript"),
    ("vue", "JavaScript"),
    ("tensorflow", "Python"),
    ("pytorch", "Python"),
    ("django", "Python"),
    ("spring-boot", "Java"),
    ("ansible", "Python"),
    ("kubernetes", "Go"),
    ("docker", "Go"),
    ("spark", "Scala"),
    ("flink", "Java"),
    ("airflow", "Python"),
    ("superset", "Python"),
    ("tvm", "C++"),
    ("beam", "Java"),
    ("hudi", "Java"),
    ("iceberg", "Java"),
    ("pulsar", "Java"),
    ("doris", "Java"),
    ("arrow", "C++"),
    ("apisix", "Lua"),
    ("swift", "Swift"),
    ("aspnetcore", "C#"),
    ("efcore", "C#"),
    ("maui", "C#"),
    ("roslyn", "C#"),
    ("runtime", "C#"),
    ("aws-cdk", "TypeScript"),
    ("ccxt", "JavaScript"),
    ("ceph", "C++"),
    ("cilium", "Go"),
    ("cmssw", "C++"),
    ("podman", "Go"),
    ("dbeaver", "Java"),
    ("deno", "TypeScript"),
    ("electron", "C++"),
    ("expo", "TypeScript"),
    ("gatsby", "JavaScript"),
    ("gentoo", "Shell"),
    ("sentry", "Python"),
    ("codeql", "JavaScript"),
    ("gitpod", "TypeScript"),
    ("gitea", "Go"),
    ("godot", "C++"),
];

pub fn languages() -> HashMap<String, String> {
    LANGUAGES
        .iter()
        .map(|(repo, language)| (repo.to_string(), language.to_string()))
        .collect()
}

pub fn technology_rules() -> BTreeMap<String, TechnologyRule> {
    use MaturityStage::{Emerging, Growing, Mature};
    use RiskLevel::{High, Low, Medium};

    [
        ("Java", Mature, 0.02, Low, "Backend"),
        ("Python", Mature, 0.15, Low, "Backend"),
        ("JavaScript", Mature, 0.08, Low, "Frontend"),
        ("TypeScript", Growing, 0.25, Low, "Frontend"),
        ("Go", Growing, 0.20, Low, "Backend"),
        ("Rust", Emerging, 0.35, Medium, "Backend"),
        ("Kotlin", Growing, 0.18, Low, "Mobile"),
        ("Swift", Growing, 0.12, Low, "Mobile"),
        ("React", Mature, 0.05, Low, "Frontend"),
        ("Vue", Growing, 0.15, Low, "Frontend"),
        ("Angular", Mature, 0.03, Low, "Frontend"),
        ("Spring", Mature, 0.01, Low, "Backend"),
        ("Docker", Mature, 0.08, Low, "DevOps"),
        ("Kubernetes", Growing, 0.22, Low, "DevOps"),
        ("TensorFlow", Growing, 0.30, Medium, "AI/ML"),
        ("React Native", Growing, 0.12, Low, "Mobile"),
        ("Flutter", Emerging, 0.40, Medium, "Mobile"),
        ("GraphQL", Emerging, 0.35, Medium, "API"),
        ("Serverless", Emerging, 0.45, High, "Cloud"),
        ("WebAssembly", Emerging, 0.50, High, "Web"),
    ]
    .into_iter()
    .map(|(name, stage, growth_rate, risk_level, category)| {
        (
            name.to_string(),
            TechnologyRule {
                stage,
                growth_rate,
                risk_level,
                category: Some(category.to_string()),
            },
        )
    })
    .collect()
}
