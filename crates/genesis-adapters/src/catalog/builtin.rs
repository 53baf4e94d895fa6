//! Templates compiled into the binary.
//!
//! Bodies live under `templates/<archetype>/*.tmpl` in this crate and are
//! embedded with `include_str!`. This module only decides which body lands
//! at which destination for a given archetype and flag set.
//!
//! | Archetype  | Root layout                                              |
//! |------------|----------------------------------------------------------|
//! | `frontend` | Next.js app router, Better Auth, Drizzle, `compose.yml`  |
//! | `backend`  | `cmd/api`, `internal/{config,server,db}`, sqlc, Makefile |
//! | `hybrid`   | `compose.yml` + `Makefile`; halves go to `web/`, `api/`  |

use tracing::{debug, instrument};

use genesis_core::{
    application::ports::TemplateCatalog,
    domain::{Archetype, DomainValidator, FeatureFlags, TemplateSet},
    error::GenesisResult,
};

macro_rules! template {
    ($archetype:literal, $file:literal) => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/templates/",
            $archetype,
            "/",
            $file,
            ".tmpl"
        ))
    };
}

/// The catalog that ships with Genesis.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self
    }

    fn frontend() -> GenesisResult<TemplateSet> {
        Ok(TemplateSet::builder()
            .entry("package.json", template!("frontend", "package.json"))
            .entry("tsconfig.json", template!("frontend", "tsconfig.json"))
            .entry("tailwind.config.ts", template!("frontend", "tailwind.config.ts"))
            .entry("postcss.config.mjs", template!("frontend", "postcss.config.mjs"))
            .entry("drizzle.config.ts", template!("frontend", "drizzle.config.ts"))
            .entry("next.config.ts", template!("frontend", "next.config.ts"))
            .entry(".env", template!("frontend", "env"))
            .entry(".gitignore", template!("frontend", "gitignore"))
            .entry("compose.yml", template!("frontend", "compose.yml"))
            .entry("src/app/globals.css", template!("frontend", "globals.css"))
            .entry("src/app/layout.tsx", template!("frontend", "layout.tsx"))
            .entry("src/app/page.tsx", template!("frontend", "page.tsx"))
            .entry("src/app/auth/page.tsx", template!("frontend", "login-page.tsx"))
            .entry(
                "src/app/api/auth/[...all]/route.ts",
                template!("frontend", "auth-route.ts"),
            )
            .entry("src/server/db.ts", template!("frontend", "db.ts"))
            .entry("src/server/schema.ts", template!("frontend", "schema.ts"))
            .entry("src/lib/auth.ts", template!("frontend", "auth.ts"))
            .entry("src/lib/auth-client.ts", template!("frontend", "auth-client.ts"))
            .build()?)
    }

    fn backend(flags: FeatureFlags) -> GenesisResult<TemplateSet> {
        Ok(TemplateSet::builder()
            .entry("go.mod", template!("backend", "go.mod"))
            .entry("cmd/api/main.go", template!("backend", "main.go"))
            .entry("internal/config/config.go", template!("backend", "config.go"))
            .entry("internal/server/server.go", template!("backend", "server.go"))
            .entry("internal/server/routes.go", template!("backend", "routes.go"))
            .entry(
                "internal/server/middleware.go",
                template!("backend", "middleware.go"),
            )
            .entry("internal/server/audit.go", template!("backend", "audit.go"))
            .entry("internal/db/schema.sql", template!("backend", "schema.sql"))
            .entry("internal/db/query.sql", template!("backend", "query.sql"))
            .entry("sqlc.yaml", template!("backend", "sqlc.yaml"))
            .entry(".golangci.yml", template!("backend", "golangci.yml"))
            .entry("compose.yml", template!("backend", "compose.yml"))
            .entry("Makefile", template!("backend", "Makefile"))
            .entry(".env", template!("backend", "env"))
            .entry(".gitignore", template!("backend", "gitignore"))
            .entry_if(
                flags.ai(),
                "internal/ai/service.go",
                template!("backend", "ai-service.go"),
            )
            .entry_if(
                flags.ai(),
                "internal/ai/handler.go",
                template!("backend", "ai-handler.go"),
            )
            .build()?)
    }

    fn hybrid() -> GenesisResult<TemplateSet> {
        Ok(TemplateSet::builder()
            .entry("compose.yml", template!("hybrid", "compose.yml"))
            .entry("Makefile", template!("hybrid", "Makefile"))
            .build()?)
    }
}

impl TemplateCatalog for BuiltinCatalog {
    #[instrument(skip_all, fields(%archetype, %flags))]
    fn resolve(&self, archetype: Archetype, flags: FeatureFlags) -> GenesisResult<TemplateSet> {
        let set = match archetype {
            Archetype::Frontend => Self::frontend()?,
            Archetype::Backend => Self::backend(flags)?,
            Archetype::Hybrid => Self::hybrid()?,
        };
        DomainValidator::validate_template_set(&set)?;

        debug!(templates = set.len(), "resolved built-in template set");
        Ok(set)
    }
}
