//! Built-in suites.

use std::time::Duration;

use crate::shell::CommandSpec;

use super::{Check, Suite};

/// Suite used when `--suite` is not given.
pub const DEFAULT_SUITE: &str = "frontend";

/// Production builds take longer than the rest of the checklist.
const BUILD_TIMEOUT: Duration = Duration::from_secs(300);

/// All built-in suites, in display order.
pub fn builtin_suites() -> Vec<Suite> {
    vec![frontend_suite(), build_suite()]
}

/// Toolchain, structure, lint, and build checks for a Next.js frontend.
pub fn frontend_suite() -> Suite {
    let checks = vec![
        Check::new(
            "node_check",
            "Checking Node.js and npm installation",
            CommandSpec::shell("node --version && npm --version"),
        ),
        Check::new(
            "project_structure",
            "Checking project structure",
            CommandSpec::shell(
                r#"ls -la | grep -E "package.json|tsconfig.json|tailwind.config|next.config""#,
            ),
        ),
        Check::new(
            "env_check",
            "Verifying environment configuration",
            CommandSpec::shell(
                r#"test -f .env.local && echo "✓ .env.local found" || echo "✗ .env.local missing""#,
            ),
        ),
        Check::new(
            "deps_check",
            "Checking installed dependencies",
            CommandSpec::shell("npm list --depth=0 2>/dev/null | head -20"),
        ),
        Check::new(
            "lint",
            "Running ESLint",
            CommandSpec::shell("npm run lint 2>&1 | head -50"),
        ),
        Check::new(
            "build",
            "Building Next.js project",
            CommandSpec::shell("npm run build 2>&1 | tail -50"),
        ),
        Check::new(
            "build_output",
            "Verifying build output",
            CommandSpec::shell(
                r#"test -d .next && echo "✓ .next build directory created" || echo "✗ Build directory missing""#,
            ),
        ),
        Check::new(
            "api_services",
            "Checking API service files",
            CommandSpec::shell(r#"ls -la services/api/ | grep -E "\.ts$""#),
        ),
        Check::new(
            "types_check",
            "Validating TypeScript types",
            CommandSpec::shell(
                r#"test -f types/api.ts && wc -l types/api.ts && echo "✓ API types file valid" || echo "✗ Types file missing""#,
            ),
        ),
    ];

    Suite::new(DEFAULT_SUITE, checks).with_description("Frontend build and integration checks")
}

/// A single production build, run without a shell so its exit status is npm's own.
pub fn build_suite() -> Suite {
    let checks = vec![Check::new(
        "build",
        "Running production build",
        CommandSpec::program(["npm", "run", "build"]),
    )
    .with_timeout(BUILD_TIMEOUT)];

    Suite::new("build", checks).with_description("Production build verification")
}
