use std::fmt::Write as _;

use sea_orm_migration::MigratorTrait;

use crate::{app_info::AppInfo, database::migrations::Migrator, jobs::job_registry::JobRegistry};

pub fn print_version_info(app: AppInfo, registry: &JobRegistry) {
    print!("{}", version_report(app, registry));
}

/// Release, schema and job type summary printed by `quillpen version`.
fn version_report(app: AppInfo, registry: &JobRegistry) -> String {
    let mut job_types: Vec<_> = registry.job_names().copied().collect();
    job_types.sort_unstable();

    let mut report = format!("📦 {} v{}\n", app.name, app.version);
    if !app.description.is_empty() {
        let _ = writeln!(report, "📝 {}", app.description);
    }

    let _ = writeln!(
        report,
        "🔗 Build: {} ({})",
        option_env!("GIT_HASH").unwrap_or("unknown"),
        option_env!("BUILD_TIMESTAMP").unwrap_or("unknown")
    );
    let _ = writeln!(report, "🗄️  Migrations: {}", Migrator::migrations().len());
    let _ = writeln!(report, "⚙️  Job types: {}", job_types.join(", "));

    report
}
