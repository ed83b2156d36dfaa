//! Personnel registry table

use super::RenderContext;

/// Render the personnel table. Status codes are translated through
/// `personnel.<status>`; unknown statuses show the raw code.
pub fn render_personnel_table(ctx: &RenderContext<'_>) -> String {
    let header = format!(
        "{:<10} {:<22} {:<10} {:<20} {}",
        ctx.text("personnel.id", "ID"),
        ctx.text("personnel.name", "Name"),
        ctx.text("personnel.clearance", "Clearance"),
        ctx.text("personnel.department", "Department"),
        ctx.text("personnel.status", "Status"),
    );

    let rows = ctx.feeds.personnel.iter().map(|person| {
        let status_key = format!("personnel.{}", person.status);
        let status = ctx
            .translations
            .resolve(ctx.language, &status_key)
            .unwrap_or(&person.status)
            .to_uppercase();
        format!(
            "{:<10} {:<22} {:<10} {:<20} {}",
            person.id, person.name, person.clearance, person.department, status
        )
    });

    std::iter::once(header).chain(rows).collect::<Vec<_>>().join("\n")
}
