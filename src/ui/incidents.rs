//! Incident report list

use super::RenderContext;

pub fn render_incident_list(ctx: &RenderContext<'_>) -> String {
    let severity = ctx.text("incidents.severity", "Severity");
    let subject = ctx.text("incidents.subject", "Subject");

    ctx.feeds
        .incidents
        .iter()
        .map(|incident| {
            format!(
                "{} - {}: {}\n[{}] {}: {}\n{}",
                incident.id,
                severity,
                incident.severity,
                incident.date,
                subject,
                incident.subject,
                incident.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
