//! Anomaly entry list and detail view

use super::RenderContext;
use crate::data::Entry;

/// Render the card list of every entry
pub fn render_entry_list(ctx: &RenderContext<'_>) -> String {
    let class_text = ctx.text("database.class", "Class");

    ctx.feeds
        .entries
        .iter()
        .map(|entry| {
            format!(
                "{:<10} {}: {:<8} \"{}\"",
                entry.number,
                class_text,
                entry.object_class.to_uppercase(),
                entry.name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the full file of a single entry
pub fn render_entry_detail(ctx: &RenderContext<'_>, entry: &Entry) -> String {
    let object_class = ctx.text("database.objectClass", "Object class");
    let description = ctx.text("modal.description", "Description");
    let containment = ctx.text("modal.containment", "Special containment procedures");
    let addendum = ctx.text("modal.addendum", "Addendum");
    let classified = ctx.text("modal.furtherClassified", "FURTHER INFORMATION CLASSIFIED");

    format!(
        "{number}\n\"{name}\"\n{object_class}: {class}\n\n\
         == {description} ==\n{desc}\n\n\
         == {containment} ==\n{cont}\n{procedures}\n\n\
         == {addendum} ==\n{add}\n\n\
         [{classified}]",
        number = entry.number,
        name = entry.name,
        class = entry.object_class.to_uppercase(),
        desc = entry.description,
        cont = entry.containment,
        procedures = entry.procedures,
        add = entry.addendum,
    )
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::i18n::TranslationTable;
    use crate::state::Language;

    #[test]
    fn test_list_uses_translated_class_label() {
        let translations = bundled_translations();
        let feeds = bundled_feeds();
        let ctx = RenderContext {
            translations: &translations,
            language: Language::En,
            feeds: &feeds,
        };

        let list = render_entry_list(&ctx);
        assert_eq!(list.lines().count(), feeds.entries.len());
        assert!(list.contains("SCP-173"));
        assert!(list.contains("Class: KETER"));
    }

    #[test]
    fn test_detail_falls_back_without_translations() {
        let translations = TranslationTable::new();
        let feeds = bundled_feeds();
        let ctx = RenderContext {
            translations: &translations,
            language: Language::Es,
            feeds: &feeds,
        };

        let entry = feeds.entry("SCP-999").unwrap();
        let detail = render_entry_detail(&ctx, entry);
        assert!(detail.starts_with("SCP-999"));
        assert!(detail.contains("Object class: SAFE"));
        assert!(detail.contains("== Addendum =="));
    }
}
