//! SGML reference tables, one per class.
//!
//! Exempt classes are documented like any other; only code generation skips
//! them.

use crate::catalog::{Catalog, WaitClass};
use crate::config::GeneratorConfig;
use crate::emit::Artifact;
use std::fmt::{self, Write};

/// Render the documentation artifact (`wait_event_types.sgml`).
pub fn render_docs(catalog: &Catalog, config: &GeneratorConfig) -> Result<Artifact, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "<!-- autogenerated from {}, do not edit -->",
        config.source_label
    )?;

    for class in catalog.classes() {
        out.push('\n');
        render_table(&mut out, class)?;
    }

    Ok(Artifact::new(&config.docs_file, out))
}

/// `wait-event-activity-table` for `WaitEventActivity`.
pub fn table_id(class: &WaitClass) -> String {
    format!("wait-event-{}-table", class.short_name().to_lowercase())
}

fn render_table(out: &mut String, class: &WaitClass) -> fmt::Result {
    let short = class.short_name();
    writeln!(out, "<table id=\"{}\">", table_id(class))?;
    writeln!(
        out,
        " <title>Wait Events of Type <literal>{short}</literal></title>"
    )?;
    out.push_str(" <tgroup cols=\"2\">\n");
    out.push_str("  <colspec colname=\"col1\" colwidth=\"1*\"/>\n");
    out.push_str("  <colspec colname=\"col2\" colwidth=\"2*\"/>\n");
    out.push_str("  <thead>\n");
    out.push_str("   <row>\n");
    writeln!(out, "    <entry><literal>{short}</literal> Wait Event</entry>")?;
    out.push_str("    <entry>Description</entry>\n");
    out.push_str("   </row>\n");
    out.push_str("  </thead>\n\n");
    out.push_str("  <tbody>\n");
    for event in class.events() {
        out.push_str("   <row>\n");
        writeln!(out, "    <entry><literal>{}</literal></entry>", event.label)?;
        writeln!(out, "    <entry>{}</entry>", event.description)?;
        out.push_str("   </row>\n");
    }
    out.push_str("  </tbody>\n");
    out.push_str(" </tgroup>\n");
    out.push_str("</table>\n");
    Ok(())
}
