//! C declarations and lookup functions for code-generating classes.
//!
//! Each class becomes one `typedef enum` whose first member is anchored to the
//! class base constant, plus one lookup function with a `case` per member.
//! The switch deliberately has no `default:` arm so the C compiler flags any
//! member the lookup does not cover.

use crate::catalog::{Catalog, WaitClass};
use crate::config::GeneratorConfig;
use crate::emit::Artifact;
use std::fmt::{self, Write};

/// Render the declarations artifact (`wait_event_types.h`).
pub fn render_types_header(catalog: &Catalog, config: &GeneratorConfig) -> Result<Artifact, fmt::Error> {
    let guard = include_guard(&config.types_file);
    let mut out = String::new();
    write_banner(
        &mut out,
        &config.types_file,
        "Generated wait events infrastructure code",
        config,
    )?;
    writeln!(out, "#ifndef {guard}")?;
    writeln!(out, "#define {guard}")?;
    out.push('\n');
    writeln!(out, "#include \"{}\"", config.base_header)?;

    for class in catalog.code_classes() {
        out.push('\n');
        out.push_str("typedef enum\n{\n");
        for (idx, event) in class.events().iter().enumerate() {
            if idx == 0 {
                writeln!(
                    out,
                    "\t{} = {},",
                    event.identifier,
                    base_constant(class, config)
                )?;
            } else {
                writeln!(out, "\t{},", event.identifier)?;
            }
        }
        writeln!(out, "}} {};", class.name())?;
    }

    out.push('\n');
    writeln!(out, "#endif\t\t\t\t\t\t\t/* {guard} */")?;
    Ok(Artifact::new(&config.types_file, out))
}

/// Render the logic artifact (`pgstat_wait_event.c`).
pub fn render_lookup_source(catalog: &Catalog, config: &GeneratorConfig) -> Result<Artifact, fmt::Error> {
    let mut out = String::new();
    write_banner(
        &mut out,
        &config.lookup_file,
        "Generated wait event name lookup functions",
        config,
    )?;

    for class in catalog.code_classes() {
        out.push('\n');
        out.push_str("static const char *\n");
        writeln!(
            out,
            "{}({} w)",
            lookup_function_name(class, config),
            class.name()
        )?;
        out.push_str("{\n");
        writeln!(
            out,
            "\tconst char *event_name = \"{}\";",
            config.unknown_event_name
        )?;
        out.push('\n');
        out.push_str("\tswitch (w)\n\t{\n");
        for event in class.events() {
            writeln!(out, "\t\tcase {}:", event.identifier)?;
            writeln!(out, "\t\t\tevent_name = \"{}\";", c_escape(&event.label))?;
            out.push_str("\t\t\tbreak;\n");
        }
        out.push_str("\t}\n\n");
        out.push_str("\treturn event_name;\n");
        out.push_str("}\n");
    }

    Ok(Artifact::new(&config.lookup_file, out))
}

/// `PG_WAIT_ACTIVITY` for `WaitEventActivity`.
pub fn base_constant(class: &WaitClass, config: &GeneratorConfig) -> String {
    format!(
        "{}{}",
        config.base_constant_prefix,
        class.short_name().to_uppercase()
    )
}

/// `pgstat_get_wait_activity` for `WaitEventActivity`.
pub fn lookup_function_name(class: &WaitClass, config: &GeneratorConfig) -> String {
    format!(
        "{}{}",
        config.lookup_function_prefix,
        class.short_name().to_lowercase()
    )
}

fn include_guard(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn c_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn write_banner(
    out: &mut String,
    file_name: &str,
    title: &str,
    config: &GeneratorConfig,
) -> fmt::Result {
    out.push_str("/*-------------------------------------------------------------------------\n");
    out.push_str(" *\n");
    writeln!(out, " * {file_name}")?;
    writeln!(out, " *    {title}")?;
    out.push_str(" *\n");
    out.push_str(" * NOTES\n");
    out.push_str(" *  ******************************\n");
    out.push_str(" *  *** DO NOT EDIT THIS FILE! ***\n");
    out.push_str(" *  ******************************\n");
    out.push_str(" *\n");
    writeln!(
        out,
        " *  It has been GENERATED by generate-wait-event-types from {}",
        config.source_label
    )?;
    out.push_str(" *\n");
    out.push_str(" *-------------------------------------------------------------------------\n");
    out.push_str(" */\n\n");
    Ok(())
}
