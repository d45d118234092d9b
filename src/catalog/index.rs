//! Validation and grouping of tagged catalog lines.
//!
//! Every line must decompose into an identifier (given twice), a quoted label
//! and a quoted sentence. Identifiers of code-generating classes must carry
//! the configured prefix and no identifier may repeat anywhere in the
//! catalog. The first failure aborts the whole build; partial catalogs are
//! never returned.

use crate::catalog::parser::TaggedLine;
use crate::catalog::{Catalog, WaitClass, WaitEventRecord};
use crate::config::{GeneratorConfig, is_identifier};
use crate::error::{CatalogError, CatalogResult};
use std::collections::BTreeMap;
use tracing::{debug, warn};

const EXPECTED_COLUMNS: usize = 4;

/// Validate sorted, tagged lines and group them by class.
///
/// `lines` must already be in catalog order (see
/// [`crate::catalog::sort_tagged_lines`]); records are appended to their class
/// in the order they arrive.
pub fn build_catalog(lines: Vec<TaggedLine>, config: &GeneratorConfig) -> CatalogResult<Catalog> {
    let mut classes: Vec<WaitClass> = Vec::new();
    let mut class_slots: BTreeMap<String, usize> = BTreeMap::new();
    let mut first_seen: BTreeMap<String, usize> = BTreeMap::new();

    for tagged in lines {
        let record = parse_record(&tagged)?;
        validate_prefix(&record, config)?;

        if let Some(&first_line) = first_seen.get(&record.identifier) {
            return Err(CatalogError::DuplicateIdentifier {
                line: record.line,
                identifier: record.identifier,
                first_line,
            });
        }
        first_seen.insert(record.identifier.clone(), record.line);

        let slot = match class_slots.get(&record.class_name) {
            Some(&slot) => slot,
            None => {
                let generates_code = !config.is_exempt(&record.class_name);
                debug!(
                    class = %record.class_name,
                    generates_code,
                    "registering wait event class"
                );
                classes.push(WaitClass::new(
                    record.class_name.clone(),
                    config.short_class_name(&record.class_name).to_string(),
                    generates_code,
                ));
                class_slots.insert(record.class_name.clone(), classes.len() - 1);
                classes.len() - 1
            }
        };
        classes[slot].push(record);
    }

    if classes.is_empty() {
        warn!("wait event catalog contains no records");
    }
    Ok(Catalog::from_classes(classes))
}

fn parse_record(tagged: &TaggedLine) -> CatalogResult<WaitEventRecord> {
    let line = tagged.line;
    let raw = tagged.raw.as_str();

    let Some(class_name) = tagged.class_name.as_deref() else {
        return Err(CatalogError::RecordOutsideSection {
            line,
            content: raw.to_string(),
        });
    };
    if !is_identifier(class_name) {
        return Err(CatalogError::malformed(
            line,
            raw,
            format!("section class name '{class_name}' is not an identifier"),
        ));
    }

    let columns: Vec<&str> = raw.split('\t').filter(|c| !c.is_empty()).collect();
    let [identifier, repeated, label, description] = columns.as_slice() else {
        return Err(CatalogError::malformed(
            line,
            raw,
            format!(
                "expected {EXPECTED_COLUMNS} tab-separated columns, found {}",
                columns.len()
            ),
        ));
    };

    if !is_identifier(identifier) {
        return Err(CatalogError::malformed(
            line,
            raw,
            format!("'{identifier}' is not an identifier"),
        ));
    }
    if repeated != identifier {
        return Err(CatalogError::malformed(
            line,
            raw,
            format!("identifier columns disagree: '{identifier}' and '{repeated}'"),
        ));
    }

    let label = parse_label(label)
        .ok_or_else(|| CatalogError::malformed(line, raw, "label must be a quoted name"))?;
    let description = parse_sentence(description).ok_or_else(|| {
        CatalogError::malformed(line, raw, "description must be a quoted sentence ending in '.'")
    })?;

    Ok(WaitEventRecord {
        class_name: class_name.to_string(),
        identifier: identifier.to_string(),
        label: label.to_string(),
        description: description.to_string(),
        line,
    })
}

fn validate_prefix(record: &WaitEventRecord, config: &GeneratorConfig) -> CatalogResult<()> {
    if config.is_exempt(&record.class_name) || record.identifier.starts_with(&config.event_prefix)
    {
        return Ok(());
    }
    Err(CatalogError::MissingPrefix {
        line: record.line,
        class_name: record.class_name.clone(),
        identifier: record.identifier.clone(),
        prefix: config.event_prefix.clone(),
    })
}

fn unquote(column: &str) -> Option<&str> {
    let inner = column.strip_prefix('"')?.strip_suffix('"')?;
    if inner.contains('"') {
        return None;
    }
    Some(inner)
}

fn starts_with_word_char(value: &str) -> bool {
    value
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

fn parse_label(column: &str) -> Option<&str> {
    let inner = unquote(column)?;
    if !starts_with_word_char(inner) || inner.trim_end() != inner {
        return None;
    }
    Some(inner)
}

fn parse_sentence(column: &str) -> Option<&str> {
    let inner = column.strip_prefix('"')?.strip_suffix('"')?;
    if !starts_with_word_char(inner) || !inner.ends_with('.') {
        return None;
    }
    Some(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(class_name: Option<&str>, line: usize, raw: &str) -> TaggedLine {
        TaggedLine {
            class_name: class_name.map(str::to_string),
            line,
            raw: raw.to_string(),
        }
    }

    fn event_line(identifier: &str) -> String {
        format!("{identifier}\t{identifier}\t\"Label\"\t\"Waiting for something.\"")
    }

    fn expect_malformed(raw: &str) -> String {
        let err = build_catalog(
            vec![tagged(Some("WaitEventIO"), 3, raw)],
            &GeneratorConfig::default(),
        )
        .expect_err("line should be rejected");
        match err {
            CatalogError::MalformedRecord { line, reason, .. } => {
                assert_eq!(line, 3);
                reason
            }
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn groups_by_class_preserving_order() {
        let lines = vec![
            tagged(Some("WaitEventIPC"), 1, &event_line("WAIT_EVENT_A")),
            tagged(Some("WaitEventActivity"), 2, &event_line("WAIT_EVENT_B")),
            tagged(Some("WaitEventIPC"), 3, &event_line("WAIT_EVENT_C")),
        ];
        let catalog = build_catalog(lines, &GeneratorConfig::default()).unwrap();
        let names: Vec<_> = catalog.classes().iter().map(WaitClass::name).collect();
        assert_eq!(names, vec!["WaitEventActivity", "WaitEventIPC"]);

        let ipc = catalog.class("WaitEventIPC").unwrap();
        let ids: Vec<_> = ipc.events().iter().map(|e| e.identifier.as_str()).collect();
        assert_eq!(ids, vec!["WAIT_EVENT_A", "WAIT_EVENT_C"]);
        assert_eq!(ipc.short_name(), "IPC");
        assert_eq!(ipc.events()[0].label, "Label");
        assert_eq!(ipc.events()[0].description, "Waiting for something.");
    }

    #[test]
    fn exempt_classes_skip_prefix_and_code() {
        let lines = vec![
            tagged(Some("WaitEventLWLock"), 1, "ShmemIndex\tShmemIndex\t\"ShmemIndex\"\t\"Waiting to find space.\""),
            tagged(Some("WaitEventIO"), 2, &event_line("WAIT_EVENT_DATA_FILE_READ")),
        ];
        let catalog = build_catalog(lines, &GeneratorConfig::default()).unwrap();
        assert!(!catalog.class("WaitEventLWLock").unwrap().generates_code());
        let code: Vec<_> = catalog.code_classes().map(WaitClass::name).collect();
        assert_eq!(code, vec!["WaitEventIO"]);
    }

    #[test]
    fn missing_prefix_is_fatal() {
        let err = build_catalog(
            vec![tagged(Some("WaitEventIO"), 9, &event_line("Foo"))],
            &GeneratorConfig::default(),
        )
        .unwrap_err();
        assert!(
            matches!(err, CatalogError::MissingPrefix { line: 9, ref identifier, .. } if identifier == "Foo"),
            "{err:?}"
        );
    }

    #[test]
    fn record_before_section_is_fatal() {
        let err = build_catalog(
            vec![tagged(None, 1, &event_line("WAIT_EVENT_A"))],
            &GeneratorConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::RecordOutsideSection { line: 1, .. }));
    }

    #[test]
    fn duplicates_across_classes_are_fatal() {
        let lines = vec![
            tagged(Some("WaitEventIO"), 4, &event_line("WAIT_EVENT_A")),
            tagged(Some("WaitEventIPC"), 8, &event_line("WAIT_EVENT_A")),
        ];
        let err = build_catalog(lines, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DuplicateIdentifier {
                line: 8,
                first_line: 4,
                ..
            }
        ));
    }

    #[test]
    fn rejects_wrong_column_count() {
        let reason = expect_malformed("WAIT_EVENT_A\t\"Label\"\t\"Waiting.\"");
        assert!(reason.contains("found 3"), "{reason}");
    }

    #[test]
    fn rejects_mismatched_identifiers() {
        let reason = expect_malformed("WAIT_EVENT_A\tWAIT_EVENT_B\t\"Label\"\t\"Waiting.\"");
        assert!(reason.contains("disagree"), "{reason}");
    }

    #[test]
    fn rejects_bad_label_and_sentence() {
        expect_malformed("WAIT_EVENT_A\tWAIT_EVENT_A\tLabel\t\"Waiting.\"");
        expect_malformed("WAIT_EVENT_A\tWAIT_EVENT_A\t\"\"\t\"Waiting.\"");
        expect_malformed("WAIT_EVENT_A\tWAIT_EVENT_A\t\"La\"bel\"\t\"Waiting.\"");
        expect_malformed("WAIT_EVENT_A\tWAIT_EVENT_A\t\"Label\"\t\"Waiting\"");
        expect_malformed("WAIT_EVENT_A\tWAIT_EVENT_A\t\"Label\"\t\" Waiting.\"");
        expect_malformed("WAIT-EVENT\tWAIT-EVENT\t\"Label\"\t\"Waiting.\"");
    }

    #[test]
    fn accepts_multi_word_labels_and_tab_runs() {
        let raw = "WAIT_EVENT_B\t\tWAIT_EVENT_B\t\"b event\"\t\t\"Waiting for <xref linkend=\"x\"/>.\"";
        let catalog = build_catalog(
            vec![tagged(Some("WaitEventFoo"), 1, raw)],
            &GeneratorConfig::default(),
        )
        .unwrap();
        let event = &catalog.classes()[0].events()[0];
        assert_eq!(event.label, "b event");
        assert_eq!(event.description, "Waiting for <xref linkend=\"x\"/>.");
    }
}
