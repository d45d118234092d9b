//! Line tagging for `wait_event_names.txt`.
//!
//! Comments and blank lines are dropped, `Section: ClassName - <Name>`
//! headers switch the active class, and every other line is passed through
//! unparsed together with the class in force and its line number. Shape
//! checks happen later in [`crate::catalog::index`].

use tracing::debug;

const SECTION_MARKER: &str = "Section: ClassName";
const SECTION_SEPARATOR: &str = "- ";

/// A raw data line plus the class that was active when it was read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaggedLine {
    /// `None` when the line precedes every section header.
    pub class_name: Option<String>,
    pub line: usize,
    pub raw: String,
}

impl TaggedLine {
    /// Event identifier column used for the catalog-wide ordering.
    ///
    /// This is the third column of the `class + raw line` composite, which is
    /// the second tab-delimited column of the data line itself. Malformed lines
    /// yield an empty key and are rejected during validation.
    pub fn sort_key(&self) -> &str {
        self.raw
            .split('\t')
            .filter(|column| !column.is_empty())
            .nth(1)
            .unwrap_or("")
    }
}

/// Fold the catalog text into tagged data lines.
///
/// `class_prefix` is prepended to section names that do not already carry it,
/// so `Section: ClassName - Foo` and `Section: ClassName - WaitEventFoo` name
/// the same class.
pub fn tag_lines(input: &str, class_prefix: &str) -> Vec<TaggedLine> {
    let (_, tagged) = input.lines().enumerate().fold(
        (None::<String>, Vec::new()),
        |(current, mut tagged), (idx, line)| {
            let line = line.trim_end();
            if line.starts_with('#') || line.trim().is_empty() {
                return (current, tagged);
            }
            if line.starts_with(SECTION_MARKER) {
                let class_name = section_class_name(line, class_prefix);
                debug!(line = idx + 1, class = %class_name, "entering section");
                return (Some(class_name), tagged);
            }
            tagged.push(TaggedLine {
                class_name: current.clone(),
                line: idx + 1,
                raw: line.to_string(),
            });
            (current, tagged)
        },
    );
    tagged
}

fn section_class_name(header: &str, class_prefix: &str) -> String {
    let name = header
        .rsplit_once(SECTION_SEPARATOR)
        .map(|(_, name)| name)
        .unwrap_or_else(|| &header[SECTION_MARKER.len()..])
        .trim();
    if name.is_empty() || name.starts_with(class_prefix) {
        name.to_string()
    } else {
        format!("{class_prefix}{name}")
    }
}
