//! Catalog-wide ordering of tagged lines.

use crate::catalog::parser::TaggedLine;

/// Sort every tagged line by its identifier column, case-insensitively.
///
/// This is the only sort the pipeline performs; grouping by class afterwards
/// preserves it, so each class inherits the same order. The sort is stable.
pub fn sort_tagged_lines(mut lines: Vec<TaggedLine>) -> Vec<TaggedLine> {
    lines.sort_by_cached_key(|line| line.sort_key().to_uppercase());
    lines
}
