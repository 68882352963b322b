//! Split an FSC block into its column declarations and raw data rows.

use std::fmt;

/// Prefix of a STAR column declaration (`_rlnAngstromResolution #3`).
pub const COLUMN_PREFIX: &str = "_rln";

/// Structural marker that opens a STAR loop.
pub const LOOP_MARKER: &str = "loop_";

// ---------------------------------------------------------------------------
// ColumnSchema – ordered, unique column names
// ---------------------------------------------------------------------------

/// Ordered column names as declared in the block, prefix stripped.
///
/// Position `i` maps to the `i`-th whitespace token of every data row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSchema {
    names: Vec<String>,
}

impl ColumnSchema {
    /// Append a column, keeping names unique.
    ///
    /// A repeated name becomes `Name.1`, `Name.2`, ... so that the positional
    /// mapping is preserved.
    pub fn push(&mut self, name: &str) {
        let mut candidate = name.to_string();
        let mut n = 0;
        while self.position(&candidate).is_some() {
            n += 1;
            candidate = format!("{name}.{n}");
        }
        self.names.push(candidate);
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Index of a column by exact name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ColumnSchema {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut schema = ColumnSchema::default();
        for name in iter {
            schema.push(name.as_ref());
        }
        schema
    }
}

impl fmt::Display for ColumnSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.names.join(", "))
    }
}

// ---------------------------------------------------------------------------
// Block classification
// ---------------------------------------------------------------------------

/// Schema plus the data rows that follow it, trimmed, in encounter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedBlock {
    pub schema: ColumnSchema,
    pub rows: Vec<String>,
}

/// Classify every line of an FSC block.
///
/// * `_rln...` lines declare a column; only the first token counts.
/// * `loop_` lines are structural and skipped.
/// * Blank lines are skipped.
/// * Everything else is a data row.
pub fn parse_block<'a, I>(lines: I) -> ParsedBlock
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parsed = ParsedBlock::default();

    for line in lines {
        let stripped = line.trim();
        if stripped.is_empty() || stripped.starts_with(LOOP_MARKER) {
            continue;
        }
        if stripped.starts_with(COLUMN_PREFIX) {
            let token = stripped.split_whitespace().next().unwrap_or(stripped);
            let name = token.strip_prefix(COLUMN_PREFIX).unwrap_or(token);
            parsed.schema.push(name);
        } else {
            parsed.rows.push(stripped.to_string());
        }
    }

    log::debug!(
        "FSC block: {} columns {}, {} candidate rows",
        parsed.schema.len(),
        parsed.schema,
        parsed.rows.len()
    );
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declarations_rows_and_loop_marker() {
        let block = [
            "",
            "loop_ ",
            "_rlnSpectralIndex #1 ",
            "_rlnAngstromResolution #2",
            "  0   999.0  ",
            "",
            "1 250.5",
        ];
        let parsed = parse_block(block);
        assert_eq!(parsed.schema.names(), &["SpectralIndex", "AngstromResolution"]);
        assert_eq!(parsed.rows, vec!["0   999.0", "1 250.5"]);
    }

    #[test]
    fn only_leading_prefix_is_stripped() {
        let parsed = parse_block(["_rlnFoo_rlnBar"]);
        assert_eq!(parsed.schema.names(), &["Foo_rlnBar"]);
    }

    #[test]
    fn duplicate_names_stay_positional_and_unique() {
        let schema: ColumnSchema = ["A", "B", "A", "A"].into_iter().collect();
        assert_eq!(schema.names(), &["A", "B", "A.1", "A.2"]);
        assert_eq!(schema.position("A.1"), Some(2));
    }

    #[test]
    fn empty_block_gives_empty_schema() {
        let parsed = parse_block(std::iter::empty());
        assert!(parsed.schema.is_empty());
        assert!(parsed.rows.is_empty());
    }

    #[test]
    fn display_lists_names() {
        let schema: ColumnSchema = ["X", "Y"].into_iter().collect();
        assert_eq!(schema.to_string(), "[X, Y]");
    }
}
