use super::error::FscError;
use super::schema::ColumnSchema;

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// Why a data row was left out of the table.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// Token count differs from the schema width.
    Width { expected: usize, found: usize },
    /// A token did not coerce to a number.
    NotNumeric { column: String, token: String },
}

/// Outcome of parsing one raw data row against the schema.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Accepted(Vec<f64>),
    Rejected(Rejection),
}

/// Coerce a single cell. NaN counts as missing, infinities are kept.
pub fn coerce(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Parse one row: all tokens must coerce, or the whole row is rejected.
pub fn parse_row(schema: &ColumnSchema, raw: &str) -> RowOutcome {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.len() != schema.len() {
        return RowOutcome::Rejected(Rejection::Width {
            expected: schema.len(),
            found: tokens.len(),
        });
    }

    let mut values = Vec::with_capacity(tokens.len());
    for (column, token) in schema.names().iter().zip(tokens) {
        match coerce(token) {
            Some(v) => values.push(v),
            None => {
                return RowOutcome::Rejected(Rejection::NotNumeric {
                    column: column.clone(),
                    token: token.to_string(),
                })
            }
        }
    }
    RowOutcome::Accepted(values)
}

// ---------------------------------------------------------------------------
// FscTable – numeric rows keyed by the schema
// ---------------------------------------------------------------------------

/// Row-oriented numeric table. Every row has exactly `schema.len()` values.
#[derive(Debug, Clone, PartialEq)]
pub struct FscTable {
    schema: ColumnSchema,
    rows: Vec<Vec<f64>>,
}

impl FscTable {
    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// All values of one column in table order, or `None` if it is not declared.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.schema.position(name)?;
        Some(self.rows.iter().map(|r| r[idx]).collect())
    }

    /// `(x, y)` pairs for plotting one column against another.
    pub fn points(&self, x: &str, y: &str) -> Option<Vec<[f64; 2]>> {
        let xi = self.schema.position(x)?;
        let yi = self.schema.position(y)?;
        Some(self.rows.iter().map(|r| [r[xi], r[yi]]).collect())
    }
}

// ---------------------------------------------------------------------------
// Table builder
// ---------------------------------------------------------------------------

/// A built table plus how many rows were dropped on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBuild {
    pub table: FscTable,
    pub rejected: usize,
}

/// Parse raw rows into a table, silently dropping malformed rows.
///
/// Fails only with [`FscError::EmptyTable`] when nothing survives.
pub fn build_table<S: AsRef<str>>(
    schema: &ColumnSchema,
    raw_rows: &[S],
) -> Result<TableBuild, FscError> {
    let (rows, rejected) = raw_rows.iter().enumerate().fold(
        (Vec::with_capacity(raw_rows.len()), 0usize),
        |(mut rows, rejected), (i, raw)| match parse_row(schema, raw.as_ref()) {
            RowOutcome::Accepted(values) => {
                rows.push(values);
                (rows, rejected)
            }
            RowOutcome::Rejected(why) => {
                log::debug!("Dropping FSC row {i}: {why:?}");
                (rows, rejected + 1)
            }
        },
    );

    if rows.is_empty() {
        return Err(FscError::EmptyTable { rejected });
    }

    Ok(TableBuild {
        table: FscTable {
            schema: schema.clone(),
            rows,
        },
        rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(names: &[&str]) -> ColumnSchema {
        names.iter().collect()
    }

    #[test]
    fn row_filter_is_all_or_nothing() {
        let s = schema(&["A", "B"]);
        let built = build_table(&s, &["1.0 2.0", "1.0 x", "1.0"]).unwrap();
        assert_eq!(built.table.len(), 1);
        assert_eq!(built.table.rows()[0], vec![1.0, 2.0]);
        assert_eq!(built.rejected, 2);
    }

    #[test]
    fn too_many_tokens_is_rejected() {
        let s = schema(&["A", "B"]);
        assert_eq!(
            parse_row(&s, "1 2 3"),
            RowOutcome::Rejected(Rejection::Width {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn non_numeric_reports_column() {
        let s = schema(&["A", "B"]);
        assert_eq!(
            parse_row(&s, "1 oops"),
            RowOutcome::Rejected(Rejection::NotNumeric {
                column: "B".into(),
                token: "oops".into()
            })
        );
    }

    #[test]
    fn nan_drops_row_but_infinity_survives() {
        assert_eq!(coerce("nan"), None);
        assert_eq!(coerce("NaN"), None);
        assert_eq!(coerce("inf"), Some(f64::INFINITY));
        assert_eq!(coerce("1e-3"), Some(0.001));
        assert_eq!(coerce("-4"), Some(-4.0));
    }

    #[test]
    fn zero_surviving_rows_is_empty_table() {
        let s = schema(&["A"]);
        match build_table(&s, &["x", "y z"]) {
            Err(FscError::EmptyTable { rejected }) => assert_eq!(rejected, 2),
            other => panic!("expected EmptyTable, got {other:?}"),
        }
    }

    #[test]
    fn empty_schema_and_no_rows_is_empty_table() {
        let s = ColumnSchema::default();
        let rows: [&str; 0] = [];
        assert!(matches!(
            build_table(&s, &rows),
            Err(FscError::EmptyTable { rejected: 0 })
        ));
    }

    #[test]
    fn column_access_preserves_row_order() {
        let s = schema(&["Res", "Fsc"]);
        let built = build_table(&s, &["20 0.9", "bad row here", "10 0.5", "5 0.1"]).unwrap();
        let t = &built.table;
        assert_eq!(t.column("Res"), Some(vec![20.0, 10.0, 5.0]));
        assert_eq!(t.column("Missing"), None);
        assert_eq!(
            t.points("Res", "Fsc"),
            Some(vec![[20.0, 0.9], [10.0, 0.5], [5.0, 0.1]])
        );
    }
}
