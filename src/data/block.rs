//! Locate the `data_fsc` section of a postprocess STAR report.

/// Line that opens the FSC section.
pub const BLOCK_START: &str = "data_fsc";

/// Line that closes the FSC section.
pub const BLOCK_END: &str = "data_guinier";

/// Return the lines between `data_fsc` and the next `data_guinier`.
///
/// Both marker lines are excluded. Lines are returned untrimmed. Without a
/// start marker the result is empty; without an end marker the block runs to
/// the end of the document. An end marker outside the block is harmless.
pub fn extract_block<'a, I>(lines: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut inside = false;
    let mut block = Vec::new();

    for line in lines {
        let trimmed = line.trim();
        if trimmed.starts_with(BLOCK_START) {
            inside = true;
            continue;
        }
        if trimmed.starts_with(BLOCK_END) {
            inside = false;
        }
        if inside {
            block.push(line);
        }
    }

    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_excludes_both_markers() {
        let doc = "data_general\n_rlnFinalResolution 3.2\ndata_fsc\nloop_\n_rlnA #1\n1.0\ndata_guinier\n_rlnB #1\n";
        let block = extract_block(doc.lines());
        assert_eq!(block, vec!["loop_", "_rlnA #1", "1.0"]);
    }

    #[test]
    fn lines_are_kept_untrimmed() {
        let doc = "  data_fsc  \n   1.0  2.0\t\n data_guinier";
        let block = extract_block(doc.lines());
        assert_eq!(block, vec!["   1.0  2.0\t"]);
    }

    #[test]
    fn missing_start_marker_yields_nothing() {
        let doc = "data_general\n1.0 2.0\ndata_guinier\n3.0 4.0\n";
        assert!(extract_block(doc.lines()).is_empty());
    }

    #[test]
    fn missing_end_marker_runs_to_end() {
        let doc = "data_fsc\nloop_\n1 2\n3 4";
        let block = extract_block(doc.lines());
        assert_eq!(block, vec!["loop_", "1 2", "3 4"]);
    }

    #[test]
    fn end_marker_before_start_is_ignored() {
        let doc = "data_guinier\nx\ndata_fsc\ny\n";
        assert_eq!(extract_block(doc.lines()), vec!["y"]);
    }

    #[test]
    fn second_start_marker_reopens_collection() {
        let doc = "data_fsc\na\ndata_guinier\nb\ndata_fsc_extra\nc\n";
        assert_eq!(extract_block(doc.lines()), vec!["a", "c"]);
    }
}
