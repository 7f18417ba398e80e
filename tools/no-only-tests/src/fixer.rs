use crate::engine::Fix;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    pub output: String,
    pub applied: usize,
    pub skipped: usize,
}

/// Apply range removals to `source` in a single pass.
///
/// Identical fixes are applied once. A fix that overlaps one already accepted
/// is skipped so a later pass can retry it against the rewritten text. Ranges
/// outside the source or splitting a UTF-8 character are skipped as well.
pub fn apply_fixes(source: &str, fixes: &[Fix]) -> FixOutcome {
    let mut sorted: Vec<&Fix> = fixes.iter().collect();
    sorted.sort_by_key(|fix| (fix.range.start, fix.range.end));
    sorted.dedup();

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;
    let mut applied = 0;
    let mut skipped = 0;

    for fix in sorted {
        let range = &fix.range;
        if range.start < cursor || !is_valid_range(source, range.start, range.end) {
            skipped += 1;
            continue;
        }
        output.push_str(&source[cursor..range.start]);
        cursor = range.end;
        applied += 1;
    }
    output.push_str(&source[cursor..]);

    FixOutcome {
        output,
        applied,
        skipped,
    }
}

fn is_valid_range(source: &str, start: usize, end: usize) -> bool {
    start <= end
        && end <= source.len()
        && source.is_char_boundary(start)
        && source.is_char_boundary(end)
}
