//! The stages run over the whole buffer once every source has been read:
//! empty-line removal, then deduplication, then numbering. Each stage is
//! switched on by its own option; a stage that's off leaves the buffer alone.
use bstr::ByteSlice;
use fxhash::FxBuildHasher;
use indexmap::IndexSet;

use crate::buffer::{Line, LineBuffer};
use crate::config::Config;

/// Runs the enabled stages over `buffer`, in their fixed order
pub fn apply(buffer: &mut LineBuffer, config: &Config) {
    if config.skip_empty {
        skip_empty(buffer);
    }
    if config.unique {
        dedup(buffer);
    }
    if config.add_numbers {
        number(buffer);
    }
}

/// Removes the lines with no fields, that is, lines that are empty or hold
/// nothing but blanks and tabs. Fields are split on blanks and tabs only, so a
/// line of form feeds or no-break spaces has a field and stays.
pub fn skip_empty(buffer: &mut LineBuffer) {
    buffer.retain(|line| line.fields_with(|c| c == ' ' || c == '\t').next().is_some());
}

/// Removes every line that's identical to an earlier one, byte for byte.
/// Headers take part like any other line.
pub fn dedup(buffer: &mut LineBuffer) {
    // An `IndexSet` keeps the first occurrence of each line, in insertion order
    let unique: IndexSet<Line, FxBuildHasher> = buffer.take_lines().into_iter().collect();
    buffer.extend(unique);
}

/// Prefixes each line with its line number, right-aligned in six columns,
/// and a tab.
pub fn number(buffer: &mut LineBuffer) {
    buffer.rewrite(|n, line| {
        let mut numbered = format!("{n:>6}\t").into_bytes();
        numbered.extend_from_slice(&line);
        numbered
    });
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;

    fn buffer(lines: &[&str]) -> LineBuffer {
        lines.iter().copied().collect()
    }

    fn text(buffer: &LineBuffer) -> Vec<String> {
        buffer.lines().iter().map(|l| String::from_utf8(l.clone()).unwrap()).collect()
    }

    #[test]
    fn skip_empty_removes_exactly_the_blank_lines() {
        let mut b = buffer(&["", "x", " \t ", " y ", "\u{a0}", "\x0c", ".", "\t-", "\t"]);
        skip_empty(&mut b);
        assert_eq!(text(&b), ["x", " y ", "\u{a0}", "\x0c", ".", "\t-"]);
    }

    #[test]
    fn dedup_keeps_first_occurrences_in_order() {
        let mut b = buffer(&["## a", "L1", "L2", "## b", "L2", "L1 ", "## a"]);
        dedup(&mut b);
        assert_eq!(text(&b), ["## a", "L1", "L2", "## b", "L1 "]);
    }

    #[test]
    fn dedup_is_idempotent() {
        let mut once = buffer(&["x", "y", "x", "", "", "z", "y"]);
        dedup(&mut once);
        let mut twice = once.clone();
        dedup(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn numbers_run_from_one_without_gaps() {
        let mut b = buffer(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"]);
        number(&mut b);
        for (i, line) in text(&b).iter().enumerate() {
            let (n, rest) = line.split_once('\t').unwrap();
            assert_eq!(n.len(), 6);
            assert_eq!(n.trim_start().parse::<usize>().unwrap(), i + 1);
            assert_eq!(rest.len(), 1);
        }
        assert_eq!(text(&b)[10], "    11\tk");
    }

    #[test]
    fn stages_run_skip_then_dedup_then_number() {
        let mut config = Config::new("out");
        config.skip_empty = true;
        config.unique = true;
        config.add_numbers = true;
        let mut b = buffer(&["", "x", "", "y", "x"]);
        apply(&mut b, &config);
        assert_eq!(text(&b), ["     1\tx", "     2\ty"]);
    }

    #[test]
    fn numbering_after_skip_empty() {
        let mut config = Config::new("out");
        config.skip_empty = true;
        config.add_numbers = true;
        let mut b = buffer(&["", "x", "y"]);
        apply(&mut b, &config);
        assert_eq!(text(&b), ["     1\tx", "     2\ty"]);
    }

    #[test]
    fn disabled_stages_change_nothing() {
        let mut b = buffer(&["", "x", "x"]);
        apply(&mut b, &Config::new("out"));
        assert_eq!(text(&b), ["", "x", "x"]);
    }
}
