use regex::Regex;
use std::sync::LazyLock;

use super::BulkImportRecord;
use crate::models::Position;

/// Role suffixes in match priority order. A suffix contained in a longer one
/// ("all rounder" in "batting all rounder") must come after it.
const SUFFIXES: &[(&str, Position)] = &[
    ("batsman", Position::Batsman),
    ("bowler", Position::Bowler),
    ("batting all rounder", Position::BattingAllRounder),
    ("bowling all rounder", Position::BowlingAllRounder),
    ("all rounder", Position::AllRounder),
    ("wicket keeper", Position::WicketKeeper),
    ("wicketkeeper", Position::WicketKeeper),
];

static SUFFIX_RULES: LazyLock<Vec<(Regex, Position)>> = LazyLock::new(|| {
    SUFFIXES
        .iter()
        .map(|(suffix, position)| {
            let pattern = format!(r"(?i)^(.+?)\s+{}$", suffix.replace(' ', r"\s+"));
            (
                Regex::new(&pattern).expect("suffix pattern is valid"),
                *position,
            )
        })
        .collect()
});

static JERSEY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?(\d{1,3})[\s.)\-]+(\S.*)$").expect("jersey pattern is valid"));

/// Classify a single line. Returns `None` for blank lines.
pub fn parse_line(line: &str) -> Option<BulkImportRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    for (rule, position) in SUFFIX_RULES.iter() {
        if let Some(caps) = rule.captures(line) {
            let name = caps[1].trim();
            if !name.is_empty() {
                return Some(BulkImportRecord::new(name, *position));
            }
        }
    }

    Some(BulkImportRecord::new(line, Position::Player))
}

/// Parse pasted text into one record per non-blank line, in input order.
/// Never fails: a line with no recognised role is a plain name.
pub fn parse_players(text: &str) -> Vec<BulkImportRecord> {
    text.lines().filter_map(parse_line).collect()
}

/// Like [`parse_players`], but a leading `7` or `#7` on a line becomes the
/// jersey number.
pub fn parse_players_with_jersey(text: &str) -> Vec<BulkImportRecord> {
    text.lines()
        .filter_map(|line| {
            let line = line.trim();
            match JERSEY_PREFIX.captures(line) {
                Some(caps) => {
                    let jersey = caps[1].parse::<i32>().ok();
                    parse_line(&caps[2]).map(|mut record| {
                        record.jersey_number = jersey;
                        record
                    })
                }
                None => parse_line(line),
            }
        })
        .collect()
}
