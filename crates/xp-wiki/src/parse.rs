//! Scraping the training-accounts table out of rendered wiki HTML.

use std::sync::LazyLock;

use regex::Regex;
use xp_core::{ExperienceSource, SourceTable};

use crate::WikiError;

static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<table\b[^>]*\bclass\s*=\s*["'][^"']*\bwikitable\b[^"']*["'][^>]*>(.*?)</table>"#)
        .unwrap()
});
static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr>").unwrap());
static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<t([dh])\b[^>]*>(.*?)</t[dh]>").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap());

/// Column positions on the training-accounts page.
const NAME_COL: usize = 0;
const NUMBER_COL: usize = 1;
const LEVEL_COL: usize = 5;
const EXP_DAY_COL: usize = 6;
const EXP_NIGHT_COL: usize = 7;

/// Parses the first `wikitable` in `html` into a source table.
///
/// The first row is the header. Rows that are too short or carry
/// unparsable numbers are skipped with a warning.
pub fn parse_table(html: &str) -> Result<SourceTable, WikiError> {
    let table = TABLE_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .ok_or(WikiError::TableNotFound)?;

    let mut data = Vec::new();
    for (index, row) in ROW_RE.captures_iter(table.as_str()).skip(1).enumerate() {
        let cells: Vec<String> = CELL_RE
            .captures_iter(&row[1])
            .map(|cell| text_content(&cell[2]))
            .collect();
        match parse_row(&cells) {
            Some(source) => data.push(source),
            None => tracing::warn!(row = index + 1, ?cells, "skipping malformed trainer row"),
        }
    }

    tracing::debug!(rows = data.len(), "parsed training accounts table");
    Ok(SourceTable::new(data))
}

fn parse_row(cells: &[String]) -> Option<ExperienceSource> {
    let name = cells.get(NAME_COL)?.replace('*', "");
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let number = parse_number(cells.get(NUMBER_COL)?)?;
    let exp_day = parse_number(cells.get(EXP_DAY_COL)?)?;
    let exp_night = parse_number(cells.get(EXP_NIGHT_COL)?)?;

    let mut source = ExperienceSource::new(name, number, exp_day, exp_night);
    if let Some(level) = cells.get(LEVEL_COL).map(|level| level.trim()) {
        if !level.is_empty() {
            source = source.with_level(level);
        }
    }
    Some(source)
}

/// Parses a leading integer, ignoring thousands separators.
fn parse_number(text: &str) -> Option<u64> {
    let cleaned = text.replace(',', "");
    let cleaned = cleaned.trim();
    let end = cleaned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(cleaned.len());
    cleaned[..end].parse().ok()
}

/// Strips tags and decodes entities, then trims.
fn text_content(fragment: &str) -> String {
    let stripped = TAG_RE.replace_all(fragment, "");
    let decoded = ENTITY_RE.replace_all(&stripped, |caps: &regex::Captures<'_>| {
        decode_entity(&caps[1]).map_or_else(|| caps[0].to_string(), String::from)
    });
    decoded.trim().to_string()
}

fn decode_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(dec) = entity.strip_prefix('#') {
        return dec.parse().ok().and_then(char::from_u32);
    }
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
<table class="toc"><tr><td>contents</td></tr></table>
<table class="wikitable sortable">
<tbody>
<tr><th>Trainer</th><th>ID</th><th>Pokemon</th><th>Type</th><th>Notes</th><th>Level</th><th>Exp (Day)</th><th>Exp (Night)</th></tr>
<tr>
  <td><a href="/wiki/Gym_A">Gym&nbsp;Leader A*</a></td>
  <td>1234</td><td>x</td><td>x</td><td>x</td>
  <td>2,500</td>
  <td>1,250,000</td>
  <td>2,500,000</td>
</tr>
<tr>
  <td>Tom &amp; Jerry</td><td>77</td><td>x</td><td>x</td><td>x</td><td></td><td>30</td><td>45</td>
</tr>
<tr><td>Broken</td><td>n/a</td><td>x</td><td>x</td><td>x</td><td>5</td><td>1</td><td>1</td></tr>
<tr><td>Short</td><td>5</td></tr>
</tbody>
</table>
<table class="wikitable"><tr><th>h</th></tr><tr><td>second table</td></tr></table>
</body></html>
"#;

    #[test]
    fn parses_first_wikitable() {
        let table = parse_table(PAGE).unwrap();
        assert_eq!(table.len(), 2);

        let first = &table.data[0];
        assert_eq!(first.name, "Gym\u{a0}Leader A");
        assert_eq!(first.number, 1234);
        assert_eq!(first.exp_day, 1_250_000);
        assert_eq!(first.exp_night, 2_500_000);
        assert_eq!(first.level.as_deref(), Some("2,500"));

        let second = &table.data[1];
        assert_eq!(second.name, "Tom & Jerry");
        assert_eq!(second.level, None);
        assert_eq!((second.exp_day, second.exp_night), (30, 45));
    }

    #[test]
    fn missing_table_is_an_error() {
        let err = parse_table("<table class=\"toc\"></table>").unwrap_err();
        assert!(matches!(err, WikiError::TableNotFound));
    }

    #[test]
    fn parse_number_strips_separators() {
        assert_eq!(parse_number(" 15,625,000 "), Some(15_625_000));
        assert_eq!(parse_number("300 (x2)"), Some(300));
        assert_eq!(parse_number("?"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn text_content_decodes_entities() {
        assert_eq!(text_content("<b>a&#39;b</b> &#x41; &bogus;"), "a'b A &bogus;");
    }
}
