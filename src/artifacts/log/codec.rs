//! Line codec for the commit log
//!
//! A record is a single line of fields joined by [`FIELD_DELIMITER`]. Inside a
//! field the delimiter, the escape character and line breaks are escaped, so a
//! line can always be split back into exactly the fields it was built from:
//!
//! ```text
//! \   ->  \\
//! |   ->  \|
//! LF  ->  \n
//! CR  ->  \r
//! ```

pub const FORMAT_MARKER: &str = "ck1";
pub const FIELD_DELIMITER: char = '|';
const ESCAPE: char = '\\';

pub fn escape_field(field: &str) -> String {
    let mut escaped = String::with_capacity(field.len());

    for c in field.chars() {
        match c {
            ESCAPE => escaped.push_str("\\\\"),
            FIELD_DELIMITER => escaped.push_str("\\|"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }

    escaped
}

pub fn join_fields<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|field| escape_field(field.as_ref()))
        .collect::<Vec<_>>()
        .join(&FIELD_DELIMITER.to_string())
}

/// Split a line into unescaped fields
///
/// Fails on unknown escape sequences and on a dangling escape character.
pub fn split_fields(line: &str) -> anyhow::Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE => match chars.next() {
                Some(ESCAPE) => current.push(ESCAPE),
                Some(FIELD_DELIMITER) => current.push(FIELD_DELIMITER),
                Some('n') => current.push('\n'),
                Some('r') => current.push('\r'),
                Some(other) => anyhow::bail!("unknown escape sequence \\{}", other),
                None => anyhow::bail!("dangling escape at end of line"),
            },
            FIELD_DELIMITER => fields.push(std::mem::take(&mut current)),
            '\n' | '\r' => anyhow::bail!("unescaped line break inside record"),
            _ => current.push(c),
        }
    }
    fields.push(current);

    Ok(fields)
}
