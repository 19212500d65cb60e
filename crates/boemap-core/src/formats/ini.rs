//! Minimal INI reader shared by the rule mapping and record formats.

use tracing::warn;

use crate::error::FormatError;

/// One `key = value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniEntry<'a> {
    /// 1-based line number.
    pub line: usize,
    pub key: &'a str,
    pub value: &'a str,
}

/// A `[name]` header and its entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniSection<'a> {
    pub name: &'a str,
    pub entries: Vec<IniEntry<'a>>,
}

/// Split INI text into sections.
///
/// Keys and values are trimmed and split at the first `=`. Blank lines and
/// lines starting with `#` or `;` are ignored, as are lines without `=`.
/// Repeated headers continue the earlier section.
pub fn parse(text: &str) -> Result<Vec<IniSection<'_>>, FormatError> {
    let mut sections: Vec<IniSection<'_>> = Vec::new();
    let mut current: Option<usize> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if let Some(name) = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            let name = name.trim();
            current = Some(match sections.iter().position(|s| s.name == name) {
                Some(i) => i,
                None => {
                    sections.push(IniSection {
                        name,
                        entries: Vec::new(),
                    });
                    sections.len() - 1
                }
            });
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            warn!("line {}: ignoring {:?}", line, trimmed);
            continue;
        };
        let index = current.ok_or(FormatError::MissingSection { line })?;
        sections[index].entries.push(IniEntry {
            line,
            key: key.trim(),
            value: value.trim(),
        });
    }

    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sections_and_entries() {
        let text = "# rules\n[PART_I]\nBE No = B4\n\n; note\n[PART_II]\nsno=A38+\nurl = a=b\n";
        let sections = parse(text).unwrap();

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].name, "PART_I");
        assert_eq!(
            sections[0].entries,
            vec![IniEntry { line: 3, key: "BE No", value: "B4" }]
        );
        assert_eq!(sections[1].entries[1].key, "url");
        assert_eq!(sections[1].entries[1].value, "a=b");
    }

    #[test]
    fn test_entry_before_header() {
        assert_eq!(
            parse("\nsno = A38+\n[PART_II]\n"),
            Err(FormatError::MissingSection { line: 2 })
        );
    }

    #[test]
    fn test_repeated_header_continues_section() {
        let sections = parse("[A]\nx = 1\n[B]\n[A]\ny = 2\n").unwrap();
        let keys: Vec<&str> = sections[0].entries.iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["x", "y"]);
        assert!(sections[1].entries.is_empty());
    }

    #[test]
    fn test_lines_without_equals_are_ignored() {
        let sections = parse("[A]\njust text\nx = 1\n").unwrap();
        assert_eq!(sections[0].entries.len(), 1);
    }
}
