//! Markdown resource parser.
//!
//! The resource is ordinary Markdown. Two constructs carry data:
//!
//! - identifier bullets: ``- `{GUID}`: KIND label``
//! - fenced blocks tagged `reg`, holding `.reg`-style keys and values
//!
//! Everything else is prose and is skipped. Any construct that starts like one
//! of the above but does not finish like it aborts the load with the offending
//! line number.

use crate::catalog::{CatalogError, IdentifierEntry, IdentifierKind, RegistryKeyEntry};
use crate::guid::Guid;

/// The raw tables, in source order, before indexing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResourceTables {
    pub identifiers: Vec<IdentifierEntry>,
    pub registry: Vec<RegistryKeyEntry>,
}

struct Fence {
    marker: char,
    width: usize,
    registry: bool,
    opened_at: usize,
    current_key: Option<String>,
}

fn malformed(line: usize, reason: impl Into<String>) -> CatalogError {
    CatalogError::MalformedEntry {
        line,
        reason: reason.into(),
    }
}

pub fn parse_resource(text: &str) -> Result<ResourceTables, CatalogError> {
    let mut tables = ResourceTables::default();
    let mut fence: Option<Fence> = None;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if let Some(open) = fence.as_mut() {
            if closes_fence(line, open) {
                fence = None;
                continue;
            }
            if open.registry {
                parse_registry_line(
                    line,
                    line_no,
                    &mut open.current_key,
                    &mut tables.registry,
                )?;
            }
            continue;
        }

        if let Some((marker, width, info)) = opens_fence(line) {
            let tag = info.split_whitespace().next().unwrap_or("");
            fence = Some(Fence {
                marker,
                width,
                registry: tag.eq_ignore_ascii_case("reg") || tag.eq_ignore_ascii_case("registry"),
                opened_at: line_no,
                current_key: None,
            });
            continue;
        }

        if let Some(entry) = parse_identifier_bullet(line, line_no)? {
            tables.identifiers.push(entry);
        }
    }

    if let Some(open) = fence {
        return Err(malformed(open.opened_at, "unterminated fenced block"));
    }
    Ok(tables)
}

fn opens_fence(line: &str) -> Option<(char, usize, &str)> {
    let marker = line.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let width = line.chars().take_while(|c| *c == marker).count();
    if width < 3 {
        return None;
    }
    Some((marker, width, line[width..].trim()))
}

fn closes_fence(line: &str, fence: &Fence) -> bool {
    let width = line.chars().take_while(|c| *c == fence.marker).count();
    width >= fence.width && line[width..].trim().is_empty()
}

fn parse_identifier_bullet(line: &str, line_no: usize) -> Result<Option<IdentifierEntry>, CatalogError> {
    let Some(body) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) else {
        return Ok(None);
    };
    let body = body.trim_start();
    let Some(rest) = body.strip_prefix("`{") else {
        return Ok(None);
    };
    let Some(close) = rest.find('`') else {
        return Err(malformed(line_no, "unterminated GUID code span"));
    };
    // `{` .. `}` inside the code span
    let guid_text = &body[1..close + 2];
    let guid = Guid::parse(guid_text)
        .map_err(|_| malformed(line_no, format!("invalid GUID {guid_text}")))?;

    let Some(after) = rest[close + 1..].strip_prefix(':') else {
        return Err(malformed(line_no, "expected ':' after GUID"));
    };
    let after = after.trim();
    let (tag, label) = after.split_once(char::is_whitespace).unwrap_or((after, ""));
    let kind = IdentifierKind::from_tag(tag)
        .ok_or_else(|| malformed(line_no, format!("unknown identifier kind '{tag}'")))?;
    let label = label.trim();
    if label.is_empty() {
        return Err(malformed(line_no, "missing label"));
    }

    Ok(Some(IdentifierEntry {
        guid,
        kind,
        label: label.to_string(),
        line: line_no,
    }))
}

fn parse_registry_line(
    line: &str,
    line_no: usize,
    current_key: &mut Option<String>,
    out: &mut Vec<RegistryKeyEntry>,
) -> Result<(), CatalogError> {
    if line.is_empty()
        || line.starts_with(';')
        || line == "REGEDIT4"
        || line.starts_with("Windows Registry Editor")
    {
        return Ok(());
    }

    if let Some(rest) = line.strip_prefix('[') {
        let Some(path) = rest.strip_suffix(']') else {
            return Err(malformed(line_no, "unterminated key path"));
        };
        let path = path.trim();
        if path.is_empty() {
            return Err(malformed(line_no, "empty key path"));
        }
        if path.starts_with('-') {
            return Err(malformed(line_no, "key deletions are not reference data"));
        }
        *current_key = Some(path.to_string());
        return Ok(());
    }

    let Some(path) = current_key.as_deref() else {
        return Err(malformed(line_no, "value outside of a key"));
    };

    let (value_name, rest) = if let Some(rest) = line.strip_prefix('@') {
        (String::new(), rest)
    } else if line.starts_with('"') {
        read_quoted(line, line_no)?
    } else {
        return Err(malformed(line_no, "expected '@' or a quoted value name"));
    };

    let Some(data) = rest.trim_start().strip_prefix('=') else {
        return Err(malformed(line_no, "expected '=' after value name"));
    };
    let data = data.trim();
    let value_data = if data.starts_with('"') {
        let (value, tail) = read_quoted(data, line_no)?;
        if !tail.trim().is_empty() {
            return Err(malformed(line_no, "trailing characters after value data"));
        }
        value
    } else if data.is_empty() {
        return Err(malformed(line_no, "missing value data"));
    } else {
        data.to_string()
    };

    out.push(RegistryKeyEntry {
        path: path.to_string(),
        value_name,
        value_data,
        line: line_no,
    });
    Ok(())
}

/// Reads a `.reg` quoted string starting at `s[0] == '"'`, returning the
/// unescaped contents and the remainder after the closing quote.
fn read_quoted(s: &str, line_no: usize) -> Result<(String, &str), CatalogError> {
    let mut out = String::new();
    let mut chars = s.char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped)) => out.push(escaped),
                None => break,
            },
            '"' => return Ok((out, &s[i + 1..])),
            _ => out.push(c),
        }
    }
    Err(malformed(line_no, "unterminated quoted string"))
}

#[cfg(test)]
mod tests {
    use super::parse_resource;
    use crate::catalog::{CatalogError, IdentifierKind};
    use crate::domain::constants::BUNDLED_RESOURCE as BUNDLED;

    fn malformed_line(text: &str) -> usize {
        match parse_resource(text) {
            Err(CatalogError::MalformedEntry { line, .. }) => line,
            other => panic!("expected MalformedEntry, got {other:?}"),
        }
    }

    #[test]
    fn bundled_resource_parses_both_tables() {
        let tables = parse_resource(BUNDLED).unwrap();
        assert_eq!(tables.identifiers.len(), 29);
        assert_eq!(tables.registry.len(), 20);

        let first = &tables.identifiers[0];
        assert_eq!(first.kind, IdentifierKind::Clsid);
        assert_eq!(first.label, "MSDDS Diagram Control 80");
        assert_eq!(
            first.guid.to_string(),
            "{C795D2FE-7776-11D8-9070-00065B840D9C}"
        );
    }

    #[test]
    fn prose_bullets_and_untagged_fences_are_skipped() {
        let text = "\
- [link]: somewhere
- plain bullet
```text
- `{not a guid}`: CLSID inside a code block
```
* `{77D2C902-7779-11D8-9070-00065B840D9C}`: iid IDdsPolyline
";
        let tables = parse_resource(text).unwrap();
        assert_eq!(tables.identifiers.len(), 1);
        assert_eq!(tables.identifiers[0].kind, IdentifierKind::Iid);
        assert_eq!(tables.identifiers[0].line, 6);
        assert!(tables.registry.is_empty());
    }

    #[test]
    fn registry_values_are_unescaped() {
        let text = r#"```reg
REGEDIT4
; comment
[HKEY_CLASSES_ROOT\CLSID\{C795D2FE-7776-11D8-9070-00065B840D9C}\InprocServer32]
@="C:\\Shared\\MSDDS.DLL"
"ThreadingModel"="Apartment"
"Flags"=dword:00000001
"Quoted"="say \"hi\""
```"#;
        let tables = parse_resource(text).unwrap();
        let values: Vec<(&str, &str)> = tables
            .registry
            .iter()
            .map(|r| (r.value_name.as_str(), r.value_data.as_str()))
            .collect();
        assert_eq!(
            values,
            vec![
                ("", r"C:\Shared\MSDDS.DLL"),
                ("ThreadingModel", "Apartment"),
                ("Flags", "dword:00000001"),
                ("Quoted", "say \"hi\""),
            ]
        );
        assert!(tables.registry[0].path.ends_with(r"\InprocServer32"));
    }

    #[test]
    fn malformed_constructs_report_their_line() {
        assert_eq!(malformed_line("intro\n- `{1234}`: CLSID Broken\n"), 2);
        assert_eq!(
            malformed_line("- `{77D2C902-7779-11D8-9070-00065B840D9C}`: COCLASS Thing\n"),
            1
        );
        assert_eq!(
            malformed_line("- `{77D2C902-7779-11D8-9070-00065B840D9C}`: CLSID\n"),
            1
        );
        assert_eq!(malformed_line("```reg\n@=\"orphan\"\n```\n"), 2);
        assert_eq!(malformed_line("```reg\n[HKCR\\X\n```\n"), 2);
        assert_eq!(malformed_line("```reg\n[HKCR\\X]\n@=\"open\n```\n"), 3);
        assert_eq!(malformed_line("text\n```reg\n[HKCR\\X]\n"), 2);
    }

    #[test]
    fn leading_byte_order_mark_is_ignored() {
        let text = "\u{feff}- `{C795D2FE-7776-11D8-9070-00065B840D9C}`: CLSID MSDDS Diagram Control 80\n";
        let tables = parse_resource(text).unwrap();
        assert_eq!(tables.identifiers.len(), 1);
        assert_eq!(tables.identifiers[0].line, 1);
    }

    #[test]
    fn tilde_fences_and_registry_tag_carry_values() {
        let text = r#"~~~~ registry
[HKCR\MSDDS.Diagram.080\CLSID]
@="{C795D2FE-7776-11D8-9070-00065B840D9C}"
~~~~~
```Reg
[HKLM\SOFTWARE\Classes\MSDTDDS.2\CLSID]
@="{B0406340-B0C5-11D0-89A9-00A0C9054129}"
```"#;
        let tables = parse_resource(text).unwrap();
        let lines: Vec<usize> = tables.registry.iter().map(|r| r.line).collect();
        assert_eq!(lines, [3, 7]);
        assert_eq!(tables.registry[0].path, r"HKCR\MSDDS.Diagram.080\CLSID");
        assert!(tables.registry[1].path.starts_with(r"HKLM\SOFTWARE\Classes\"));
    }

    #[test]
    fn parsing_is_idempotent() {
        assert_eq!(parse_resource(BUNDLED).unwrap(), parse_resource(BUNDLED).unwrap());
    }
}
