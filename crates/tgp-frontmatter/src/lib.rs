//! Leading `key: value` blocks delimited by `---` lines.
//!
//! ```rust
//! let doc = "---\ntags: rust\n---\n# Note\n";
//! let doc = tgp_frontmatter::update_key(doc, "telegraph_page_path", "Note-01-01");
//! assert_eq!(doc, "---\ntags: rust\ntelegraph_page_path: Note-01-01\n---\n# Note\n");
//! ```
use thiserror::Error;

const DELIMITER: &str = "---";

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

struct Bounds {
    block_start: usize,
    block_end: usize,
    body_start: usize,
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']) == DELIMITER
}

fn locate(content: &str) -> Option<Bounds> {
    let mut lines = content.split_inclusive('\n');
    let opening = lines.next()?;
    if !is_delimiter(opening) {
        return None;
    }

    let block_start = opening.len();
    let mut offset = block_start;
    for line in lines {
        if is_delimiter(line) {
            return Some(Bounds {
                block_start,
                block_end: offset,
                body_start: offset + line.len(),
            });
        }
        offset += line.len();
    }

    None
}

/// Splits `content` into its frontmatter block (without delimiters) and the
/// remaining document body.
pub fn split(content: &str) -> (Option<&str>, &str) {
    match locate(content) {
        Some(bounds) => (
            Some(&content[bounds.block_start..bounds.block_end]),
            &content[bounds.body_start..],
        ),
        None => (None, content),
    }
}

/// Line ending of the first line, used for lines written into the block.
fn line_ending(content: &str) -> &'static str {
    match content.split_inclusive('\n').next() {
        Some(line) if line.ends_with("\r\n") => "\r\n",
        _ => "\n",
    }
}

fn is_key_line(line: &str, key: &str) -> bool {
    line.split_once(':')
        .is_some_and(|(k, _)| k.trim_end() == key)
}

/// Sets `key` to `value`, keeping every other line of the block and each
/// line's terminator. A block is prepended when `content` has none.
pub fn update_key(content: &str, key: &str, value: &str) -> String {
    let newline = line_ending(content);
    let entry = format!("{key}: {value}");

    let Some(bounds) = locate(content) else {
        return format!("{DELIMITER}{newline}{entry}{newline}{DELIMITER}{newline}{content}");
    };

    let block = &content[bounds.block_start..bounds.block_end];
    let mut updated = String::with_capacity(content.len() + entry.len() + newline.len());
    updated.push_str(&content[..bounds.block_start]);

    let mut replaced = false;
    for line in block.split_inclusive('\n') {
        if !replaced && is_key_line(line, key) {
            let body_len = line.trim_end_matches(['\n', '\r']).len();
            updated.push_str(&entry);
            updated.push_str(&line[body_len..]);
            replaced = true;
        } else {
            updated.push_str(line);
        }
    }
    if !replaced {
        updated.push_str(&entry);
        updated.push_str(newline);
    }

    updated.push_str(&content[bounds.block_end..]);
    updated
}

/// Returns the scalar value of `key`, or `None` when the document has no
/// block, the key is missing, or its value is null or not a scalar.
pub fn read_key(content: &str, key: &str) -> Result<Option<String>, Error> {
    let Some(block) = split(content).0 else {
        return Ok(None);
    };
    if block.trim().is_empty() {
        return Ok(None);
    }

    let value: serde_yaml::Value = serde_yaml::from_str(block)?;
    Ok(match value.get(key) {
        Some(serde_yaml::Value::String(s)) => Some(s.clone()),
        Some(serde_yaml::Value::Number(n)) => Some(n.to_string()),
        Some(serde_yaml::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::no_block(
        "# Title\n",
        "---\ntelegraph_page_url: https://telegra.ph/Title\n---\n# Title\n"
    )]
    #[case::empty_document("", "---\ntelegraph_page_url: https://telegra.ph/Title\n---\n")]
    #[case::append_key(
        "---\ntags: [a, b]\n---\nbody\n",
        "---\ntags: [a, b]\ntelegraph_page_url: https://telegra.ph/Title\n---\nbody\n"
    )]
    #[case::replace_key(
        "---\ntitle: x\ntelegraph_page_url: old\nauthor: me\n---\nbody",
        "---\ntitle: x\ntelegraph_page_url: https://telegra.ph/Title\nauthor: me\n---\nbody"
    )]
    #[case::empty_block(
        "---\n---\nbody",
        "---\ntelegraph_page_url: https://telegra.ph/Title\n---\nbody"
    )]
    #[case::body_rule_untouched(
        "---\na: 1\n---\nintro\n---\nmore",
        "---\na: 1\ntelegraph_page_url: https://telegra.ph/Title\n---\nintro\n---\nmore"
    )]
    #[case::unclosed_block(
        "---\nnot frontmatter",
        "---\ntelegraph_page_url: https://telegra.ph/Title\n---\n---\nnot frontmatter"
    )]
    #[case::empty_value(
        "---\ntelegraph_page_url:\n---\nbody\n",
        "---\ntelegraph_page_url: https://telegra.ph/Title\n---\nbody\n"
    )]
    #[case::space_before_colon(
        "---\ntelegraph_page_url : old\n---\n",
        "---\ntelegraph_page_url: https://telegra.ph/Title\n---\n"
    )]
    #[case::nested_key_not_matched(
        "---\nmeta:\n  telegraph_page_url: x\n---\n",
        "---\nmeta:\n  telegraph_page_url: x\ntelegraph_page_url: https://telegra.ph/Title\n---\n"
    )]
    #[case::crlf_append(
        "---\r\ntitle: x\r\n---\r\nbody",
        "---\r\ntitle: x\r\ntelegraph_page_url: https://telegra.ph/Title\r\n---\r\nbody"
    )]
    #[case::crlf_replace(
        "---\r\ntelegraph_page_url: old\r\ntitle: x\r\n---\r\n",
        "---\r\ntelegraph_page_url: https://telegra.ph/Title\r\ntitle: x\r\n---\r\n"
    )]
    #[case::crlf_no_block(
        "# Title\r\n",
        "---\r\ntelegraph_page_url: https://telegra.ph/Title\r\n---\r\n# Title\r\n"
    )]
    #[case::prefix_key_not_matched(
        "---\ntelegraph_page_url_old: x\n---\n",
        "---\ntelegraph_page_url_old: x\ntelegraph_page_url: https://telegra.ph/Title\n---\n"
    )]
    fn test_update_key(#[case] content: &str, #[case] expected: &str) {
        assert_eq!(
            update_key(content, "telegraph_page_url", "https://telegra.ph/Title"),
            expected
        );
    }

    #[test]
    fn test_update_key_twice_keeps_both() {
        let content = update_key("# Note", "telegraph_page_url", "https://telegra.ph/Note-10-16");
        let content = update_key(&content, "telegraph_page_path", "Note-10-16");

        assert_eq!(
            content,
            "---\ntelegraph_page_url: https://telegra.ph/Note-10-16\ntelegraph_page_path: Note-10-16\n---\n# Note"
        );
    }

    #[test]
    fn test_update_key_over_empty_value_stays_readable() {
        let content = update_key(
            "---\ntelegraph_page_path:\n---\nbody\n",
            "telegraph_page_path",
            "Note-10-16",
        );

        assert_eq!(
            read_key(&content, "telegraph_page_path").unwrap().as_deref(),
            Some("Note-10-16")
        );
    }

    #[rstest]
    #[case::with_block("---\na: 1\n---\nbody\n", Some("a: 1\n"), "body\n")]
    #[case::without_block("body\n", None, "body\n")]
    #[case::crlf("---\r\na: 1\r\n---\r\nbody", Some("a: 1\r\n"), "body")]
    #[case::closing_at_eof("---\na: 1\n---", Some("a: 1\n"), "")]
    fn test_split(#[case] content: &str, #[case] block: Option<&str>, #[case] body: &str) {
        assert_eq!(split(content), (block, body));
    }

    #[rstest]
    #[case::string("---\ntelegraph_page_path: Note-10-16\n---\n", Some("Note-10-16"))]
    #[case::quoted("---\ntelegraph_page_path: \"Note: 2\"\n---\n", Some("Note: 2"))]
    #[case::number("---\ntelegraph_page_path: 42\n---\n", Some("42"))]
    #[case::null("---\ntelegraph_page_path:\n---\n", None)]
    #[case::missing("---\ntitle: x\n---\n", None)]
    #[case::empty_block("---\n---\n", None)]
    #[case::no_block("# Title", None)]
    fn test_read_key(#[case] content: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            read_key(content, "telegraph_page_path").unwrap(),
            expected.map(ToString::to_string)
        );
    }

    #[test]
    fn test_read_key_invalid_yaml() {
        let result = read_key("---\n: : :\n  - [\n---\n", "telegraph_page_path");
        assert!(matches!(result, Err(Error::Yaml(_))));
    }
}
