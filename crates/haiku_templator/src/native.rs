//! Native helpers callable from Jsonnet through `std.native`.
//!
//! Jsonnet can only hand primitive values to native code, so helpers that
//! work on structured data take and return JSON text. Every helper here is a
//! plain typed function; [`crate::vm`] binds them into the engine.

use serde::de::IgnoredAny;
use serde_json::Value;

use crate::error::NativeResult;

const DOCUMENT_SEPARATOR: &str = "---";

/// Decode a JSON document.
pub fn parse_json(json: &str) -> NativeResult<Value> {
    Ok(serde_json::from_str(json)?)
}

/// Decode a stream of YAML documents, one value per document.
///
/// Documents holding nothing but whitespace or comments are skipped, so
/// leading, trailing and repeated separators add no values. Empty input
/// yields no documents.
pub fn parse_yaml(yaml: &str) -> NativeResult<Vec<Value>> {
    let mut docs = Vec::new();
    for chunk in split_documents(yaml) {
        if is_blank_document(chunk) {
            continue;
        }
        docs.push(serde_yaml::from_str(chunk)?);
    }
    Ok(docs)
}

/// Split a YAML stream on `---` lines. A separator line may carry a trailing
/// comment; any other text after `---` stays with the document.
fn split_documents(yaml: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in yaml.split_inclusive('\n') {
        if is_separator(line) {
            chunks.push(&yaml[start..offset]);
            start = offset + line.len();
        }
        offset += line.len();
    }
    chunks.push(&yaml[start..]);
    chunks
}

fn is_separator(line: &str) -> bool {
    match line.strip_prefix(DOCUMENT_SEPARATOR) {
        Some(rest) => {
            let rest = rest.trim();
            rest.is_empty() || rest.starts_with('#')
        }
        None => false,
    }
}

fn is_blank_document(chunk: &str) -> bool {
    chunk.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

/// Re-indent a JSON document with `indent` spaces.
///
/// Only whitespace between tokens changes: key order, string escapes and
/// number text are copied as written. Surrounding whitespace is trimmed and
/// the result ends with a newline.
pub fn manifest_json_from_json(json: &str, indent: usize) -> NativeResult<String> {
    let json = json.trim();
    // Syntax check only; numbers are never converted
    serde_json::from_str::<IgnoredAny>(json)?;

    let mut out = reindent(json, &" ".repeat(indent));
    out.push('\n');
    Ok(out)
}

/// Lay out well-formed JSON one member per line. Empty objects and arrays
/// stay on one line.
fn reindent(json: &str, indent: &str) -> String {
    let mut out = String::with_capacity(json.len() * 2);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut opened = false;

    for c in json.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if matches!(c, ' ' | '\t' | '\n' | '\r') {
            continue;
        }
        if opened && c != '}' && c != ']' {
            opened = false;
            depth += 1;
            newline(&mut out, indent, depth);
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '{' | '[' => {
                out.push(c);
                opened = true;
            }
            '}' | ']' => {
                if opened {
                    opened = false;
                } else {
                    depth = depth.saturating_sub(1);
                    newline(&mut out, indent, depth);
                }
                out.push(c);
            }
            ',' => {
                out.push(c);
                newline(&mut out, indent, depth);
            }
            ':' => out.push_str(": "),
            _ => out.push(c),
        }
    }
    out
}

fn newline(out: &mut String, indent: &str, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(indent);
    }
}

/// Convert a JSON document to YAML.
pub fn manifest_yaml_from_json(json: &str) -> NativeResult<String> {
    let value: Value = serde_json::from_str(json)?;
    Ok(serde_yaml::to_string(&value)?)
}

/// Escape every regex metacharacter in `s`.
pub fn escape_string_regex(s: &str) -> String {
    regex::escape(s)
}

/// Report whether `pattern` matches anywhere in `s`.
pub fn regex_match(pattern: &str, s: &str) -> NativeResult<bool> {
    let re = regex::Regex::new(pattern)?;
    Ok(re.is_match(s))
}

/// Replace every match of `pattern` in `src` with `repl`.
///
/// `repl` may refer to capture groups as `$1` or `${name}`.
pub fn regex_subst(pattern: &str, src: &str, repl: &str) -> NativeResult<String> {
    let re = regex::Regex::new(pattern)?;
    Ok(re.replace_all(src, repl).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NativeError;
    use serde_json::json;

    #[test]
    fn test_parse_json() {
        assert_eq!(parse_json(r#"{"a": [1, "b"]}"#).unwrap(), json!({"a": [1, "b"]}));
        assert!(matches!(parse_json("{"), Err(NativeError::Json(_))));
    }

    #[test]
    fn test_parse_yaml_multi_document() {
        let docs = parse_yaml("a: 1\n---\nb: 2\n").unwrap();
        assert_eq!(docs, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn test_parse_yaml_single_document() {
        let docs = parse_yaml("items:\n  - x\n  - y\n").unwrap();
        assert_eq!(docs, vec![json!({"items": ["x", "y"]})]);
    }

    #[test]
    fn test_parse_yaml_empty() {
        assert!(parse_yaml("").unwrap().is_empty());
        assert!(parse_yaml("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_yaml_trailing_separator() {
        let docs = parse_yaml("a: 1\n---\n").unwrap();
        assert_eq!(docs, vec![json!({"a": 1})]);
    }

    #[test]
    fn test_parse_yaml_leading_separator() {
        let docs = parse_yaml("---\nkind: Service\n").unwrap();
        assert_eq!(docs, vec![json!({"kind": "Service"})]);
    }

    #[test]
    fn test_parse_yaml_repeated_separators() {
        let docs = parse_yaml("a: 1\n---\n---\nb: 2\n").unwrap();
        assert_eq!(docs, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn test_parse_yaml_skips_comment_only_documents() {
        assert!(parse_yaml("# just a comment\n").unwrap().is_empty());

        let docs = parse_yaml("--- # first\na: 1\n---\n# nothing here\n---\nb: 2").unwrap();
        assert_eq!(docs, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn test_parse_yaml_keeps_explicit_null() {
        let docs = parse_yaml("a: 1\n---\nnull\n").unwrap();
        assert_eq!(docs, vec![json!({"a": 1}), Value::Null]);
    }

    #[test]
    fn test_parse_yaml_separator_inside_block_scalar() {
        let docs = parse_yaml("text: |\n  ---\n  body\n").unwrap();
        assert_eq!(docs, vec![json!({"text": "---\nbody\n"})]);
    }

    #[test]
    fn test_parse_yaml_malformed() {
        assert!(matches!(
            parse_yaml("a: 1\n---\nb: [unclosed\n"),
            Err(NativeError::Yaml(_))
        ));
    }

    #[test]
    fn test_manifest_json_from_json() {
        assert_eq!(
            manifest_json_from_json("{\"a\":1}", 2).unwrap(),
            "{\n  \"a\": 1\n}\n"
        );
    }

    #[test]
    fn test_manifest_json_keeps_key_order_and_trims() {
        let out = manifest_json_from_json("  {\"z\":1,\"a\":[true]}\n", 4).unwrap();
        assert_eq!(out, "{\n    \"z\": 1,\n    \"a\": [\n        true\n    ]\n}\n");
    }

    #[test]
    fn test_manifest_json_keeps_number_text() {
        let out = manifest_json_from_json(
            r#"{"a":1.0,"b":1e3,"c":12345678901234567890123}"#,
            2,
        )
        .unwrap();
        assert_eq!(
            out,
            "{\n  \"a\": 1.0,\n  \"b\": 1e3,\n  \"c\": 12345678901234567890123\n}\n"
        );
    }

    #[test]
    fn test_manifest_json_empty_containers_and_strings() {
        let out = manifest_json_from_json(r#"{"a": [], "b": {}, "s": "x\"{ ,:]"}"#, 2).unwrap();
        assert_eq!(
            out,
            "{\n  \"a\": [],\n  \"b\": {},\n  \"s\": \"x\\\"{ ,:]\"\n}\n"
        );
    }

    #[test]
    fn test_manifest_json_zero_indent() {
        assert_eq!(manifest_json_from_json("[1,2]", 0).unwrap(), "[\n1,\n2\n]\n");
    }

    #[test]
    fn test_manifest_json_rejects_garbage() {
        assert!(manifest_json_from_json("nope", 2).is_err());
    }

    #[test]
    fn test_manifest_yaml_from_json() {
        let out = manifest_yaml_from_json(r#"{"name": "web", "ports": [80]}"#).unwrap();
        let back: Value = serde_yaml::from_str(&out).unwrap();
        assert_eq!(back, json!({"name": "web", "ports": [80]}));
        assert!(out.contains("name: web"));
    }

    #[test]
    fn test_escape_string_regex() {
        let escaped = escape_string_regex("a.b*c(d)");
        assert_eq!(escaped, r"a\.b\*c\(d\)");
        assert!(regex_match(&escaped, "xa.b*c(d)y").unwrap());
        assert!(!regex_match(&escaped, "aXb*c(d)").unwrap());
    }

    #[test]
    fn test_regex_match() {
        assert!(regex_match("^web-[0-9]+$", "web-12").unwrap());
        assert!(regex_match("b", "abc").unwrap());
        assert!(!regex_match("^b", "abc").unwrap());
        assert!(matches!(regex_match("(", "x"), Err(NativeError::Regex(_))));
    }

    #[test]
    fn test_regex_subst() {
        assert_eq!(regex_subst("o", "foo", "0").unwrap(), "f00");
        assert_eq!(
            regex_subst("(\\w+)@(\\w+)", "me@host", "${2}/$1").unwrap(),
            "host/me"
        );
        assert!(regex_subst("[", "x", "y").is_err());
    }
}
