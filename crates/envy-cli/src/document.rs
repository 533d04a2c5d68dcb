//! Reading and rendering documents.
//!
//! Files ending in `.toml` are TOML; everything else is JSON.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;

use crate::cli::OutputFormat;

/// On-disk encoding of a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Pick the encoding from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

impl From<DocumentFormat> for OutputFormat {
    fn from(format: DocumentFormat) -> Self {
        match format {
            DocumentFormat::Json => Self::Json,
            DocumentFormat::Toml => Self::Toml,
        }
    }
}

/// Parse document text in the given encoding.
pub fn parse_document(text: &str, format: DocumentFormat) -> anyhow::Result<Value> {
    let value = match format {
        DocumentFormat::Json => serde_json::from_str(text)?,
        DocumentFormat::Toml => toml::from_str(text)?,
    };
    Ok(value)
}

/// Read and parse a document, choosing the encoding from its extension.
pub fn read_document(path: &Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_document(&text, DocumentFormat::from_path(path))
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// Render a document. `Text` is always indented JSON.
pub fn render(value: &Value, format: OutputFormat, pretty: bool) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Text => serde_json::to_string_pretty(value)?,
        OutputFormat::Json if pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Toml if pretty => toml::to_string_pretty(value)?,
        OutputFormat::Toml => toml::to_string(value)?,
    };
    Ok(rendered)
}

/// Render `value` in the encoding matching `path` and write it there.
pub fn write_document(path: &Path, value: &Value, pretty: bool) -> anyhow::Result<()> {
    let format = DocumentFormat::from_path(path).into();
    let mut rendered = render(value, format, pretty)?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    fs::write(path, rendered).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.toml")), DocumentFormat::Toml);
        assert_eq!(DocumentFormat::from_path(Path::new("A.TOML")), DocumentFormat::Toml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("noext")), DocumentFormat::Json);
    }

    #[test]
    fn parse_toml_tables() {
        let text = "name = \"x\"\n[server]\nport = 80\n";
        let v = parse_document(text, DocumentFormat::Toml).unwrap();
        assert_eq!(v, json!({"name": "x", "server": {"port": 80}}));
    }

    #[test]
    fn parse_invalid_json_fails() {
        assert!(parse_document("{not json", DocumentFormat::Json).is_err());
    }

    #[test]
    fn render_compact_json() {
        let out = render(&json!({"a": [1, 2]}), OutputFormat::Json, false).unwrap();
        assert_eq!(out, r#"{"a":[1,2]}"#);
    }

    #[test]
    fn render_text_is_pretty_json() {
        let out = render(&json!({"a": 1}), OutputFormat::Text, false).unwrap();
        assert_eq!(out, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn render_toml() {
        let out = render(&json!({"a": 1, "b": {"c": "d"}}), OutputFormat::Toml, false).unwrap();
        let back = parse_document(&out, DocumentFormat::Toml).unwrap();
        assert_eq!(back, json!({"a": 1, "b": {"c": "d"}}));
    }

    #[test]
    fn toml_cannot_hold_null() {
        assert!(render(&json!({"a": null}), OutputFormat::Toml, true).is_err());
    }

    #[test]
    fn read_reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "[").unwrap();
        let err = read_document(&path).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn write_then_read_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.toml");
        write_document(&path, &json!({"k": [1, 2], "t": {"x": true}}), true).unwrap();
        assert_eq!(read_document(&path).unwrap(), json!({"k": [1, 2], "t": {"x": true}}));
    }
}
