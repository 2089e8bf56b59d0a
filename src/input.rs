//! Loading scanner output.
//!
//! Accepted JSON shapes:
//! - a flat array of issue objects (one page)
//! - an array of arrays (one page each)
//! - an array of `{ "url": ..., "issues": [...] }` page objects
//! - a single page object, or `{ "pages": [...] }`
//!
//! Individual entries are read leniently: wrong-typed fields fall back to
//! their defaults. Only a top-level value that is not a sequence is fatal.

use crate::error::{Error, Result};
use crate::models::{IssueType, PageScan, RawIssue};
use glob::glob;
use serde_json::Value as Json;
use std::fs;
use std::path::{Path, PathBuf};

fn kind_of(v: &Json) -> &'static str {
    match v {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

fn text_field(obj: &serde_json::Map<String, Json>, key: &str) -> String {
    match obj.get(key) {
        Some(Json::String(s)) => s.clone(),
        Some(Json::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Read one issue, defaulting anything missing or malformed.
pub fn issue_from_value(v: &Json) -> RawIssue {
    let Json::Object(obj) = v else {
        tracing::warn!(found = kind_of(v), "scan entry is not an object; using defaults");
        return RawIssue::default();
    };
    let context = match obj.get("context") {
        None | Some(Json::Null) => String::new(),
        Some(Json::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    let affected_elements = obj
        .get("affectedElements")
        .or_else(|| obj.get("affected_elements"))
        .and_then(Json::as_u64)
        .unwrap_or(1);
    RawIssue {
        code: text_field(obj, "code"),
        kind: obj
            .get("type")
            .and_then(Json::as_str)
            .map(IssueType::from)
            .unwrap_or_default(),
        message: text_field(obj, "message"),
        selector: text_field(obj, "selector"),
        context,
        affected_elements,
    }
}

fn page_object(obj: &serde_json::Map<String, Json>) -> Option<PageScan> {
    let Some(Json::Array(items)) = obj.get("issues") else {
        return None;
    };
    Some(PageScan {
        url: obj.get("url").and_then(Json::as_str).map(str::to_string),
        issues: items.iter().map(issue_from_value).collect(),
    })
}

/// Split a parsed JSON document into pages, preserving encounter order.
///
/// `label` names pages that carry no `url` of their own.
pub fn pages_from_value(v: &Json, label: Option<&str>) -> Result<Vec<PageScan>> {
    match v {
        Json::Array(items) => pages_from_items(items, label),
        Json::Object(obj) => {
            if let Some(mut page) = page_object(obj) {
                if page.url.is_none() {
                    page.url = label.map(str::to_string);
                }
                return Ok(vec![page]);
            }
            if let Some(Json::Array(pages)) = obj.get("pages") {
                return pages_from_items(pages, label);
            }
            Err(Error::NotIterable { found: "object" })
        }
        other => Err(Error::NotIterable {
            found: kind_of(other),
        }),
    }
}

fn pages_from_items(items: &[Json], label: Option<&str>) -> Result<Vec<PageScan>> {
    let mut pages: Vec<PageScan> = Vec::new();
    // consecutive loose issues form one page
    let mut loose: Option<PageScan> = None;
    for item in items {
        let page = match item {
            Json::Array(inner) => Some(PageScan {
                url: None,
                issues: inner.iter().map(issue_from_value).collect(),
            }),
            Json::Object(obj) => page_object(obj),
            _ => None,
        };
        match page {
            Some(p) => {
                pages.extend(loose.take());
                pages.push(p);
            }
            None => loose
                .get_or_insert_with(PageScan::default)
                .issues
                .push(issue_from_value(item)),
        }
    }
    pages.extend(loose.take());

    if let Some(label) = label {
        let single = pages.len() == 1;
        for (i, p) in pages.iter_mut().enumerate() {
            if p.url.is_none() {
                p.url = Some(if single {
                    label.to_string()
                } else {
                    format!("{}#{}", label, i + 1)
                });
            }
        }
    }
    Ok(pages)
}

/// Parse scanner JSON text into pages.
pub fn parse_scan_json(text: &str, label: Option<&str>) -> Result<Vec<PageScan>> {
    let v: Json = serde_json::from_str(text).map_err(|source| Error::Json {
        label: label.unwrap_or("input").to_string(),
        source,
    })?;
    pages_from_value(&v, label)
}

/// Expand glob `patterns` and read every matched file into pages.
///
/// Files are visited in sorted order; labels are relative to `base`.
pub fn load_scan_files(patterns: &[String], base: &Path) -> Result<Vec<PageScan>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for pat in patterns {
        let entries = glob(pat).map_err(|source| Error::Glob {
            pattern: pat.clone(),
            source,
        })?;
        let mut matched: Vec<PathBuf> = entries.filter_map(|e| e.ok()).collect();
        matched.sort();
        if matched.is_empty() {
            tracing::warn!(pattern = %pat, "pattern matched no files");
        }
        for p in matched {
            if !files.contains(&p) {
                files.push(p);
            }
        }
    }
    if files.is_empty() {
        return Err(Error::NoInputs(patterns.join(", ")));
    }

    let mut pages = Vec::new();
    for path in files {
        let text = fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let label = pathdiff::diff_paths(&path, base)
            .unwrap_or_else(|| path.clone())
            .to_string_lossy()
            .to_string();
        let mut found = parse_scan_json(&text, Some(&label))?;
        tracing::debug!(file = %label, pages = found.len(), "loaded scan file");
        pages.append(&mut found);
    }
    Ok(pages)
}
