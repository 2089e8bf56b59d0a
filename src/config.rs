//! Configuration discovery and effective settings resolution.
//!
//! a11ymap reads `a11ymap.toml|yaml|yml` from the working directory (or the
//! closest ancestor, stopping at a `.git` directory) and merges it with CLI
//! flags to produce an `Effective` config.
//! Defaults:
//! - `output`: `human`
//! - `top`: 3 example issues per criterion
//! - `check`: false
//! - `impact.include_unmatched`: true
//! - `impact.notice_as_minor`: false
//! - `parser.rules`: none (built-in rules only)
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::aggregate::ImpactPolicy;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_NAMES: [&str; 3] = ["a11ymap.toml", "a11ymap.yaml", "a11ymap.yml"];
pub const DEFAULT_TOP: usize = 3;

#[derive(Debug, Default, Deserialize, Clone)]
/// Global tally policy under `[impact]`.
pub struct ImpactCfg {
    pub include_unmatched: Option<bool>,
    pub notice_as_minor: Option<bool>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
/// Extra code pattern under `[[parser.rules]]`.
pub struct ParserRuleCfg {
    pub name: String,
    pub pattern: String,
    /// Capture groups holding the three criterion segments, in order.
    pub groups: [usize; 3],
    #[serde(default)]
    pub precedence: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct ParserCfg {
    #[serde(default)]
    pub rules: Vec<ParserRuleCfg>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `a11ymap.toml|yaml`.
pub struct A11yConfig {
    pub output: Option<String>,
    pub top: Option<usize>,
    pub check: Option<bool>,
    #[serde(default)]
    pub impact: Option<ImpactCfg>,
    #[serde(default)]
    pub parser: Option<ParserCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    /// Config file actually loaded, if any.
    pub source: Option<PathBuf>,
    pub output: String,
    pub top: usize,
    pub check: bool,
    pub impact: ImpactPolicy,
    pub parser_rules: Vec<ParserRuleCfg>,
}

/// Walk upward from `start` to find the directory holding the config.
///
/// Stops when an `a11ymap.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Parse a config file, choosing the format by extension.
pub fn load_config_file(path: &Path) -> Result<A11yConfig> {
    let s = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let parsed = if is_yaml {
        serde_yaml::from_str::<A11yConfig>(&s).map_err(|e| e.to_string())
    } else {
        toml::from_str::<A11yConfig>(&s).map_err(|e| e.to_string())
    };
    parsed.map_err(|reason| Error::Config {
        path: path.to_path_buf(),
        reason,
    })
}

/// Load the first `a11ymap.*` present in `root`, if any.
pub fn load_config(root: &Path) -> Result<Option<(PathBuf, A11yConfig)>> {
    for name in CONFIG_NAMES {
        let p = root.join(name);
        if p.exists() {
            let cfg = load_config_file(&p)?;
            return Ok(Some((p, cfg)));
        }
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// An explicit `cli_config` path skips discovery.
pub fn resolve_effective(
    cli_root: Option<&str>,
    cli_config: Option<&str>,
    cli_output: Option<&str>,
    cli_top: Option<usize>,
    cli_check: Option<bool>,
) -> Result<Effective> {
    let start = PathBuf::from(cli_root.unwrap_or("."));
    let root = detect_root(&start);
    let (source, cfg) = match cli_config {
        Some(p) => {
            let p = PathBuf::from(p);
            let cfg = load_config_file(&p)?;
            (Some(p), cfg)
        }
        None => match load_config(&root)? {
            Some((p, cfg)) => (Some(p), cfg),
            None => (None, A11yConfig::default()),
        },
    };
    if let Some(p) = source.as_ref() {
        tracing::debug!(config = %p.display(), "loaded config");
    }

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    let top = cli_top.or(cfg.top).unwrap_or(DEFAULT_TOP);
    let check = cli_check.or(cfg.check).unwrap_or(false);

    let defaults = ImpactPolicy::default();
    let impact = ImpactPolicy {
        include_unmatched: cfg
            .impact
            .as_ref()
            .and_then(|i| i.include_unmatched)
            .unwrap_or(defaults.include_unmatched),
        notice_as_minor: cfg
            .impact
            .as_ref()
            .and_then(|i| i.notice_as_minor)
            .unwrap_or(defaults.notice_as_minor),
    };
    let parser_rules = cfg.parser.map(|p| p.rules).unwrap_or_default();

    Ok(Effective {
        root,
        source,
        output,
        top,
        check,
        impact,
        parser_rules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("a11ymap.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output = "json"
top = 5
[impact]
notice_as_minor = true
[[parser.rules]]
name = "sc"
pattern = "SC([0-9]+)-([0-9]+)-([0-9]+)"
groups = [1, 2, 3]
precedence = 10
    "#
        )
        .unwrap();

        // Resolve using explicit root to avoid global CWD races
        let eff = resolve_effective(root.to_str(), None, None, None, None).unwrap();
        assert_eq!(eff.output, "json");
        assert_eq!(eff.top, 5);
        assert!(!eff.check);
        assert!(eff.impact.notice_as_minor);
        assert!(eff.impact.include_unmatched);
        assert_eq!(eff.parser_rules.len(), 1);
        assert_eq!(eff.parser_rules[0].groups, [1, 2, 3]);
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("a11ymap.yaml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
impact:
  include_unmatched: false
            "#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None, None, None, None).unwrap();
        assert_eq!(eff.output, "human");
        assert_eq!(eff.top, DEFAULT_TOP);
        assert!(!eff.impact.include_unmatched);
        assert!(!eff.impact.notice_as_minor);
        assert!(eff.parser_rules.is_empty());
    }

    #[test]
    fn test_cli_precedence_over_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("a11ymap.toml"),
            "output = \"json\"\ncheck = true\ntop = 9\n",
        )
        .unwrap();
        let eff =
            resolve_effective(root.to_str(), None, Some("markdown"), Some(1), Some(false)).unwrap();
        assert_eq!(eff.output, "markdown");
        assert_eq!(eff.top, 1);
        assert!(!eff.check);
    }

    #[test]
    fn test_detect_root_walks_up_to_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("a11ymap.toml"), "").unwrap();
        let nested = root.join("a/b");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(detect_root(&nested), root.to_path_buf());
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("a11ymap.toml"), "top = \"many\"\n").unwrap();
        let err = resolve_effective(root.to_str(), None, None, None, None).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_explicit_config_path() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("custom.yml");
        fs::write(&p, "output: markdown\n").unwrap();
        let eff = resolve_effective(dir.path().to_str(), p.to_str(), None, None, None).unwrap();
        assert_eq!(eff.output, "markdown");
        assert_eq!(eff.source.as_deref(), Some(p.as_path()));
    }
}
