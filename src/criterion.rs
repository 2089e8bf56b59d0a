//! Rule-code to success-criterion resolution.
//!
//! Scanner rule codes embed a WCAG reference in one of a few textual shapes.
//! `CriterionCodeParser` holds an ordered list of `PatternRule`s and returns
//! the criterion from the first rule that matches, or `None`.
//!
//! Built-in rules:
//! - `structured` (precedence 0): `Principle1.Guideline1_4.1_4_3` style paths.
//!   Only the trailing success-criterion triple is kept; the principle and
//!   guideline numerals are discarded even when they disagree with it.
//! - `fallback` (precedence 100): the first bare `N.N.N` substring.

use crate::config::ParserRuleCfg;
use crate::error::{Error, Result};
use crate::models::CriterionId;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref STRUCTURED: Regex = Regex::new(
        r"Principle([0-9]+)[._]Guideline([0-9]+)_([0-9]+)[._]([0-9]+)_([0-9]+)_([0-9]+)"
    )
    .unwrap();
    static ref BARE_TRIPLE: Regex = Regex::new(r"[0-9]+\.[0-9]+\.[0-9]+").unwrap();
}

pub const STRUCTURED_PRECEDENCE: u32 = 0;
pub const FALLBACK_PRECEDENCE: u32 = 100;
/// Precedence given to configured rules that do not set one.
pub const DEFAULT_CUSTOM_PRECEDENCE: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How a matching rule turns its match into a criterion id.
pub enum Extract {
    /// Join the three numbered capture groups with dots.
    Captures([usize; 3]),
    /// Use the matched text as-is; the pattern itself guarantees `N.N.N`.
    WholeMatch,
}

#[derive(Debug, Clone)]
/// Immutable pattern rule record.
pub struct PatternRule {
    pub name: String,
    pub pattern: Regex,
    pub extract: Extract,
    pub precedence: u32,
}

impl PatternRule {
    fn apply(&self, code: &str) -> Option<CriterionId> {
        match self.extract {
            Extract::WholeMatch => {
                let m = self.pattern.find(code)?;
                let mut parts = m.as_str().splitn(3, '.');
                Some(CriterionId::from_segments(
                    parts.next()?,
                    parts.next()?,
                    parts.next()?,
                ))
            }
            Extract::Captures(groups) => {
                let caps = self.pattern.captures(code)?;
                let seg = |i: usize| caps.get(i).map(|m| m.as_str()).filter(|s| is_digits(s));
                Some(CriterionId::from_segments(
                    seg(groups[0])?,
                    seg(groups[1])?,
                    seg(groups[2])?,
                ))
            }
        }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Which rule resolved a code, as reported by `explain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    pub criterion: CriterionId,
    pub rule: &'a str,
}

#[derive(Debug, Clone)]
/// Stateless parser over an ordered rule list. Build one per run.
pub struct CriterionCodeParser {
    rules: Vec<PatternRule>,
}

impl Default for CriterionCodeParser {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_rules() -> Vec<PatternRule> {
    vec![
        PatternRule {
            name: "structured".into(),
            pattern: STRUCTURED.clone(),
            extract: Extract::Captures([4, 5, 6]),
            precedence: STRUCTURED_PRECEDENCE,
        },
        PatternRule {
            name: "fallback".into(),
            pattern: BARE_TRIPLE.clone(),
            extract: Extract::WholeMatch,
            precedence: FALLBACK_PRECEDENCE,
        },
    ]
}

impl CriterionCodeParser {
    /// Parser with only the built-in rules.
    pub fn new() -> Self {
        CriterionCodeParser {
            rules: builtin_rules(),
        }
    }

    /// Parser with built-in rules plus configured ones, ordered by
    /// precedence. Built-in rules win ties.
    pub fn with_rules(extra: &[ParserRuleCfg]) -> Result<Self> {
        let mut rules = builtin_rules();
        for cfg in extra {
            let pattern = Regex::new(&cfg.pattern).map_err(|source| Error::Pattern {
                rule: cfg.name.clone(),
                source,
            })?;
            let max = pattern.captures_len() - 1;
            if let Some(bad) = cfg.groups.iter().find(|&&g| g == 0 || g > max) {
                return Err(Error::RuleGroups {
                    rule: cfg.name.clone(),
                    reason: format!(
                        "capture group {} out of range (pattern has {} groups)",
                        bad, max
                    ),
                });
            }
            tracing::debug!(rule = %cfg.name, pattern = %cfg.pattern, "registered parser rule");
            rules.push(PatternRule {
                name: cfg.name.clone(),
                pattern,
                extract: Extract::Captures(cfg.groups),
                precedence: cfg.precedence.unwrap_or(DEFAULT_CUSTOM_PRECEDENCE),
            });
        }
        rules.sort_by_key(|r| r.precedence);
        Ok(CriterionCodeParser { rules })
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Resolve `code` to a criterion id; `None` when no rule matches.
    pub fn parse(&self, code: &str) -> Option<CriterionId> {
        self.explain(code).map(|m| m.criterion)
    }

    /// Like `parse`, also naming the rule that matched.
    pub fn explain(&self, code: &str) -> Option<RuleMatch<'_>> {
        self.rules.iter().find_map(|rule| {
            rule.apply(code).map(|criterion| RuleMatch {
                criterion,
                rule: rule.name.as_str(),
            })
        })
    }
}
