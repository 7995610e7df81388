#![forbid(unsafe_code)]

//! The Rule value type and its substitution variants
//!
//! A rule is an immutable pattern → replacement transformation with a
//! priority. Rules come in a closed set of variants:
//!
//! - [`RuleKind::SinglePass`]: one global substitution.
//! - [`RuleKind::Recursive`]: global substitution repeated to a fixpoint.
//! - [`RuleKind::WidthFold`]: the composite CJK width-fold pipeline.
//!
//! Equality and hashing are structural over the pattern source and the
//! replacement only. Priority is ignored, so two rules that differ only in
//! priority deduplicate against each other inside a chain.

use crate::error::RuleError;
use crate::rules::width_fold::WidthFold;
use crate::types::{Priority, RuleMode};
use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Hard cap on substitution rounds for recursive rules
pub const MAX_RECURSIVE_ROUNDS: usize = 10_000;

/// A compiled pattern paired with its replacement template
///
/// The replacement may reference capture groups (`$1`, `${name}`).
#[derive(Clone)]
pub struct Substitution {
    pattern: Regex,
    replacement: String,
}

impl Substitution {
    /// Compiles `pattern`
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidRegex` if the pattern does not compile.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, RuleError> {
        let compiled = Regex::new(pattern).map_err(|e| {
            RuleError::InvalidRegex(format!("Failed to compile pattern '{}': {}", pattern, e))
        })?;
        Ok(Self {
            pattern: compiled,
            replacement: replacement.to_string(),
        })
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Replaces all non-overlapping matches once
    pub fn replace_all(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }

    /// Replaces until the pattern no longer matches or a round changes nothing
    ///
    /// Returns the final text and the number of rounds taken, or the text
    /// reached when `max_rounds` ran out.
    fn replace_to_fixpoint(
        &self,
        text: &str,
        max_rounds: usize,
    ) -> Result<(String, usize), (String, usize)> {
        let mut current = text.to_string();
        let mut rounds = 0;

        while self.pattern.is_match(&current) {
            if rounds == max_rounds {
                return Err((current, rounds));
            }
            let next = self.replace_all(&current);
            rounds += 1;
            if next == current {
                break;
            }
            current = next;
        }

        Ok((current, rounds))
    }
}

/// The closed set of rule behaviors
#[derive(Clone)]
pub enum RuleKind {
    /// Apply the substitution once over the whole text
    SinglePass(Substitution),
    /// Apply the substitution until the text is stable
    Recursive(Substitution),
    /// Canonicalize voiced marks, NFKC-fold CJK runs, restore voiced marks
    WidthFold(Box<WidthFold>),
}

/// An immutable, prioritized text transformation
#[derive(Clone)]
pub struct Rule {
    kind: RuleKind,
    priority: Priority,
}

impl Rule {
    /// Creates a pattern rule with the given mode
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidRegex` if the pattern does not compile.
    pub fn new(
        pattern: &str,
        replacement: &str,
        priority: i64,
        mode: RuleMode,
    ) -> Result<Self, RuleError> {
        let substitution = Substitution::new(pattern, replacement)?;
        let kind = match mode {
            RuleMode::Single => RuleKind::SinglePass(substitution),
            RuleMode::Recursive => RuleKind::Recursive(substitution),
        };
        Ok(Self {
            kind,
            priority: Priority::new(priority),
        })
    }

    /// Creates a rule that substitutes once
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidRegex` if the pattern does not compile.
    pub fn single_pass(pattern: &str, replacement: &str, priority: i64) -> Result<Self, RuleError> {
        Self::new(pattern, replacement, priority, RuleMode::Single)
    }

    /// Creates a rule that substitutes until the text stops changing
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidRegex` if the pattern does not compile.
    pub fn recursive(pattern: &str, replacement: &str, priority: i64) -> Result<Self, RuleError> {
        Self::new(pattern, replacement, priority, RuleMode::Recursive)
    }

    /// Wraps a width-fold pipeline as a rule
    pub fn width_fold(fold: WidthFold, priority: i64) -> Self {
        Self {
            kind: RuleKind::WidthFold(Box::new(fold)),
            priority: Priority::new(priority),
        }
    }

    /// Returns a copy of this rule running at a different priority
    pub fn with_priority(&self, priority: i64) -> Self {
        Self {
            kind: self.kind.clone(),
            priority: Priority::new(priority),
        }
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// The pattern used for matching (the scoping pattern for a width fold)
    pub fn pattern(&self) -> &Regex {
        match &self.kind {
            RuleKind::SinglePass(sub) | RuleKind::Recursive(sub) => sub.pattern(),
            RuleKind::WidthFold(fold) => fold.scope(),
        }
    }

    /// The replacement template (`$0` for a width fold: each run maps to its fold)
    pub fn replacement(&self) -> &str {
        match &self.kind {
            RuleKind::SinglePass(sub) | RuleKind::Recursive(sub) => sub.replacement(),
            RuleKind::WidthFold(_) => "$0",
        }
    }

    /// The substitution mode, or `None` for a width fold
    pub fn mode(&self) -> Option<RuleMode> {
        match &self.kind {
            RuleKind::SinglePass(_) => Some(RuleMode::Single),
            RuleKind::Recursive(_) => Some(RuleMode::Recursive),
            RuleKind::WidthFold(_) => None,
        }
    }

    /// Short label for reports
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            RuleKind::SinglePass(_) => RuleMode::Single.as_str(),
            RuleKind::Recursive(_) => RuleMode::Recursive.as_str(),
            RuleKind::WidthFold(_) => "width-fold",
        }
    }

    fn is_width_fold(&self) -> bool {
        matches!(self.kind, RuleKind::WidthFold(_))
    }

    /// Applies the rule to `text`
    ///
    /// Empty input is returned unchanged. A recursive rule that is still
    /// changing after [`MAX_RECURSIVE_ROUNDS`] rounds stops there with a
    /// warning; use [`Rule::apply_checked`] to surface that as an error.
    pub fn apply(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        match &self.kind {
            RuleKind::SinglePass(sub) => sub.replace_all(text),
            RuleKind::Recursive(sub) => match sub.replace_to_fixpoint(text, MAX_RECURSIVE_ROUNDS) {
                Ok((result, rounds)) => {
                    tracing::debug!(pattern = sub.pattern().as_str(), rounds, "recursive rule settled");
                    result
                }
                Err((result, rounds)) => {
                    tracing::warn!(
                        pattern = sub.pattern().as_str(),
                        rounds,
                        "recursive rule did not converge; keeping last result"
                    );
                    result
                }
            },
            RuleKind::WidthFold(fold) => fold.apply(text),
        }
    }

    /// Applies the rule, failing if a recursive rule exceeds `max_rounds`
    ///
    /// Non-recursive rules always succeed.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::NonConvergent` when the round limit is reached.
    pub fn apply_checked(&self, text: &str, max_rounds: usize) -> Result<String, RuleError> {
        match &self.kind {
            RuleKind::Recursive(sub) if !text.is_empty() => sub
                .replace_to_fixpoint(text, max_rounds)
                .map(|(result, _)| result)
                .map_err(|(_, rounds)| RuleError::NonConvergent {
                    pattern: sub.pattern().as_str().to_string(),
                    rounds,
                }),
            _ => Ok(self.apply(text)),
        }
    }

    /// Returns true if the pattern matches anywhere in `text`
    pub fn matches(&self, text: &str) -> bool {
        !text.is_empty() && self.pattern().is_match(text)
    }

    /// Returns every match of the pattern, left to right
    pub fn find<'t>(&self, text: &'t str) -> Vec<&'t str> {
        if text.is_empty() {
            return Vec::new();
        }
        self.pattern().find_iter(text).map(|m| m.as_str()).collect()
    }
}

// A width fold never equals a substitution, even one with the same pattern and `$0`.
impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.is_width_fold() == other.is_width_fold()
            && self.pattern().as_str() == other.pattern().as_str()
            && self.replacement() == other.replacement()
    }
}

impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_width_fold().hash(state);
        self.pattern().as_str().hash(state);
        self.replacement().hash(state);
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{pattern: {}, replacement: {}}}",
            self.pattern().as_str(),
            self.replacement()
        )
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind_name())
            .field("pattern", &self.pattern().as_str())
            .field("replacement", &self.replacement())
            .field("priority", &self.priority)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn one() -> Rule {
        Rule::single_pass("one", "壱", 1).unwrap()
    }

    #[test]
    fn test_negative_priority_clamps() {
        let rule = Rule::single_pass("minus", "▲壱", -1).unwrap();
        assert_eq!(rule.priority().value(), 0);
    }

    #[test]
    fn test_invalid_pattern() {
        let result = Rule::single_pass("[unclosed", "", 0);
        assert!(matches!(result, Err(RuleError::InvalidRegex(_))));
    }

    #[test]
    fn test_equality_ignores_priority() {
        assert_eq!(one(), Rule::single_pass("one", "壱", 99).unwrap());
        assert_ne!(one(), Rule::single_pass("one", "1", 1).unwrap());
        assert_ne!(one(), Rule::single_pass("two", "壱", 1).unwrap());

        let mut set = HashSet::new();
        set.insert(one());
        assert!(set.contains(&Rule::single_pass("one", "壱", 5).unwrap()));
    }

    #[test]
    fn test_equality_ignores_mode() {
        assert_eq!(one(), Rule::recursive("one", "壱", 1).unwrap());
    }

    #[test]
    fn test_width_fold_never_equals_a_substitution() {
        let fold = Rule::width_fold(WidthFold::new().unwrap(), 0);
        let lookalike = Rule::single_pass(crate::rules::FOLD_SCOPE_PATTERN, "$0", 0).unwrap();
        assert_eq!(fold.pattern().as_str(), lookalike.pattern().as_str());
        assert_eq!(fold.replacement(), lookalike.replacement());
        assert_ne!(fold, lookalike);

        let mut set = HashSet::new();
        set.insert(fold.clone());
        assert!(!set.contains(&lookalike));
        assert!(set.contains(&fold.with_priority(7)));
    }

    #[test]
    fn test_display() {
        assert_eq!(one().to_string(), "{pattern: one, replacement: 壱}");
    }

    #[test]
    fn test_matches() {
        let rule = one();
        assert!(!rule.matches(""));
        assert!(!rule.matches("1"));
        assert!(!rule.matches("o ne"));
        assert!(!rule.matches("One"));
        assert!(rule.matches("one two three"));
        assert!(rule.matches("three\ntwo\none\nzero"));
        assert!(rule.matches("neoneoneoneoneo"));
    }

    #[test]
    fn test_find() {
        let rule = one();
        assert!(rule.find("").is_empty());
        assert!(rule.find("One").is_empty());
        assert_eq!(rule.find("oneoneoneoneone"), vec!["one"; 5]);
        assert_eq!(rule.find("neoneoneoneoneo"), vec!["one"; 4]);

        let spaced = Rule::single_pass(r"o\s*n\s*e", "壱", 1).unwrap();
        assert_eq!(
            spaced.find("\t\t\to\nn\t\t\t\n\t\t\te\t\t\t"),
            vec!["o\nn\t\t\t\n\t\t\te"]
        );

        let class = Rule::single_pass("[one]", "壱", 1).unwrap();
        assert_eq!(class.find("\t\to\nn\t\te\t"), vec!["o", "n", "e"]);
    }

    #[test]
    fn test_single_pass_apply() {
        let rule = one();
        assert_eq!(rule.apply(""), "");
        assert_eq!(rule.apply("One"), "One");
        assert_eq!(rule.apply("one two three"), "壱 two three");
        assert_eq!(rule.apply("oneoneoneoneone"), "壱壱壱壱壱");
        assert_eq!(rule.apply("neoneoneoneoneo"), "ne壱壱壱壱o");

        let case = Rule::single_pass("[Oo]ne", "壱", 1).unwrap();
        assert_eq!(case.apply("One"), "壱");
    }

    #[test]
    fn test_single_pass_does_not_rescan_output() {
        let rule = Rule::single_pass("aa", "a", 0).unwrap();
        assert_eq!(rule.apply("aaaa"), "aa");
    }

    #[test]
    fn test_recursive_apply_reaches_fixpoint() {
        let rule = Rule::recursive("aa", "a", 0).unwrap();
        assert_eq!(rule.apply("aaaa"), "a");
        assert_eq!(rule.apply("aaaaaaa"), "a");
        assert_eq!(rule.apply("b"), "b");
    }

    #[test]
    fn test_recursive_stops_when_round_changes_nothing() {
        // Matches the empty string everywhere, but replacing changes nothing.
        let rule = Rule::recursive("x*", "", 0).unwrap();
        assert_eq!(rule.apply("abc"), "abc");
    }

    #[test]
    fn test_capture_group_replacement() {
        let rule = Rule::single_pass(r"(\d+)-(\d+)", "$2-$1", 0).unwrap();
        assert_eq!(rule.apply("12-34"), "34-12");
    }

    #[test]
    fn test_apply_checked_detects_oscillation() {
        let rule = Rule::recursive("(a)(b)|(b)(a)", "$2$1$4$3", 0).unwrap();
        let result = rule.apply_checked("ab", 8);
        assert!(matches!(
            result,
            Err(RuleError::NonConvergent { rounds: 8, .. })
        ));
    }

    #[test]
    fn test_apply_checked_converging_rule() {
        let rule = Rule::recursive("  ", " ", 0).unwrap();
        assert_eq!(rule.apply_checked("a      b", 16).unwrap(), "a b");
    }

    #[test]
    fn test_with_priority_keeps_identity() {
        let moved = one().with_priority(42);
        assert_eq!(moved.priority().value(), 42);
        assert_eq!(moved, one());
    }

    #[test]
    fn test_kind_name() {
        assert_eq!(one().kind_name(), "single");
        assert_eq!(Rule::recursive("a", "b", 0).unwrap().kind_name(), "recursive");
        assert_eq!(one().mode(), Some(RuleMode::Single));
    }
}
