#![forbid(unsafe_code)]

//! Ordered rule chains
//!
//! A chain drops absent rules, removes structural duplicates (keeping the
//! first occurrence), and sorts stably by priority. Application folds the
//! text through each rule in that order.

use crate::rules::rule::Rule;
use std::collections::HashSet;

/// An ordered, deduplicated sequence of rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleChain {
    rules: Vec<Rule>,
}

impl RuleChain {
    /// Builds a chain from rules in any order
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Self {
        let mut seen = HashSet::new();
        let mut rules: Vec<Rule> = rules
            .into_iter()
            .filter(|rule| seen.insert(rule.clone()))
            .collect();
        // Stable: equal priorities keep input order
        rules.sort_by_key(Rule::priority);
        Self { rules }
    }

    /// Builds a chain, skipping `None` entries
    pub fn from_optional(rules: impl IntoIterator<Item = Option<Rule>>) -> Self {
        Self::new(rules.into_iter().flatten())
    }

    /// Returns a new chain containing the rules of both chains
    pub fn merge(&self, other: &RuleChain) -> Self {
        Self::new(self.rules.iter().chain(other.rules.iter()).cloned())
    }

    /// Returns a new chain with extra rules added
    pub fn with_rules(&self, extra: impl IntoIterator<Item = Rule>) -> Self {
        Self::new(self.rules.iter().cloned().chain(extra))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Folds `text` through every rule in order
    pub fn apply(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        self.rules
            .iter()
            .fold(text.to_string(), |current, rule| {
                tracing::trace!(rule = %rule, priority = %rule.priority(), "applying rule");
                rule.apply(&current)
            })
    }

    /// Returns true if any rule's pattern matches `text` as given
    ///
    /// Each rule is tested against the original text, not against the
    /// output of earlier rules.
    pub fn any_matches(&self, text: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(text))
    }

    /// Returns the first rule whose pattern matches `text`, in chain order
    pub fn first_match(&self, text: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(text))
    }

    /// Returns every match of every rule against the unmodified `text`
    ///
    /// Matches are grouped by rule in chain order, left to right within a rule.
    pub fn find_any<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.rules.iter().flat_map(|rule| rule.find(text)).collect()
    }
}

impl FromIterator<Rule> for RuleChain {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a RuleChain {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pattern: &str, replacement: &str, priority: i64) -> Rule {
        Rule::single_pass(pattern, replacement, priority).unwrap()
    }

    #[test]
    fn test_sorted_by_priority() {
        let chain = RuleChain::new(vec![rule("c", "3", 30), rule("a", "1", 10), rule("b", "2", 20)]);
        let patterns: Vec<_> = chain.iter().map(|r| r.pattern().as_str()).collect();
        assert_eq!(patterns, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_equal_priorities_keep_input_order() {
        let chain = RuleChain::new(vec![rule("x", "1", 5), rule("y", "2", 5), rule("w", "3", 0)]);
        let patterns: Vec<_> = chain.iter().map(|r| r.pattern().as_str()).collect();
        assert_eq!(patterns, vec!["w", "x", "y"]);
    }

    #[test]
    fn test_duplicates_keep_first() {
        let chain = RuleChain::new(vec![rule("a", "b", 50), rule("a", "b", 1)]);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.rules()[0].priority().value(), 50);
    }

    #[test]
    fn test_from_optional_skips_none() {
        let chain = RuleChain::from_optional(vec![None, Some(rule("a", "b", 0)), None]);
        assert_eq!(chain.len(), 1);
        assert!(RuleChain::from_optional(vec![None, None]).is_empty());
    }

    #[test]
    fn test_apply_folds_in_order() {
        let chain = RuleChain::new(vec![rule("b", "c", 2), rule("a", "b", 1)]);
        assert_eq!(chain.apply("a"), "c");

        let reversed = RuleChain::new(vec![rule("b", "c", 1), rule("a", "b", 2)]);
        assert_eq!(reversed.apply("a"), "b");
    }

    #[test]
    fn test_apply_empty() {
        assert_eq!(RuleChain::default().apply("abc"), "abc");
        assert_eq!(RuleChain::new(vec![rule("^$", "x", 0)]).apply(""), "");
    }

    #[test]
    fn test_any_matches_uses_original_text() {
        let chain = RuleChain::new(vec![rule("a", "b", 1), rule("b", "c", 2)]);
        assert!(chain.any_matches("a"));
        assert!(!chain.any_matches("z"));
        assert!(!chain.any_matches(""));
    }

    #[test]
    fn test_first_match_in_chain_order() {
        let chain = RuleChain::new(vec![rule("b", "2", 2), rule("a", "1", 1)]);
        let found = chain.first_match("ab").unwrap();
        assert_eq!(found.pattern().as_str(), "a");
        assert!(chain.first_match("zz").is_none());
    }

    #[test]
    fn test_find_any_collects_all_matches() {
        let chain = RuleChain::new(vec![rule("b+", "2", 2), rule("a", "1", 1)]);
        assert_eq!(chain.find_any("babba"), vec!["a", "a", "b", "bb"]);
        assert!(chain.find_any("").is_empty());
        assert!(chain.find_any("zz").is_empty());
    }

    #[test]
    fn test_merge() {
        let left = RuleChain::new(vec![rule("a", "1", 10)]);
        let right = RuleChain::new(vec![rule("b", "2", 5), rule("a", "1", 0)]);
        let merged = left.merge(&right);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.rules()[0].pattern().as_str(), "b");
    }

    #[test]
    fn test_collect() {
        let chain: RuleChain = vec![rule("a", "1", 1), rule("a", "1", 1)].into_iter().collect();
        assert_eq!(chain.len(), 1);
    }
}
