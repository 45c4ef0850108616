//! Compiled rule sets.
//!
//! A [`RuleSet`] is one immutable batch of compiled rules together with its
//! group index. [`RuleStore`] holds the current batch and replaces it
//! wholesale on reload, so readers always see a complete batch.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use super::compiler::{Compiled, DroppedRule, RuleCompiler, RuleDefaults};
use super::rule::Rule;

/// An immutable batch of compiled rules.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    groups: BTreeMap<String, Vec<usize>>,
}

impl RuleSet {
    /// Build a rule set, indexing rules by group name in configuration order.
    pub fn new(rules: Vec<Rule>) -> Self {
        let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (index, rule) in rules.iter().enumerate() {
            groups.entry(rule.name.clone()).or_default().push(index);
        }
        Self { rules, groups }
    }

    /// All rules in configuration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rules that apply to `language`, in configuration order.
    pub fn for_language<'s>(&'s self, language: &'s str) -> impl Iterator<Item = &'s Rule> + 's {
        self.rules.iter().filter(move |r| r.applies_to(language))
    }

    /// Rules of group `name` that apply to `language`, in configuration order.
    pub fn group<'s>(&'s self, name: &str, language: &'s str) -> Vec<&'s Rule> {
        self.groups
            .get(name)
            .map(|indices| {
                indices
                    .iter()
                    .map(|&i| &self.rules[i])
                    .filter(|r| r.applies_to(language))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Group names, sorted.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Get the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Holds the active rule set and swaps it atomically on reload.
#[derive(Debug, Default)]
pub struct RuleStore {
    current: RwLock<Batch>,
}

/// A rule set together with the entries dropped while compiling it.
#[derive(Debug, Default, Clone)]
struct Batch {
    rules: Arc<RuleSet>,
    dropped: Arc<Vec<DroppedRule>>,
}

impl RuleStore {
    /// Create a store holding an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    fn batch(&self) -> Batch {
        self.current.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Snapshot of the active rule set.
    ///
    /// The snapshot stays valid and unchanged across later reloads.
    pub fn snapshot(&self) -> Arc<RuleSet> {
        self.batch().rules
    }

    /// Entries dropped by the most recent reload.
    pub fn dropped(&self) -> Arc<Vec<DroppedRule>> {
        self.batch().dropped
    }

    /// The active rule set and its dropped entries, read together.
    pub fn snapshot_with_dropped(&self) -> (Arc<RuleSet>, Arc<Vec<DroppedRule>>) {
        let batch = self.batch();
        (batch.rules, batch.dropped)
    }

    /// Replace the active batch, returning the previous rule set.
    pub fn replace(&self, compiled: Compiled) -> Arc<RuleSet> {
        let next = Batch {
            rules: Arc::new(compiled.rules),
            dropped: Arc::new(compiled.dropped),
        };
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *guard, next).rules
    }

    /// Compile `entries` with `defaults` and make them the active batch.
    pub fn reload(&self, entries: &[serde_yaml::Value], defaults: RuleDefaults) -> Arc<RuleSet> {
        let compiled = RuleCompiler::new(defaults).compile_values(entries);
        tracing::debug!(
            "Reloaded {} rule(s), dropped {}",
            compiled.rules.len(),
            compiled.dropped.len()
        );
        self.replace(compiled);
        self.snapshot()
    }
}
