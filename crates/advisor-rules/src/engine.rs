//! Rule engine - runs registered rules against one normalized bundle.

use advisor_core::{Issue, NormalizedBundle, Result};
use serde::Serialize;

/// One heuristic check over the normalized bundle.
///
/// Rules are pure and independent: they must not observe other rules'
/// output, and they see the bundle read-only. That purity is what would
/// make parallel execution safe if a caller ever wanted it.
pub trait Rule: Send + Sync {
    /// Stable identifier, used as the `ruleId` on emitted issues.
    fn id(&self) -> &'static str;

    /// Evaluates the rule and returns its issues.
    fn check(&self, bundle: &NormalizedBundle) -> Result<Vec<Issue>>;
}

/// A rule that failed during one engine run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleFailure {
    pub rule_id: String,
    pub message: String,
}

/// Result of one engine run: issues in registration order, plus any
/// per-rule failures recorded along the way.
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub issues: Vec<Issue>,
    pub failures: Vec<RuleFailure>,
}

/// Ordered registry of rules.
#[derive(Default)]
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    /// Creates an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule. Registering the same rule twice runs it twice;
    /// there is no deduplication.
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Runs every registered rule against the bundle.
    ///
    /// A failing rule is recorded as a [`RuleFailure`] and the remaining
    /// rules still run, so the outcome degrades instead of aborting.
    pub fn run(&self, bundle: &NormalizedBundle) -> RunOutcome {
        self.rules
            .iter()
            .fold(RunOutcome::default(), |mut outcome, rule| {
                match rule.check(bundle) {
                    Ok(issues) => outcome.issues.extend(issues),
                    Err(e) => outcome.failures.push(RuleFailure {
                        rule_id: rule.id().to_string(),
                        message: e.to_string(),
                    }),
                }
                outcome
            })
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::{issue_id, Error, FixType, IssueSeverity};

    struct FixedRule {
        id: &'static str,
        count: usize,
    }

    impl Rule for FixedRule {
        fn id(&self) -> &'static str {
            self.id
        }

        fn check(&self, _bundle: &NormalizedBundle) -> Result<Vec<Issue>> {
            Ok((0..self.count)
                .map(|i| Issue {
                    id: issue_id(self.id, &i.to_string()),
                    rule_id: self.id.to_string(),
                    severity: IssueSeverity::Low,
                    title: format!("issue {i}"),
                    description: String::new(),
                    bytes_estimate: None,
                    affected_modules: vec![],
                    fix_type: FixType::Other,
                    metadata: serde_json::Map::new(),
                })
                .collect())
        }
    }

    struct FailingRule;

    impl Rule for FailingRule {
        fn id(&self) -> &'static str {
            "failing"
        }

        fn check(&self, _bundle: &NormalizedBundle) -> Result<Vec<Issue>> {
            Err(Error::Rule {
                rule_id: "failing".to_string(),
                message: "boom".to_string(),
            })
        }
    }

    #[test]
    fn test_runs_rules_in_registration_order() {
        let mut engine = RuleEngine::new();
        engine.register(Box::new(FixedRule { id: "first", count: 1 }));
        engine.register(Box::new(FixedRule { id: "second", count: 2 }));

        let outcome = engine.run(&NormalizedBundle::default());
        assert_eq!(outcome.issues.len(), 3);
        assert_eq!(outcome.issues[0].rule_id, "first");
        assert_eq!(outcome.issues[1].rule_id, "second");
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn test_duplicate_registration_runs_twice() {
        let mut engine = RuleEngine::new();
        engine.register(Box::new(FixedRule { id: "dup", count: 1 }));
        engine.register(Box::new(FixedRule { id: "dup", count: 1 }));

        let outcome = engine.run(&NormalizedBundle::default());
        assert_eq!(outcome.issues.len(), 2);
    }

    #[test]
    fn test_failure_does_not_abort_remaining_rules() {
        let mut engine = RuleEngine::new();
        engine.register(Box::new(FixedRule { id: "before", count: 1 }));
        engine.register(Box::new(FailingRule));
        engine.register(Box::new(FixedRule { id: "after", count: 1 }));

        let outcome = engine.run(&NormalizedBundle::default());
        assert_eq!(outcome.issues.len(), 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].rule_id, "failing");
        assert!(outcome.failures[0].message.contains("boom"));
    }

    #[test]
    fn test_empty_engine() {
        let engine = RuleEngine::new();
        assert!(engine.is_empty());
        let outcome = engine.run(&NormalizedBundle::default());
        assert!(outcome.issues.is_empty());
    }
}
