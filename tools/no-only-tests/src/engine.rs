use std::ops::Range;

use serde::Serialize;

use crate::tree::{NodeId, NodeKind, NodeRef, SyntaxTree};

/// Static description of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub recommended: bool,
    pub url: &'static str,
    pub fixable: bool,
}

/// Machine-applicable fix: delete the source text in this half-open byte range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fix {
    pub range: Range<usize>,
}

impl Fix {
    pub fn remove_range(range: Range<usize>) -> Self {
        Self { range }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub rule: &'static str,
    pub node: NodeId,
    /// Byte range of the anchoring node.
    pub range: Range<usize>,
    pub message: String,
    pub fix: Option<Fix>,
}

/// Collects the reports produced while a rule visits nodes.
pub struct RuleContext {
    rule: &'static str,
    reports: Vec<Report>,
}

impl RuleContext {
    fn new(rule: &'static str) -> Self {
        Self {
            rule,
            reports: Vec::new(),
        }
    }

    pub fn report(&mut self, node: NodeRef<'_>, message: String, fix: Option<Fix>) {
        self.reports.push(Report {
            rule: self.rule,
            node: node.id(),
            range: node.range(),
            message,
            fix,
        });
    }

    fn take(&mut self) -> Vec<Report> {
        std::mem::take(&mut self.reports)
    }
}

/// A check invoked once per node whose kind it listens to.
pub trait Rule {
    fn meta(&self) -> &RuleMeta;

    fn listens_to(&self) -> &[NodeKind];

    fn check(&self, node: NodeRef<'_>, ctx: &mut RuleContext);
}

/// Walks a tree in document order and dispatches nodes to registered rules.
#[derive(Default)]
pub struct Linter {
    rules: Vec<Box<dyn Rule>>,
}

impl Linter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: Box<dyn Rule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn run(&self, tree: &SyntaxTree) -> Vec<Report> {
        let mut contexts: Vec<RuleContext> = self
            .rules
            .iter()
            .map(|rule| RuleContext::new(rule.meta().name))
            .collect();
        let mut reports = Vec::new();

        for node in tree.nodes() {
            for (rule, ctx) in self.rules.iter().zip(contexts.iter_mut()) {
                if rule.listens_to().contains(node.kind()) {
                    rule.check(node, ctx);
                    reports.extend(ctx.take());
                }
            }
        }

        reports
    }
}
