//! Flags `.only` style focus modifiers on test suite functions, e.g.
//! `describe.only(...)` or `test.describe.only(...)`, and offers a fix that
//! drops the modifier.

use std::collections::HashSet;

use crate::engine::{Fix, Rule, RuleContext, RuleMeta};
use crate::options::RuleOptions;
use crate::tree::{NodeKind, NodeRef};

pub const META: RuleMeta = RuleMeta {
    name: "no-only-tests",
    description: "disallow .only blocks in tests",
    category: "Possible Errors",
    recommended: true,
    url: "https://github.com/levibuzolic/eslint-plugin-no-only-tests",
    fixable: true,
};

const LISTENS_TO: &[NodeKind] = &[NodeKind::Identifier];

/// A single match found on a focus identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub message: String,
    pub fix: Fix,
}

pub struct NoOnlyTests {
    block: HashSet<String>,
    focus: HashSet<String>,
}

impl Default for NoOnlyTests {
    fn default() -> Self {
        Self::new(&RuleOptions::default())
    }
}

impl NoOnlyTests {
    pub fn new(options: &RuleOptions) -> Self {
        Self {
            block: options.block_set(),
            focus: options.focus_set(),
        }
    }

    /// Classify one identifier. Returns up to two violations: one for a
    /// blocked direct receiver (`it.only`) and one for a blocked dotted
    /// receiver (`test.describe.only`).
    pub fn check_identifier(&self, node: NodeRef<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();

        let Some(parent_object) = node.parent().and_then(|parent| parent.object()) else {
            return violations;
        };
        let Some(name) = node.name() else {
            return violations;
        };
        if !self.focus.contains(name) {
            return violations;
        }

        if let Some(receiver) = parent_object.name() {
            if self.block.contains(receiver) {
                violations.push(Violation {
                    message: format!("{receiver}.{name} not permitted"),
                    fix: removal_fix(node),
                });
            }
        }

        if let Some(dotted) = dot_name(parent_object) {
            if self.block.contains(&dotted) {
                violations.push(Violation {
                    message: format!("{dotted}.{name} not permitted"),
                    fix: removal_fix(node),
                });
            }
        }

        violations
    }
}

impl Rule for NoOnlyTests {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn listens_to(&self) -> &[NodeKind] {
        LISTENS_TO
    }

    fn check(&self, node: NodeRef<'_>, ctx: &mut RuleContext) {
        for violation in self.check_identifier(node) {
            ctx.report(node, violation.message, Some(violation.fix));
        }
    }
}

/// `a.b` for a member access whose object and property are both named.
fn dot_name(object: NodeRef<'_>) -> Option<String> {
    let property = object.property()?.name()?;
    let receiver = object.object()?.name()?;
    Some(format!("{receiver}.{property}"))
}

// Removes the identifier plus the one character before it, which is assumed
// to be the `.` separator. `describe . only` is not handled.
fn removal_fix(node: NodeRef<'_>) -> Fix {
    let range = node.range();
    Fix::remove_range(range.start.saturating_sub(1)..range.end)
}
