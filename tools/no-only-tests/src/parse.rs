use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::tree::{NodeId, SyntaxTree};

/// Extensions picked up by the file walker.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

// tree-sitter kinds that ESTree models as a plain `Identifier`.
const IDENTIFIER_KINDS: &[&str] = &[
    "identifier",
    "property_identifier",
    "shorthand_property_identifier",
    "shorthand_property_identifier_pattern",
    "statement_identifier",
    "type_identifier",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    JavaScript,
    TypeScript,
    Tsx,
}

impl SourceLanguage {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext {
            "js" | "jsx" | "mjs" | "cjs" => Some(SourceLanguage::JavaScript),
            "ts" | "mts" | "cts" => Some(SourceLanguage::TypeScript),
            "tsx" => Some(SourceLanguage::Tsx),
            _ => None,
        }
    }

    fn grammar(self) -> tree_sitter::Language {
        match self {
            SourceLanguage::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            SourceLanguage::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceLanguage::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

#[derive(Debug)]
pub enum ParseError {
    Language(tree_sitter::LanguageError),
    NoTree,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Language(err) => write!(f, "failed to load grammar: {err}"),
            ParseError::NoTree => write!(f, "parser produced no syntax tree"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse `source` and lower it into a [`SyntaxTree`].
///
/// Syntax errors are not fatal: tree-sitter recovers and the error nodes are
/// carried over as opaque nodes, so the rest of the file is still checked.
pub fn parse_source(source: &str, language: SourceLanguage) -> Result<SyntaxTree, ParseError> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language.grammar())
        .map_err(ParseError::Language)?;
    let parsed = parser.parse(source, None).ok_or(ParseError::NoTree)?;
    Ok(lower(parsed.root_node(), source))
}

// Where a node sits decides how ESTree would model it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Expression,
    // `typeof a.b` in a type is a TSQualifiedName: identifiers stay, member access does not.
    TypeQuery,
    // JSX tag names are JSXIdentifier / JSXMemberExpression.
    JsxName,
}

const JSX_ELEMENT_KINDS: &[&str] = &[
    "jsx_opening_element",
    "jsx_closing_element",
    "jsx_self_closing_element",
];

fn lower(root: tree_sitter::Node<'_>, source: &str) -> SyntaxTree {
    let mut tree = SyntaxTree::new();
    let mut lowered: HashMap<usize, NodeId> = HashMap::new();
    let mut members = Vec::new();

    // Explicit stack keeps deeply nested files off the call stack. Children
    // are pushed in reverse so they pop in document order.
    let mut stack = vec![(root, None, Position::Expression)];
    while let Some((node, parent, position)) = stack.pop() {
        let range = node.byte_range();
        let kind = node.kind();
        let mut cursor = node.walk();
        let children: Vec<_> = node.named_children(&mut cursor).collect();

        // ESTree has no node for parentheses; their contents hang off the
        // enclosing node instead.
        if kind == "parenthesized_expression" {
            for child in children.into_iter().rev() {
                stack.push((child, parent, position));
            }
            continue;
        }

        let id = match member_property_field(node) {
            Some(property_field) if position == Position::Expression => {
                let id = tree.push_member(parent, range);
                members.push((id, node, property_field));
                id
            }
            _ if IDENTIFIER_KINDS.contains(&kind) && position != Position::JsxName => {
                let name = node.utf8_text(source.as_bytes()).unwrap_or_default();
                tree.push_identifier(parent, name, range)
            }
            _ => tree.push_other(parent, kind, range),
        };
        lowered.insert(node.id(), id);

        let name_field = node.child_by_field_name("name").map(|n| n.id());
        for child in children.into_iter().rev() {
            let child_position = match position {
                Position::Expression if kind == "type_query" => Position::TypeQuery,
                Position::Expression
                    if JSX_ELEMENT_KINDS.contains(&kind) && name_field == Some(child.id()) =>
                {
                    Position::JsxName
                }
                other => other,
            };
            stack.push((child, Some(id), child_position));
        }
    }

    for (id, node, property_field) in members {
        let object = node
            .child_by_field_name("object")
            .map(skip_parentheses)
            .and_then(|n| lowered.get(&n.id()).copied());
        let property = node
            .child_by_field_name(property_field)
            .map(skip_parentheses)
            .and_then(|n| lowered.get(&n.id()).copied());
        tree.set_member_parts(id, object, property);
    }

    tree
}

/// Field holding the property when `node` is an ESTree `MemberExpression`.
/// `a[b]` only counts when the index is a plain identifier; `a['b']` has a
/// literal property that never names anything.
fn member_property_field(node: tree_sitter::Node<'_>) -> Option<&'static str> {
    match node.kind() {
        "member_expression" => Some("property"),
        "subscript_expression" => {
            let index = skip_parentheses(node.child_by_field_name("index")?);
            (index.kind() == "identifier").then_some("index")
        }
        _ => None,
    }
}

// Parentheses are not lowered, so field lookups go through them.
fn skip_parentheses(mut node: tree_sitter::Node<'_>) -> tree_sitter::Node<'_> {
    while node.kind() == "parenthesized_expression" {
        match node.named_child(0) {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}
