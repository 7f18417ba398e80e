use std::ops::Range;

/// Index of a node inside a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Identifier,
    MemberExpression,
    Other(String),
}

#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub name: Option<String>,
    pub parent: Option<NodeId>,
    pub object: Option<NodeId>,
    pub property: Option<NodeId>,
    pub range: Range<usize>,
}

/// Arena holding every node of one parsed file.
///
/// Nodes are appended in document order (a parent always precedes its
/// children), so walking the arena front to back is a pre-order traversal.
/// `parent`, `object` and `property` are plain indices into the arena and
/// never own anything.
#[derive(Debug, Clone, Default)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
}

impl SyntaxTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }

    /// Every node in document order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        (0..self.nodes.len()).map(move |i| self.get(NodeId(i)))
    }

    pub fn push_identifier(
        &mut self,
        parent: Option<NodeId>,
        name: &str,
        range: Range<usize>,
    ) -> NodeId {
        self.push(SyntaxNode {
            kind: NodeKind::Identifier,
            name: Some(name.to_string()),
            parent,
            object: None,
            property: None,
            range,
        })
    }

    /// Adds a member expression; its object and property are attached later
    /// with [`SyntaxTree::set_member_parts`] once they have been pushed.
    pub fn push_member(&mut self, parent: Option<NodeId>, range: Range<usize>) -> NodeId {
        self.push(SyntaxNode {
            kind: NodeKind::MemberExpression,
            name: None,
            parent,
            object: None,
            property: None,
            range,
        })
    }

    pub fn push_other(&mut self, parent: Option<NodeId>, kind: &str, range: Range<usize>) -> NodeId {
        self.push(SyntaxNode {
            kind: NodeKind::Other(kind.to_string()),
            name: None,
            parent,
            object: None,
            property: None,
            range,
        })
    }

    pub fn set_member_parts(&mut self, member: NodeId, object: Option<NodeId>, property: Option<NodeId>) {
        let node = &mut self.nodes[member.0];
        node.object = object;
        node.property = property;
    }

    fn push(&mut self, node: SyntaxNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }
}

/// Borrowed view of one node, used for walking the upward and member links.
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> NodeRef<'t> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    fn data(&self) -> &'t SyntaxNode {
        &self.tree.nodes[self.id.0]
    }

    pub fn kind(&self) -> &'t NodeKind {
        &self.data().kind
    }

    pub fn name(&self) -> Option<&'t str> {
        self.data().name.as_deref()
    }

    pub fn range(&self) -> Range<usize> {
        self.data().range.clone()
    }

    pub fn parent(&self) -> Option<NodeRef<'t>> {
        self.data().parent.map(|id| self.tree.get(id))
    }

    pub fn object(&self) -> Option<NodeRef<'t>> {
        self.data().object.map(|id| self.tree.get(id))
    }

    pub fn property(&self) -> Option<NodeRef<'t>> {
        self.data().property.map(|id| self.tree.get(id))
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", self.kind())
            .field("name", &self.name())
            .field("range", &self.range())
            .finish()
    }
}
