use std::fmt;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum OpKind {
    Add,
    Subtract,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpKind::Add => write!(f, "+"),
            OpKind::Subtract => write!(f, "-"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum NodeKind {
    Group,
    Operator(OpKind),
    Number(String),
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct NodeId(usize);

const ROOT: NodeId = NodeId(0);

#[derive(Debug, Clone)]
struct Slot {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A tree of nodes stored in one arena. Slot 0 is always the root.
///
/// Trees only ever grow, and only at the root: `push` and `extend` copy
/// another tree's nodes in, so the argument is never shared with the result.
/// Cloning an `Ast` produces a deep, independent copy.
#[derive(Clone)]
pub struct Ast {
    slots: Vec<Slot>,
}

impl Ast {
    pub fn new(kind: NodeKind) -> Self {
        Ast {
            slots: vec![Slot {
                kind,
                parent: None,
                children: vec![],
            }],
        }
    }

    pub fn group() -> Self {
        Ast::new(NodeKind::Group)
    }

    pub fn number<S: Into<String>>(value: S) -> Self {
        Ast::new(NodeKind::Number(value.into()))
    }

    pub fn operator(kind: OpKind) -> Self {
        Ast::new(NodeKind::Operator(kind))
    }

    pub fn group_of(children: &[Ast]) -> Self {
        let mut group = Ast::group();
        for child in children {
            group.push(child);
        }
        group
    }

    pub fn root(&self) -> Node<'_> {
        Node {
            ast: self,
            id: ROOT,
        }
    }

    /// Appends a copy of `child` as the last child of the root.
    pub fn push(&mut self, child: &Ast) -> NodeId {
        self.graft(ROOT, child, ROOT)
    }

    /// Appends copies of the root children of `other` to the root of `self`.
    pub fn extend(&mut self, other: &Ast) {
        for &child in &other.slots[ROOT.0].children {
            self.graft(ROOT, other, child);
        }
    }

    pub fn dump(&self) -> String {
        Dump {
            node: self.root(),
            depth: 0,
        }
        .to_string()
    }

    fn graft(&mut self, parent: NodeId, source: &Ast, from: NodeId) -> NodeId {
        let id = NodeId(self.slots.len());
        let slot = &source.slots[from.0];
        self.slots.push(Slot {
            kind: slot.kind.clone(),
            parent: Some(parent),
            children: Vec::with_capacity(slot.children.len()),
        });
        for &child in &slot.children {
            self.graft(id, source, child);
        }
        self.slots[parent.0].children.push(id);
        id
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Deep copy of the subtree rooted at `id`, with `id` as the new root.
    #[cfg(test)]
    pub(crate) fn subtree(&self, id: NodeId) -> Option<Ast> {
        let slot = self.slots.get(id.0)?;
        let mut copy = Ast::new(slot.kind.clone());
        for &child in &slot.children {
            copy.graft(ROOT, self, child);
        }
        Some(copy)
    }

    #[cfg(test)]
    pub(crate) fn set_number(&mut self, id: NodeId, value: &str) {
        if let NodeKind::Number(current) = &mut self.slots[id.0].kind {
            *current = value.to_string();
        }
    }
}

impl PartialEq for Ast {
    fn eq(&self, other: &Self) -> bool {
        self.root() == other.root()
    }
}

impl Eq for Ast {}

impl fmt::Debug for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ast({})", self.root())
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root())
    }
}

/// A borrowed view of one node in an `Ast`.
#[derive(Copy, Clone)]
pub struct Node<'a> {
    ast: &'a Ast,
    id: NodeId,
}

impl<'a> Node<'a> {
    fn slot(&self) -> &'a Slot {
        &self.ast.slots[self.id.0]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &'a NodeKind {
        &self.slot().kind
    }

    pub fn parent(&self) -> Option<Node<'a>> {
        let ast = self.ast;
        self.slot().parent.map(|id| Node { ast, id })
    }

    pub fn children(&self) -> impl ExactSizeIterator<Item = Node<'a>> + 'a {
        let ast = self.ast;
        self.slot()
            .children
            .iter()
            .map(move |&id| Node { ast, id })
    }

    pub fn child_count(&self) -> usize {
        self.slot().children.len()
    }
}

// Structural: ids and arena layout don't matter, only kinds and shape.
impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind()
            && self.child_count() == other.child_count()
            && self.children().zip(other.children()).all(|(a, b)| a == b)
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", self.kind())
            .finish()
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            NodeKind::Number(value) => write!(f, "{}", value),
            NodeKind::Operator(op) => write!(f, "{}", op),
            NodeKind::Group => {
                write!(f, "(")?;
                for (i, child) in self.children().enumerate() {
                    if i != 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}

struct Dump<'a> {
    node: Node<'a>,
    depth: usize,
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = "  ".repeat(self.depth);
        match self.node.kind() {
            NodeKind::Group => writeln!(f, "{}|- group", indent)?,
            NodeKind::Operator(op) => writeln!(f, "{}|- {}", indent, op)?,
            NodeKind::Number(value) => writeln!(f, "{}|- {}", indent, value)?,
        }
        for child in self.node.children() {
            let dump = Dump {
                node: child,
                depth: self.depth + 1,
            };
            write!(f, "{}", dump)?;
        }
        Ok(())
    }
}
