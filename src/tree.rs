//! Prefix tree built from a sorted stream of component sequences.

use crate::split::join_path;
use crate::types::Component;

/// Index of a node inside its [`PathTree`].
///
/// Two paths that share a prefix share the very same ids for it, so id equality is
/// node identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One component's position in the tree.
#[derive(Debug, Clone)]
pub struct Node {
    value: Option<Component>,
    display: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// The component, or `None` for the synthetic root.
    pub fn value(&self) -> Option<&Component> {
        self.value.as_ref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in first-seen order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_root_sentinel(&self) -> bool {
        self.value.as_ref().is_some_and(Component::is_root)
    }

    /// Text to print: the decorated form when one was set, the component text
    /// otherwise.
    pub fn label(&self) -> &str {
        match (&self.display, &self.value) {
            (Some(display), _) => display,
            (None, Some(value)) => value.as_str(),
            (None, None) => "",
        }
    }
}

/// Arena holding the synthetic root and every node reachable from it.
#[derive(Debug, Clone)]
pub struct PathTree {
    nodes: Vec<Node>,
}

impl Default for PathTree {
    fn default() -> Self {
        Self {
            nodes: vec![Node {
                value: None,
                display: None,
                parent: None,
                children: Vec::new(),
            }],
        }
    }
}

impl PathTree {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Number of nodes, the synthetic root excluded.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the printed text of a node. Order and values are untouched.
    pub fn set_display(&mut self, id: NodeId, display: String) {
        self.nodes[id.0].display = Some(display);
    }

    /// Components from the top of the tree down to `id`, inclusive.
    pub fn components(&self, id: NodeId) -> Vec<&Component> {
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node(current);
            if let Some(value) = node.value() {
                chain.push(value);
            }
            cursor = node.parent;
        }
        chain.reverse();
        chain
    }

    /// Full literal path of `id`, sentinels rendered as `/` and `//`.
    pub fn path_text(&self, id: NodeId, separator: char) -> String {
        join_path(self.components(id), separator)
    }

    /// Every non-root node in depth-first pre-order.
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.len());
        let mut stack: Vec<NodeId> = self
            .node(self.root())
            .children
            .iter()
            .rev()
            .copied()
            .collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        order
    }

    fn add_child(&mut self, parent: NodeId, value: Component) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            value: Some(value),
            display: None,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }
}

/// Incremental builder that merges each path with the one pushed just before it.
///
/// Paths must arrive in sorted order. A path that should share a branch with an
/// earlier, non-adjacent path gets a duplicate branch instead.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: PathTree,
    previous: Vec<NodeId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one path and returns the node ids along it.
    ///
    /// Once a component differs from the previous path, every later component
    /// gets a new node, even if a value happens to match again further down.
    /// An empty path changes nothing.
    pub fn push(&mut self, components: Vec<Component>) -> &[NodeId] {
        if components.is_empty() {
            return &self.previous;
        }
        let mut parent = self.tree.root();
        let mut diverged = false;
        let mut path = Vec::with_capacity(components.len());
        for (index, component) in components.into_iter().enumerate() {
            let shared = if diverged {
                None
            } else {
                self.previous
                    .get(index)
                    .copied()
                    .filter(|&id| self.tree.node(id).value.as_ref() == Some(&component))
            };
            parent = match shared {
                Some(id) => id,
                None => {
                    diverged = true;
                    self.tree.add_child(parent, component)
                }
            };
            path.push(parent);
        }
        self.previous = path;
        &self.previous
    }

    pub fn finish(self) -> PathTree {
        #[cfg(feature = "logging")]
        tracing::debug!("Built tree with {} nodes", self.tree.len());
        self.tree
    }
}

/// Builds a tree from already sorted component sequences.
pub fn build_tree<I>(paths: I) -> PathTree
where
    I: IntoIterator<Item = Vec<Component>>,
{
    let mut builder = TreeBuilder::new();
    for path in paths {
        builder.push(path);
    }
    builder.finish()
}
