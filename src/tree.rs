use crate::{Error, Result};
use derive_more::From;
use indextree::{Arena, NodeId};
use std::fmt::{self, Display};

/// A recursive description of a tree, as handed over by whatever parsed it.
///
/// # Example
///
/// ```rust
/// use tree_correction::{Nested, Tree};
///
/// let leaf = |label| Nested { label, children: vec![] };
/// let t = Tree::from_nested(Nested { label: "A", children: vec![leaf("B"), leaf("C")] });
/// assert_eq!(t.size(), 3);
/// assert_eq!(t.node_at(3).map(|n| *n.label()), Some("C"));
/// ```
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash, From)]
pub struct Nested<L> {
    /// The label of this node.
    pub label: L,

    /// The children of this node, in order.
    pub children: Vec<Self>,
}

#[derive(Debug, Clone)]
struct Slot<L> {
    label: L,
    position: Option<usize>,
}

/// An ordered, labeled tree whose nodes are addressed by their 1-based preorder position.
///
/// Positions are only available after [build_caches][Tree::build_caches] has run, and any
/// structural change invalidates them until the caches are built again.
#[derive(Debug, Clone)]
pub struct Tree<L> {
    arena: Arena<Slot<L>>,
    root: NodeId,
    preorder: Vec<NodeId>,
}

impl<L> Tree<L> {
    /// Creates a single-node tree.
    pub fn new(label: L) -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(Slot {
            label,
            position: None,
        });

        Tree {
            arena,
            root,
            preorder: Vec::new(),
        }
    }

    /// Builds a tree out of a [Nested] description and caches its preorder positions.
    pub fn from_nested(nested: Nested<L>) -> Self {
        let Nested { label, children } = nested;
        let mut tree = Tree::new(label);
        let mut pending = vec![(tree.root, children)];

        while let Some((parent, children)) = pending.pop() {
            for Nested { label, children } in children {
                let id = tree.add_child(parent, label);
                pending.push((id, children));
            }
        }

        tree.build_caches();
        tree
    }

    /// The id of the root node, for use with [add_child][Tree::add_child].
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Appends a new node labeled `label` as the last child of `parent`.
    ///
    /// This invalidates the preorder cache.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not created by this tree.
    pub fn add_child(&mut self, parent: NodeId, label: L) -> NodeId {
        self.invalidate();
        let id = self.arena.new_node(Slot {
            label,
            position: None,
        });
        parent.append(id, &mut self.arena);
        id
    }

    fn invalidate(&mut self) {
        for id in self.preorder.drain(..) {
            if let Some(node) = self.arena.get_mut(id) {
                node.get_mut().position = None;
            }
        }
    }

    /// Assigns preorder positions `1..=size` to every node.
    pub fn build_caches(&mut self) {
        self.invalidate();
        self.preorder = self.root.descendants(&self.arena).collect();
        for (i, &id) in self.preorder.iter().enumerate() {
            self.arena[id].get_mut().position = Some(i + 1);
        }
    }

    /// The number of nodes, or zero if the preorder cache is stale.
    pub fn size(&self) -> usize {
        self.preorder.len()
    }

    /// Iterates over the nodes depth-first, visiting children in order.
    pub fn preorder(&self) -> impl Iterator<Item = TreeNode<'_, L>> + '_ {
        self.root
            .descendants(&self.arena)
            .map(move |id| TreeNode { tree: self, id })
    }

    /// The node at preorder position `pos`, if any.
    pub fn node_at(&self, pos: usize) -> Option<TreeNode<'_, L>> {
        let &id = self.preorder.get(pos.checked_sub(1)?)?;
        Some(TreeNode { tree: self, id })
    }

    fn cached(&self, pos: usize) -> Result<TreeNode<'_, L>> {
        self.node_at(pos).ok_or(Error::InvalidPosition(pos))
    }

    /// The father of the node at `pos`, or `None` for the root.
    pub fn father_of(&self, pos: usize) -> Result<Option<TreeNode<'_, L>>> {
        Ok(self.cached(pos)?.father())
    }

    /// The position of the father of the node at `pos`.
    ///
    /// Unlike [father_of][Tree::father_of], the root is rejected as an invalid position.
    pub fn father_position(&self, pos: usize) -> Result<usize> {
        self.father_of(pos)?
            .and_then(|f| f.position())
            .ok_or(Error::InvalidPosition(pos))
    }

    /// The positions from `pos` up to and including the root.
    pub fn ancestors(&self, pos: usize) -> Result<Ancestors<'_, L>> {
        let node = self.cached(pos)?;
        Ok(Ancestors {
            tree: self,
            next: Some(node.id),
        })
    }

    /// Finds the child of the node at `ancestor` that lies on the path up from `descendant`.
    ///
    /// Returns `None` if `ancestor` is not a strict ancestor of `descendant`.
    pub fn child_on_path_from_descendant(
        &self,
        ancestor: usize,
        descendant: usize,
    ) -> Result<Option<TreeNode<'_, L>>> {
        if ancestor == descendant {
            return Err(Error::NoQualifyingChild {
                ancestor,
                descendant,
            });
        }

        self.cached(ancestor)?;
        let mut child = self.cached(descendant)?;

        while let Some(father) = child.father() {
            if father.position() == Some(ancestor) {
                return Ok(Some(child));
            }

            child = father;
        }

        Ok(None)
    }
}

impl<L: PartialEq> PartialEq for Tree<L> {
    fn eq(&self, other: &Self) -> bool {
        fn shape<L>(t: &Tree<L>) -> impl Iterator<Item = (&L, usize)> + '_ {
            t.preorder().map(|n| (n.label(), n.children().count()))
        }

        shape(self).eq(shape(other))
    }
}

impl<L: Eq> Eq for Tree<L> {}

/// A borrowed handle to a single node of a [Tree].
pub struct TreeNode<'t, L> {
    tree: &'t Tree<L>,
    id: NodeId,
}

impl<L> Clone for TreeNode<'_, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L> Copy for TreeNode<'_, L> {}

impl<L: fmt::Debug> fmt::Debug for TreeNode<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("label", self.label())
            .field("position", &self.position())
            .finish()
    }
}

impl<'t, L> TreeNode<'t, L> {
    fn slot(&self) -> &'t Slot<L> {
        self.tree.arena[self.id].get()
    }

    /// The label of this node.
    pub fn label(&self) -> &'t L {
        &self.slot().label
    }

    /// The cached preorder position of this node.
    pub fn position(&self) -> Option<usize> {
        self.slot().position
    }

    /// The arena id of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The father of this node, or `None` for the root.
    pub fn father(&self) -> Option<Self> {
        let id = self.tree.arena[self.id].parent()?;
        Some(TreeNode { tree: self.tree, id })
    }

    /// This node's children, in order.
    pub fn children(&self) -> impl Iterator<Item = Self> + 't {
        let tree = self.tree;
        self.id
            .children(&tree.arena)
            .map(move |id| TreeNode { tree, id })
    }
}

impl<L: Display> TreeNode<'_, L> {
    /// A one-line description of this node, for diagnostics.
    pub fn debug_string(&self) -> String {
        match self.position() {
            Some(p) => format!("label: {}, preorder_position: {p}", self.label()),
            None => format!("label: {}, preorder_position: none", self.label()),
        }
    }
}

/// Preorder positions from a node up to and including the root.
///
/// Created by [Tree::ancestors].
pub struct Ancestors<'t, L> {
    tree: &'t Tree<L>,
    next: Option<NodeId>,
}

impl<L> Clone for Ancestors<'_, L> {
    fn clone(&self) -> Self {
        Ancestors {
            tree: self.tree,
            next: self.next,
        }
    }
}

impl<L> fmt::Debug for Ancestors<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let next = self.next.and_then(|id| self.tree.arena[id].get().position);
        f.debug_struct("Ancestors").field("next", &next).finish()
    }
}

impl<L> Iterator for Ancestors<'_, L> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let id = self.next?;
        let node = &self.tree.arena[id];
        self.next = node.parent();
        node.get().position
    }
}


#[cfg(test)]
pub(crate) use tests::{leaf, node, Letter, Size};
