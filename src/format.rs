use crate::{Edit, Error, Result, Tree, TreeNode};
use std::fmt::{self, Display};

/// A node along with the preorder position it was looked up at.
#[derive(Debug)]
pub struct Located<'t, L> {
    /// The position named by the [Edit].
    pub position: usize,

    /// The node found there.
    pub node: TreeNode<'t, L>,
}

impl<L> Located<'_, L> {
    fn label(&self) -> &L {
        self.node.label()
    }
}

/// An [Edit] resolved against the trees it refers to.
#[derive(Debug)]
pub enum Change<'t, L> {
    /// Both nodes carry the same label.
    Keep(Located<'t, L>, Located<'t, L>),

    /// The source node is relabelled as the target node.
    Relabel(Located<'t, L>, Located<'t, L>),

    /// The target node has no counterpart in the source.
    Insert(Located<'t, L>),

    /// The source node has no counterpart in the target.
    Delete(Located<'t, L>),
}

impl<'t, L: PartialEq> Change<'t, L> {
    /// Looks up the nodes an [Edit] refers to.
    pub fn resolve(edit: Edit, source: &'t Tree<L>, target: &'t Tree<L>) -> Result<Self> {
        let find = |tree: &'t Tree<L>, position| match tree.node_at(position) {
            Some(node) => Ok(Located { position, node }),
            None => Err(Error::InvalidPosition(position)),
        };

        Ok(match edit {
            Edit::Replace(i, j) => {
                let (a, b) = (find(source, i)?, find(target, j)?);
                if a.label() == b.label() {
                    Change::Keep(a, b)
                } else {
                    Change::Relabel(a, b)
                }
            }
            Edit::Insert(j) => Change::Insert(find(target, j)?),
            Edit::Remove(i) => Change::Delete(find(source, i)?),
        })
    }
}

struct At<'a, 't, L>(&'a Located<'t, L>);

impl<L> Display for At<'_, '_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0.position)
    }
}

impl<L: Display> Display for Change<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Keep(a, b) => write!(f, "No change for {} ({} and {})", a.label(), At(a), At(b)),
            Change::Relabel(a, b) => write!(
                f,
                "Change from {} ({}) to {} ({})",
                a.label(),
                At(a),
                b.label(),
                At(b)
            ),
            Change::Insert(b) => write!(f, "Insert {} ({})", b.label(), At(b)),
            Change::Delete(a) => write!(f, "Delete {} ({})", a.label(), At(a)),
        }
    }
}

/// Describes every [Edit] of a mapping in plain words, in order.
pub fn format_mapping<L: PartialEq + Display>(
    mapping: &[Edit],
    source: &Tree<L>,
    target: &Tree<L>,
) -> Result<Vec<String>> {
    mapping
        .iter()
        .map(|&e| Change::resolve(e, source, target).map(|c| c.to_string()))
        .collect()
}
