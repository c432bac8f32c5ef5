use std::cmp::Ordering;

/// A single correspondence of an edit mapping, in terms of preorder positions.
///
/// Positions on the left refer to the source tree, positions on the right to the target tree.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Edit {
    /// Map the source node onto the target node, relabelling it if their labels differ.
    Replace(usize, usize),

    /// Insert the target node, which has no counterpart in the source.
    Insert(usize),

    /// Remove the source node, which has no counterpart in the target.
    Remove(usize),
}

impl Edit {
    /// The source position, or `None` if this is an insertion.
    pub fn source(&self) -> Option<usize> {
        match *self {
            Edit::Replace(s, _) | Edit::Remove(s) => Some(s),
            Edit::Insert(_) => None,
        }
    }

    /// The target position, or `None` if this is a removal.
    pub fn target(&self) -> Option<usize> {
        match *self {
            Edit::Replace(_, t) | Edit::Insert(t) => Some(t),
            Edit::Remove(_) => None,
        }
    }

    /// This edit as a `(source, target)` pair, where `None` stands for the gap.
    pub fn pair(&self) -> (Option<usize>, Option<usize>) {
        (self.source(), self.target())
    }

    fn key(&self) -> (bool, Option<usize>, Option<usize>) {
        (self.source().is_none(), self.source(), self.target())
    }
}

/// Edits are ordered by source position; insertions come last, ordered by target position.
impl Ord for Edit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for Edit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Edit::*;

    #[test]
    fn insertions_sort_after_every_source_position() {
        let mut edits = [Insert(2), Replace(3, 4), Remove(2), Insert(1), Replace(1, 1)];
        edits.sort();
        assert_eq!(edits, [Replace(1, 1), Remove(2), Replace(3, 4), Insert(1), Insert(2)]);
    }

    #[test]
    fn pairs_use_none_for_the_gap() {
        assert_eq!(Replace(2, 3).pair(), (Some(2), Some(3)));
        assert_eq!(Insert(3).pair(), (None, Some(3)));
        assert_eq!(Remove(2).pair(), (Some(2), None));
    }
}
