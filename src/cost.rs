use crate::TreeNode;

/// The unit cost of turning `a` into `b`, where `None` stands for the gap.
///
/// Matching equal labels is free; relabelling, inserting (`a` is the gap) and deleting (`b` is the
/// gap) each cost one.
pub fn cost<L: PartialEq>(a: Option<TreeNode<'_, L>>, b: Option<TreeNode<'_, L>>) -> usize {
    match (a, b) {
        (Some(a), Some(b)) if a.label() == b.label() => 0,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{leaf, node, Letter, Nested, Tree};
    use test_strategy::proptest;

    #[test]
    fn equal_labels_are_free() {
        let a = Tree::from_nested(node("A", [leaf("B")]));
        let b = Tree::from_nested(node("B", [leaf("A")]));

        assert_eq!(cost(a.node_at(1), b.node_at(2)), 0);
        assert_eq!(cost(a.node_at(1), b.node_at(1)), 1);
        assert_eq!(cost(None, b.node_at(1)), 1);
        assert_eq!(cost(a.node_at(2), None), 1);
        assert_eq!(cost::<&str>(None, None), 1);
    }

    #[proptest]
    fn cost_is_symmetric(a: Nested<Letter>, b: Nested<Letter>) {
        let a = Tree::from_nested(a);
        let b = Tree::from_nested(b);
        for i in 0..=a.size() {
            for j in 0..=b.size() {
                assert_eq!(cost(a.node_at(i), b.node_at(j)), cost(b.node_at(j), a.node_at(i)));
            }
        }
    }
}
