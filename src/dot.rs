use crate::{Change, Edit, Result, Tree};
use std::fmt::Display;

const SOURCE: &str = "Source";
const TARGET: &str = "Target";

fn id(prefix: &str, pos: usize) -> String {
    format!("{prefix}{pos}")
}

fn quote(label: impl Display) -> String {
    label.to_string().replace('\\', "\\\\").replace('"', "\\\"")
}

fn shape<L: Display>(lines: &mut Vec<String>, prefix: &str, tree: &Tree<L>) {
    for (pos, n) in (1..).zip(tree.preorder()) {
        let node = id(prefix, pos);
        lines.push(format!("{node} [label=\"{}\"]", quote(n.label())));
        if let Ok(f) = tree.father_position(pos) {
            lines.push(format!("{} -> {node}", id(prefix, f)));
        }
    }
}

/// Renders both trees and the mapping between them as a Graphviz `digraph`.
///
/// Nodes are named after their tree and preorder position. Matched pairs are joined by dotted
/// edges, green when the labels agree and gray otherwise; removed nodes are red and inserted
/// nodes orange.
pub fn to_dot<L: PartialEq + Display>(
    source: &Tree<L>,
    target: &Tree<L>,
    mapping: &[Edit],
) -> Result<String> {
    let mut lines = vec![
        "digraph G {".to_string(),
        format!("subgraph {{ rank = same; {}1; {}1 }}", SOURCE, TARGET),
    ];

    shape(&mut lines, SOURCE, source);
    shape(&mut lines, TARGET, target);

    for &edit in mapping {
        lines.push(match Change::resolve(edit, source, target)? {
            Change::Keep(a, b) => format!(
                "{} -> {} [style=dotted color=\"green\" constraint=false]",
                id(SOURCE, a.position),
                id(TARGET, b.position)
            ),
            Change::Relabel(a, b) => format!(
                "{} -> {} [style=dotted color=\"gray\" constraint=false]",
                id(SOURCE, a.position),
                id(TARGET, b.position)
            ),
            Change::Delete(a) => format!("{} [color=\"red\"]", id(SOURCE, a.position)),
            Change::Insert(b) => format!("{} [color=\"orange\"]", id(TARGET, b.position)),
        });
    }

    lines.push("}".to_string());
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compute_diff, leaf, node, Error};
    use assert_matches::assert_matches;

    #[test]
    fn renders_trees_and_mapping() {
        let a = Tree::from_nested(node("A", [leaf("B"), leaf("C")]));
        let b = Tree::from_nested(node("A", [node("\"B\"", [leaf("D")])]));
        let (_, mapping) = compute_diff(&a, &b).unwrap();
        let dot = to_dot(&a, &b, &mapping).unwrap();

        let lines: Vec<_> = dot.lines().collect();
        assert_eq!(lines.first(), Some(&"digraph G {"));
        assert_eq!(lines.last(), Some(&"}"));
        assert!(lines.contains(&"subgraph { rank = same; Source1; Target1 }"));
        assert!(lines.contains(&"Source1 -> Source3"));
        assert!(lines.contains(&"Target2 [label=\"\\\"B\\\"\"]"));
        assert!(lines.contains(&"Source1 -> Target1 [style=dotted color=\"green\" constraint=false]"));

        let decorations = lines.iter().filter(|l| l.contains("color=")).count();
        assert_eq!(decorations, mapping.len());
    }

    #[test]
    fn unknown_positions_are_rejected() {
        let a = Tree::from_nested(leaf("A"));
        assert_matches!(to_dot(&a, &a, &[Edit::Insert(2)]), Err(Error::InvalidPosition(2)));
    }
}
