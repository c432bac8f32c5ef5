use crate::Edit;
use std::rc::Rc;

#[derive(Debug)]
enum Link {
    Step(Edit),
    Join(Script, Script),
}

/// An immutable sequence of [Edit]s that shares structure with the sequences it was built from.
///
/// Appending and joining are O(1), so every table entry can hold the full sequence that realizes
/// its cost without copying its dependencies.
#[derive(Debug, Clone, Default)]
pub(crate) struct Script(Option<Rc<Link>>);

impl Script {
    pub(crate) fn then(&self, edit: Edit) -> Self {
        self.join(&Script(Some(Rc::new(Link::Step(edit)))))
    }

    pub(crate) fn join(&self, other: &Self) -> Self {
        match (&self.0, &other.0) {
            (None, _) => other.clone(),
            (_, None) => self.clone(),
            _ => Script(Some(Rc::new(Link::Join(self.clone(), other.clone())))),
        }
    }

    /// Flattens the sequence in order, without recursing.
    pub(crate) fn to_vec(&self) -> Vec<Edit> {
        let mut edits = Vec::new();
        let mut pending = vec![self];

        while let Some(Script(link)) = pending.pop() {
            match link.as_deref() {
                None => {}
                Some(Link::Step(e)) => edits.push(*e),
                Some(Link::Join(a, b)) => {
                    pending.push(b);
                    pending.push(a);
                }
            }
        }

        edits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Edit::*;

    #[test]
    fn joined_scripts_keep_their_order() {
        let a = Script::default().then(Replace(1, 1)).then(Remove(2));
        let b = Script::default().then(Insert(2));
        let c = a.join(&Script::default()).join(&b).then(Replace(3, 3));

        assert_eq!(c.to_vec(), [Replace(1, 1), Remove(2), Insert(2), Replace(3, 3)]);
        assert_eq!(a.to_vec(), [Replace(1, 1), Remove(2)]);
        assert!(Script::default().to_vec().is_empty());
    }
}
