use crate::{cost, Edit, Error, Result, Script, Tree};
use arrayvec::ArrayVec;
use itertools::iproduct;
use rapidhash::RapidHashMap as HashMap;
use std::fmt::Debug;
use tracing::{debug, trace};

/// A forest bound by an ancestor `s`, a node `u` on the path below it and a last node `i`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
struct Span {
    s: usize,
    u: usize,
    i: usize,
}

impl Span {
    fn new(s: usize, u: usize, i: usize) -> Self {
        Span { s, u, i }
    }

    fn is_collapsed(&self) -> bool {
        self.s == self.u && self.u == self.i
    }
}

type Key = (Span, Span);

/// A minimum cost along with the edits that realize it.
#[derive(Debug, Clone, Default)]
struct Entry {
    cost: usize,
    script: Script,
}

impl Entry {
    fn roots() -> Self {
        Entry {
            cost: 0,
            script: Script::default().then(Edit::Replace(1, 1)),
        }
    }

    fn then(&self, edit: Edit, cost: usize) -> Self {
        Entry {
            cost: self.cost + cost,
            script: self.script.then(edit),
        }
    }
}

/// Picks the cheapest candidate; the earliest one wins ties.
fn cheapest(candidates: impl IntoIterator<Item = Entry>) -> Option<Entry> {
    candidates
        .into_iter()
        .reduce(|best, e| if e.cost < best.cost { e } else { best })
}

fn missing(table: &'static str, key: impl Debug) -> Error {
    Error::MissingEntry {
        table,
        key: format!("{key:?}"),
    }
}

/// The `E` table, keyed by a pair of source and target forests.
///
/// The script of `E[s,u,i,t,v,j]` leaves out the pair `(s, t)`, which the recurrence always
/// matches and whoever consumes the entry accounts for.
#[derive(Default)]
struct Forests(HashMap<Key, Entry>);

impl Forests {
    fn get(&self, key: Key) -> Result<&Entry> {
        self.0.get(&key).ok_or_else(|| missing("E", key))
    }
}

/// A dense table indexed by source and target positions, filled in row-major order.
struct Grid {
    name: &'static str,
    columns: usize,
    cells: Vec<Entry>,
}

impl Grid {
    fn new(name: &'static str, rows: usize, columns: usize) -> Self {
        Grid {
            name,
            columns,
            cells: Vec::with_capacity(rows * columns),
        }
    }

    fn get(&self, i: usize, j: usize) -> Result<&Entry> {
        let cell = match (i.checked_sub(1), j.checked_sub(1)) {
            (Some(r), Some(c)) if c < self.columns => self.cells.get(r * self.columns + c),
            _ => None,
        };

        cell.ok_or_else(|| missing(self.name, (i, j)))
    }

    fn push(&mut self, entry: Entry) {
        self.cells.push(entry);
    }
}

struct Engine<'a, L> {
    source: &'a Tree<L>,
    target: &'a Tree<L>,
}

impl<L: PartialEq> Engine<'_, L> {
    fn relabel(&self, i: usize, j: usize) -> usize {
        cost(self.source.node_at(i), self.target.node_at(j))
    }

    fn insert(&self, j: usize) -> usize {
        cost(None, self.target.node_at(j))
    }

    fn remove(&self, i: usize) -> usize {
        cost(self.source.node_at(i), None)
    }

    fn child_on_path(tree: &Tree<L>, ancestor: usize, descendant: usize) -> Result<usize> {
        tree.child_on_path_from_descendant(ancestor, descendant)?
            .and_then(|c| c.position())
            .ok_or(Error::NoQualifyingChild {
                ancestor,
                descendant,
            })
    }

    /// Every forest ending at `i`, with deeper `u` before shallower ones.
    fn spans(tree: &Tree<L>, i: usize) -> Result<Vec<Span>> {
        let mut spans = Vec::new();
        for u in tree.ancestors(i)? {
            for s in tree.ancestors(u)? {
                spans.push(Span::new(s, u, i));
            }
        }

        Ok(spans)
    }

    fn forests(&self) -> Result<Forests> {
        let mut table = Forests::default();

        let targets = (1..=self.target.size())
            .map(|j| Self::spans(self.target, j))
            .collect::<Result<Vec<_>>>()?;

        for i in 1..=self.source.size() {
            let sources = Self::spans(self.source, i)?;
            for (a, b) in iproduct!(&sources, targets.iter().flatten()) {
                let key = (*a, *b);
                let entry = self.forest(&table, key)?;
                table.0.insert(key, entry);
            }
        }

        Ok(table)
    }

    fn forest(&self, table: &Forests, key: Key) -> Result<Entry> {
        let (a, b) = key;
        let Span { s, u, i } = a;
        let Span { s: t, u: v, i: j } = b;

        if a.is_collapsed() && b.is_collapsed() {
            return Ok(Entry {
                cost: self.relabel(i, j),
                script: Script::default(),
            });
        }

        if a.is_collapsed() || (t < v && v == j) {
            let fj = self.target.father_position(j)?;
            let prev = table.get((a, Span::new(t, fj, j - 1)))?;
            return Ok(prev.then(Edit::Insert(j), self.insert(j)));
        }

        if (s < u && u == i) || b.is_collapsed() {
            let fi = self.source.father_position(i)?;
            let prev = table.get((Span::new(s, fi, i - 1), b))?;
            return Ok(prev.then(Edit::Remove(i), self.remove(i)));
        }

        let x = Self::child_on_path(self.source, u, i)?;
        let y = Self::child_on_path(self.target, v, j)?;

        let below_x = table.get((Span::new(s, x, i), b))?;
        let below_y = table.get((a, Span::new(t, y, j)))?;
        let before = table.get((Span::new(s, u, x - 1), Span::new(t, v, y - 1)))?;
        let within = table.get((Span::new(x, x, i), Span::new(y, y, j)))?;

        let split = Entry {
            cost: before.cost + within.cost,
            script: before
                .script
                .then(Edit::Replace(x, y))
                .join(&within.script),
        };

        cheapest([below_x.clone(), below_y.clone(), split]).ok_or_else(|| missing("E", key))
    }

    fn matches(&self, forests: &Forests) -> Result<Grid> {
        let (n, m) = (self.source.size(), self.target.size());
        let mut grid = Grid::new("MIN_M", n, m);

        for i in 1..=n {
            for j in 1..=m {
                let entry = match (i, j) {
                    (1, 1) => Entry::roots(),
                    (1, _) => grid.get(1, j - 1)?.then(Edit::Insert(j), self.insert(j)),
                    (_, 1) => grid.get(i - 1, 1)?.then(Edit::Remove(i), self.remove(i)),
                    _ => self.matching(&grid, forests, i, j)?,
                };

                grid.push(entry);
            }
        }

        Ok(grid)
    }

    /// The cheapest mapping that matches `i` with `j`, over every pair of ancestors of their fathers.
    ///
    /// Ties go to the smallest `(s, t)`.
    fn matching(&self, grid: &Grid, forests: &Forests, i: usize, j: usize) -> Result<Entry> {
        let fi = self.source.father_position(i)?;
        let fj = self.target.father_position(j)?;

        let candidates = iproduct!(self.source.ancestors(fi)?, self.target.ancestors(fj)?)
            .map(|(s, t)| -> Result<_> {
                let anchor = grid.get(s, t)?;
                let forest = forests.get((Span::new(s, fi, i - 1), Span::new(t, fj, j - 1)))?;
                // The forest already prices the pair (s, t), and so does the anchor.
                let cost = anchor.cost + forest.cost - self.relabel(s, t);
                Ok(((cost, s, t), anchor, forest))
            })
            .collect::<Result<Vec<_>>>()?;

        let ((cost, _, _), anchor, forest) = candidates
            .into_iter()
            .min_by_key(|&(k, _, _)| k)
            .ok_or_else(|| missing("MIN_M", (i, j)))?;

        Ok(Entry {
            cost: cost + self.relabel(i, j),
            script: anchor.script.join(&forest.script).then(Edit::Replace(i, j)),
        })
    }

    fn distances(&self, matches: &Grid) -> Result<Grid> {
        let (n, m) = (self.source.size(), self.target.size());
        let mut grid = Grid::new("D", n, m);

        for i in 1..=n {
            for j in 1..=m {
                if (i, j) == (1, 1) {
                    grid.push(Entry::roots());
                    continue;
                }

                let mut candidates = ArrayVec::<_, 3>::new();

                if j > 1 {
                    let prev = grid.get(i, j - 1)?;
                    candidates.push(prev.then(Edit::Insert(j), self.insert(j)));
                }

                if i > 1 {
                    let prev = grid.get(i - 1, j)?;
                    candidates.push(prev.then(Edit::Remove(i), self.remove(i)));
                }

                if i > 1 && j > 1 {
                    candidates.push(matches.get(i, j)?.clone());
                }

                let entry = cheapest(candidates).ok_or_else(|| missing("D", (i, j)))?;
                grid.push(entry);
            }
        }

        Ok(grid)
    }
}

/// Computes the edit distance between two trees along with the mapping that realizes it.
///
/// Both trees must have their caches built. The mapping holds exactly one [Edit] per source
/// position and one per target position, ordered by source position with insertions last.
///
/// Memory and time grow with the product of both sizes and the fourth power of their depths.
pub fn compute_diff<L: PartialEq>(
    source: &Tree<L>,
    target: &Tree<L>,
) -> Result<(usize, Box<[Edit]>)> {
    let (n, m) = (source.size(), target.size());
    if n == 0 || m == 0 {
        return Err(Error::InvalidPosition(1));
    }

    debug!(source = n, target = m, "compute_diff start");
    let engine = Engine { source, target };

    let forests = engine.forests()?;
    trace!(entries = forests.0.len(), "E populated");

    let matches = engine.matches(&forests)?;
    trace!(entries = matches.cells.len(), "MIN_M populated");

    let distances = engine.distances(&matches)?;
    let last = distances.get(n, m)?;

    let mut edits = last.script.to_vec();
    edits.sort();

    debug!(distance = last.cost, edits = edits.len(), "compute_diff done");
    Ok((last.cost, edits.into()))
}
