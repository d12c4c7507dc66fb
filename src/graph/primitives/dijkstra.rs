use indexmap::map::Entry;
use indexmap::IndexMap;
use rustc_hash::{FxHashSet, FxHasher};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::{BuildHasherDefault, Hash};
use std::ops::Add;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

#[derive(Debug)]
struct SmallestHolder<C> {
    cost: C,
    index: usize,
}

impl<C: Ord> PartialEq for SmallestHolder<C> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl<C: Ord> Eq for SmallestHolder<C> {}

impl<C: Ord> PartialOrd for SmallestHolder<C> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for SmallestHolder<C> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.cmp(&self.cost)
    }
}

/// Struct returned by [`Dijkstra::reach`].
pub struct DijkstraReachable<N, C, FN> {
    to_see: BinaryHeap<SmallestHolder<C>>,
    seen: FxHashSet<usize>,
    parents: FxIndexMap<N, (usize, C)>,
    successors: FN,
}

/// Information about a node reached by [`Dijkstra::reach`].
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub struct DijkstraReachableItem<N, C> {
    /// The node that was reached.
    pub node: N,
    /// The previous node that the current node came from.
    /// If the node is the first node, there will be no parent.
    pub parent: Option<N>,
    /// The total cost from the starting node.
    pub total_cost: C,
}

impl<N, C, FN> DijkstraReachable<N, C, FN>
where
    N: Eq + Hash,
{
    /// The parent through which `node` was settled, if any.
    pub fn parent(&self, node: &N) -> Option<&N> {
        let (parent, _) = self.parents.get(node)?;
        self.parents.get_index(*parent).map(|(node, _)| node)
    }
}

impl<N, C, FN, IN> Iterator for DijkstraReachable<N, C, FN>
where
    N: Copy + Eq + Hash,
    C: Copy + Ord + Add<Output = C>,
    FN: FnMut(&N, &C) -> IN,
    IN: IntoIterator<Item = (N, C)>,
{
    type Item = DijkstraReachableItem<N, C>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(SmallestHolder { cost, index }) = self.to_see.pop() {
            if !self.seen.insert(index) {
                continue;
            }

            let Some((node, (parent_index, total_cost))) = self.parents.get_index(index) else {
                continue;
            };

            let item = DijkstraReachableItem {
                node: *node,
                parent: self.parents.get_index(*parent_index).map(|(node, _)| *node),
                total_cost: *total_cost,
            };

            for (successor, move_cost) in (self.successors)(&item.node, &cost) {
                let new_cost = cost + move_cost;

                let index = match self.parents.entry(successor) {
                    Entry::Vacant(e) => {
                        let n = e.index();
                        e.insert((index, new_cost));
                        n
                    }
                    Entry::Occupied(mut e) => {
                        if e.get().1 > new_cost {
                            e.insert((index, new_cost));
                            e.index()
                        } else {
                            continue;
                        }
                    }
                };

                self.to_see.push(SmallestHolder {
                    cost: new_cost,
                    index,
                });
            }

            return Some(item);
        }

        None
    }
}

pub struct Dijkstra;

impl Dijkstra {
    /// Visit all nodes that are reachable from a start node. The node
    /// will be visited in order of cost, with the closest nodes first.
    ///
    /// The `successors` function receives the current node and its total
    /// cost, and returns an iterator of successors associated with their
    /// move cost. Returning no successors prunes the search at that node.
    pub fn reach<N, C, FN, IN>(&self, start: N, successors: FN) -> DijkstraReachable<N, C, FN>
    where
        N: Copy + Eq + Hash,
        C: Copy + Ord + Default,
        FN: FnMut(&N, &C) -> IN,
        IN: IntoIterator<Item = (N, C)>,
    {
        let mut to_see = BinaryHeap::with_capacity(256);
        to_see.push(SmallestHolder {
            cost: C::default(),
            index: 0,
        });

        let mut parents: FxIndexMap<N, (usize, C)> =
            FxIndexMap::with_capacity_and_hasher(64, BuildHasherDefault::<FxHasher>::default());

        parents.insert(start, (usize::MAX, C::default()));
        let seen = FxHashSet::default();

        DijkstraReachable {
            to_see,
            seen,
            parents,
            successors,
        }
    }
}
