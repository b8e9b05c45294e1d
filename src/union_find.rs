/// Disjoint sets over the indices `0..size`, with path compression and union by rank.
///
/// Used by Kruskal's algorithm to reject any passage that would join two cells already connected,
/// which would otherwise create a loop in the maze.
#[derive(Debug, Clone)]
pub struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<u8>,
    sets_count: usize,
}

impl DisjointSets {
    pub fn new(size: usize) -> DisjointSets {
        DisjointSets {
            parent: (0..size).collect(),
            rank: vec![0; size],
            sets_count: size,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of distinct sets remaining.
    #[inline]
    pub fn sets_count(&self) -> usize {
        self.sets_count
    }

    /// Root of the set containing `x`. Every node visited on the way is re-parented directly to
    /// the root.
    ///
    /// Panics if `x` is out of range.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merge the sets containing `x` and `y`. Returns true if they were separate.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let (mut root_x, mut root_y) = (self.find(x), self.find(y));
        if root_x == root_y {
            return false;
        }

        if self.rank[root_x] < self.rank[root_y] {
            ::std::mem::swap(&mut root_x, &mut root_y);
        }
        self.parent[root_y] = root_x;
        if self.rank[root_x] == self.rank[root_y] {
            self.rank[root_x] += 1;
        }
        self.sets_count -= 1;
        true
    }

    pub fn is_same_set(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    #[test]
    fn singletons_to_start() {
        let mut sets = DisjointSets::new(5);
        assert_eq!(sets.len(), 5);
        assert_eq!(sets.sets_count(), 5);
        for i in 0..5 {
            assert_eq!(sets.find(i), i);
        }
        assert!(DisjointSets::new(0).is_empty());
    }

    #[test]
    fn union_merges_once() {
        let mut sets = DisjointSets::new(4);
        assert!(sets.union(0, 1));
        assert!(!sets.union(1, 0));
        assert!(sets.union(2, 3));
        assert!(!sets.is_same_set(0, 3));
        assert!(sets.union(1, 3));
        assert!(sets.is_same_set(0, 2));
        assert_eq!(sets.sets_count(), 1);
    }

    #[test]
    fn long_chains_are_compressed() {
        let mut sets = DisjointSets::new(64);
        for i in 1..64 {
            assert!(sets.union(i - 1, i));
        }
        let root = sets.find(63);
        for i in 0..64 {
            assert_eq!(sets.find(i), root);
        }
        // rank stays logarithmic with union by rank
        assert!(sets.rank.iter().all(|&r| r <= 6));
    }

    #[test]
    fn unions_count_sets() {
        fn prop(pairs: Vec<(u8, u8)>) -> bool {
            let size = 32;
            let mut sets = DisjointSets::new(size);
            let mut merges = 0;
            for (a, b) in pairs {
                if sets.union(a as usize % size, b as usize % size) {
                    merges += 1;
                }
            }
            sets.sets_count() == size - merges
        }
        quickcheck(prop as fn(Vec<(u8, u8)>) -> bool)
    }
}
