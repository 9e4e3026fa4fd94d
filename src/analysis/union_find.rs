//! Disjoint-set forest over dense vertex indices.

/// Union-find with union by rank and two-pass path compression. Indices are
/// the dense view indices of the subgraph being analyzed.
#[derive(Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    /// Create `len` singleton sets.
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    /// Representative of the set containing `node`.
    pub fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Second pass repoints the walked chain at the root.
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merge the sets containing `a` and `b`. Returns false when they were
    /// already one set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let mut root_a = self.find(a);
        let mut root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        if self.rank[root_a] < self.rank[root_b] {
            std::mem::swap(&mut root_a, &mut root_b);
        }
        self.parent[root_b] = root_a;
        if self.rank[root_a] == self.rank[root_b] {
            self.rank[root_a] += 1;
        }
        true
    }

    /// Whether `a` and `b` currently share a set.
    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons_are_disjoint() {
        let mut sets = DisjointSet::new(4);
        for i in 0..4 {
            assert_eq!(sets.find(i), i);
        }
        assert!(!sets.same_set(0, 3));
    }

    #[test]
    fn test_union_merges_and_reports() {
        let mut sets = DisjointSet::new(4);
        assert!(sets.union(0, 1));
        assert!(sets.union(2, 3));
        assert!(!sets.same_set(0, 2));
        assert!(sets.union(1, 2));
        assert!(sets.same_set(0, 3));
        assert!(!sets.union(0, 3));
    }

    #[test]
    fn test_chain_compresses_to_one_root() {
        let mut sets = DisjointSet::new(6);
        for i in 0..5 {
            sets.union(i, i + 1);
        }
        let root = sets.find(0);
        for i in 1..6 {
            assert_eq!(sets.find(i), root);
        }
    }
}
