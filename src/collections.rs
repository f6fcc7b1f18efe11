use std::hash::BuildHasherDefault;
use indexmap::IndexMap;
use rustc_hash::FxHasher;


/// Use indexmap for fast lookups and rustc_hash for fast hashing
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;


/// Disjoint-set forest over the ids 0..n
/// Path compression + union by size
#[derive(Clone, Debug)]
pub struct Partition {
    parent: Vec<usize>,
    size: Vec<usize>,
    sets: usize,
}

impl Partition {

    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            sets: n,
        }
    }

    /// Representative of the set containing x
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // compress the walked path
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the sets of a and b
    /// Returns false if they were already in the same set
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        self.sets -= 1;
        true
    }

    pub fn same(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    pub fn num_sets(&self) -> usize {
        self.sets
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_union_and_find() {
        let mut p = Partition::new(6);
        assert_eq!(p.num_sets(), 6);

        assert!(p.union(0, 1));
        assert!(p.union(2, 3));
        assert!(p.union(1, 3));
        assert!(!p.union(0, 2)); // already joined

        assert!(p.same(0, 3));
        assert!(!p.same(0, 4));
        assert_eq!(p.num_sets(), 3);
    }

    #[test]
    fn test_partition_long_chain_compresses() {
        let mut p = Partition::new(100);
        for i in 1..100 {
            p.union(i - 1, i);
        }
        let root = p.find(99);
        for i in 0..100 {
            assert_eq!(p.find(i), root);
        }
        assert_eq!(p.num_sets(), 1);
    }
}
