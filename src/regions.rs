use std::fmt::Display;

/// Identifier of a region: a room or a single maze
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(u32);

impl RegionId {
    /// Marks cells that belong to no region
    pub const UNASSIGNED: RegionId = RegionId(u32::MAX);

    #[inline(always)]
    #[must_use]
    pub const fn new(id: u32) -> Self {
        debug_assert!(id != u32::MAX);
        Self(id)
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        self.0 != Self::UNASSIGNED.0
    }

    #[inline(always)]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_assigned() {
            write!(f, "#{}", self.0)
        } else {
            f.write_str("#-")
        }
    }
}

/// Union-find over region ids, tracking how many independent sets are left
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parents: Vec<u32>,
    independent: usize,
}

impl DisjointSet {
    /// Every region from `0` to `count - 1` starts on its own
    pub fn new(count: u32) -> Self {
        Self {
            parents: (0..count).collect(),
            independent: count as usize,
        }
    }

    /// Number of sets still separated
    #[inline(always)]
    #[must_use]
    pub fn independent(&self) -> usize {
        self.independent
    }

    /// Representative of the set containing `region`
    pub fn find(&mut self, region: RegionId) -> RegionId {
        let mut root = region.0;
        while self.parents[root as usize] != root {
            root = self.parents[root as usize];
        }
        // flatten the path
        let mut current = region.0;
        while current != root {
            let next = self.parents[current as usize];
            self.parents[current as usize] = root;
            current = next;
        }
        RegionId(root)
    }

    /// Attach the set of `source` under the set of `dest`
    ///
    /// Returns false if they were already the same set.
    pub fn union(&mut self, source: RegionId, dest: RegionId) -> bool {
        let source = self.find(source);
        let dest = self.find(dest);
        if source == dest {
            return false;
        }
        self.parents[source.0 as usize] = dest.0;
        self.independent -= 1;
        true
    }

    /// Check whether all the given regions already share a representative
    pub fn same_set(&mut self, regions: &[RegionId]) -> bool {
        let Some((first, rest)) = regions.split_first() else {
            return true;
        };
        let rep = self.find(*first);
        rest.iter().all(|r| self.find(*r) == rep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_merges_into_destination() {
        let mut set = DisjointSet::new(4);
        assert_eq!(set.independent(), 4);
        assert!(set.union(RegionId::new(1), RegionId::new(0)));
        assert!(set.union(RegionId::new(3), RegionId::new(2)));
        assert_eq!(set.independent(), 2);
        assert!(set.union(RegionId::new(2), RegionId::new(1)));
        assert_eq!(set.independent(), 1);
        for r in 0..4 {
            assert_eq!(set.find(RegionId::new(r)), RegionId::new(0));
        }
        assert!(!set.union(RegionId::new(3), RegionId::new(0)));
        assert_eq!(set.independent(), 1);
    }

    #[test]
    fn same_set() {
        let mut set = DisjointSet::new(3);
        let ids = [RegionId::new(0), RegionId::new(2)];
        assert!(!set.same_set(&ids));
        set.union(RegionId::new(2), RegionId::new(0));
        assert!(set.same_set(&ids));
        assert!(set.same_set(&[]));
    }

    #[test]
    fn sentinel() {
        assert!(!RegionId::UNASSIGNED.is_assigned());
        assert!(RegionId::new(0).is_assigned());
        assert_eq!(RegionId::new(7).to_string(), "#7");
    }
}
