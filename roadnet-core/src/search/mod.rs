//! Road name lookup.
//!
//! Names are indexed case-insensitively in a character trie. A query
//! matches every road whose name starts with it; when some of those names
//! equal the query exactly, only the exact matches are kept.

mod trie;

use std::collections::BTreeSet;

use log::debug;

use crate::RoadId;
use crate::model::RoadNetwork;
use trie::Trie;

#[derive(Debug, Clone)]
pub struct RoadIndex {
    trie: Trie<(RoadId, String)>,
}

/// Roads matched by a [`RoadIndex::lookup`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoadMatches {
    /// Matching road ids, ascending
    pub roads: Vec<RoadId>,
    /// Distinct names of the matching roads, sorted
    pub names: Vec<String>,
    /// Whether the matches were narrowed to names equal to the query
    pub exact: bool,
}

impl RoadMatches {
    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }

    pub fn len(&self) -> usize {
        self.roads.len()
    }
}

impl RoadIndex {
    pub fn new(network: &RoadNetwork) -> Self {
        let mut trie = Trie::default();
        for road in network.roads() {
            trie.insert(&road.name.to_lowercase(), (road.id, road.name.clone()));
        }
        Self { trie }
    }

    pub fn lookup(&self, query: &str) -> RoadMatches {
        let key = query.trim().to_lowercase();
        if key.is_empty() {
            return RoadMatches::default();
        }

        let candidates = self.trie.with_prefix(&key);
        let exact = candidates
            .iter()
            .any(|(_, name)| name.to_lowercase() == key);

        let (roads, names): (BTreeSet<RoadId>, BTreeSet<&str>) = candidates
            .into_iter()
            .filter(|(_, name)| !exact || name.to_lowercase() == key)
            .map(|(id, name)| (*id, name.as_str()))
            .unzip();

        debug!(
            "Road search {query:?}: {} roads, {} names, exact: {exact}",
            roads.len(),
            names.len()
        );
        RoadMatches {
            roads: roads.into_iter().collect(),
            names: names.into_iter().map(str::to_owned).collect(),
            exact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Fixture;

    fn index() -> RoadIndex {
        let network = Fixture::new()
            .grid_node(1, 0, 0)
            .grid_node(2, 0, 1)
            .road(1, "Queen Street", false)
            .road(2, "Queen Street", true)
            .road(3, "Queen Street East", false)
            .road(4, "Queens Drive", false)
            .road(5, "Quay Street", false)
            .segment(1, 1, 2, 1.0)
            .build();
        RoadIndex::new(&network)
    }

    #[test]
    fn prefix_matches_all_names() {
        let matches = index().lookup("que");

        assert!(!matches.exact);
        assert_eq!(matches.roads, vec![1, 2, 3, 4]);
        assert_eq!(
            matches.names,
            vec!["Queen Street", "Queen Street East", "Queens Drive"]
        );
    }

    #[test]
    fn exact_name_narrows_matches() {
        let matches = index().lookup("queen street");

        assert!(matches.exact);
        assert_eq!(matches.roads, vec![1, 2]);
        assert_eq!(matches.names, vec!["Queen Street"]);
    }

    #[test]
    fn unmatched_and_empty_queries() {
        let index = index();

        assert!(index.lookup("ponsonby").is_empty());
        assert!(index.lookup("").is_empty());
        assert!(index.lookup("   ").is_empty());
    }
}
