use std::collections::BTreeSet;

use crate::git::Commits;

/// The parsed history as handed to the writers: every commit in the order
/// the log produced them (newest first for `git log`), with the parent
/// edges embedded in each record.
///
/// The order is left untouched on purpose, no deduplication and no
/// topological re-sort, so the same history always serializes to the same
/// document.
#[derive(Debug, Clone)]
pub struct CommitGraph {
    /// The commits, in log order
    pub commits: Commits,
}

impl CommitGraph {
    /// Creates a commit graph from a vector of commits, which we can then
    /// hand to a writer
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use guml::{CommitGraph, Guml};
    /// let guml = Guml::new().unwrap();
    /// let graph = CommitGraph::from_commits(guml.get_commits().unwrap());
    /// ```
    pub fn from_commits(commits: Commits) -> CommitGraph {
        CommitGraph { commits }
    }

    /// The number of nodes (commits) in the graph
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    /// `true` if the graph holds no commits at all
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// The number of parent edges across the whole graph
    pub fn edge_count(&self) -> usize {
        self.commits.iter().map(|c| c.parents.len()).sum()
    }

    /// The parent ids referenced by some commit but present as no node of
    /// their own, i.e. parents that fell outside the extraction window.
    /// Sorted and deduplicated. Such parents still serialize to valid
    /// edges; this set is only ever reported.
    pub fn dangling_parents(&self) -> Vec<&str> {
        let ids: BTreeSet<&str> = self.commits.iter().map(|c| c.id.as_str()).collect();
        let dangling: BTreeSet<&str> = self
            .commits
            .iter()
            .flat_map(|c| c.parents.iter())
            .map(String::as_str)
            .filter(|p| !ids.contains(p))
            .collect();

        dangling.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Commit;

    fn commit(id: &str, parents: &[&str]) -> Commit {
        Commit {
            id: id.to_owned(),
            parents: parents.iter().map(|p| (*p).to_owned()).collect(),
            message: String::new(),
        }
    }

    #[test]
    fn order_is_preserved() {
        let graph = CommitGraph::from_commits(vec![
            commit("c", &["b"]),
            commit("b", &["a"]),
            commit("a", &[]),
        ]);

        let ids: Vec<&str> = graph.commits.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
        assert_eq!(graph.len(), 3);
        assert!(!graph.is_empty());
    }

    #[test]
    fn edge_count_sums_parents() {
        let graph = CommitGraph::from_commits(vec![
            commit("m", &["a", "b"]),
            commit("a", &["r"]),
            commit("b", &["r"]),
            commit("r", &[]),
        ]);

        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn dangling_parents_are_sorted_and_deduplicated() {
        let graph = CommitGraph::from_commits(vec![
            commit("c", &["zeta", "b"]),
            commit("b", &["alpha"]),
            commit("a", &["alpha"]),
        ]);

        // "b" has a node, "alpha" and "zeta" do not
        assert_eq!(graph.dangling_parents(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn empty_graph() {
        let graph = CommitGraph::from_commits(vec![]);

        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.dangling_parents().is_empty());
    }
}
