//! Allowed Collision Matrix - symmetric link pair exemptions
//!
//! Stores which pairs of links are permitted to be in contact, along with
//! a human readable reason for each exemption. Lookups are independent of
//! argument order because every pair is keyed by its canonical [`LinkPair`].

use crate::pair::LinkPair;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// All entries of a matrix, keyed by canonical pair
pub type AllowedCollisionEntries = HashMap<LinkPair, String>;

/// Read-only handle for sharing one matrix between collision checkers
pub type SharedCollisionMatrix = Arc<AllowedCollisionMatrix>;

/// Table of link pairs that are allowed to collide
///
/// There is no internal locking. Share it immutably through
/// [`SharedCollisionMatrix`], or wrap it in a lock if several owners
/// need to mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedCollisionMatrix {
    lookup_table: AllowedCollisionEntries,
}

impl AllowedCollisionMatrix {
    /// Create an empty matrix
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable collision checking between two links
    ///
    /// Overwrites the reason if the pair is already present.
    pub fn add_allowed_collision(
        &mut self,
        link_name1: impl Into<String>,
        link_name2: impl Into<String>,
        reason: impl Into<String>,
    ) {
        let link_pair = LinkPair::new(link_name1, link_name2);
        let reason = reason.into();

        if link_pair.is_self_pair() {
            trace!(link = link_pair.first(), "allowing self collision");
        }
        trace!(pair = %link_pair, reason = %reason, "add allowed collision");

        self.lookup_table.insert(link_pair, reason);
    }

    /// Get all of the entries in the matrix
    pub fn get_all_allowed_collisions(&self) -> &AllowedCollisionEntries {
        &self.lookup_table
    }

    /// Remove the entry for a pair of links, if any
    pub fn remove_allowed_collision(&mut self, link_name1: &str, link_name2: &str) {
        let link_pair = LinkPair::new(link_name1, link_name2);
        if self.lookup_table.remove(&link_pair).is_some() {
            trace!(pair = %link_pair, "removed allowed collision");
        }
    }

    /// Remove every entry that involves `link_name`
    ///
    /// Returns the number of entries removed.
    pub fn remove_allowed_collisions_for_link(&mut self, link_name: &str) -> usize {
        let before = self.lookup_table.len();
        self.lookup_table.retain(|pair, _| !pair.contains(link_name));
        let removed = before - self.lookup_table.len();

        debug!(link = link_name, removed, "removed allowed collisions for link");
        removed
    }

    /// Check whether two links are allowed to be in collision
    pub fn is_collision_allowed(&self, link_name1: &str, link_name2: &str) -> bool {
        self.lookup_table
            .contains_key(&LinkPair::new(link_name1, link_name2))
    }

    /// Reason recorded for a pair, if the pair is allowed
    pub fn reason(&self, link_name1: &str, link_name2: &str) -> Option<&str> {
        self.lookup_table
            .get(&LinkPair::new(link_name1, link_name2))
            .map(String::as_str)
    }

    /// Remove all entries, so that no collision is allowed
    pub fn clear_allowed_collisions(&mut self) {
        debug!(cleared = self.lookup_table.len(), "clearing allowed collisions");
        self.lookup_table.clear();
    }

    /// Merge another matrix into this one
    ///
    /// Pairs already present here keep their reason; only missing pairs are
    /// copied over.
    pub fn insert_allowed_collision_matrix(&mut self, other: &AllowedCollisionMatrix) {
        let before = self.lookup_table.len();

        for (pair, reason) in &other.lookup_table {
            self.lookup_table
                .entry(pair.clone())
                .or_insert_with(|| reason.clone());
        }

        let inserted = self.lookup_table.len() - before;
        debug!(
            inserted,
            skipped = other.len() - inserted,
            "merged allowed collision matrix"
        );
    }

    /// Links that are allowed to collide with `link_name`
    pub fn allowed_links_for(&self, link_name: &str) -> Vec<&str> {
        self.lookup_table
            .keys()
            .filter_map(|pair| pair.partner(link_name))
            .collect()
    }

    /// Number of allowed pairs
    pub fn len(&self) -> usize {
        self.lookup_table.len()
    }

    /// True if no pair is allowed
    pub fn is_empty(&self) -> bool {
        self.lookup_table.is_empty()
    }

    /// Iterate over `(pair, reason)` in table order
    pub fn iter(&self) -> impl Iterator<Item = (&LinkPair, &str)> {
        self.lookup_table
            .iter()
            .map(|(pair, reason)| (pair, reason.as_str()))
    }

    /// Wrap the matrix for read-only sharing
    pub fn into_shared(self) -> SharedCollisionMatrix {
        Arc::new(self)
    }
}

impl fmt::Display for AllowedCollisionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pair, reason) in &self.lookup_table {
            writeln!(
                f,
                "link={} link={} reason={}",
                pair.first(),
                pair.second(),
                reason
            )?;
        }
        Ok(())
    }
}

impl FromIterator<(LinkPair, String)> for AllowedCollisionMatrix {
    fn from_iter<I: IntoIterator<Item = (LinkPair, String)>>(iter: I) -> Self {
        Self {
            lookup_table: iter.into_iter().collect(),
        }
    }
}

impl Extend<(LinkPair, String)> for AllowedCollisionMatrix {
    fn extend<I: IntoIterator<Item = (LinkPair, String)>>(&mut self, iter: I) {
        self.lookup_table.extend(iter);
    }
}

impl<'a> IntoIterator for &'a AllowedCollisionMatrix {
    type Item = (&'a LinkPair, &'a String);
    type IntoIter = std::collections::hash_map::Iter<'a, LinkPair, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lookup_table.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arm_matrix() -> AllowedCollisionMatrix {
        let mut acm = AllowedCollisionMatrix::new();
        acm.add_allowed_collision("base_link", "shoulder", "Adjacent");
        acm.add_allowed_collision("shoulder", "upper_arm", "Adjacent");
        acm.add_allowed_collision("upper_arm", "forearm", "Adjacent");
        acm.add_allowed_collision("base_link", "camera", "Never");
        acm
    }

    #[test]
    fn test_new_is_empty() {
        let acm = AllowedCollisionMatrix::new();
        assert!(acm.is_empty());
        assert_eq!(acm.len(), 0);
        assert!(!acm.is_collision_allowed("a", "b"));
    }

    #[test]
    fn test_add_and_query_both_orders() {
        let mut acm = AllowedCollisionMatrix::new();
        acm.add_allowed_collision("linkA", "linkB", "adjacent");

        assert!(acm.is_collision_allowed("linkA", "linkB"));
        assert!(acm.is_collision_allowed("linkB", "linkA"));
        assert_eq!(acm.len(), 1);
    }

    #[test]
    fn test_add_overwrites_reason() {
        let mut acm = AllowedCollisionMatrix::new();
        acm.add_allowed_collision("a", "b", "first");
        acm.add_allowed_collision("b", "a", "second");

        assert_eq!(acm.len(), 1);
        assert_eq!(acm.reason("a", "b"), Some("second"));
    }

    #[test]
    fn test_entries_are_keyed_canonically() {
        let mut acm = AllowedCollisionMatrix::new();
        acm.add_allowed_collision("zeta", "alpha", "Adjacent");

        let entries = acm.get_all_allowed_collisions();
        let (pair, reason) = entries.iter().next().unwrap();
        assert_eq!(pair.first(), "alpha");
        assert_eq!(pair.second(), "zeta");
        assert_eq!(reason, "Adjacent");
    }

    #[test]
    fn test_remove_pair() {
        let mut acm = arm_matrix();
        acm.remove_allowed_collision("shoulder", "base_link");

        assert!(!acm.is_collision_allowed("base_link", "shoulder"));
        assert!(acm.is_collision_allowed("shoulder", "upper_arm"));
        assert_eq!(acm.len(), 3);
    }

    #[test]
    fn test_remove_missing_pair_is_noop() {
        let mut acm = arm_matrix();
        acm.remove_allowed_collision("gripper", "camera");
        assert_eq!(acm.len(), 4);
    }

    #[test]
    fn test_remove_for_link() {
        let mut acm = arm_matrix();
        let removed = acm.remove_allowed_collisions_for_link("base_link");

        assert_eq!(removed, 2);
        assert_eq!(acm.len(), 2);
        assert!(acm.iter().all(|(pair, _)| !pair.contains("base_link")));
        assert!(acm.is_collision_allowed("upper_arm", "forearm"));
    }

    #[test]
    fn test_remove_for_unknown_link() {
        let mut acm = arm_matrix();
        assert_eq!(acm.remove_allowed_collisions_for_link("gripper"), 0);
        assert_eq!(acm.len(), 4);
    }

    #[test]
    fn test_remove_for_link_drops_self_pair() {
        let mut acm = AllowedCollisionMatrix::new();
        acm.add_allowed_collision("wheel", "wheel", "Self");
        acm.add_allowed_collision("wheel", "chassis", "Adjacent");

        assert_eq!(acm.remove_allowed_collisions_for_link("wheel"), 2);
        assert!(acm.is_empty());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut acm = arm_matrix();
        acm.clear_allowed_collisions();
        assert!(acm.get_all_allowed_collisions().is_empty());

        acm.clear_allowed_collisions();
        assert!(acm.get_all_allowed_collisions().is_empty());
    }

    #[test]
    fn test_merge_keeps_existing_reason() {
        let mut m1 = AllowedCollisionMatrix::new();
        m1.add_allowed_collision("a", "b", "r1");

        let mut m2 = AllowedCollisionMatrix::new();
        m2.add_allowed_collision("b", "a", "r2");
        m2.add_allowed_collision("b", "c", "r3");

        m1.insert_allowed_collision_matrix(&m2);

        assert_eq!(m1.len(), 2);
        assert_eq!(m1.reason("a", "b"), Some("r1"));
        assert_eq!(m1.reason("c", "b"), Some("r3"));
        // Source is untouched
        assert_eq!(m2.reason("a", "b"), Some("r2"));
    }

    #[test]
    fn test_merge_with_self_copy() {
        let mut acm = arm_matrix();
        let copy = acm.clone();
        acm.insert_allowed_collision_matrix(&copy);
        assert_eq!(acm, copy);
    }

    #[test]
    fn test_allowed_links_for() {
        let acm = arm_matrix();
        let mut partners = acm.allowed_links_for("shoulder");
        partners.sort_unstable();
        assert_eq!(partners, vec!["base_link", "upper_arm"]);
        assert!(acm.allowed_links_for("gripper").is_empty());
    }

    #[test]
    fn test_display_format() {
        let mut acm = AllowedCollisionMatrix::new();
        acm.add_allowed_collision("linkB", "linkA", "adjacent");
        assert_eq!(acm.to_string(), "link=linkA link=linkB reason=adjacent\n");
    }

    #[test]
    fn test_display_one_line_per_entry() {
        let acm = arm_matrix();
        let rendered = acm.to_string();
        let mut lines: Vec<_> = rendered.lines().collect();
        lines.sort_unstable();

        assert_eq!(
            lines,
            vec![
                "link=base_link link=camera reason=Never",
                "link=base_link link=shoulder reason=Adjacent",
                "link=forearm link=upper_arm reason=Adjacent",
                "link=shoulder link=upper_arm reason=Adjacent",
            ]
        );
    }

    #[test]
    fn test_display_empty() {
        assert_eq!(AllowedCollisionMatrix::new().to_string(), "");
    }

    #[test]
    fn test_collect_and_extend() {
        let mut acm: AllowedCollisionMatrix = vec![
            (LinkPair::new("b", "a"), "one".to_string()),
            (LinkPair::new("c", "d"), "two".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(acm.len(), 2);

        acm.extend([(LinkPair::new("a", "b"), "three".to_string())]);
        assert_eq!(acm.len(), 2);
        assert_eq!(acm.reason("a", "b"), Some("three"));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = arm_matrix();
        let mut copy = original.clone();
        copy.clear_allowed_collisions();

        assert_eq!(original.len(), 4);
        assert!(copy.is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let shared = arm_matrix().into_shared();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let acm = Arc::clone(&shared);
                std::thread::spawn(move || acm.is_collision_allowed("forearm", "upper_arm"))
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
