//! Collision filtering seam used by collision checkers

use crate::matrix::AllowedCollisionMatrix;
use std::sync::Arc;

/// Decides whether contact between two links should be ignored
///
/// Collision checkers query this instead of a concrete matrix so that
/// callers can layer their own rules on top.
pub trait CollisionFilter {
    /// True if the two links are allowed to be in collision
    fn is_collision_allowed(&self, link_name1: &str, link_name2: &str) -> bool;

    /// Keep only the contacts that are not allowed
    fn filter_contacts<'a, I>(&self, contacts: I) -> Vec<(&'a str, &'a str)>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
        Self: Sized,
    {
        contacts
            .into_iter()
            .filter(|(a, b)| !self.is_collision_allowed(a, b))
            .collect()
    }
}

impl CollisionFilter for AllowedCollisionMatrix {
    fn is_collision_allowed(&self, link_name1: &str, link_name2: &str) -> bool {
        AllowedCollisionMatrix::is_collision_allowed(self, link_name1, link_name2)
    }
}

impl<T: CollisionFilter + ?Sized> CollisionFilter for Arc<T> {
    fn is_collision_allowed(&self, link_name1: &str, link_name2: &str) -> bool {
        (**self).is_collision_allowed(link_name1, link_name2)
    }
}

impl<T: CollisionFilter + ?Sized> CollisionFilter for &T {
    fn is_collision_allowed(&self, link_name1: &str, link_name2: &str) -> bool {
        (**self).is_collision_allowed(link_name1, link_name2)
    }
}
