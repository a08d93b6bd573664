//! Seeding an allowed collision matrix from a URDF model
//!
//! Links connected by a joint always touch at the joint origin, so they are
//! marked as allowed. Links chained together by fixed joints move as one
//! rigid body; optionally every member of such a body is allowed against
//! the others and against everything adjacent to the body.

use crate::error::{AcmError, AcmResult};
use crate::matrix::AllowedCollisionMatrix;
use std::collections::{HashMap, HashSet};
use tracing::debug;
use urdf_rs::{JointType, Robot};

/// Default reason recorded for links sharing a joint
pub const DEFAULT_ADJACENT_REASON: &str = "Adjacent";

/// Default reason recorded for pairs implied by fixed joint chains
pub const DEFAULT_RIGID_REASON: &str = "Rigidly connected";

/// Options for [`AllowedCollisionMatrix::from_urdf`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyConfig {
    pub reason: String,
    pub collapse_fixed_joints: bool,
    pub fixed_reason: String,
}

impl AdjacencyConfig {
    pub fn new() -> Self {
        Self {
            reason: DEFAULT_ADJACENT_REASON.to_string(),
            collapse_fixed_joints: true,
            fixed_reason: DEFAULT_RIGID_REASON.to_string(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn with_collapse_fixed_joints(mut self, collapse: bool) -> Self {
        self.collapse_fixed_joints = collapse;
        self
    }

    pub fn with_fixed_reason(mut self, reason: impl Into<String>) -> Self {
        self.fixed_reason = reason.into();
        self
    }
}

impl Default for AdjacencyConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Disjoint sets of links joined by fixed joints
struct RigidGroups<'a> {
    parent: HashMap<&'a str, &'a str>,
}

impl<'a> RigidGroups<'a> {
    fn new(links: &HashSet<&'a str>) -> Self {
        Self {
            parent: links.iter().map(|&name| (name, name)).collect(),
        }
    }

    fn find(&mut self, link: &'a str) -> &'a str {
        let mut root = link;
        while let Some(&next) = self.parent.get(root) {
            if next == root {
                break;
            }
            root = next;
        }

        // Path compression
        let mut current = link;
        while current != root {
            let next = self.parent.get(current).copied().unwrap_or(root);
            self.parent.insert(current, root);
            current = next;
        }

        root
    }

    fn union(&mut self, a: &'a str, b: &'a str) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            self.parent.insert(root_b, root_a);
        }
    }

    /// Members of every group, keyed by group root
    fn members(&mut self) -> HashMap<&'a str, Vec<&'a str>> {
        let links: Vec<&'a str> = self.parent.keys().copied().collect();
        let mut groups: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
        for link in links {
            let root = self.find(link);
            groups.entry(root).or_default().push(link);
        }
        groups
    }
}

fn declared_links(robot: &Robot) -> AcmResult<HashSet<&str>> {
    let mut links = HashSet::with_capacity(robot.links.len());
    for link in &robot.links {
        if !links.insert(link.name.as_str()) {
            return Err(AcmError::DuplicateLink(link.name.clone()));
        }
    }
    Ok(links)
}

impl AllowedCollisionMatrix {
    /// Build a matrix allowing every pair of links that share a joint
    pub fn from_urdf(robot: &Robot, config: &AdjacencyConfig) -> AcmResult<Self> {
        let links = declared_links(robot)?;

        for joint in &robot.joints {
            for link in [&joint.parent.link, &joint.child.link] {
                if !links.contains(link.as_str()) {
                    return Err(AcmError::UnknownLink {
                        joint: joint.name.clone(),
                        link: link.clone(),
                    });
                }
            }
        }

        let mut acm = AllowedCollisionMatrix::new();
        for joint in &robot.joints {
            acm.add_allowed_collision(
                joint.parent.link.as_str(),
                joint.child.link.as_str(),
                config.reason.as_str(),
            );
        }
        let adjacent = acm.len();

        if config.collapse_fixed_joints {
            let rigid = rigid_body_pairs(robot, &links, &config.fixed_reason);
            acm.insert_allowed_collision_matrix(&rigid);
        }

        debug!(
            robot = %robot.name,
            links = links.len(),
            adjacent,
            rigid = acm.len() - adjacent,
            "built allowed collision matrix from URDF"
        );

        Ok(acm)
    }
}

/// Pairs implied by treating fixed joint chains as single bodies
fn rigid_body_pairs<'a>(
    robot: &'a Robot,
    links: &HashSet<&'a str>,
    reason: &str,
) -> AllowedCollisionMatrix {
    let mut groups = RigidGroups::new(links);
    for joint in &robot.joints {
        if matches!(joint.joint_type, JointType::Fixed) {
            groups.union(&joint.parent.link, &joint.child.link);
        }
    }

    let members = groups.members();
    let mut acm = AllowedCollisionMatrix::new();

    for group in members.values() {
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                acm.add_allowed_collision(*a, *b, reason);
            }
        }
    }

    for joint in &robot.joints {
        let parent_root = groups.find(&joint.parent.link);
        let child_root = groups.find(&joint.child.link);
        if parent_root == child_root {
            continue;
        }

        let (Some(parent_group), Some(child_group)) =
            (members.get(parent_root), members.get(child_root))
        else {
            continue;
        };

        for a in parent_group {
            for b in child_group {
                acm.add_allowed_collision(*a, *b, reason);
            }
        }
    }

    acm
}
