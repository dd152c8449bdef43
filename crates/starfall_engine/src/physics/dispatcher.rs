//! Per-tick collision dispatch
//!
//! One pass walks every active hit-volume tree for every projectile path:
//!
//! 1. Layer filtering drops pairs that never interact.
//! 2. An enabled `Outer` node is tested against the travel segment and prunes
//!    its subtree on a miss.
//! 3. Every live `Body` circle reached is solved against the segment's line,
//!    tagging the points with the node that produced them.
//! 4. Points behind the projectile or beyond this tick's travel are dropped and
//!    the point nearest the segment start is the single accepted hit.
//! 5. The tree's owner receives a [`CollisionSignal`].
//!
//! The contact pass does the same bookkeeping for body-to-body touches and
//! delivers [`CollisionTarget`]s instead.

use crate::config::CollisionConfig;
use crate::foundation::collections::{EntityId, NodeIndex, ProjectileId, TreeHandle};
use crate::foundation::math::{Point2, WorldTransform};
use crate::physics::equation_solver::EquationSolver;
use crate::physics::events::{
    CollisionSignal, CollisionTarget, OwnerRegistry, ProjectilePath,
};
use crate::physics::hit_volume::{HitVolumeKind, HitVolumeTree, HitVolumeWorld, LiveCircle};

/// Accepted projectile hit, returned so the projectile system can despawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitReport {
    /// Projectile that hit
    pub projectile: ProjectileId,
    /// Tree that was struck
    pub tree: TreeHandle,
    /// Owner the signal was delivered to
    pub owner: EntityId,
    /// Body node that was struck
    pub node: NodeIndex,
    /// Hit point in world space
    pub point: Point2,
    /// Distance from the segment start to the hit point
    pub distance: f32,
    /// Signal that was delivered
    pub signal: CollisionSignal,
}

/// Body-to-body contact between two trees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactReport {
    /// First party and its tree
    pub first: (EntityId, TreeHandle),
    /// Second party and its tree
    pub second: (EntityId, TreeHandle),
    /// Midpoint between the touching circles
    pub point: Point2,
}

/// Runs collision passes. Owns the solver scratch state, so one dispatcher
/// must not run two passes at once
#[derive(Debug, Default)]
pub struct CollisionDispatcher {
    solver: EquationSolver,
    config: CollisionConfig,
    stack: Vec<NodeIndex>,
}

impl CollisionDispatcher {
    /// Create a dispatcher with the given tuning
    pub fn new(config: CollisionConfig) -> Self {
        Self {
            solver: EquationSolver::new(),
            config,
            stack: Vec::new(),
        }
    }

    /// Current tuning
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Test every projectile path against every active tree and deliver a
    /// signal to the owner of each struck tree.
    ///
    /// Signals go out nearest tree first. Inactive projectiles are still
    /// tested and delivered; the owner decides to ignore them. Without
    /// piercing, every tree behind the first one gets a stale signal. Owners
    /// that no longer resolve are skipped.
    pub fn dispatch_projectiles<R: OwnerRegistry + ?Sized>(
        &mut self,
        world: &HitVolumeWorld,
        projectiles: &[ProjectilePath],
        owners: &mut R,
    ) -> Vec<HitReport> {
        let mut reports = Vec::new();

        for projectile in projectiles {
            if projectile.segment.is_degenerate() {
                log::trace!("projectile {:?} did not move, no hit possible", projectile.id);
                continue;
            }

            let first = reports.len();
            for (handle, tree) in world.active_trees() {
                if !tree.filter().accepts(&projectile.filter) {
                    continue;
                }

                let Some(transform) = owners.owner(tree.owner()).map(|o| o.world_transform()) else {
                    log::warn!("tree {:?} has no resolvable owner {:?}", handle, tree.owner());
                    continue;
                };

                let Some((node, point, distance)) = self.resolve_hit(tree, &transform, projectile) else {
                    continue;
                };

                reports.push(HitReport {
                    projectile: projectile.id,
                    tree: handle,
                    owner: tree.owner(),
                    node,
                    point,
                    distance,
                    signal: CollisionSignal {
                        is_active: projectile.is_active,
                        damage: projectile.damage,
                    },
                });
            }

            let hits = &mut reports[first..];
            hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));

            for (order, hit) in hits.iter_mut().enumerate() {
                if order > 0 && !self.config.piercing_projectiles {
                    hit.signal.is_active = false;
                }

                if let Some(owner) = owners.owner_mut(hit.owner) {
                    owner.acknowledge_signal(&hit.signal, projectile);
                }

                log::debug!(
                    "projectile {:?} hit node {} of {:?} at ({:.2}, {:.2})",
                    projectile.id,
                    hit.node,
                    hit.owner,
                    hit.point.x,
                    hit.point.y
                );
            }
        }

        reports
    }

    /// Nearest hit of one projectile path on one tree, as
    /// `(body node, point, distance from the segment start)`.
    ///
    /// Does not look at layers or deliver anything.
    pub fn resolve_hit(
        &mut self,
        tree: &HitVolumeTree,
        transform: &WorldTransform,
        projectile: &ProjectilePath,
    ) -> Option<(NodeIndex, Point2, f32)> {
        if !tree.is_enabled() {
            return None;
        }

        let segment = projectile.segment;
        self.solver.flush();
        if !self.solver.set_line_from_points(&segment.start, &segment.end) {
            return None;
        }

        self.stack.clear();
        self.stack.push(NodeIndex::ROOT);

        while let Some(index) = self.stack.pop() {
            let Some(node) = tree.node(index) else {
                continue;
            };
            if !node.is_enabled() {
                continue;
            }

            let circle = node.world_circle(transform);
            match node.kind() {
                HitVolumeKind::Outer => {
                    if !segment.intersects_circle(&circle) {
                        log::trace!("outer node {} of {:?} rejects {:?}", index, tree.owner(), projectile.id);
                        continue;
                    }
                }
                HitVolumeKind::Body => {
                    self.solver.set_circle(circle.center.x, circle.center.y, circle.radius);
                    self.solver.solve_line_circle_intersection(index.index());
                }
            }

            // Reversed so children are visited in description order
            self.stack.extend(node.children().iter().rev().copied());
        }

        self.solver
            .filter_points_with_correct_direction(&segment.start, &segment.direction());
        self.solver
            .retain_within_reach(&segment.start, segment.length() + self.config.reach_epsilon);

        let hit = self.solver.closest_intersection_point(&segment.start);
        self.solver.flush();

        hit.map(|point| {
            let distance = nalgebra::distance(&point.coordinates, &segment.start);
            (NodeIndex(point.owner_index), point.coordinates, distance)
        })
    }

    /// Test every pair of active trees with different owners for touching
    /// body circles and deliver a target to both owners of each touching pair.
    ///
    /// Does nothing when contact events are turned off in the config.
    pub fn dispatch_contacts<R: OwnerRegistry + ?Sized>(
        &mut self,
        world: &HitVolumeWorld,
        owners: &mut R,
    ) -> Vec<ContactReport> {
        let mut reports = Vec::new();
        if !self.config.contact_events {
            return reports;
        }

        let mut candidates: Vec<(TreeHandle, &HitVolumeTree, Vec<LiveCircle>)> = Vec::new();
        for (handle, tree) in world.active_trees() {
            let Some(transform) = owners.owner(tree.owner()).map(|o| o.world_transform()) else {
                log::warn!("tree {:?} has no resolvable owner {:?}", handle, tree.owner());
                continue;
            };
            candidates.push((handle, tree, tree.live_circles(&transform)));
        }

        for (i, (first_handle, first_tree, first_circles)) in candidates.iter().enumerate() {
            for (second_handle, second_tree, second_circles) in &candidates[i + 1..] {
                if first_tree.owner() == second_tree.owner()
                    || !first_tree.filter().accepts(second_tree.filter())
                {
                    continue;
                }

                let Some(point) = first_contact(first_circles, second_circles) else {
                    continue;
                };

                let first = (first_tree.owner(), *first_handle);
                let second = (second_tree.owner(), *second_handle);

                if let Some(owner) = owners.owner_mut(first.0) {
                    let target = CollisionTarget { other: second.0, other_tree: second.1, point };
                    owner.acknowledge_target(&target, second.0);
                }
                if let Some(owner) = owners.owner_mut(second.0) {
                    let target = CollisionTarget { other: first.0, other_tree: first.1, point };
                    owner.acknowledge_target(&target, first.0);
                }

                log::debug!("contact between {:?} and {:?}", first.0, second.0);
                reports.push(ContactReport { first, second, point });
            }
        }

        reports
    }
}

/// Contact point of the first touching body pair, after the outer bounds agree
fn first_contact(first: &[LiveCircle], second: &[LiveCircle]) -> Option<Point2> {
    let outer = |circles: &[LiveCircle]| {
        circles
            .iter()
            .find(|c| c.kind == HitVolumeKind::Outer)
            .map(|c| c.circle)
    };

    if let (Some(a), Some(b)) = (outer(first), outer(second)) {
        if !a.intersects(&b) {
            return None;
        }
    }

    let bodies = |circles: &[LiveCircle]| {
        circles
            .iter()
            .filter(|c| c.kind == HitVolumeKind::Body)
            .map(|c| c.circle)
            .collect::<Vec<_>>()
    };
    let second_bodies = bodies(second);

    bodies(first).iter().find_map(|a| {
        second_bodies
            .iter()
            .find(|b| a.intersects(b))
            .map(|b| a.contact_point(b))
    })
}
