//! Organisation hierarchy resolution
//!
//! Position records rarely carry an explicit parent, so the parent is inferred
//! from keywords in the job title. The keyword policy is a plain rule table
//! ([`STATION_RULES`]); a resolver built with [`HierarchyResolver::explicit_only`]
//! ignores titles entirely and trusts the backend's `parent_id`.
//!
//! Nothing in this module fails: a position whose parent cannot be found
//! becomes a root of the forest.

use crate::contract::{Merged, OrgNode, ParentOrigin, PositionAssignment, ResolvedPosition};
use std::collections::{HashMap, HashSet};

/// Where a matching rule places a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Top of the chart
    Root,
    /// Under the first position found by the lookup
    Under(ParentLookup),
}

/// Finds a parent by title keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentLookup {
    pub keyword: &'static str,
    /// Candidates whose title contains any of these are skipped
    pub excluding: &'static [&'static str],
}

/// One row of the placement table. All keywords are lower-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRule {
    /// Title must contain every one of these
    pub requires: &'static [&'static str],
    /// Title must contain at least one of these (ignored when empty)
    pub any_of: &'static [&'static str],
    /// Title must contain none of these
    pub excluding: &'static [&'static str],
    pub placement: Placement,
}

impl PlacementRule {
    pub fn matches(&self, title: &str) -> bool {
        self.requires.iter().all(|k| title.contains(k))
            && (self.any_of.is_empty() || self.any_of.iter().any(|k| title.contains(k)))
            && !self.excluding.iter().any(|k| title.contains(k))
    }
}

pub const STATION_HEAD: &str = "kepala stasiun";
pub const DATA_COORDINATOR: &str = "koordinator data";
pub const OBSERVATION_COORDINATOR: &str = "koordinator observasi";
pub const ADMINISTRATION: &str = "tata usaha";
pub const STAFF: &str = "staf";

const UNDER_STATION_HEAD: Placement = Placement::Under(ParentLookup {
    keyword: STATION_HEAD,
    excluding: &[],
});

/// Placement rules for the climatology station; first match wins
pub static STATION_RULES: &[PlacementRule] = &[
    PlacementRule {
        requires: &[STATION_HEAD],
        any_of: &[],
        excluding: &[],
        placement: Placement::Root,
    },
    PlacementRule {
        requires: &[DATA_COORDINATOR],
        any_of: &[],
        excluding: &[],
        placement: UNDER_STATION_HEAD,
    },
    PlacementRule {
        requires: &[OBSERVATION_COORDINATOR],
        any_of: &[],
        excluding: &[],
        placement: UNDER_STATION_HEAD,
    },
    PlacementRule {
        requires: &[ADMINISTRATION],
        any_of: &[],
        excluding: &[STAFF],
        placement: UNDER_STATION_HEAD,
    },
    PlacementRule {
        requires: &[STAFF],
        any_of: &["data", "informasi"],
        excluding: &[],
        placement: Placement::Under(ParentLookup {
            keyword: DATA_COORDINATOR,
            excluding: &[],
        }),
    },
    PlacementRule {
        requires: &[STAFF],
        any_of: &["observasi", "teknisi"],
        excluding: &[],
        placement: Placement::Under(ParentLookup {
            keyword: OBSERVATION_COORDINATOR,
            excluding: &[],
        }),
    },
    PlacementRule {
        requires: &[STAFF, ADMINISTRATION],
        any_of: &[],
        excluding: &[],
        placement: Placement::Under(ParentLookup {
            keyword: ADMINISTRATION,
            excluding: &[STAFF],
        }),
    },
];

/// Titles containing these are never "leaf staff" boxes
pub const BRANCH_HEADER_MARKERS: &[&str] = &["koordinator", "kepala"];

/// Assigns parents to position records
#[derive(Debug, Clone, Copy)]
pub struct HierarchyResolver {
    rules: &'static [PlacementRule],
}

impl Default for HierarchyResolver {
    fn default() -> Self {
        Self::new(STATION_RULES)
    }
}

impl HierarchyResolver {
    pub fn new(rules: &'static [PlacementRule]) -> Self {
        Self { rules }
    }

    /// Resolver that never infers; only explicit parents survive
    pub fn explicit_only() -> Self {
        Self { rules: &[] }
    }

    pub fn rules(&self) -> &'static [PlacementRule] {
        self.rules
    }

    /// Resolve every position's parent. Explicit parents are kept as given.
    pub fn resolve(&self, positions: &[PositionAssignment]) -> Vec<ResolvedPosition> {
        let titles: Vec<String> = positions.iter().map(|p| p.title.to_lowercase()).collect();

        positions
            .iter()
            .enumerate()
            .map(|(idx, position)| {
                if let Some(parent) = explicit_parent(position) {
                    return ResolvedPosition {
                        parent_id: Some(parent.to_string()),
                        origin: ParentOrigin::Explicit,
                        position: position.clone(),
                    };
                }

                let (parent_id, origin) = match self.placement_for(&titles[idx]) {
                    Some(Placement::Root) => (None, ParentOrigin::Root),
                    Some(Placement::Under(lookup)) => {
                        match find_parent(positions, &titles, idx, lookup) {
                            Some(parent) => (Some(parent.id.clone()), ParentOrigin::Inferred),
                            None => {
                                tracing::debug!(
                                    position_id = %position.id,
                                    keyword = lookup.keyword,
                                    "No parent position matches keyword"
                                );
                                (None, ParentOrigin::Unattached)
                            }
                        }
                    }
                    None => (None, ParentOrigin::Unattached),
                };

                ResolvedPosition {
                    position: position.clone(),
                    parent_id,
                    origin,
                }
            })
            .collect()
    }

    fn placement_for(&self, lowered_title: &str) -> Option<Placement> {
        self.rules
            .iter()
            .find(|rule| rule.matches(lowered_title))
            .map(|rule| rule.placement)
    }
}

/// Empty strings count as "no parent", as the backend sends them for unset values
fn explicit_parent(position: &PositionAssignment) -> Option<&str> {
    position
        .parent_id
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
}

fn find_parent<'a>(
    positions: &'a [PositionAssignment],
    lowered_titles: &[String],
    child_idx: usize,
    lookup: ParentLookup,
) -> Option<&'a PositionAssignment> {
    positions
        .iter()
        .zip(lowered_titles)
        .enumerate()
        .find(|(idx, (candidate, title))| {
            *idx != child_idx
                && candidate.id != positions[child_idx].id
                && title.contains(lookup.keyword)
                && !lookup.excluding.iter().any(|k| title.contains(k))
        })
        .map(|(_, (candidate, _))| candidate)
}

// ===== Queries over resolved positions =====

/// Read access shared by resolved and merged positions
pub trait OrgPosition {
    fn position_id(&self) -> &str;
    fn title(&self) -> &str;
    fn parent(&self) -> Option<&str>;
}

impl OrgPosition for ResolvedPosition {
    fn position_id(&self) -> &str {
        &self.position.id
    }

    fn title(&self) -> &str {
        &self.position.title
    }

    fn parent(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }
}

impl OrgPosition for Merged<ResolvedPosition> {
    fn position_id(&self) -> &str {
        self.record.position_id()
    }

    fn title(&self) -> &str {
        self.record.title()
    }

    fn parent(&self) -> Option<&str> {
        self.record.parent()
    }
}

/// Direct children of `position_id`
pub fn children_of<'a, P: OrgPosition>(positions: &'a [P], position_id: &str) -> Vec<&'a P> {
    positions
        .iter()
        .filter(|p| p.parent() == Some(position_id) && p.position_id() != position_id)
        .collect()
}

/// Leaf staff under a branch: titles containing `keyword` that are not a
/// branch header themselves and are not exactly the keyword
pub fn by_title_keyword<'a, P: OrgPosition>(positions: &'a [P], keyword: &str) -> Vec<&'a P> {
    let keyword = keyword.to_lowercase();
    positions
        .iter()
        .filter(|p| {
            let title = p.title().to_lowercase();
            title.contains(&keyword)
                && !BRANCH_HEADER_MARKERS.iter().any(|m| title.contains(m))
                && title != keyword
        })
        .collect()
}

/// First position whose title equals `title`, ignoring case
pub fn holder_of<'a, P: OrgPosition>(positions: &'a [P], title: &str) -> Option<&'a P> {
    let title = title.to_lowercase();
    positions.iter().find(|p| p.title().to_lowercase() == title)
}

/// Ids from `position_id` up to its root, inclusive.
/// Stops early on a cycle or a parent id that is not in `positions`.
pub fn lineage<P: OrgPosition>(positions: &[P], position_id: &str) -> Vec<String> {
    let by_id = first_index_by_id(positions);
    let Some(&start) = by_id.get(position_id) else {
        return Vec::new();
    };

    let mut path = vec![positions[start].position_id().to_string()];
    let mut visited = HashSet::from([start]);
    let mut current = start;

    while let Some(&parent) = positions[current].parent().and_then(|p| by_id.get(p)) {
        if !visited.insert(parent) {
            tracing::warn!(
                position_id,
                cycle_at = positions[parent].position_id(),
                "Circular parent reference in organisation structure"
            );
            break;
        }
        path.push(positions[parent].position_id().to_string());
        current = parent;
    }

    path
}

fn first_index_by_id<P: OrgPosition>(positions: &[P]) -> HashMap<&str, usize> {
    let mut by_id = HashMap::with_capacity(positions.len());
    for (idx, p) in positions.iter().enumerate() {
        by_id.entry(p.position_id()).or_insert(idx);
    }
    by_id
}

/// Build the chart forest. Every position appears exactly once.
///
/// Roots are positions without a parent or whose parent id is unknown, in
/// input order. Positions only reachable through an explicit-parent cycle are
/// promoted to roots afterwards, again in input order.
pub fn forest(positions: Vec<Merged<ResolvedPosition>>) -> Vec<OrgNode> {
    let count = positions.len();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];
    let mut roots = Vec::new();

    {
        let by_id = first_index_by_id(&positions);
        for (idx, p) in positions.iter().enumerate() {
            match p.parent().and_then(|id| by_id.get(id)) {
                Some(&parent) if parent != idx => children[parent].push(idx),
                _ => roots.push(idx),
            }
        }
    }

    let mut slots: Vec<Option<Merged<ResolvedPosition>>> =
        positions.into_iter().map(Some).collect();
    let mut visited = vec![false; count];
    let mut trees = Vec::with_capacity(roots.len());

    for root in roots {
        if let Some(node) = build_node(root, &children, &mut visited, &mut slots) {
            trees.push(node);
        }
    }

    for idx in 0..count {
        if visited[idx] {
            continue;
        }
        if let Some(node) = build_node(idx, &children, &mut visited, &mut slots) {
            tracing::warn!(
                position_id = node.position.position_id(),
                subtree = node.size(),
                "Promoting position caught in a parent cycle to root"
            );
            trees.push(node);
        }
    }

    trees
}

struct Frame {
    idx: usize,
    position: Merged<ResolvedPosition>,
    next_child: usize,
    children: Vec<OrgNode>,
}

/// Depth-first build of the subtree under `idx` with an explicit stack, so
/// long parent chains cannot exhaust the call stack
fn build_node(
    idx: usize,
    children: &[Vec<usize>],
    visited: &mut [bool],
    slots: &mut [Option<Merged<ResolvedPosition>>],
) -> Option<OrgNode> {
    if visited[idx] {
        return None;
    }
    visited[idx] = true;
    let mut stack = vec![Frame {
        idx,
        position: slots[idx].take()?,
        next_child: 0,
        children: Vec::new(),
    }];

    loop {
        let next = {
            let top = stack.last_mut()?;
            let child = children[top.idx].get(top.next_child).copied();
            top.next_child += 1;
            child
        };

        match next {
            Some(child) => {
                if visited[child] {
                    continue;
                }
                visited[child] = true;
                if let Some(position) = slots[child].take() {
                    stack.push(Frame {
                        idx: child,
                        position,
                        next_child: 0,
                        children: Vec::new(),
                    });
                }
            }
            None => {
                let done = stack.pop()?;
                let node = OrgNode {
                    position: done.position,
                    children: done.children,
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => return Some(node),
                }
            }
        }
    }
}
