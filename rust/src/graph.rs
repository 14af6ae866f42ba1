//! Dependency graph construction.
//!
//! Edges point from a dependency to the activities that list it. Every activity
//! starts with an in-degree of 0 and gains one per listed dependency, so a
//! duplicated entry counts twice and a name that no activity defines keeps its
//! dependents from ever becoming ready.

use rustc_hash::FxHashMap;

use crate::log_debug;
use crate::models::Activity;

/// Dense index of a name seen in the activity set, in first-seen order.
pub(crate) type NodeId = u32;

/// Forward edges and in-degrees for one activity set.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    ids: FxHashMap<String, NodeId>,
    names: Vec<String>,
    /// Ids of the activities that depend on each id, in insertion order.
    dependents: Vec<Vec<NodeId>>,
    /// Number of listed dependencies per id.
    in_degree: Vec<usize>,
    /// Index into the activity set of the definition owning each name.
    /// A repeated name is owned by its last definition; referenced-only names have none.
    definition: Vec<Option<usize>>,
}

impl DependencyGraph {
    /// Build the graph for `activities`.
    pub fn build(activities: &[Activity], verbosity: u8) -> Self {
        let mut graph = Self {
            ids: FxHashMap::with_capacity_and_hasher(activities.len(), Default::default()),
            names: Vec::with_capacity(activities.len()),
            dependents: Vec::with_capacity(activities.len()),
            in_degree: Vec::with_capacity(activities.len()),
            definition: Vec::with_capacity(activities.len()),
        };

        for (index, activity) in activities.iter().enumerate() {
            let id = graph.node(&activity.name);
            graph.definition[id as usize] = Some(index);
        }

        for activity in activities {
            let Some(id) = graph.id(&activity.name) else {
                continue;
            };
            for dependency in &activity.dependencies {
                let dep_id = graph.node(dependency);
                graph.dependents[dep_id as usize].push(id);
                graph.in_degree[id as usize] += 1;
                log_debug!(verbosity, "  Edge {:?} -> {:?}", dependency, activity.name);
            }
        }

        graph
    }

    /// Id of `name`, adding an empty node the first time it is seen.
    fn node(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len() as NodeId;
        self.ids.insert(name.to_string(), id);
        self.names.push(name.to_string());
        self.dependents.push(Vec::new());
        self.in_degree.push(0);
        self.definition.push(None);
        id
    }

    /// In-degree of a defined activity.
    pub fn in_degree(&self, name: &str) -> Option<usize> {
        let id = self.id(name)?;
        self.definition[id as usize].map(|_| self.in_degree[id as usize])
    }

    /// Names of the activities listing `name` as a dependency, one entry per listing.
    pub fn dependents(&self, name: &str) -> Vec<&str> {
        self.id(name)
            .map(|id| {
                self.dependents[id as usize]
                    .iter()
                    .filter_map(|&dep| self.names.get(dep as usize))
                    .map(String::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether some activity in the set carries `name`.
    pub fn is_defined(&self, name: &str) -> bool {
        self.id(name)
            .is_some_and(|id| self.definition[id as usize].is_some())
    }

    /// Number of distinct defined activity names.
    pub fn activity_count(&self) -> usize {
        self.definition.iter().filter(|d| d.is_some()).count()
    }

    #[inline]
    pub(crate) fn id(&self, name: &str) -> Option<NodeId> {
        self.ids.get(name).copied()
    }

    #[inline]
    pub(crate) fn definition_of(&self, id: NodeId) -> Option<usize> {
        self.definition.get(id as usize).copied().flatten()
    }

    #[inline]
    pub(crate) fn dependents_of(&self, id: NodeId) -> &[NodeId] {
        self.dependents
            .get(id as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Working copy of the in-degree table, indexed by id.
    pub(crate) fn in_degrees(&self) -> Vec<usize> {
        self.in_degree.clone()
    }
}
