use std::collections::{HashMap, HashSet, VecDeque};

use crate::types::Direction;

/// Directional neighbors of a panel.
///
/// Links are directed and need not be symmetric; a link to an id that is
/// not currently registered resolves to "no adjacent panel" rather than
/// an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelLinks {
    pub left: Option<String>,
    pub right: Option<String>,
    pub up: Option<String>,
    pub down: Option<String>,
}

impl PanelLinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn left(mut self, id: impl Into<String>) -> Self {
        self.left = Some(id.into());
        self
    }

    pub fn right(mut self, id: impl Into<String>) -> Self {
        self.right = Some(id.into());
        self
    }

    pub fn up(mut self, id: impl Into<String>) -> Self {
        self.up = Some(id.into());
        self
    }

    pub fn down(mut self, id: impl Into<String>) -> Self {
        self.down = Some(id.into());
        self
    }

    fn get(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::Left => self.left.as_deref(),
            Direction::Right => self.right.as_deref(),
            Direction::Up => self.up.as_deref(),
            Direction::Down => self.down.as_deref(),
        }
    }

    fn scrub(&mut self, id: &str) {
        for slot in [&mut self.left, &mut self.right, &mut self.up, &mut self.down] {
            if slot.as_deref() == Some(id) {
                *slot = None;
            }
        }
    }

    fn neighbors(&self) -> impl Iterator<Item = &str> {
        [&self.left, &self.right, &self.up, &self.down]
            .into_iter()
            .filter_map(|slot| slot.as_deref())
    }
}

/// The spatial adjacency graph of focusable panels.
///
/// Created once per session; individual panels come and go as host
/// components mount and unmount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelRegistry {
    panels: HashMap<String, PanelLinks>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a panel. Re-registering an existing id is
    /// allowed (last write wins) but usually indicates a lifecycle bug in
    /// the host layer, so it is logged.
    pub fn register(&mut self, id: impl Into<String>, links: PanelLinks) {
        let id = id.into();
        if self.panels.contains_key(&id) {
            tracing::warn!(panel = %id, "panel re-registered; overwriting previous links");
        }
        self.panels.insert(id, links);
    }

    /// Removes a panel and scrubs it out of every other panel's links.
    /// Idempotent: unregistering an unknown id is a no-op.
    pub fn unregister(&mut self, id: &str) {
        self.panels.remove(id);
        for links in self.panels.values_mut() {
            links.scrub(id);
        }
    }

    /// The neighbor of `id` in `direction`, iff the panel exists, the link
    /// is populated, and the linked panel is currently registered.
    pub fn find_adjacent(&self, id: &str, direction: Direction) -> Option<&str> {
        let target = self.panels.get(id)?.get(direction)?;
        if self.panels.contains_key(target) {
            Some(target)
        } else {
            None
        }
    }

    /// The raw links of a panel, stale references included.
    pub fn links(&self, id: &str) -> Option<&PanelLinks> {
        self.panels.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.panels.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Registered panel ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.panels.keys().map(String::as_str)
    }

    /// True iff every registered panel is reachable from every other,
    /// treating any populated link as an undirected edge.
    ///
    /// Diagnostic only: registration never fails because of disconnection.
    pub fn validate_connectivity(&self) -> bool {
        let Some(start) = self.panels.keys().next() else {
            return true;
        };

        // Undirected reachability, so collect inbound edges too.
        let mut edges: HashMap<&str, Vec<&str>> = HashMap::new();
        for (id, links) in &self.panels {
            for neighbor in links.neighbors() {
                if self.panels.contains_key(neighbor) {
                    edges.entry(id.as_str()).or_default().push(neighbor);
                    edges.entry(neighbor).or_default().push(id.as_str());
                }
            }
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        seen.insert(start.as_str());
        queue.push_back(start.as_str());
        while let Some(id) = queue.pop_front() {
            if let Some(neighbors) = edges.get(id) {
                for &neighbor in neighbors {
                    if seen.insert(neighbor) {
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        seen.len() == self.panels.len()
    }
}
