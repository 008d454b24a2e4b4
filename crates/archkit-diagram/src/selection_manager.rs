//! Node selection state

use std::collections::HashSet;

/// Manages node selection state and selection operations.
///
/// `SelectionManager` is responsible for:
/// - Tracking the ordered set of selected node ids
/// - Click selection with and without the multi-select modifier
/// - Toggling, replacing, and clearing the selection
///
/// # Selection Model
///
/// - Ids are kept in selection order; the most recently selected id is the
///   "primary" selection that property panels show
/// - Plain click replaces the selection; clicking the only selected node
///   again clears it
/// - Multi-select (Shift/Cmd) toggles one id without touching the rest
///
/// # Design
///
/// The manager never looks at the diagram itself. The canvas orchestrator
/// is responsible for calling [`SelectionManager::prune`] whenever nodes
/// are removed, which keeps the invariant that every selected id names a
/// live node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionManager {
    /// Selected node ids in selection order, no duplicates
    selected: Vec<String>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with nothing selected.
    ///
    /// # Examples
    ///
    /// ```
    /// use archkit_diagram::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert!(manager.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selected ids in selection order.
    pub fn ids(&self) -> &[String] {
        &self.selected
    }

    /// Returns the primary (most recently selected) id, if any.
    pub fn primary(&self) -> Option<&str> {
        self.selected.last().map(String::as_str)
    }

    /// Returns whether an id is currently selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Returns the number of selected ids.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Returns whether more than one id is selected.
    pub fn is_multiple(&self) -> bool {
        self.selected.len() > 1
    }

    /// Click-toggles an id.
    ///
    /// # Arguments
    ///
    /// * `id` - The clicked node id
    /// * `multi` - Whether the multi-select modifier was held
    ///
    /// # Behavior
    ///
    /// - `multi = false`: clicking the node that is already the only
    ///   selection clears the selection; clicking anything else makes it
    ///   the sole selection
    /// - `multi = true`: removes the id if selected, appends it otherwise;
    ///   other selected ids are unaffected
    pub fn toggle_node(&mut self, id: &str, multi: bool) {
        if multi {
            if let Some(pos) = self.selected.iter().position(|s| s == id) {
                self.selected.remove(pos);
            } else {
                self.selected.push(id.to_string());
            }
        } else if self.selected.len() == 1 && self.selected[0] == id {
            self.selected.clear();
        } else {
            self.selected.clear();
            self.selected.push(id.to_string());
        }
    }

    /// Selects an id without toggle semantics.
    ///
    /// # Arguments
    ///
    /// * `id` - The node id to select
    /// * `multi` - If `false`, replaces the selection with `{id}`; if
    ///   `true`, appends the id when absent and leaves the selection
    ///   unchanged when already present
    pub fn select_node(&mut self, id: &str, multi: bool) {
        if multi {
            if !self.is_selected(id) {
                self.selected.push(id.to_string());
            }
        } else {
            self.selected.clear();
            self.selected.push(id.to_string());
        }
    }

    /// Replaces the selection with the given ids, dropping duplicates
    /// while keeping first-occurrence order.
    pub fn replace<I>(&mut self, ids: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.selected.clear();
        let mut seen: HashSet<String> = HashSet::new();
        for id in ids {
            let id = id.into();
            if seen.insert(id.clone()) {
                self.selected.push(id);
            }
        }
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drops selected ids that no longer name a live node.
    ///
    /// The orchestrator calls this after every node removal so the
    /// selection never references a deleted node.
    pub fn prune(&mut self, live: &HashSet<&str>) {
        self.selected.retain(|id| live.contains(id.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_without_multi_replaces() {
        let mut sel = SelectionManager::new();
        sel.toggle_node("a", false);
        assert_eq!(sel.ids(), ["a"]);
        sel.toggle_node("b", false);
        assert_eq!(sel.ids(), ["b"]);
    }

    #[test]
    fn toggle_sole_selection_clears() {
        let mut sel = SelectionManager::new();
        sel.toggle_node("a", false);
        sel.toggle_node("a", false);
        assert!(sel.is_empty());
    }

    #[test]
    fn toggle_with_multi_adds_and_removes() {
        let mut sel = SelectionManager::new();
        sel.toggle_node("a", true);
        sel.toggle_node("b", true);
        assert_eq!(sel.ids(), ["a", "b"]);
        sel.toggle_node("a", true);
        assert_eq!(sel.ids(), ["b"]);
    }

    #[test]
    fn toggle_multi_on_multi_selection_keeps_others() {
        let mut sel = SelectionManager::new();
        sel.toggle_node("a", true);
        sel.toggle_node("b", true);
        sel.toggle_node("c", true);
        // plain click on a member collapses to just that member
        sel.toggle_node("b", false);
        assert_eq!(sel.ids(), ["b"]);
    }

    #[test]
    fn select_node_multi_is_idempotent() {
        let mut sel = SelectionManager::new();
        sel.select_node("a", true);
        sel.select_node("a", true);
        assert_eq!(sel.ids(), ["a"]);
    }

    #[test]
    fn primary_is_most_recent() {
        let mut sel = SelectionManager::new();
        sel.select_node("a", true);
        sel.select_node("b", true);
        assert_eq!(sel.primary(), Some("b"));
    }

    #[test]
    fn replace_deduplicates() {
        let mut sel = SelectionManager::new();
        sel.replace(["a", "b", "a", "c"]);
        assert_eq!(sel.ids(), ["a", "b", "c"]);
    }

    #[test]
    fn prune_drops_dead_ids() {
        let mut sel = SelectionManager::new();
        sel.replace(["a", "b", "c"]);
        let live: HashSet<&str> = ["a", "c"].into_iter().collect();
        sel.prune(&live);
        assert_eq!(sel.ids(), ["a", "c"]);
    }
}
