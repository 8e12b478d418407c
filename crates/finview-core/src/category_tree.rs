//! Arena-backed category forest with pre-order traversal and lookup helpers.

use std::collections::{HashMap, HashSet};

use finview_domain::{Category, CategoryId, CategoryPayload, CategoryRow, CategoryStats};

use crate::{CoreError, CoreResult};

/// Deepest nesting accepted from the backend before the forest is rejected.
pub const MAX_DEPTH: usize = 64;

/// Category forest indexed by id. Nodes reference parents and children by id only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTree {
    nodes: Vec<Category>,
    index: HashMap<CategoryId, usize>,
    roots: Vec<CategoryId>,
}

impl CategoryTree {
    /// Validates a nested backend forest and indexes it.
    ///
    /// Fails with [`CoreError::MalformedHierarchy`] when a node has no id, an id
    /// repeats (which is how a cycle shows up in nested data), or nesting exceeds
    /// [`MAX_DEPTH`]; fails with [`CoreError::Validation`] for a node without a name.
    pub fn from_payloads(roots: &[CategoryPayload]) -> CoreResult<Self> {
        let mut tree = CategoryTree::default();
        let mut stack: Vec<(&CategoryPayload, Option<CategoryId>, usize)> =
            roots.iter().rev().map(|payload| (payload, None, 1)).collect();

        while let Some((payload, parent_id, depth)) = stack.pop() {
            if depth > MAX_DEPTH {
                return Err(CoreError::MalformedHierarchy(format!(
                    "nesting exceeds {MAX_DEPTH} levels below category {}",
                    parent_id.map_or_else(|| "<root>".to_string(), |id| id.to_string())
                )));
            }
            let id = payload.id.map(CategoryId).ok_or_else(|| {
                CoreError::MalformedHierarchy(match parent_id {
                    Some(parent) => format!("child of category {parent} has no id"),
                    None => "root category has no id".to_string(),
                })
            })?;
            if tree.index.contains_key(&id) {
                return Err(CoreError::MalformedHierarchy(format!(
                    "category {id} appears more than once"
                )));
            }
            let name = payload
                .name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| CoreError::Validation(format!("category {id} has no name")))?;

            let children = payload.children();
            let node = Category {
                id,
                name: name.to_string(),
                description: payload.description.clone(),
                color: payload.color.clone(),
                icon: payload.icon.clone(),
                budget_amount: payload.budget_amount,
                is_active: payload.is_active.unwrap_or(true),
                parent_id,
                child_ids: children
                    .iter()
                    .filter_map(|child| child.id.map(CategoryId))
                    .collect(),
            };
            if parent_id.is_none() {
                tree.roots.push(id);
            }
            tree.index.insert(id, tree.nodes.len());
            tree.nodes.push(node);

            for child in children.iter().rev() {
                stack.push((child, Some(id), depth + 1));
            }
        }

        tracing::debug!(
            categories = tree.nodes.len(),
            roots = tree.roots.len(),
            "category tree indexed"
        );
        Ok(tree)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> Vec<&Category> {
        self.roots.iter().filter_map(|id| self.find_by_id(*id)).collect()
    }

    /// Pre-order traversal: every node precedes its children, siblings keep backend order.
    pub fn flatten(&self) -> Vec<&Category> {
        self.walk().into_iter().map(|(category, _)| category).collect()
    }

    /// Absence is a normal outcome, e.g. "no parent selected".
    pub fn find_by_id(&self, id: CategoryId) -> Option<&Category> {
        self.index.get(&id).map(|&slot| &self.nodes[slot])
    }

    pub fn parent_of(&self, id: CategoryId) -> Option<&Category> {
        self.find_by_id(id)
            .and_then(|category| category.parent_id)
            .and_then(|parent| self.find_by_id(parent))
    }

    pub fn children_of(&self, id: CategoryId) -> Vec<&Category> {
        self.find_by_id(id)
            .map(|category| {
                category
                    .child_ids
                    .iter()
                    .filter_map(|child| self.find_by_id(*child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Root-to-node chain, empty when `id` is unknown.
    pub fn path_to(&self, id: CategoryId) -> Vec<&Category> {
        let mut path = Vec::new();
        let mut cursor = self.find_by_id(id);
        while let Some(category) = cursor {
            path.push(category);
            cursor = category.parent_id.and_then(|parent| self.find_by_id(parent));
        }
        path.reverse();
        path
    }

    /// One-based depth of `id`; roots sit at depth 1.
    pub fn depth_of(&self, id: CategoryId) -> Option<usize> {
        let path = self.path_to(id);
        (!path.is_empty()).then_some(path.len())
    }

    /// Every node below `id`, in pre-order. Does not include `id` itself.
    pub fn descendant_ids(&self, id: CategoryId) -> Vec<CategoryId> {
        let mut out = Vec::new();
        let mut stack: Vec<CategoryId> = self
            .find_by_id(id)
            .map(|category| category.child_ids.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(current) = stack.pop() {
            out.push(current);
            if let Some(category) = self.find_by_id(current) {
                stack.extend(category.child_ids.iter().rev().copied());
            }
        }
        out
    }

    /// Parent-selector candidates when editing `excluded`.
    ///
    /// Only the node itself is removed; its descendants stay selectable, so a
    /// caller can still reparent a category under its own grandchild. Use
    /// [`CategoryTree::descendant_ids`] to detect that case.
    pub fn excluding_subtree(&self, excluded: CategoryId) -> Vec<&Category> {
        self.flatten()
            .into_iter()
            .filter(|category| category.id != excluded)
            .collect()
    }

    /// Maximum depth of the forest; 0 when empty.
    pub fn count_levels(&self) -> usize {
        self.walk()
            .into_iter()
            .map(|(_, level)| level + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn stats(&self) -> CategoryStats {
        CategoryStats {
            total_categories: self.nodes.len(),
            total_budget: self.nodes.iter().map(Category::budget_or_zero).sum(),
            active_categories: self.nodes.iter().filter(|c| c.is_active).count(),
        }
    }

    /// Visible rows for the tree view: children appear only under expanded parents.
    pub fn rows(&self, expansion: &ExpansionState) -> Vec<CategoryRow> {
        let total_budget = self.stats().total_budget;
        let mut rows = Vec::new();
        let mut stack: Vec<(CategoryId, usize)> =
            self.roots.iter().rev().map(|id| (*id, 0)).collect();
        while let Some((id, level)) = stack.pop() {
            let Some(category) = self.find_by_id(id) else {
                continue;
            };
            let expanded = expansion.is_expanded(id);
            rows.push(CategoryRow::from_category(
                category,
                level,
                expanded,
                total_budget,
            ));
            if expanded {
                stack.extend(category.child_ids.iter().rev().map(|child| (*child, level + 1)));
            }
        }
        rows
    }

    /// Pre-order walk yielding each node with its zero-based level.
    fn walk(&self) -> Vec<(&Category, usize)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(CategoryId, usize)> =
            self.roots.iter().rev().map(|id| (*id, 0)).collect();
        while let Some((id, level)) = stack.pop() {
            if let Some(category) = self.find_by_id(id) {
                out.push((category, level));
                stack.extend(category.child_ids.iter().rev().map(|child| (*child, level + 1)));
            }
        }
        out
    }
}

/// UI-only expand/collapse state for the tree view. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<CategoryId>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: CategoryId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn expand(&mut self, id: CategoryId) {
        self.expanded.insert(id);
    }

    pub fn collapse(&mut self, id: CategoryId) {
        self.expanded.remove(&id);
    }

    /// Flips the node and returns its new state.
    pub fn toggle(&mut self, id: CategoryId) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    pub fn expand_all(&mut self, tree: &CategoryTree) {
        self.expanded.extend(
            tree.flatten()
                .into_iter()
                .filter(|category| category.has_children())
                .map(|category| category.id),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_forest() -> Vec<CategoryPayload> {
        vec![
            CategoryPayload::new(1, "Living")
                .with_budget_amount(600.0)
                .with_children(vec![
                    CategoryPayload::new(2, "Rent").with_budget_amount(300.0),
                    CategoryPayload::new(3, "Utilities").with_children(vec![
                        CategoryPayload::new(4, "Power").inactive(),
                    ]),
                ]),
            CategoryPayload::new(5, "Leisure").with_budget_amount(100.0),
        ]
    }

    fn ids(categories: &[&Category]) -> Vec<i64> {
        categories.iter().map(|category| category.id.get()).collect()
    }

    #[test]
    fn flatten_is_preorder_and_complete() {
        let tree = CategoryTree::from_payloads(&sample_forest()).expect("valid forest");
        let flat = tree.flatten();

        assert_eq!(ids(&flat), vec![1, 2, 3, 4, 5]);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn parent_lookups_resolve_by_id() {
        let tree = CategoryTree::from_payloads(&sample_forest()).expect("valid forest");

        assert_eq!(tree.parent_of(CategoryId(4)).map(|c| c.id), Some(CategoryId(3)));
        assert!(tree.parent_of(CategoryId(1)).is_none());
        assert_eq!(ids(&tree.children_of(CategoryId(1))), vec![2, 3]);
        assert_eq!(ids(&tree.path_to(CategoryId(4))), vec![1, 3, 4]);
        assert_eq!(tree.depth_of(CategoryId(4)), Some(3));
        assert!(tree.find_by_id(CategoryId(99)).is_none());
    }

    #[test]
    fn excluding_subtree_only_drops_the_node_itself() {
        let tree = CategoryTree::from_payloads(&sample_forest()).expect("valid forest");
        let candidates = tree.excluding_subtree(CategoryId(1));

        assert_eq!(ids(&candidates), vec![2, 3, 4, 5]);
        assert_eq!(
            tree.descendant_ids(CategoryId(1)),
            vec![CategoryId(2), CategoryId(3), CategoryId(4)]
        );
    }

    #[test]
    fn count_levels_reports_max_depth() {
        let tree = CategoryTree::from_payloads(&sample_forest()).expect("valid forest");
        assert_eq!(tree.count_levels(), 3);

        let empty = CategoryTree::from_payloads(&[]).expect("empty forest");
        assert_eq!(empty.count_levels(), 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn repeated_id_is_rejected_as_malformed() {
        let forest = vec![CategoryPayload::new(1, "Loop")
            .with_children(vec![CategoryPayload::new(1, "Loop again")])];
        let err = CategoryTree::from_payloads(&forest).expect_err("cycle must fail");
        assert!(matches!(err, CoreError::MalformedHierarchy(_)));
    }

    #[test]
    fn missing_id_is_rejected_as_malformed() {
        let forest = vec![CategoryPayload::new(1, "Parent").with_children(vec![
            CategoryPayload {
                name: Some("Orphan".into()),
                ..CategoryPayload::default()
            },
        ])];
        let err = CategoryTree::from_payloads(&forest).expect_err("missing id must fail");
        let message = err.to_string();
        assert!(message.contains("child of category 1"), "unexpected: {message}");
    }

    #[test]
    fn excessive_nesting_is_bounded() {
        let mut node = CategoryPayload::new(1_000, "Leaf");
        for id in (0..(MAX_DEPTH as i64 + 5)).rev() {
            node = CategoryPayload::new(id, format!("Level {id}")).with_children(vec![node]);
        }
        let err = CategoryTree::from_payloads(&[node]).expect_err("too deep");
        assert!(matches!(err, CoreError::MalformedHierarchy(_)));
    }

    #[test]
    fn rows_follow_expansion_state() {
        let tree = CategoryTree::from_payloads(&sample_forest()).expect("valid forest");
        let mut expansion = ExpansionState::new();

        let collapsed = tree.rows(&expansion);
        assert_eq!(collapsed.len(), 2);

        assert!(expansion.toggle(CategoryId(1)));
        let rows = tree.rows(&expansion);
        let names: Vec<_> = rows.iter().map(|row| row.name.as_str()).collect();
        assert_eq!(names, vec!["Living", "Rent", "Utilities", "Leisure"]);
        assert_eq!(rows[1].level, 1);
        assert!((rows[0].budget_share - 60.0).abs() < 1e-9);

        expansion.expand_all(&tree);
        assert_eq!(tree.rows(&expansion).len(), 5);
    }

    #[test]
    fn stats_count_active_and_budget() {
        let tree = CategoryTree::from_payloads(&sample_forest()).expect("valid forest");
        let stats = tree.stats();

        assert_eq!(stats.total_categories, 5);
        assert_eq!(stats.active_categories, 4);
        assert!((stats.total_budget - 1000.0).abs() < 1e-9);
    }
}
