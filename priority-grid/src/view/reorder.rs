//! Drag-reorder and priority renumbering

use log::debug;

use super::ViewState;
use crate::persist::PersistenceRequest;

impl ViewState {
    /// Moves the row displayed at `from` to the displayed position `to`.
    ///
    /// After the move every row gets priority `position + 1` and one
    /// [`PersistenceRequest`] per row is returned. The new order is applied
    /// locally right away; nothing waits on the host.
    ///
    /// Nothing happens (and no requests are returned) when `to` is `None`,
    /// equals `from`, or either index is out of bounds, or when a search
    /// filter is active and [`GridConfig::reorder_while_filtered`] is off.
    /// While a column sort is active the sorted order is adopted as the new
    /// priority order and the sort is cleared, so the row lands where it was
    /// dropped.
    ///
    /// [`GridConfig::reorder_while_filtered`]: crate::GridConfig::reorder_while_filtered
    pub fn reorder(mut self, from: usize, to: Option<usize>) -> (Self, Vec<PersistenceRequest>) {
        let Some(to) = to else {
            return (self, Vec::new());
        };
        if from == to {
            return (self, Vec::new());
        }
        let len = self.visible.len();
        if from >= len || to >= len {
            debug!("Ignoring reorder {} -> {} outside {} visible rows", from, to, len);
            return (self, Vec::new());
        }
        if self.is_filtering() && !self.config.reorder_while_filtered {
            debug!("Ignoring reorder {} -> {} while filtered", from, to);
            return (self, Vec::new());
        }

        if self.sort_column.is_some() {
            self = self.adopt_sorted_order();
        }

        let from_pos = self.visible[from];
        let to_pos = self.visible[to];
        let moved = self.rows.remove(from_pos);
        self.rows.insert(to_pos, moved);

        let requests = self.renumber();
        debug!(
            "Moved row {} -> {}, renumbered {} rows",
            from_pos,
            to_pos,
            requests.len()
        );

        (self.derive(), requests)
    }

    /// Makes the displayed sort order the priority order and clears the sort.
    fn adopt_sorted_order(mut self) -> Self {
        let order = self.sort_positions((0..self.rows.len()).collect());
        let mut slots: Vec<_> = std::mem::take(&mut self.rows).into_iter().map(Some).collect();
        self.rows = order.into_iter().filter_map(|i| slots[i].take()).collect();
        self.sort_column = None;
        self.sort_descending = false;
        self.derive()
    }

    /// Assigns `position + 1` to every row and builds the matching write requests.
    fn renumber(&mut self) -> Vec<PersistenceRequest> {
        let field = self.config.priority_field.clone();
        self.rows
            .iter_mut()
            .enumerate()
            .map(|(position, row)| {
                let priority = position as i64 + 1;
                if let Some(display) = row.fields.get_mut(&field) {
                    *display = priority.to_string();
                }
                PersistenceRequest::new(row.reference.clone(), &field, priority)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::GridConfig;
    use crate::ViewState;
    use crate::model::RecordReference;
    use crate::model::Row;

    fn state(names: &[&str]) -> ViewState {
        let rows = names
            .iter()
            .map(|name| {
                Row::new(RecordReference::new("tasks", *name))
                    .with_field("name", *name)
                    .with_field("sort_order", "0")
            })
            .collect();
        ViewState::new(GridConfig::default()).set_records(rows)
    }

    fn row_ids(state: &ViewState) -> Vec<&str> {
        state.rows().iter().map(|r| r.id.as_str()).collect()
    }

    fn visible_ids(state: &ViewState) -> Vec<&str> {
        state.visible_rows().iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_move_down_uses_splice_semantics() {
        let (state, requests) = state(&["a", "b", "c", "d"]).reorder(0, Some(2));

        assert_eq!(row_ids(&state), vec!["b", "c", "a", "d"]);
        assert_eq!(visible_ids(&state), vec!["b", "c", "a", "d"]);
        let written: Vec<(&str, i64)> = requests
            .iter()
            .map(|r| (r.reference.id.as_str(), r.value))
            .collect();
        assert_eq!(written, vec![("b", 1), ("c", 2), ("a", 3), ("d", 4)]);
    }

    #[test]
    fn test_move_up() {
        let (state, _) = state(&["a", "b", "c", "d"]).reorder(3, Some(1));
        assert_eq!(row_ids(&state), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn test_every_move_renumbers_densely() {
        let names = ["a", "b", "c", "d", "e"];
        for from in 0..names.len() {
            for to in 0..names.len() {
                if from == to {
                    continue;
                }
                let (state, requests) = state(&names).reorder(from, Some(to));

                let values: Vec<i64> = requests.iter().map(|r| r.value).collect();
                assert_eq!(values, vec![1, 2, 3, 4, 5], "move {from} -> {to}");
                let order: Vec<&str> = requests.iter().map(|r| r.reference.id.as_str()).collect();
                assert_eq!(order, row_ids(&state), "move {from} -> {to}");
                assert!(requests.iter().all(|r| r.field == "sort_order"));
            }
        }
    }

    #[test]
    fn test_priority_column_updated_optimistically() {
        let (state, _) = state(&["a", "b"]).reorder(1, Some(0));

        let shown: Vec<&str> = state.rows().iter().map(|r| r.field("sort_order")).collect();
        assert_eq!(shown, vec!["1", "2"]);
    }

    #[test]
    fn test_noop_guards() {
        let original = state(&["a", "b", "c"]);

        for (from, to) in [(1, Some(1)), (1, None), (0, Some(3)), (5, Some(0))] {
            let (state, requests) = original.clone().reorder(from, to);
            assert!(requests.is_empty(), "{from} -> {to:?}");
            assert_eq!(row_ids(&state), vec!["a", "b", "c"]);
            assert_eq!(visible_ids(&state), vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn test_rejected_while_filtered() {
        let (state, requests) = state(&["alpha", "beta", "alphabet"])
            .set_search_text("alp")
            .reorder(1, Some(0));

        assert!(requests.is_empty());
        assert_eq!(row_ids(&state), vec!["alpha", "beta", "alphabet"]);
    }

    #[test]
    fn test_filtered_reorder_maps_to_rows_when_allowed() {
        let rows = ["alpha", "beta", "gamma", "alphabet"]
            .iter()
            .map(|name| Row::new(RecordReference::new("tasks", *name)).with_field("name", *name))
            .collect();
        let state = ViewState::new(GridConfig::default().with_reorder_while_filtered(true))
            .set_records(rows)
            .set_search_text("alp");

        let (state, requests) = state.reorder(1, Some(0));

        assert_eq!(row_ids(&state), vec!["alphabet", "alpha", "beta", "gamma"]);
        assert_eq!(visible_ids(&state), vec!["alphabet", "alpha"]);
        assert_eq!(requests.len(), 4);
    }

    #[test]
    fn test_sorted_reorder_adopts_displayed_order() {
        let state = state(&["b", "c", "a"]).sort_by("name");
        assert_eq!(visible_ids(&state), vec!["a", "b", "c"]);

        let (state, requests) = state.reorder(2, Some(0));

        assert_eq!(state.sort_column(), None);
        assert_eq!(row_ids(&state), vec!["c", "a", "b"]);
        assert_eq!(visible_ids(&state), vec!["c", "a", "b"]);
        let order: Vec<&str> = requests.iter().map(|r| r.reference.id.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_search_text_survives_reorder() {
        let (state, _) = state(&["a", "b"]).set_search_text("a").reorder(0, Some(1));
        assert_eq!(state.search_text(), "a");
    }
}
