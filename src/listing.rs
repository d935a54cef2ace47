//! Data for a generic entity listing component (grid/table of items with
//! search, sort and actions).

use crate::mixins::Filtering;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SortOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SortOption {
    pub fn new(value: &str, label: &str) -> Self {
        SortOption {
            value: value.to_string(),
            label: label.to_string(),
            selected: false,
        }
    }
}

/// Items are serialized as-is; templates read their fields directly.
#[derive(Clone, Debug, Serialize)]
pub struct EntityListing<T> {
    pub title: String,
    pub subtitle: String,
    pub create_url: String,
    pub create_label: String,

    /// "grid" or "list".
    pub view_mode: String,
    /// localStorage key remembering the view mode.
    pub view_mode_storage_key: String,
    pub enable_view_toggle: bool,
    pub grid_container_id: String,
    pub search_input_id: String,
    pub sort_select_id: String,
    pub search_placeholder: String,

    pub view_url: String,
    pub edit_url: String,
    pub delete_url: String,
    pub search_url: String,
    pub refresh_url: String,

    pub sort_options: Vec<SortOption>,
    pub items: Vec<T>,

    pub show_actions: bool,
    pub htmx_enabled: bool,
    pub refresh_trigger: String,

    pub empty_title: String,
    pub empty_message: String,
}

impl<T> EntityListing<T> {
    pub fn new(title: &str, view_url: &str) -> Self {
        EntityListing {
            title: title.to_string(),
            subtitle: String::new(),
            create_url: String::new(),
            create_label: String::new(),
            view_mode: "grid".to_string(),
            view_mode_storage_key: "entity-view-mode".to_string(),
            enable_view_toggle: true,
            grid_container_id: "entity-grid".to_string(),
            search_input_id: "search-entities".to_string(),
            sort_select_id: "sort-entities".to_string(),
            search_placeholder: "Search...".to_string(),
            view_url: view_url.to_string(),
            edit_url: String::new(),
            delete_url: String::new(),
            search_url: String::new(),
            refresh_url: String::new(),
            sort_options: vec![
                SortOption {
                    selected: true,
                    ..SortOption::new("updated", "Last Modified")
                },
                SortOption::new("name", "Name"),
                SortOption::new("created", "Date Created"),
            ],
            items: Vec::new(),
            show_actions: true,
            htmx_enabled: false,
            refresh_trigger: String::new(),
            empty_title: String::new(),
            empty_message: String::new(),
        }
    }

    pub fn with_create(mut self, url: &str, label: &str) -> Self {
        self.create_url = url.to_string();
        self.create_label = label.to_string();
        self
    }

    pub fn with_edit(mut self, url: &str) -> Self {
        self.edit_url = url.to_string();
        self
    }

    pub fn with_delete(mut self, url: &str) -> Self {
        self.delete_url = url.to_string();
        self
    }

    pub fn with_htmx(mut self, search_url: &str) -> Self {
        self.htmx_enabled = true;
        self.search_url = search_url.to_string();
        self
    }

    pub fn with_items(mut self, items: Vec<T>) -> Self {
        self.items = items;
        self
    }

    /// Select the sort option and view mode the visitor asked for. Unknown
    /// sort values leave the current selection alone.
    pub fn with_filtering(mut self, filtering: &Filtering) -> Self {
        if self.sort_options.iter().any(|o| o.value == filtering.sort) {
            for option in &mut self.sort_options {
                option.selected = option.value == filtering.sort;
            }
        }
        if !filtering.view_mode.is_empty() {
            self.view_mode = filtering.view_mode.clone();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_builders() {
        let listing: EntityListing<u32> = EntityListing::new("Maps", "/maps")
            .with_create("/maps/new", "New map")
            .with_edit("/maps/edit")
            .with_delete("/maps/delete")
            .with_htmx("/maps/search")
            .with_items(vec![1, 2]);
        assert_eq!(listing.view_mode, "grid");
        assert_eq!(listing.create_label, "New map");
        assert!(listing.htmx_enabled);
        assert_eq!(listing.search_url, "/maps/search");
        assert_eq!(listing.items, vec![1, 2]);
        let selected: Vec<_> = listing.sort_options.iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value, "updated");
    }

    #[test]
    fn filtering_moves_selection() {
        let filtering = Filtering {
            query: String::new(),
            sort: "name".into(),
            view_mode: "table".into(),
        };
        let listing: EntityListing<()> = EntityListing::new("Maps", "/maps").with_filtering(&filtering);
        assert_eq!(listing.view_mode, "table");
        let selected: Vec<_> = listing.sort_options.iter().filter(|o| o.selected).map(|o| o.value.as_str()).collect();
        assert_eq!(selected, vec!["name"]);

        let unknown = Filtering {
            sort: "modified_desc".into(),
            ..filtering
        };
        let listing: EntityListing<()> = EntityListing::new("Maps", "/maps").with_filtering(&unknown);
        assert!(listing.sort_options[0].selected);
    }
}
