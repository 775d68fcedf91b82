#[cfg(test)]
mod grid_view_scenario_tests {
    use table_cli::data::datatable::{DataValue, Record, RowId};
    use table_cli::data::seed::seed_records;
    use table_cli::data::table_state::TableState;
    use table_cli::state::store::Store;
    use table_cli::ui::grid_view::{GridView, PageSize, ValidationError};
    use table_cli::ui::notifications::NotificationVariant;

    fn seeded() -> (Store, GridView) {
        let store = Store::new(TableState::seeded());
        let view = GridView::new(&store);
        (store, view)
    }

    #[test]
    fn test_third_page_of_five() {
        let (store, mut view) = seeded();
        view.set_page_size(PageSize::Five);
        view.set_page(3);

        // Sorted by name, the last five are Paula..Tina, ids 16-20
        let ids: Vec<String> = view
            .page_rows(&store)
            .iter()
            .map(|r| r.id.to_string())
            .collect();
        assert_eq!(ids, vec!["16", "17", "18", "19", "20"]);
    }

    #[test]
    fn test_manager_search() {
        let (mut store, mut view) = seeded();
        view.set_search(&mut store, "manager");

        let rows = view.filtered_rows(&store);
        assert!(!rows.is_empty());
        for row in &rows {
            assert!(row.display_value("role").contains("Manager"));
        }
        let names: Vec<String> = rows.iter().map(|r| r.display_value("name")).collect();
        assert_eq!(names, vec!["Charlie", "Laura", "Paula"]);
    }

    #[test]
    fn test_clearing_search_restores_everything() {
        let (mut store, mut view) = seeded();
        let all: Vec<RowId> = view.filtered_rows(&store).iter().map(|r| r.id.clone()).collect();

        view.set_search(&mut store, "designer");
        assert_eq!(view.filtered_count(&store), 3);

        view.set_search(&mut store, "   ");
        let restored: Vec<RowId> = view.filtered_rows(&store).iter().map(|r| r.id.clone()).collect();
        assert_eq!(all, restored);
    }

    #[test]
    fn test_non_numeric_age_keeps_cell_open() {
        let (mut store, mut view) = seeded();
        let before = store.state().clone();

        view.toggle_edit_mode();
        assert!(view.begin_edit(&store, &RowId::new("2"), "age"));
        view.set_pending("thirty");

        let err = view.commit_edit(&mut store).unwrap_err();
        assert_eq!(err.to_string(), "Age must be a valid number");
        assert_eq!(store.state(), &before);

        let edit = view.editing().unwrap();
        assert_eq!(edit.pending, "thirty");
        assert_eq!(
            edit.error,
            Some(ValidationError::NotNumeric {
                column: "age".into()
            })
        );

        let notes = view.take_notifications();
        let last = notes.last().unwrap();
        assert_eq!(last.message, "Invalid input: Age must be numeric");
        assert_eq!(last.variant, NotificationVariant::Error);

        // Fixing the text saves it
        view.set_pending("30");
        view.commit_edit(&mut store).unwrap();
        assert!(view.editing().is_none());
        assert_eq!(
            store.state().row(&RowId::new("2")).unwrap().get("age"),
            Some(&DataValue::from("30"))
        );
        assert_eq!(
            view.take_notifications().last().unwrap().message,
            "Changes saved successfully"
        );
    }

    #[test]
    fn test_delete_row_five() {
        let (mut store, mut view) = seeded();
        view.request_delete(&mut store, RowId::new("5"));
        view.confirm_delete(&mut store);

        // Every other record is untouched, field for field
        let expected: Vec<Record> = seed_records()
            .into_iter()
            .filter(|r| r.id.as_str() != "5")
            .collect();
        assert_eq!(store.rows(), expected.as_slice());

        view.request_delete(&mut store, RowId::new("5"));
        view.confirm_delete(&mut store);
        assert_eq!(store.rows(), expected.as_slice());
    }

    #[test]
    fn test_sort_missing_values_as_empty() {
        let (mut store, mut view) = seeded();
        store.dispatch(table_cli::state::events::StoreAction::AddColumn("team".into()));
        view.sort_by_column("team");

        // Nobody has a team, so the order is the original one
        let ids: Vec<String> = view
            .filtered_rows(&store)
            .iter()
            .map(|r| r.id.to_string())
            .collect();
        let expected: Vec<String> = (1..=20).map(|i| i.to_string()).collect();
        assert_eq!(ids, expected);
    }
}
