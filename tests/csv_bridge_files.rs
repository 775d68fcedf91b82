#[cfg(test)]
mod csv_bridge_file_tests {
    use std::io::Write;
    use table_cli::data::csv_bridge::{CsvBridge, ExportError, ImportError, ImportOptions};
    use table_cli::state::events::StoreAction;
    use table_cli::state::store::Store;
    use table_cli::data::table_state::TableState;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_export_file_writes_visible_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table_export.csv");
        let store = Store::new(TableState::seeded());
        let columns = vec!["role".to_string(), "name".to_string()];

        let written = CsvBridge::export_file(store.rows(), &columns, &path).unwrap();
        assert_eq!(written, 20);

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("role,name"));
        assert_eq!(lines.next(), Some("Developer,Alice"));
    }

    #[test]
    fn test_import_replaces_rows_but_not_columns() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "name,department
Zed,Ops
Yara,Sales"
        )
        .unwrap();
        file.flush().unwrap();

        let mut store = Store::new(TableState::seeded());
        let rows = CsvBridge::import_file(file.path(), &ImportOptions::default()).unwrap();
        store.dispatch(StoreAction::SetRows(rows));

        assert_eq!(store.rows().len(), 2);
        assert_eq!(store.columns(), ["name", "email", "age", "role"]);
        assert_eq!(store.rows()[1].display_value("department"), "Sales");
    }

    #[test]
    fn test_failed_import_changes_nothing() {
        let file = NamedTempFile::new().unwrap();
        let store = Store::new(TableState::seeded());

        let err = CsvBridge::import_file(file.path(), &ImportOptions::default()).unwrap_err();
        assert!(matches!(err, ImportError::Empty));
        assert_eq!(err.to_string(), "CSV file is empty or has invalid format.");
        assert_eq!(store.rows().len(), 20);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = CsvBridge::import_file(&dir.path().join("nope.csv"), &ImportOptions::default())
            .unwrap_err();
        assert!(matches!(err, ImportError::Read { .. }));
    }

    #[test]
    fn test_export_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        let err = CsvBridge::export_file(&[], &["name".to_string()], &path).unwrap_err();
        assert!(matches!(err, ExportError::NoData));
        assert_eq!(err.to_string(), "No data to export.");
        assert!(!path.exists());
    }

    #[test]
    fn test_strict_import_reports_row() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "Name,Email,Age,Role
Ann,ann@example.com,41,CTO
Ben,ben@example.com,forty,Dev"
        )
        .unwrap();
        file.flush().unwrap();

        let options = ImportOptions::strict(
            vec!["name".into(), "email".into(), "age".into(), "role".into()],
            vec!["age".into()],
        );
        let err = CsvBridge::import_file(file.path(), &options).unwrap_err();
        assert_eq!(err.to_string(), "Row 2: Age must be a number");
    }
}
