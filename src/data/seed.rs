//! Built-in sample data used when nothing has been persisted yet.

use crate::data::datatable::Record;

/// Columns of the sample data set, in display order
pub const DEFAULT_COLUMNS: [&str; 4] = ["name", "email", "age", "role"];

const SAMPLE_PEOPLE: [(&str, i64, &str); 20] = [
    ("Alice", 25, "Developer"),
    ("Bob", 30, "Designer"),
    ("Charlie", 28, "Product Manager"),
    ("Diana", 35, "Team Lead"),
    ("Ethan", 32, "QA Engineer"),
    ("Fiona", 27, "UI/UX Designer"),
    ("George", 29, "Backend Developer"),
    ("Hannah", 31, "Frontend Developer"),
    ("Ivan", 26, "DevOps Engineer"),
    ("Julia", 33, "Scrum Master"),
    ("Kevin", 24, "Intern"),
    ("Laura", 38, "Project Manager"),
    ("Mark", 36, "Full Stack Developer"),
    ("Nina", 27, "Content Strategist"),
    ("Oscar", 29, "Data Analyst"),
    ("Paula", 34, "HR Manager"),
    ("Quentin", 40, "CTO"),
    ("Rachel", 28, "Marketing Specialist"),
    ("Sam", 26, "Software Engineer"),
    ("Tina", 30, "Graphic Designer"),
];

/// The twenty sample records, ids "1" through "20"
pub fn seed_records() -> Vec<Record> {
    SAMPLE_PEOPLE
        .iter()
        .enumerate()
        .map(|(idx, (name, age, role))| {
            Record::new((idx + 1).to_string())
                .with_field("name", *name)
                .with_field("email", format!("{}@example.com", name.to_lowercase()))
                .with_field("age", *age)
                .with_field("role", *role)
        })
        .collect()
}

pub fn default_columns() -> Vec<String> {
    DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_shape() {
        let rows = seed_records();
        assert_eq!(rows.len(), 20);
        assert_eq!(rows[0].id.as_str(), "1");
        assert_eq!(rows[19].id.as_str(), "20");
        assert_eq!(rows[2].display_value("email"), "charlie@example.com");
        assert_eq!(rows[15].display_value("role"), "HR Manager");
    }
}
