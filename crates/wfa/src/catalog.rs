//! Built-in example workflows.

use serde::Deserialize;

use crate::error::CliError;

const CATALOG: &str = include_str!("catalog.toml");

/// A sample workflow with its stakeholders.
#[derive(Debug, Deserialize)]
pub(crate) struct Example {
    pub department: String,
    pub name: String,
    pub workflow: String,
    #[serde(default)]
    pub stakeholders: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Catalog {
    #[serde(rename = "example")]
    examples: Vec<Example>,
}

impl Catalog {
    /// Parse the embedded catalog.
    pub(crate) fn load() -> Result<Self, CliError> {
        Ok(toml::from_str(CATALOG)?)
    }

    /// Find an example by name, ignoring case.
    pub(crate) fn find(&self, name: &str) -> Option<&Example> {
        let name = name.trim();
        self.examples
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Examples grouped by department, in catalog order.
    pub(crate) fn by_department(&self) -> Vec<(&str, Vec<&Example>)> {
        let mut groups: Vec<(&str, Vec<&Example>)> = Vec::new();
        for example in &self.examples {
            let department = example.department.as_str();
            match groups.iter().position(|(d, _)| *d == department) {
                Some(index) => groups[index].1.push(example),
                None => groups.push((department, vec![example])),
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_embedded_catalog_parses() {
        let catalog = Catalog::load().unwrap();
        assert_eq!(catalog.examples.len(), 7);
        assert!(
            catalog
                .examples
                .iter()
                .all(|e| !e.workflow.trim().is_empty() && !e.stakeholders.is_empty())
        );
    }

    #[test]
    fn test_departments_in_order() {
        let catalog = Catalog::load().unwrap();
        let departments: Vec<_> = catalog.by_department().into_iter().map(|(d, _)| d).collect();
        assert_eq!(
            departments,
            [
                "Content Moderation",
                "Sales & Onboarding",
                "IT Support",
                "Engineering",
                "Finance",
                "Accounting",
                "HR",
            ]
        );
    }

    #[test]
    fn test_find_ignores_case() {
        let catalog = Catalog::load().unwrap();
        let example = catalog.find("monthly expense report delays").unwrap();
        assert_eq!(example.department, "Finance");
        assert_eq!(
            example.stakeholders,
            ["Alex (Employee)", "Jenna (Manager)", "Frank (Finance Clerk)"]
        );
    }

    #[test]
    fn test_find_unknown() {
        let catalog = Catalog::load().unwrap();
        assert!(catalog.find("Nope").is_none());
    }
}
