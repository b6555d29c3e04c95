/// The sample row of the "Relations" preview table.
///
/// Everything is fixed except the source column, which mirrors what the user typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationPreview {
    pub prospect_name: &'static str,
    pub prospect_email: &'static str,
    pub status: &'static str,
    pub ambassador: &'static str,
    /// Shown in the source column while the source input is empty.
    pub placeholder_source: &'static str,
}

impl RelationPreview {
    pub const HEADERS: [&'static str; 4] = ["Prospect", "Status", "Ambassador", "Source"];

    pub const fn sample() -> Self {
        Self {
            prospect_name: "Albus Dumbledore",
            prospect_email: "albus@hogwarts.com",
            status: "In progress",
            ambassador: "Joris Renaud",
            placeholder_source: "newsletter-juin",
        }
    }

    pub fn source_label<'a>(&'a self, source: &'a str) -> &'a str {
        if source.is_empty() {
            self.placeholder_source
        } else {
            source
        }
    }

    /// Initials for the ambassador avatar, e.g. `JR`.
    pub fn ambassador_initials(&self) -> String {
        self.ambassador
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_column_mirrors_input() {
        let row = RelationPreview::sample();
        assert_eq!(row.source_label("salon-2024"), "salon-2024");
        assert_eq!(row.source_label(""), "newsletter-juin");
    }

    #[test]
    fn ambassador_initials() {
        assert_eq!(RelationPreview::sample().ambassador_initials(), "JR");
    }
}
