/// Classification of a node derived from its tag key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagCategory {
    Organization,
    Person,
    Technology,
    Tool,
    Event,
    Concept,
    User,
    Other,
}

impl TagCategory {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "organization" | "organisation" | "org" => Self::Organization,
            "person" => Self::Person,
            "technology" | "tech" => Self::Technology,
            "tool" => Self::Tool,
            "event" => Self::Event,
            "concept" => Self::Concept,
            "user" => Self::User,
            _ => Self::Other,
        }
    }

    /// User nodes carry a synthetic id, a point score and an event count.
    pub fn is_user(self) -> bool {
        matches!(self, Self::User)
    }

    /// Project-like nodes are drawn with the accent color.
    pub fn is_project(self) -> bool {
        matches!(
            self,
            Self::Organization
                | Self::Person
                | Self::Technology
                | Self::Tool
                | Self::Event
                | Self::Concept
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Organization => "Organization",
            Self::Person => "Person",
            Self::Technology => "Technology",
            Self::Tool => "Tool",
            Self::Event => "Event",
            Self::Concept => "Concept",
            Self::User => "User",
            Self::Other => "Other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_tags_case_insensitively() {
        assert_eq!(TagCategory::from_tag("Person"), TagCategory::Person);
        assert_eq!(TagCategory::from_tag("ORG"), TagCategory::Organization);
        assert_eq!(TagCategory::from_tag(" user "), TagCategory::User);
        assert_eq!(TagCategory::from_tag("Chart"), TagCategory::Other);
    }

    #[test]
    fn user_and_project_sets_are_disjoint() {
        for tag in [
            "Organization",
            "Person",
            "Technology",
            "Tool",
            "Event",
            "Concept",
            "User",
            "Field",
        ] {
            let category = TagCategory::from_tag(tag);
            assert!(!(category.is_user() && category.is_project()), "{tag}");
        }
        assert!(TagCategory::User.is_user());
        assert!(!TagCategory::Other.is_project());
        assert!(TagCategory::Concept.is_project());
    }
}
