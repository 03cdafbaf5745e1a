use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Personality/aptitude tag carried by every quiz option and every cluster.
///
/// Declaration order is the tie-break order used when selecting a winner:
/// `Ord` is derived, so iterating a `BTreeMap<Category, _>` walks the
/// enumeration left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Builder,
    Analyst,
    Creator,
    Helper,
    /// Reserved. No option in the standard bank carries it and no cluster is
    /// seeded for it; it can only ever appear with a zero tally.
    Explorer,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Builder,
        Category::Analyst,
        Category::Creator,
        Category::Helper,
        Category::Explorer,
    ];

    /// Categories an option is allowed to carry.
    pub const REACHABLE: [Category; 4] = [
        Category::Builder,
        Category::Analyst,
        Category::Creator,
        Category::Helper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Builder => "builder",
            Category::Analyst => "analyst",
            Category::Creator => "creator",
            Category::Helper => "helper",
            Category::Explorer => "explorer",
        }
    }

    pub fn is_reserved(&self) -> bool {
        matches!(self, Category::Explorer)
    }

    /// Presentation lookup for this category.
    pub fn style(&self) -> CategoryStyle {
        match self {
            Category::Builder => CategoryStyle {
                label: "The Builder",
                icon: "trophy",
                color: "from-orange-500 to-red-500",
            },
            Category::Analyst => CategoryStyle {
                label: "The Analyst",
                icon: "book-open",
                color: "from-blue-500 to-purple-500",
            },
            Category::Creator => CategoryStyle {
                label: "The Creator",
                icon: "sparkles",
                color: "from-pink-500 to-violet-500",
            },
            Category::Helper => CategoryStyle {
                label: "The Helper",
                icon: "graduation-cap",
                color: "from-green-500 to-teal-500",
            },
            Category::Explorer => CategoryStyle {
                label: "The Explorer",
                icon: "compass",
                color: "from-slate-500 to-gray-500",
            },
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Case-insensitive; accepts both `builder` and `Builder`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == lowered)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Icon and colour used by clients when rendering a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStyle {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_order_is_tie_break_order() {
        let mut sorted = Category::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, Category::ALL.to_vec());
        assert!(Category::Builder < Category::Analyst);
        assert!(Category::Helper < Category::Explorer);
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("Builder".parse::<Category>().unwrap(), Category::Builder);
        assert_eq!(" helper ".parse::<Category>().unwrap(), Category::Helper);
        assert!("wizard".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_tags() {
        assert_eq!(
            serde_json::to_string(&Category::Analyst).unwrap(),
            "\"analyst\""
        );
        let c: Category = serde_json::from_str("\"creator\"").unwrap();
        assert_eq!(c, Category::Creator);
    }

    #[test]
    fn test_style_is_distinct_per_reachable_category() {
        let colors: std::collections::HashSet<_> =
            Category::REACHABLE.iter().map(|c| c.style().color).collect();
        assert_eq!(colors.len(), Category::REACHABLE.len());
        assert_eq!(Category::Builder.style().label, "The Builder");
    }

    #[test]
    fn test_only_explorer_is_reserved() {
        let reserved: Vec<_> = Category::ALL.iter().filter(|c| c.is_reserved()).collect();
        assert_eq!(reserved, vec![&Category::Explorer]);
    }
}
