//! Chart categories.
//!
//! Every track and every list entry belongs to exactly one category. The two
//! categories are published as separate charts and never mix.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Commercial category -- released tracks.
pub const CATEGORY_COMMERCIAL: &str = "commercial";

/// Upfront category -- promos and unreleased tracks.
pub const CATEGORY_UPFRONT: &str = "upfront";

/// All valid category values, as stored in the `category` columns.
pub const VALID_CATEGORIES: &[&str] = &[CATEGORY_COMMERCIAL, CATEGORY_UPFRONT];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Commercial,
    Upfront,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Commercial, Category::Upfront];

    /// The value stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Commercial => CATEGORY_COMMERCIAL,
            Category::Upfront => CATEGORY_UPFRONT,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CATEGORY_COMMERCIAL => Ok(Category::Commercial),
            CATEGORY_UPFRONT => Ok(Category::Upfront),
            other => Err(CoreError::Validation(format!(
                "Invalid category '{other}'. Must be one of: {}",
                VALID_CATEGORIES.join(", ")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_values() {
        assert_eq!("commercial".parse::<Category>().unwrap(), Category::Commercial);
        assert_eq!("upfront".parse::<Category>().unwrap(), Category::Upfront);
    }

    #[test]
    fn rejects_unknown_category() {
        let err = "promo".parse::<Category>().unwrap_err();
        assert!(err.to_string().contains("Invalid category 'promo'"));
    }

    #[test]
    fn as_str_round_trips_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Category::Upfront).unwrap();
        assert_eq!(json, "\"upfront\"");
        let parsed: Category = serde_json::from_str("\"commercial\"").unwrap();
        assert_eq!(parsed, Category::Commercial);
    }
}
