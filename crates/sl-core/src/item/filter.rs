use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Item, ListState};

/// Which subset of the list a view exposes.
///
/// 视图展示的列表子集。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCriterion {
    #[default]
    All,
    ObtainedOnly,
    Remaining,
}

impl FilterCriterion {
    pub fn matches(self, item: &Item) -> bool {
        match self {
            Self::All => true,
            Self::ObtainedOnly => item.obtained,
            Self::Remaining => !item.obtained,
        }
    }

    /// Project the list state through this criterion.
    ///
    /// Order of `Data` is preserved. `Loading` and `Error` project to an
    /// empty sequence.
    pub fn apply(self, state: &ListState) -> Vec<Item> {
        state
            .data()
            .map(|items| {
                items
                    .iter()
                    .filter(|item| self.matches(item))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl fmt::Display for FilterCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::All => "all",
            Self::ObtainedOnly => "obtained",
            Self::Remaining => "remaining",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter criterion: {0}")]
pub struct ParseFilterCriterionError(pub String);

impl FromStr for FilterCriterion {
    type Err = ParseFilterCriterionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "obtained" | "obtained_only" | "obtained-only" => Ok(Self::ObtainedOnly),
            "remaining" => Ok(Self::Remaining),
            other => Err(ParseFilterCriterionError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreError;
    use crate::ids::ItemId;

    fn sample() -> ListState {
        ListState::Data(vec![
            Item::new("milk").with_id(ItemId::from("a")).with_obtained(true),
            Item::new("eggs").with_id(ItemId::from("b")),
            Item::new("bread").with_id(ItemId::from("c")).with_obtained(true),
        ])
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_obtained_only_keeps_order() {
        let visible = FilterCriterion::ObtainedOnly.apply(&sample());
        assert_eq!(names(&visible), vec!["milk", "bread"]);
    }

    #[test]
    fn test_all_is_identity_projection() {
        let visible = FilterCriterion::All.apply(&sample());
        assert_eq!(names(&visible), vec!["milk", "eggs", "bread"]);
    }

    #[test]
    fn test_remaining_excludes_obtained() {
        let visible = FilterCriterion::Remaining.apply(&sample());
        assert_eq!(names(&visible), vec!["eggs"]);
    }

    #[test]
    fn test_non_data_states_project_to_empty() {
        assert!(FilterCriterion::All.apply(&ListState::Loading).is_empty());
        assert!(FilterCriterion::All
            .apply(&ListState::Error(StoreError::failure("down")))
            .is_empty());
    }

    #[test]
    fn test_parse_accepts_config_spellings() {
        assert_eq!("all".parse(), Ok(FilterCriterion::All));
        assert_eq!(" Obtained ".parse(), Ok(FilterCriterion::ObtainedOnly));
        assert_eq!("remaining".parse(), Ok(FilterCriterion::Remaining));
        assert!("bought".parse::<FilterCriterion>().is_err());
    }
}
