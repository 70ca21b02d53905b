use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod event {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EventNew {
        pub name: String,
        /// Defaults to today when omitted.
        pub event_date: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EventUpdate {
        pub name: String,
        /// Keeps the stored date when omitted.
        pub event_date: Option<NaiveDate>,
    }
}

pub mod attendee {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AttendeeUpsert {
        pub name: String,
        /// Money already paid into the shared pool. Defaults to 0.
        pub contribution: Option<f64>,
    }
}

pub mod category {
    use super::*;

    /// The categories the clients offer out of the box, with their usual
    /// subcategory refinements.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum PredefinedCategory {
        Food,
        Liquor,
        Cigarettes,
        Entertainment,
        Transport,
    }

    impl PredefinedCategory {
        /// Display name stored by the engine.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Food => "Food",
                Self::Liquor => "Liquor",
                Self::Cigarettes => "Cigarettes",
                Self::Entertainment => "Entertainment",
                Self::Transport => "Transport",
            }
        }

        /// Subcategories the clients suggest for this category.
        pub fn subcategories(self) -> &'static [&'static str] {
            match self {
                Self::Food => &["Veg", "Non Veg"],
                _ => &[],
            }
        }
    }

    /// Tagged category name: either one of the predefined categories or a
    /// free-text custom one. The engine only ever sees the resolved display
    /// name; the tag exists so clients do not need a "custom" sentinel value.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "kind", content = "name", rename_all = "snake_case")]
    pub enum CategoryName {
        Predefined(PredefinedCategory),
        Custom(String),
    }

    impl CategoryName {
        /// Resolves the tagged name to the display name the engine stores.
        pub fn resolve(&self) -> &str {
            match self {
                Self::Predefined(predefined) => predefined.as_str(),
                Self::Custom(name) => name.as_str(),
            }
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryUpsert {
        pub name: CategoryName,
        pub subcategory: Option<String>,
        pub amount: f64,
    }
}

pub mod participation {
    use super::*;

    /// Request body for toggling one participation flag.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ParticipationSet {
        pub attendee_id: Uuid,
        pub category_id: Uuid,
        pub participates: bool,
    }
}

pub mod report {
    use super::*;

    /// Aggregation key for the per-attendee expense map.
    ///
    /// Mirrors the engine's `CategoryKey`; `name` reproduces the historical
    /// behavior where same-named categories overwrite each other in the map.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum CategoryKeyParam {
        #[default]
        Name,
        NameAndSubcategory,
    }

    /// Settlement matching strategy, mirroring the engine's enum.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum StrategyParam {
        #[default]
        SingleCreditorSuggestion,
        MinimalTransferCount,
    }

    /// Query parameters for the calculation endpoint.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CalculateQuery {
        pub key: Option<CategoryKeyParam>,
        pub strategy: Option<StrategyParam>,
    }
}
