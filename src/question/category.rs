//! Question categories.
//!
//! Fine categories are `COARSE_FINE` labels (`LOCATION_CITY`); the coarse
//! category is the part before the first underscore. The coarse labels and
//! the `VOID` sentinel are categories in their own right.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! question_categories {
    ($($variant:ident => $label:literal),+ $(,)?) => {
        /// A question category label.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum QuestionCategory {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl QuestionCategory {
            /// Every category, fine and coarse, in declaration order.
            pub const ALL: &'static [QuestionCategory] = &[$(QuestionCategory::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(QuestionCategory::$variant => $label,)+
                }
            }
        }

        impl FromStr for QuestionCategory {
            type Err = UnknownCategory;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(QuestionCategory::$variant),)+
                    other => Err(UnknownCategory(other.to_string())),
                }
            }
        }
    };
}

question_categories! {
    AbbreviationAbbreviation => "ABBREVIATION_ABBREVIATION",
    AbbreviationExpansion => "ABBREVIATION_EXPANSION",
    Abbreviation => "ABBREVIATION",
    DescriptionDefinition => "DESCRIPTION_DEFINITION",
    DescriptionDescription => "DESCRIPTION_DESCRIPTION",
    DescriptionManner => "DESCRIPTION_MANNER",
    DescriptionReason => "DESCRIPTION_REASON",
    Description => "DESCRIPTION",
    EntityAnimal => "ENTITY_ANIMAL",
    EntityBody => "ENTITY_BODY",
    EntityColor => "ENTITY_COLOR",
    EntityCreative => "ENTITY_CREATIVE",
    EntityCurrency => "ENTITY_CURRENCY",
    EntityMedicine => "ENTITY_MEDICINE",
    EntityEvent => "ENTITY_EVENT",
    EntityFood => "ENTITY_FOOD",
    EntityInstrument => "ENTITY_INSTRUMENT",
    EntityLanguage => "ENTITY_LANGUAGE",
    EntityLetter => "ENTITY_LETTER",
    EntityOther => "ENTITY_OTHER",
    EntityPlant => "ENTITY_PLANT",
    EntityProduct => "ENTITY_PRODUCT",
    EntityReligion => "ENTITY_RELIGION",
    EntitySport => "ENTITY_SPORT",
    EntitySubstance => "ENTITY_SUBSTANCE",
    EntitySymbol => "ENTITY_SYMBOL",
    EntityTechnique => "ENTITY_TECHNIQUE",
    EntityTerm => "ENTITY_TERM",
    EntityVehicle => "ENTITY_VEHICLE",
    EntityWord => "ENTITY_WORD",
    Entity => "ENTITY",
    HumanDescription => "HUMAN_DESCRIPTION",
    HumanGroup => "HUMAN_GROUP",
    HumanIndividual => "HUMAN_INDIVIDUAL",
    HumanTitle => "HUMAN_TITLE",
    Human => "HUMAN",
    LocationCity => "LOCATION_CITY",
    LocationCountry => "LOCATION_COUNTRY",
    LocationMountain => "LOCATION_MOUNTAIN",
    LocationOther => "LOCATION_OTHER",
    LocationState => "LOCATION_STATE",
    Location => "LOCATION",
    NumericCode => "NUMERIC_CODE",
    NumericCount => "NUMERIC_COUNT",
    NumericDate => "NUMERIC_DATE",
    NumericDistance => "NUMERIC_DISTANCE",
    NumericMoney => "NUMERIC_MONEY",
    NumericOrder => "NUMERIC_ORDER",
    NumericOther => "NUMERIC_OTHER",
    NumericPercent => "NUMERIC_PERCENT",
    NumericPeriod => "NUMERIC_PERIOD",
    NumericSpeed => "NUMERIC_SPEED",
    NumericTemperature => "NUMERIC_TEMPERATURE",
    NumericSize => "NUMERIC_SIZE",
    NumericWeight => "NUMERIC_WEIGHT",
    Numeric => "NUMERIC",
    Void => "VOID",
}

/// A label that names no [`QuestionCategory`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown question category \"{0}\"")]
pub struct UnknownCategory(pub String);

impl QuestionCategory {
    /// The coarse parent (`LOCATION_CITY` → `LOCATION`). Coarse categories
    /// and `VOID` map to themselves.
    pub fn coarse(self) -> QuestionCategory {
        coarsen(self.as_str()).parse().unwrap_or(self)
    }

    pub fn is_coarse(self) -> bool {
        self.coarse() == self
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The coarse part of a label: everything before the first `_`.
pub fn coarsen(label: &str) -> &str {
    label.split_once('_').map_or(label, |(coarse, _)| coarse)
}

/// The label inventory a classifier reports in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSet {
    /// Every category, fine and coarse.
    #[default]
    Fine,
    /// Coarse categories and `VOID` only.
    Coarse,
}

impl LabelSet {
    /// The category `label` names, if it belongs to this set.
    pub fn lookup(self, label: &str) -> Option<QuestionCategory> {
        let category: QuestionCategory = label.parse().ok()?;
        match self {
            LabelSet::Fine => Some(category),
            LabelSet::Coarse => category.is_coarse().then_some(category),
        }
    }

    pub fn contains(self, label: &str) -> bool {
        self.lookup(label).is_some()
    }

    /// Members of the set in declaration order.
    pub fn categories(self) -> Vec<QuestionCategory> {
        QuestionCategory::ALL
            .iter()
            .copied()
            .filter(|c| self == LabelSet::Fine || c.is_coarse())
            .collect()
    }
}

impl FromStr for LabelSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fine" => Ok(LabelSet::Fine),
            "coarse" => Ok(LabelSet::Coarse),
            other => Err(format!("unknown label set \"{other}\"")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        assert_eq!(QuestionCategory::ALL.len(), 57);
        for &c in QuestionCategory::ALL {
            assert_eq!(c.as_str().parse::<QuestionCategory>().unwrap(), c);
        }
        assert!("LOCATION_MOON".parse::<QuestionCategory>().is_err());
    }

    #[test]
    fn coarse_parents() {
        assert_eq!(QuestionCategory::LocationCity.coarse(), QuestionCategory::Location);
        assert_eq!(QuestionCategory::Human.coarse(), QuestionCategory::Human);
        assert_eq!(QuestionCategory::Void.coarse(), QuestionCategory::Void);
        assert!(!QuestionCategory::NumericCount.is_coarse());
    }

    #[test]
    fn coarsening_is_idempotent() {
        for label in ["LOCATION_CITY", "HUMAN", "FOO_BAR_BAZ", "", "_X"] {
            assert_eq!(coarsen(coarsen(label)), coarsen(label));
        }
        assert_eq!(coarsen("FOO_BAR_BAZ"), "FOO");
    }

    #[test]
    fn coarse_label_set() {
        let coarse = LabelSet::Coarse.categories();
        let names: Vec<&str> = coarse.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            vec!["ABBREVIATION", "DESCRIPTION", "ENTITY", "HUMAN", "LOCATION", "NUMERIC", "VOID"]
        );
        assert!(!LabelSet::Coarse.contains("LOCATION_CITY"));
        assert!(LabelSet::Fine.contains("LOCATION_CITY"));
        assert!(!LabelSet::Fine.contains("LOCATION_MOON"));
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&QuestionCategory::NumericCount).unwrap();
        assert_eq!(json, "\"NUMERIC_COUNT\"");
    }
}
