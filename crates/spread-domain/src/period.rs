//! Budget cadences and their yearly occurrence counts.

use std::{fmt, str::FromStr};

use serde::{de::Deserializer, Deserialize, Serialize, Serializer};

use crate::DomainError;

/// Enumerates the cadences a budget entry can be declared at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BudgetPeriod {
    #[default]
    None,
    Weekly,
    Biweekly,
    Monthly,
    Bimonthly,
    Quarterly,
    HalfYearly,
    Yearly,
    Daily,
}

impl BudgetPeriod {
    /// Every period in display order. Position matches [`BudgetPeriod::ordinal`].
    pub const ALL: [BudgetPeriod; 9] = [
        BudgetPeriod::None,
        BudgetPeriod::Weekly,
        BudgetPeriod::Biweekly,
        BudgetPeriod::Monthly,
        BudgetPeriod::Bimonthly,
        BudgetPeriod::Quarterly,
        BudgetPeriod::HalfYearly,
        BudgetPeriod::Yearly,
        BudgetPeriod::Daily,
    ];

    /// Number of times the period recurs within one calendar year.
    pub fn occurrences_per_year(self) -> u32 {
        match self {
            BudgetPeriod::None => 0,
            BudgetPeriod::Weekly => 52,
            BudgetPeriod::Biweekly => 26,
            BudgetPeriod::Monthly => 12,
            BudgetPeriod::Bimonthly => 6,
            BudgetPeriod::Quarterly => 4,
            BudgetPeriod::HalfYearly => 2,
            BudgetPeriod::Yearly => 1,
            BudgetPeriod::Daily => 365,
        }
    }

    /// Human readable label used for display and persistence.
    pub fn label(self) -> &'static str {
        match self {
            BudgetPeriod::None => "None",
            BudgetPeriod::Weekly => "Weekly",
            BudgetPeriod::Biweekly => "Fortnightly",
            BudgetPeriod::Monthly => "Monthly",
            BudgetPeriod::Bimonthly => "Every 2 Months",
            BudgetPeriod::Quarterly => "Quarterly",
            BudgetPeriod::HalfYearly => "Half-Yearly",
            BudgetPeriod::Yearly => "Yearly",
            BudgetPeriod::Daily => "Daily",
        }
    }

    pub fn ordinal(self) -> u8 {
        match self {
            BudgetPeriod::None => 0,
            BudgetPeriod::Weekly => 1,
            BudgetPeriod::Biweekly => 2,
            BudgetPeriod::Monthly => 3,
            BudgetPeriod::Bimonthly => 4,
            BudgetPeriod::Quarterly => 5,
            BudgetPeriod::HalfYearly => 6,
            BudgetPeriod::Yearly => 7,
            BudgetPeriod::Daily => 8,
        }
    }

    /// Period/label pairs for selection lists.
    pub fn choices() -> Vec<(BudgetPeriod, &'static str)> {
        Self::ALL.iter().map(|period| (*period, period.label())).collect()
    }
}

impl TryFrom<u8> for BudgetPeriod {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| DomainError::InvalidPeriod(format!("ordinal {value}")))
    }
}

impl FromStr for BudgetPeriod {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        if let Some(period) = Self::ALL
            .iter()
            .find(|period| period.label().eq_ignore_ascii_case(needle))
        {
            return Ok(*period);
        }
        match needle.to_ascii_lowercase().as_str() {
            "biweekly" => Ok(BudgetPeriod::Biweekly),
            "bimonthly" => Ok(BudgetPeriod::Bimonthly),
            "halfyearly" | "half_yearly" => Ok(BudgetPeriod::HalfYearly),
            _ => Err(DomainError::InvalidPeriod(value.to_string())),
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for BudgetPeriod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for BudgetPeriod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_follow_display_order() {
        for (index, period) in BudgetPeriod::ALL.iter().enumerate() {
            assert_eq!(period.ordinal() as usize, index);
            assert_eq!(BudgetPeriod::try_from(index as u8).unwrap(), *period);
        }
    }

    #[test]
    fn occurrence_counts_match_cadence() {
        let counts: Vec<u32> = BudgetPeriod::ALL
            .iter()
            .map(|period| period.occurrences_per_year())
            .collect();
        assert_eq!(counts, vec![0, 52, 26, 12, 6, 4, 2, 1, 365]);
    }

    #[test]
    fn out_of_range_ordinal_is_rejected() {
        let err = BudgetPeriod::try_from(9).unwrap_err();
        assert!(matches!(err, DomainError::InvalidPeriod(_)));
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!("fortnightly".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Biweekly);
        assert_eq!("EVERY 2 MONTHS".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Bimonthly);
        assert_eq!(" half-yearly ".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::HalfYearly);
        assert_eq!("halfyearly".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::HalfYearly);
        assert!("every other tuesday".parse::<BudgetPeriod>().is_err());
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&BudgetPeriod::Bimonthly).unwrap();
        assert_eq!(json, "\"Every 2 Months\"");
        let back: BudgetPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, BudgetPeriod::Bimonthly);
        assert!(serde_json::from_str::<BudgetPeriod>("\"Hourly\"").is_err());
    }

    #[test]
    fn choices_expose_every_label() {
        let labels: Vec<&str> = BudgetPeriod::choices().into_iter().map(|(_, l)| l).collect();
        assert_eq!(labels.len(), 9);
        assert_eq!(labels[2], "Fortnightly");
    }
}
