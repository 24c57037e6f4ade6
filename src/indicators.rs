//! The indicator table: one row per indicator, holding everything the
//! pipeline needs to know about it (column names, direction, weight and
//! how its source file is laid out).

use serde::{Deserialize, Serialize};

/// The seven indicators combined into the score, in output column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Co2,
    Pm25,
    Renewables,
    ProtectedLand,
    SafeWater,
    LifeExpectancy,
    Hdi,
}

/// How the value column of a long-form table is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueColumn {
    /// Header equal to the name (trimmed, case-insensitive).
    Named(&'static str),
    /// First header containing the fragment (case-insensitive).
    Containing(&'static str),
}

/// Layout of an indicator's source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLayout {
    /// Reconciled into observations, then reduced to the latest year.
    Observations(ValueColumn),
    /// HDI table: `iso3` plus `hdi_YYYY` columns.
    HdiWide,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSpec {
    pub indicator: Indicator,
    pub raw_column: &'static str,
    pub normalized_column: &'static str,
    /// Lower raw values are better.
    pub invert: bool,
    pub weight: f64,
    pub layout: SourceLayout,
}

/// Number of indicators; also the width of every per-indicator array.
pub const INDICATOR_COUNT: usize = 7;

pub const INDICATORS: [IndicatorSpec; INDICATOR_COUNT] = [
    IndicatorSpec {
        indicator: Indicator::Co2,
        raw_column: "co2_per_capita",
        normalized_column: "co2_n",
        invert: true,
        weight: 0.28,
        layout: SourceLayout::Observations(ValueColumn::Containing("co2")),
    },
    IndicatorSpec {
        indicator: Indicator::Pm25,
        raw_column: "pm25",
        normalized_column: "air_n",
        invert: true,
        weight: 0.22,
        layout: SourceLayout::Observations(ValueColumn::Containing("pm2.5")),
    },
    IndicatorSpec {
        indicator: Indicator::Renewables,
        raw_column: "renewables_elec_pct",
        normalized_column: "ren_n",
        invert: false,
        weight: 0.16,
        layout: SourceLayout::Observations(ValueColumn::Named("renewables_elec_pct")),
    },
    IndicatorSpec {
        indicator: Indicator::ProtectedLand,
        raw_column: "protected_land_pct",
        normalized_column: "prot_n",
        invert: false,
        weight: 0.06,
        layout: SourceLayout::Observations(ValueColumn::Named("protected_land_pct")),
    },
    IndicatorSpec {
        indicator: Indicator::SafeWater,
        raw_column: "safe_water_pct",
        normalized_column: "water_n",
        invert: false,
        weight: 0.12,
        layout: SourceLayout::Observations(ValueColumn::Named("safe_water_pct")),
    },
    IndicatorSpec {
        indicator: Indicator::LifeExpectancy,
        raw_column: "life_expectancy_yrs",
        normalized_column: "life_n",
        invert: false,
        weight: 0.12,
        layout: SourceLayout::Observations(ValueColumn::Named("life_expectancy_yrs")),
    },
    IndicatorSpec {
        indicator: Indicator::Hdi,
        raw_column: "hdi",
        normalized_column: "hdi_n",
        invert: false,
        weight: 0.04,
        layout: SourceLayout::HdiWide,
    },
];

impl Indicator {
    pub const ALL: [Indicator; INDICATOR_COUNT] = [
        Indicator::Co2,
        Indicator::Pm25,
        Indicator::Renewables,
        Indicator::ProtectedLand,
        Indicator::SafeWater,
        Indicator::LifeExpectancy,
        Indicator::Hdi,
    ];

    /// Position of this indicator in [`INDICATORS`] and in per-row arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn spec(self) -> &'static IndicatorSpec {
        &INDICATORS[self.index()]
    }
}
