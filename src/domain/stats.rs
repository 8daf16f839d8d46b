// src/domain/stats.rs

use crate::data::records::{FeaturePlotRow, HouseRecord};
use crate::domain::sectors::Sector;
use std::collections::{BTreeMap, BTreeSet};

/// The 11-color diverging "Spectral" palette, low to high.
pub const SPECTRAL11: [&str; 11] = [
    "#5e4fa2", "#3288bd", "#66c2a5", "#abdda4", "#e6f598", "#ffffbf", "#fee08b", "#fdae61",
    "#f46d43", "#d53e4f", "#9e0142",
];

/// Maps `value` linearly onto `palette` between `low` and `high` (inclusive).
/// Values outside the range take the end colors.
pub fn linear_color<'a>(value: f64, low: f64, high: f64, palette: &[&'a str]) -> &'a str {
    let last = palette.len() - 1;
    if high <= low || value <= low {
        return palette[0];
    }
    if value >= high {
        return palette[last];
    }
    let idx = ((value - low) / (high - low) * palette.len() as f64).floor() as usize;
    palette[idx.min(last)]
}

/// Position of every value in the sorted list of distinct values.
pub fn label_encode(values: &[&str]) -> Vec<usize> {
    let mut ranks: BTreeMap<&str, usize> = values.iter().map(|v| (*v, 0)).collect();
    for (rank, slot) in ranks.values_mut().enumerate() {
        *slot = rank;
    }

    // every value is a key of `ranks`
    values.iter().map(|v| ranks[v]).collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trendline {
    pub slope: f64,
    pub intercept: f64,
}

impl Trendline {
    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Ordinary least squares fit of `y` on `x`.
/// Needs at least two distinct `x` values.
pub fn ols_fit(points: &[(f64, f64)]) -> Option<Trendline> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

    let (sxy, sxx) = points.iter().fold((0.0, 0.0), |(sxy, sxx), (x, y)| {
        let dx = x - mean_x;
        (sxy + dx * (y - mean_y), sxx + dx * dx)
    });

    if sxx == 0.0 {
        return None;
    }
    let slope = sxy / sxx;
    Some(Trendline {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// Share of one house type within each sector.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionRow {
    pub house_type: u8,
    /// In [`Sector::PLOT_ORDER`].
    pub shares: Vec<(Sector, f64)>,
}

/// Proportion of each house type per sector. Each sector's shares sum to 1
/// (or are all 0 when the sector has no houses).
pub fn sector_composition(houses: &[HouseRecord]) -> Vec<CompositionRow> {
    let mut counts: BTreeMap<(u8, Sector), usize> = BTreeMap::new();
    let mut totals: BTreeMap<Sector, usize> = BTreeMap::new();

    for h in houses {
        *counts.entry((h.house_type, h.sector)).or_default() += 1;
        *totals.entry(h.sector).or_default() += 1;
    }

    let types: BTreeSet<u8> = houses.iter().map(|h| h.house_type).collect();

    types
        .into_iter()
        .map(|house_type| CompositionRow {
            house_type,
            shares: Sector::PLOT_ORDER
                .iter()
                .map(|&sector| {
                    let total = totals.get(&sector).copied().unwrap_or(0);
                    let count = counts.get(&(house_type, sector)).copied().unwrap_or(0);
                    let share = if total == 0 {
                        0.0
                    } else {
                        count as f64 / total as f64
                    };
                    (sector, share)
                })
                .collect(),
        })
        .collect()
}

/// Per-house value drawn over the sector composition bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayChoice {
    SalePrice,
    YearBuilt,
    OverallQual,
}

impl OverlayChoice {
    pub const ALL: [OverlayChoice; 3] = [
        OverlayChoice::SalePrice,
        OverlayChoice::YearBuilt,
        OverlayChoice::OverallQual,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OverlayChoice::SalePrice => "SalePrice",
            OverlayChoice::YearBuilt => "YearBuilt",
            OverlayChoice::OverallQual => "OverallQual",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == s)
    }

    pub fn value(self, house: &HouseRecord) -> f64 {
        match self {
            OverlayChoice::SalePrice => house.sale_price,
            OverlayChoice::YearBuilt => f64::from(house.year_built),
            OverlayChoice::OverallQual => f64::from(house.overall_qual),
        }
    }
}

pub fn overlay_series(houses: &[HouseRecord], choice: OverlayChoice) -> Vec<(Sector, f64)> {
    houses.iter().map(|h| (h.sector, choice.value(h))).collect()
}

/// Categorical feature used to facet the living-area scatterplots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeaturePick {
    KitchenQual,
    BsmtCond,
    GarageQual,
    PavedDrive,
    CentralAir,
    HeatingQC,
}

impl FeaturePick {
    pub const ALL: [FeaturePick; 6] = [
        FeaturePick::KitchenQual,
        FeaturePick::BsmtCond,
        FeaturePick::GarageQual,
        FeaturePick::PavedDrive,
        FeaturePick::CentralAir,
        FeaturePick::HeatingQC,
    ];

    pub fn column(self) -> &'static str {
        match self {
            FeaturePick::KitchenQual => "KitchenQual",
            FeaturePick::BsmtCond => "BsmtCond",
            FeaturePick::GarageQual => "GarageQual",
            FeaturePick::PavedDrive => "PavedDrive",
            FeaturePick::CentralAir => "CentralAir",
            FeaturePick::HeatingQC => "HeatingQC",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.column() == s)
    }

    /// Facet order, worst to best.
    pub fn category_order(self) -> &'static [&'static str] {
        match self {
            FeaturePick::KitchenQual | FeaturePick::HeatingQC => {
                &["Fair", "Typical", "Good", "Excellent"]
            }
            FeaturePick::GarageQual => &["No Garage", "Fair", "Typical", "Good"],
            FeaturePick::BsmtCond => &["No Basement", "Fair", "Typical", "Good"],
            FeaturePick::PavedDrive | FeaturePick::CentralAir => &["N", "Y"],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    pub category: String,
    /// `(GoodLivArea, SalePrice)` pairs.
    pub points: Vec<(f64, f64)>,
    pub trend: Option<Trendline>,
}

/// Groups rows by the picked category. Known categories come first in their
/// display order, unexpected ones follow alphabetically. Rows without the
/// column are skipped.
pub fn facets(rows: &[FeaturePlotRow], pick: FeaturePick) -> Vec<Facet> {
    let mut groups: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
    for row in rows {
        if let Some(cat) = row.category(pick.column()) {
            groups
                .entry(cat)
                .or_default()
                .push((row.good_liv_area, row.sale_price));
        }
    }

    let order = pick.category_order();
    let mut keys: Vec<&str> = groups.keys().copied().collect();
    keys.sort_by_key(|k| (order.iter().position(|o| o == k).unwrap_or(order.len()), *k));

    keys.into_iter()
        .map(|category| {
            let points = groups.remove(category).unwrap_or_default();
            Facet {
                category: category.to_string(),
                trend: ols_fit(&points),
                points,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::{GeoPoint, ProjectedPoint};
    use approx::assert_relative_eq;

    fn house(pid: u64, sector: Sector, house_type: u8, price: f64) -> HouseRecord {
        HouseRecord {
            pid,
            address: format!("{pid} Test St"),
            neighborhood: "NAmes".into(),
            sector,
            house_type,
            sale_price: price,
            year_built: 1960,
            overall_qual: 5,
            location: GeoPoint::new(42.03, -93.62),
            position: ProjectedPoint { x: 0.0, y: 0.0 },
            neighborhood_code: 0,
            sector_code: 0,
        }
    }

    #[test]
    fn color_map_covers_both_ends() {
        assert_eq!(linear_color(0.0, 0.0, 10.0, &SPECTRAL11), "#5e4fa2");
        assert_eq!(linear_color(10.0, 0.0, 10.0, &SPECTRAL11), "#9e0142");
        assert_eq!(linear_color(5.0, 0.0, 10.0, &SPECTRAL11), "#ffffbf");
        assert_eq!(linear_color(-3.0, 0.0, 10.0, &SPECTRAL11), "#5e4fa2");
        assert_eq!(linear_color(7.0, 7.0, 7.0, &SPECTRAL11), "#5e4fa2");
    }

    #[test]
    fn label_encoding_is_sorted_order() {
        assert_eq!(label_encode(&["b", "a", "c", "a"]), vec![1, 0, 2, 0]);
        assert!(label_encode(&[]).is_empty());
    }

    #[test]
    fn label_encoding_gives_each_class_its_own_code() {
        let quals = ["Gd", "Ex", "TA", "Fa", "Ex", "Gd"];
        let codes = label_encode(&quals);
        assert_eq!(codes, vec![2, 0, 3, 1, 0, 2]);

        // equal codes only for equal labels
        for (i, a) in quals.iter().enumerate() {
            for (j, b) in quals.iter().enumerate() {
                assert_eq!(a == b, codes[i] == codes[j]);
            }
        }
    }

    #[test]
    fn ols_recovers_exact_line() {
        let pts = [(1.0, 5.0), (2.0, 7.0), (4.0, 11.0)];
        let t = ols_fit(&pts).unwrap();
        assert_relative_eq!(t.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(t.intercept, 3.0, epsilon = 1e-12);
        assert_relative_eq!(t.at(10.0), 23.0, epsilon = 1e-9);
    }

    #[test]
    fn ols_needs_spread_in_x() {
        assert_eq!(ols_fit(&[(1.0, 2.0)]), None);
        assert_eq!(ols_fit(&[(1.0, 2.0), (1.0, 3.0)]), None);
    }

    #[test]
    fn composition_shares_sum_to_one_per_sector() {
        let houses = vec![
            house(1, Sector::Downtown, 6, 1.0),
            house(2, Sector::Downtown, 5, 1.0),
            house(3, Sector::Downtown, 5, 1.0),
            house(4, Sector::NorthWest, 5, 1.0),
        ];
        let rows = sector_composition(&houses);

        assert_eq!(rows.len(), 2);
        let share = |ht: u8, s: Sector| {
            rows.iter()
                .find(|r| r.house_type == ht)
                .and_then(|r| r.shares.iter().find(|(sec, _)| *sec == s))
                .map(|(_, v)| *v)
                .unwrap()
        };
        assert_relative_eq!(share(5, Sector::Downtown), 2.0 / 3.0);
        assert_relative_eq!(share(6, Sector::Downtown), 1.0 / 3.0);
        assert_eq!(share(5, Sector::NorthWest), 1.0);
        assert_eq!(share(5, Sector::West), 0.0);
        assert_eq!(rows[0].shares[0].0, Sector::NorthWest);
    }

    #[test]
    fn overlay_reads_the_chosen_column() {
        let houses = vec![house(1, Sector::South, 5, 123_000.0)];
        assert_eq!(
            overlay_series(&houses, OverlayChoice::SalePrice),
            vec![(Sector::South, 123_000.0)]
        );
        assert_eq!(
            overlay_series(&houses, OverlayChoice::YearBuilt),
            vec![(Sector::South, 1960.0)]
        );
        assert_eq!(OverlayChoice::parse("OverallQual"), Some(OverlayChoice::OverallQual));
        assert_eq!(OverlayChoice::parse("LotArea"), None);
    }

    #[test]
    fn facets_follow_category_order() {
        let row = |pid: u64, qual: &str, area: f64| FeaturePlotRow {
            pid,
            good_liv_area: area,
            sale_price: area * 100.0,
            categories: BTreeMap::from([("KitchenQual".to_string(), qual.to_string())]),
        };
        let rows = vec![
            row(1, "Excellent", 2000.0),
            row(2, "Fair", 900.0),
            row(3, "Mystery", 1000.0),
            row(4, "Excellent", 2500.0),
        ];

        let out = facets(&rows, FeaturePick::KitchenQual);
        let cats: Vec<&str> = out.iter().map(|f| f.category.as_str()).collect();
        assert_eq!(cats, vec!["Fair", "Excellent", "Mystery"]);

        let excellent = &out[1];
        assert_eq!(excellent.points.len(), 2);
        assert_relative_eq!(excellent.trend.unwrap().slope, 100.0, epsilon = 1e-9);
        assert_eq!(out[0].trend, None);
    }
}
