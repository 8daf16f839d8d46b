use crate::data::HouseRecord;
use crate::domain::format::format_amount;
use crate::domain::geo::ProjectionError;
use crate::domain::sectors::{AMES_CENTER, LANDMARKS};
use crate::domain::stats::{linear_color, SPECTRAL11};
use crate::templates::components::charts::{color_bar, house_map, MapDot, MapWindow};
use crate::templates::components::{expander, radio_form};
use crate::templates::{desktop_layout, Page, SidebarVm};
use maud::{html, Markup};

/// What the house dots are colored by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapChoice {
    SalePrice,
    Neighborhood,
    Sector,
}

impl MapChoice {
    pub const ALL: [MapChoice; 3] = [
        MapChoice::SalePrice,
        MapChoice::Neighborhood,
        MapChoice::Sector,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MapChoice::SalePrice => "SalePrice",
            MapChoice::Neighborhood => "Neighborhood",
            MapChoice::Sector => "Sector",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == s)
    }
}

/// Fixed view around central Ames.
pub fn ames_window() -> Result<MapWindow, ProjectionError> {
    let center = AMES_CENTER.project()?;
    Ok(MapWindow {
        x_min: center.x - 8000.0,
        x_max: center.x + 3000.0,
        y_min: center.y - 8000.0,
        y_max: center.y + 5000.0,
    })
}

pub fn landmark_dots() -> Result<Vec<MapDot>, ProjectionError> {
    LANDMARKS
        .iter()
        .map(|mark| {
            let p = mark.location.project()?;
            Ok(MapDot {
                x: p.x,
                y: p.y,
                color: "pink".to_string(),
                label: mark.name.to_string(),
            })
        })
        .collect()
}

/// One dot per house, colored by `choice`.
pub fn house_dots(houses: &[HouseRecord], choice: MapChoice, price_range: (f64, f64)) -> Vec<MapDot> {
    let code_range = |code: fn(&HouseRecord) -> usize| {
        let max = houses.iter().map(code).max().unwrap_or(0);
        (0.0, max as f64)
    };
    let neighborhood_range = code_range(|h| h.neighborhood_code);
    let sector_range = code_range(|h| h.sector_code);

    houses
        .iter()
        .map(|h| {
            let (color, label) = match choice {
                MapChoice::SalePrice => (
                    linear_color(h.sale_price, price_range.0, price_range.1, &SPECTRAL11),
                    format!("Price: {}", format_amount(h.sale_price)),
                ),
                MapChoice::Neighborhood => (
                    linear_color(
                        h.neighborhood_code as f64,
                        neighborhood_range.0,
                        neighborhood_range.1,
                        &SPECTRAL11,
                    ),
                    h.neighborhood.clone(),
                ),
                MapChoice::Sector => (
                    linear_color(h.sector_code as f64, sector_range.0, sector_range.1, &SPECTRAL11),
                    h.neighborhood.clone(),
                ),
            };
            MapDot {
                x: h.position.x,
                y: h.position.y,
                color: color.to_string(),
                label,
            }
        })
        .collect()
}

pub fn map_page(
    sidebar: &SidebarVm,
    choice: MapChoice,
    houses: &[HouseRecord],
    price_range: (f64, f64),
) -> Result<Markup, ProjectionError> {
    let window = ames_window()?;
    let landmarks = landmark_dots()?;
    let dots = house_dots(houses, choice, price_range);
    let choices: Vec<&str> = MapChoice::ALL.iter().map(|c| c.label()).collect();

    Ok(desktop_layout(
        Page::Map,
        sidebar,
        html! {
            h1 { "Map of Ames" }
            div class="columns" {
                div class="col-main" {
                    p { "Data: " (choice.label()) }
                    div class="map-frame" {
                        (house_map(window, &dots, &landmarks, 720, 720))
                        @if choice == MapChoice::SalePrice {
                            (color_bar("Price $(thousands)", price_range.0, price_range.1, &SPECTRAL11))
                        }
                    }

                    ul class="landmark-list" {
                        @for mark in &landmarks {
                            li { (mark.label) }
                        }
                    }

                    (expander("Sidenote on Distance from Walmart vs YearBuilt", html! {
                        p { "Distance from Walmart correlates with YearBuilt? (R2 = 0.7)" }
                    }))
                    (expander("Ames Visitor Map", html! {
                        p { "City Sectors from The Ames Convention & Visitors Bureau" }
                    }))
                }
                div class="col-side" {
                    (radio_form(
                        Page::Map.path(),
                        "Choose Map:",
                        "choice",
                        &choices,
                        choice.label(),
                        &sidebar.hidden_fields(),
                    ))
                }
            }
        },
    ))
}
