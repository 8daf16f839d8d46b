use crate::data::{HouseRecord, ModelHouse};
use crate::domain::estimate::PriceEstimate;
use crate::domain::format::{format_amount, format_thousands};
use crate::domain::renovation::{
    BaselineAmenities, Renovation, RenovationOptions, BATHS_FEATURE, BATH_STEP, MAX_ADDED_BATHS,
};
use crate::domain::sectors::house_type_name;
use crate::domain::stats::{linear_color, SPECTRAL11};
use crate::templates::components::charts::{house_map, MapDot, MapWindow};
use crate::templates::{desktop_layout, Page, SidebarVm};
use maud::{html, Markup};

pub struct RenovationVm<'a> {
    /// Houses of the sidebar neighborhood, in table order.
    pub houses: Vec<&'a HouseRecord>,
    pub selected: &'a HouseRecord,
    pub model_house: &'a ModelHouse,
    pub renovation: Renovation,
    pub estimate: PriceEstimate,
    pub price_range: (f64, f64),
}

pub fn renovation_page(sidebar: &SidebarVm, vm: &RenovationVm) -> Markup {
    let features = &vm.model_house.features;
    let amenities = BaselineAmenities::of(features);
    let options = RenovationOptions::of(features);
    let house_type = house_type_name(vm.selected.house_type).unwrap_or("House");
    let sidebar_query = sidebar.query();

    desktop_layout(
        Page::Renovation,
        sidebar,
        html! {
            h1 { "Renovation Modeler" }
            div class="columns renovation" {
                section class="col-main" {
                    h4 { em { "Select:" } }
                    h5 { "Location & Type of House" }
                    table class="addresses" {
                        thead { tr { th { "Address" } th { "Sale Price" } } }
                        tbody {
                            @for h in &vm.houses {
                                tr class=[(h.pid == vm.selected.pid).then_some("selected")] {
                                    td {
                                        a href=(format!("{}?{}&pid={}", Page::Renovation.path(), sidebar_query, h.pid)) {
                                            (h.address)
                                        }
                                    }
                                    td class="num" { "$" (format_amount(h.sale_price)) }
                                }
                            }
                        }
                    }

                    h4 class="address" { (vm.selected.address) }
                    p class="caption" { (house_type) " in " (vm.selected.neighborhood) }
                    p class="caption" {
                        "Area: " (format_amount(features.get("GoodLivArea").unwrap_or(0.0))) " sf (1F + 2F + FinBsmt)"
                    }
                    p class="caption" {
                        "Unfinished Bsmt: " (format_amount(features.get("BsmtUnfSF").unwrap_or(0.0))) " sf"
                    }
                    (neighborhood_map(&vm.houses, vm.price_range))
                }

                form class="col-controls" method="get" action=(Page::Renovation.path())
                    hx-get="/renovation/estimate" hx-target="#estimate-panel" hx-swap="outerHTML"
                    hx-trigger="change" {
                    @for (k, v) in sidebar.hidden_fields() {
                        input type="hidden" name=(k) value=(v);
                    }
                    input type="hidden" name="pid" value=(vm.selected.pid);

                    div class="baseline" {
                        h5 { "Baseline House" }
                        (fixed_answer("Pool", amenities.pool))
                        (fixed_answer("Central Air", amenities.central_air))
                        (fixed_answer("Paved Driveway", amenities.paved_drive))
                        p {
                            "Above Ground Baths: "
                            (format_amount(features.get(BATHS_FEATURE).unwrap_or(0.0)))
                        }
                    }

                    div class="renovation-options" {
                        h5 { "Renovation" }
                        @if options.pool {
                            (yes_no("Build Pool", "pool", vm.renovation.build_pool))
                        }
                        @if options.central_air {
                            (yes_no("Install Central Air", "central_air", vm.renovation.install_central_air))
                        }
                        @if options.paved_drive {
                            (yes_no("Pave Driveway", "paved_drive", vm.renovation.pave_driveway))
                        }
                        @if options.baths {
                            label for="baths" { "Build Bathrooms" }
                            input type="range" name="baths" id="baths"
                                min="0" max=(MAX_ADDED_BATHS) step=(BATH_STEP)
                                value=(vm.renovation.added_baths)
                                oninput="this.nextElementSibling.value = this.value";
                            output { (vm.renovation.added_baths) }
                        }
                        @if vm.renovation.is_noop() {
                            p class="caption" { "Pick a renovation to compare prices." }
                        }
                        noscript { button type="submit" { "Estimate" } }
                    }
                }

                (estimate_panel(&vm.estimate, vm.model_house.actual_price))
            }
        },
    )
}

/// Before/after prices. Swapped in place by htmx when the options change.
pub fn estimate_panel(estimate: &PriceEstimate, actual_price: Option<f64>) -> Markup {
    let trend = match estimate.delta.signum() {
        1 => "up",
        -1 => "down",
        _ => "flat",
    };

    html! {
        section id="estimate-panel" class="col-prices" {
            div class="price" {
                h3 { "$" (format_thousands(estimate.base_price)) }
                p class="caption" { "Baseline House Price" }
                @if let Some(actual) = actual_price {
                    p class="caption" { "actual: " strong { "$" (format_amount(actual)) } }
                }
            }
            div class="price" {
                h3 { "$" (format_thousands(estimate.reno_price)) }
                p class="caption" { "Renovated House Price" }
            }
            div class={ "metric " (trend) } {
                span class="metric-value" { "$" (format_thousands(estimate.delta)) }
                span class="metric-delta" { (format!("{}%", estimate.percent_change)) }
                p class="caption" { "Difference" }
            }
        }
    }
}

fn fixed_answer(label: &str, present: bool) -> Markup {
    html! {
        p { (label) ": " strong { @if present { "Yes" } @else { "No" } } }
    }
}

fn yes_no(legend: &str, name: &str, yes: bool) -> Markup {
    html! {
        fieldset {
            legend { (legend) }
            label class="radio" {
                input type="radio" name=(name) value="No" checked[!yes];
                " No"
            }
            label class="radio" {
                input type="radio" name=(name) value="Yes" checked[yes];
                " Yes"
            }
        }
    }
}

/// Small map of just the listed houses, colored by sale price.
fn neighborhood_map(houses: &[&HouseRecord], price_range: (f64, f64)) -> Markup {
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for h in houses {
        x_min = x_min.min(h.position.x);
        x_max = x_max.max(h.position.x);
        y_min = y_min.min(h.position.y);
        y_max = y_max.max(h.position.y);
    }
    if !x_min.is_finite() {
        return html! {};
    }

    let pad = 250.0;
    let window = MapWindow {
        x_min: x_min - pad,
        x_max: x_max + pad,
        y_min: y_min - pad,
        y_max: y_max + pad,
    };
    let dots: Vec<MapDot> = houses
        .iter()
        .map(|h| MapDot {
            x: h.position.x,
            y: h.position.y,
            color: linear_color(h.sale_price, price_range.0, price_range.1, &SPECTRAL11).to_string(),
            label: h.address.clone(),
        })
        .collect();

    house_map(window, &dots, &[], 300, 260)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::features::FeatureRow;
    use crate::domain::geo::{GeoPoint, ProjectedPoint};
    use crate::domain::sectors::Sector;

    fn listed_house() -> HouseRecord {
        HouseRecord {
            pid: 1,
            address: "1 Test St".into(),
            neighborhood: "NAmes".into(),
            sector: Sector::North,
            house_type: 1,
            sale_price: 150_000.0,
            year_built: 1960,
            overall_qual: 5,
            location: GeoPoint {
                latitude: 42.04,
                longitude: -93.62,
            },
            position: ProjectedPoint {
                x: -10_421_000.0,
                y: 5_167_000.0,
            },
            neighborhood_code: 0,
            sector_code: 0,
        }
    }

    fn render(features: FeatureRow) -> String {
        let selected = listed_house();
        let model_house = ModelHouse {
            pid: 1,
            actual_price: None,
            features,
        };
        let sidebar = SidebarVm {
            sector: Sector::North,
            neighborhoods: vec!["NAmes".into()],
            neighborhood: "NAmes".into(),
        };
        let vm = RenovationVm {
            houses: vec![&selected],
            selected: &selected,
            model_house: &model_house,
            renovation: Renovation::default(),
            estimate: PriceEstimate {
                base_price: 150_000,
                reno_price: 150_000,
                delta: 0,
                percent_change: 0.0,
            },
            price_range: (100_000.0, 200_000.0),
        };
        renovation_page(&sidebar, &vm).into_string()
    }

    #[test]
    fn offers_only_options_the_features_can_express() {
        let full: FeatureRow = [
            ("GoodLivArea", 1200.0),
            ("AllBathAbv", 1.0),
            ("HasPool", 0.0),
            ("CentralAir_Y", 0.0),
            ("PavedDrive_Y", 1.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        let html = render(full);
        assert!(html.contains("Build Pool"));
        assert!(html.contains("Install Central Air"));
        assert!(!html.contains("Pave Driveway"));
        assert!(html.contains(r#"name="baths""#));

        let narrow: FeatureRow = [("GoodLivArea", 1200.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let html = render(narrow);
        assert!(!html.contains("Build Pool"));
        assert!(!html.contains("Install Central Air"));
        assert!(!html.contains("Pave Driveway"));
        assert!(!html.contains(r#"name="baths""#));
    }

    #[test]
    fn panel_formats_prices_and_change() {
        let estimate = PriceEstimate {
            base_price: 200_000,
            reno_price: 220_000,
            delta: 20_000,
            percent_change: 10.0,
        };
        let html = estimate_panel(&estimate, Some(189_900.0)).into_string();

        assert!(html.contains("$200,000"));
        assert!(html.contains("$220,000"));
        assert!(html.contains("$20,000"));
        assert!(html.contains("10%"));
        assert!(html.contains("$189,900"));
        assert!(html.contains(r#"class="metric up""#));
    }

    #[test]
    fn panel_keeps_sign_on_losses() {
        let estimate = PriceEstimate {
            base_price: 200_000,
            reno_price: 180_000,
            delta: -20_000,
            percent_change: -10.0,
        };
        let html = estimate_panel(&estimate, None).into_string();

        assert!(html.contains("$-20,000"));
        assert!(html.contains("-10%"));
        assert!(!html.contains("actual:"));
    }
}
