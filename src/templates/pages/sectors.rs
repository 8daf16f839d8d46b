use crate::domain::stats::{CompositionRow, OverlayChoice};
use crate::domain::sectors::{Sector, HOUSE_TYPES};
use crate::templates::components::charts::stacked_bars;
use crate::templates::components::{expander, radio_form};
use crate::templates::{desktop_layout, Page, SidebarVm};
use maud::{html, Markup};

pub struct SectorsVm<'a> {
    pub overlay: OverlayChoice,
    pub composition: &'a [CompositionRow],
    pub overlay_values: &'a [(Sector, f64)],
}

pub fn sectors_page(sidebar: &SidebarVm, vm: &SectorsVm) -> Markup {
    let choices: Vec<&str> = OverlayChoice::ALL.iter().map(|c| c.label()).collect();

    desktop_layout(
        Page::Sectors,
        sidebar,
        html! {
            h1 { "EDA with City Sectors" }
            div class="columns" {
                div class="col-main" {
                    (stacked_bars(vm.composition, vm.overlay_values, vm.overlay.label()))

                    (expander("HouseType Comparisons", html! {
                        table class="house-types" {
                            thead { tr { th { "Code" } th { "House Type" } } }
                            tbody {
                                @for (code, name) in HOUSE_TYPES {
                                    tr { td { (code) } td { (name) } }
                                }
                            }
                        }
                    }))
                    (expander("Price per SF Analysis", html! {
                        p { "Price per SF drops as house size increases in all Sectors, but most pronounced in SE, NO, & DT." }
                        p { "The phenomenon is only seen in Split, Duplex or 2 Family houses." }
                    }))
                }
                div class="col-side" {
                    (radio_form(
                        Page::Sectors.path(),
                        "Overlay Data:",
                        "overlay",
                        &choices,
                        vm.overlay.label(),
                        &sidebar.hidden_fields(),
                    ))
                }
            }
        },
    )
}
