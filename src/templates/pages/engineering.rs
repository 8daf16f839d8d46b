use crate::templates::{desktop_layout, Page, SidebarVm};
use maud::{html, Markup};

pub fn engineering_page(sidebar: &SidebarVm) -> Markup {
    desktop_layout(
        Page::FeatureEngineering,
        sidebar,
        html! {
            h1 { "Feature Engineering" }
        },
    )
}
