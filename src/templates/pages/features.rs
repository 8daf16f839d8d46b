use crate::domain::stats::{Facet, FeaturePick};
use crate::templates::components::charts::facet_scatter;
use crate::templates::{desktop_layout, Page, SidebarVm};
use maud::{html, Markup};

pub fn features_page(sidebar: &SidebarVm, pick: FeaturePick, facets: &[Facet]) -> Markup {
    let title = format!("Sale Price vs. GoodLivArea by {}", pick.column());

    desktop_layout(
        Page::Features,
        sidebar,
        html! {
            h1 { "Feature selection" }
            form method="get" action=(Page::Features.path()) class="pick-form" {
                @for (k, v) in sidebar.hidden_fields() {
                    input type="hidden" name=(k) value=(v);
                }
                label for="pick" { "Select a feature:" }
                select name="pick" id="pick" onchange="this.form.submit()" {
                    @for p in FeaturePick::ALL {
                        option value=(p.column()) selected[p == pick] { (p.column()) }
                    }
                }
                noscript { button type="submit" { "Show" } }
            }

            @if facets.is_empty() {
                p class="empty" { "No houses have a recorded " (pick.column()) "." }
            } @else {
                (facet_scatter(facets, &title))
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sectors::Sector;

    #[test]
    fn selects_current_pick() {
        let sidebar = SidebarVm {
            sector: Sector::North,
            neighborhoods: vec!["NAmes".into()],
            neighborhood: "NAmes".into(),
        };
        let html = features_page(&sidebar, FeaturePick::GarageQual, &[]).into_string();

        assert!(html.contains(r#"value="GarageQual" selected"#));
        assert!(html.contains("No houses have a recorded GarageQual."));
    }
}
