use crate::domain::sectors::Sector;
use maud::{html, Markup, DOCTYPE};

/// Dashboard views, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Map,
    Sectors,
    Features,
    FeatureEngineering,
    Renovation,
    Collaborators,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Map,
        Page::Sectors,
        Page::Features,
        Page::FeatureEngineering,
        Page::Renovation,
        Page::Collaborators,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Page::Map => "/map",
            Page::Sectors => "/sectors",
            Page::Features => "/features",
            Page::FeatureEngineering => "/feature-engineering",
            Page::Renovation => "/renovation",
            Page::Collaborators => "/collaborators",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::Map => "Map of Ames",
            Page::Sectors => "City Sectors",
            Page::Features => "House Features",
            Page::FeatureEngineering => "Feature Engineering",
            Page::Renovation => "Renovation Model",
            Page::Collaborators => "Collaborators",
        }
    }
}

/// The "Model House" selector shown on every page.
pub struct SidebarVm {
    pub sector: Sector,
    pub neighborhoods: Vec<String>,
    pub neighborhood: String,
}

impl SidebarVm {
    /// Query string that keeps the sidebar selection when following links.
    pub fn query(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("sector", self.sector.name())
            .append_pair("neighborhood", &self.neighborhood)
            .finish()
    }

    /// The same selection as hidden form inputs.
    pub fn hidden_fields(&self) -> [(&'static str, &str); 2] {
        [
            ("sector", self.sector.name()),
            ("neighborhood", self.neighborhood.as_str()),
        ]
    }
}

pub fn desktop_layout(page: Page, sidebar: &SidebarVm, content: Markup) -> Markup {
    let query = sidebar.query();

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page.label()) " · Ames Housing" }
                link rel="stylesheet" href="/static/main.css";
                script src="https://unpkg.com/htmx.org@1.9.12" defer {}
            }
            body {
                aside class="sidebar" {
                    div class="logo" { "Ames Housing" }

                    nav {
                        h4 { "Navigation" }
                        ul {
                            @for p in Page::ALL {
                                li {
                                    a href=(format!("{}?{}", p.path(), query))
                                      class=[(p == page).then_some("active")] {
                                        (p.label())
                                    }
                                }
                            }
                        }
                    }

                    section class="model-house" {
                        h2 { "Model House" }
                        form method="get" action=(page.path()) {
                            label for="sector" { "Select Sector" }
                            select name="sector" id="sector" onchange="this.form.querySelectorAll('[name=neighborhood]').forEach(function (e) { e.disabled = true; }); this.form.submit();" {
                                @for s in Sector::MENU_ORDER {
                                    option value=(s.name()) selected[s == sidebar.sector] { (s.name()) }
                                }
                            }

                            fieldset {
                                legend { "Select Neighborhood" }
                                @for n in &sidebar.neighborhoods {
                                    label class="radio" {
                                        input type="radio" name="neighborhood" value=(n)
                                            checked[*n == sidebar.neighborhood]
                                            onchange="this.form.submit()";
                                        " " (n)
                                    }
                                }
                            }
                            noscript { button type="submit" { "Apply" } }
                        }

                        form class="export" action="/export" method="get" {
                            @for (k, v) in sidebar.hidden_fields() {
                                input type="hidden" name=(k) value=(v);
                            }
                            button type="submit" { "Download " (sidebar.neighborhood) " houses (.xlsx)" }
                        }
                    }
                }

                main class="content" {
                    (content)
                }
            }
        }
    }
}
