use crate::templates::components::card;
use crate::templates::{desktop_layout, Page, SidebarVm};
use maud::{html, Markup};

struct Collaborator {
    name: &'static str,
    github: &'static str,
    linkedin: &'static str,
}

const COLLABORATORS: [Collaborator; 4] = [
    Collaborator {
        name: "Daniel Nie",
        github: "https://github.com/dnie44",
        linkedin: "https://www.linkedin.com/in/danielnie/",
    },
    Collaborator {
        name: "David Kressley",
        github: "https://github.com/Skipp-py",
        linkedin: "https://www.linkedin.com/in/david-kressley-2a4a2194/",
    },
    Collaborator {
        name: "Karl Lundquist",
        github: "https://github.com/klundquist",
        linkedin: "https://www.linkedin.com/in/karl-lundquist/",
    },
    Collaborator {
        name: "Tony Pennoyer",
        github: "https://github.com/tonypennoyer",
        linkedin: "https://www.linkedin.com/in/tony-pennoyer-155172123/",
    },
];

pub fn collaborators_page(sidebar: &SidebarVm) -> Markup {
    desktop_layout(
        Page::Collaborators,
        sidebar,
        html! {
            h1 { "Collaborators" }
            table class="collaborators" {
                tbody {
                    @for c in &COLLABORATORS {
                        tr {
                            th { (c.name) }
                            td { a href=(c.github) { "Github" } }
                            td { a href=(c.linkedin) { "LinkedIn" } }
                        }
                    }
                }
            }
            (card("About", html! {
                p {
                    "We are Machine Learning Fellows at "
                    a href="https://nycdatascience.com/" { "NYC Data Science Academy" }
                }
            }))
        },
    )
}
