use maud::{html, Markup};

pub mod charts;
pub mod error;

pub use error::error_page;

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h3 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// Collapsible note under a chart.
pub fn expander(summary: &str, body: Markup) -> Markup {
    html! {
        details class="expander" {
            summary { (summary) }
            (body)
        }
    }
}

/// Radio group that reloads the page with `name=<choice>`, keeping `hidden` params.
pub fn radio_form(
    action: &str,
    legend: &str,
    name: &str,
    choices: &[&str],
    selected: &str,
    hidden: &[(&str, &str)],
) -> Markup {
    html! {
        form method="get" action=(action) class="radio-form" {
            @for (k, v) in hidden {
                input type="hidden" name=(k) value=(v);
            }
            fieldset {
                legend { (legend) }
                @for choice in choices {
                    label class="radio" {
                        input type="radio" name=(name) value=(choice)
                            checked[*choice == selected]
                            onchange="this.form.submit()";
                        " " (choice)
                    }
                }
            }
            noscript { button type="submit" { "Show" } }
        }
    }
}
