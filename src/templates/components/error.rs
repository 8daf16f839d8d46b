use maud::{html, Markup, DOCTYPE};

/// Standalone error page; doesn't need the dataset to render.
pub fn error_page(status: u16, message: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Error " (status) }
                link rel="stylesheet" href="/static/main.css";
            }
            body class="error-page" {
                h1 { "Error " (status) }
                p { (message) }
                p { a href="/" { "← Back to the map" } }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_message() {
        let page = error_page(400, "<bad pid>").into_string();
        assert!(page.contains("Error 400"));
        assert!(page.contains("&lt;bad pid&gt;"));
    }
}
