//! Server-rendered HTML for the upload form and its results.

use std::fmt::Write as _;

use crate::evaluation::action::Action;
use crate::evaluation::controller::{Outcome, UPLOAD_SUCCESS};

pub const PAGE_TITLE: &str = "Application Tracking System with Gemini Pro Vision";

/// What the page shows beneath the form.
pub struct PageView<'a> {
    pub job_description: &'a str,
    pub document_uploaded: bool,
    pub outcome: Option<&'a Outcome>,
}

impl PageView<'static> {
    pub fn empty() -> Self {
        PageView {
            job_description: "",
            document_uploaded: false,
            outcome: None,
        }
    }
}

pub fn render(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{PAGE_TITLE}</title>");
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n<main>\n");
    let _ = writeln!(html, "<h1>{PAGE_TITLE} &#129302;</h1>");

    html.push_str("<form method=\"post\" action=\"/\" enctype=\"multipart/form-data\">\n");
    html.push_str("<label for=\"job_description\">Job Description:</label>\n");
    let _ = writeln!(
        html,
        "<textarea id=\"job_description\" name=\"job_description\" rows=\"10\">{}</textarea>",
        escape_html(view.job_description)
    );
    html.push_str("<label for=\"resume\">Upload Resume (PDF only)</label>\n");
    html.push_str(
        "<input id=\"resume\" type=\"file\" name=\"resume\" accept=\"application/pdf,.pdf\">\n",
    );
    if view.document_uploaded {
        let _ = writeln!(html, "<p class=\"success\">{UPLOAD_SUCCESS}</p>");
    }
    html.push_str("<div class=\"actions\">\n");
    for action in Action::ALL {
        let _ = writeln!(
            html,
            "<button type=\"submit\" name=\"action\" value=\"{}\">{}</button>",
            action.form_value(),
            escape_html(action.label())
        );
    }
    html.push_str("</div>\n</form>\n");

    if let Some(outcome) = view.outcome {
        render_outcome(&mut html, outcome);
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_outcome(html: &mut String, outcome: &Outcome) {
    match outcome {
        Outcome::NoAction => {}
        Outcome::Displayed { action, response } => {
            html.push_str("<section class=\"result\">\n");
            let _ = writeln!(html, "<h2>{}</h2>", escape_html(action.heading()));
            let _ = writeln!(html, "<pre>{}</pre>", escape_html(response.as_str()));
            html.push_str("</section>\n");
        }
        Outcome::Warning(missing) => {
            let _ = writeln!(
                html,
                "<p class=\"warning\">{}</p>",
                escape_html(missing.message())
            );
        }
        Outcome::RasterizationFailed(_) | Outcome::ModelFailed(_) => {
            if let Some(message) = outcome.message() {
                let _ = writeln!(html, "<p class=\"error\">{}</p>", escape_html(&message));
            }
        }
    }
}

/// Escapes text for use inside element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const STYLE: &str = "<style>
body { font-family: system-ui, sans-serif; margin: 0; background: #fafafa; }
main { max-width: 72rem; margin: 0 auto; padding: 1.5rem; }
label { display: block; margin-top: 1rem; font-weight: 600; }
textarea { width: 100%; font: inherit; }
.actions { display: flex; gap: 0.5rem; margin-top: 1rem; flex-wrap: wrap; }
.success { color: #1b5e20; background: #e8f5e9; padding: 0.5rem; }
.warning { color: #7a4f01; background: #fff8e1; padding: 0.5rem; }
.error { color: #b71c1c; background: #ffebee; padding: 0.5rem; }
pre { white-space: pre-wrap; font-family: inherit; }
</style>
";
