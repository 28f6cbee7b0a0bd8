//! Page templates, compiled into the binary.

use std::fmt::Write;

use minijinja::{context, escape_formatter, AutoEscape, Environment, ErrorKind, Output, State, Value};
use oncotarget_common::{EnrichmentSnapshot, OncotargetError};

const INDEX_HTML: &str = include_str!("../templates/index.html");
const LOADING_HTML: &str = include_str!("../templates/loading.html");

#[derive(Debug, Clone)]
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> oncotarget_common::Result<Self> {
        let mut env = Environment::new();
        env.set_formatter(html_formatter);
        for (name, source) in [("index.html", INDEX_HTML), ("loading.html", LOADING_HTML)] {
            env.add_template(name, source)
                .map_err(|e| OncotargetError::Render(format!("{}: {}", name, e)))?;
        }
        Ok(Self { env })
    }

    /// The target table page.
    pub fn render_index(&self, snapshot: &EnrichmentSnapshot) -> Result<String, minijinja::Error> {
        self.env.get_template("index.html")?.render(context! {
            targets => &snapshot.targets,
            completed_at => snapshot.completed_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            found => snapshot.found,
            unavailable => snapshot.unavailable,
        })
    }

    /// Shown while the first enrichment run is in progress.
    pub fn render_loading(&self, running: bool) -> Result<String, minijinja::Error> {
        self.env.get_template("loading.html")?.render(context! { running => running })
    }
}

/// HTML autoescape that leaves `/` alone, so names and URLs stay readable in the markup.
fn html_formatter(out: &mut Output, state: &State, value: &Value) -> Result<(), minijinja::Error> {
    let text = match value.as_str() {
        Some(text) if !value.is_safe() && matches!(state.auto_escape(), AutoEscape::Html) => text,
        _ => return escape_formatter(out, state, value),
    };

    for c in text.chars() {
        let written = match c {
            '&' => out.write_str("&amp;"),
            '<' => out.write_str("&lt;"),
            '>' => out.write_str("&gt;"),
            '"' => out.write_str("&quot;"),
            '\'' => out.write_str("&#x27;"),
            c => out.write_char(c),
        };
        written.map_err(|_| minijinja::Error::new(ErrorKind::WriteFailure, "failed to write output"))?;
    }
    Ok(())
}
