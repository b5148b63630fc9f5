//! HTML page templates
//!
//! Pages are minijinja templates. `.html` templates auto-escape every value.
//! The environment is built once at startup and only read afterwards.

use std::path::Path;

use anyhow::{Context, Result};
use minijinja::{Environment, UndefinedBehavior, context, path_loader};
use tracing::info;

use crate::models::BriefPage;

const INDEX: &str = "index.html";
const BRIEF: &str = "brief.html";

/// Compiled page templates
#[derive(Debug, Clone)]
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Templates compiled into the binary
    pub fn embedded() -> Result<Self> {
        let mut env = Self::environment();
        env.add_template(INDEX, include_str!("../templates/index.html"))
            .context("Invalid index template")?;
        env.add_template(BRIEF, include_str!("../templates/brief.html"))
            .context("Invalid brief template")?;
        Ok(Self { env })
    }

    /// Load templates from `dir`, or use the embedded ones when `dir` is `None`
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        let Some(dir) = dir else {
            return Self::embedded();
        };

        info!("Loading templates from {}", dir.display());
        let mut env = Self::environment();
        env.set_loader(path_loader(dir.to_path_buf()));
        for name in [INDEX, BRIEF] {
            env.get_template(name)
                .with_context(|| {
                    format!("Failed to load template {}", dir.join(name).display())
                })?;
        }
        Ok(Self { env })
    }

    fn environment() -> Environment<'static> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env
    }

    pub fn render_index(&self) -> Result<String, minijinja::Error> {
        self.env.get_template(INDEX)?.render(context! {})
    }

    /// Renders `page` plus its display-formatted fields
    pub fn render_brief(&self, page: &BriefPage) -> Result<String, minijinja::Error> {
        let today = &page.today;
        self.env.get_template(BRIEF)?.render(context! {
            page,
            date => today.format_date(),
            max_temp => today.format_max_temp(),
            min_temp => today.format_min_temp(),
            precipitation => today.format_precipitation(),
        })
    }
}
