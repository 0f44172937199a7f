use std::sync::Arc;

use anyhow::Context;
use relay_templates_contracts::{
    RenderedTemplate, Template, TemplateService, BASE_TEMPLATE, TEMPLATES,
};
use tera::Tera;

#[derive(Debug, Clone)]
pub struct TemplateServiceImpl {
    tera: Arc<Tera>,
}

impl TemplateServiceImpl {
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        // template values are html-encoded before they reach the renderer
        tera.autoescape_on(vec![]);

        tera.add_raw_template("base", BASE_TEMPLATE)
            .context("Failed to load base template")?;

        for &(name, html, text) in TEMPLATES {
            tera.add_raw_template(name, html)
                .with_context(|| format!("Failed to load html template {name}"))?;
            tera.add_raw_template(&text_name(name), text)
                .with_context(|| format!("Failed to load text template {name}"))?;
        }

        Ok(Self { tera: tera.into() })
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<RenderedTemplate> {
        let context = tera::Context::from_serialize(template)?;
        Ok(RenderedTemplate {
            html: self.tera.render(T::NAME, &context)?,
            text: self.tera.render(&text_name(T::NAME), &context)?,
        })
    }
}

fn text_name(name: &str) -> String {
    format!("{name}.txt")
}
