//! Template rendering for list, detail and account pages
//!
//! Templates are compiled into the binary and loaded into a single `Tera`
//! instance at startup. Names ending in `.html` are autoescaped.

use crate::core::auth::AuthContext;
use crate::core::error::{RenderError, TaxiResult};
use crate::core::listing::ListResult;
use anyhow::Result;
use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

const TEMPLATES: &[(&str, &str)] = &[
    ("taxi/base.html", include_str!("../../templates/taxi/base.html")),
    ("taxi/pagination.html", include_str!("../../templates/taxi/pagination.html")),
    ("taxi/index.html", include_str!("../../templates/taxi/index.html")),
    ("taxi/login.html", include_str!("../../templates/taxi/login.html")),
    (
        "taxi/manufacturer_list.html",
        include_str!("../../templates/taxi/manufacturer_list.html"),
    ),
    (
        "taxi/manufacturer_detail.html",
        include_str!("../../templates/taxi/manufacturer_detail.html"),
    ),
    ("taxi/car_list.html", include_str!("../../templates/taxi/car_list.html")),
    ("taxi/car_detail.html", include_str!("../../templates/taxi/car_detail.html")),
    ("taxi/driver_list.html", include_str!("../../templates/taxi/driver_list.html")),
    (
        "taxi/driver_detail.html",
        include_str!("../../templates/taxi/driver_detail.html"),
    ),
];

/// Navigation state exposed to templates as `page_obj`
#[derive(Debug, Serialize)]
struct PageObj {
    number: usize,
    num_pages: usize,
    has_previous: bool,
    has_next: bool,
    previous_page_number: Option<usize>,
    next_page_number: Option<usize>,
}

/// Renders the embedded templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Load every embedded template
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        Ok(Self { tera })
    }

    /// Render a template to HTML
    pub fn render(&self, name: &str, context: &Context) -> TaxiResult<Html<String>> {
        self.tera.render(name, context).map(Html).map_err(|e| {
            let message = match std::error::Error::source(&e) {
                Some(source) => format!("{}: {}", e, source),
                None => e.to_string(),
            };
            RenderError::Template {
                name: name.to_string(),
                message,
            }
            .into()
        })
    }

    /// Names of the loaded templates
    pub fn template_names(&self) -> Vec<&str> {
        self.tera.get_template_names().collect()
    }
}

/// Context shared by every page: the logged-in user, if any
pub fn base_context(auth: &AuthContext) -> Context {
    let mut context = Context::new();
    context.insert("user", &auth.username());
    context
}

/// Context for a list page
pub fn list_context<T: Serialize>(auth: &AuthContext, result: &ListResult<T>) -> Context {
    let kind = result.kind;
    let page = &result.page;

    let mut context = base_context(auth);
    context.insert(kind.context_list_name(), &page.items);
    context.insert(
        "page_obj",
        &PageObj {
            number: page.number,
            num_pages: page.total_pages,
            has_previous: page.has_previous,
            has_next: page.has_next,
            previous_page_number: page.previous_page_number(),
            next_page_number: page.next_page_number(),
        },
    );
    context.insert("is_paginated", &page.is_paginated());
    context.insert("search_field", kind.search_field());
    context.insert("search_value", &result.search);
    context.insert("empty_message", kind.empty_message());
    context.insert("list_url", &format!("/{}/", kind.plural()));
    context
}
