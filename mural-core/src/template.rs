use serde::Serialize;
use std::path::Path;
use tera::{Context, Tera};

// Built-in theme, used whenever no theme directory exists. A bare content
// folder builds without any checkout or configuration.
const DEFAULT_TEMPLATES: [(&str, &str); 5] = [
    ("base.html", include_str!("../templates/base.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("wall.html", include_str!("../templates/wall.html")),
    ("article.html", include_str!("../templates/article.html")),
    ("section.html", include_str!("../templates/section.html")),
];

#[derive(Debug)]
pub enum TemplateError {
    Tera(tera::Error),
    Io(std::io::Error),
}

impl From<tera::Error> for TemplateError {
    fn from(err: tera::Error) -> Self {
        TemplateError::Tera(err)
    }
}

impl From<std::io::Error> for TemplateError {
    fn from(err: std::io::Error) -> Self {
        TemplateError::Io(err)
    }
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::Tera(e) => write!(f, "Template error: {}", e),
            TemplateError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for TemplateError {}

/// Per-page template context. Page-specific values go here; site-wide values
/// live on the [`Renderer`] globals.
#[derive(Default)]
pub struct RenderContext {
    context: Context,
}

impl RenderContext {
    pub fn new() -> Self {
        Self {
            context: Context::new(),
        }
    }

    pub fn add_to_context<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        self.context.insert(key, value);
    }
}

/// Tera wrapper holding the global context shared by every page (site config,
/// navigation, dev mode).
pub struct Renderer {
    tera: Tera,
    globals: Context,
}

impl Renderer {
    /// Load templates from a theme directory, or fall back to the built-in
    /// theme when the directory doesn't exist.
    pub fn new<P: AsRef<Path>>(theme_dir: P) -> Result<Self, TemplateError> {
        let dir = theme_dir.as_ref();

        let tera = if dir.is_dir() {
            Tera::new(&format!("{}/**/*.html", dir.display()))?
        } else {
            let mut tera = Tera::default();
            tera.add_raw_templates(DEFAULT_TEMPLATES)?;
            tera
        };

        Ok(Self {
            tera,
            globals: Context::new(),
        })
    }

    pub fn set_global_context<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        self.globals.insert(key, value);
    }

    pub fn render(&self, template: &str, context: &RenderContext) -> Result<String, TemplateError> {
        let mut merged = self.globals.clone();
        merged.extend(context.context.clone());
        Ok(self.tera.render(template, &merged)?)
    }
}
