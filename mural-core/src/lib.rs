pub mod article;
pub mod builder;
pub mod config;
pub mod markdown;
pub mod post;
pub mod site;
pub mod template;
pub mod wall;

// Re-export main types
pub use article::render_article;
pub use builder::{BuildError, NavItem, Wall, WallBuilder, build_wall};
pub use markdown::{Block, markdown_to_html};
pub use post::{Post, PostFilter, posts_from_json};
pub use site::Section;
pub use template::{RenderContext, Renderer, TemplateError};
