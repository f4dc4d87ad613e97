use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::article::render_article;
use crate::config::{Config, SiteConfig, WallConfig};
use crate::markdown::markdown_to_html;
use crate::post::{self, Post, PostFilter};
use crate::site::{self, Section};
use crate::template::{RenderContext, Renderer, TemplateError};
use crate::wall;

#[derive(Debug)]
pub enum BuildError {
    MissingSourceDir,
    MissingData(PathBuf),
    Io(std::io::Error),
    Data(serde_json::Error),
    Template(TemplateError),
    Render(RenderError),
}

impl From<std::io::Error> for BuildError {
    fn from(err: std::io::Error) -> Self {
        BuildError::Io(err)
    }
}

impl From<serde_json::Error> for BuildError {
    fn from(err: serde_json::Error) -> Self {
        BuildError::Data(err)
    }
}

impl From<TemplateError> for BuildError {
    fn from(err: TemplateError) -> Self {
        BuildError::Template(err)
    }
}

impl From<RenderError> for BuildError {
    fn from(err: RenderError) -> Self {
        BuildError::Render(err)
    }
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::MissingSourceDir => write!(f, "Source directory not specified"),
            BuildError::MissingData(p) => {
                write!(f, "Could not load posts data file: {}", p.display())
            }
            BuildError::Io(e) => write!(f, "IO error: {}", e),
            BuildError::Data(e) => write!(f, "Posts data error: {}", e),
            BuildError::Template(e) => write!(f, "Template error: {}", e),
            BuildError::Render(e) => write!(f, "Render error: {}", e),
        }
    }
}

impl std::error::Error for BuildError {}

#[derive(Debug)]
pub enum RenderError {
    Template(TemplateError),
    Io(std::io::Error),
}

impl From<TemplateError> for RenderError {
    fn from(err: TemplateError) -> Self {
        RenderError::Template(err)
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::Io(err)
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Template(e) => write!(f, "Template error: {}", e),
            RenderError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for RenderError {}

#[derive(Debug, Serialize)]
pub struct NavItem {
    pub text: String,
    pub link: String,
}

pub struct WallBuilder {
    source_dir: Option<PathBuf>,
    output_dir: PathBuf,
    theme_dir: PathBuf,
    config: Config,
    posts: Vec<Post>,
}

impl Default for WallBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WallBuilder {
    pub fn new() -> Self {
        Self {
            source_dir: None,
            output_dir: PathBuf::from("./out"),
            theme_dir: PathBuf::from("./theme"),
            config: Config::default(),
            posts: Vec::new(),
        }
    }

    // Required configuration
    pub fn source_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source_dir = Some(path.as_ref().to_path_buf());
        self
    }

    // Optional paths
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn theme_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.theme_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn add_posts(mut self, posts: Vec<Post>) -> Self {
        self.posts.extend(posts);
        self
    }

    pub fn build(self) -> Result<Wall, BuildError> {
        let source_dir = self.source_dir.ok_or(BuildError::MissingSourceDir)?;

        let site_config = self.config.site.clone().unwrap_or_default();
        let wall_config = self.config.wall.clone().unwrap_or_default();

        let mut posts = self.posts;
        post::sort_newest_first(&mut posts);

        // Global context is set once; pages only add their own values.
        let mut renderer = Renderer::new(&self.theme_dir)?;
        renderer.set_global_context("site", &site_config);
        renderer.set_global_context("navigation", &navigation(&site_config));
        renderer.set_global_context("dev", &self.config.dev_server);

        Ok(Wall {
            posts,
            renderer,
            source_dir,
            output_dir: self.output_dir,
            site: site_config,
            wall: wall_config,
        })
    }
}

// Home and the wall always exist; about/contact only when configured.
fn navigation(site: &SiteConfig) -> Vec<NavItem> {
    Section::ALL
        .iter()
        .filter(|section| match section {
            Section::About => site.about.is_some(),
            Section::Contact => site.contact.is_some(),
            _ => true,
        })
        .map(|section| NavItem {
            text: section.title().to_string(),
            link: section.url(),
        })
        .collect()
}

pub struct Wall {
    posts: Vec<Post>,
    renderer: Renderer,
    source_dir: PathBuf,
    output_dir: PathBuf,
    site: SiteConfig,
    wall: WallConfig,
}

impl Wall {
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn render_all(&self) -> Result<(), RenderError> {
        std::fs::create_dir_all(&self.output_dir)?;

        self.render_home()?;
        self.render_wall_page(None)?;

        for tag in post::unique_tags(&self.posts) {
            self.render_wall_page(Some(&tag))?;
        }

        for post in &self.posts {
            self.render_article_page(post)?;
        }

        if let Some(about) = &self.site.about {
            self.render_section_page(Section::About, about)?;
        }
        if let Some(contact) = &self.site.contact {
            self.render_section_page(Section::Contact, contact)?;
        }

        self.copy_assets()?;

        Ok(())
    }

    fn render_home(&self) -> Result<(), RenderError> {
        let html = self.renderer.render("home.html", &RenderContext::new())?;
        self.write_page(&Section::Home.out_path(), &html)
    }

    /// The wall listing: every post when `tag` is `None`, otherwise only the
    /// posts carrying that tag.
    fn render_wall_page(&self, tag: Option<&str>) -> Result<(), RenderError> {
        let filter = PostFilter {
            query: String::new(),
            tag: tag.map(|t| t.to_string()),
        };
        let selected: Vec<Post> = self
            .posts
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        let mut context = RenderContext::new();
        context.add_to_context("title", Section::Research.title());
        context.add_to_context("columns", &self.wall.columns);
        context.add_to_context("tag_nav", &self.tag_navigation());
        context.add_to_context("active_tag", &tag);

        if selected.is_empty() {
            context.add_to_context("status", &"No posts match your filters.");
        } else {
            context.add_to_context("tiles", &wall::render_tiles(&selected, self.wall.columns));
        }

        let html = self.renderer.render("wall.html", &context)?;

        let out_path = match tag {
            Some(tag) => site::tag_out_path(tag),
            None => Section::Research.out_path(),
        };
        self.write_page(&out_path, &html)
    }

    fn tag_navigation(&self) -> Vec<NavItem> {
        let mut nav = vec![NavItem {
            text: "All tags".to_string(),
            link: Section::Research.url(),
        }];
        for tag in post::unique_tags(&self.posts) {
            nav.push(NavItem {
                link: site::tag_url(&tag),
                text: tag,
            });
        }
        nav
    }

    fn render_article_page(&self, post: &Post) -> Result<(), RenderError> {
        let mut context = RenderContext::new();
        context.add_to_context("title", &post.title);
        context.add_to_context("article", &render_article(post));

        let html = self.renderer.render("article.html", &context)?;
        self.write_page(&site::article_out_path(&post.id), &html)
    }

    /// About/contact bodies are written in the same markdown subset as posts.
    fn render_section_page(&self, section: Section, body: &str) -> Result<(), RenderError> {
        let mut context = RenderContext::new();
        context.add_to_context("title", section.title());
        context.add_to_context("body", &markdown_to_html(body));

        let html = self.renderer.render("section.html", &context)?;
        self.write_page(&section.out_path(), &html)
    }

    /// Everything in the source dir except the data file is copied through
    /// unchanged (thumbnails, hero images, favicons).
    fn copy_assets(&self) -> Result<(), RenderError> {
        let data_file = Path::new(&self.wall.data);

        for entry in WalkDir::new(&self.source_dir)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(&self.source_dir).unwrap_or(path);
            if relative == data_file {
                continue;
            }

            let target = self.output_dir.join(relative);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(path, target)?;
        }

        Ok(())
    }

    fn write_page(&self, out_path: &Path, html: &str) -> Result<(), RenderError> {
        let target = self.output_dir.join(out_path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(target, html)?;
        Ok(())
    }
}

/// Build the whole wall in one call: read and coerce the posts data file,
/// assemble the builder, render every page and copy assets through.
pub fn build_wall(
    config: &Config,
    source_dir: &Path,
    output_dir: &Path,
    theme_dir: &Path,
) -> Result<(), BuildError> {
    let wall_config = config.wall.clone().unwrap_or_default();

    let data_path = source_dir.join(&wall_config.data);
    if !data_path.is_file() {
        return Err(BuildError::MissingData(data_path));
    }

    let data = std::fs::read_to_string(&data_path)?;
    let posts = post::posts_from_json(&data)?;
    println!("Loaded {} post(s) from {}", posts.len(), data_path.display());

    let wall = WallBuilder::new()
        .source_dir(source_dir)
        .output_dir(output_dir)
        .theme_dir(theme_dir)
        .config(config.clone())
        .add_posts(posts)
        .build()?;

    wall.render_all()?;

    Ok(())
}
