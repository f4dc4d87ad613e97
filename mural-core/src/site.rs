use std::path::PathBuf;

/// The wall site's four fixed sections. Routing state is plain values passed
/// around, never shared mutable state; each section maps to one output page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    Research,
    About,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Home,
        Section::Research,
        Section::About,
        Section::Contact,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Research => "research",
            Section::About => "about",
            Section::Contact => "contact",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Research => "Research",
            Section::About => "About",
            Section::Contact => "Contact",
        }
    }

    pub fn url(&self) -> String {
        match self {
            Section::Home => "/".to_string(),
            _ => format!("/{}/", self.slug()),
        }
    }

    pub fn out_path(&self) -> PathBuf {
        match self {
            Section::Home => PathBuf::from("index.html"),
            _ => PathBuf::from(self.slug()).join("index.html"),
        }
    }
}

/// The shareable deep link for one post. The id is carried losslessly,
/// percent-encoded; revisiting the link reproduces the same article page.
pub fn article_url(id: &str) -> String {
    format!("/research/{}/", urlencoding::encode(id))
}

pub fn article_out_path(id: &str) -> PathBuf {
    PathBuf::from("research")
        .join(urlencoding::encode(id).as_ref())
        .join("index.html")
}

/// Filtered wall page for one tag.
pub fn tag_url(tag: &str) -> String {
    format!("/research/tags/{}/", urlencoding::encode(tag))
}

pub fn tag_out_path(tag: &str) -> PathBuf {
    PathBuf::from("research/tags")
        .join(urlencoding::encode(tag).as_ref())
        .join("index.html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_urls_and_out_paths() {
        assert_eq!(Section::Home.url(), "/");
        assert_eq!(Section::Home.out_path(), PathBuf::from("index.html"));
        assert_eq!(Section::Research.url(), "/research/");
        assert_eq!(
            Section::Research.out_path(),
            PathBuf::from("research/index.html")
        );
    }

    #[test]
    fn test_article_url_is_escaped_and_lossless() {
        assert_eq!(article_url("plain-id"), "/research/plain-id/");
        assert_eq!(article_url("spaced id"), "/research/spaced%20id/");
        assert_eq!(article_url("a#b?c"), "/research/a%23b%3Fc/");
        assert_eq!(
            urlencoding::decode("a%23b%3Fc").unwrap(),
            "a#b?c",
            "encoding must round-trip the id"
        );
    }

    #[test]
    fn test_out_paths_match_urls() {
        assert_eq!(
            article_out_path("spaced id"),
            PathBuf::from("research/spaced%20id/index.html")
        );
        assert_eq!(
            tag_out_path("distributed systems"),
            PathBuf::from("research/tags/distributed%20systems/index.html")
        );
        assert_eq!(tag_url("rust"), "/research/tags/rust/");
    }
}
