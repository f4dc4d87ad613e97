use crate::markdown::markdown_to_html;
use crate::post::Post;
use crate::site::{self, Section};

/// Assemble one post into the article's inner HTML: hero (when the post has a
/// thumbnail), title, subtitle, TL;DR key points, the rendered body, and the
/// two actions (back to the wall, copy the deep link). Pure; recomputed on
/// every render.
pub fn render_article(post: &Post) -> String {
    let mut html = String::new();

    if !post.thumbnail.is_empty() {
        html.push_str(&format!(
            "<div class=\"hero\"><div style=\"background-image:url('{}')\"></div></div>\n",
            html_escape::encode_quoted_attribute(&post.thumbnail)
        ));
    }

    html.push_str(&format!(
        "<h2>{}</h2>\n",
        html_escape::encode_text(&post.title)
    ));

    if !post.subtitle.is_empty() {
        html.push_str(&format!(
            "<p class=\"muted\">{}</p>\n",
            html_escape::encode_text(&post.subtitle)
        ));
    }

    html.push_str("<div class=\"card\">\n<strong>TL;DR</strong>\n<ul>\n");
    for point in &post.tldr {
        html.push_str(&format!("<li>{}</li>\n", html_escape::encode_text(point)));
    }
    html.push_str("</ul>\n</div>\n");

    html.push_str(&format!(
        "<div class=\"body\">\n{}</div>\n",
        markdown_to_html(&post.markdown)
    ));

    html.push_str(&format!(
        "<div class=\"row\">\n\
         <a class=\"btn\" href=\"{back}\">&larr; Back to wall</a>\n\
         <a class=\"btn primary\" href=\"{link}\" data-copy-link>Copy link</a>\n\
         </div>\n",
        back = Section::Research.url(),
        link = site::article_url(&post.id),
    ));

    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        Post {
            id: "p1".to_string(),
            title: "Title".to_string(),
            subtitle: "Sub".to_string(),
            thumbnail: String::new(),
            date: "2025-01-01".to_string(),
            tags: Vec::new(),
            tldr: vec!["a".to_string(), "b".to_string()],
            markdown: "## H\n- x".to_string(),
        }
    }

    #[test]
    fn test_assembled_order_without_hero() {
        let html = render_article(&post());

        assert!(!html.contains("class=\"hero\""));
        assert!(html.contains("<li>a</li>\n<li>b</li>"));
        assert!(html.contains("<h3>H</h3>\n<ul>\n<li>x</li>\n</ul>"));

        // Fixed order: title, key points, body, actions.
        let title = html.find("<h2>Title</h2>").unwrap();
        let tldr = html.find("TL;DR").unwrap();
        let body = html.find("<h3>H</h3>").unwrap();
        let actions = html.find("Back to wall").unwrap();
        assert!(title < tldr && tldr < body && body < actions);
    }

    #[test]
    fn test_hero_present_with_thumbnail() {
        let mut p = post();
        p.thumbnail = "img/hero.png".to_string();
        let html = render_article(&p);
        assert!(html.contains("<div class=\"hero\">"));
        assert!(html.contains("background-image:url('img/hero.png')"));
    }

    #[test]
    fn test_subtitle_omitted_when_empty() {
        let mut p = post();
        p.subtitle = String::new();
        assert!(!render_article(&p).contains("class=\"muted\""));

        p.subtitle = "Back".to_string();
        assert!(render_article(&p).contains("<p class=\"muted\">Back</p>"));
    }

    #[test]
    fn test_title_and_points_escaped() {
        let mut p = post();
        p.title = "A <b>Title</b>".to_string();
        p.tldr = vec!["x & y".to_string()];
        let html = render_article(&p);
        assert!(html.contains("<h2>A &lt;b&gt;Title&lt;/b&gt;</h2>"));
        assert!(html.contains("<li>x &amp; y</li>"));
    }

    #[test]
    fn test_deep_link_carries_escaped_id() {
        let mut p = post();
        p.id = "deep link #1".to_string();
        let html = render_article(&p);
        assert!(html.contains("href=\"/research/deep%20link%20%231/\""));
        assert!(html.contains("href=\"/research/\""));
    }
}
