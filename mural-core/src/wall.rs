use crate::post::Post;
use crate::site;

// Tiles without a thumbnail get the wall's accent gradient instead.
const FALLBACK_BG: &str =
    "linear-gradient(135deg, rgba(106,169,255,.25), rgba(139,255,204,.18))";

/// Columns the wall would use at a given viewport width. The static build
/// bakes one configured column count; the breakpoints are for callers that
/// know their width.
pub fn cols_for_width(width: u32) -> u32 {
    if width < 820 {
        2
    } else if width < 1200 {
        3
    } else {
        4
    }
}

/// Depth of a tile on the curved wall, in px. Center columns come forward
/// strongly; rows ripple with a slow cosine wave on top of a base push.
pub fn z_for_index(index: usize, cols: u32) -> i32 {
    let cols = cols.max(1);
    let row = (index as u32 / cols) as f64;
    let col = (index as u32 % cols) as f64;

    let center = (cols as f64 - 1.0) / 2.0;
    let distance = (col - center).abs();
    let col_boost = (1.0 - (distance / (cols as f64 / 2.0)).min(1.0)) * 70.0;

    let row_wave = (row * 0.85).cos() * 10.0;

    let base = 18.0;

    (base + col_boost + row_wave).round() as i32
}

/// One tile: an anchor to the post's article page. At most two tag pills are
/// shown, in original order.
pub fn render_tile(post: &Post, index: usize, cols: u32) -> String {
    let bg = if post.thumbnail.is_empty() {
        FALLBACK_BG.to_string()
    } else {
        format!(
            "url('{}')",
            html_escape::encode_quoted_attribute(&post.thumbnail)
        )
    };

    let pills: String = post
        .tags
        .iter()
        .take(2)
        .map(|tag| {
            format!(
                "<span class=\"pill\">{}</span>",
                html_escape::encode_text(tag)
            )
        })
        .collect();

    format!(
        "<a class=\"tile\" href=\"{href}\" style=\"--bgimg:{bg};--z:{z}px\">\n\
         <div class=\"tile-inner\">\n\
         <div class=\"tile-pills\">{pills}</div>\n\
         <h3 class=\"tile-title\">{title}</h3>\n\
         <p class=\"tile-sub\">{subtitle}</p>\n\
         </div>\n\
         </a>\n",
        href = site::article_url(&post.id),
        bg = bg,
        z = z_for_index(index, cols),
        pills = pills,
        title = html_escape::encode_text(&post.title),
        subtitle = html_escape::encode_text(&post.subtitle),
    )
}

pub fn render_tiles(posts: &[Post], cols: u32) -> String {
    posts
        .iter()
        .enumerate()
        .map(|(index, post)| render_tile(post, index, cols))
        .collect()
}
