use serde_json::Value;
use std::collections::BTreeSet;

/// One wall entry, as ingested from the posts data file.
///
/// Every field is coerced at ingestion: a missing or wrong-typed field
/// degrades to an empty string or empty list instead of failing, so a
/// half-filled data file still builds. `date` is an opaque
/// lexicographically-sortable string and is never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub thumbnail: String,
    pub date: String,
    pub tags: Vec<String>,
    pub tldr: Vec<String>,
    pub markdown: String,
}

impl Post {
    /// Coerce one JSON record into a Post. Non-object values produce a fully
    /// empty Post rather than an error.
    pub fn from_value(value: &Value) -> Post {
        Post {
            id: coerce_string(&value["id"]),
            title: coerce_string(&value["title"]),
            subtitle: coerce_string(&value["subtitle"]),
            thumbnail: coerce_string(&value["thumbnail"]),
            date: coerce_string(&value["date"]),
            tags: coerce_string_list(&value["tags"]),
            tldr: coerce_string_list(&value["tldr"]),
            markdown: coerce_string(&value["markdown"]),
        }
    }
}

fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn coerce_string_list(value: &Value) -> Vec<String> {
    match value.as_array() {
        Some(items) => items.iter().map(coerce_string).collect(),
        None => Vec::new(),
    }
}

/// Parse the posts data file. The file itself must be valid JSON; from there
/// everything degrades gracefully (a non-array top level means no posts).
pub fn posts_from_json(data: &str) -> Result<Vec<Post>, serde_json::Error> {
    let value: Value = serde_json::from_str(data)?;
    Ok(posts_from_value(&value))
}

pub fn posts_from_value(value: &Value) -> Vec<Post> {
    match value.as_array() {
        Some(records) => records.iter().map(Post::from_value).collect(),
        None => Vec::new(),
    }
}

/// Sorted, deduplicated union of every post's tags.
pub fn unique_tags(posts: &[Post]) -> Vec<String> {
    let tags: BTreeSet<String> = posts
        .iter()
        .flat_map(|p| p.tags.iter().cloned())
        .collect();
    tags.into_iter().collect()
}

/// Stable descending sort on the raw date string, newest first.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Free-text and tag criteria for selecting wall posts.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Case-insensitive substring over title, subtitle, tags and body.
    /// Empty matches everything.
    pub query: String,
    /// Exact tag membership. `None` matches every tag.
    pub tag: Option<String>,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        let query = self.query.trim().to_lowercase();
        let in_text = query.is_empty() || {
            let haystack = format!(
                "{} {} {} {}",
                post.title,
                post.subtitle,
                post.tags.join(" "),
                post.markdown
            )
            .to_lowercase();
            haystack.contains(&query)
        };

        let in_tag = match &self.tag {
            Some(tag) => post.tags.iter().any(|t| t == tag),
            None => true,
        };

        in_text && in_tag
    }
}
