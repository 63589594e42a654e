use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct HugoFrontMatter {
    // already double-quoted
    pub title: String,
    pub date: String,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub slug: Option<String>,
}

fn render_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("\"{item}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

impl HugoFrontMatter {
    pub fn render(&self) -> String {
        let mut res = String::from("---\n");
        let _ = writeln!(res, "title: {}", self.title);
        let _ = writeln!(res, "date: {}", self.date);
        if let Some(categories) = &self.categories {
            let _ = writeln!(res, "categories: [{}]", render_list(categories));
        }
        if let Some(tags) = &self.tags {
            let _ = writeln!(res, "tags: [{}]", render_list(tags));
        }
        if let Some(slug) = &self.slug {
            let _ = writeln!(res, "slug: {slug}");
        }
        res.push_str("draft: false\n");
        res.push_str("---\n");
        res
    }
}
