//! HTML rendering.
//!
//! Markdown goes through pulldown-cmark. Second-level headings get an `id`
//! computed with [`slugify`] from the heading source line, the same way the
//! table of contents computes its slugs, so in-page links land on them.

use std::fmt::Write;

use docpage_nav::slugify;
use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag};

use crate::view::{ContentView, PageView, SectionView};

/// Parser options for documents.
fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Render Markdown to an HTML fragment.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, parser_options()).into_offset_iter();
    let events = parser.map(|(event, range)| match event {
        Event::Start(Tag::Heading {
            level: HeadingLevel::H2,
            id: None,
            classes,
            attrs,
        }) => {
            let line = markdown[range].lines().next().unwrap_or_default();
            let label = line.trim_start_matches('#');
            Event::Start(Tag::Heading {
                level: HeadingLevel::H2,
                id: Some(CowStr::from(slugify(label))),
                classes,
                attrs,
            })
        }
        other => other,
    });

    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html, events);
    html
}

/// Escape special HTML characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a complete HTML page.
pub fn render_page(view: &PageView) -> String {
    let mut html = String::new();
    let _ = writeln!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>",
        escape_html(&view.title)
    );
    let _ = writeln!(
        html,
        "<header class=\"page-header\"><button class=\"menu-toggle\" aria-expanded=\"{}\">Menu</button></header>",
        view.menu_open
    );
    html.push_str("<div class=\"layout\">\n");
    render_sidebar(&mut html, view);
    html.push_str("<main class=\"content\">\n");
    render_content(&mut html, &view.content);
    html.push_str("</main>\n</div>\n</body>\n</html>\n");
    html
}

fn render_sidebar(html: &mut String, view: &PageView) {
    let class = if view.menu_open { "sidebar open" } else { "sidebar" };
    let _ = writeln!(html, "<nav class=\"{class}\">\n<ul class=\"sections\">");
    for section in &view.sections {
        render_section(html, section);
    }
    html.push_str("</ul>\n</nav>\n");
}

fn render_section(html: &mut String, section: &SectionView) {
    let active = if section.active { " class=\"active\"" } else { "" };
    let _ = write!(
        html,
        "<li{active}><a href=\"{}\">{}</a>",
        escape_html(&section.href),
        escape_html(&section.name)
    );
    if section.active {
        html.push_str("\n<ul class=\"files\">\n");
        for file in &section.files {
            let active = if file.active { " class=\"active\"" } else { "" };
            let _ = write!(
                html,
                "<li{active}><a href=\"{}\">{}</a>",
                escape_html(&file.href),
                escape_html(&file.label)
            );
            if !file.headings.is_empty() {
                html.push_str("\n<ul class=\"headings\">\n");
                for heading in &file.headings {
                    let _ = writeln!(
                        html,
                        "<li><a href=\"{}\">{}</a></li>",
                        escape_html(&heading.href),
                        escape_html(&heading.label)
                    );
                }
                html.push_str("</ul>\n");
            }
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</li>\n");
}

fn render_content(html: &mut String, content: &ContentView) {
    match content {
        ContentView::Loading => html.push_str("<p class=\"loading\">Loading...</p>\n"),
        ContentView::Markdown { text, edit_link } => {
            if let Some(link) = edit_link {
                let _ = writeln!(
                    html,
                    "<a class=\"edit-link\" href=\"{}\">Edit on GitHub</a>",
                    escape_html(link)
                );
            }
            html.push_str("<article class=\"markdown\">\n");
            html.push_str(&render_markdown(text));
            html.push_str("</article>\n");
        }
        ContentView::NotFound => {
            html.push_str(
                "<section class=\"not-found\">\n<h1>Not found</h1>\n\
                 <p>This page does not exist. <a href=\"/doc\">Back to the documentation</a></p>\n\
                 </section>\n",
            );
        }
        ContentView::LoadFailed {
            message,
            retry_href,
        } => {
            let _ = writeln!(
                html,
                "<section class=\"load-failed\">\n<h1>Failed to load page</h1>\n\
                 <p>{}</p>\n<p><a class=\"retry\" href=\"{}\">Retry</a></p>\n</section>",
                escape_html(message),
                escape_html(retry_href)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{FileView, HeadingView};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_markdown_h2_ids() {
        let html = render_markdown("# Title\n\n## Install DVC\n\ntext\n\n## Options `--force`\n");

        assert!(html.contains("<h1>Title</h1>"), "html: {html}");
        assert!(html.contains("<h2 id=\"install-dvc\">Install DVC</h2>"), "html: {html}");
        assert!(html.contains("<h2 id=\"options-force\">"), "html: {html}");
    }

    #[test]
    fn test_render_markdown_h3_untouched() {
        let html = render_markdown("### Details\n");
        assert_eq!(html, "<h3>Details</h3>\n");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;&lt;/a&gt;"
        );
    }

    fn view(content: ContentView) -> PageView {
        PageView {
            title: "Command Reference | Docs".to_owned(),
            sections: vec![
                SectionView {
                    name: "Get Started".to_owned(),
                    href: "/doc/get-started/install".to_owned(),
                    active: false,
                    files: vec![FileView {
                        label: "Install".to_owned(),
                        href: "/doc/get-started/install".to_owned(),
                        active: false,
                        headings: Vec::new(),
                    }],
                },
                SectionView {
                    name: "Command Reference".to_owned(),
                    href: "/doc/command-reference/add".to_owned(),
                    active: true,
                    files: vec![FileView {
                        label: "dvc add".to_owned(),
                        href: "/doc/command-reference/add".to_owned(),
                        active: true,
                        headings: vec![HeadingView {
                            label: "Options".to_owned(),
                            slug: "options".to_owned(),
                            href: "#options".to_owned(),
                        }],
                    }],
                },
            ],
            content,
            menu_open: false,
        }
    }

    #[test]
    fn test_render_page_markdown() {
        let html = render_page(&view(ContentView::Markdown {
            text: "# dvc add\n\n## Options\n".to_owned(),
            edit_link: Some("https://github.com/org/repo/blob/master/add.md".to_owned()),
        }));

        assert!(html.contains("<title>Command Reference | Docs</title>"));
        assert!(html.contains("<h2 id=\"options\">Options</h2>"));
        assert!(html.contains("<li><a href=\"#options\">Options</a></li>"));
        assert!(html.contains("href=\"https://github.com/org/repo/blob/master/add.md\""));
        assert!(html.contains("<nav class=\"sidebar\">"));
        // Files of inactive sections are collapsed
        assert!(!html.contains(">Install</a>"));
    }

    #[test]
    fn test_render_page_not_found() {
        let html = render_page(&view(ContentView::NotFound));
        assert!(html.contains("<h1>Not found</h1>"));
        assert!(!html.contains("<article"));
    }

    #[test]
    fn test_render_page_load_failed() {
        let html = render_page(&view(ContentView::LoadFailed {
            message: "[Http] Unavailable <503>".to_owned(),
            retry_href: "/doc/command-reference/add".to_owned(),
        }));
        assert!(html.contains("[Http] Unavailable &lt;503&gt;"));
        assert!(html.contains("<a class=\"retry\" href=\"/doc/command-reference/add\">Retry</a>"));
    }

    #[test]
    fn test_render_page_menu_open() {
        let mut page = view(ContentView::Loading);
        page.menu_open = true;
        let html = render_page(&page);
        assert!(html.contains("<nav class=\"sidebar open\">"));
        assert!(html.contains("aria-expanded=\"true\""));
        assert!(html.contains("Loading..."));
    }
}
