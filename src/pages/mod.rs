//! Page Assembly
//!
//! Walks a recovered project's files, matches them against the page-route
//! convention, extracts a static document for each, and produces an ordered
//! set of [`PageRecord`]s ready to write to disk.

pub mod routes;

use std::collections::HashSet;

use tracing::{debug, info};

use crate::constants::routes::SHARED_STYLESHEET;
use crate::markup::extract_document;
use crate::types::{HOME_SLUG, PageRecord, ProjectDescriptor};

pub use routes::{PageRoute, match_page_route};

/// Assemble the project's static page set.
///
/// Files are considered in descriptor order; when two files map to the same
/// slug the first wins. The result is ordered homepage first, then by title,
/// with `order` assigned to match. Projects without any matching page file
/// produce an empty set, not an error.
pub fn assemble_pages(project: &ProjectDescriptor) -> Vec<PageRecord> {
    // Match the filename itself, not a suffix ("myglobals.css" is not shared)
    let shared_styles = project
        .files
        .iter()
        .find(|f| f.path.rsplit('/').next() == Some(SHARED_STYLESHEET))
        .map(|f| f.content.as_str());

    let mut seen = HashSet::new();
    let mut pages = Vec::new();

    for file in &project.files {
        let Some(route) = match_page_route(&file.path) else {
            continue;
        };
        if !seen.insert(route.slug.clone()) {
            debug!(path = %file.path, slug = %route.slug, "duplicate route, keeping first");
            continue;
        }

        let html_document =
            extract_document(&file.content, &route.title, &project.name, shared_styles);
        let is_homepage = route.slug == HOME_SLUG;

        pages.push(PageRecord {
            slug: route.slug,
            title: route.title,
            html_document,
            is_homepage,
            order: 0,
        });
    }

    pages.sort_by(|a, b| {
        b.is_homepage
            .cmp(&a.is_homepage)
            .then_with(|| a.title.cmp(&b.title))
    });
    for (i, page) in pages.iter_mut().enumerate() {
        page.order = i;
    }

    info!(pages = pages.len(), project = %project.name, "assembled static pages");
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileEntry;

    const PAGE_SOURCE: &str = r#"
export default function Page() {
  return (
    <main className="p-8">
      <h1>Section heading goes here</h1>
      <p>A long enough paragraph of descriptive copy so the quality gate
      is satisfied with the rendered output of this page.</p>
    </main>
  );
}
"#;

    fn project(paths: &[&str]) -> ProjectDescriptor {
        ProjectDescriptor {
            name: "demo".to_string(),
            files: paths
                .iter()
                .map(|p| FileEntry::new(p.to_string(), PAGE_SOURCE.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_homepage_sorts_first() {
        let pages = assemble_pages(&project(&[
            "app/about/page.tsx",
            "app/page.tsx",
            "app/contact/page.tsx",
        ]));
        assert_eq!(pages.len(), 3);
        assert!(pages[0].is_homepage);
        assert_eq!(pages[0].slug, "home");
        assert_eq!(pages[1].title, "About");
        assert_eq!(pages[2].title, "Contact");
        assert_eq!(
            pages.iter().map(|p| p.order).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_duplicate_slug_first_wins() {
        let mut proj = project(&["app/page.tsx"]);
        proj.files.push(FileEntry::new(
            "src/app/page.tsx".to_string(),
            "export default function Other() { return (<p>later duplicate</p>); }".to_string(),
        ));
        let pages = assemble_pages(&proj);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].html_document.contains("Section heading"));
    }

    #[test]
    fn test_non_page_files_ignored() {
        let pages = assemble_pages(&project(&[
            "app/layout.tsx",
            "components/Hero.tsx",
            "app/blog/[slug]/page.tsx",
            "package.json",
        ]));
        assert!(pages.is_empty());
    }

    #[test]
    fn test_shared_styles_injected() {
        let mut proj = project(&["app/page.tsx"]);
        proj.files.push(FileEntry::new(
            "app/globals.css".to_string(),
            ":root { --brand: teal; }".to_string(),
        ));
        let pages = assemble_pages(&proj);
        assert!(pages[0].html_document.contains("--brand: teal"));
    }

    #[test]
    fn test_similarly_named_stylesheet_not_shared() {
        let mut proj = project(&["app/page.tsx"]);
        proj.files.push(FileEntry::new(
            "app/myglobals.css".to_string(),
            ".local { color: red; }".to_string(),
        ));
        let pages = assemble_pages(&proj);
        assert!(!pages[0].html_document.contains(".local { color: red; }"));
    }

    #[test]
    fn test_every_page_is_complete_document() {
        let pages = assemble_pages(&project(&["app/page.tsx", "app/pricing/page.tsx"]));
        for page in &pages {
            assert!(page.html_document.starts_with("<!DOCTYPE html>"));
            assert!(page.html_document.trim_end().ends_with("</html>"));
        }
    }
}
