//! Pages Command
//!
//! Recovers a project from raw model output, assembles its static preview
//! pages, and writes one HTML document per page plus a manifest.

use std::path::Path;

use crate::cli::commands::recover::read_input;
use crate::cli::output::Output;
use crate::pages::assemble_pages;
use crate::recovery::recover;
use crate::types::Result;

pub fn run(input: &Path, out_dir: &Path) -> Result<()> {
    let out = Output::new();
    let raw = read_input(input)?;

    let project = recover(&raw)?;
    let pages = assemble_pages(&project);

    if pages.is_empty() {
        out.warning(&format!(
            "{} contains no previewable page files",
            project.name
        ));
        return Ok(());
    }

    std::fs::create_dir_all(out_dir)?;

    out.section(&format!("Pages for {}", project.name));
    let mut manifest = Vec::with_capacity(pages.len());
    for page in &pages {
        let filename = format!("{}.html", page.slug);
        std::fs::write(out_dir.join(&filename), &page.html_document)?;
        out.detail(&page.title, &filename);
        manifest.push(serde_json::json!({
            "slug": page.slug,
            "title": page.title,
            "file": filename,
            "isHomepage": page.is_homepage,
            "order": page.order,
        }));
    }

    let manifest_path = out_dir.join("pages.json");
    std::fs::write(
        &manifest_path,
        serde_json::to_string_pretty(&manifest)?,
    )?;

    out.success(&format!(
        "{} page(s) written to {}",
        pages.len(),
        out_dir.display()
    ));
    Ok(())
}
