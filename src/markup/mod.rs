//! Static Markup Extraction Pipeline
//!
//! Turns component source into a complete, render-safe HTML document without
//! executing any of it:
//! 1. locate the markup expression the page's entry point returns
//! 2. rewrite it to static HTML (attribute aliasing, handler stripping,
//!    expression resolution, fragment and self-closing normalization)
//! 3. gate the result on quality, falling back to synthesized copy when the
//!    rewrite lost too much
//!
//! ## Design Philosophy
//! Extraction is total: every input produces *some* complete document. The
//! quality gate exists because a lossy rewrite can be worse than an honest
//! fallback, and the fallback synthesizer exists because a blank page is
//! worse than salvaged copy.

pub mod document;
pub mod fallback;
pub mod locate;
pub mod quality;
pub mod rewrite;

use tracing::debug;

pub use document::render_document;
pub use locate::locate_renderable;
pub use quality::QualityGate;
pub use rewrite::rewrite_markup;

/// Extract a complete static HTML document from component source.
///
/// Never fails: when no renderable markup can be located, or the rewritten
/// body does not pass the quality gate, a fallback document is synthesized
/// from the source's user-facing copy.
pub fn extract_document(
    source: &str,
    title: &str,
    project_name: &str,
    shared_styles: Option<&str>,
) -> String {
    let gate = QualityGate::default();

    let body = match locate_renderable(source) {
        Some(markup) => {
            let rewritten = rewrite_markup(markup);
            if gate.accept(&rewritten) {
                rewritten
            } else {
                debug!(title, "rewritten body rejected, synthesizing fallback");
                fallback::synthesize_fallback(source, title, project_name)
            }
        }
        None => {
            debug!(title, "no renderable markup located, synthesizing fallback");
            fallback::synthesize_fallback(source, title, project_name)
        }
    };

    render_document(title, project_name, &body, shared_styles)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
import Link from 'next/link';

export default function Home() {
  const year = 2024;
  return (
    <main className="min-h-screen bg-white">
      <h1 className="text-5xl font-bold">Ship faster with Acme</h1>
      <p>{"The all-in-one toolkit for modern product teams."}</p>
      <Link href="/pricing" onClick={() => track('cta')}>See pricing</Link>
      <p>We're trusted by thousands of teams building with us today.</p>
    </main>
  );
}
"#;

    #[test]
    fn test_extract_renders_static_page() {
        let doc = extract_document(PAGE, "Home", "acme", None);
        assert!(doc.contains("Ship faster with Acme"));
        assert!(doc.contains("all-in-one toolkit"));
        assert!(doc.contains(r#"class="min-h-screen bg-white""#));
        assert!(doc.contains(r#"<a href="/pricing""#));
        assert!(doc.contains("We're trusted"));
        assert!(!doc.contains("className"));
        assert!(!doc.contains("onClick"));
        assert!(!doc.contains("track("));
    }

    #[test]
    fn test_extract_falls_back_without_markup() {
        let source = r#"export const metadata = { title: "Docs" };
const greeting = "Welcome to the documentation portal";"#;
        let doc = extract_document(source, "Docs", "acme", None);
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("Welcome to the documentation portal"));
    }

    #[test]
    fn test_extract_falls_back_on_thin_body() {
        let source = "export default function Page() { return (<div>{data}</div>); }";
        let doc = extract_document(source, "Dashboard", "acme", None);
        assert!(doc.contains("Dashboard"));
        assert!(doc.contains("could not be rendered"));
    }

    #[test]
    fn test_extract_includes_shared_styles() {
        let doc = extract_document(PAGE, "Home", "acme", Some(":root { --x: 1; }"));
        assert!(doc.contains(":root { --x: 1; }"));
    }
}
