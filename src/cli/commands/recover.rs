//! Recover Command
//!
//! Parses raw model output into a project descriptor and emits it as JSON,
//! to stdout or to a file.

use std::path::Path;

use crate::cli::output::Output;
use crate::recovery::recover;
use crate::types::Result;

pub fn run(input: &Path, output: Option<&Path>) -> Result<()> {
    let out = Output::new();
    let raw = read_input(input)?;

    let project = recover(&raw)?;
    let rendered = serde_json::to_string_pretty(&project)?;

    out.section("Recovered project");
    out.detail("name", &project.name);
    out.detail("kind", &format!("{:?}", project.kind));
    out.detail("files", &project.files.len().to_string());
    if !project.dependencies.is_empty() {
        out.detail("dependencies", &project.dependencies.len().to_string());
    }

    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            out.success(&format!("Descriptor written to {}", path.display()));
        }
        None => {
            println!("{rendered}");
        }
    }

    Ok(())
}

/// Read the raw text, `-` meaning stdin.
pub(crate) fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_writes_descriptor() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("raw.txt");
        let output = dir.path().join("project.json");
        std::fs::write(
            &input,
            r#"```json
{"name": "demo", "files": [{"path": "app/page.tsx", "content": "x"}]}
```"#,
        )
        .expect("write input");

        run(&input, Some(&output)).expect("command succeeds");

        let written = std::fs::read_to_string(&output).expect("read output");
        let parsed: serde_json::Value = serde_json::from_str(&written).expect("valid json");
        assert_eq!(parsed["name"], "demo");
        assert_eq!(parsed["files"][0]["path"], "app/page.tsx");
    }

    #[test]
    fn test_run_unrecoverable_input_is_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("raw.txt");
        std::fs::write(&input, "no json here at all").expect("write input");

        assert!(run(&input, None).is_err());
    }
}
