//! `aegis sbom` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use aegis_core::types::SbomComponent;
use aegis_sbom::SbomBuilder;

use crate::cli::SbomArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render, table_header};

/// Execute the `sbom` command.
///
/// Unlike `scan`, a failed generation is a hard error here; there is no
/// other stage to fall back on.
pub async fn execute(
    args: SbomArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = super::load_config(config_path).await?;

    info!(path = %args.path.display(), "generating SBOM");

    let root = args.path.clone();
    let max_manifest_bytes = config.sbom.max_manifest_bytes;
    let components = tokio::task::spawn_blocking(move || {
        SbomBuilder::new()
            .with_max_manifest_bytes(max_manifest_bytes)
            .generate(&root)
    })
    .await
    .map_err(|e| CliError::Command(format!("sbom task failed: {e}")))??;

    let output = SbomOutput {
        path: args.path.display().to_string(),
        total: components.len(),
        components,
    };

    writer.render(&output)?;

    Ok(())
}

#[derive(Serialize)]
pub struct SbomOutput {
    pub path: String,
    pub total: usize,
    pub components: Vec<SbomComponent>,
}

impl Render for SbomOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "SBOM: {}", self.path.bold())?;
        writeln!(w, "Components: {}", self.total)?;
        writeln!(w)?;

        if self.components.is_empty() {
            writeln!(w, "No manifests found.")?;
        } else {
            table_header(
                w,
                format_args!("{:<30} {:<15} {:<10} Purl", "Name", "Version", "Type"),
                90,
            )?;

            for c in &self.components {
                writeln!(
                    w,
                    "{:<30} {:<15} {:<10} {}",
                    c.name,
                    c.version,
                    c.ecosystem.purl_type(),
                    c.purl.as_deref().unwrap_or("-")
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_sbom_command_on_manifest_tree() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"dependencies": {"left-pad": "^1.3.0"}}"#,
        )
        .expect("write");

        let result = execute(
            SbomArgs {
                path: dir.path().to_path_buf(),
            },
            Path::new("/nonexistent/aegis.toml"),
            &OutputWriter::new(OutputFormat::Text),
        )
        .await;
        assert!(result.is_ok(), "manifest tree should produce an SBOM");
    }

    #[tokio::test]
    async fn test_sbom_command_missing_root_fails() {
        let err = execute(
            SbomArgs {
                path: PathBuf::from("/nonexistent/aegis/root"),
            },
            Path::new("/nonexistent/aegis.toml"),
            &OutputWriter::new(OutputFormat::Text),
        )
        .await
        .expect_err("missing root is a hard error for sbom");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_sbom_output_render_lists_components() {
        use aegis_core::types::Ecosystem;

        let output = SbomOutput {
            path: "/tmp/project".to_owned(),
            total: 1,
            components: vec![SbomComponent::new("left-pad", "1.3.0", Ecosystem::Npm)],
        };

        let mut buffer = Vec::new();
        output.render_text(&mut buffer).expect("render");
        let text = String::from_utf8(buffer).expect("utf8");

        assert!(text.contains("left-pad"));
        assert!(text.contains("pkg:npm/left-pad@1.3.0"));
    }
}
