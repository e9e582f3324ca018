//! Graphviz rendering backend.

use anyhow::{bail, Context, Result};
use campaign_core::dot::to_dot;
use campaign_core::{GraphDescription, GraphRenderer, RenderRequest};
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tracing::info;

/// Writes DOT source to the requested path and, when a layout command is
/// configured, lays it out into `<output>.<format>`.
pub struct GraphvizRenderer {
    layout_command: Option<String>,
}

impl GraphvizRenderer {
    pub fn new(layout_command: Option<String>) -> Self {
        Self { layout_command }
    }

    fn layout(&self, command: &str, request: &RenderRequest) -> Result<PathBuf> {
        let mut target = request.output.clone().into_os_string();
        target.push(".");
        target.push(&request.format);
        let target = PathBuf::from(target);
        let status = Command::new(command)
            .arg(format!("-T{}", request.format))
            .arg(&request.output)
            .arg("-o")
            .arg(&target)
            .status()
            .with_context(|| format!("running layout command {command}"))?;
        if !status.success() {
            bail!("{command} exited with {status}");
        }
        Ok(target)
    }
}

impl GraphRenderer for GraphvizRenderer {
    fn render(&mut self, graph: &GraphDescription, request: &RenderRequest) -> Result<()> {
        if let Some(parent) = request.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        fs::write(&request.output, to_dot(graph))
            .with_context(|| format!("writing {}", request.output.display()))?;
        if let Some(command) = &self.layout_command {
            let target = self.layout(command, request)?;
            info!(path = %target.display(), "laid out scenario tree");
        }
        Ok(())
    }
}
