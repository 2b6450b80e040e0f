//! Output file housekeeping
//!
//! Access drivers cannot create a database file from nothing, so every run
//! starts from a copy of an empty template.

use crate::error::{ConvertError, Result};
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;

/// Replace `output` with a fresh copy of `template`
pub fn prepare_container(template: Option<&Path>, output: &Path) -> Result<()> {
    let template = template.ok_or(ConvertError::TemplateRequired)?;

    if !template.is_file() {
        return Err(ConvertError::NotFound {
            path: template.to_path_buf(),
        });
    }

    match std::fs::remove_file(output) {
        Ok(()) => info!("Existing file '{}' deleted", output.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    std::fs::copy(template, output)?;
    info!(
        "Created '{}' from template '{}'",
        output.display(),
        template.display()
    );
    Ok(())
}
