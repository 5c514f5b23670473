// dartnml/src/cli/yaml.rs

use crate::config::Config;
use anyhow::Context;
use f90defaults::namelist::yaml::{from_values_yaml, to_values_yaml};
use f90defaults::{read_namelist, write_namelist};
use log::info;
use std::io::Write;
use std::path::Path;

/// Convert a namelist file into the `values`-wrapped YAML template.
pub fn convert_to_yaml(input: &Path, output: &Path) -> anyhow::Result<()> {
    let namelist =
        read_namelist(input).context(format!("Error reading namelist {}", input.display()))?;
    let yaml = to_values_yaml(&namelist).context("Error serializing namelist to YAML")?;

    fs_err::write(output, yaml).context(format!("Error writing file {}", output.display()))?;
    info!(
        "Converted {} groups from {} to {}",
        namelist.len(),
        input.display(),
        output.display()
    );
    Ok(())
}

/// Write the namelist text described by a `values`-wrapped YAML template.
pub fn convert_from_yaml<W: Write>(
    input: &Path,
    config: &Config,
    out: &mut W,
) -> anyhow::Result<()> {
    let text = fs_err::read_to_string(input)
        .context(format!("Error reading template {}", input.display()))?;
    let namelist =
        from_values_yaml(&text).context(format!("Error parsing template {}", input.display()))?;

    write_namelist(out, &namelist, &config.write).context("Error writing namelist output")?;
    out.flush().context("Error writing namelist output")?;
    info!("Wrote {} groups from {}", namelist.len(), input.display());
    Ok(())
}
