//! Print the effective site configuration

use anyhow::Result;

use crate::Site;

/// Print the configuration as pretty JSON, defaults filled in
pub fn run(site: &Site) -> Result<()> {
    if !site.config_path.exists() {
        tracing::warn!("No config at {:?}, showing defaults", site.config_path);
    }
    println!("{}", serde_json::to_string_pretty(&site.config())?);
    Ok(())
}
