//! List command implementation.

use console::style;
use miette::Result;
use plugfetch_core::PluginRegistry;

use crate::output;

/// Lists the plugins that can be fetched.
pub fn execute(registry: &PluginRegistry, detailed: bool) -> Result<()> {
    println!("{}", style("Known plugins:").bold());
    println!();

    for entry in registry.entries() {
        println!("  {}", style(&entry.id).cyan().bold());

        if detailed {
            output::key_value("feed", &entry.url);
            output::key_value("artifact", entry.artifact_prefix());
            output::key_value("asset", entry.asset_suffix());
            println!();
        } else {
            println!("    {}", style(&entry.url).dim());
        }
    }

    Ok(())
}
