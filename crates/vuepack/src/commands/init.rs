//! Initialize a vuepack project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing vuepack...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    let src_dir = Path::new("src");
    if !src_dir.exists() {
        fs::create_dir_all(src_dir).context("Failed to create src directory")?;
    }

    let example_path = src_dir.join("HelloWorld.vue");
    if !example_path.exists() || yes {
        fs::write(&example_path, DEFAULT_COMPONENT).context("Failed to write HelloWorld.vue")?;
        tracing::info!("Created src/HelloWorld.vue");
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'vuepack build' to pack your components.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# vuepack configuration

[build]
# Directory containing component documents
src = "src"

# Output directory for packed scripts and stylesheets
out = "build"

# Extension of component documents
extension = "vue"

# Write build/components.json listing every registration
manifest = false

[transform]
# Inject a loader that links <Name>.css next to the script at runtime
auto_link_css = false

# Language styles are written in (no preprocessing is performed)
style_lang = "css"

# "inline" registers components from each script,
# "manifest" leaves registration to components.json consumers
registration = "inline"
"#;

const DEFAULT_COMPONENT: &str = r#"<template>
  <div class="hello-world">
    <h1>{{ greeting }}</h1>
    <button @click="count++">Clicked {{ count }} times</button>
  </div>
</template>

<script>
export default {
  data() {
    return { greeting: 'Hello from vuepack', count: 0 }
  }
}
</script>

<style>
.hello-world { font-family: sans-serif; }
</style>
"#;
