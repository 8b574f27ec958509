use std::path::PathBuf;

use anyhow::Context;
use pf_config::GeneratorConfig;

pub(crate) fn run(config: Option<PathBuf>) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };

    for name in config.scenario_names() {
        let mut overlay = config.scenario(&name)?;
        let origin = if config.scenarios.contains_key(&name) {
            "user"
        } else {
            "built-in"
        };
        let description = overlay.description.take().unwrap_or_default();
        println!("{name} [{origin}] {description}");

        let body = toml::to_string(&overlay)
            .with_context(|| format!("rendering scenario '{name}'"))?;
        for line in body.lines().filter(|l| !l.trim().is_empty()) {
            println!("    {line}");
        }
    }

    Ok(())
}
