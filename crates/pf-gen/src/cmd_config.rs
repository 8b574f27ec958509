use std::path::PathBuf;

use anyhow::Context;
use pf_gen::args::ConfigArgs;

pub(crate) fn run(args: ConfigArgs, save: Option<PathBuf>) -> anyhow::Result<()> {
    let config = args.resolve()?;
    let text = config.to_toml()?;

    match save {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
            println!("Configuration written to {}", path.display());
        }
        None => print!("{text}"),
    }

    Ok(())
}
