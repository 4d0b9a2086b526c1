use std::path::PathBuf;

use stellate::{RenderSettings, StarKind, build_script, render_stills};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let settings = RenderSettings::default();
    let root = PathBuf::from("target/stills");
    for kind in StarKind::ALL {
        let script = build_script(kind, &kind.default_config())?;
        let written = render_stills(&script, &settings, &root.join(kind.slug()))?;
        eprintln!("{}: wrote {} stills", kind.slug(), written.len());
    }
    Ok(())
}
