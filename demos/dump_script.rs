use stellate::{StarKind, build_script};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    for kind in StarKind::ALL {
        let script = build_script(kind, &kind.default_config())?;
        println!(
            "{}: {} steps, {:.1}s",
            kind.slug(),
            script.steps.len(),
            script.duration_secs()
        );
        for step in &script.steps {
            let caption = step.caption().unwrap_or_default();
            println!(
                "  {:<20} {:>5.1}s  {}",
                step.label,
                step.duration_secs(),
                caption.replace('\n', " ")
            );
        }
    }

    let script = build_script(StarKind::SixPoint, &StarKind::SixPoint.default_config())?;
    let json = serde_json::to_string_pretty(&script.snapshots()?.last())?;
    println!("{json}");
    Ok(())
}
