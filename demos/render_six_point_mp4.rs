use stellate::{
    RenderSettings, RenderToMp4Opts, StarKind, build_script, is_ffmpeg_on_path, render_to_mp4,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    if !is_ffmpeg_on_path() {
        eprintln!("render_six_point_mp4: ffmpeg not found on PATH, skipping");
        return Ok(());
    }

    // Optional paper texture as the first argument.
    let mut settings = RenderSettings::default();
    settings.background = std::env::args().nth(1).map(Into::into);

    let script = build_script(StarKind::SixPoint, &StarKind::SixPoint.default_config())?;
    let out = "target/render_six_point.mp4";
    let stats = render_to_mp4(&script, out, RenderToMp4Opts::default(), &settings)?;
    eprintln!(
        "wrote {out}: {} frames ({} reused)",
        stats.frames_total, stats.frames_elided
    );
    Ok(())
}
