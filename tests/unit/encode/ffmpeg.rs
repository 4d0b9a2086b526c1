use super::*;

fn cfg(width: u32, height: u32, fps: u32) -> EncodeConfig {
    EncodeConfig {
        width,
        height,
        fps,
        out_path: PathBuf::from("target/out.mp4"),
        overwrite: true,
    }
}

#[test]
fn config_validation_catches_bad_values() {
    assert!(cfg(0, 10, 30).validate().is_err());
    assert!(cfg(1081, 1920, 60).validate().is_err());
    assert!(cfg(1080, 1920, 0).validate().is_err());
    assert!(cfg(1080, 1920, 60).validate().is_ok());

    let mut empty = cfg(10, 10, 30);
    empty.out_path = PathBuf::new();
    assert!(matches!(empty.validate(), Err(StellateError::Validation(_))));
}

#[test]
fn flatten_premul_over_black_produces_expected_rgb() {
    // Premultiplied red @ 50% alpha.
    let src = vec![128u8, 0, 0, 128];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, vec![128, 0, 0, 255]);
}

#[test]
fn flatten_straight_over_white_blends() {
    let src = vec![0u8, 0, 0, 128];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, false, [255, 255, 255, 255]).unwrap();
    assert_eq!(dst, vec![127, 127, 127, 255]);
}

#[test]
fn flatten_keeps_opaque_pixels_and_rejects_bad_lengths() {
    let src = vec![10u8, 20, 30, 255];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, [255, 0, 0, 255]).unwrap();
    assert_eq!(dst, src);

    let mut short = vec![0u8; 3];
    assert!(flatten_to_opaque_rgba8(&mut short, &src, true, [0, 0, 0, 255]).is_err());
}

#[test]
fn parent_dir_of_bare_file_name_is_a_no_op() {
    assert!(ensure_parent_dir(Path::new("out.mp4")).is_ok());
}

#[test]
fn refuses_to_clobber_an_existing_output() {
    let dir = std::env::temp_dir().join(format!("stellate_encode_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let out = dir.join("taken.mp4");
    std::fs::write(&out, b"").unwrap();

    let mut c = cfg(16, 16, 30);
    c.out_path = out.clone();
    c.overwrite = false;
    assert!(matches!(
        FfmpegEncoder::new(c, [0, 0, 0, 255]),
        Err(StellateError::Validation(_))
    ));
    let _ = std::fs::remove_dir_all(&dir);
}
