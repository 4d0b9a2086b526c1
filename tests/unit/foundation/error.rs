use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StellateError::invalid_argument("x")
            .to_string()
            .contains("invalid argument:")
    );
    assert!(
        StellateError::missing_dependency("x")
            .to_string()
            .contains("missing dependency:")
    );
    assert!(
        StellateError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        StellateError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        StellateError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn no_intersection_names_the_side() {
    let err = StellateError::NoIntersection { side: 4 };
    assert!(err.to_string().contains("side 4"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StellateError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: StellateError = bad.into();
    assert!(matches!(err, StellateError::Serde(_)));
}
