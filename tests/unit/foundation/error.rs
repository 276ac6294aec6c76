use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SnapstripError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SnapstripError::camera("x")
            .to_string()
            .contains("camera unavailable:")
    );
    assert!(
        SnapstripError::render("x")
            .to_string()
            .contains("render unavailable:")
    );
    assert!(
        SnapstripError::encode("x")
            .to_string()
            .contains("encode failure:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SnapstripError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
