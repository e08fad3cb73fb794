use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PostreelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(PostreelError::render("x").to_string().contains("render error:"));
    assert!(PostreelError::encode("x").to_string().contains("encode error:"));
    assert!(PostreelError::fetch("x").to_string().contains("fetch error:"));
    assert!(
        PostreelError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PostreelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
