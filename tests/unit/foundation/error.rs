use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(VinylError::data("x").to_string().contains("data error:"));
    assert!(VinylError::config("x").to_string().contains("config error:"));
    assert!(VinylError::render("x").to_string().contains("render error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("disk full");
    let err = VinylError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("disk full"));
}
