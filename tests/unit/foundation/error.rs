use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert_eq!(
        VeneerError::invalid_dimensions(0, 10).to_string(),
        "invalid dimensions: 0x10"
    );
    assert!(
        VeneerError::allocation("x")
            .to_string()
            .contains("allocation error:")
    );
    assert!(
        VeneerError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(VeneerError::text("x").to_string().contains("text error:"));
    assert!(
        VeneerError::AlreadyBuilding
            .to_string()
            .contains("already in progress")
    );
    assert!(
        VeneerError::NotBuilding
            .to_string()
            .contains("no atlas build")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VeneerError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
