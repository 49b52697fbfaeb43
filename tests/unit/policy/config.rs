use super::*;

#[test]
fn config_defaults_are_all_off() {
    let cfg: ElementConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, ElementConfig::default());
    assert!(!cfg.auto_size && !cfg.multi_line && !cfg.focus_ring);
    assert_eq!(cfg.border_style, BorderStyle::None);
}

#[test]
fn config_rejects_unknown_fields() {
    let err = serde_json::from_str::<ElementConfig>(r#"{"autoSize": true}"#).unwrap_err();
    assert!(err.to_string().contains("unknown field"));
}

#[test]
fn button_description_parses() {
    let spec = ElementSpec::from_json(
        r##"{
            "kind": "button",
            "color": "#c8c8c8",
            "width": 80,
            "height": 24,
            "config": { "border_style": "single_line", "focus_ring": true }
        }"##,
    )
    .unwrap();
    assert_eq!(spec.kind, ElementKind::Button);
    assert_eq!(spec.color, Rgba8::rgb(200, 200, 200));
    assert_eq!(spec.text_color, Rgba8::rgb(0, 0, 0));
    assert_eq!(spec.font_size, DEFAULT_FONT_SIZE_PX);
    assert_eq!(spec.config.border_style, BorderStyle::SingleLine);
    assert!(spec.config.focus_ring);
    spec.validate().unwrap();
}

#[test]
fn dropdown_description_carries_options() {
    let spec = ElementSpec::from_json(
        r#"{ "kind": "dropdown", "options": ["a", "b"], "color": [10, 20, 30],
             "width": 40, "height": 12, "font": "f.ttf" }"#,
    )
    .unwrap();
    assert_eq!(
        spec.kind,
        ElementKind::Dropdown {
            options: vec!["a".to_string(), "b".to_string()]
        }
    );
    spec.validate().unwrap();
}

#[test]
fn validate_rejects_bad_geometry_and_missing_font() {
    let mut spec = ElementSpec::from_json(
        r##"{ "kind": "plain_fill", "color": "#000000", "width": 0, "height": 5 }"##,
    )
    .unwrap();
    assert!(matches!(
        spec.validate(),
        Err(VeneerError::InvalidDimensions { width: 0, height: 5 })
    ));

    spec.width = 5;
    spec.text = "hi".to_string();
    assert!(matches!(spec.validate(), Err(VeneerError::Validation(_))));

    spec.text.clear();
    spec.font_size = -1.0;
    assert!(matches!(spec.validate(), Err(VeneerError::Validation(_))));
}

#[test]
fn unknown_kind_is_a_validation_error() {
    let err = ElementSpec::from_json(
        r##"{ "kind": "slider", "color": "#000000", "width": 1, "height": 1 }"##,
    )
    .unwrap_err();
    assert!(matches!(err, VeneerError::Validation(_)));
}

#[test]
fn build_without_font_makes_textless_element() {
    let spec = ElementSpec::from_json(
        r##"{ "kind": "labeled_panel", "color": "#102030", "width": 6, "height": 4 }"##,
    )
    .unwrap();
    let el = spec.build(Path::new(".")).unwrap();
    assert_eq!(el.kind(), &ElementKind::LabeledPanel);
    assert_eq!(el.size(), PxSize::new(6, 4).unwrap());
    assert!(el.font().is_none());
    assert!(el.is_stale());
}

#[test]
fn build_reports_missing_font_file() {
    let spec = ElementSpec::from_json(
        r##"{ "kind": "button", "color": "#102030", "width": 6, "height": 4,
             "text": "x", "font": "nope/missing.ttf" }"##,
    )
    .unwrap();
    let err = spec.build(Path::new("/definitely/not")).unwrap_err();
    assert!(err.to_string().contains("read font"));
}

#[test]
fn kind_names_are_snake_case() {
    assert_eq!(ElementKind::PlainFill.name(), "plain_fill");
    assert_eq!(ElementKind::Dropdown { options: vec![] }.name(), "dropdown");
}
