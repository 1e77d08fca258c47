use super::*;

const MINIMAL: &str = r#"
{
  "collection_size": 10,
  "layer_order": ["Background", "Eyes"],
  "layers_dir": "layers",
  "images_dir": "out/images",
  "metadata_dir": "/abs/metadata",
  "collection": {
    "name": "Smoothies",
    "description": "4 ur helth. stay smooth.",
    "image_url_template": "https://img.example.net/{index}.png"
  }
}
"#;

#[test]
fn defaults_fill_optional_fields() {
    let cfg = GeneratorConfig::from_json_str(MINIMAL, Path::new("/proj")).unwrap();
    assert_eq!(cfg.seed, None);
    assert_eq!(cfg.extensions, vec!["png".to_string()]);
    assert_eq!(cfg.saturation_warning, DEFAULT_SATURATION_WARNING);
    assert_eq!(cfg.max_universe, DEFAULT_MAX_UNIVERSE);
    assert_eq!(cfg.progress_every, DEFAULT_PROGRESS_EVERY);
    assert_eq!(cfg.limits(), SampleLimits::default());
}

#[test]
fn relative_paths_resolve_against_base() {
    let cfg = GeneratorConfig::from_json_str(MINIMAL, Path::new("/proj")).unwrap();
    assert_eq!(cfg.layers_dir, PathBuf::from("/proj/layers"));
    assert_eq!(cfg.images_dir, PathBuf::from("/proj/out/images"));
    assert_eq!(cfg.metadata_dir, PathBuf::from("/abs/metadata"));
}

#[test]
fn unknown_fields_are_rejected() {
    let json = MINIMAL.replacen("\"collection_size\"", "\"colection\": 1, \"collection_size\"", 1);
    let err = GeneratorConfig::from_json_str(&json, Path::new(".")).unwrap_err();
    assert!(matches!(err, LayermintError::Serde(_)));
}

#[test]
fn validate_rejects_out_of_range_values() {
    let base = GeneratorConfig::from_json_str(MINIMAL, Path::new(".")).unwrap();

    let mut cfg = base.clone();
    cfg.saturation_warning = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = base.clone();
    cfg.saturation_warning = 1.5;
    assert!(cfg.validate().is_err());

    let mut cfg = base.clone();
    cfg.progress_every = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = base.clone();
    cfg.layer_order.clear();
    assert!(matches!(
        cfg.validate(),
        Err(LayermintError::Configuration(_))
    ));

    let mut cfg = base;
    cfg.extensions.clear();
    assert!(cfg.validate().is_err());
}

#[test]
fn from_path_reports_missing_file() {
    let err = GeneratorConfig::from_path("/definitely/not/here/layermint.json").unwrap_err();
    assert!(err.to_string().contains("open config"));
}
