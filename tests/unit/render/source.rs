use super::*;
use crate::render::decode::encode_png;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "layermint_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn fs_source_decodes_each_file_once() {
    let dir = temp_dir("fs_source_cache");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("peach.png");
    std::fs::write(&path, encode_png(1, 1, &[1, 2, 3, 255]).unwrap()).unwrap();

    let option = TraitOption::from_file(&path).unwrap();
    let mut source = FsLayerSource::new();
    let a = source.load("Background", &option).unwrap();
    let b = source.load("Background", &option).unwrap();
    assert_eq!(a, b);
    assert_eq!(source.decode_count(&path), 1);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn fs_source_errors_name_the_file() {
    let dir = temp_dir("fs_source_errors");
    std::fs::create_dir_all(&dir).unwrap();
    let corrupt = dir.join("broken.png");
    std::fs::write(&corrupt, b"definitely not png").unwrap();

    let mut source = FsLayerSource::new();
    let err = source
        .load("Eyes", &TraitOption::from_file(&corrupt).unwrap())
        .unwrap_err();
    assert!(matches!(err, LayermintError::Render(_)));
    assert!(err.to_string().contains("broken.png"));

    let missing = TraitOption::from_file(dir.join("gone.png")).unwrap();
    let err = source.load("Eyes", &missing).unwrap_err();
    assert!(matches!(err, LayermintError::Other(_)));
    assert!(err.to_string().contains("Eyes"));

    std::fs::remove_dir_all(&dir).ok();
}
