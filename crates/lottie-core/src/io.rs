use crate::CropError;
use lottie_data::model::LottieJson;
use std::fs;
use std::path::Path;

/// Reads and parses a Lottie file.
pub fn read_animation(path: &Path) -> Result<LottieJson, CropError> {
    let json_str = fs::read_to_string(path).map_err(|source| CropError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let model = serde_json::from_str(&json_str).map_err(|source| CropError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Loaded {} ({} bytes)", path.display(), json_str.len());
    Ok(model)
}

/// Serializes `doc` to `path`, creating missing parent directories.
///
/// Output is compact unless `pretty` is set (two-space indent). Strings are
/// written as UTF-8 without escaping non-ASCII characters.
pub fn write_animation(path: &Path, doc: &LottieJson, pretty: bool) -> Result<(), CropError> {
    let json = if pretty {
        serde_json::to_string_pretty(doc)?
    } else {
        serde_json::to_string(doc)?
    };

    let write_err = |source| CropError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(write_err)?;
    }
    fs::write(path, json.as_bytes()).map_err(write_err)?;
    tracing::debug!("Wrote {} ({} bytes)", path.display(), json.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_animation(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CropError::Read { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn test_read_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{\"h\": 800, \"layers\": [").unwrap();
        assert!(matches!(
            read_animation(&path).unwrap_err(),
            CropError::Parse { .. }
        ));
    }

    #[test]
    fn test_write_creates_directories_and_keeps_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets").join("animations").join("oso.json");
        let doc: LottieJson = serde_json::from_value(json!({ "nm": "otro oso ñ", "h": 10 })).unwrap();

        write_animation(&path, &doc, false).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("otro oso ñ"));
        assert!(!written.contains('\n'));

        write_animation(&path, &doc, true).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n  \""));
        assert_eq!(read_animation(&path).unwrap(), doc);
    }
}
