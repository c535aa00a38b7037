//! Utility functions and helpers for the inventory service

use std::path::{Component, Path};

use uuid::Uuid;

/// Ensure a directory exists, creating it if necessary
pub(crate) async fn ensure_dir_exists(path: &Path) -> std::io::Result<()> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        tokio::fs::create_dir_all(path).await?;
    }
    Ok(())
}

/// Extension of an uploaded file name, including the leading dot.
///
/// Returns an empty string when there is none or it contains anything but
/// ASCII letters and digits.
pub(crate) fn file_extension(original_name: &str) -> String {
    match Path::new(original_name).extension().and_then(|s| s.to_str()) {
        Some(ext) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            format!(".{}", ext)
        }
        _ => String::new(),
    }
}

/// Generate a unique asset name: `{field}-{millis}-{random}{ext}`
pub(crate) fn generate_filename(field: &str, original_name: Option<&str>) -> String {
    let timestamp = chrono::Utc::now().timestamp_millis();
    let random = Uuid::new_v4().as_u128() % 1_000_000_000;
    let extension = original_name.map(file_extension).unwrap_or_default();
    format!("{}-{}-{}{}", field, timestamp, random, extension)
}

/// True when `name` is exactly one normal path component.
pub(crate) fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("drill.jpg"), ".jpg");
        assert_eq!(file_extension("archive.tar.gz"), ".gz");
        assert_eq!(file_extension("README"), "");
        assert_eq!(file_extension("weird.j/pg"), "");
        assert_eq!(file_extension("odd.p g"), "");
    }

    #[test]
    fn test_generate_filename() {
        let filename = generate_filename("photo", Some("drill.PNG"));
        assert!(filename.starts_with("photo-"));
        assert!(filename.ends_with(".PNG"));
        assert_eq!(filename.split('-').count(), 3);

        let bare = generate_filename("photo", None);
        assert!(!bare.contains('.'));
        assert_ne!(generate_filename("photo", None), bare);
    }

    #[test]
    fn test_is_plain_file_name() {
        assert!(is_plain_file_name("photo-1-2.jpg"));
        assert!(!is_plain_file_name("../secret"));
        assert!(!is_plain_file_name("a/b.jpg"));
        assert!(!is_plain_file_name("/etc/passwd"));
        assert!(!is_plain_file_name(""));
        assert!(!is_plain_file_name("."));
    }
}
