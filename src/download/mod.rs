// SPDX-License-Identifier: MPL-2.0
//! Photo download engine.
//!
//! A download fetches the image with caches bypassed, streams the body into a
//! transient `<name>.part` file, and renames it into place: the rename is the
//! only moment a finished file becomes visible, and a failed transfer leaves
//! nothing behind.
//!
//! The policy on failure is degrade-not-fail: whatever went wrong (transport
//! error, non-success status), [`save_with_fallback`] opens the raw URL in the
//! system browser so the user always has a way to retrieve the image.

pub mod bulk;

use futures_util::StreamExt;
use std::fmt;
use std::path::{Path, PathBuf};

/// Filename used when a URL carries no usable trailing segment.
pub const FALLBACK_FILENAME: &str = "photo.jpg";

/// Extension assumed when the response declares no usable content type.
const FALLBACK_EXTENSION: &str = "jpg";

/// Errors from a single download attempt.
#[derive(Debug, Clone)]
pub enum DownloadError {
    /// The request could not be sent or the body stream broke.
    Request(String),
    /// The server answered with a non-success status.
    Status(u16),
    /// The file could not be written or renamed.
    Io(String),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::Request(msg) => write!(f, "Request failed: {msg}"),
            DownloadError::Status(code) => write!(f, "Server returned status {code}"),
            DownloadError::Io(msg) => write!(f, "File error: {msg}"),
        }
    }
}

impl std::error::Error for DownloadError {}

/// How a download attempt concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The photo was written to disk at this path.
    Saved(PathBuf),
    /// The download failed and the URL was handed to the system browser.
    OpenedExternally,
}

impl Outcome {
    /// Whether the attempt counts as a failure for aggregate reporting.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::OpenedExternally)
    }
}

/// Derives the local filename from a URL's trailing path segment, falling
/// back to [`FALLBACK_FILENAME`] when the URL has none.
#[must_use]
pub fn filename_from_url(url: &str) -> String {
    let segment = crate::api::image_id_from_url(url);
    if segment.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        segment
    }
}

/// Maps an image content type to a file extension.
#[must_use]
pub fn extension_for_content_type(content_type: &str) -> &'static str {
    // Parameters like "; charset=..." are not part of the media type.
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim();
    match media_type {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        "image/svg+xml" => "svg",
        _ => FALLBACK_EXTENSION,
    }
}

/// Appends a content-type-derived extension when the derived name has none.
#[must_use]
pub fn ensure_extension(name: &str, content_type: Option<&str>) -> String {
    if Path::new(name).extension().is_some() {
        return name.to_string();
    }
    let ext = content_type.map_or(FALLBACK_EXTENSION, extension_for_content_type);
    format!("{name}.{ext}")
}

/// Picks a destination path that does not collide with an existing file,
/// suffixing `-1`, `-2`, … before the extension when needed.
#[must_use]
pub fn unique_destination(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let path = Path::new(name);
    let stem = path
        .file_stem()
        .map_or_else(|| name.to_string(), |s| s.to_string_lossy().into_owned());
    let extension = path.extension().map(|e| e.to_string_lossy().into_owned());

    let mut counter = 1u32;
    loop {
        let next_name = match &extension {
            Some(ext) => format!("{stem}-{counter}.{ext}"),
            None => format!("{stem}-{counter}"),
        };
        let next = dir.join(next_name);
        if !next.exists() {
            return next;
        }
        counter += 1;
    }
}

/// Downloads one photo into `dir` and returns the saved path.
///
/// The request carries `Cache-Control: no-cache` and `Pragma: no-cache` so a
/// stale CDN copy is never saved. The body streams into `<name>.part`, which
/// is removed on any failure and renamed into place on success.
///
/// # Errors
///
/// Returns an error on transport failure, a non-success status, or when the
/// file cannot be written.
pub async fn fetch_image(
    client: &reqwest::Client,
    url: &str,
    dir: &Path,
) -> Result<PathBuf, DownloadError> {
    use reqwest::header;

    let response = client
        .get(url)
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::PRAGMA, "no-cache")
        .send()
        .await
        .map_err(|e| DownloadError::Request(e.to_string()))?;

    if !response.status().is_success() {
        return Err(DownloadError::Status(response.status().as_u16()));
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let name = ensure_extension(&filename_from_url(url), content_type.as_deref());

    std::fs::create_dir_all(dir).map_err(|e| DownloadError::Io(e.to_string()))?;
    let destination = unique_destination(dir, &name);
    let part_path = destination.with_extension(match destination.extension() {
        Some(ext) => format!("{}.part", ext.to_string_lossy()),
        None => "part".to_string(),
    });

    let mut file =
        std::fs::File::create(&part_path).map_err(|e| DownloadError::Io(e.to_string()))?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                let _ = std::fs::remove_file(&part_path);
                return Err(DownloadError::Request(e.to_string()));
            }
        };
        if let Err(e) = std::io::Write::write_all(&mut file, &chunk) {
            let _ = std::fs::remove_file(&part_path);
            return Err(DownloadError::Io(e.to_string()));
        }
    }
    drop(file);

    std::fs::rename(&part_path, &destination).map_err(|e| {
        let _ = std::fs::remove_file(&part_path);
        DownloadError::Io(e.to_string())
    })?;

    Ok(destination)
}

/// Downloads one photo, degrading to a browser open on any failure.
///
/// The error itself is logged, never surfaced: from the user's point of view
/// the photo either appears in the download directory or in a browser tab.
pub async fn save_with_fallback(client: &reqwest::Client, url: &str, dir: &Path) -> Outcome {
    match fetch_image(client, url, dir).await {
        Ok(path) => Outcome::Saved(path),
        Err(err) => {
            eprintln!("Download failed for {url}: {err}");
            if let Err(open_err) = open_in_browser(url) {
                eprintln!("Could not open {url} in browser: {open_err}");
            }
            Outcome::OpenedExternally
        }
    }
}

/// Hands a URL to the platform's default browser.
///
/// # Errors
///
/// Returns an error when the opener process cannot be spawned.
pub fn open_in_browser(url: &str) -> std::io::Result<()> {
    use std::process::Command;

    #[cfg(target_os = "linux")]
    let mut command = {
        let mut c = Command::new("xdg-open");
        c.arg(url);
        c
    };

    #[cfg(target_os = "macos")]
    let mut command = {
        let mut c = Command::new("open");
        c.arg(url);
        c
    };

    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", "", url]);
        c
    };

    command.spawn().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn filename_is_trailing_segment() {
        assert_eq!(filename_from_url("https://x/a.jpg"), "a.jpg");
        assert_eq!(filename_from_url("https://x/deep/path/b.png"), "b.png");
    }

    #[test]
    fn filename_falls_back_when_segment_is_empty() {
        assert_eq!(filename_from_url("https://x/"), FALLBACK_FILENAME);
    }

    #[test]
    fn filename_strips_query_string() {
        assert_eq!(filename_from_url("https://x/a.jpg?sig=abc"), "a.jpg");
    }

    #[test]
    fn extension_maps_common_image_types() {
        assert_eq!(extension_for_content_type("image/png"), "png");
        assert_eq!(extension_for_content_type("image/webp"), "webp");
        assert_eq!(extension_for_content_type("image/jpeg"), "jpg");
    }

    #[test]
    fn extension_ignores_content_type_parameters() {
        assert_eq!(extension_for_content_type("image/png; charset=binary"), "png");
    }

    #[test]
    fn unknown_content_type_falls_back_to_jpg() {
        assert_eq!(extension_for_content_type("application/octet-stream"), "jpg");
    }

    #[test]
    fn ensure_extension_keeps_existing() {
        assert_eq!(ensure_extension("a.jpg", Some("image/png")), "a.jpg");
    }

    #[test]
    fn ensure_extension_appends_from_content_type() {
        assert_eq!(ensure_extension("photo", Some("image/png")), "photo.png");
        assert_eq!(ensure_extension("photo", None), "photo.jpg");
    }

    #[test]
    fn unique_destination_prefers_plain_name() {
        let dir = tempdir().expect("create temp dir");
        let dest = unique_destination(dir.path(), "a.jpg");
        assert_eq!(dest, dir.path().join("a.jpg"));
    }

    #[test]
    fn unique_destination_suffixes_on_collision() {
        let dir = tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("a.jpg"), b"first").expect("write");
        let dest = unique_destination(dir.path(), "a.jpg");
        assert_eq!(dest, dir.path().join("a-1.jpg"));

        std::fs::write(&dest, b"second").expect("write");
        let dest = unique_destination(dir.path(), "a.jpg");
        assert_eq!(dest, dir.path().join("a-2.jpg"));
    }

    #[test]
    fn saved_outcome_is_not_a_failure() {
        assert!(!Outcome::Saved(PathBuf::from("/tmp/a.jpg")).is_failure());
        assert!(Outcome::OpenedExternally.is_failure());
    }

    #[test]
    fn download_error_display() {
        assert_eq!(
            DownloadError::Status(404).to_string(),
            "Server returned status 404"
        );
        assert!(DownloadError::Request("timed out".into())
            .to_string()
            .contains("timed out"));
    }
}
