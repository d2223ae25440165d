//! Background decoding of the image shown on the reveal surface.

use crate::error::{Error, Result};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Outcome of polling an [`ImageLoader`].
#[derive(Debug)]
pub enum LoadStatus {
    Pending,
    Ready(RgbaImage),
    Failed,
}

/// Decodes an image source on the rayon pool and hands it back over a channel.
///
/// Dropping the loader abandons whatever is still in flight.
pub struct ImageLoader {
    source: String,
    rx: Option<Receiver<Result<RgbaImage>>>,
    failed: bool,
}

impl ImageLoader {
    /// Start decoding `source` in the background.
    pub fn spawn(source: &str) -> Self {
        let path = match resolve_source(source) {
            Ok(path) => path,
            Err(err) => {
                log::warn!("cannot load reveal image {source:?}: {err}");
                return Self {
                    source: source.to_owned(),
                    rx: None,
                    failed: true,
                };
            }
        };

        log::info!("loading reveal image from {}", path.display());
        let (tx, rx) = mpsc::channel();
        rayon::spawn(move || {
            // The receiver is gone if the widget was torn down first.
            let _ = tx.send(decode_file(&path));
        });

        Self {
            source: source.to_owned(),
            rx: Some(rx),
            failed: false,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Non-blocking check for the decoded image. `Ready` is returned once.
    pub fn poll(&mut self) -> LoadStatus {
        let Some(rx) = &self.rx else {
            return if self.failed {
                LoadStatus::Failed
            } else {
                LoadStatus::Pending
            };
        };

        match rx.try_recv() {
            Ok(Ok(image)) => {
                self.rx = None;
                log::info!(
                    "decoded reveal image {} ({}x{})",
                    self.source,
                    image.width(),
                    image.height()
                );
                LoadStatus::Ready(image)
            }
            Ok(Err(err)) => {
                log::warn!("reveal image {} failed to load: {err}", self.source);
                self.rx = None;
                self.failed = true;
                LoadStatus::Failed
            }
            Err(TryRecvError::Empty) => LoadStatus::Pending,
            Err(TryRecvError::Disconnected) => {
                log::warn!("decoder for {} exited without a result", self.source);
                self.rx = None;
                self.failed = true;
                LoadStatus::Failed
            }
        }
    }
}

/// Map a source string to a local path. Only plain paths and `file://` URLs are accepted.
pub fn resolve_source(source: &str) -> Result<PathBuf> {
    let source = source.trim();
    if source.is_empty() {
        return Err(Error::InvalidArgument("empty image source".to_owned()));
    }

    match source.split_once("://") {
        None => Ok(PathBuf::from(source)),
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("file") => {
            let rest = rest.strip_prefix("localhost").unwrap_or(rest);
            if rest.is_empty() {
                return Err(Error::InvalidArgument(format!("no path in {source}")));
            }
            Ok(PathBuf::from(rest))
        }
        Some((scheme, _)) => Err(Error::UnsupportedScheme(scheme.to_owned())),
    }
}

/// Read and decode a file into straight-alpha RGBA.
pub fn decode_file(path: &Path) -> Result<RgbaImage> {
    let bytes = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("watercolor-reveal-{}-{name}", std::process::id()))
    }

    fn wait_for(loader: &mut ImageLoader) -> LoadStatus {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            match loader.poll() {
                LoadStatus::Pending if Instant::now() < deadline => {
                    std::thread::sleep(Duration::from_millis(5))
                }
                status => return status,
            }
        }
    }

    #[test]
    fn plain_and_file_paths_resolve() {
        assert_eq!(resolve_source("a/b.png").unwrap(), PathBuf::from("a/b.png"));
        assert_eq!(
            resolve_source("file:///tmp/x.png").unwrap(),
            PathBuf::from("/tmp/x.png")
        );
        assert_eq!(
            resolve_source("FILE://localhost/tmp/x.png").unwrap(),
            PathBuf::from("/tmp/x.png")
        );
    }

    #[test]
    fn network_sources_are_rejected() {
        assert!(matches!(
            resolve_source("https://example.com/cover.jpg"),
            Err(Error::UnsupportedScheme(s)) if s == "https"
        ));
        assert!(matches!(resolve_source("  "), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn decodes_png_in_background() {
        let path = temp_file("ok.png");
        RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();

        let mut loader = ImageLoader::spawn(path.to_str().unwrap());
        match wait_for(&mut loader) {
            LoadStatus::Ready(image) => assert_eq!(image.dimensions(), (3, 2)),
            other => panic!("unexpected status {other:?}"),
        }
        // The image is handed out once; afterwards the loader idles.
        assert!(matches!(loader.poll(), LoadStatus::Pending));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn garbage_file_fails_and_stays_failed() {
        let path = temp_file("garbage.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let mut loader = ImageLoader::spawn(path.to_str().unwrap());
        assert!(matches!(wait_for(&mut loader), LoadStatus::Failed));
        assert!(matches!(loader.poll(), LoadStatus::Failed));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = decode_file(Path::new("/nonexistent/watercolor.png")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn unsupported_scheme_fails_immediately() {
        let mut loader = ImageLoader::spawn("http://example.com/a.png");
        assert!(matches!(loader.poll(), LoadStatus::Failed));
    }
}
