use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("model {name} not found in {}", dir.display())]
    NotFound { name: String, dir: PathBuf },
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Where a model file should be looked up and, failing that, fetched from.
pub struct ModelSource<'a> {
    pub name: &'a str,
    /// `None` when the model has no public download.
    pub url: Option<&'a str>,
}

/// Resolve a model file by name.
///
/// Resolution order:
/// 1. The model directory given on the command line
/// 2. User cache directory (platform-specific)
/// 3. Download from the source URL into the cache, unless `offline`
pub fn resolve(
    source: &ModelSource<'_>,
    model_dir: &Path,
    offline: bool,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    let cache_dir = model_cache_dir().ok();
    resolve_in(source, model_dir, cache_dir.as_deref(), offline, progress)
}

/// [`resolve`] against an explicit cache directory; `None` when the
/// platform has none.
fn resolve_in(
    source: &ModelSource<'_>,
    model_dir: &Path,
    cache_dir: Option<&Path>,
    offline: bool,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    let local_path = model_dir.join(source.name);
    if local_path.is_file() {
        log::debug!("Using model {}", local_path.display());
        return Ok(local_path);
    }

    let not_found = || ModelResolveError::NotFound {
        name: source.name.to_string(),
        dir: model_dir.to_path_buf(),
    };

    let cache_dir = match cache_dir {
        Some(dir) => dir,
        None if offline || source.url.is_none() => return Err(not_found()),
        None => return Err(ModelResolveError::NoCacheDir),
    };
    let cached_path = cache_dir.join(source.name);
    if cached_path.is_file() {
        log::debug!("Using cached model {}", cached_path.display());
        return Ok(cached_path);
    }

    let url = match source.url {
        Some(url) if !offline => url,
        _ => return Err(not_found()),
    };

    log::info!("Downloading {} from {url}", source.name);
    fs::create_dir_all(cache_dir).map_err(ModelResolveError::CacheDir)?;
    download(url, &cached_path, progress)?;
    Ok(cached_path)
}

/// Platform-specific model cache directory.
///
/// - macOS: `~/Library/Application Support/facemark/models/`
/// - Linux: `$XDG_CACHE_HOME/facemark/models/` or `~/.cache/facemark/models/`
/// - Windows: `%LOCALAPPDATA%/facemark/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join("facemark").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join("facemark").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let temp_path = dest.with_extension("part");

    let result = download_inner(url, dest, &temp_path, progress);

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn download_inner(
    url: &str,
    dest: &Path,
    temp_path: &Path,
    progress: Option<ProgressFn>,
) -> Result<(), ModelResolveError> {
    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| ModelResolveError::Download {
            url: url.to_string(),
            source: e,
        })?;

    let total = response.content_length().unwrap_or(0);
    let write_err = |source| ModelResolveError::Write {
        path: temp_path.to_path_buf(),
        source,
    };

    let mut file = fs::File::create(temp_path).map_err(write_err)?;

    let mut reader = response;
    let mut buf = vec![0u8; 256 * 1024];
    let mut downloaded: u64 = 0;
    loop {
        let n = reader.read(&mut buf).map_err(write_err)?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).map_err(write_err)?;
        downloaded += n as u64;
        if let Some(ref cb) = progress {
            cb(downloaded, total);
        }
    }

    file.flush().map_err(write_err)?;
    drop(file);

    fs::rename(temp_path, dest).map_err(|e| ModelResolveError::Write {
        path: dest.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
