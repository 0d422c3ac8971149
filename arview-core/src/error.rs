/// Error types for model loading and calibration
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading assets or ingesting calibration data.
///
/// Parse and I/O errors are fatal: the load is aborted and no `Model`
/// exists afterwards. Texture failures are only fatal in strict mode;
/// the lenient default downgrades them to a logged warning and the
/// no-texture sentinel handle.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Covers both a missing file and a file that failed to decode.
    #[error("texture could not be loaded: {}", .0.display())]
    TextureLoad(PathBuf),

    #[error("camera matrix must have 9 entries (3x3), got {0}")]
    CalibrationShape(usize),

    #[error("distortion coefficients must have 4, 5, 8, 12 or 14 entries, got {0}")]
    DistortionShape(usize),
}

impl Error {
    pub(crate) fn parse(path: &std::path::Path, line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.to_path_buf(),
            line,
            message: message.into(),
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_parse_error_names_file_and_line() {
        let err = Error::parse(Path::new("model.obj"), 12, "face has 2 corners");
        assert_eq!(err.to_string(), "model.obj:12: face has 2 corners");
    }
}
