use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Error that occurs when opening a file fails.
#[derive(Debug, thiserror::Error)]
#[error("failed to open file `{path}`: {source}")]
pub struct FileOpenError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Error that occurs when a file was opened but reading its content failed.
#[derive(Debug, thiserror::Error)]
pub enum FileReadError {
    #[error(transparent)]
    Open(#[from] FileOpenError),
    #[error("failed to read file `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Opens a file at the given path and wraps it in a [`BufReader`].
///
/// # Errors
///
/// Returns a [`FileOpenError`] if the file cannot be opened.
///
/// # Example
/// ```no_run
/// # use cgroup_memory_exporter::fsutil;
/// let reader = fsutil::open_file_reader("/sys/fs/cgroup/memory/memory.stat")?;
/// # Ok::<(), fsutil::FileOpenError>(())
/// ```
pub fn open_file_reader(path: impl AsRef<Path>) -> Result<BufReader<File>, FileOpenError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FileOpenError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Reads the whole content of a small pseudo-file into a `String`.
///
/// The file handle is dropped before returning, on success and on error.
///
/// # Errors
///
/// Returns [`FileReadError::Open`] if the file cannot be opened and
/// [`FileReadError::Read`] if its content cannot be read as UTF-8 text.
pub fn read_to_string(path: impl AsRef<Path>) -> Result<String, FileReadError> {
    let path = path.as_ref();
    let mut reader = open_file_reader(path)?;
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|source| FileReadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(content)
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_file_reader_success() {
        let tmp = tempfile::NamedTempFile::new().expect("failed to create temp file");
        let path = tmp.path();
        let reader = open_file_reader(path).expect("should open test file");
        let metadata = reader.get_ref().metadata().unwrap();
        assert!(metadata.is_file());
    }

    #[test]
    fn test_open_file_reader_error() {
        let result = open_file_reader("/definitely/does/not/exist");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.path, PathBuf::from("/definitely/does/not/exist"));
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_read_to_string_success() {
        let mut tmp = tempfile::NamedTempFile::new().expect("failed to create temp file");
        writeln!(tmp, "4096").unwrap();
        let content = read_to_string(tmp.path()).expect("should read test file");
        assert_eq!(content, "4096\n");
    }

    #[test]
    fn test_read_to_string_missing_file() {
        let err = read_to_string("/definitely/does/not/exist").unwrap_err();
        match err {
            FileReadError::Open(err) => {
                assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
            }
            _ => panic!("Expected Open error"),
        }
    }

    #[test]
    fn test_read_to_string_invalid_utf8() {
        let mut tmp = tempfile::NamedTempFile::new().expect("failed to create temp file");
        tmp.write_all(&[0xff, 0xfe, 0x00]).unwrap();
        let err = read_to_string(tmp.path()).unwrap_err();
        match err {
            FileReadError::Read { path, source } => {
                assert_eq!(path, tmp.path());
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
            }
            _ => panic!("Expected Read error"),
        }
    }
}
