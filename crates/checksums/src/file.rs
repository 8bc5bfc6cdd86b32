use crate::Md5;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// Number of bytes read per hashing step.
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// MD5 digest of a file's content.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FileDigest([u8; 16]);

impl FileDigest {
    /// Returns the raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Renders the digest as 32 lowercase hex characters.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl From<[u8; 16]> for FileDigest {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for FileDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Hashes everything `reader` yields, [`CHUNK_SIZE`] bytes at a time.
///
/// `cancel` is checked before every read; once it is set the function stops
/// with [`io::ErrorKind::Interrupted`].
pub fn digest_reader<R: Read>(mut reader: R, cancel: &AtomicBool) -> io::Result<FileDigest> {
    let mut hasher = Md5::new();
    let mut buffer = vec![0_u8; CHUNK_SIZE];
    loop {
        if cancel.load(Ordering::Relaxed) {
            return Err(io::Error::new(
                io::ErrorKind::Interrupted,
                "digest cancelled",
            ));
        }
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        };
        hasher.update(&buffer[..read]);
    }
    Ok(FileDigest(hasher.finalize()))
}

/// Computes the digest of the file at `path`.
pub fn digest_file(path: &Path) -> io::Result<FileDigest> {
    digest_file_with(path, &AtomicBool::new(false))
}

/// Computes the digest of the file at `path`, giving up once `cancel` is set.
pub fn digest_file_with(path: &Path, cancel: &AtomicBool) -> io::Result<FileDigest> {
    let file = File::open(path)?;
    digest_reader(file, cancel)
}
