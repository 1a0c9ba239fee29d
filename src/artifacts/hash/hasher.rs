use crate::artifacts::hash::content_hash::ContentHash;
use anyhow::Context;
use sha2::{Digest, Sha256};
use std::io::{self, Read, Write};
use std::path::Path;

const CHUNK_SIZE: usize = 8192;

/// Incremental SHA-256 digest
///
/// Feed it whole buffers with [`Hasher::digest`], readers with
/// [`Hasher::digest_reader`] (read in fixed-size chunks, never whole), or
/// piece by piece with [`Hasher::update`].
#[derive(Debug, Clone, Default)]
pub struct Hasher {
    digest: Sha256,
}

impl Hasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, data: &[u8]) {
        self.digest.update(data);
    }

    pub fn finalize(self) -> ContentHash {
        ContentHash::from_digest(self.digest.finalize().as_slice())
    }

    pub fn digest(data: &[u8]) -> ContentHash {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }

    pub fn digest_reader<R: Read>(mut reader: R) -> io::Result<ContentHash> {
        let mut hasher = Self::new();
        let mut buffer = [0u8; CHUNK_SIZE];

        loop {
            let read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(read) => read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hasher.update(&buffer[..read]);
        }

        Ok(hasher.finalize())
    }

    pub fn digest_file(path: &Path) -> anyhow::Result<ContentHash> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Unable to open {} for hashing", path.display()))?;

        Self::digest_reader(io::BufReader::new(file))
            .with_context(|| format!("Unable to read {} for hashing", path.display()))
    }
}

/// Writer adapter that digests every byte passed through to `inner`
pub struct HashingWriter<W: Write> {
    inner: W,
    hasher: Hasher,
}

impl<W: Write> HashingWriter<W> {
    pub fn new(inner: W) -> Self {
        HashingWriter {
            inner,
            hasher: Hasher::new(),
        }
    }

    pub fn into_parts(self) -> (W, ContentHash) {
        (self.inner, self.hasher.finalize())
    }
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.hasher.update(&buf[..written]);
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
