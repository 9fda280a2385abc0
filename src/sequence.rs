//! Normalized character sequences and the normalizer that produces them.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::debug;

use crate::{AlignerError, Result, WILDCARD};

/// An immutable run of lower-case ASCII letters and wildcard symbols.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    data: Vec<u8>,
}

impl Sequence {
    /// Builds a sequence by running `data` through the default normalizer.
    pub fn new(data: &[u8]) -> Self {
        let normalizer = Normalizer::default();
        Self {
            data: data.iter().filter_map(|&b| normalizer.keep(b)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Append-only buffer used while a sequence is being read.
///
/// Capacity doubles whenever the buffer is full, and growth failure is
/// reported instead of aborting.
struct SequenceBuilder {
    data: Vec<u8>,
}

impl SequenceBuilder {
    const INITIAL_CAPACITY: usize = 255;

    fn new() -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(Self::INITIAL_CAPACITY)
            .map_err(|e| AlignerError::Allocation(e.to_string()))?;
        Ok(Self { data })
    }

    fn push(&mut self, byte: u8) -> Result<()> {
        if self.data.len() == self.data.capacity() {
            let additional = self.data.capacity().max(1);
            self.data
                .try_reserve_exact(additional)
                .map_err(|e| AlignerError::Allocation(e.to_string()))?;
        }
        self.data.push(byte);
        Ok(())
    }

    fn finish(self) -> Sequence {
        Sequence { data: self.data }
    }
}

/// Filters raw bytes down to lower-case letters and the wildcard symbol.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    wildcard: u8,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self { wildcard: WILDCARD }
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `wildcard` instead of `?`. Alphabetic wildcards are rejected,
    /// since they could not be told apart from ordinary letters.
    pub fn with_wildcard(mut self, wildcard: u8) -> Result<Self> {
        if wildcard.is_ascii_alphabetic() {
            return Err(AlignerError::InvalidParameter(format!(
                "wildcard {:?} must not be a letter",
                wildcard as char
            )));
        }
        self.wildcard = wildcard;
        Ok(self)
    }

    // Callers guarantee `wildcard` is not a letter.
    pub(crate) fn from_wildcard(wildcard: u8) -> Self {
        Self { wildcard }
    }

    pub fn wildcard(&self) -> u8 {
        self.wildcard
    }

    #[inline]
    fn keep(&self, byte: u8) -> Option<u8> {
        if byte.is_ascii_alphabetic() {
            Some(byte.to_ascii_lowercase())
        } else if byte == self.wildcard {
            Some(byte)
        } else {
            None
        }
    }

    /// Reads `reader` to the end and returns the normalized sequence.
    pub fn normalize<R: Read>(&self, reader: R) -> Result<Sequence> {
        self.normalize_buffered(BufReader::new(reader))
            .map_err(|e| match e {
                ReadFailure::Io(source) => AlignerError::Stream(source),
                ReadFailure::Aligner(e) => e,
            })
    }

    /// Opens `path`, normalizes its whole contents and closes it again.
    pub fn normalize_file<P: AsRef<Path>>(&self, path: P) -> Result<Sequence> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| AlignerError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let sequence = self
            .normalize_buffered(BufReader::new(file))
            .map_err(|e| match e {
                ReadFailure::Io(source) => AlignerError::Io {
                    path: path.to_path_buf(),
                    source,
                },
                ReadFailure::Aligner(e) => e,
            })?;

        debug!(
            "Normalized {} into {} characters",
            path.display(),
            sequence.len()
        );
        Ok(sequence)
    }

    fn normalize_buffered<B: BufRead>(
        &self,
        mut reader: B,
    ) -> std::result::Result<Sequence, ReadFailure> {
        let mut builder = SequenceBuilder::new().map_err(ReadFailure::Aligner)?;

        loop {
            let chunk = match reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ReadFailure::Io(e)),
            };
            if chunk.is_empty() {
                break;
            }

            let consumed = chunk.len();
            for &byte in chunk {
                if let Some(c) = self.keep(byte) {
                    builder.push(c).map_err(ReadFailure::Aligner)?;
                }
            }
            reader.consume(consumed);
        }

        Ok(builder.finish())
    }
}

// Lets the stream and file entry points attach their own path to I/O errors.
enum ReadFailure {
    Io(std::io::Error),
    Aligner(AlignerError),
}

/// Normalizes `reader` with the default `?` wildcard.
pub fn normalize<R: Read>(reader: R) -> Result<Sequence> {
    Normalizer::default().normalize(reader)
}

/// Normalizes the file at `path` with the default `?` wildcard.
pub fn normalize_file<P: AsRef<Path>>(path: P) -> Result<Sequence> {
    Normalizer::default().normalize_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(b"Hello, World!", b"helloworld" ; "punctuation and case")]
    #[test_case(b"a?b ?\n", b"a?b?" ; "wildcards kept")]
    #[test_case(b"123 \t\r\n.,;", b"" ; "nothing kept")]
    #[test_case(b"", b"" ; "empty input")]
    fn keeps_letters_and_wildcards(input: &[u8], expected: &[u8]) {
        let seq = normalize(input).unwrap();
        assert_eq!(seq.as_bytes(), expected);
        assert_eq!(seq.len(), expected.len());
    }

    #[test]
    fn length_counts_letters_and_wildcards() {
        let input: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let expected = input
            .iter()
            .filter(|b| b.is_ascii_alphabetic() || **b == b'?')
            .count();

        let seq = normalize(input.as_slice()).unwrap();
        assert_eq!(seq.len(), expected);
        assert!(seq
            .as_bytes()
            .iter()
            .all(|b| b.is_ascii_lowercase() || *b == b'?'));
    }

    #[test]
    fn grows_past_initial_capacity() {
        let input = vec![b'Z'; SequenceBuilder::INITIAL_CAPACITY * 5 + 3];
        let seq = normalize(input.as_slice()).unwrap();
        assert_eq!(seq.len(), input.len());
        assert!(seq.as_bytes().iter().all(|&b| b == b'z'));
    }

    #[test]
    fn custom_wildcard() {
        let normalizer = Normalizer::new().with_wildcard(b'*').unwrap();
        let seq = normalizer.normalize(&b"a*b?c"[..]).unwrap();
        assert_eq!(seq.as_bytes(), b"a*bc");
    }

    #[test]
    fn rejects_letter_wildcard() {
        assert!(matches!(
            Normalizer::new().with_wildcard(b'x'),
            Err(AlignerError::InvalidParameter(_))
        ));
    }

    #[test]
    fn sequence_new_normalizes() {
        assert_eq!(Sequence::new(b"C-A-T?").as_bytes(), b"cat?");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        match normalize_file(&path) {
            Err(AlignerError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
