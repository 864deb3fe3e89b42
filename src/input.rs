//! Streaming record reader for newline- or NUL-delimited path lists.

use crate::error::ArboError;
use std::io::BufRead;

/// Iterator over the records of a delimited byte stream.
///
/// No record length is assumed. A final record without a trailing delimiter is
/// still yielded; a stream ending right after a delimiter yields nothing more.
/// Records are decoded as UTF-8, replacing invalid sequences.
pub struct PathReader<R> {
    reader: R,
    delimiter: u8,
    stream: String,
    buffer: Vec<u8>,
    done: bool,
}

impl<R: BufRead> PathReader<R> {
    /// `stream` names the input in error messages.
    pub fn new(reader: R, zero_terminated: bool, stream: impl Into<String>) -> Self {
        Self {
            reader,
            delimiter: if zero_terminated { b'\0' } else { b'\n' },
            stream: stream.into(),
            buffer: Vec::new(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for PathReader<R> {
    type Item = Result<String, ArboError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.buffer.clear();
        match self.reader.read_until(self.delimiter, &mut self.buffer) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                if self.buffer.last() == Some(&self.delimiter) {
                    self.buffer.pop();
                    if self.delimiter == b'\n' && self.buffer.last() == Some(&b'\r') {
                        self.buffer.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buffer).into_owned()))
            }
            Err(e) => {
                self.done = true;
                Some(Err(ArboError::read(self.stream.clone(), e)))
            }
        }
    }
}
