use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum ArboError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {stream}: {source}")]
    Read {
        stream: String,
        source: std::io::Error,
    },
    #[error("Failed to write output: {0}")]
    Write(#[source] std::io::Error),
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{program} exited with {}", describe_code(.code))]
    CollaboratorExit { program: String, code: Option<i32> },
    #[error("Decoration failed: {0}")]
    Decoration(String),
}
impl ArboError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ArboError::Io {
            path: path.into(),
            source,
        }
    }
    pub(crate) fn read(stream: impl Into<String>, source: std::io::Error) -> Self {
        ArboError::Read {
            stream: stream.into(),
            source,
        }
    }
    /// Process exit status for this failure: the collaborator's own code when it
    /// reported one, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            ArboError::CollaboratorExit {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}
fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}
