//! Where path lists come from: standard input or a listing tool.

use crate::error::ArboError;
use crate::input::PathReader;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Input source of a run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PathSource {
    /// Standard input.
    #[default]
    Stdin,
    /// Files tracked by git, `git ls-files -z`.
    Git,
    /// Files tracked by Mercurial, `hg files -0`.
    Hg,
    /// Files versioned by Bazaar, `bzr ls -R --versioned --null`.
    Bzr,
    /// Subversion working copy listing, `svn ls -R`.
    Svn,
    /// Everything below `dir`, `find . -print0` run inside it.
    Find { dir: PathBuf },
    /// Files installed by Debian packages, `dpkg -L`.
    Dpkg { packages: Vec<String> },
}

impl PathSource {
    /// Program and arguments of the listing tool, `None` for standard input.
    pub fn invocation(&self) -> Option<(&'static str, Vec<String>)> {
        let (program, args): (&'static str, &[&str]) = match self {
            PathSource::Stdin => return None,
            PathSource::Git => ("git", &["ls-files", "-z"]),
            PathSource::Hg => ("hg", &["files", "-0"]),
            PathSource::Bzr => ("bzr", &["ls", "-R", "--versioned", "--null"]),
            PathSource::Svn => ("svn", &["ls", "-R"]),
            PathSource::Find { .. } => ("find", &[".", "-print0"]),
            PathSource::Dpkg { packages } => {
                let mut args = vec!["-L".to_string()];
                args.extend(packages.iter().cloned());
                return Some(("dpkg", args));
            }
        };
        Some((program, args.iter().map(|arg| arg.to_string()).collect()))
    }

    /// Records are NUL-terminated.
    pub fn zero_terminated(&self) -> bool {
        matches!(
            self,
            PathSource::Git | PathSource::Hg | PathSource::Bzr | PathSource::Find { .. }
        )
    }

    /// Every record starts with the same synthetic component (`.` for find).
    pub fn strip_leading(&self) -> bool {
        matches!(self, PathSource::Find { .. })
    }

    /// Directory the listing tool, and the decorator, run in.
    pub fn working_dir(&self) -> Option<&Path> {
        match self {
            PathSource::Find { dir } => Some(dir.as_path()),
            _ => None,
        }
    }

    fn keeps(&self, record: &str) -> bool {
        match self {
            PathSource::Dpkg { .. } => record != "/.",
            _ => true,
        }
    }

    /// Runs the listing tool to completion and returns its records in output
    /// order.
    ///
    /// A nonzero exit status becomes [`ArboError::CollaboratorExit`]. Standard
    /// input yields nothing here; it is streamed by the caller.
    pub fn collect(&self) -> Result<Vec<String>, ArboError> {
        let Some((program, args)) = self.invocation() else {
            return Ok(Vec::new());
        };
        let mut command = Command::new(program);
        command.args(&args);
        if let Some(dir) = self.working_dir() {
            if !dir.is_dir() {
                return Err(ArboError::io(
                    dir,
                    io::Error::new(io::ErrorKind::NotFound, "not a directory"),
                ));
            }
            command.current_dir(dir);
        }
        #[cfg(feature = "logging")]
        tracing::debug!("Running {} {}", program, args.join(" "));
        run_listing(command, program, self.zero_terminated(), |record| {
            self.keeps(record)
        })
    }
}

/// Runs `command` to completion, reading its delimited records from stdout.
fn run_listing(
    mut command: Command,
    program: &str,
    zero_terminated: bool,
    keeps: impl Fn(&str) -> bool,
) -> Result<Vec<String>, ArboError> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit());
    let mut child = command.spawn().map_err(|e| ArboError::Spawn {
        program: program.to_string(),
        source: e,
    })?;
    let records: Result<Vec<String>, ArboError> = match child.stdout.take() {
        Some(stdout) => PathReader::new(BufReader::new(stdout), zero_terminated, program)
            .filter(|record| record.as_ref().map_or(true, |r| keeps(r)))
            .collect(),
        None => Ok(Vec::new()),
    };
    let status = child.wait().map_err(|e| ArboError::Spawn {
        program: program.to_string(),
        source: e,
    })?;
    #[cfg(feature = "logging")]
    tracing::debug!("{} finished with {}", program, status);
    if !status.success() {
        return Err(ArboError::CollaboratorExit {
            program: program.to_string(),
            code: status.code(),
        });
    }
    records
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn shell(script: &str) -> Command {
        let mut command = Command::new("sh");
        command.args(["-c", script]);
        command
    }

    #[test]
    fn listing_records_are_collected() {
        let script = shell("printf 'a\\0b c\\0/.\\0'");
        let records = run_listing(script, "sh", true, |r| r != "/.").unwrap();
        assert_eq!(records, vec!["a", "b c"]);
    }

    #[test]
    fn nonzero_exit_is_propagated() {
        let result = run_listing(shell("printf 'a\\n'; exit 3"), "sh", false, |_| true);
        match result {
            Err(ArboError::CollaboratorExit { program, code }) => {
                assert_eq!(program, "sh");
                assert_eq!(code, Some(3));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let program = "arbo-no-such-lister";
        let result = run_listing(Command::new(program), program, false, |_| true);
        assert!(matches!(result, Err(ArboError::Spawn { .. })));
    }
}
