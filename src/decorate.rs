//! Colorized and quoted display text for tree nodes, obtained from an external
//! collaborator in batches.
//!
//! The collaborator is a [`Decorator`]: it receives an ordered batch of full path
//! strings and answers with one [`Decoration`] per path, in the same order. The
//! stock implementation is [`ProcessDecorator`], which asks `ls --color=always`.
//! Root sentinels are never sent; they always print as `/` or `//`.

use crate::error::ArboError;
use crate::tree::{NodeId, PathTree};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Sequence appended after a styled label.
pub const RESET: &str = "\x1b[0m";

const ESC: char = '\x1b';

/// Style and literal text for the leaf component of one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    /// Leading style sequence, such as `"\x1b[01;34m"`.
    pub style: Option<String>,
    /// Possibly quoted or escaped leaf text.
    pub content: String,
}

impl Decoration {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            style: None,
            content: content.into(),
        }
    }

    pub fn styled(style: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            style: Some(style.into()),
            content: content.into(),
        }
    }

    /// Display text: style, content, then [`RESET`]. Unstyled content is returned
    /// as is.
    pub fn render(&self) -> String {
        match &self.style {
            Some(style) => format!("{}{}{}", style, self.content, RESET),
            None => self.content.clone(),
        }
    }
}

/// Capability turning a batch of paths into decorations.
///
/// Implementations must return exactly one decoration per requested path, in
/// request order. Batches may be decorated concurrently.
pub trait Decorator: Sync {
    fn decorate(&self, paths: &[String]) -> Result<Vec<Decoration>, ArboError>;
}

impl<F> Decorator for F
where
    F: Fn(&[String]) -> Result<Vec<Decoration>, ArboError> + Sync,
{
    fn decorate(&self, paths: &[String]) -> Result<Vec<Decoration>, ArboError> {
        self(paths)
    }
}

/// Parses one response line of a colorizing tool.
///
/// Accepted shape: leading resets, an optional style sequence, the literal
/// content, and a trailing reset (required after a style), optionally followed by
/// a clear-to-end-of-line. Returns `Ok(None)` for a line holding nothing but
/// control sequences; such a line does not answer any request.
pub fn parse_response_line(line: &str) -> Result<Option<Decoration>, ArboError> {
    let mut rest = line;
    while let Some(stripped) = rest.strip_suffix("\x1b[K") {
        rest = stripped;
    }
    rest = strip_leading_resets(rest);
    if rest.is_empty() {
        return Ok(None);
    }

    // A style cancelled by an immediate reset (the NORMAL code of `ls`) has no
    // effect; the last surviving one applies to the content.
    let mut style = None;
    while rest.starts_with(ESC) {
        let (sequence, after) = split_sequence(rest)?;
        if !sequence.ends_with('m') {
            return Err(ArboError::Decoration(format!(
                "unexpected control sequence {:?} in {:?}",
                sequence, line
            )));
        }
        let cancelled = strip_leading_resets(after);
        if cancelled.len() == after.len() {
            rest = after;
            style = Some(sequence);
            break;
        }
        rest = cancelled;
    }
    if style.is_none() && rest.is_empty() {
        return Ok(None);
    }

    let mut trailing_reset = false;
    while let Some(stripped) = strip_reset_suffix(rest) {
        rest = stripped;
        trailing_reset = true;
    }
    if style.is_some() && !trailing_reset {
        return Err(ArboError::Decoration(format!(
            "styled response without reset: {:?}",
            line
        )));
    }
    if rest.contains(ESC) {
        return Err(ArboError::Decoration(format!(
            "unexpected escape sequence inside {:?}",
            line
        )));
    }

    Ok(Some(Decoration {
        style: style.map(str::to_string),
        content: rest.to_string(),
    }))
}

/// Parses a whole response and checks that it answers `expected` requests.
pub fn parse_response(text: &str, expected: usize) -> Result<Vec<Decoration>, ArboError> {
    let mut decorations = Vec::with_capacity(expected);
    for line in text.split('\n') {
        if let Some(decoration) = parse_response_line(line)? {
            decorations.push(decoration);
        }
    }
    if decorations.len() != expected {
        return Err(ArboError::Decoration(format!(
            "expected {} response lines, got {}",
            expected,
            decorations.len()
        )));
    }
    Ok(decorations)
}

fn strip_leading_resets(mut text: &str) -> &str {
    loop {
        if let Some(rest) = text.strip_prefix("\x1b[0m") {
            text = rest;
        } else if let Some(rest) = text.strip_prefix("\x1b[m") {
            text = rest;
        } else {
            return text;
        }
    }
}

fn strip_reset_suffix(text: &str) -> Option<&str> {
    text.strip_suffix("\x1b[0m")
        .or_else(|| text.strip_suffix("\x1b[m"))
}

/// Splits a CSI sequence (`ESC [ params final`) off the front of `text`.
fn split_sequence(text: &str) -> Result<(&str, &str), ArboError> {
    let body = text.strip_prefix("\x1b[").ok_or_else(|| {
        ArboError::Decoration(format!("unsupported escape sequence in {:?}", text))
    })?;
    let end = body
        .char_indices()
        .find(|&(_, c)| ('@'..='~').contains(&c))
        .map(|(index, c)| index + c.len_utf8())
        .ok_or_else(|| {
            ArboError::Decoration(format!("unterminated escape sequence in {:?}", text))
        })?;
    let split = 2 + end;
    Ok((&text[..split], &text[split..]))
}

/// Decorator backed by a colorizing process, `ls` by default.
///
/// The process receives the whole batch as arguments and must print one line per
/// path in argument order.
#[derive(Debug, Clone)]
pub struct ProcessDecorator {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    separator: char,
}

impl ProcessDecorator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            current_dir: None,
            separator: '/',
        }
    }

    /// `ls -d -U --color=always --quoting-style=literal --`, honouring `LS_COLORS`.
    pub fn ls() -> Self {
        Self::new(
            "ls",
            ["-d", "-U", "--color=always", "--quoting-style=literal", "--"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
    }

    /// Runs the process in `dir`, where the requested relative paths resolve.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Reduces full-path content to the leaf, removing the request's parent
    /// prefix when the tool echoed it verbatim.
    pub(crate) fn leaf(&self, request: &str, content: String) -> String {
        let Some(position) = request.rfind(self.separator) else {
            return content;
        };
        let parent = &request[..position + self.separator.len_utf8()];
        match content.strip_prefix(parent) {
            Some(leaf) if !leaf.is_empty() => leaf.to_string(),
            _ => content,
        }
    }
}

impl Default for ProcessDecorator {
    fn default() -> Self {
        Self::ls()
    }
}

impl Decorator for ProcessDecorator {
    fn decorate(&self, paths: &[String]) -> Result<Vec<Decoration>, ArboError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .args(paths)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        let output = command.output().map_err(|e| {
            ArboError::Decoration(format!("failed to launch {}: {}", self.program, e))
        })?;
        if !output.status.success() {
            return Err(ArboError::Decoration(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }
        let text = String::from_utf8_lossy(&output.stdout);
        let decorations = parse_response(&text, paths.len())?;
        Ok(paths
            .iter()
            .zip(decorations)
            .map(|(request, decoration)| Decoration {
                content: self.leaf(request, decoration.content),
                style: decoration.style,
            })
            .collect())
    }
}

/// Decorates every non-sentinel node of `tree`, `batch_size` paths per call.
///
/// Any failing batch aborts the whole decoration and leaves the tree untouched.
/// Batch size affects throughput only, never the result.
pub fn decorate_tree(
    tree: &mut PathTree,
    decorator: &dyn Decorator,
    batch_size: usize,
    separator: char,
) -> Result<(), ArboError> {
    let targets: Vec<NodeId> = tree
        .descendants()
        .into_iter()
        .filter(|&id| !tree.node(id).is_root_sentinel())
        .collect();
    let requests: Vec<String> = targets
        .iter()
        .map(|&id| tree.path_text(id, separator))
        .collect();
    let batches = run_batches(&requests, decorator, batch_size.max(1))?;
    for (id, decoration) in targets.into_iter().zip(batches.into_iter().flatten()) {
        tree.set_display(id, decoration.render());
    }
    Ok(())
}

#[cfg(not(feature = "parallel"))]
fn run_batches(
    requests: &[String],
    decorator: &dyn Decorator,
    batch_size: usize,
) -> Result<Vec<Vec<Decoration>>, ArboError> {
    requests
        .chunks(batch_size)
        .map(|batch| decorate_batch(decorator, batch))
        .collect()
}

#[cfg(feature = "parallel")]
fn run_batches(
    requests: &[String],
    decorator: &dyn Decorator,
    batch_size: usize,
) -> Result<Vec<Vec<Decoration>>, ArboError> {
    requests
        .par_chunks(batch_size)
        .map(|batch| decorate_batch(decorator, batch))
        .collect()
}

fn decorate_batch(
    decorator: &dyn Decorator,
    batch: &[String],
) -> Result<Vec<Decoration>, ArboError> {
    #[cfg(feature = "logging")]
    tracing::debug!("Decorating batch of {} paths", batch.len());
    let decorations = decorator.decorate(batch)?;
    if decorations.len() != batch.len() {
        return Err(ArboError::Decoration(format!(
            "decorator answered {} of {} paths",
            decorations.len(),
            batch.len()
        )));
    }
    Ok(decorations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_strips_echoed_parent() {
        let ls = ProcessDecorator::ls();
        assert_eq!(ls.leaf("src/main.rs", "src/main.rs".into()), "main.rs");
        assert_eq!(ls.leaf("/usr", "/usr".into()), "usr");
        assert_eq!(ls.leaf("//net/x", "//net/x".into()), "x");
        assert_eq!(ls.leaf("top", "top".into()), "top");
    }

    #[test]
    fn leaf_keeps_content_that_was_rewritten() {
        let ls = ProcessDecorator::ls();
        assert_eq!(ls.leaf("a b/c d", "'a b/c d'".into()), "'a b/c d'");
        assert_eq!(ls.leaf("dir/", "dir/".into()), "dir/");
        let colon = ProcessDecorator::ls().separator(':');
        assert_eq!(colon.leaf("usr:lib", "usr:lib".into()), "lib");
    }

    #[cfg(unix)]
    #[test]
    fn process_output_is_reduced_to_leaves() {
        let printf = ProcessDecorator::new(
            "printf",
            vec!["\\033[01;34m%s\\033[0m\\n".into()],
        );
        let decorations = printf
            .decorate(&["/usr".to_string(), "/usr/bin".to_string()])
            .unwrap();
        assert_eq!(
            decorations,
            vec![
                Decoration::styled("\x1b[01;34m", "usr"),
                Decoration::styled("\x1b[01;34m", "bin"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn process_failure_is_a_decoration_error() {
        let failing = ProcessDecorator::new("false", Vec::new());
        assert!(matches!(
            failing.decorate(&["a".to_string()]),
            Err(ArboError::Decoration(_))
        ));
        let missing = ProcessDecorator::new("arbo-no-such-decorator", Vec::new());
        assert!(matches!(
            missing.decorate(&["a".to_string()]),
            Err(ArboError::Decoration(_))
        ));
    }
}
