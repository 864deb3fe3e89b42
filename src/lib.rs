//! # Arbo
//!
//! `arbo` displays a tree from a flat, sorted list of paths, in the spirit of the
//! `tree` command. Paths come from standard input (newline- or NUL-terminated) or
//! from a listing tool such as `git ls-files`.
//!
//! Each path is split into components, merged with the path before it into a
//! prefix tree, and rendered depth-first. Chains of single children are collapsed
//! onto one line (`a/b/c`). Labels can be colorized by an external tool, `ls` by
//! default, queried in batches.
//!
//! # Features
//!
//! - `parallel`: Runs decoration batches in parallel using Rayon.
//! - `logging`: Enables debug logging via the `tracing` crate.
//!
//! # Example
//!
//! ```
//! use arbo::{ArboBuilder, Charset, arbo, output};
//!
//! let options = ArboBuilder::new().charset(Charset::Ascii).build();
//! let input: &[u8] = b"a/b\na/c\n";
//! let tree = arbo(&options, input, None).expect("Failed to build tree");
//!
//! assert_eq!(
//!     output::format_tree(&tree, &options),
//!     "`-- a\n    |-- b\n    `-- c\n"
//! );
//! ```

pub mod decorate;
mod engine;
mod error;
pub mod input;
mod options;
pub mod output;
pub mod render;
pub mod source;
pub mod split;
pub mod tree;
mod types;

pub use decorate::{Decoration, Decorator, ProcessDecorator};
pub use engine::{arbo, arbo_from_source, build};
pub use error::ArboError;
pub use options::{ArboBuilder, ArboOptions, Charset, OutputFormat, Style};
pub use render::Renderer;
pub use source::PathSource;
pub use tree::{Node, NodeId, PathTree, TreeBuilder};
pub use types::Component;
