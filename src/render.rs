//! Depth-first traversal of a [`PathTree`] and the two text layouts built on it.
//!
//! [`Traversal`] walks the tree with an explicit stack and yields one [`Visit`] per
//! node, carrying everything a layout needs: the last-sibling flags of the
//! enclosing levels, the node's own position among its siblings, and whether it
//! continues its parent's line. [`Narrow`] stacks siblings vertically like
//! `tree`; [`Wide`] puts the first child to the right of its parent like `pstree`.
//!
//! A node with exactly one child shares its line with that child, joined by the
//! separator, so `a/b/c` prints once. Root sentinels print bare, without a
//! branch glyph. When a sentinel is the only top-level node its children start
//! at the left margin; otherwise they keep its level like any other subtree.

use crate::error::ArboError;
use crate::options::{Charset, Style};
use crate::tree::{Node, NodeId, PathTree};
use std::io::Write;
use unicode_width::UnicodeWidthChar;

/// Position bookkeeping for one branching level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    /// The node at this level is the last of its siblings.
    pub last: bool,
    /// Printed width of the parent's line segment; `None` directly under the
    /// synthetic root.
    pub width: Option<usize>,
}

/// How a node attaches to what was printed before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A root sentinel, printed bare at the left margin.
    Root,
    /// A child of the synthetic root.
    Top,
    /// One of several children of its parent.
    Branch,
    /// The only child of its parent, continuing the parent's line.
    Chained { after_root: bool },
}

/// Rendering context of one node.
#[derive(Debug, Clone)]
pub struct Visit<'t> {
    pub id: NodeId,
    pub node: &'t Node,
    /// Levels above the node's own, outermost first.
    pub enclosing: Vec<Level>,
    /// The node's own level. A chained node shares the level of the line it
    /// continues.
    pub level: Level,
    pub first: bool,
    pub placement: Placement,
    /// Number of children of the node.
    pub children: usize,
}

impl Visit<'_> {
    pub fn last(&self) -> bool {
        self.level.last
    }

    /// The node's only child goes on the same line.
    pub fn continues(&self) -> bool {
        self.children == 1
    }
}

struct Frame {
    id: NodeId,
    enclosing: Vec<Level>,
    level: Level,
    first: bool,
    placement: Placement,
    /// The line was started by a root sentinel that is alone at the top, so its
    /// children start at the left margin.
    rooted: bool,
    chain_width: usize,
}

/// Lazy depth-first walk over every node but the synthetic root.
pub struct Traversal<'t> {
    tree: &'t PathTree,
    separator_width: usize,
    stack: Vec<Frame>,
}

impl<'t> Traversal<'t> {
    pub fn new(tree: &'t PathTree, separator: char) -> Self {
        let top = tree.node(tree.root()).children();
        let count = top.len();
        let stack = top
            .iter()
            .enumerate()
            .rev()
            .map(|(index, &id)| {
                let sentinel = tree.node(id).is_root_sentinel();
                Frame {
                    id,
                    enclosing: Vec::new(),
                    level: Level {
                        last: index + 1 == count,
                        width: None,
                    },
                    first: index == 0,
                    placement: if sentinel {
                        Placement::Root
                    } else {
                        Placement::Top
                    },
                    rooted: sentinel && count == 1,
                    chain_width: display_width(tree.node(id).label()),
                }
            })
            .collect();
        Self {
            tree,
            separator_width: separator.width().unwrap_or(1),
            stack,
        }
    }

    fn expand(&mut self, frame: &Frame, node: &Node) {
        let children = node.children();
        match children {
            [] => {}
            [only] => {
                let joint = if node.is_root_sentinel() {
                    0
                } else {
                    self.separator_width
                };
                self.stack.push(Frame {
                    id: *only,
                    enclosing: frame.enclosing.clone(),
                    level: frame.level,
                    first: frame.first,
                    placement: Placement::Chained {
                        after_root: node.is_root_sentinel(),
                    },
                    rooted: frame.rooted,
                    chain_width: frame.chain_width
                        + joint
                        + display_width(self.tree.node(*only).label()),
                });
            }
            _ => {
                let mut enclosing = Vec::new();
                if !frame.rooted {
                    enclosing.extend_from_slice(&frame.enclosing);
                    enclosing.push(frame.level);
                }
                let count = children.len();
                for (index, &id) in children.iter().enumerate().rev() {
                    self.stack.push(Frame {
                        id,
                        enclosing: enclosing.clone(),
                        level: Level {
                            last: index + 1 == count,
                            width: Some(frame.chain_width),
                        },
                        first: index == 0,
                        placement: Placement::Branch,
                        rooted: false,
                        chain_width: display_width(self.tree.node(id).label()),
                    });
                }
            }
        }
    }
}

impl<'t> Iterator for Traversal<'t> {
    type Item = Visit<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.stack.pop()?;
        let tree = self.tree;
        let node = tree.node(frame.id);
        self.expand(&frame, node);
        Some(Visit {
            id: frame.id,
            node,
            enclosing: frame.enclosing,
            level: frame.level,
            first: frame.first,
            placement: frame.placement,
            children: node.children().len(),
        })
    }
}

/// Glyph set shared by both layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub tee: &'static str,
    pub corner: &'static str,
    pub vertical: &'static str,
    pub blank: &'static str,
    pub fork: &'static str,
    pub wide_tee: &'static str,
    pub wide_corner: &'static str,
    pub bar: &'static str,
}

pub const ASCII: Glyphs = Glyphs {
    tee: "|-- ",
    corner: "`-- ",
    vertical: "|   ",
    blank: "    ",
    fork: "-+-",
    wide_tee: "|-",
    wide_corner: "`-",
    bar: "|",
};

pub const UNICODE: Glyphs = Glyphs {
    tee: "├── ",
    corner: "└── ",
    vertical: "│   ",
    blank: "    ",
    fork: "─┬─",
    wide_tee: "├─",
    wide_corner: "└─",
    bar: "│",
};

impl Glyphs {
    pub fn for_charset(charset: Charset) -> &'static Glyphs {
        match charset {
            Charset::Ascii => &ASCII,
            Charset::Unicode => &UNICODE,
        }
    }
}

/// Turns one [`Visit`] into output text.
pub trait Formatter {
    fn format(&self, visit: &Visit<'_>, out: &mut String);
}

/// `tree`-style layout.
#[derive(Debug, Clone, Copy)]
pub struct Narrow {
    pub glyphs: &'static Glyphs,
    pub separator: char,
}

impl Formatter for Narrow {
    fn format(&self, visit: &Visit<'_>, out: &mut String) {
        match visit.placement {
            Placement::Root => {}
            Placement::Chained { after_root } => {
                if !after_root {
                    out.push(self.separator);
                }
            }
            Placement::Top | Placement::Branch => {
                for level in &visit.enclosing {
                    out.push_str(if level.last {
                        self.glyphs.blank
                    } else {
                        self.glyphs.vertical
                    });
                }
                out.push_str(if visit.last() {
                    self.glyphs.corner
                } else {
                    self.glyphs.tee
                });
            }
        }
        out.push_str(visit.node.label());
        if !visit.continues() {
            out.push('\n');
        }
    }
}

/// `pstree`-style layout.
#[derive(Debug, Clone, Copy)]
pub struct Wide {
    pub glyphs: &'static Glyphs,
    pub separator: char,
}

impl Wide {
    fn pad(out: &mut String, width: usize) {
        out.extend(std::iter::repeat_n(' ', width + 1));
    }
}

impl Formatter for Wide {
    fn format(&self, visit: &Visit<'_>, out: &mut String) {
        match visit.placement {
            Placement::Root | Placement::Top => {}
            Placement::Chained { after_root } => {
                if !after_root {
                    out.push(self.separator);
                }
            }
            Placement::Branch if visit.first => out.push_str(self.glyphs.fork),
            Placement::Branch => {
                for level in &visit.enclosing {
                    if let Some(width) = level.width {
                        Self::pad(out, width);
                        out.push_str(if level.last { " " } else { self.glyphs.bar });
                        out.push(' ');
                    }
                }
                Self::pad(out, visit.level.width.unwrap_or(0));
                out.push_str(if visit.last() {
                    self.glyphs.wide_corner
                } else {
                    self.glyphs.wide_tee
                });
            }
        }
        out.push_str(visit.node.label());
        if visit.children == 0 {
            out.push('\n');
        }
    }
}

/// Writes a tree in the chosen style and glyph set.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    style: Style,
    glyphs: &'static Glyphs,
    separator: char,
}

impl Renderer {
    pub fn new(style: Style, charset: Charset) -> Self {
        Self {
            style,
            glyphs: Glyphs::for_charset(charset),
            separator: '/',
        }
    }

    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Streams the rendering to `out`, one node at a time.
    pub fn write<W: Write>(&self, tree: &PathTree, out: &mut W) -> Result<(), ArboError> {
        match self.style {
            Style::Narrow => self.write_with(
                &Narrow {
                    glyphs: self.glyphs,
                    separator: self.separator,
                },
                tree,
                out,
            ),
            Style::Wide => self.write_with(
                &Wide {
                    glyphs: self.glyphs,
                    separator: self.separator,
                },
                tree,
                out,
            ),
        }
    }

    fn write_with<F: Formatter, W: Write>(
        &self,
        formatter: &F,
        tree: &PathTree,
        out: &mut W,
    ) -> Result<(), ArboError> {
        let mut buffer = String::new();
        for visit in Traversal::new(tree, self.separator) {
            buffer.clear();
            formatter.format(&visit, &mut buffer);
            out.write_all(buffer.as_bytes()).map_err(ArboError::Write)?;
        }
        out.flush().map_err(ArboError::Write)
    }

    pub fn render(&self, tree: &PathTree) -> String {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write(tree, &mut out);
        String::from_utf8_lossy(&out).into_owned()
    }
}

/// Terminal width of `text`, escape sequences excluded.
pub fn display_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if chars.next() == Some('[') {
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            continue;
        }
        width += c.width().unwrap_or(0);
    }
    width
}
