use crate::decorate::{Decorator, ProcessDecorator, decorate_tree};
use crate::error::ArboError;
use crate::input::PathReader;
use crate::options::ArboOptions;
use crate::source::PathSource;
use crate::split::{split_path, strip_leading};
use crate::tree::{PathTree, TreeBuilder, build_tree};
use crate::types::Component;
use std::io::{self, BufRead};
fn prepare(line: &str, options: &ArboOptions) -> Vec<Component> {
    let components = split_path(line, options.separator);
    if options.strip_leading {
        strip_leading(components)
    } else {
        components
    }
}
/// Builds a tree from path records.
///
/// Without `options.sort` the records must already be sorted and are merged as
/// they arrive. With it, they are collected and sorted component-wise first.
pub fn build<I>(records: I, options: &ArboOptions) -> Result<PathTree, ArboError>
where
    I: IntoIterator<Item = Result<String, ArboError>>,
{
    let paths = records
        .into_iter()
        .map(|record| record.map(|line| prepare(&line, options)));
    if options.sort {
        let mut paths = paths.collect::<Result<Vec<_>, _>>()?;
        #[cfg(feature = "logging")]
        tracing::debug!("Sorting {} paths", paths.len());
        paths.sort();
        return Ok(build_tree(paths));
    }
    let mut builder = TreeBuilder::new();
    for path in paths {
        builder.push(path?);
    }
    Ok(builder.finish())
}
/// Reads delimited records from `reader`, builds the tree and decorates it when
/// `options.decorate` is set.
///
/// Decoration uses `decorator`, or `ls` when none is given.
pub fn arbo<R: BufRead>(
    options: &ArboOptions,
    reader: R,
    decorator: Option<&dyn Decorator>,
) -> Result<PathTree, ArboError> {
    let records = PathReader::new(reader, options.zero_terminated, "input");
    let mut tree = build(records, options)?;
    if options.decorate {
        let fallback = ProcessDecorator::ls().separator(options.separator);
        decorate(&mut tree, options, decorator.unwrap_or(&fallback))?;
    }
    Ok(tree)
}
/// Builds the tree for a [`PathSource`].
///
/// Standard input is streamed with the caller's options. A listing tool is run to
/// completion, its records are always sorted, and its own delimiter and prefix
/// handling override the options. The default decorator runs where the tool ran.
pub fn arbo_from_source(
    options: &ArboOptions,
    source: &PathSource,
    decorator: Option<&dyn Decorator>,
) -> Result<PathTree, ArboError> {
    if *source == PathSource::Stdin {
        return arbo(options, io::stdin().lock(), decorator);
    }
    let options = ArboOptions {
        zero_terminated: source.zero_terminated(),
        strip_leading: options.strip_leading || source.strip_leading(),
        sort: true,
        ..options.clone()
    };
    let records = source.collect()?;
    let mut tree = build(records.into_iter().map(Ok), &options)?;
    if options.decorate {
        let mut fallback = ProcessDecorator::ls().separator(options.separator);
        if let Some(dir) = source.working_dir() {
            fallback = fallback.current_dir(dir);
        }
        decorate(&mut tree, &options, decorator.unwrap_or(&fallback))?;
    }
    Ok(tree)
}
fn decorate(
    tree: &mut PathTree,
    options: &ArboOptions,
    decorator: &dyn Decorator,
) -> Result<(), ArboError> {
    #[cfg(feature = "logging")]
    tracing::debug!(
        "Decorating {} nodes in batches of {}",
        tree.len(),
        options.batch_size
    );
    decorate_tree(tree, decorator, options.batch_size, options.separator)
}
