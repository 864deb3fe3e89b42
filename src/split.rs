//! Turning one input line into path components.

use crate::types::Component;

/// Splits `line` on `separator` into components.
///
/// Exactly two leading separators yield [`Component::RootDoubleSlash`], exactly one
/// yields [`Component::RootSlash`]. Any other line, including one with three or
/// more leading separators, is relative and carries no sentinel. Empty segments are
/// dropped, so `a//b` splits like `a/b` and a trailing separator is insignificant.
///
/// Any text is accepted. A line with no segments gives an empty vector.
pub fn split_path(line: &str, separator: char) -> Vec<Component> {
    let leading = line.chars().take_while(|&c| c == separator).count();
    let root = match leading {
        1 => Some(Component::RootSlash),
        2 => Some(Component::RootDoubleSlash),
        _ => None,
    };
    root.into_iter()
        .chain(
            line.split(separator)
                .filter(|segment| !segment.is_empty())
                .map(Component::from),
        )
        .collect()
}

/// Drops the first component, if any.
///
/// Used when every path starts with the same synthetic prefix, such as the `.`
/// printed by `find .`.
pub fn strip_leading(mut components: Vec<Component>) -> Vec<Component> {
    if !components.is_empty() {
        components.remove(0);
    }
    components
}

/// Joins components back into path text. Sentinels are not followed by an extra
/// separator.
pub fn join_path<'a, I>(components: I, separator: char) -> String
where
    I: IntoIterator<Item = &'a Component>,
{
    let mut text = String::new();
    let mut after_root = true;
    for component in components {
        if !after_root {
            text.push(separator);
        }
        text.push_str(component.as_str());
        after_root = component.is_root();
    }
    text
}
