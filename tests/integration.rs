use arbo::{
    ArboBuilder, ArboError, ArboOptions, Charset, Decoration, Decorator, OutputFormat, PathTree,
    Renderer, Style, arbo, build, output, split::split_path,
};
use std::fs;
use std::sync::Mutex;
use tempfile::tempdir;
fn tree_of(lines: &[&str], options: &ArboOptions) -> PathTree {
    build(lines.iter().map(|line| Ok(line.to_string())), options).unwrap()
}
fn narrow(lines: &[&str]) -> String {
    let options = ArboOptions::default();
    output::format_tree(&tree_of(lines, &options), &options)
}
fn wide(lines: &[&str]) -> String {
    let options = ArboBuilder::new().style(Style::Wide).build();
    output::format_tree(&tree_of(lines, &options), &options)
}
fn bold_leaf(paths: &[String]) -> Result<Vec<Decoration>, ArboError> {
    Ok(paths
        .iter()
        .map(|path| Decoration::styled("\x1b[1m", path.rsplit('/').next().unwrap_or(path)))
        .collect())
}
#[test]
fn integration_two_children() {
    assert_eq!(narrow(&["a/b", "a/c"]), "`-- a\n    |-- b\n    `-- c\n");
}
#[test]
fn integration_single_chain_collapses() {
    assert_eq!(narrow(&["a/b/c"]), "`-- a/b/c\n");
}
#[test]
fn integration_root_slash() {
    assert_eq!(narrow(&["/x"]), "/x\n");
    assert_eq!(narrow(&["/a", "/b"]), "/\n|-- a\n`-- b\n");
    assert_eq!(narrow(&["/usr/bin", "/usr/lib"]), "/usr\n|-- bin\n`-- lib\n");
    assert_eq!(narrow(&["//net/host/a"]), "//net/host/a\n");
}
#[test]
fn integration_mixed_absolute_and_relative() {
    assert_eq!(narrow(&["/a", "/b", "c"]), "/\n|   |-- a\n|   `-- b\n`-- c\n");
    assert_eq!(
        narrow(&["/a/x", "/a/y", "b"]),
        "/a\n|   |-- x\n|   `-- y\n`-- b\n"
    );
    assert_eq!(wide(&["/a", "/b", "c"]), "/-+-a\n  `-b\nc\n");
}
#[test]
fn integration_nested_levels() {
    let rendered = narrow(&["a/b/c", "a/b/d", "a/e", "f"]);
    assert_eq!(
        rendered,
        "|-- a\n|   |-- b\n|   |   |-- c\n|   |   `-- d\n|   `-- e\n`-- f\n"
    );
}
#[test]
fn integration_chain_keeps_one_level() {
    let rendered = narrow(&["a/b/c", "a/b/d", "x/y"]);
    assert_eq!(rendered, "|-- a/b\n|   |-- c\n|   `-- d\n`-- x/y\n");
}
#[test]
fn integration_unicode_glyphs() {
    let options = ArboBuilder::new().charset(Charset::Unicode).build();
    let tree = tree_of(&["a/b", "a/c", "d"], &options);
    assert_eq!(
        output::format_tree(&tree, &options),
        "├── a\n│   ├── b\n│   └── c\n└── d\n"
    );
}
#[test]
fn integration_wide_layout() {
    assert_eq!(wide(&["a/b/c", "a/b/d", "x/y"]), "a/b-+-c\n    `-d\nx/y\n");
    assert_eq!(
        wide(&["a/b/c", "a/b/d", "a/e"]),
        "a-+-b-+-c\n  |   `-d\n  `-e\n"
    );
    assert_eq!(wide(&["/a", "/b"]), "/-+-a\n  `-b\n");
}
#[test]
fn integration_wide_unicode() {
    let options = ArboBuilder::new()
        .style(Style::Wide)
        .charset(Charset::Unicode)
        .build();
    let tree = tree_of(&["a/b", "a/c", "a/d"], &options);
    assert_eq!(
        output::format_tree(&tree, &options),
        "a─┬─b\n  ├─c\n  └─d\n"
    );
}
#[test]
fn integration_collapsed_line_round_trips() {
    let rendered = narrow(&["src/main/java/App.java"]);
    let line = rendered.trim_end().trim_start_matches("`-- ");
    assert_eq!(split_path(line, '/'), split_path("src/main/java/App.java", '/'));
}
#[test]
fn integration_line_counts() {
    let branching = narrow(&["a/x", "a/y", "b/x", "b/y"]);
    assert_eq!(branching.lines().count(), 6);
    let collapsed = narrow(&["a/b/c", "a/b/d"]);
    assert_eq!(collapsed.lines().count(), 3);
}
#[test]
fn integration_unsorted_input_and_sort() {
    let lines = ["a", "a-b", "a/c"];
    let unsorted = tree_of(&lines, &ArboOptions::default());
    assert_eq!(unsorted.node(unsorted.root()).children().len(), 3);
    let options = ArboBuilder::new().sort(true).build();
    let sorted = tree_of(&lines, &options);
    assert_eq!(sorted.node(sorted.root()).children().len(), 2);
    assert_eq!(
        output::format_tree(&sorted, &options),
        "|-- a/c\n`-- a-b\n"
    );
}
#[test]
fn integration_strip_leading() {
    let options = ArboBuilder::new().strip_leading(true).build();
    let tree = tree_of(&[".", "./a", "./a/b", "./c"], &options);
    assert_eq!(output::format_tree(&tree, &options), "|-- a/b\n`-- c\n");
}
#[test]
fn integration_reads_null_terminated_input() {
    let options = ArboBuilder::new().zero_terminated(true).build();
    let input: &[u8] = b"a/b\0a/c d\0e";
    let tree = arbo(&options, input, None).unwrap();
    assert_eq!(
        output::format_tree(&tree, &options),
        "|-- a\n|   |-- b\n|   `-- c d\n`-- e\n"
    );
}
#[test]
fn integration_decorated_narrow() {
    let options = ArboBuilder::new().decorate(true).build();
    let decorator: &dyn Decorator = &bold_leaf;
    let input: &[u8] = b"a/b\na/c\n";
    let tree = arbo(&options, input, Some(decorator)).unwrap();
    assert_eq!(
        output::format_tree(&tree, &options),
        "`-- \x1b[1ma\x1b[0m\n    |-- \x1b[1mb\x1b[0m\n    `-- \x1b[1mc\x1b[0m\n"
    );
}
#[test]
fn integration_decorated_wide_ignores_escapes_in_width() {
    let options = ArboBuilder::new().decorate(true).style(Style::Wide).build();
    let decorator: &dyn Decorator = &bold_leaf;
    let input: &[u8] = b"ab/c\nab/d\n";
    let tree = arbo(&options, input, Some(decorator)).unwrap();
    assert_eq!(
        output::format_tree(&tree, &options),
        "\x1b[1mab\x1b[0m-+-\x1b[1mc\x1b[0m\n   `-\x1b[1md\x1b[0m\n"
    );
}
#[test]
fn integration_sentinels_are_not_decorated() {
    let seen = Mutex::new(Vec::new());
    let recorder = |paths: &[String]| -> Result<Vec<Decoration>, ArboError> {
        seen.lock().unwrap().extend(paths.iter().cloned());
        Ok(paths
            .iter()
            .map(|path| Decoration::plain(path.rsplit('/').next().unwrap_or(path)))
            .collect())
    };
    let options = ArboBuilder::new().decorate(true).build();
    let input: &[u8] = b"/usr/bin\n/usr/lib\n//net/x\n";
    let tree = arbo(&options, input, Some(&recorder as &dyn Decorator)).unwrap();
    let mut requested = seen.into_inner().unwrap();
    requested.sort();
    assert_eq!(requested, vec!["//net", "//net/x", "/usr", "/usr/bin", "/usr/lib"]);
    assert_eq!(
        Renderer::new(Style::Narrow, Charset::Ascii).render(&tree),
        "/usr\n|-- bin\n`-- lib\n//net/x\n"
    );
}
#[test]
fn integration_batch_size_does_not_change_output() {
    let input: &[u8] = b"a/b/c\na/b/d\na/e\nf/g\nh\n";
    let render = |batch_size: usize| {
        let options = ArboBuilder::new()
            .decorate(true)
            .batch_size(batch_size)
            .build();
        let decorator: &dyn Decorator = &bold_leaf;
        let tree = arbo(&options, input, Some(decorator)).unwrap();
        output::format_tree(&tree, &options)
    };
    assert_eq!(render(1), render(3));
    assert_eq!(render(1), render(256));
}
#[test]
fn integration_decoration_failure_aborts() {
    let failing = |_: &[String]| -> Result<Vec<Decoration>, ArboError> {
        Err(ArboError::Decoration("ls exited with exit status: 2".into()))
    };
    let short = |_: &[String]| -> Result<Vec<Decoration>, ArboError> { Ok(Vec::new()) };
    let options = ArboBuilder::new().decorate(true).build();
    let input: &[u8] = b"a\nb\n";
    assert!(matches!(
        arbo(&options, input, Some(&failing as &dyn Decorator)),
        Err(ArboError::Decoration(_))
    ));
    assert!(matches!(
        arbo(&options, input, Some(&short as &dyn Decorator)),
        Err(ArboError::Decoration(_))
    ));
}
#[test]
fn integration_json_output() {
    let options = ArboBuilder::new().format(OutputFormat::Json).build();
    let tree = tree_of(&["/a", "b/c", "b/d"], &options);
    assert_eq!(
        output::format_tree(&tree, &options),
        "[{\"name\":\"/\",\"children\":[{\"name\":\"a\"}]},{\"name\":\"b\",\"children\":[{\"name\":\"c\"},{\"name\":\"d\"}]}]\n"
    );
}
#[test]
fn integration_write_to_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tree.txt");
    let options = ArboOptions::default();
    let tree = tree_of(&["a/b", "a/c"], &options);
    output::write_tree_to_file(&tree, &options, &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "`-- a\n    |-- b\n    `-- c\n");
    let missing = dir.path().join("missing").join("tree.txt");
    assert!(matches!(
        output::write_tree_to_file(&tree, &options, &missing),
        Err(ArboError::Io { .. })
    ));
}
#[test]
fn integration_empty_input() {
    assert_eq!(narrow(&[]), "");
    assert_eq!(narrow(&["", "/"]), "/\n");
}
