use elixir2txt::converter::naming::path_hash;
use elixir2txt::{convert_elixir_to_txt, LOG_FILE_NAME};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const SEPARATOR_LINE: &str =
    "================================================================================";

fn write_source(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, content).expect("write source");
}

fn log_entries(output_dir: &Path) -> Vec<String> {
    fs::read_to_string(output_dir.join(LOG_FILE_NAME))
        .expect("read log")
        .lines()
        .skip(5)
        .map(str::to_string)
        .collect()
}

fn txt_files(output_dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(output_dir)
        .expect("read output dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().to_string())
        .filter(|name| name != LOG_FILE_NAME)
        .collect();
    names.sort();
    names
}

fn body_of(output_file: &Path) -> String {
    let text = fs::read_to_string(output_file).expect("read output");
    let closing = format!("{}\n\n", SEPARATOR_LINE);
    let start = text.find(&closing).expect("header end") + closing.len();
    text[start..].to_string()
}

#[test]
fn single_file_is_copied_behind_header() {
    let tmp = tempdir().expect("tempdir");
    let source = tmp.path().join("project");
    let output = tmp.path().join("out");
    write_source(&source, "lib/foo.ex", "defmodule Foo do\nend\n");

    let report = convert_elixir_to_txt(&source, &output).expect("convert");

    assert_eq!(report.converted.len(), 1);
    assert_eq!(txt_files(&output), vec!["foo.ex.txt"]);
    assert_eq!(body_of(&output.join("foo.ex.txt")), "defmodule Foo do\nend\n");

    let header = fs::read_to_string(output.join("foo.ex.txt")).expect("read output");
    assert!(header.contains("Original filename: foo.ex\n"));
    assert!(header.contains(&format!(
        "Original path: {}\n",
        Path::new("lib").join("foo.ex").display()
    )));
    assert!(header.contains("Original extension: .ex\n"));

    assert_eq!(
        log_entries(&output),
        vec![format!(
            "SUCCESS: {} -> foo.ex.txt",
            source.join("lib").join("foo.ex").display()
        )]
    );
}

#[test]
fn colliding_names_get_path_hash_suffix() {
    let tmp = tempdir().expect("tempdir");
    let source = tmp.path().join("project");
    let output = tmp.path().join("out");
    write_source(&source, "a/util.ex", "# a\n");
    write_source(&source, "b/util.ex", "# b\n");

    convert_elixir_to_txt(&source, &output).expect("convert");

    let hashed = format!("util.ex_{}.txt", path_hash(&source.join("b").join("util.ex")));
    assert_eq!(txt_files(&output), {
        let mut expected = vec!["util.ex.txt".to_string(), hashed.clone()];
        expected.sort();
        expected
    });
    assert_eq!(body_of(&output.join("util.ex.txt")), "# a\n");
    assert_eq!(body_of(&output.join(&hashed)), "# b\n");

    let entries = log_entries(&output);
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|line| line.starts_with("SUCCESS: ")));
}

#[test]
fn unsafe_characters_are_replaced() {
    let tmp = tempdir().expect("tempdir");
    let source = tmp.path().join("project");
    let output = tmp.path().join("out");
    write_source(&source, "weird name!@#.exs", "IO.puts(:hi)\n");

    convert_elixir_to_txt(&source, &output).expect("convert");

    assert_eq!(txt_files(&output), vec!["weird_name___.exs.txt"]);
}

#[cfg(unix)]
#[test]
fn unreadable_file_is_logged_and_run_continues() {
    let tmp = tempdir().expect("tempdir");
    let source = tmp.path().join("project");
    let output = tmp.path().join("out");
    fs::create_dir_all(&source).expect("mkdir");
    std::os::unix::fs::symlink(source.join("missing_target.ex"), source.join("ghost.ex"))
        .expect("symlink");
    write_source(&source, "lib/real.ex", "real\n");

    let report = convert_elixir_to_txt(&source, &output).expect("convert");

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.converted.len(), 1);
    assert_eq!(txt_files(&output), vec!["real.ex.txt"]);

    let entries = log_entries(&output);
    assert_eq!(entries.len(), 2);
    let error_prefix = format!("ERROR converting {}: ", source.join("ghost.ex").display());
    assert!(entries[0].starts_with(&error_prefix), "{}", entries[0]);
    assert!(entries[1].starts_with("SUCCESS: "));
}

#[test]
fn deps_only_tree_produces_empty_log() {
    let tmp = tempdir().expect("tempdir");
    let source = tmp.path().join("project");
    let output = tmp.path().join("out");
    write_source(&source, "deps/sub/ignored.ex", "ignored\n");

    let report = convert_elixir_to_txt(&source, &output).expect("convert");

    assert_eq!(report.files_attempted(), 0);
    assert!(output.is_dir());
    assert!(txt_files(&output).is_empty());

    let log = fs::read_to_string(output.join(LOG_FILE_NAME)).expect("read log");
    assert!(log.starts_with("Elixir Files Conversion Log\n"));
    assert_eq!(log.lines().count(), 5);
}

#[test]
fn nested_deps_and_other_extensions_are_skipped() {
    let tmp = tempdir().expect("tempdir");
    let source = tmp.path().join("project");
    let output = tmp.path().join("out");
    write_source(&source, "mix.exs", "");
    write_source(&source, "apps/web/deps/plug/plug.ex", "");
    write_source(&source, "apps/web/lib/web.ex", "");
    write_source(&source, "lib/template.eex", "");
    write_source(&source, "lib/UPPER.EX", "");
    write_source(&source, "README.md", "");

    convert_elixir_to_txt(&source, &output).expect("convert");

    assert_eq!(txt_files(&output), vec!["mix.exs.txt", "web.ex.txt"]);
}

#[test]
fn rerun_into_same_directory_overwrites() {
    let tmp = tempdir().expect("tempdir");
    let source = tmp.path().join("project");
    let output = tmp.path().join("out");
    write_source(&source, "lib/foo.ex", "first\n");
    convert_elixir_to_txt(&source, &output).expect("first run");

    write_source(&source, "lib/foo.ex", "second\n");
    convert_elixir_to_txt(&source, &output).expect("second run");

    assert_eq!(txt_files(&output), vec!["foo.ex.txt"]);
    assert_eq!(body_of(&output.join("foo.ex.txt")), "second\n");
    assert_eq!(log_entries(&output).len(), 1);
}

#[test]
fn windows_line_endings_are_read_as_text() {
    let tmp = tempdir().expect("tempdir");
    let source = tmp.path().join("project");
    let output = tmp.path().join("out");
    write_source(&source, "a.ex", "x\r\ny\r\n");

    convert_elixir_to_txt(&source, &output).expect("convert");

    let bytes = fs::read(output.join("a.ex.txt")).expect("read output");
    assert!(bytes.ends_with(b"\n\nx\ny\n"));
    assert!(!bytes.contains(&b'\r'));
}
