use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use predicates::prelude::*;

fn linecat(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("linecat").unwrap();
    cmd.current_dir(dir);
    cmd
}

fn fixture(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for (name, contents) in files {
        let child = temp.child(name);
        fs::create_dir_all(child.path().parent().unwrap()).unwrap();
        child.write_str(contents).unwrap();
    }
    temp
}

fn output_of(temp: &TempDir) -> String {
    fs::read_to_string(temp.path().join("out.txt")).unwrap()
}

#[test]
fn requires_output_and_inputs() {
    let temp = TempDir::new().unwrap();
    linecat(temp.path()).args(["a.txt"]).assert().code(2);
    linecat(temp.path()).args(["-o", "out.txt"]).assert().code(2);
}

#[test]
fn concatenates_files_with_headers() {
    let temp = fixture(&[("a.txt", "one\ntwo\n"), ("b.txt", "three")]);
    linecat(temp.path()).args(["-o", "out.txt", "a.txt", "b.txt"]).assert().success();
    assert_eq!(output_of(&temp), "--==FILE==-- a.txt\none\ntwo\n--==FILE==-- b.txt\nthree\n");
}

#[test]
fn unique_removes_later_duplicates() {
    let temp = fixture(&[("a.txt", "L1\nL2\n"), ("b.txt", "L2\n")]);
    linecat(temp.path()).args(["-u", "-o", "out.txt", "a.txt", "b.txt"]).assert().success();
    assert_eq!(output_of(&temp), "--==FILE==-- a.txt\nL1\nL2\n--==FILE==-- b.txt\n");
}

#[test]
fn line_filter_keeps_only_matching_lines() {
    let temp = fixture(&[("a.txt", "ok\nERROR x\nok\n")]);
    linecat(temp.path()).args(["-f", "ERROR", "-o", "out.txt", "a.txt"]).assert().success();
    assert_eq!(output_of(&temp), "--==FILE==-- a.txt\nERROR x\n");
}

#[test]
fn file_filter_drops_whole_sources() {
    let temp = fixture(&[("a.log", "from log\n"), ("b.txt", "from txt\n")]);
    linecat(temp.path()).args(["-F", r"\.log$", "-o", "out.txt", "a.log", "b.txt"]).assert().success();
    assert_eq!(output_of(&temp), "--==FILE==-- a.log\nfrom log\n");
}

#[test]
fn numbering_counts_headers_and_follows_skip_empty() {
    let temp = TempDir::new().unwrap();
    linecat(temp.path())
        .args(["-n", "-s", "-o", "out.txt", "-"])
        .write_stdin("\nx\n   \ny\n")
        .assert()
        .success();
    assert_eq!(output_of(&temp), "     1\t--==FILE==-- stdin\n     2\tx\n     3\ty\n");
}

#[test]
fn custom_separator() {
    let temp = fixture(&[("a.txt", "a\n")]);
    linecat(temp.path()).args(["-S", "#####", "-o", "out.txt", "a.txt"]).assert().success();
    assert_eq!(output_of(&temp), "##### a.txt\na\n");
}

#[test]
fn directories_expand_to_their_files() {
    let temp = fixture(&[("logs/b.txt", "b\n"), ("logs/a.txt", "a\n"), ("logs/old/c.txt", "c\n")]);
    linecat(temp.path()).args(["-o", "out.txt", "logs"]).assert().success();
    let flat = output_of(&temp);
    assert!(flat.contains("a\n") && flat.contains("b\n") && !flat.contains("c\n"), "{flat}");

    linecat(temp.path()).args(["-r", "-o", "out.txt", "logs"]).assert().success();
    let deep = output_of(&temp);
    assert_eq!(deep.matches("--==FILE==--").count(), 3, "{deep}");
    assert!(deep.contains("c\n"));
}

#[test]
fn a_missing_file_is_a_warning_not_a_failure() {
    let temp = fixture(&[("a.txt", "a\n"), ("b.txt", "b\n")]);
    linecat(temp.path())
        .args(["-o", "out.txt", "a.txt", "missing.txt", "b.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("linecat: warn: skipping missing.txt"));
    assert_eq!(output_of(&temp), "--==FILE==-- a.txt\na\n--==FILE==-- b.txt\nb\n");
}

#[test]
fn failure_classes_have_distinct_exit_codes() {
    let temp = fixture(&[("a.txt", "a\n")]);
    linecat(temp.path())
        .args(["-f", "(", "-o", "out.txt", "a.txt"])
        .assert()
        .code(3)
        .stderr(predicate::str::starts_with("linecat: error: invalid --filter pattern"));
    linecat(temp.path()).args(["-F", "nomatch", "-o", "out.txt", "a.txt"]).assert().code(4);
    linecat(temp.path()).args(["-o", "out.txt", "gone.txt"]).assert().code(5);
    assert!(!temp.path().join("out.txt").exists());
}

#[test]
fn overwriting_keeps_a_backup_and_append_does_not() {
    let temp = fixture(&[("a.txt", "a\n"), ("out.txt", "previous\n")]);
    linecat(temp.path()).args(["-o", "out.txt", "a.txt"]).assert().success();
    assert_eq!(output_of(&temp), "--==FILE==-- a.txt\na\n");
    let backups: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("out.txt.bak."))
        .collect();
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(temp.path().join(&backups[0])).unwrap(), "previous\n");

    linecat(temp.path()).args(["-a", "-o", "out.txt", "-"]).write_stdin("more\n").assert().success();
    assert_eq!(output_of(&temp), "--==FILE==-- a.txt\na\n--==FILE==-- stdin\nmore\n");
}

#[test]
fn verbose_reports_progress_on_stderr() {
    let temp = fixture(&[("a.txt", "a\nb\n")]);
    linecat(temp.path())
        .args(["-v", "-f", "a", "-o", "out.txt", "a.txt"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("read a.txt: kept 1 of 2 line(s)"))
        .stderr(predicate::str::contains("1 source(s) read, 0 skipped, 2 line(s) written"));
}

#[test]
fn byte_order_marks_are_kept_unless_decoding_is_asked_for() {
    let temp = TempDir::new().unwrap();
    temp.child("bom.txt").write_binary(b"\xEF\xBB\xBFfirst\n").unwrap();
    linecat(temp.path()).args(["-o", "out.txt", "bom.txt"]).assert().success();
    assert_eq!(fs::read(temp.path().join("out.txt")).unwrap(), b"--==FILE==-- bom.txt\n\xEF\xBB\xBFfirst\n");

    linecat(temp.path()).args(["-a", "-B", "-o", "out.txt", "bom.txt"]).assert().success();
    assert!(output_of(&temp).ends_with("--==FILE==-- bom.txt\nfirst\n"));
}
