//! End-to-end CLI tests exercising the driver binary against a handful
//! of representative programs, plus the exit-code and dump-toggle
//! contract, using `assert_cmd`/`predicates`/`tempfile`.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn jfmc() -> Command {
    Command::cargo_bin("jfmc").unwrap()
}

fn write_source(dir: &std::path::Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn identity_function_compiles_and_emits_expected_c() {
    let dir = tempdir().unwrap();
    let src = write_source(dir.path(), "id.jfm", "fn id(x: i32) -> i32 { return x; }");

    jfmc().arg(&src).assert().success();

    let out = src.with_extension("c");
    let c_text = fs::read_to_string(out).unwrap();
    assert!(c_text.split_whitespace().collect::<Vec<_>>().join(" ")
        .contains("int32_t id(int32_t x) { return x; }"));
}

#[test]
fn mutable_counter_loop_compiles() {
    let dir = tempdir().unwrap();
    let src = write_source(
        dir.path(),
        "sum.jfm",
        "fn sum() -> i32 { let mut total: i32 = 0; for i in 0..10 { total = total + i; } return total; }",
    );

    jfmc().arg(&src).assert().success();
    let c_text = fs::read_to_string(src.with_extension("c")).unwrap();
    let normalized = c_text.split_whitespace().collect::<Vec<_>>().join(" ");
    assert!(normalized.contains("for (int i = 0; i < 10; i++) { total = (total + i); }"));
}

#[test]
fn struct_and_method_compiles() {
    let dir = tempdir().unwrap();
    let src = write_source(
        dir.path(),
        "point.jfm",
        "struct Point { x: i32, y: i32 } \
         impl Point { fn sum(self: Point) -> i32 { return self.x + self.y; } } \
         fn main() -> i32 { let p: Point = Point { x: 3, y: 4 }; return p.sum(); }",
    );

    jfmc().arg(&src).assert().success();
    let c_text = fs::read_to_string(src.with_extension("c")).unwrap();
    assert!(c_text.contains("Point_sum(p)"));
    assert!(c_text.contains("(Point){.x = 3, .y = 4}"));
}

#[test]
fn immutability_violation_reports_diagnostic_and_emits_nothing() {
    let dir = tempdir().unwrap();
    let src = write_source(dir.path(), "bad.jfm", "fn main() { let x: i32 = 1; x = 2; }");

    jfmc()
        .arg(&src)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Cannot assign to immutable variable"));

    assert!(!src.with_extension("c").exists());
}

#[test]
fn break_outside_loop_reports_diagnostic() {
    let dir = tempdir().unwrap();
    let src = write_source(dir.path(), "brk.jfm", "fn main() { break; }");

    jfmc()
        .arg(&src)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Break statement outside loop"));
}

#[test]
fn builtin_println_specializes_format_for_i64() {
    let dir = tempdir().unwrap();
    let src = write_source(dir.path(), "p.jfm", "fn main() { let n: i64 = 42; println(n); }");

    jfmc().arg(&src).assert().success();
    let c_text = fs::read_to_string(src.with_extension("c")).unwrap();
    assert!(c_text.contains("printf(\"%lld\\n\", (long long)n)"));
}

#[test]
fn missing_source_file_is_a_driver_level_failure_not_a_diagnostic() {
    jfmc().arg("does-not-exist.jfm").assert().failure().code(2);
}

#[test]
fn check_mode_stops_before_emitting_c() {
    let dir = tempdir().unwrap();
    let src = write_source(dir.path(), "ok.jfm", "fn main() -> i32 { return 0; }");

    jfmc().arg(&src).arg("--check").assert().success();
    assert!(!src.with_extension("c").exists());
}

#[test]
fn check_mode_still_reports_diagnostics_and_fails() {
    let dir = tempdir().unwrap();
    let src = write_source(dir.path(), "bad_check.jfm", "fn main() { break; }");

    jfmc().arg(&src).arg("--check").assert().failure().code(1);
}

#[test]
fn custom_output_path_is_honored() {
    let dir = tempdir().unwrap();
    let src = write_source(dir.path(), "custom.jfm", "fn main() -> i32 { return 0; }");
    let out = dir.path().join("custom_out.c");

    jfmc().arg(&src).arg("-o").arg(&out).assert().success();
    assert!(out.exists());
}

#[test]
fn dash_dash_all_always_exits_zero_even_with_diagnostics() {
    let dir = tempdir().unwrap();
    let src = write_source(dir.path(), "broken.jfm", "fn main() { break; }");

    jfmc()
        .arg(&src)
        .arg("--all")
        .assert()
        .success()
        .stderr(predicate::str::contains("Break statement outside loop"));
}

#[test]
fn emit_exe_is_rejected_as_a_driver_level_failure() {
    let dir = tempdir().unwrap();
    let src = write_source(dir.path(), "exe.jfm", "fn main() -> i32 { return 0; }");

    jfmc()
        .arg(&src)
        .arg("--emit")
        .arg("exe")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("out of scope"));
}

#[test]
fn tokens_toggle_dumps_and_stops() {
    let dir = tempdir().unwrap();
    let src = write_source(dir.path(), "tok.jfm", "fn main() -> i32 { return 0; }");

    jfmc()
        .arg(&src)
        .arg("--tokens")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fn"));
    assert!(!src.with_extension("c").exists());
}
