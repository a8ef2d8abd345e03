//! End-to-end tests for `jsbindc gen` and `jsbindc check`.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn find_jsbindc() -> PathBuf {
    let mut path = std::env::current_exe()
        .expect("cannot find current exe")
        .parent()
        .expect("cannot find parent dir")
        .to_path_buf();
    // Walk up from deps dir to the debug dir.
    if path.ends_with("deps") {
        path.pop();
    }
    path.join("jsbindc")
}

fn write_manifest(dir: &Path, contents: &str) -> PathBuf {
    let file = dir.join("jsbind.toml");
    std::fs::write(&file, contents).unwrap();
    file
}

fn run(args: &[&str]) -> Output {
    Command::new(find_jsbindc())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run jsbindc")
}

const GEOMETRY: &str = r#"
[package]
name = "geometry"

[types]
Point = "struct { X, Y float64 }"

[[function]]
name = "Translate"
params = [{ name = "p", type = "Point" }, { name = "dx", type = "float32" }]

[[function]]
name = "Label"
params = [{ name = "text", type = "*string" }]
"#;

#[test]
fn gen_prints_every_function() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), GEOMETRY);

    let output = run(&["gen", manifest.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "jsbindc gen failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "// Translate\n\
         p := Point{}\n\
         p.X = args[0].Get(\"X\").Float()\n\
         p.Y = args[0].Get(\"Y\").Float()\n\
         Translate(p, float32(args[1].Float()))\n\
         \n\
         // Label\n\
         var text *string\n\
         if jsType := args[0].Type(); !(jsType == js.TypeUndefined || jsType == js.TypeNull) {\n\
         \ttext = new(string)\n\
         \t*text = args[0].String()\n\
         }\n\
         Label(text)\n"
    );
}

#[test]
fn gen_function_filter_and_options() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        &format!("{GEOMETRY}\n[options]\nargs = \"argv\"\n"),
    );

    let output = run(&["gen", manifest.to_str().unwrap(), "--function", "Label"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("// Label\n"), "got:\n{stdout}");
    assert!(stdout.contains("argv[0].Type()"), "got:\n{stdout}");
    assert!(!stdout.contains("Translate"));
}

#[test]
fn gen_unknown_function_fails() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), GEOMETRY);

    let output = run(&["gen", manifest.to_str().unwrap(), "--function", "Nope"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no function named 'Nope'"), "got:\n{stderr}");
}

#[test]
fn gen_json_emits_one_object_per_function() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), GEOMETRY);

    let output = run(&["gen", manifest.to_str().unwrap(), "--json"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let objects: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(objects.len(), 2);
    assert_eq!(objects[0]["function"], "Translate");
    assert_eq!(objects[1]["function"], "Label");
    assert!(objects[1]["go"].as_str().unwrap().ends_with("Label(text)"));
    assert!(objects[0]["binding"]["bindings"]["args"].is_array());
}

#[test]
fn failing_function_does_not_block_others() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        r#"
[package]
name = "partial"

[[function]]
name = "Broken"
params = [{ name = "cfg", type = "*Config" }]

[[function]]
name = "Fine"
params = [{ name = "n", type = "int" }]
"#,
    );

    let output = run(&["gen", manifest.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "// Fine\nFine(args[0].Int())\n");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(
            "error: function `Broken`: unresolved argument 0 \"cfg\" type *Config: \
             unresolved pointer element type Config: unresolved identifier `Config`"
        ),
        "got:\n{stderr}"
    );
    assert!(stderr.contains("1 of 2 function(s) failed"));
}

#[test]
fn bad_type_text_is_reported_with_location() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        r#"
[package]
name = "bad"

[types]
Lookup = "map[string]int"

[[function]]
name = "F"
params = [{ name = "l", type = "Lookup" }]
"#,
    );

    let output = run(&["gen", manifest.to_str().unwrap(), "--no-color"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[T0001]"), "got:\n{stderr}");
    assert!(stderr.contains("unrecognized native type: map type in type alias `Lookup`"));
    assert!(stderr.contains("1 invalid type expression(s)"));
}

#[test]
fn check_reports_success_without_code() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), GEOMETRY);

    let output = run(&["check", manifest.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Checked: geometry (2 function(s))"), "got:\n{stderr}");
}

#[test]
fn missing_manifest_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let output = run(&["check", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read"), "got:\n{stderr}");
}
