//! Integration tests for the pixmatch binary.

use std::path::Path;
use std::process::Command;

use image::{DynamicImage, Rgba, RgbaImage};

fn pixmatch() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pixmatch"));
    cmd.env("RUST_LOG", "error");
    cmd
}

fn write_png(path: &Path, red_pixels: &[(u32, u32)]) {
    let mut image = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
    for &(x, y) in red_pixels {
        image.put_pixel(x, y, Rgba([255, 0, 0, 255]));
    }
    DynamicImage::ImageRgba8(image).save(path).unwrap();
}

#[test]
fn pair_prints_count_and_elapsed() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.png");
    let comp = dir.path().join("comp.png");
    write_png(&base, &[]);
    write_png(&comp, &[(1, 1), (6, 3), (7, 7)]);

    let output = pixmatch()
        .arg("pair")
        .arg(&base)
        .arg(&comp)
        .output()
        .expect("Failed to run pixmatch");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("3"));
    assert!(lines.next().unwrap_or_default().starts_with("Elapsed: "));
}

#[test]
fn bare_positionals_compare_a_pair() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.png");
    let comp = dir.path().join("comp.png");
    write_png(&base, &[(2, 5)]);
    write_png(&comp, &[(0, 0), (4, 4)]);

    let output = pixmatch()
        .args(["--repeat", "2"])
        .arg(&base)
        .arg(&comp)
        .output()
        .expect("Failed to run pixmatch");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().next(), Some("3"));
}

#[test]
fn bare_base_without_comp_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.png");
    write_png(&base, &[]);

    let output = pixmatch().arg(&base).output().expect("Failed to run pixmatch");

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn pair_missing_file_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.png");
    write_png(&base, &[]);

    let output = pixmatch()
        .arg("pair")
        .arg(&base)
        .arg(dir.path().join("nope.png"))
        .output()
        .expect("Failed to run pixmatch");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn batch_reports_each_pair() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.png");
    let b = dir.path().join("b.png");
    write_png(&a, &[]);
    write_png(&b, &[(0, 0)]);

    let json = format!(
        r#"{{"urls": [{{"baseURL": "{a}", "compURL": "{b}"}}, {{"baseURL": "{a}", "compURL": "{a}"}}, {{"baseURL": "{b}", "compURL": "{a}"}}]}}"#,
        a = a.display(),
        b = b.display()
    );
    let input = dir.path().join("urls.json");
    std::fs::write(&input, json).unwrap();

    let output = pixmatch()
        .args(["batch", "--max-pairs", "2", "--input"])
        .arg(&input)
        .output()
        .expect("Failed to run pixmatch");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let counts: Vec<&str> = stdout
        .lines()
        .filter(|l| l.contains(" -> "))
        .filter_map(|l| l.split('\t').next())
        .collect();
    assert_eq!(counts, vec!["1", "0"]);
    assert!(stdout.contains("Total Execution Time: "));
}

#[test]
fn batch_missing_input_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();

    let output = pixmatch()
        .args(["batch", "--input"])
        .arg(dir.path().join("urls.json"))
        .output()
        .expect("Failed to run pixmatch");

    assert_eq!(output.status.code(), Some(1));
}
