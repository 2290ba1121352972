use std::path::PathBuf;
use std::process::Command;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_posterkit")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "posterkit.exe"
            } else {
                "posterkit"
            });
            p
        })
}

fn out_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("cli_smoke").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn cli_poster_writes_png() {
    let dir = out_dir("poster");
    let config = dir.join("poster.json");
    std::fs::write(&config, r#"{"variant": "wave", "width": 400, "height": 600}"#).unwrap();
    let out = dir.join("wave.png");
    let _ = std::fs::remove_file(&out);

    let output = Command::new(exe())
        .args(["poster", "--seed", "5", "--config"])
        .arg(&config)
        .arg("--out")
        .arg(&out)
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Saved:"));
    assert!(stdout.contains("(400x600)"));
    assert!(out.exists());
}

#[test]
fn cli_report_writes_both_samples() {
    let dir = out_dir("reports");
    let output = Command::new(exe())
        .args(["report", "--out-dir"])
        .arg(&dir)
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Generated:").count(), 2);
    assert!(dir.join("report_01.pdf").exists());
    assert!(dir.join("report_02.pdf").exists());
}

#[test]
fn cli_emoji_writes_gif() {
    let dir = out_dir("emoji");
    let out = dir.join("done.gif");
    let status = Command::new(exe())
        .args(["-v", "emoji", "--out"])
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());
    assert!(out.exists());
}

#[test]
fn cli_rejects_tiny_posters() {
    let dir = out_dir("tiny");
    let output = Command::new(exe())
        .args(["poster", "--width", "100", "--height", "100", "--out"])
        .arg(dir.join("tiny.png"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("at least"));
}
