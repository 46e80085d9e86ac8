mod common;

use std::process::Command;

use common::{temp_dir, templates};

fn codegen() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lcd_codegen"))
}

#[test]
fn test_generate_controller() {
    let dir = temp_dir("cli_generate");
    let out = dir.join("out");
    let status = codegen()
        .arg("-t")
        .arg(templates(&dir))
        .arg("-o")
        .arg(&out)
        .args(["-c", "ssd1306"])
        .status()
        .unwrap();
    assert!(status.success());
    assert!(out.join("ssd1306").join("lcd_ssd1306.h").is_file());
    assert!(!out.join("st7735").exists());
}

#[test]
fn test_unknown_controller() {
    let dir = temp_dir("cli_unknown");
    let output = codegen()
        .arg("-t")
        .arg(templates(&dir))
        .arg("-o")
        .arg(dir.join("out"))
        .args(["-c", "nope"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown controller 'nope'"));
}

#[test]
fn test_help() {
    let output = codegen().arg("--help").output().unwrap();
    assert_eq!(output.status.code(), Some(0));
}
