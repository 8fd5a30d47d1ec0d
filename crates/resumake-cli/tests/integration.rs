//! Integration tests for the resumake CLI
//!
//! These drive the command functions end to end on files in a temporary
//! directory: init -> apply -> preview -> export.

use std::fs;
use std::path::Path;

use resumake_cli::{apply_command, export_command, init_command, preview_command};
use resumake_core::ExportMode;
use resumake_model::{Locale, Resume};
use tempfile::TempDir;

const JANE_ACTIONS: &str = r#"[
    {"action":"editPersonal","field":"name","value":"Jane Doe"},
    {"action":"editPersonal","field":"phone","value":"555-0100"},
    {"action":"editPersonal","field":"email","value":"jane@x.com"},
    {"action":"editPersonal","field":"city","value":"Springfield"},
    {"action":"editPersonal","field":"position","value":"Engineer"},
    {"action":"editEducation","index":0,"field":"school","value":"State University"},
    {"action":"setDegree","index":0,"degree":"bachelor"},
    {"action":"setSkills","html":"<ul><li><p>Rust</p></li><li><p>Typst</p></li></ul>"}
]"#;

fn read_resume(path: &Path) -> Resume {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn jane_resume(dir: &TempDir) -> std::path::PathBuf {
    let resume = dir.path().join("resume.json");
    let actions = dir.path().join("actions.json");
    init_command(&resume, Locale::En, false).unwrap();
    fs::write(&actions, JANE_ACTIONS).unwrap();
    apply_command(&resume, &actions, None).unwrap();
    resume
}

#[test]
fn test_init_writes_blank_resume() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.json");

    init_command(&path, Locale::En, false).unwrap();

    let resume = read_resume(&path);
    assert_eq!(resume, Resume::new());
    let json = fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"personalInfo\""));
    assert!(json.contains("\"workExperience\""));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.json");
    fs::write(&path, "{}").unwrap();

    assert!(init_command(&path, Locale::En, false).is_err());
    init_command(&path, Locale::En, true).unwrap();
    assert_eq!(read_resume(&path), Resume::new());
}

#[test]
fn test_init_locale_carries_to_later_commands() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.json");
    let actions = dir.path().join("actions.json");

    init_command(&path, Locale::ZhCn, false).unwrap();
    let config = fs::read_to_string(dir.path().join("resumake.toml")).unwrap();
    assert!(config.contains("locale = \"zh-cn\""));

    fs::write(&actions, JANE_ACTIONS).unwrap();
    apply_command(&path, &actions, None).unwrap();

    let out = dir.path().join("zh.html");
    preview_command(&path, Some(&out), true, None).unwrap();
    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("<html lang=\"zh\">"));
    assert!(html.contains("教育经历"));
    assert!(html.contains("本科"));

    export_command(&path, None, Some(ExportMode::Structured), None).unwrap();
    assert!(dir.path().join("我的简历.pdf").exists());
}

#[test]
fn test_init_keeps_existing_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.json");
    let config = dir.path().join("resumake.toml");
    fs::write(&config, "locale = \"zh-cn\"\n").unwrap();

    init_command(&path, Locale::En, false).unwrap();
    assert_eq!(fs::read_to_string(&config).unwrap(), "locale = \"zh-cn\"\n");
}

#[test]
fn test_apply_actions() {
    let dir = TempDir::new().unwrap();
    let path = jane_resume(&dir);

    let resume = read_resume(&path);
    assert_eq!(resume.personal_info.name, "Jane Doe");
    assert_eq!(resume.education[0].school, "State University");
    assert_eq!(
        resume.skills_html(),
        "<ul><li><p>Rust</p></li><li><p>Typst</p></li></ul>"
    );
}

#[test]
fn test_apply_rejects_bad_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.json");
    let actions = dir.path().join("actions.json");
    init_command(&path, Locale::En, false).unwrap();
    fs::write(&actions, r#"[{"action":"explode"}]"#).unwrap();

    assert!(apply_command(&path, &actions, None).is_err());
    // The résumé is untouched
    assert_eq!(read_resume(&path), Resume::new());
}

#[test]
fn test_preview_with_and_without_controls() {
    let dir = TempDir::new().unwrap();
    let path = jane_resume(&dir);

    preview_command(&path, None, false, None).unwrap();
    let html = fs::read_to_string(dir.path().join("resume.html")).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Jane Doe"));
    assert!(html.contains("action-buttons"));

    let out = dir.path().join("clean.html");
    preview_command(&path, Some(&out), true, None).unwrap();
    let html = fs::read_to_string(&out).unwrap();
    assert!(!html.contains("action-buttons"));
    assert!(html.contains("<li><p>Rust</p></li>"));
}

#[test]
fn test_preview_uses_config_locale() {
    let dir = TempDir::new().unwrap();
    let path = jane_resume(&dir);
    let config = dir.path().join("resumake.toml");
    fs::write(&config, "locale = \"zh-cn\"\n[style]\ntheme_color = \"#FF0000\"\n").unwrap();

    let out = dir.path().join("zh.html");
    preview_command(&path, Some(&out), true, Some(&config)).unwrap();
    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("教育经历"));
    assert!(html.contains("本科"));
    assert!(html.contains("#ff0000"));
}

#[test]
fn test_export_structured() {
    let dir = TempDir::new().unwrap();
    let path = jane_resume(&dir);
    let out = dir.path().join("jane.pdf");

    export_command(&path, Some(&out), Some(ExportMode::Structured), None).unwrap();

    let pdf = fs::read(&out).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn test_export_raster_default_filename() {
    let dir = TempDir::new().unwrap();
    let path = jane_resume(&dir);

    export_command(&path, None, Some(ExportMode::Raster), None).unwrap();

    let pdf = fs::read(dir.path().join("resume.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn test_export_missing_config() {
    let dir = TempDir::new().unwrap();
    let path = jane_resume(&dir);
    let missing = dir.path().join("nope.toml");

    let err = export_command(&path, None, None, Some(&missing)).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}

#[test]
fn test_missing_resume_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(preview_command(&missing, None, false, None).is_err());
}
