//! End-to-end CSS processing tests.
//!
//! Themes are loaded from JSON files the way the CLI loads them.

use std::io::Write;

use honey_style::{ProcessOptions, StyleConfig, Theme, process_css, resolve_class_name};
use tempfile::NamedTempFile;

const THEME_JSON: &str = r##"{
    "breakpoints": { "xs": 480, "sm": 768, "md": 992 },
    "spacings": { "base": 8, "small": 0.5 },
    "colors": { "primary": { "main": "#336699" } },
    "dimensions": { "header": "64px" }
}"##;

fn load_theme() -> Theme {
    let mut file = NamedTempFile::new().expect("Failed to create theme file");
    file.write_all(THEME_JSON.as_bytes())
        .expect("Failed to write theme file");
    Theme::load(file.path()).expect("Failed to load theme")
}

fn process(theme: &Theme, raw: &str) -> String {
    let options = ProcessOptions::new(Some(theme)).with_config(StyleConfig::production());
    process_css(raw, Some(".card"), &options)
}

// ============================================================================
// Theme Loading Tests
// ============================================================================

#[test]
fn test_theme_file_loads() {
    let theme = load_theme();
    assert_eq!(theme.spacings.base, 8.0);
    assert_eq!(theme.breakpoint("sm"), Some(768));
    assert_eq!(theme.resolve_color("primary.main", Some(0.5)).unwrap(), "#33669980");
    assert_eq!(theme.resolve_dimension("header").unwrap(), "64px");
}

#[test]
fn test_theme_without_spacing_base_is_rejected() {
    assert!(Theme::from_json(r#"{ "spacings": {} }"#).is_err());
}

// ============================================================================
// Processing Tests
// ============================================================================

#[test]
fn test_component_stylesheet() {
    let theme = load_theme();
    let raw = "
        padding: 2 1;
        // line comments are dropped
        @honey-stack(1);
        &:hover { color: red; }
        @honey-media(sm) {
            padding: 4;
        }
    ";
    assert_eq!(
        process(&theme, raw),
        ".card{padding:16px 8px;}\
         .card{display:flex;flex-direction:column;gap:8px;}\
         .card:hover{color:red;}\
         @media screen and (min-width: 768px){.card{padding:32px;}}"
    );
}

#[test]
fn test_unscoped_global_css() {
    let theme = load_theme();
    let options = ProcessOptions::new(Some(&theme));
    assert_eq!(
        process_css("body { margin: 0; } a { @honey-ellipsis; }", None, &options),
        "body{margin:0px;}a{white-space:nowrap;overflow:hidden;text-overflow:ellipsis;}"
    );
}

#[test]
fn test_without_theme_spacing_collapses() {
    let options = ProcessOptions::default();
    assert_eq!(
        process_css("margin: 2; width: 2px;", Some(".a"), &options),
        ".a{margin:0px;width:2px;}"
    );
}

#[test]
fn test_class_name_is_stable() {
    let raw = "color: red;";
    assert_eq!(resolve_class_name(raw), resolve_class_name(raw));
    assert_ne!(resolve_class_name(raw), resolve_class_name("color: blue;"));
    assert!(resolve_class_name(raw).starts_with("hs-"));
}
