
use std::path::Path;

use alba_lexer::{ExtensionConfig, KeywordSet, LexerRegistry, TokenKind, setup};
use pretty_assertions::assert_eq;
use test_utils::{create_source_file, init_logging};

fn registry() -> LexerRegistry {
    init_logging();
    let mut registry = LexerRegistry::new();
    setup(&mut registry, &ExtensionConfig::default()).expect("setup should succeed");
    registry
}

#[test]
fn setup_reports_version() {
    let mut registry = LexerRegistry::new();
    let metadata = setup(&mut registry, &ExtensionConfig::default()).unwrap();
    assert_eq!(metadata.version, "0.0.1");
}

#[test]
fn lexer_found_by_name_and_alias() {
    let registry = registry();
    for name in ["alba", "Alba", "ALBA"] {
        let lexer = registry.by_name(name).unwrap_or_else(|| panic!("no lexer for {name}"));
        assert_eq!(lexer.info().name, "alba");
    }
    assert!(registry.by_name("haskell").is_none());
}

#[test]
fn lexer_found_for_source_files() {
    let registry = registry();
    let (_dir, path) = create_source_file("main.al", "class Point where\n");
    let lexer = registry.for_path(&path).expect("*.al should map to alba");

    let source = std::fs::read_to_string(&path).unwrap();
    let first = lexer.tokens(&source).next().map(|t| t.kind);
    assert_eq!(first, Some(TokenKind::Keyword));

    assert!(registry.for_path(Path::new("lib/prelude.ali")).is_some());
    assert!(registry.for_path(Path::new("notes.alx")).is_none());
    assert!(registry.for_filename("al").is_none());
}

#[test]
fn lexer_found_for_mimetype() {
    let registry = registry();
    assert!(registry.for_mimetype("text/x-alba").is_some());
    assert!(registry.for_mimetype("text/plain").is_none());
}

#[test]
fn style_registered_alongside_lexer() {
    let registry = registry();
    let style = registry.style("alba").expect("style should be registered");
    assert!(style.style_for(TokenKind::CommentSingleline).italic);
    assert!(style.style_for(TokenKind::NameClass).bold);
}

#[test]
fn config_file_drives_setup() {
    let (_dir, path) = create_source_file(
        "alba.json",
        r##"{ "keywords": "legacy", "style_overrides": { "Name": "underline #123" } }"##,
    );
    let config = ExtensionConfig::from_path(&path).unwrap();
    assert_eq!(config.keywords, KeywordSet::Legacy);

    let mut registry = LexerRegistry::new();
    setup(&mut registry, &config).unwrap();

    let lexer = registry.by_name("alba").unwrap();
    let kinds: Vec<_> = lexer.tokens("if where").map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TokenKind::Name, TokenKind::Whitespace, TokenKind::Keyword]);

    let name = registry.style("alba").unwrap().style_for(TokenKind::Name);
    assert!(name.underline);
    assert_eq!(name.color.map(|c| c.to_string()), Some("#112233".to_string()));
}

#[test]
fn missing_config_file_is_an_error() {
    let (dir, _) = create_source_file("placeholder.al", "");
    let err = ExtensionConfig::from_path(dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn repeated_setup_registers_once() {
    let mut registry = registry();
    setup(&mut registry, &ExtensionConfig::default()).unwrap();
    setup(&mut registry, &ExtensionConfig::default()).unwrap();
    assert_eq!(registry.len(), 1);
    let names: Vec<_> = registry.names().iter().map(|n| n.to_string()).collect();
    assert_eq!(names, vec!["alba".to_string()]);
}
