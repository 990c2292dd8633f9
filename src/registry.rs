use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use glob::Pattern;
use log::{debug, warn};
use smol_str::SmolStr;

use crate::lexer::Lexer;
use crate::style::Style;

#[derive(Debug)]
struct Entry {
    lexer: Arc<dyn Lexer>,
    filenames: Vec<Pattern>,
}

/// Lexers and styles known to one host. Populated by explicit calls at
/// startup; nothing registers itself.
#[derive(Debug, Default)]
pub struct LexerRegistry {
    entries: Vec<Entry>,
    names: HashMap<SmolStr, usize>,
    styles: HashMap<SmolStr, Arc<Style>>,
}

fn key(name: &str) -> SmolStr {
    SmolStr::new(name.to_lowercase())
}

impl LexerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` and keeps the existing lexer when one with the same
    /// name is already registered.
    pub fn register(&mut self, lexer: Arc<dyn Lexer>) -> bool {
        let info = lexer.info();
        if self.names.contains_key(&key(&info.name)) {
            debug!("Lexer `{}` already registered", info.name);
            return false;
        }

        let filenames = info
            .filenames
            .iter()
            .filter_map(|glob| match Pattern::new(glob) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!("Ignoring filename pattern `{}` of `{}`: {}", glob, info.name, e);
                    None
                }
            })
            .collect();

        let index = self.entries.len();
        for alias in std::iter::once(&info.name).chain(&info.aliases) {
            match self.names.get(&key(alias)) {
                // Aliases differing from the name only in case.
                Some(&owner) if owner == index => {}
                Some(&owner) => warn!(
                    "Alias `{}` of `{}` already points at `{}`",
                    alias,
                    info.name,
                    self.entries
                        .get(owner)
                        .map_or("?", |entry| entry.lexer.info().name.as_str())
                ),
                None => {
                    self.names.insert(key(alias), index);
                }
            }
        }

        debug!("Registered lexer `{}`", info.name);
        self.entries.push(Entry { lexer: Arc::clone(&lexer), filenames });
        true
    }

    /// Same contract as `register`.
    pub fn register_style(&mut self, style: Style) -> bool {
        let name = key(style.name());
        if self.styles.contains_key(&name) {
            debug!("Style `{}` already registered", name);
            return false;
        }
        debug!("Registered style `{}`", name);
        self.styles.insert(name, Arc::new(style));
        true
    }

    /// Looks a lexer up by name or alias, ignoring case.
    pub fn by_name(&self, name: &str) -> Option<Arc<dyn Lexer>> {
        self.names
            .get(&key(name))
            .map(|&index| Arc::clone(&self.entries[index].lexer))
    }

    pub fn for_filename(&self, filename: &str) -> Option<Arc<dyn Lexer>> {
        self.entries
            .iter()
            .find(|entry| entry.filenames.iter().any(|p| p.matches(filename)))
            .map(|entry| Arc::clone(&entry.lexer))
    }

    pub fn for_path(&self, path: &Path) -> Option<Arc<dyn Lexer>> {
        let filename = path.file_name()?.to_str()?;
        self.for_filename(filename)
    }

    pub fn for_mimetype(&self, mimetype: &str) -> Option<Arc<dyn Lexer>> {
        self.entries
            .iter()
            .find(|entry| entry.lexer.info().mimetypes.iter().any(|m| m == mimetype))
            .map(|entry| Arc::clone(&entry.lexer))
    }

    pub fn style(&self, name: &str) -> Option<Arc<Style>> {
        self.styles.get(&key(name)).cloned()
    }

    pub fn names(&self) -> Vec<SmolStr> {
        self.entries
            .iter()
            .map(|entry| entry.lexer.info().name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{LexerDefinition, LexerInfo, RegexLexer, RuleDef, StateDef, Transition};
    use crate::token::TokenKind;
    use pretty_assertions::assert_eq;

    fn plain(info: LexerInfo) -> Arc<dyn Lexer> {
        Arc::new(
            RegexLexer::new(LexerDefinition {
                info,
                states: vec![StateDef {
                    name: "root",
                    rules: vec![RuleDef::new(r"(?s).", TokenKind::Text, Transition::None)],
                }],
            })
            .unwrap(),
        )
    }

    #[test]
    fn registering_twice_keeps_the_first() {
        let mut registry = LexerRegistry::new();
        assert!(registry.register(plain(LexerInfo::new("txt").with_mimetypes(&["text/plain"]))));
        assert!(!registry.register(plain(LexerInfo::new("TXT").with_mimetypes(&["text/other"]))));
        assert_eq!(registry.len(), 1);
        assert!(registry.for_mimetype("text/other").is_none());
    }

    #[test]
    fn conflicting_alias_stays_with_first_owner() {
        let mut registry = LexerRegistry::new();
        registry.register(plain(LexerInfo::new("one").with_aliases(&["shared"])));
        registry.register(plain(LexerInfo::new("two").with_aliases(&["shared"])));

        let owner = registry.by_name("Shared").unwrap();
        assert_eq!(owner.info().name, "one");
        assert_eq!(registry.by_name("two").unwrap().info().name, "two");
        assert_eq!(registry.names(), vec![SmolStr::new("one"), SmolStr::new("two")]);
    }

    #[test]
    fn alias_differing_only_in_case_with_logging_on() {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Trace)
            .try_init();

        let mut registry = LexerRegistry::new();
        assert!(registry.register(plain(LexerInfo::new("alba").with_aliases(&["Alba", "ALBA"]))));
        assert!(registry.register(plain(LexerInfo::new("other").with_aliases(&["alba"]))));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.by_name("Alba").unwrap().info().name, "alba");
        assert_eq!(registry.by_name("other").unwrap().info().name, "other");
    }

    #[test]
    fn malformed_globs_are_skipped() {
        let mut registry = LexerRegistry::new();
        registry.register(plain(LexerInfo::new("odd").with_filenames(&["[*.x", "*.y"])));
        assert!(registry.for_filename("a.y").is_some());
        assert!(registry.for_filename("a.x").is_none());
    }
}
