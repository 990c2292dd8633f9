//! Colour styles keyed by token category.
//!
//! Entries are written in the style-string format documentation hosts
//! already understand (`"bold #005"`, `"bg:#eee #111"`), parsed once when the
//! style is built. Lookups walk the category hierarchy so `Comment.Multiline`
//! picks up whatever `Comment` defines unless it says `noinherit`.

use std::collections::BTreeMap;
use std::fmt;

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    character::complete::{char, multispace0, multispace1, satisfy},
    combinator::{all_consuming, map, map_opt, not, opt, value},
    multi::separated_list0,
    sequence::{delimited, preceded, terminated},
};
use nom_locate::LocatedSpan;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

use crate::token::TokenKind;

type Span<'a> = LocatedSpan<&'a str>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("Unrecognised style word {found:?} at column {column} of {rule:?}")]
    Syntax {
        rule: String,
        column: usize,
        found: String,
    },
    #[error("Invalid colour {0:?}")]
    Color(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Accepts `rgb` or `rrggbb`; short forms double every digit.
    fn from_hex(digits: &str) -> Option<Self> {
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            3 => {
                let mut doubled = digits.chars().map(|c| channel(&format!("{c}{c}")));
                Some(Self::new(doubled.next()??, doubled.next()??, doubled.next()??))
            }
            6 => Some(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = StyleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let parsed = all_consuming(hex_color)
            .parse(Span::new(&value))
            .ok()
            .map(|(_, color)| color);
        parsed.ok_or(StyleError::Color(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Font {
    Roman,
    Sans,
    Mono,
}

/// Resolved display attributes for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleAttributes {
    pub color: Option<Color>,
    pub bgcolor: Option<Color>,
    pub border: Option<Color>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub font: Option<Font>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive {
    Bold(bool),
    Italic(bool),
    Underline(bool),
    NoInherit,
    Font(Font),
    Background(Option<Color>),
    Border(Option<Color>),
    Color(Option<Color>),
}

/// A parsed style string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRule {
    directives: Vec<Directive>,
}

impl StyleRule {
    pub fn parse(rule: &str) -> Result<Self, StyleError> {
        let words = separated_list0(multispace1, directive);
        match all_consuming(delimited(multispace0, words, multispace0)).parse(Span::new(rule)) {
            Ok((_, directives)) => Ok(Self { directives }),
            Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(StyleError::Syntax {
                rule: rule.to_string(),
                column: e.input.get_utf8_column(),
                found: e
                    .input
                    .fragment()
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_string(),
            }),
            Err(nom::Err::Incomplete(_)) => Err(StyleError::Syntax {
                rule: rule.to_string(),
                column: rule.chars().count() + 1,
                found: String::new(),
            }),
        }
    }

    pub fn inherits(&self) -> bool {
        !self.directives.contains(&Directive::NoInherit)
    }

    fn apply(&self, attrs: &mut StyleAttributes) {
        for directive in &self.directives {
            match *directive {
                Directive::Bold(on) => attrs.bold = on,
                Directive::Italic(on) => attrs.italic = on,
                Directive::Underline(on) => attrs.underline = on,
                Directive::NoInherit => {}
                Directive::Font(font) => attrs.font = Some(font),
                Directive::Background(color) => attrs.bgcolor = color,
                Directive::Border(color) => attrs.border = color,
                Directive::Color(color) => attrs.color = color,
            }
        }
    }
}

fn hex_color(input: Span) -> IResult<Span, Color> {
    let is_hex = |c: char| c.is_ascii_hexdigit();
    map_opt(
        preceded(
            char('#'),
            alt((take_while_m_n(6, 6, is_hex), take_while_m_n(3, 3, is_hex))),
        ),
        |digits: Span| Color::from_hex(digits.fragment()),
    )
    .parse(input)
}

fn word_end(input: Span) -> IResult<Span, ()> {
    not(satisfy(|c: char| !c.is_whitespace())).parse(input)
}

fn directive(input: Span) -> IResult<Span, Directive> {
    terminated(
        alt((
            value(Directive::Bold(false), tag("nobold")),
            value(Directive::Bold(true), tag("bold")),
            value(Directive::Italic(false), tag("noitalic")),
            value(Directive::Italic(true), tag("italic")),
            value(Directive::Underline(false), tag("nounderline")),
            value(Directive::Underline(true), tag("underline")),
            value(Directive::NoInherit, tag("noinherit")),
            value(Directive::Font(Font::Roman), tag("roman")),
            value(Directive::Font(Font::Sans), tag("sans")),
            value(Directive::Font(Font::Mono), tag("mono")),
            map(preceded(tag("bg:"), opt(hex_color)), Directive::Background),
            map(preceded(tag("border:"), opt(hex_color)), Directive::Border),
            map(hex_color, |color| Directive::Color(Some(color))),
        )),
        word_end,
    )
    .parse(input)
}

#[derive(Debug, Clone)]
pub struct Style {
    name: SmolStr,
    base: StyleAttributes,
    rules: BTreeMap<TokenKind, StyleRule>,
}

impl Style {
    pub fn new(name: &str, default_style: &str, entries: &[(TokenKind, &str)]) -> Result<Self, StyleError> {
        let mut base = StyleAttributes::default();
        StyleRule::parse(default_style)?.apply(&mut base);
        let style = Self {
            name: SmolStr::new(name),
            base,
            rules: BTreeMap::new(),
        };
        style.with_overrides(entries.iter().copied())
    }

    /// Replaces the entries for the given categories.
    pub fn with_overrides<'s>(
        mut self,
        overrides: impl IntoIterator<Item = (TokenKind, &'s str)>,
    ) -> Result<Self, StyleError> {
        for (kind, rule) in overrides {
            self.rules.insert(kind, StyleRule::parse(rule)?);
        }
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_entry(&self, kind: TokenKind) -> bool {
        self.rules.contains_key(&kind)
    }

    pub fn style_for(&self, kind: TokenKind) -> StyleAttributes {
        let mut attrs = self.base.clone();
        for ancestor in kind.lineage() {
            if let Some(rule) = self.rules.get(&ancestor) {
                if !rule.inherits() {
                    attrs = self.base.clone();
                }
                rule.apply(&mut attrs);
            }
        }
        attrs
    }

    /// Every category's resolved attributes, keyed by dotted name.
    pub fn table(&self) -> BTreeMap<TokenKind, StyleAttributes> {
        TokenKind::ALL
            .into_iter()
            .map(|kind| (kind, self.style_for(kind)))
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.table())
    }
}
