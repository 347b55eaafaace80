//! Syntax highlighting using syntect
//!
//! Produces per-line highlight spans for a whole document. Spans store a
//! highlight category rather than a color, so switching themes does not
//! require re-parsing.

use once_cell::sync::Lazy;
use ratatui::style::Color;
use std::ops::Range;
use syntect::parsing::{
    ParseState, ParsingError, ScopeStack, ScopeStackOp, SyntaxReference, SyntaxSet,
};

use crate::model::document::Language;
use crate::view::theme::Theme;

/// Default syntaxes, loaded once per process
static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

/// Highlight category for syntax elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightCategory {
    Attribute,
    Comment,
    Constant,
    Function,
    Keyword,
    Number,
    Operator,
    Property,
    String,
    Type,
    Variable,
}

impl HighlightCategory {
    /// Get the color for this category from the theme
    pub fn color(&self, theme: &Theme) -> Color {
        match self {
            Self::Attribute => theme.syntax_constant,
            Self::Comment => theme.syntax_comment,
            Self::Constant => theme.syntax_constant,
            Self::Function => theme.syntax_function,
            Self::Keyword => theme.syntax_keyword,
            Self::Number => theme.syntax_constant,
            Self::Operator => theme.syntax_operator,
            Self::Property => theme.syntax_variable,
            Self::String => theme.syntax_string,
            Self::Type => theme.syntax_type,
            Self::Variable => theme.syntax_variable,
        }
    }
}

/// A highlighted span within one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpan {
    /// Byte range relative to the start of the line
    pub range: Range<usize>,
    pub category: HighlightCategory,
}

/// Map TextMate scope to highlight category
fn scope_to_category(scope: &str) -> Option<HighlightCategory> {
    let scope_lower = scope.to_lowercase();

    // Comments - highest priority
    if scope_lower.starts_with("comment") {
        return Some(HighlightCategory::Comment);
    }

    if scope_lower.starts_with("string") {
        return Some(HighlightCategory::String);
    }

    // Keywords (but not keyword.operator)
    if scope_lower.starts_with("keyword") && !scope_lower.starts_with("keyword.operator") {
        return Some(HighlightCategory::Keyword);
    }

    if scope_lower.starts_with("keyword.operator") || scope_lower.starts_with("punctuation") {
        return Some(HighlightCategory::Operator);
    }

    if scope_lower.starts_with("entity.name.function")
        || scope_lower.starts_with("support.function")
        || scope_lower.starts_with("meta.function-call")
        || scope_lower.starts_with("variable.function")
    {
        return Some(HighlightCategory::Function);
    }

    if scope_lower.starts_with("entity.name.type")
        || scope_lower.starts_with("entity.name.class")
        || scope_lower.starts_with("support.type")
        || scope_lower.starts_with("support.class")
        || scope_lower.starts_with("storage.type")
    {
        return Some(HighlightCategory::Type);
    }

    if scope_lower.starts_with("storage.modifier") {
        return Some(HighlightCategory::Keyword);
    }

    if scope_lower.starts_with("constant.numeric")
        || scope_lower.starts_with("constant.language.boolean")
    {
        return Some(HighlightCategory::Number);
    }
    if scope_lower.starts_with("constant") {
        return Some(HighlightCategory::Constant);
    }

    if scope_lower.starts_with("variable") {
        return Some(HighlightCategory::Variable);
    }

    if scope_lower.starts_with("entity.name.tag")
        || scope_lower.starts_with("support.other.property")
        || scope_lower.starts_with("meta.object-literal.key")
    {
        return Some(HighlightCategory::Property);
    }

    if scope_lower.starts_with("entity.other.attribute")
        || scope_lower.starts_with("meta.attribute")
    {
        return Some(HighlightCategory::Attribute);
    }

    None
}

/// Syntax highlighter for one document
pub struct SyntectHighlighter {
    syntax: &'static SyntaxReference,
    cache: Option<HighlightCache>,
}

#[derive(Debug, Clone)]
struct HighlightCache {
    content: String,
    lines: Vec<Vec<CategorySpan>>,
}

impl SyntectHighlighter {
    /// Create a new highlighter for the given file extension
    pub fn for_extension(ext: &str) -> Option<Self> {
        let syntax = SYNTAX_SET.find_syntax_by_extension(ext)?;
        Some(Self {
            syntax,
            cache: None,
        })
    }

    /// Create a highlighter for a language, trying its grammar extensions in
    /// order. Returns `None` for plain text or when no grammar is available.
    pub fn for_language(language: Language) -> Option<Self> {
        let highlighter = language
            .grammar_extensions()
            .iter()
            .find_map(|ext| Self::for_extension(ext));

        if highlighter.is_none() && language != Language::PlainText {
            tracing::debug!(%language, "no grammar available, rendering as plain text");
        }
        highlighter
    }

    /// Get the syntax name
    pub fn syntax_name(&self) -> &str {
        &self.syntax.name
    }

    /// Highlight every line of `content` (split on `\n`).
    ///
    /// The result is cached until the content changes.
    pub fn highlight_lines(&mut self, content: &str) -> &[Vec<CategorySpan>] {
        let stale = self
            .cache
            .as_ref()
            .map_or(true, |cache| cache.content != content);

        if stale {
            let lines = self.parse_lines(content);
            self.cache = Some(HighlightCache {
                content: content.to_string(),
                lines,
            });
        }

        self.cache
            .as_ref()
            .map(|cache| cache.lines.as_slice())
            .unwrap_or_default()
    }

    fn parse_lines(&self, content: &str) -> Vec<Vec<CategorySpan>> {
        let mut state = ParseState::new(self.syntax);
        let mut scopes = ScopeStack::new();

        content
            .split('\n')
            .map(|line| {
                let parsed = state.parse_line(&format!("{line}\n"), &SYNTAX_SET);
                Self::line_spans(parsed, line.len(), &mut scopes)
            })
            .collect()
    }

    /// Spans for one parsed line, advancing `scopes` past it.
    ///
    /// A line syntect fails to parse is left unstyled.
    fn line_spans(
        parsed: Result<Vec<(usize, ScopeStackOp)>, ParsingError>,
        line_len: usize,
        scopes: &mut ScopeStack,
    ) -> Vec<CategorySpan> {
        let mut spans = Vec::new();
        let ops = match parsed {
            Ok(ops) => ops,
            Err(e) => {
                tracing::debug!("syntax parse error, line left unstyled: {e}");
                return spans;
            }
        };

        let mut syntect_offset = 0;
        for (op_offset, op) in ops {
            let clamped_offset = op_offset.min(line_len);
            if clamped_offset > syntect_offset {
                if let Some(category) = Self::scope_stack_to_category(scopes) {
                    spans.push(CategorySpan {
                        range: syntect_offset..clamped_offset,
                        category,
                    });
                }
            }
            syntect_offset = clamped_offset;
            let _ = scopes.apply(&op);
        }

        // Handle remaining text on line
        if syntect_offset < line_len {
            if let Some(category) = Self::scope_stack_to_category(scopes) {
                spans.push(CategorySpan {
                    range: syntect_offset..line_len,
                    category,
                });
            }
        }

        Self::merge_adjacent_spans(&mut spans);
        spans
    }

    /// Map scope stack to highlight category
    fn scope_stack_to_category(scopes: &ScopeStack) -> Option<HighlightCategory> {
        for scope in scopes.as_slice().iter().rev() {
            let scope_str = scope.build_string();
            if let Some(cat) = scope_to_category(&scope_str) {
                return Some(cat);
            }
        }
        None
    }

    /// Merge adjacent spans with same category
    fn merge_adjacent_spans(spans: &mut Vec<CategorySpan>) {
        if spans.len() < 2 {
            return;
        }

        let mut write_idx = 0;
        for read_idx in 1..spans.len() {
            if spans[write_idx].category == spans[read_idx].category
                && spans[write_idx].range.end == spans[read_idx].range.start
            {
                spans[write_idx].range.end = spans[read_idx].range.end;
            } else {
                write_idx += 1;
                if write_idx != read_idx {
                    spans[write_idx] = spans[read_idx].clone();
                }
            }
        }
        spans.truncate(write_idx + 1);
    }
}
