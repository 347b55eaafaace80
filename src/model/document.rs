//! Text documents compared by the diff viewer

use std::fmt;
use std::path::Path;

/// Language tag used to pick a syntax grammar for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Json,
    Yaml,
    Markdown,
    Html,
    Css,
    Sql,
    Jsx,
    Tsx,
    /// Unrecognized languages render without highlighting
    #[default]
    PlainText,
}

impl Language {
    /// All languages with a grammar, in the order they are documented
    pub const RECOGNIZED: [Language; 11] = [
        Language::JavaScript,
        Language::TypeScript,
        Language::Python,
        Language::Json,
        Language::Yaml,
        Language::Markdown,
        Language::Html,
        Language::Css,
        Language::Sql,
        Language::Jsx,
        Language::Tsx,
    ];

    /// Parse a language name, alias or file extension.
    ///
    /// Never fails: anything unrecognized maps to `PlainText`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "javascript" | "js" | "mjs" | "cjs" => Language::JavaScript,
            "typescript" | "ts" | "mts" | "cts" => Language::TypeScript,
            "python" | "py" => Language::Python,
            "json" => Language::Json,
            "yaml" | "yml" => Language::Yaml,
            "markdown" | "md" => Language::Markdown,
            "html" | "htm" => Language::Html,
            "css" => Language::Css,
            "sql" => Language::Sql,
            "jsx" => Language::Jsx,
            "tsx" => Language::Tsx,
            _ => Language::PlainText,
        }
    }

    /// Detect language from file extension
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_name)
            .unwrap_or_default()
    }

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Json => "json",
            Language::Yaml => "yaml",
            Language::Markdown => "markdown",
            Language::Html => "html",
            Language::Css => "css",
            Language::Sql => "sql",
            Language::Jsx => "jsx",
            Language::Tsx => "tsx",
            Language::PlainText => "plaintext",
        }
    }

    /// File extensions to try, in order, when looking up a grammar.
    ///
    /// The default syntax set has no TypeScript or JSX grammar, so those
    /// fall back to JavaScript.
    pub fn grammar_extensions(&self) -> &'static [&'static str] {
        match self {
            Language::JavaScript => &["js"],
            Language::TypeScript => &["ts", "js"],
            Language::Python => &["py"],
            Language::Json => &["json"],
            Language::Yaml => &["yaml", "yml"],
            Language::Markdown => &["md"],
            Language::Html => &["html", "htm"],
            Language::Css => &["css"],
            Language::Sql => &["sql"],
            Language::Jsx => &["jsx", "js"],
            Language::Tsx => &["tsx", "ts", "jsx", "js"],
            Language::PlainText => &[],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of a comparison a document or line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Original,
    Modified,
}

impl Side {
    /// Pane index used by the side-by-side layout
    pub fn index(&self) -> usize {
        match self {
            Side::Original => 0,
            Side::Modified => 1,
        }
    }
}

/// A labeled block of source text plus its language tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    pub label: String,
    pub content: String,
    pub language: Language,
}

impl TextDocument {
    pub fn new(label: impl Into<String>, content: impl Into<String>, language: Language) -> Self {
        Self {
            label: label.into(),
            content: content.into(),
            language,
        }
    }

    /// Lines as the diff engine sees them (split on `\n`, so an empty
    /// document is a single empty line)
    pub fn lines(&self) -> Vec<&str> {
        self.content.split('\n').collect()
    }

    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }
}
