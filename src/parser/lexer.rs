//! Logos-based lexer for ActionScript-family sources
//!
//! Fast tokenization using the logos crate.

use super::token_kind::TokenKind;
use logos::Logos;
use text_size::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: TextSize,
    /// 0-based line of the first character.
    pub line: u32,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
    line: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
            line: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        let line = self.line;
        self.offset += text.len() as u32;
        self.line += text.bytes().filter(|&b| b == b'\n').count() as u32;

        let kind = match logos_token {
            Ok(LogosToken::BlockComment) if is_doc_comment(text) => TokenKind::DOC_COMMENT,
            Ok(t) => t.into(),
            Err(()) => TokenKind::ERROR,
        };

        Some(Token {
            kind,
            text,
            offset,
            line,
        })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

fn is_doc_comment(text: &str) -> bool {
    text.starts_with("/**") && text.len() > 4
}

/// Consume a block comment body up to and including the closing `*/`.
///
/// An unterminated comment swallows the rest of the input.
fn block_comment(lex: &mut logos::Lexer<'_, LogosToken>) -> bool {
    let rest = lex.remainder();
    match rest.find("*/") {
        Some(end) => lex.bump(end + 2),
        None => lex.bump(rest.len()),
    }
    true
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    #[regex(r"0[xX][0-9a-fA-F]+")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"'([^'\\\n]|\\.)*'"#)]
    String,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("...")]
    Ellipsis,
    #[token(".<")]
    DotLt,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("*")]
    Star,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("@")]
    At,
    #[regex(r"[+\-/%!?&|^~#\\]")]
    OtherPunct,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("package")]
    PackageKw,
    #[token("import")]
    ImportKw,
    #[token("class")]
    ClassKw,
    #[token("interface")]
    InterfaceKw,
    #[token("extends")]
    ExtendsKw,
    #[token("implements")]
    ImplementsKw,
    #[token("function")]
    FunctionKw,
    #[token("var")]
    VarKw,
    #[token("const")]
    ConstKw,
    #[token("public")]
    PublicKw,
    #[token("private")]
    PrivateKw,
    #[token("protected")]
    ProtectedKw,
    #[token("internal")]
    InternalKw,
    #[token("static")]
    StaticKw,
    #[token("dynamic")]
    DynamicKw,
    #[token("intrinsic")]
    IntrinsicKw,
    #[token("override")]
    OverrideKw,
    #[token("final")]
    FinalKw,
    #[token("native")]
    NativeKw,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Whitespace => TokenKind::WHITESPACE,
            LineComment => TokenKind::LINE_COMMENT,
            BlockComment => TokenKind::BLOCK_COMMENT,
            Ident => TokenKind::IDENT,
            Number => TokenKind::NUMBER,
            String => TokenKind::STRING,
            Ellipsis => TokenKind::ELLIPSIS,
            DotLt => TokenKind::DOT_LT,
            LBrace => TokenKind::L_BRACE,
            RBrace => TokenKind::R_BRACE,
            LParen => TokenKind::L_PAREN,
            RParen => TokenKind::R_PAREN,
            LBracket => TokenKind::L_BRACKET,
            RBracket => TokenKind::R_BRACKET,
            Semicolon => TokenKind::SEMICOLON,
            Colon => TokenKind::COLON,
            Comma => TokenKind::COMMA,
            Dot => TokenKind::DOT,
            Star => TokenKind::STAR,
            Eq => TokenKind::EQ,
            Lt => TokenKind::LT,
            Gt => TokenKind::GT,
            At => TokenKind::AT,
            OtherPunct => TokenKind::OTHER_PUNCT,
            PackageKw => TokenKind::PACKAGE_KW,
            ImportKw => TokenKind::IMPORT_KW,
            ClassKw => TokenKind::CLASS_KW,
            InterfaceKw => TokenKind::INTERFACE_KW,
            ExtendsKw => TokenKind::EXTENDS_KW,
            ImplementsKw => TokenKind::IMPLEMENTS_KW,
            FunctionKw => TokenKind::FUNCTION_KW,
            VarKw => TokenKind::VAR_KW,
            ConstKw => TokenKind::CONST_KW,
            PublicKw => TokenKind::PUBLIC_KW,
            PrivateKw => TokenKind::PRIVATE_KW,
            ProtectedKw => TokenKind::PROTECTED_KW,
            InternalKw => TokenKind::INTERNAL_KW,
            StaticKw => TokenKind::STATIC_KW,
            DynamicKw => TokenKind::DYNAMIC_KW,
            IntrinsicKw => TokenKind::INTRINSIC_KW,
            OverrideKw => TokenKind::OVERRIDE_KW,
            FinalKw => TokenKind::FINAL_KW,
            NativeKw => TokenKind::NATIVE_KW,
        }
    }
}
