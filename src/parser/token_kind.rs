//! Token kinds produced by the lexer.

/// Kind of a lexed token.
///
/// Trivia kinds are kept so that callers can recover line information,
/// the declaration parser filters them out.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Trivia
    WHITESPACE,
    LINE_COMMENT,
    BLOCK_COMMENT,
    DOC_COMMENT,

    // Literals
    IDENT,
    NUMBER,
    STRING,

    // Punctuation
    L_BRACE,
    R_BRACE,
    L_PAREN,
    R_PAREN,
    L_BRACKET,
    R_BRACKET,
    SEMICOLON,
    COLON,
    COMMA,
    DOT,
    DOT_LT,
    ELLIPSIS,
    STAR,
    EQ,
    LT,
    GT,
    AT,
    OTHER_PUNCT,

    // Keywords
    PACKAGE_KW,
    IMPORT_KW,
    CLASS_KW,
    INTERFACE_KW,
    EXTENDS_KW,
    IMPLEMENTS_KW,
    FUNCTION_KW,
    VAR_KW,
    CONST_KW,
    PUBLIC_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    INTERNAL_KW,
    STATIC_KW,
    DYNAMIC_KW,
    INTRINSIC_KW,
    OVERRIDE_KW,
    FINAL_KW,
    NATIVE_KW,

    ERROR,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::WHITESPACE | TokenKind::LINE_COMMENT | TokenKind::BLOCK_COMMENT
        )
    }

    pub fn is_keyword(self) -> bool {
        (self as u8) >= (TokenKind::PACKAGE_KW as u8) && (self as u8) <= (TokenKind::NATIVE_KW as u8)
    }

    /// Identifiers and keywords; both may appear as name segments.
    pub fn is_word(self) -> bool {
        self == TokenKind::IDENT || self.is_keyword()
    }

    /// Declaration modifiers (access and attributes).
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            TokenKind::PUBLIC_KW
                | TokenKind::PRIVATE_KW
                | TokenKind::PROTECTED_KW
                | TokenKind::INTERNAL_KW
                | TokenKind::STATIC_KW
                | TokenKind::DYNAMIC_KW
                | TokenKind::INTRINSIC_KW
                | TokenKind::OVERRIDE_KW
                | TokenKind::FINAL_KW
                | TokenKind::NATIVE_KW
        )
    }

    /// Tokens that may start a declaration inside a class body.
    pub fn starts_declaration(self) -> bool {
        self.is_modifier()
            || matches!(
                self,
                TokenKind::VAR_KW
                    | TokenKind::CONST_KW
                    | TokenKind::FUNCTION_KW
                    | TokenKind::CLASS_KW
                    | TokenKind::INTERFACE_KW
                    | TokenKind::IMPORT_KW
                    | TokenKind::R_BRACE
            )
    }
}
