//! Declaration-level parser producing [`FileModel`]s.
//!
//! Only what the resolver needs is extracted: package, imports, classes with
//! their supertypes and members, and package-level declarations. Function
//! bodies and initializers are skipped by bracket depth. The parser never
//! fails: unexpected input is skipped and reported as a [`ParseError`].

use smol_str::SmolStr;
use std::path::PathBuf;
use std::sync::Arc;

use super::lexer::{Lexer, Token};
use super::token_kind::TokenKind;
use crate::base::Span;
use crate::base::constants::WILDCARD;
use crate::model::{ClassModel, FileModel, FlagType, MemberModel, Visibility};

/// A recoverable problem found while parsing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("line {}: {message}", .line + 1)]
pub struct ParseError {
    pub message: String,
    /// 0-based line.
    pub line: u32,
}

/// Parse result: always a model, plus the problems met on the way.
#[derive(Clone, Debug)]
pub struct ParseResult {
    pub model: FileModel,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse source text into a file model.
pub fn parse_source(text: &str, path: impl Into<PathBuf>) -> ParseResult {
    let tokens: Vec<Token<'_>> = Lexer::new(text).filter(|t| !t.kind.is_trivia()).collect();
    let mut parser = DeclParser::new(&tokens, path.into());
    parser.parse_items(false);
    ParseResult {
        model: parser.model,
        errors: parser.errors,
    }
}

// ============================================================================
// MODIFIERS
// ============================================================================

#[derive(Default)]
struct Modifiers {
    access: Option<Visibility>,
    flags: FlagType,
}

impl Modifiers {
    fn apply(&mut self, kind: TokenKind) {
        match kind {
            TokenKind::PUBLIC_KW => self.access = Some(Visibility::PUBLIC),
            TokenKind::PRIVATE_KW => self.access = Some(Visibility::PRIVATE),
            TokenKind::PROTECTED_KW => self.access = Some(Visibility::PROTECTED),
            TokenKind::INTERNAL_KW => self.access = Some(Visibility::INTERNAL),
            TokenKind::STATIC_KW => self.flags |= FlagType::STATIC,
            TokenKind::DYNAMIC_KW => self.flags |= FlagType::DYNAMIC,
            TokenKind::INTRINSIC_KW | TokenKind::NATIVE_KW => self.flags |= FlagType::INTRINSIC,
            TokenKind::OVERRIDE_KW => self.flags |= FlagType::OVERRIDE,
            TokenKind::FINAL_KW => self.flags |= FlagType::FINAL,
            _ => {}
        }
    }
}

// ============================================================================
// PARSER
// ============================================================================

struct DeclParser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    model: FileModel,
    errors: Vec<ParseError>,
    pending_doc: Option<String>,
    in_package: bool,
    after_package: bool,
}

impl<'t, 'a> DeclParser<'t, 'a> {
    fn new(tokens: &'t [Token<'a>], path: PathBuf) -> Self {
        Self {
            tokens,
            pos: 0,
            model: FileModel::new(path),
            errors: Vec::new(),
            pending_doc: None,
            in_package: false,
            after_package: false,
        }
    }

    // ---- cursor helpers ----

    fn peek(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    fn at_word(&self) -> bool {
        self.peek_kind().is_some_and(TokenKind::is_word)
    }

    fn bump(&mut self) -> Option<&'t Token<'a>> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn current_line(&self) -> u32 {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(0)
    }

    fn error(&mut self, message: impl Into<String>) {
        let line = self.current_line();
        self.errors.push(ParseError {
            message: message.into(),
            line,
        });
    }

    fn default_member_access(&self) -> Visibility {
        if self.model.version >= 3 {
            Visibility::INTERNAL
        } else {
            Visibility::PUBLIC
        }
    }

    // ---- file and package level ----

    /// Parse file or package items. Returns the line of the closing brace
    /// when `until_rbrace` is set and the brace was found.
    fn parse_items(&mut self, until_rbrace: bool) -> Option<u32> {
        loop {
            let Some(token) = self.peek() else {
                if until_rbrace {
                    self.error("unexpected end of file: missing '}'");
                }
                return None;
            };
            match token.kind {
                TokenKind::R_BRACE if until_rbrace => {
                    self.pos += 1;
                    return Some(token.line);
                }
                TokenKind::PACKAGE_KW if !self.in_package => self.parse_package(),
                TokenKind::IMPORT_KW => self.parse_import(),
                TokenKind::DOC_COMMENT => {
                    self.pending_doc = Some(token.text.to_string());
                    self.pos += 1;
                }
                TokenKind::L_BRACE => {
                    self.skip_block();
                }
                kind if kind.is_modifier()
                    || matches!(
                        kind,
                        TokenKind::CLASS_KW
                            | TokenKind::INTERFACE_KW
                            | TokenKind::FUNCTION_KW
                            | TokenKind::VAR_KW
                            | TokenKind::CONST_KW
                    ) =>
                {
                    self.parse_declaration();
                }
                _ => {
                    self.pending_doc = None;
                    self.pos += 1;
                }
            }
        }
    }

    fn parse_package(&mut self) {
        self.bump();
        let name = self.parse_dotted_name();
        if !self.eat(TokenKind::L_BRACE) {
            self.error("expected '{' after package name");
            return;
        }
        self.model.package = SmolStr::from(name);
        self.model.has_package = true;
        self.model.version = 3;
        self.in_package = true;
        let close = self.parse_items(true);
        self.in_package = false;
        if let Some(line) = close {
            self.model.private_section_index = line + 1;
            self.after_package = true;
        }
    }

    fn parse_import(&mut self) {
        let line = self.current_line();
        self.bump();
        let mut path = self.parse_dotted_name();
        let mut name = path.rsplit('.').next().unwrap_or_default().to_string();
        if self.at(TokenKind::DOT) && self.nth_kind(1) == Some(TokenKind::STAR) {
            self.pos += 2;
            path.push_str(".*");
            name = WILDCARD.to_string();
        }
        self.eat(TokenKind::SEMICOLON);
        if name.is_empty() {
            self.error("expected import path");
            return;
        }
        self.model.imports.add(
            MemberModel::new(name, path, FlagType::IMPORT, Visibility::PUBLIC)
                .with_lines(line, line),
        );
    }

    fn parse_modifiers(&mut self) -> Modifiers {
        let mut mods = Modifiers::default();
        while let Some(kind) = self.peek_kind().filter(|k| k.is_modifier()) {
            mods.apply(kind);
            self.pos += 1;
        }
        mods
    }

    fn parse_declaration(&mut self) {
        let start = self.current_line();
        let mods = self.parse_modifiers();
        let doc = self.pending_doc.take();
        let default_access = self.default_member_access();
        match self.peek_kind() {
            Some(TokenKind::CLASS_KW | TokenKind::INTERFACE_KW) => self.parse_class(mods, doc, start),
            Some(TokenKind::FUNCTION_KW) => {
                if let Some(member) = self.parse_function(&mods, doc, start, None, default_access) {
                    self.model.members.add(member);
                }
            }
            Some(TokenKind::VAR_KW | TokenKind::CONST_KW) => {
                for member in self.parse_vars(&mods, doc, default_access) {
                    self.model.members.add(member);
                }
            }
            _ => {}
        }
    }

    // ---- names and types ----

    fn parse_dotted_name(&mut self) -> String {
        let mut name = String::new();
        if !self.at_word() {
            return name;
        }
        if let Some(token) = self.bump() {
            name.push_str(token.text);
        }
        while self.at(TokenKind::DOT) && self.nth_kind(1).is_some_and(TokenKind::is_word) {
            self.pos += 1;
            if let Some(token) = self.bump() {
                name.push('.');
                name.push_str(token.text);
            }
        }
        name
    }

    /// `*`, `a.b.C`, or `Vector.<T>` (stored as `Vector@T`).
    fn parse_type(&mut self) -> SmolStr {
        if self.eat(TokenKind::STAR) {
            return SmolStr::new_static("*");
        }
        let name = self.parse_dotted_name();
        if self.eat(TokenKind::DOT_LT) {
            let inner = self.parse_type();
            self.eat(TokenKind::GT);
            return SmolStr::from(format!("{name}@{inner}"));
        }
        SmolStr::from(name)
    }

    // ---- classes ----

    fn parse_class(&mut self, mods: Modifiers, doc: Option<String>, start: u32) {
        let is_interface = self.bump().map(|t| t.kind) == Some(TokenKind::INTERFACE_KW);
        let full_name = self.parse_dotted_name();
        if full_name.is_empty() {
            self.error("expected type name");
            return;
        }
        let (package, name) = match full_name.rfind('.') {
            Some(idx) => (&full_name[..idx], &full_name[idx + 1..]),
            None => ("", full_name.as_str()),
        };
        if !package.is_empty() && !self.model.has_package {
            self.model.package = SmolStr::from(package);
            self.model.has_package = true;
        }
        if self.model.version < 2 {
            self.model.version = 2;
        }

        let mut class = ClassModel::new(name, self.model.package.clone());
        class.file = self.model.path.clone();
        class.flags = if is_interface {
            FlagType::INTERFACE
        } else {
            FlagType::CLASS
        } | mods.flags;
        class.access = if self.after_package {
            Visibility::PRIVATE
        } else {
            mods.access.unwrap_or(self.default_member_access())
        };
        class.comments = doc;

        if self.eat(TokenKind::EXTENDS_KW) {
            class.extends_type = self.parse_type();
            // interfaces may extend several interfaces
            while self.eat(TokenKind::COMMA) {
                let next = self.parse_type();
                class.implements.push(next);
            }
        }
        if self.eat(TokenKind::IMPLEMENTS_KW) {
            loop {
                let next = self.parse_type();
                if !next.is_empty() {
                    class.implements.push(next);
                }
                if !self.eat(TokenKind::COMMA) {
                    break;
                }
            }
        }

        let end = if self.eat(TokenKind::L_BRACE) {
            self.parse_class_body(&mut class)
        } else {
            self.error(format!("expected '{{' after declaration of {name}"));
            start
        };
        class.span = Span::lines(start, end);
        tracing::trace!("[MODEL] parsed type '{}' (lines {}..={})", class.qualified_name(), start, end);
        self.model.classes.push(Arc::new(class));
    }

    fn parse_class_body(&mut self, class: &mut ClassModel) -> u32 {
        let class_name = class.name.clone();
        let default_access = self.default_member_access();
        loop {
            let Some(token) = self.peek() else {
                self.error(format!("unexpected end of file: missing '}}' for {class_name}"));
                return self.current_line();
            };
            match token.kind {
                TokenKind::R_BRACE => {
                    self.pos += 1;
                    return token.line;
                }
                TokenKind::DOC_COMMENT => {
                    self.pending_doc = Some(token.text.to_string());
                    self.pos += 1;
                }
                TokenKind::L_BRACE => {
                    self.skip_block();
                }
                kind if kind.is_modifier()
                    || matches!(
                        kind,
                        TokenKind::FUNCTION_KW | TokenKind::VAR_KW | TokenKind::CONST_KW
                    ) =>
                {
                    let start = token.line;
                    let mods = self.parse_modifiers();
                    let doc = self.pending_doc.take();
                    match self.peek_kind() {
                        Some(TokenKind::FUNCTION_KW) => {
                            if let Some(member) =
                                self.parse_function(&mods, doc, start, Some(&class_name), default_access)
                            {
                                class.members.add(member);
                            }
                        }
                        Some(TokenKind::VAR_KW | TokenKind::CONST_KW) => {
                            for member in self.parse_vars(&mods, doc, default_access) {
                                class.members.add(member);
                            }
                        }
                        _ => {}
                    }
                }
                _ => {
                    self.pending_doc = None;
                    self.pos += 1;
                }
            }
        }
    }

    // ---- members ----

    fn parse_function(
        &mut self,
        mods: &Modifiers,
        doc: Option<String>,
        start: u32,
        class_name: Option<&str>,
        default_access: Visibility,
    ) -> Option<MemberModel> {
        self.bump();
        let mut flags = FlagType::FUNCTION | mods.flags;
        if let Some(token) = self.peek()
            && (token.text == "get" || token.text == "set")
            && self.nth_kind(1).is_some_and(TokenKind::is_word)
        {
            flags |= if token.text == "get" {
                FlagType::GETTER
            } else {
                FlagType::SETTER
            };
            self.pos += 1;
        }
        let name = if self.at_word() {
            self.bump().map(|t| t.text).unwrap_or_default()
        } else {
            ""
        };

        let parameters = if self.eat(TokenKind::L_PAREN) {
            self.parse_parameters()
        } else {
            Vec::new()
        };
        let mut type_name = if self.eat(TokenKind::COLON) {
            self.parse_type()
        } else {
            SmolStr::default()
        };
        if flags.contains(FlagType::SETTER)
            && let Some(param) = parameters.first()
        {
            type_name = param.type_name.clone();
        }
        if class_name.is_some_and(|c| c == name) {
            flags |= FlagType::CONSTRUCTOR;
            type_name = SmolStr::from(name);
        }

        let end = if self.at(TokenKind::L_BRACE) {
            self.skip_block()
        } else {
            self.eat(TokenKind::SEMICOLON);
            start
        };
        if name.is_empty() {
            return None;
        }
        Some(MemberModel {
            name: SmolStr::from(name),
            type_name,
            flags,
            access: mods.access.unwrap_or(default_access),
            span: Span::lines(start, end),
            parameters,
            comments: doc,
        })
    }

    fn parse_parameters(&mut self) -> Vec<MemberModel> {
        let mut params = Vec::new();
        loop {
            let Some(token) = self.peek() else {
                self.error("unexpected end of file in parameter list");
                return params;
            };
            match token.kind {
                TokenKind::R_PAREN => {
                    self.pos += 1;
                    return params;
                }
                TokenKind::ELLIPSIS => {
                    self.pos += 1;
                    if let Some(rest) = self.bump().filter(|t| t.kind.is_word()) {
                        let type_name = if self.eat(TokenKind::COLON) {
                            self.parse_type()
                        } else {
                            SmolStr::new_static("Array")
                        };
                        params.push(
                            MemberModel::new(
                                rest.text,
                                type_name,
                                FlagType::VARIABLE | FlagType::LOCAL_VAR,
                                Visibility::PUBLIC,
                            )
                            .with_lines(rest.line, rest.line),
                        );
                    }
                }
                kind if kind.is_word() => {
                    self.pos += 1;
                    let type_name = if self.eat(TokenKind::COLON) {
                        self.parse_type()
                    } else {
                        SmolStr::default()
                    };
                    if self.eat(TokenKind::EQ) {
                        self.skip_expression(&[TokenKind::COMMA, TokenKind::R_PAREN]);
                    }
                    params.push(
                        MemberModel::new(
                            token.text,
                            type_name,
                            FlagType::VARIABLE | FlagType::LOCAL_VAR,
                            Visibility::PUBLIC,
                        )
                        .with_lines(token.line, token.line),
                    );
                }
                _ => self.pos += 1,
            }
        }
    }

    fn parse_vars(
        &mut self,
        mods: &Modifiers,
        mut doc: Option<String>,
        default_access: Visibility,
    ) -> Vec<MemberModel> {
        let is_const = self.bump().map(|t| t.kind) == Some(TokenKind::CONST_KW);
        let flags = if is_const {
            FlagType::CONSTANT
        } else {
            FlagType::VARIABLE
        } | mods.flags;

        let mut members = Vec::new();
        while self.at_word() {
            let Some(name) = self.bump() else { break };
            let type_name = if self.eat(TokenKind::COLON) {
                self.parse_type()
            } else {
                SmolStr::default()
            };
            if self.eat(TokenKind::EQ) {
                self.skip_expression(&[TokenKind::COMMA, TokenKind::SEMICOLON]);
            }
            let mut member = MemberModel::new(name.text, type_name, flags, mods.access.unwrap_or(default_access))
                .with_lines(name.line, name.line);
            member.comments = doc.take();
            members.push(member);
            if !self.eat(TokenKind::COMMA) {
                break;
            }
        }
        self.eat(TokenKind::SEMICOLON);
        members
    }

    // ---- skipping ----

    /// Skip a `{ ... }` block starting at the current token. Returns the line
    /// of the closing brace.
    fn skip_block(&mut self) -> u32 {
        let mut depth = 0usize;
        while let Some(token) = self.bump() {
            match token.kind {
                TokenKind::L_BRACE => depth += 1,
                TokenKind::R_BRACE => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return token.line;
                    }
                }
                _ => {}
            }
        }
        self.error("unexpected end of file: unterminated block");
        self.current_line()
    }

    /// Skip an expression up to (not including) one of `stops` at depth 0,
    /// a closing brace at depth 0, or the start of the next declaration.
    fn skip_expression(&mut self, stops: &[TokenKind]) {
        let mut depth = 0usize;
        while let Some(kind) = self.peek_kind() {
            if depth == 0 {
                if stops.contains(&kind) {
                    return;
                }
                if kind != TokenKind::FUNCTION_KW && kind.starts_declaration() {
                    return;
                }
            }
            match kind {
                TokenKind::L_BRACE | TokenKind::L_PAREN | TokenKind::L_BRACKET => depth += 1,
                TokenKind::R_BRACE | TokenKind::R_PAREN | TokenKind::R_BRACKET => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.pos += 1;
        }
    }
}
