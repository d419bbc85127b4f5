//! Logos-based lexer for C with Objective-C directives
//!
//! The lexer knows nothing about contextual keywords: `self`, `super`, `in`,
//! `oneway` and friends come out as plain `IDENT` tokens and the grammar
//! matches them by text. Only the `@`-directives are reserved here.

use logos::Logos;
use rowan::{TextRange, TextSize};

use super::syntax_kind::SyntaxKind;

/// One lexeme: kind, source slice and start offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }
}

/// Iterator over the tokens of a source text. Bytes no rule matches come
/// out as single `ERROR` tokens, so the token texts always cover the input.
pub struct Lexer<'a> {
    logos: logos::SpannedIter<'a, LogosToken>,
    source: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer { logos: LogosToken::lexer(source).spanned(), source }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let (result, span) = self.logos.next()?;
        let kind = result.map_or(SyntaxKind::ERROR, SyntaxKind::from);
        Some(Token {
            kind,
            text: &self.source[span.clone()],
            offset: TextSize::new(span.start as u32),
        })
    }
}

pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    Lexer::new(source).collect()
}

/// The kind the lexer gives `text` when it forms exactly one token.
///
/// Grammar analysis uses this to find literals that are really identifiers.
pub fn classify(text: &str) -> Option<SyntaxKind> {
    let mut lexer = Lexer::new(text);
    let first = lexer.next()?;
    match lexer.next() {
        None => Some(first.kind),
        Some(_) => None,
    }
}

/// Consume a block comment up to and including `*/`. An unterminated
/// comment swallows the rest of the input and is rejected.
fn block_comment(lex: &mut logos::Lexer<'_, LogosToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

/// Raw logos tokens; each converts to exactly one [`SyntaxKind`].
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

    #[regex(r"#([^\n\\]|\\[^\n]|\\\n)*")]
    PreprocLine,

    // =========================================================================
    // LEXEMES
    // =========================================================================
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?[uUlLfF]*")]
    Decimal,

    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?[fFlL]*")]
    Fraction,

    #[regex(r"0[xX][0-9a-fA-F]+[uUlL]*")]
    Hex,

    #[regex(r#"(u8|u|U|L|@)?"([^"\\\n]|\\(.|\n))*""#)]
    String,

    #[regex(r"(u|U|L)?'([^'\\\n]|\\.)*'")]
    Char,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("->")]
    Arrow,
    #[token("?")]
    Question,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("<<=")]
    LtLtEq,
    #[token(">>=")]
    GtGtEq,

    // =========================================================================
    // C KEYWORDS
    // =========================================================================
    #[token("auto")]
    Auto,
    #[token("break")]
    Break,
    #[token("case")]
    Case,
    #[token("char")]
    CharKw,
    #[token("const")]
    Const,
    #[token("continue")]
    Continue,
    #[token("default")]
    Default,
    #[token("do")]
    Do,
    #[token("double")]
    Double,
    #[token("else")]
    Else,
    #[token("enum")]
    Enum,
    #[token("extern")]
    Extern,
    #[token("float")]
    Float,
    #[token("for")]
    For,
    #[token("goto")]
    Goto,
    #[token("if")]
    If,
    #[token("inline")]
    Inline,
    #[token("int")]
    Int,
    #[token("long")]
    Long,
    #[token("register")]
    Register,
    #[token("restrict")]
    Restrict,
    #[token("return")]
    Return,
    #[token("short")]
    Short,
    #[token("signed")]
    Signed,
    #[token("sizeof")]
    Sizeof,
    #[token("static")]
    Static,
    #[token("struct")]
    Struct,
    #[token("switch")]
    Switch,
    #[token("typedef")]
    Typedef,
    #[token("union")]
    Union,
    #[token("unsigned")]
    Unsigned,
    #[token("void")]
    Void,
    #[token("volatile")]
    Volatile,
    #[token("while")]
    While,
    #[token("_Bool")]
    Bool,
    #[token("_Atomic")]
    Atomic,

    // =========================================================================
    // OBJECTIVE-C DIRECTIVES
    // =========================================================================
    #[token("@interface")]
    AtInterface,
    #[token("@implementation")]
    AtImplementation,
    #[token("@end")]
    AtEnd,
    #[token("@protocol")]
    AtProtocol,
    #[token("@class")]
    AtClass,
    #[token("@private")]
    AtPrivate,
    #[token("@public")]
    AtPublic,
    #[token("@protected")]
    AtProtected,
    #[token("@selector")]
    AtSelector,
    #[token("@encode")]
    AtEncode,
    #[token("@defs")]
    AtDefs,
    #[regex(r"@[a-zA-Z_][a-zA-Z0-9_]*")]
    AtIdent,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,
            PreprocLine => SyntaxKind::PREPROC_LINE,

            Ident => SyntaxKind::IDENT,
            Decimal | Fraction | Hex => SyntaxKind::NUMBER_LITERAL,
            String => SyntaxKind::STRING_LITERAL,
            Char => SyntaxKind::CHAR_LITERAL,

            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Comma => SyntaxKind::COMMA,
            Dot => SyntaxKind::DOT,
            Ellipsis => SyntaxKind::ELLIPSIS,
            Arrow => SyntaxKind::ARROW,
            Question => SyntaxKind::QUESTION,
            Tilde => SyntaxKind::TILDE,
            Bang => SyntaxKind::BANG,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Percent => SyntaxKind::PERCENT,
            Amp => SyntaxKind::AMP,
            Pipe => SyntaxKind::PIPE,
            Caret => SyntaxKind::CARET,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Eq => SyntaxKind::EQ,
            PlusPlus => SyntaxKind::PLUS_PLUS,
            MinusMinus => SyntaxKind::MINUS_MINUS,
            LtLt => SyntaxKind::LT_LT,
            GtGt => SyntaxKind::GT_GT,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,
            EqEq => SyntaxKind::EQ_EQ,
            BangEq => SyntaxKind::BANG_EQ,
            AmpAmp => SyntaxKind::AMP_AMP,
            PipePipe => SyntaxKind::PIPE_PIPE,
            PlusEq => SyntaxKind::PLUS_EQ,
            MinusEq => SyntaxKind::MINUS_EQ,
            StarEq => SyntaxKind::STAR_EQ,
            SlashEq => SyntaxKind::SLASH_EQ,
            PercentEq => SyntaxKind::PERCENT_EQ,
            AmpEq => SyntaxKind::AMP_EQ,
            PipeEq => SyntaxKind::PIPE_EQ,
            CaretEq => SyntaxKind::CARET_EQ,
            LtLtEq => SyntaxKind::LT_LT_EQ,
            GtGtEq => SyntaxKind::GT_GT_EQ,

            Auto => SyntaxKind::AUTO_KW,
            Break => SyntaxKind::BREAK_KW,
            Case => SyntaxKind::CASE_KW,
            CharKw => SyntaxKind::CHAR_KW,
            Const => SyntaxKind::CONST_KW,
            Continue => SyntaxKind::CONTINUE_KW,
            Default => SyntaxKind::DEFAULT_KW,
            Do => SyntaxKind::DO_KW,
            Double => SyntaxKind::DOUBLE_KW,
            Else => SyntaxKind::ELSE_KW,
            Enum => SyntaxKind::ENUM_KW,
            Extern => SyntaxKind::EXTERN_KW,
            Float => SyntaxKind::FLOAT_KW,
            For => SyntaxKind::FOR_KW,
            Goto => SyntaxKind::GOTO_KW,
            If => SyntaxKind::IF_KW,
            Inline => SyntaxKind::INLINE_KW,
            Int => SyntaxKind::INT_KW,
            Long => SyntaxKind::LONG_KW,
            Register => SyntaxKind::REGISTER_KW,
            Restrict => SyntaxKind::RESTRICT_KW,
            Return => SyntaxKind::RETURN_KW,
            Short => SyntaxKind::SHORT_KW,
            Signed => SyntaxKind::SIGNED_KW,
            Sizeof => SyntaxKind::SIZEOF_KW,
            Static => SyntaxKind::STATIC_KW,
            Struct => SyntaxKind::STRUCT_KW,
            Switch => SyntaxKind::SWITCH_KW,
            Typedef => SyntaxKind::TYPEDEF_KW,
            Union => SyntaxKind::UNION_KW,
            Unsigned => SyntaxKind::UNSIGNED_KW,
            Void => SyntaxKind::VOID_KW,
            Volatile => SyntaxKind::VOLATILE_KW,
            While => SyntaxKind::WHILE_KW,
            Bool => SyntaxKind::BOOL_KW,
            Atomic => SyntaxKind::ATOMIC_KW,

            AtInterface => SyntaxKind::AT_INTERFACE_KW,
            AtImplementation => SyntaxKind::AT_IMPLEMENTATION_KW,
            AtEnd => SyntaxKind::AT_END_KW,
            AtProtocol => SyntaxKind::AT_PROTOCOL_KW,
            AtClass => SyntaxKind::AT_CLASS_KW,
            AtPrivate => SyntaxKind::AT_PRIVATE_KW,
            AtPublic => SyntaxKind::AT_PUBLIC_KW,
            AtProtected => SyntaxKind::AT_PROTECTED_KW,
            AtSelector => SyntaxKind::AT_SELECTOR_KW,
            AtEncode => SyntaxKind::AT_ENCODE_KW,
            AtDefs => SyntaxKind::AT_DEFS_KW,
            AtIdent => SyntaxKind::AT_IDENT,
        }
    }
}
