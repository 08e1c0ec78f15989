use treelox::{
    scanner::Scanner,
    token::TokenKind::{self, *},
};

fn scan_kinds(src: &str) -> Vec<TokenKind> {
    let (tokens, diagnostics) = Scanner::new(src).scan_tokens();
    assert!(
        diagnostics.is_empty(),
        "unexpected diagnostics scanning `{}`",
        src
    );
    tokens.into_iter().map(|token| token.kind).collect()
}

fn scan_errors(src: &str) -> Vec<std::string::String> {
    let (_, diagnostics) = Scanner::new(src).scan_tokens();
    diagnostics.iter().map(ToString::to_string).collect()
}

#[test]
fn single_tokens() {
    let cases: &[(&str, TokenKind)] = &[
        ("(", LeftParen),
        (")", RightParen),
        ("{", LeftBrace),
        ("}", RightBrace),
        ("+", Plus),
        ("-", Minus),
        ("*", Star),
        ("/", Slash),
        (".", Dot),
        (",", Comma),
        (";", Semicolon),
        ("!", Bang),
        ("!=", BangEqual),
        ("=", Equal),
        ("==", EqualEqual),
        ("<", Less),
        ("<=", LessEqual),
        (">", Greater),
        (">=", GreaterEqual),
        ("nil", Nil),
        ("true", True),
        ("false", False),
        ("this", This),
        ("super", Super),
        ("class", Class),
        ("and", And),
        ("or", Or),
        ("if", If),
        ("else", Else),
        ("return", Return),
        ("fun", Fun),
        ("for", For),
        ("while", While),
        ("var", Var),
        ("print", Print),
    ];
    for (src, expected) in cases {
        assert_eq!(
            scan_kinds(src),
            vec![expected.clone(), Eof],
            "scanning `{}`",
            src
        );
    }
}

#[test]
fn identifiers() {
    assert_eq!(scan_kinds("r2d2"), vec![Identifier("r2d2".into()), Eof]);
    assert_eq!(scan_kinds("_under"), vec![Identifier("_under".into()), Eof]);
    assert_eq!(scan_kinds("r2_d2"), vec![Identifier("r2_d2".into()), Eof]);
}

#[test]
fn keyword_prefixes_are_identifiers() {
    assert_eq!(scan_kinds("classy"), vec![Identifier("classy".into()), Eof]);
    assert_eq!(scan_kinds("nilly"), vec![Identifier("nilly".into()), Eof]);
    assert_eq!(scan_kinds("format"), vec![Identifier("format".into()), Eof]);
}

#[test]
fn numbers() {
    assert_eq!(scan_kinds("3"), vec![Number(3.0), Eof]);
    assert_eq!(scan_kinds("3.14"), vec![Number(3.14), Eof]);
    assert_eq!(scan_kinds("0.5"), vec![Number(0.5), Eof]);
    // A trailing dot is not part of the number.
    assert_eq!(scan_kinds("3."), vec![Number(3.0), Dot, Eof]);
    assert_eq!(scan_kinds("1.2.3"), vec![Number(1.2), Dot, Number(3.0), Eof]);
}

#[test]
fn strings() {
    assert_eq!(scan_kinds(r#""""#), vec![String("".into()), Eof]);
    assert_eq!(scan_kinds(r#"" a ""#), vec![String(" a ".into()), Eof]);
    assert_eq!(scan_kinds(r#""abc""#), vec![String("abc".into()), Eof]);
}

#[test]
fn multi_line_strings_count_lines() {
    let (tokens, diagnostics) = Scanner::new("\"a\nb\"\nvar").scan_tokens();
    assert!(diagnostics.is_empty());
    assert_eq!(tokens[0].kind, String("a\nb".into()));
    // Tokens carry the line on which they begin.
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[1].kind, Var);
    assert_eq!(tokens[1].line, 3);
}

#[test]
fn comments_and_whitespace_are_skipped() {
    assert_eq!(scan_kinds("// nothing here"), vec![Eof]);
    assert_eq!(
        scan_kinds("1 // trailing\n+ 2"),
        vec![Number(1.0), Plus, Number(2.0), Eof]
    );
    assert_eq!(scan_kinds(" \t\r\n"), vec![Eof]);
    assert_eq!(scan_kinds("1 / 2"), vec![Number(1.0), Slash, Number(2.0), Eof]);
}

#[test]
fn line_numbers() {
    let (tokens, diagnostics) = Scanner::new("1\n2\n\n3").scan_tokens();
    assert!(diagnostics.is_empty());
    let lines: Vec<_> = tokens.iter().map(|token| token.line).collect();
    assert_eq!(lines, vec![1, 2, 4, 4]); // the trailing entry is eof
}

#[test]
fn unexpected_characters() {
    assert_eq!(
        scan_errors("@"),
        vec!["[line 1] Error: Unexpected character: '@'"]
    );
    assert_eq!(
        scan_errors("1 + 2;\n#"),
        vec!["[line 2] Error: Unexpected character: '#'"]
    );
}

#[test]
fn unterminated_string() {
    assert_eq!(
        scan_errors("\"abc"),
        vec!["[line 1] Error: Unterminated string."]
    );
}

#[test]
fn scanning_continues_past_errors() {
    let (tokens, diagnostics) = Scanner::new("@ 1 $ 2").scan_tokens();
    assert_eq!(diagnostics.iter().count(), 2);
    let kinds: Vec<_> = tokens.into_iter().map(|token| token.kind).collect();
    assert_eq!(kinds, vec![Number(1.0), Number(2.0), Eof]);
}
