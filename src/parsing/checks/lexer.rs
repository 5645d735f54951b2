use super::*;

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn empty_input() {
    let tokens = tokenize("");
    assert_eq!(
        tokens,
        vec![Token {
            kind: TokenKind::End,
            text: "",
            line: 1,
            column: 1
        }]
    );
}

#[test]
fn directive_then_body() {
    let tokens = tokenize("{title: Test}\n[C]Hello [G]world");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Directive,
            TokenKind::Blank,
            TokenKind::BodyLine,
            TokenKind::End
        ]
    );
    assert_eq!(tokens[0].text, "title: Test");
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[0].column, 1);

    assert_eq!(tokens[1].line, 1);
    assert_eq!(tokens[1].column, 14);

    assert_eq!(tokens[2].text, "[C]Hello [G]world");
    assert_eq!(tokens[2].line, 2);
    assert_eq!(tokens[2].column, 1);
}

#[test]
fn leading_whitespace_is_discarded() {
    let tokens = tokenize("   la la la  ");
    assert_eq!(tokens[0].kind, TokenKind::BodyLine);
    assert_eq!(tokens[0].text, "la la la  ");
    assert_eq!(tokens[0].column, 4);
}

#[test]
fn whitespace_only_line_degrades_to_blank() {
    let tokens = tokenize("  \t \nx");
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Blank, TokenKind::BodyLine, TokenKind::End]
    );
    assert_eq!(tokens[0].column, 5);
}

#[test]
fn comment_lines() {
    let tokens = tokenize("# this is a comment\n  #indented");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Comment,
            TokenKind::Blank,
            TokenKind::Comment,
            TokenKind::End
        ]
    );
    assert_eq!(tokens[0].text, "# this is a comment");
    assert_eq!(tokens[2].text, "#indented");
    assert_eq!(tokens[2].column, 3);
}

#[test]
fn multiline_directive_tracks_lines() {
    let tokens = tokenize("{comment: one\ntwo}\n[D]x");
    assert_eq!(tokens[0].kind, TokenKind::Directive);
    assert_eq!(tokens[0].text, "comment: one\ntwo");

    // the newline after the closing brace is on line 2
    assert_eq!(tokens[1].kind, TokenKind::Blank);
    assert_eq!(tokens[1].line, 2);
    assert_eq!(tokens[1].column, 5);

    assert_eq!(tokens[2].line, 3);
}

#[test]
fn unterminated_directive_is_dropped() {
    let tokens = tokenize("{unclosed directive\n[C]text");
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Blank, TokenKind::BodyLine, TokenKind::End]
    );
    assert_eq!(tokens[1].text, "[C]text");
    assert_eq!(tokens[1].line, 2);

    let tokens = tokenize("{never closed");
    assert_eq!(kinds(&tokens), vec![TokenKind::End]);
}

#[test]
fn directive_followed_by_text_on_same_line() {
    let tokens = tokenize("{c: note} and more");
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Directive, TokenKind::BodyLine, TokenKind::End]
    );
    assert_eq!(tokens[1].text, "and more");
    assert_eq!(tokens[1].column, 11);
}

#[test]
fn line_endings_normalize() {
    let unix = "{t: A}\n[C]la\n\nend";
    let windows = "{t: A}\r\n[C]la\r\n\r\nend";
    let classic = "{t: A}\r[C]la\r\rend";

    let expected = tokenize(unix);
    assert_eq!(tokenize(&normalize(windows)), expected);
    assert_eq!(tokenize(&normalize(classic)), expected);

    assert!(matches!(normalize(unix), Cow::Borrowed(_)));
}

#[test]
fn columns_count_characters() {
    let tokens = tokenize("{t: Añejo} x");
    assert_eq!(tokens[1].kind, TokenKind::BodyLine);
    // eleven characters precede the x, even though ñ is two bytes
    assert_eq!(tokens[1].column, 12);
}
