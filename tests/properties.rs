
use alba_lexer::TokenKind;
use proptest::prelude::*;
use test_utils::new_lexer;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]
    #[test]
    fn tokens_cover_input_exactly(s in ".*") {
        let lexer = new_lexer();
        let mut pos = 0usize;
        let mut rebuilt = String::with_capacity(s.len());

        for token in lexer.tokenize(&s) {
            prop_assert!(!token.text.is_empty(), "empty token at {pos} input={s:?}");
            prop_assert_eq!(token.start, pos, "gap or overlap before {:?} input={:?}", token, s);
            pos = token.end();
            rebuilt.push_str(token.text);
        }

        prop_assert_eq!(pos, s.len());
        prop_assert_eq!(rebuilt, s);
    }

    #[test]
    fn token_count_bounded_by_length(s in "[ -~\n\t{}λ-]{0,200}") {
        let count = new_lexer().tokenize(&s).count();
        prop_assert!(count <= s.len(), "{count} tokens for {} bytes", s.len());
    }

    #[test]
    fn newline_closes_nothing_inside_comment(body in "[a-z \n]{0,40}") {
        let source = format!("{{-{body}");
        let lexer = new_lexer();
        prop_assert!(lexer.tokenize(&source).all(|t| t.kind == TokenKind::CommentMultiline));
    }

    #[test]
    fn error_tokens_never_appear_for_alba(s in "\\PC*") {
        // The root state ends in a catch-all rule and the comment state
        // accepts every character, so the fallback never fires.
        prop_assert!(new_lexer().tokenize(&s).all(|t| t.kind != TokenKind::Error));
    }
}
