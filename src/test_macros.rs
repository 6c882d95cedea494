#[macro_export]
macro_rules! reader_from_bytes {
    ($b : expr) => {{
        let buffer: &[u8] = $b.as_bytes();
        std::io::BufReader::new(buffer)
    }};
}

/// Parse some input which is expected to fail, and check the error details and position
#[macro_export]
macro_rules! assert_syntax_error {
    ($input : expr, $details : expr, $position : expr) => {{
        let err = $crate::parser::dom::Parser::default()
            .parse_str($input)
            .unwrap_err();
        assert!(err.is_syntax_error(), "expected a syntax error, got {}", err);
        assert_eq!(err.details, $details);
        assert_eq!(err.position(), Some($position));
    }};
}
