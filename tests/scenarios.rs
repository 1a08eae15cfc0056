//! End-to-end scenarios for matching and replacement
//!
//! Runs the service against the real matcher backends.

use rematch_core::{
    Backend, CapabilityFlags, CompileError, Error, FlagWarning, RegexService, RegexServiceBuilder,
    SessionStatus,
};

fn service(backend: Backend) -> RegexService {
    RegexServiceBuilder::new().with_backend(backend).build().unwrap()
}

/// Scenario A: case-insensitive global alternation replaced by a literal
#[test]
fn test_case_insensitive_global_replace() {
    for backend in [Backend::Pcre2, Backend::RustRegex] {
        let replaced = service(backend)
            .replace_text(
                b"Mr Black is changing his 6 strings on his Brown guitar",
                b"black|Brown",
                b"Blue",
                CapabilityFlags::new().icase().global(),
            )
            .unwrap();

        assert_eq!(
            replaced.output_lossy(),
            "Mr Blue is changing his 6 strings on his Blue guitar"
        );
        assert_eq!(replaced.replacements(), 2);
    }
}

/// Scenario B: backreferences find a digit repeated three times
#[test]
fn test_backreference_match() {
    let session = service(Backend::Pcre2)
        .match_text(b"123 444 567 890", b"(\\d)\\d*\\1\\d*\\1", CapabilityFlags::new().global())
        .unwrap();

    let whole: Vec<_> = session.whole_matches().collect();
    assert_eq!(whole.len(), 1);
    assert_eq!(whole[0].text(), b"444");
    assert_eq!((whole[0].start(), whole[0].end()), (4, 7));

    let groups: Vec<_> = session.groups_of(1).map(|r| r.text().to_vec()).collect();
    assert_eq!(groups, vec![b"4".to_vec()]);
}

#[test]
fn test_backreference_rejected_by_rust_regex() {
    let err = service(Backend::RustRegex)
        .compile(b"(\\d)\\1", CapabilityFlags::new())
        .unwrap_err();
    assert!(matches!(err, CompileError::Syntax { code: None, .. }));
}

/// Scenario C: anchors append or prepend exactly once
#[test]
fn test_anchor_replacements() {
    for backend in [Backend::Pcre2, Backend::RustRegex] {
        let service = service(backend);
        for text in ["", "x", "Mr Black is changing his 6 strings"] {
            for flags in [CapabilityFlags::new(), CapabilityFlags::new().global()] {
                let appended = service.replace_text(text.as_bytes(), b"$", b".", flags).unwrap();
                assert_eq!(appended.output_lossy(), format!("{}.", text));
                assert_eq!(appended.replacements(), 1);

                if !text.is_empty() {
                    let prefixed = service.replace_text(text.as_bytes(), b"^", b"PREFIX ", flags).unwrap();
                    assert_eq!(prefixed.output_lossy(), format!("PREFIX {}", text));
                }
            }
        }

        // Without newline_special the end anchor sits after a trailing newline
        let flags = CapabilityFlags::new().multiline();
        let appended = service.replace_text(b"abc\n", b"$", b".", flags).unwrap();
        assert_eq!(appended.output(), b"abc\n.");
        assert_eq!(appended.replacements(), 1);

        let prefixed = service.replace_text(b"abc\n", b"^", b"PREFIX ", flags).unwrap();
        assert_eq!(prefixed.output(), b"PREFIX abc\n");
    }
}

/// Scenario D: bounded repetition of a word class
#[test]
fn test_bounded_word_class() {
    for backend in [Backend::Pcre2, Backend::RustRegex] {
        let service = service(backend);
        let compiled = service.compile(b"\\w{5,10}", CapabilityFlags::new()).unwrap();
        assert_eq!(compiled.pattern().normalized(), b"[A-Za-z0-9_]{5,10}");

        let session = service.match_all(b"Television", &compiled).unwrap();
        assert_eq!(session.status(), SessionStatus::Matched);
        assert_eq!((session.records()[0].start(), session.records()[0].end()), (0, 10));

        let session = service.match_all(b"Car", &compiled).unwrap();
        assert_eq!(session.status(), SessionStatus::NoMatch);
        assert!(session.is_empty());
    }
}

#[test]
fn test_shorthands_inside_lists() {
    let session = RegexService::with_defaults()
        .match_text(b"+49 170 1234", b"^\\+?[\\d|\\s]+$", CapabilityFlags::new())
        .unwrap();
    assert_eq!(session.records()[0].text(), b"+49 170 1234");
}

#[test]
fn test_caret_matches_again_at_each_read_offset() {
    let session = RegexService::with_defaults()
        .match_text(b"aaa", b"^a", CapabilityFlags::new().global())
        .unwrap();
    assert_eq!(session.occurrence_count(), 3);
}

#[test]
fn test_newline_special_and_multiline() {
    let service = RegexService::with_defaults();

    let per_line = service
        .match_text(b"one\ntwo", b"^two$", CapabilityFlags::new())
        .unwrap();
    assert_eq!(per_line.status(), SessionStatus::Matched);

    let whole_buffer = service
        .match_text(b"one\ntwo", b"^two$", CapabilityFlags::new().multiline())
        .unwrap();
    assert_eq!(whole_buffer.status(), SessionStatus::NoMatch);
    assert!(!whole_buffer.flags().newline_special());
}

#[test]
fn test_basic_syntax_without_extended_default() {
    let service = RegexServiceBuilder::new()
        .with_default_flags(CapabilityFlags::new())
        .build()
        .unwrap();

    let session = service.match_text(b"ab+ab", b"\\(ab\\)+", CapabilityFlags::new()).unwrap();
    assert_eq!(session.records()[0].text(), b"ab+");
    assert_eq!(session.submatch_count(), 1);
}

#[test]
fn test_subexpression_flags() {
    let service = RegexService::with_defaults();

    let whole_only = service
        .match_text(b"k=v", b"(\\w)=(\\w)", CapabilityFlags::new().exclude_subexpressions())
        .unwrap();
    assert_eq!(whole_only.len(), 1);

    let compiled = service
        .compile(
            b"(\\w)=(\\w)",
            CapabilityFlags::new().exclude_subexpressions().only_subexpressions().report_only(),
        )
        .unwrap();
    assert_eq!(
        compiled.warnings(),
        &[FlagWarning::OnlySubexpressionsIgnored, FlagWarning::ReportOnlyIgnored]
    );

    let groups_only = service
        .match_text(b"k=v", b"(\\w)=(\\w)", CapabilityFlags::new().only_subexpressions())
        .unwrap();
    let texts: Vec<_> = groups_only.records().iter().map(|r| r.text().to_vec()).collect();
    assert_eq!(texts, vec![b"k".to_vec(), b"v".to_vec()]);
}

#[test]
fn test_replace_without_whole_matches_reports_no_match() {
    let replaced = RegexService::with_defaults()
        .replace_text(b"k=v", b"(\\w)=", b"x", CapabilityFlags::new().only_subexpressions())
        .unwrap();
    assert_eq!(replaced.output(), b"k=v");
    assert_eq!(replaced.status(), SessionStatus::NoMatch);
}

#[test]
fn test_text_over_limit_is_error() {
    let service = RegexService::with_defaults();
    let text = vec![b'a'; service.config().limits.max_text_length + 1];
    let err = service.match_text(&text, b"a", CapabilityFlags::new()).unwrap_err();
    assert!(matches!(err, Error::Match(_)));
}
