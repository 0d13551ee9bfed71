#![cfg(test)]

use std::str;

use super::*;

fn bundle_str(header: &str, source: &str, define: &str) -> String {
    let bundled = bundle(header.as_bytes(), source.as_bytes(), define);
    str::from_utf8(&bundled).expect("inputs are valid UTF-8").to_string()
}

#[test]
fn test_pragma_once_header() {
    let bundled = bundle_str(
        "#pragma once\nvoid greet(void);\n",
        "#include \"greet.h\"\nvoid greet(void) {}\n",
        "GREET_IMPL",
    );
    assert_eq!(
        bundled,
        "#pragma once\nvoid greet(void);\n\n\
         #ifdef GREET_IMPL\n\
         void greet(void) {}\n\
         #endif /* GREET_IMPL */\n",
        "The implementation should follow the header after a blank line."
    );
}

#[test]
fn test_include_guard_uses_last_endif() {
    let header = "#ifndef A_H\n#define A_H\n#ifdef FEATURE\nint f;\n#endif\nint g;\n#endif /* A_H */\n";
    let bundled = bundle_str(header, "int g = 1;\n", "A_IMPL");
    assert_eq!(
        bundled,
        "#ifndef A_H\n#define A_H\n#ifdef FEATURE\nint f;\n#endif\nint g;\n\
         #ifdef A_IMPL\nint g = 1;\n#endif /* A_IMPL */\n\
         #endif /* A_H */\n",
        "The implementation should be inserted before the closing include guard."
    );
}

#[test]
fn test_pragma_after_endif_wins() {
    let bundled = bundle_str("#ifdef X\n#endif\n#pragma once\n", "s\n", "D");
    assert_eq!(bundled, "#ifdef X\n#endif\n#pragma once\n\n#ifdef D\ns\n#endif /* D */\n");
}

#[test]
fn test_unguarded_header() {
    assert_eq!(
        bundle_str("int x;", "int x = 0;", "X_IMPL"),
        "int x;\n#ifdef X_IMPL\nint x = 0;\n#endif /* X_IMPL */\n",
        "Missing trailing newlines should be added around the implementation block."
    );
    assert_eq!(bundle_str("", "", "EMPTY"), "#ifdef EMPTY\n#endif /* EMPTY */\n");
}

#[test]
fn test_endif_without_newline_before() {
    assert_eq!(
        bundle_str("#ifndef H\nint y; #endif", "y", "Y"),
        "#ifndef H\nint y; \n#ifdef Y\ny\n#endif /* Y */\n#endif"
    );
}

#[test]
fn test_self_include_is_removed() {
    let bundled = bundle_str(
        "#ifndef G_H\n#define G_H\nvoid g(void);\n#endif\n",
        "#include \"g.h\"\n\n#include <stdio.h>\nvoid g(void) {}\n",
        "G_IMPL",
    );
    assert!(!bundled.contains("#include \"g.h\""), "The header shouldn't include itself.");
    assert_eq!(
        bundled,
        "#ifndef G_H\n#define G_H\nvoid g(void);\n\
         #ifdef G_IMPL\n#include <stdio.h>\nvoid g(void) {}\n#endif /* G_IMPL */\n\
         #endif\n",
        "Only the first include and the blank lines after it should be dropped."
    );
}

#[test]
fn test_self_include_after_comment() {
    assert_eq!(
        bundle_str("", "/* impl */\n#include \"x.h\"", "X"),
        "#ifdef X\n/* impl */\n#endif /* X */\n",
        "An include on the last line should be removed up to the end of the source."
    );
}
