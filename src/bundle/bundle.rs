use std::ops::Range;

use crate::collections::contiguous::Buffer;

const PRAGMA_ONCE: &[u8] = b"#pragma once";
const ENDIF: &[u8] = b"#endif";
const INCLUDE: &[u8] = b"#include";

/// Where the implementation block goes within a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// After the whole header, which is guarded by `#pragma once`.
    Pragma,
    /// Before the `#endif` at this offset, which closes the include guard.
    BeforeEndif(usize),
    /// After the whole header, which has no guard at all.
    Unguarded,
}

impl Placement {
    /// Scans `header` for a guard. The scan stops at the first `#pragma once`, otherwise the last
    /// `#endif` wins.
    fn find(header: &[u8]) -> Placement {
        let mut last_endif = None;
        let mut i = 0;
        while i < header.len() {
            let rest = &header[i..];
            if rest.starts_with(PRAGMA_ONCE) {
                return Placement::Pragma;
            } else if rest.starts_with(ENDIF) {
                last_endif = Some(i);
                i += ENDIF.len();
            } else {
                i += 1;
            }
        }
        last_endif.map_or(Placement::Unguarded, Placement::BeforeEndif)
    }
}

/// Bundles `header` and `source` into a single header, with the implementation guarded by
/// `#ifdef define`.
///
/// If the header uses `#pragma once`, the implementation block follows the entire header after a
/// blank line. If it uses an include guard, the block is inserted before its last `#endif`, so it
/// stays inside the guard. A header with neither has the block appended.
///
/// The block itself is `#ifdef {define}`, the source and `#endif /* {define} */`, each on their
/// own lines. The first `#include` of the source is expected to include the header being bundled,
/// so that line and the blank lines following it are left out. Later includes are kept.
///
/// # Examples
/// ```
/// # use bricks::bundle::bundle;
/// let header = b"#ifndef MATHS_H\n#define MATHS_H\nint add(int, int);\n#endif\n";
/// let source = b"int add(int a, int b) { return a + b; }\n";
///
/// let bundled = bundle(header, source, "MATHS_IMPLEMENTATION");
/// assert_eq!(
///     std::str::from_utf8(&bundled).unwrap(),
///     "#ifndef MATHS_H\n\
///      #define MATHS_H\n\
///      int add(int, int);\n\
///      #ifdef MATHS_IMPLEMENTATION\n\
///      int add(int a, int b) { return a + b; }\n\
///      #endif /* MATHS_IMPLEMENTATION */\n\
///      #endif\n"
/// );
/// ```
pub fn bundle(header: &[u8], source: &[u8], define: &str) -> Buffer<u8> {
    let cap = header.len() + source.len() + 2 * define.len() + 32;
    let mut out = Buffer::with_start_cap(cap);

    match Placement::find(header) {
        Placement::Pragma => {
            push_bytes(&mut out, header);
            out.push(b'\n');
            push_implementation(&mut out, source, define);
        },
        Placement::BeforeEndif(endif) => {
            let (before, after) = header.split_at(endif);
            push_bytes(&mut out, before);
            end_line(&mut out);
            push_implementation(&mut out, source, define);
            push_bytes(&mut out, after);
        },
        Placement::Unguarded => {
            push_bytes(&mut out, header);
            end_line(&mut out);
            push_implementation(&mut out, source, define);
        },
    }

    out
}

fn push_implementation(out: &mut Buffer<u8>, source: &[u8], define: &str) {
    push_bytes(out, b"#ifdef ");
    push_bytes(out, define.as_bytes());
    out.push(b'\n');

    match self_include(source) {
        Some(include) => {
            push_bytes(out, &source[..include.start]);
            push_bytes(out, &source[include.end..]);
        },
        None => push_bytes(out, source),
    }
    end_line(out);

    push_bytes(out, b"#endif /* ");
    push_bytes(out, define.as_bytes());
    push_bytes(out, b" */\n");
}

/// The span of the first `#include` line in `source`, along with any line breaks after it.
fn self_include(source: &[u8]) -> Option<Range<usize>> {
    let start = source.windows(INCLUDE.len()).position(|window| window == INCLUDE)?;

    let mut end = source[start..]
        .iter()
        .position(|byte| *byte == b'\n')
        .map_or(source.len(), |offset| start + offset);
    while source.get(end) == Some(&b'\n') {
        end += 1;
    }

    Some(start..end)
}

fn push_bytes(out: &mut Buffer<u8>, bytes: &[u8]) {
    out.push_array(bytes.iter().copied());
}

/// Terminates the current line, unless `out` is empty or already at the start of a line.
fn end_line(out: &mut Buffer<u8>) {
    if out.last().is_some_and(|last| *last != b'\n') {
        out.push(b'\n');
    }
}
