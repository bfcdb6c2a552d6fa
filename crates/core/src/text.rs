//! Plain-text cleanup for externally sourced question content.

use entities::ENTITIES;

/// Longest entity body we attempt to decode
/// (`&CounterClockwiseContourIntegral;`).
const MAX_ENTITY_LEN: usize = 32;

/// Decode HTML character references into plain text.
///
/// Handles every HTML5 named entity plus decimal (`&#39;`) and hexadecimal
/// (`&#x27;`) references. Only terminated references are decoded; anything
/// unrecognized is kept verbatim, including a bare `&`.
#[must_use]
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_owned();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];

        let end = tail
            .find(';')
            .filter(|end| *end > 0 && *end <= MAX_ENTITY_LEN)
            .filter(|end| decode_reference(&tail[..*end], &mut out));

        match end {
            Some(end) => rest = &tail[end + 1..],
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Append the expansion of `body` (the text between `&` and `;`) to `out`.
/// Returns `false`, leaving `out` untouched, if it is not a valid reference.
fn decode_reference(body: &str, out: &mut String) -> bool {
    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => num.parse::<u32>().ok(),
        };
        return match code.and_then(char::from_u32) {
            Some(ch) => {
                out.push(ch);
                true
            }
            None => false,
        };
    }

    match named_entity(body) {
        Some(text) => {
            out.push_str(text);
            true
        }
        None => false,
    }
}

/// Look `name` up in the HTML5 table. Some entities expand to two code points.
fn named_entity(name: &str) -> Option<&'static str> {
    ENTITIES
        .iter()
        .find(|entity| {
            entity
                .entity
                .strip_prefix('&')
                .and_then(|rest| rest.strip_suffix(';'))
                == Some(name)
        })
        .map(|entity| entity.characters)
}
