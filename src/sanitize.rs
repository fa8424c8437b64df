// src/sanitize.rs

/// Upper bound on the number of characters kept from a user message.
pub const MAX_INPUT_CHARS: usize = 1000;

/// Normalizes user text before it is matched or embedded into a prompt.
///
/// ASCII control characters are dropped outright, whitespace runs collapse to a
/// single space, and the result is trimmed and cut at [`MAX_INPUT_CHARS`].
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len().min(MAX_INPUT_CHARS * 4));
    let mut pending_space = false;
    let mut kept = 0;

    for c in text.chars().filter(|c| !c.is_ascii_control()) {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            if kept + 1 >= MAX_INPUT_CHARS {
                break;
            }
            out.push(' ');
            kept += 1;
            pending_space = false;
        }
        if kept == MAX_INPUT_CHARS {
            break;
        }
        out.push(c);
        kept += 1;
    }

    out
}
