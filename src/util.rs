//! Small string helpers shared by the resolver, compiler and middlewares.

use std::borrow::Cow;

/// Convert a camelCase identifier to kebab-case.
///
/// A dash is inserted before an uppercase letter that follows a lowercase
/// letter or a digit, then the whole string is lowercased:
/// `marginTop` → `margin-top`, `WebkitBox` → `webkit-box`.
pub fn to_kebab_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev: Option<char> = None;

    for c in input.chars() {
        if c.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            out.push('-');
        }
        out.push(c.to_ascii_lowercase());
        prev = Some(c);
    }

    out
}

/// Format a number the way a template literal would print it.
///
/// Integral values carry no fractional part (`16`, not `16.0`), negative
/// zero prints as `0`. Magnitudes outside `[1e-6, 1e21)` use exponent form.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        // Exponent form: `1e+21`, `1.5e-7`.
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    format!("{value}")
}

/// Whether `token` is a bare number: optional minus sign, digits with an
/// optional decimal point, no unit (`2`, `-1`, `1.5`, `.5`).
pub fn is_plain_number(token: &str) -> bool {
    let unsigned = token.strip_prefix('-').unwrap_or(token);
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

    match unsigned.split_once('.') {
        None => !unsigned.is_empty() && all_digits(unsigned),
        Some((int, frac)) => all_digits(int) && !frac.is_empty() && all_digits(frac),
    }
}

/// Multiply a bare number token by `multiplier` and append `px`.
///
/// Returns `None` when the token is not a plain number.
pub fn scale_to_px(token: &str, multiplier: f64) -> Option<String> {
    if !is_plain_number(token) {
        return None;
    }
    let value: f64 = token.parse().ok()?;
    Some(format!("{}px", format_number(value * multiplier)))
}

/// Remove `/* */` block comments and `//` line comments.
///
/// Quoted strings are copied verbatim, and `//` inside parentheses is kept so
/// `url(https://...)` survives.
pub fn strip_comments(css: &str) -> Cow<'_, str> {
    if !css.contains("/*") && !css.contains("//") {
        return Cow::Borrowed(css);
    }

    let mut out = String::with_capacity(css.len());
    let mut chars = css.chars().peekable();
    let mut quote: Option<char> = None;
    let mut paren_depth = 0usize;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => {
                quote = Some(c);
                out.push(c);
            }
            '(' => {
                paren_depth += 1;
                out.push(c);
            }
            ')' => {
                paren_depth = paren_depth.saturating_sub(1);
                out.push(c);
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for inner in chars.by_ref() {
                    if prev == '*' && inner == '/' {
                        break;
                    }
                    prev = inner;
                }
            }
            '/' if paren_depth == 0 && chars.peek() == Some(&'/') => {
                for inner in chars.by_ref() {
                    if inner == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            _ => out.push(c),
        }
    }

    Cow::Owned(out)
}

/// Trim and collapse runs of whitespace to a single space, leaving quoted
/// strings untouched.
pub fn collapse_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut quote: Option<char> = None;
    let mut pending_space = false;

    for c in input.trim().chars() {
        if let Some(q) = quote {
            out.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }

        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        if c == '"' || c == '\'' {
            quote = Some(c);
        }
        out.push(c);
    }

    out
}

/// Split on commas that are not nested in parentheses, brackets or quotes.
pub fn split_top_level_commas(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);

    parts
}

/// Run `f` with a subscriber that records `WARN` events, returning them as
/// formatted lines.
#[cfg(test)]
pub(crate) fn capture_warnings<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let buffer = Buffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    let warnings = output
        .lines()
        .filter(|line| line.contains("WARN"))
        .map(str::to_string)
        .collect();
    (result, warnings)
}
