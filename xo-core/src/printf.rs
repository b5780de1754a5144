//! A small printf-style conversion engine.
//!
//! Rust has no safe `vsnprintf` to delegate to, so this implements just
//! the conversions the grammar in [`crate::parser`] actually produces:
//! `%s`, `%d`/`%i`, `%u`, `%x`/`%X`, `%o`, `%c`, `%f`, and the literal
//! `%%`. Each non-`%%` conversion consumes one [`Value`] from `args`, left
//! to right, mirroring `vsnprintf`'s argument consumption. A conversion
//! whose expected type doesn't match the supplied value falls back to
//! that value's `Display` formatting rather than failing — there is no
//! panicking path through this crate.

use crate::value::Value;

struct Spec {
    left_justify: bool,
    zero_pad: bool,
    width: Option<usize>,
    precision: Option<usize>,
    conv: char,
}

/// Substitute every `%`-conversion in `fmt` against `args`, returning the
/// rendered string. Extra `args` beyond what `fmt` consumes are ignored;
/// a conversion with no corresponding argument renders as empty.
pub fn substitute(fmt: &str, args: &[Value]) -> String {
    substitute_counted(fmt, args).0
}

/// Like [`substitute`], but also returns how many `args` the format
/// string consumed (i.e. its number of non-`%%` conversions). The
/// emission driver uses this to resolve one field's worth of arguments
/// at a time and advance its argument cursor accordingly, rather than
/// requiring a single global pass over the whole format string.
pub fn substitute_counted(fmt: &str, args: &[Value]) -> (String, usize) {
    let mut out = String::with_capacity(fmt.len());
    let mut chars = fmt.char_indices().peekable();
    let bytes = fmt.as_bytes();
    let mut arg_iter = args.iter();
    let mut consumed_count = 0;

    while let Some((i, c)) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        // %% is a literal percent and consumes no argument.
        if bytes.get(i + 1) == Some(&b'%') {
            out.push('%');
            chars.next();
            continue;
        }

        let (spec, consumed) = parse_spec(&fmt[i + 1..]);
        for _ in 0..consumed {
            chars.next();
        }

        match spec {
            Some(spec) => {
                consumed_count += 1;
                let rendered = render(&spec, arg_iter.next());
                out.push_str(&rendered);
            }
            None => {
                // Malformed conversion: emit the '%' literally and keep going.
                out.push('%');
            }
        }
    }

    (out, consumed_count)
}

/// Parse one conversion spec starting just after the `%`. Returns the
/// spec (if well-formed) and the number of `char`s consumed from `rest`.
fn parse_spec(rest: &str) -> (Option<Spec>, usize) {
    let mut left_justify = false;
    let mut zero_pad = false;
    let mut width = None;
    let mut precision = None;
    let mut consumed = 0;
    let chars: Vec<char> = rest.chars().collect();
    let mut idx = 0;

    while let Some(&c) = chars.get(idx) {
        match c {
            '-' => {
                left_justify = true;
                idx += 1;
            }
            '0' if width.is_none() => {
                zero_pad = true;
                idx += 1;
            }
            _ => break,
        }
    }

    let width_start = idx;
    while chars.get(idx).is_some_and(|c| c.is_ascii_digit()) {
        idx += 1;
    }
    if idx > width_start {
        width = chars[width_start..idx].iter().collect::<String>().parse().ok();
    }

    if chars.get(idx) == Some(&'.') {
        idx += 1;
        let prec_start = idx;
        while chars.get(idx).is_some_and(|c| c.is_ascii_digit()) {
            idx += 1;
        }
        precision = chars[prec_start..idx].iter().collect::<String>().parse().ok().or(Some(0));
    }

    match chars.get(idx) {
        Some(&conv @ ('s' | 'd' | 'i' | 'u' | 'x' | 'X' | 'o' | 'c' | 'f')) => {
            consumed = idx + 1;
            (Some(Spec { left_justify, zero_pad, width, precision, conv }), consumed)
        }
        _ => (None, consumed),
    }
}

fn render(spec: &Spec, arg: Option<&Value>) -> String {
    let body = match spec.conv {
        's' => {
            let s = arg.map(|v| v.to_string()).unwrap_or_default();
            match spec.precision {
                Some(p) => s.chars().take(p).collect(),
                None => s,
            }
        }
        'd' | 'i' => {
            let n = as_i64(arg);
            n.to_string()
        }
        'u' => {
            let n = as_u64(arg);
            n.to_string()
        }
        'x' => format!("{:x}", as_u64(arg)),
        'X' => format!("{:X}", as_u64(arg)),
        'o' => format!("{:o}", as_u64(arg)),
        'c' => match arg {
            Some(Value::Int(n)) => char::from_u32(*n as u32).map(String::from).unwrap_or_default(),
            Some(Value::UInt(n)) => char::from_u32(*n as u32).map(String::from).unwrap_or_default(),
            Some(other) => other.to_string(),
            None => String::new(),
        },
        'f' => {
            let n = as_f64(arg);
            let precision = spec.precision.unwrap_or(6);
            format!("{n:.precision$}")
        }
        _ => unreachable!("parse_spec only accepts known conversions"),
    };

    pad(&body, spec)
}

fn pad(body: &str, spec: &Spec) -> String {
    let Some(width) = spec.width else { return body.to_string() };
    let len = body.chars().count();
    if len >= width {
        return body.to_string();
    }
    let fill = width - len;
    if spec.left_justify {
        format!("{body}{}", " ".repeat(fill))
    } else if spec.zero_pad {
        let (sign, rest) = match body.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", body),
        };
        format!("{sign}{}{rest}", "0".repeat(fill))
    } else {
        format!("{}{body}", " ".repeat(fill))
    }
}

fn as_i64(arg: Option<&Value>) -> i64 {
    match arg {
        Some(Value::Int(n)) => *n,
        Some(Value::UInt(n)) => *n as i64,
        Some(Value::Float(n)) => *n as i64,
        Some(Value::Bool(b)) => *b as i64,
        Some(Value::Str(s)) => s.parse().unwrap_or(0),
        None => 0,
    }
}

fn as_u64(arg: Option<&Value>) -> u64 {
    match arg {
        Some(Value::Int(n)) => *n as u64,
        Some(Value::UInt(n)) => *n,
        Some(Value::Float(n)) => *n as u64,
        Some(Value::Bool(b)) => *b as u64,
        Some(Value::Str(s)) => s.parse().unwrap_or(0),
        None => 0,
    }
}

fn as_f64(arg: Option<&Value>) -> f64 {
    match arg {
        Some(Value::Int(n)) => *n as f64,
        Some(Value::UInt(n)) => *n as f64,
        Some(Value::Float(n)) => *n,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Str(s)) => s.parse().unwrap_or(0.0),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_string_and_decimal() {
        assert_eq!(substitute("%s is %d", &[Value::from("gum"), Value::from(42)]), "gum is 42");
    }

    #[test]
    fn width_and_left_justify() {
        assert_eq!(substitute("[%-10s]", &[Value::from("gum")]), "[gum       ]");
        assert_eq!(substitute("[%12u]", &[Value::from(54u32)]), "[          54]");
    }

    #[test]
    fn zero_pad_and_hex() {
        assert_eq!(substitute("%04d", &[Value::from(7)]), "0007");
        assert_eq!(substitute("%x", &[Value::from(255u32)]), "ff");
    }

    #[test]
    fn literal_percent_consumes_no_argument() {
        assert_eq!(substitute("100%% done: %d", &[Value::from(1)]), "100% done: 1");
    }

    #[test]
    fn float_precision() {
        assert_eq!(substitute("%.2f", &[Value::from(3.14159_f64)]), "3.14");
    }

    #[test]
    fn counted_reports_how_many_args_were_used() {
        let (rendered, n) = substitute_counted("%s=%d", &[Value::from("x"), Value::from(1), Value::from(2)]);
        assert_eq!(rendered, "x=1");
        assert_eq!(n, 2);
    }

    #[test]
    fn compound_sku_format_matches_original_unit_test() {
        let args = [Value::from("HRD"), Value::from(212u32)];
        assert_eq!(substitute("%s-000-%u", &args), "HRD-000-212");
    }
}
