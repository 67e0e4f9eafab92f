//! Positional-argument interpolation for event messages
//!
//! Messages act as printf-style `%` templates when positional arguments are
//! supplied. Supported specifiers: `%s` (any value), `%d`/`%i` (integers;
//! bools count as 0/1), `%f` (floats, integers widen), `%x` (integers,
//! lowercase hex), `%%` (literal percent). Width and precision flags are
//! not supported. Interpolation is only attempted when arguments are
//! present, so argument-free messages may contain literal `%` characters.

use super::error::{LogError, Result};
use super::value::Value;
use std::fmt::Write;

/// Interpolate `args` into `template`
///
/// Any count or type mismatch is a caller error and surfaces as
/// `FormatMismatch`; the caller must not have started any log work yet.
pub fn interpolate(template: &str, args: &[Value]) -> Result<String> {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut next_arg = 0usize;
    let mut chars = template.chars();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }

        let spec = chars.next().ok_or_else(|| {
            LogError::format_mismatch(template, "incomplete format specifier at end of message")
        })?;

        if spec == '%' {
            out.push('%');
            continue;
        }

        let arg = args.get(next_arg).ok_or_else(|| {
            LogError::format_mismatch(template, "not enough arguments for format message")
        })?;
        next_arg += 1;

        match spec {
            's' => {
                let _ = write!(out, "{}", arg);
            }
            'd' | 'i' => match arg {
                Value::Int(i) => {
                    let _ = write!(out, "{}", i);
                }
                Value::Bool(b) => {
                    let _ = write!(out, "{}", *b as i64);
                }
                other => {
                    return Err(LogError::format_mismatch(
                        template,
                        format!("argument {} is not an integer: {}", next_arg, other),
                    ));
                }
            },
            'f' => match arg {
                Value::Float(f) => {
                    let _ = write!(out, "{:.6}", f);
                }
                Value::Int(i) => {
                    let _ = write!(out, "{:.6}", *i as f64);
                }
                other => {
                    return Err(LogError::format_mismatch(
                        template,
                        format!("argument {} is not a number: {}", next_arg, other),
                    ));
                }
            },
            'x' => match arg {
                Value::Int(i) => {
                    let _ = write!(out, "{:x}", i);
                }
                other => {
                    return Err(LogError::format_mismatch(
                        template,
                        format!("argument {} is not an integer: {}", next_arg, other),
                    ));
                }
            },
            other => {
                return Err(LogError::format_mismatch(
                    template,
                    format!("unsupported format character '{}'", other),
                ));
            }
        }
    }

    if next_arg < args.len() {
        return Err(LogError::format_mismatch(
            template,
            "not all arguments converted during message formatting",
        ));
    }

    Ok(out)
}
