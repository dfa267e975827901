// SPDX-License-Identifier: MIT OR Apache-2.0

//! Line formatting.
//!
//! A line is a metadata block followed by ` => ` and the message:
//!
//! ```text
//! 2024-12-05 09:30:00.000 [default] [WARNING] [main.rs:42] [Main] main => disk almost full
//! ```
//!
//! The block holds, in order: timestamp, `[logger] [LEVEL]`, `[file:line]`, thread marker
//! and function name.  Each segment can be switched off through
//! [`DisplayOptions`]; when every segment is off the line is the bare message.
//!
//! Messages come from a list of [`Loggable`] values concatenated as-is, or from a `%`
//! template (see [`format_template`]).

use crate::config::DisplayOptions;
use crate::log_record::LogRecord;
use crate::loggable::{Loggable, TypedValue, to_log_string};

const LONG_TIME: &str = "%Y-%m-%d %H:%M:%S%.3f";
const SHORT_TIME: &str = "%H:%M:%S%.3f";
const SEPARATOR: &str = " => ";
/// Upper bound for template widths and precisions.
const MAX_FIELD: usize = 4096;

/// The metadata block for `record`, trimmed, with omitted segments leaving no gaps.
pub fn metadata(record: &LogRecord, options: &DisplayOptions, logger_name: &str) -> String {
    let mut segments: Vec<String> = Vec::with_capacity(5);

    if options.show_time {
        let format = if options.show_long_time {
            LONG_TIME
        } else {
            SHORT_TIME
        };
        segments.push(record.timestamp().format(format).to_string());
    }

    if options.show_level {
        let mut level = String::new();
        if !logger_name.is_empty() {
            level.push('[');
            level.push_str(logger_name);
            level.push_str("] ");
        }
        level.push_str(record.level().tag().unwrap_or_default());
        segments.push(level);
    }

    let site = record.call_site();
    if options.show_file_name {
        let location = if options.show_line_number {
            format!("[{}:{}]", site.file_name(), site.line)
        } else {
            format!("[{}]", site.file_name())
        };
        segments.push(location);
    } else if options.show_line_number {
        segments.push(format!("line:{}", site.line));
    }

    if options.show_thread {
        segments.push(record.thread().to_string());
    }

    if options.show_function_name {
        segments.push(site.function.to_string());
    }

    segments
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The complete line for `record`, without a trailing newline.
pub fn format_line(record: &LogRecord, options: &DisplayOptions, logger_name: &str) -> String {
    let info = metadata(record, options, logger_name);
    let message = record.message();
    if info.is_empty() {
        message
    } else {
        let mut line = String::with_capacity(info.len() + SEPARATOR.len() + message.len());
        line.push_str(&info);
        line.push_str(SEPARATOR);
        line.push_str(&message);
        line
    }
}

/// Concatenates the default textual form of each value, with no separator.
pub fn reduce_values(values: &[&dyn Loggable]) -> String {
    let mut out = String::new();
    for value in values {
        value.log_all(&mut out);
    }
    out
}

/**
Expands a `%` template.

Markers follow the printf shape `%[flags][width][.precision][length]conversion` with flags
`-` `0` `+` and conversions `d i u x X o c f F e E g G s @`.  Each marker takes the next
argument.  A typed argument that fits the conversion is formatted with printf rules
(precision is the minimum digit count for integers, `%g` picks the shorter of `%e` and `%f`);
anything else is substituted with its default textual form.  Widths and precisions are capped
at 4096.

* Text outside markers is copied as-is, `%%` is a literal `%`, and a `%` that does not start
  a marker (such as `% `) is kept.
* With no arguments the template is returned unchanged.
* Markers left over once the arguments run out are kept literally; surplus arguments are
  ignored.

```
use xtiloger::formatter::format_template;
assert_eq!(format_template("%d files in %s", &[&3, &"/tmp"]), "3 files in /tmp");
assert_eq!(format_template("%05.1f%%", &[&2.5f64]), "002.5%");
assert_eq!(format_template("user %d", &[&"anonymous"]), "user anonymous");
```
*/
pub fn format_template(template: &str, args: &[&dyn Loggable]) -> String {
    if args.is_empty() {
        return template.to_string();
    }
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        if let Some(stripped) = after.strip_prefix('%') {
            out.push('%');
            rest = stripped;
            continue;
        }
        match Conversion::parse(after) {
            Some((conversion, consumed)) => {
                match args.next() {
                    Some(arg) => out.push_str(&conversion.render(*arg)),
                    None => {
                        out.push('%');
                        out.push_str(&after[..consumed]);
                    }
                }
                rest = &after[consumed..];
            }
            None => {
                out.push('%');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Conversion {
    left_align: bool,
    zero_pad: bool,
    plus_sign: bool,
    width: usize,
    precision: Option<usize>,
    kind: char,
}

impl Conversion {
    /// Parses the marker body following a `%`, returning it and its length in bytes.
    fn parse(s: &str) -> Option<(Self, usize)> {
        let bytes = s.as_bytes();
        let mut i = 0;
        let mut conversion = Conversion {
            left_align: false,
            zero_pad: false,
            plus_sign: false,
            width: 0,
            precision: None,
            kind: 's',
        };
        while let Some(&b) = bytes.get(i) {
            match b {
                b'-' => conversion.left_align = true,
                b'0' => conversion.zero_pad = true,
                b'+' => conversion.plus_sign = true,
                _ => break,
            }
            i += 1;
        }
        let (width, len) = digits(&bytes[i..]);
        conversion.width = width.unwrap_or(0);
        i += len;
        if bytes.get(i) == Some(&b'.') {
            i += 1;
            let (precision, len) = digits(&bytes[i..]);
            conversion.precision = Some(precision.unwrap_or(0));
            i += len;
        }
        while matches!(bytes.get(i), Some(b'l' | b'h' | b'q' | b'z' | b'j' | b't' | b'L')) {
            i += 1;
        }
        match bytes.get(i) {
            Some(&b) if b"diuxXocfFeEgGs@".contains(&b) => {
                conversion.kind = char::from(b);
                Some((conversion, i + 1))
            }
            _ => None,
        }
    }

    fn render(&self, arg: &dyn Loggable) -> String {
        let (body, numeric) = match self.typed(arg.typed_value()) {
            Some(body) => (body, true),
            None => {
                let mut text = to_log_string(arg);
                if let (Some(max), 's' | '@') = (self.precision, self.kind) {
                    text = text.chars().take(max).collect();
                }
                (text, false)
            }
        };
        self.pad(body, numeric)
    }

    fn typed(&self, value: Option<TypedValue>) -> Option<String> {
        let value = value?;
        let mut body = match (self.kind, value) {
            ('d' | 'i', TypedValue::Signed(n)) => self.integer(n < 0, n.unsigned_abs().to_string()),
            ('d' | 'i' | 'u', TypedValue::Unsigned(n)) => self.integer(false, n.to_string()),
            ('u', TypedValue::Signed(n)) if n >= 0 => self.integer(false, n.to_string()),
            ('x' | 'X' | 'o', TypedValue::Signed(n)) if n >= 0 => {
                self.integer(false, radix(self.kind, n as u128))
            }
            ('x' | 'X' | 'o', TypedValue::Unsigned(n)) => {
                self.integer(false, radix(self.kind, n))
            }
            ('c', TypedValue::Char(c)) => return Some(c.to_string()),
            ('c', TypedValue::Unsigned(n)) => {
                return u32::try_from(n).ok().and_then(char::from_u32).map(String::from);
            }
            ('f' | 'F' | 'e' | 'E' | 'g' | 'G', v) => {
                let x = match v {
                    TypedValue::Float(x) => x,
                    TypedValue::Signed(n) => n as f64,
                    TypedValue::Unsigned(n) => n as f64,
                    TypedValue::Char(_) => return None,
                };
                self.float(x)
            }
            _ => return None,
        };
        if self.plus_sign && self.is_signed() && !body.starts_with('-') {
            body.insert(0, '+');
        }
        Some(body)
    }

    fn is_signed(&self) -> bool {
        matches!(self.kind, 'd' | 'i' | 'f' | 'F' | 'e' | 'E' | 'g' | 'G')
    }

    fn is_integer(&self) -> bool {
        matches!(self.kind, 'd' | 'i' | 'u' | 'x' | 'X' | 'o')
    }

    /// Applies the precision as a minimum digit count; `%.0d` of zero prints nothing.
    fn integer(&self, negative: bool, digits: String) -> String {
        let digits = match self.precision {
            Some(0) if digits == "0" => String::new(),
            Some(p) if digits.len() < p => format!("{}{}", "0".repeat(p - digits.len()), digits),
            _ => digits,
        };
        if negative { format!("-{}", digits) } else { digits }
    }

    fn float(&self, x: f64) -> String {
        let upper = matches!(self.kind, 'F' | 'E' | 'G');
        if !x.is_finite() {
            let text = if x.is_nan() {
                "nan"
            } else if x < 0.0 {
                "-inf"
            } else {
                "inf"
            };
            return if upper { text.to_uppercase() } else { text.to_string() };
        }
        let precision = self.precision.unwrap_or(6);
        let body = match self.kind {
            'e' | 'E' => exponent(&format!("{:.*e}", precision, x)),
            'g' | 'G' => general(x, precision),
            _ => format!("{:.*}", precision, x),
        };
        if upper { body.to_uppercase() } else { body }
    }

    fn pad(&self, body: String, numeric: bool) -> String {
        let len = body.chars().count();
        if len >= self.width {
            return body;
        }
        let fill = self.width - len;
        if self.left_align {
            format!("{}{}", body, " ".repeat(fill))
        } else if self.zero_pad && numeric && !(self.is_integer() && self.precision.is_some()) {
            let (sign, digits) = match body.strip_prefix(['-', '+']) {
                Some(stripped) => body.split_at(body.len() - stripped.len()),
                None => ("", body.as_str()),
            };
            format!("{}{}{}", sign, "0".repeat(fill), digits)
        } else {
            format!("{}{}", " ".repeat(fill), body)
        }
    }
}

/// A run of decimal digits, saturating at [MAX_FIELD].
fn digits(bytes: &[u8]) -> (Option<usize>, usize) {
    let len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if len == 0 {
        return (None, 0);
    }
    let value = bytes[..len].iter().fold(0usize, |acc, b| {
        acc.saturating_mul(10)
            .saturating_add(usize::from(b - b'0'))
            .min(MAX_FIELD)
    });
    (Some(value), len)
}

fn radix(kind: char, n: u128) -> String {
    match kind {
        'x' => format!("{:x}", n),
        'X' => format!("{:X}", n),
        _ => format!("{:o}", n),
    }
}

/**
printf's `%g`: `%e` when the exponent is below -4 or at least the precision, `%f` otherwise,
with trailing zeros removed.  A precision of 0 counts as 1.
*/
fn general(x: f64, precision: usize) -> String {
    let significant = precision.max(1);
    let scientific = format!("{:.*e}", significant - 1, x);
    let exp: i64 = scientific
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);
    if exp < -4 || exp >= significant as i64 {
        let (mantissa, e) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
        exponent(&format!("{}e{}", strip_zeros(mantissa), e))
    } else {
        let decimals = (significant as i64 - 1 - exp).max(0) as usize;
        strip_zeros(&format!("{:.*}", decimals, x)).to_string()
    }
}

fn strip_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Rewrites Rust's `1.5e3` exponent into printf's `1.5e+03`.
fn exponent(s: &str) -> String {
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, magnitude) = match exp.strip_prefix('-') {
                Some(m) => ('-', m),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, magnitude)
        }
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;
    use crate::clock::{Clock, FixedClock};
    use crate::log_record::{CallSite, ThreadMarker};

    fn record(message: &str) -> LogRecord {
        let now = FixedClock::from_ymd_hms(2024, 12, 5, 9, 30, 15).unwrap().now();
        let mut record = LogRecord::new(
            Level::Warning,
            CallSite::new("src/net/socket.rs", 42, "connect"),
            now,
        );
        record.log(message);
        record
    }

    #[test]
    fn all_segments_in_order() {
        let record = record("refused");
        let line = format_line(&record, &DisplayOptions::default(), "net");
        let thread = ThreadMarker::current().to_string();
        assert_eq!(
            line,
            format!("2024-12-05 09:30:15.000 [net] [WARNING] [socket.rs:42] {thread} connect => refused")
        );
    }

    #[test]
    fn short_time() {
        let options = DisplayOptions {
            show_long_time: false,
            show_thread: false,
            ..DisplayOptions::default()
        };
        let line = format_line(&record("x"), &options, "net");
        assert_eq!(line, "09:30:15.000 [net] [WARNING] [socket.rs:42] connect => x");
    }

    #[test]
    fn everything_off_is_bare_message() {
        let line = format_line(&record("just this"), &DisplayOptions::none(), "net");
        assert_eq!(line, "just this");
    }

    #[test]
    fn line_number_fallback_without_file_name() {
        let options = DisplayOptions {
            show_line_number: true,
            ..DisplayOptions::none()
        };
        assert_eq!(format_line(&record("m"), &options, "net"), "line:42 => m");

        let options = DisplayOptions {
            show_file_name: true,
            ..DisplayOptions::none()
        };
        assert_eq!(format_line(&record("m"), &options, "net"), "[socket.rs] => m");
    }

    #[test]
    fn omitted_middle_segments_leave_no_gaps() {
        let options = DisplayOptions {
            show_level: true,
            show_function_name: true,
            ..DisplayOptions::none()
        };
        assert_eq!(
            format_line(&record("m"), &options, ""),
            "[WARNING] connect => m"
        );
    }

    #[test]
    fn values_concatenate() {
        assert_eq!(reduce_values(&[&"a", &1, &'b', &2.5f32]), "a1b2.5");
        assert_eq!(reduce_values(&[]), "");
    }

    #[test]
    fn template_literals_and_markers() {
        assert_eq!(format_template("no args %d", &[]), "no args %d");
        assert_eq!(format_template("lead %s tail", &[&"mid"]), "lead mid tail");
        assert_eq!(format_template("100% sure %d", &[&7]), "100% sure 7");
        assert_eq!(format_template("%d and %d", &[&1]), "1 and %d");
        assert_eq!(format_template("%d", &[&1, &2]), "1");
    }

    #[test]
    fn template_typed_conversions() {
        assert_eq!(format_template("%x/%X/%o", &[&255u8, &255, &8]), "ff/FF/10");
        assert_eq!(format_template("[%5d][%-5d][%+d]", &[&42, &42, &42]), "[   42][42   ][+42]");
        assert_eq!(format_template("%05d", &[&-42]), "-0042");
        assert_eq!(format_template("%.2f", &[&3.14159f64]), "3.14");
        assert_eq!(format_template("%f", &[&1]), "1.000000");
        assert_eq!(format_template("%.2e", &[&1234.5f64]), "1.23e+03");
        assert_eq!(format_template("%c%c", &[&'o', &107u8]), "ok");
        assert_eq!(format_template("%ld items", &[&3u64]), "3 items");
    }

    #[test]
    fn template_general_float() {
        assert_eq!(format_template("%.3g", &[&1234.5f64]), "1.23e+03");
        assert_eq!(format_template("%g", &[&1e20f64]), "1e+20");
        assert_eq!(format_template("%g", &[&3.14f64]), "3.14");
        assert_eq!(format_template("%g", &[&0.0001f64]), "0.0001");
        assert_eq!(format_template("%g", &[&0.00001234f64]), "1.234e-05");
        assert_eq!(format_template("%G", &[&1e-10f64]), "1E-10");
        assert_eq!(format_template("%g", &[&100000]), "100000");
        assert_eq!(format_template("%g", &[&1000000]), "1e+06");
        assert_eq!(format_template("%.0g", &[&0.0f64]), "0");
        assert_eq!(format_template("%f", &[&f64::INFINITY]), "inf");
    }

    #[test]
    fn template_integer_precision() {
        assert_eq!(format_template("%.3d", &[&7]), "007");
        assert_eq!(format_template("%.3d", &[&-7]), "-007");
        assert_eq!(format_template("%5.3d|%-6.4x", &[&42, &255u8]), "  042|00ff  ");
        assert_eq!(format_template("%05.3d", &[&7]), "  007");
        assert_eq!(format_template("[%.0d]", &[&0]), "[]");
        assert_eq!(format_template("%+.2d", &[&5]), "+05");
    }

    #[test]
    fn template_fields_are_capped() {
        assert_eq!(format_template("%999999999d", &[&1]).len(), MAX_FIELD);
        assert_eq!(
            format_template("%99999999999999999999999d", &[&1]).len(),
            MAX_FIELD
        );
        assert_eq!(format_template("%.999999f", &[&1.0f64]).len(), MAX_FIELD + 2);
    }

    #[test]
    fn template_falls_back_to_text() {
        assert_eq!(format_template("%d", &[&"seven"]), "seven");
        assert_eq!(format_template("%@!", &[&Some(3)]), "3!");
        assert_eq!(format_template("[%4s]", &[&"ab"]), "[  ab]");
        assert_eq!(format_template("%.3s", &[&"abcdef"]), "abc");
        assert_eq!(format_template("%x", &[&-1]), "-1");
    }
}
