//! Time builtins.
//!
//! Formats are either a unix unit (`unix`, `unix_milli`, `unix_micro`,
//! `unix_nano`) or a layout written as the reference instant
//! `2006-01-02 15:04:05`, where each component of that instant stands for
//! the matching field. Layouts are rewritten to chrono format strings.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::errors;
use crate::object::format_time_rfc3339;
use crate::registry::{FunctionEntry, FunctionRegistry, TypeSet};
use crate::{Object, RuntimeError};

use super::{arity, lift, BuiltinResult};

const RFC3339: &str = "2006-01-02T15:04:05Z07:00";
const RFC3339_NANO: &str = "2006-01-02T15:04:05.999999999Z07:00";

pub(super) fn register(registry: &mut FunctionRegistry) {
    registry.register_std(
        FunctionEntry::new("now", |_: &[Object]| Object::Time(Utc::now()))
            .describe("The current UTC instant.")
            .returns("time", TypeSet::TIME)
            .tagged(&["time"])
            .example("null", "set @out = type(now())", r#""time""#),
    );
    registry.register_std(
        FunctionEntry::new("time", lift(time))
            .describe(
                "Convert unix seconds (integer or fractional) or an RFC 3339 string to a time.",
            )
            .arg("value", TypeSet::NUMBER | TypeSet::STRING)
            .returns("time", TypeSet::TIME)
            .tagged(&["time", "conversion"])
            .example("1700000000", "set @out = time(@in)", r#""2023-11-14T22:13:20Z""#)
            .example(
                r#""2023-11-14T23:13:20+01:00""#,
                "set @out = time(@in)",
                r#""2023-11-14T22:13:20Z""#,
            ),
    );
    registry.register_std(
        FunctionEntry::new("parse_time", lift(parse_time))
            .describe("Parse a time using a unix unit or a reference-time layout.")
            .arg("value", TypeSet::NUMBER | TypeSet::STRING)
            .arg("format", TypeSet::STRING)
            .returns("time", TypeSet::TIME)
            .tagged(&["time", "conversion"])
            .example(
                r#""2024-03-05""#,
                r#"set @out = parse_time(@in, "2006-01-02")"#,
                r#""2024-03-05T00:00:00Z""#,
            )
            .example(
                "1700000000000",
                r#"set @out = parse_time(@in, "unix_milli")"#,
                r#""2023-11-14T22:13:20Z""#,
            ),
    );
    registry.register_std(
        FunctionEntry::new("format_time", lift(format_time))
            .describe("Format a time using a unix unit or a reference-time layout.")
            .arg("time", TypeSet::TIME)
            .arg("format", TypeSet::STRING)
            .returns("string", TypeSet::STRING)
            .tagged(&["time", "conversion"])
            .example(
                "1700000000",
                r#"set @out = format_time(time(@in), "Jan 2, 2006 at 15:04")"#,
                r#""Nov 14, 2023 at 22:13""#,
            )
            .example(
                "1700000000",
                r#"set @out = format_time(time(@in), "unix_milli")"#,
                r#""1700000000000""#,
            ),
    );
}

fn time(args: &[Object]) -> BuiltinResult {
    let [value] = args else {
        return Err(arity("time", 1, args));
    };
    match value {
        Object::Integer(_) | Object::Float(_) => from_unix(value, Unit::Seconds),
        Object::String(s) => {
            let text = s.trim();
            if let Ok(seconds) = text.parse::<i64>() {
                return from_unix(&Object::Integer(seconds), Unit::Seconds);
            }
            if let Ok(seconds) = text.parse::<f64>() {
                return from_unix(&Object::Float(seconds), Unit::Seconds);
            }
            DateTime::parse_from_rfc3339(text)
                .map(|t| Object::Time(t.with_timezone(&Utc)))
                .map_err(|_| errors::cannot_parse(text, "time"))
        }
        other => Err(errors::invalid_argument_type("time", "value", other.type_of())),
    }
}

fn parse_time(args: &[Object]) -> BuiltinResult {
    let [value, Object::String(format)] = args else {
        return Err(arity("parse_time", 2, args));
    };
    if let Some(unit) = Unit::from_name(format) {
        return match value {
            Object::String(s) => {
                let text = s.trim();
                let number = text
                    .parse::<i64>()
                    .map(Object::Integer)
                    .or_else(|_| text.parse::<f64>().map(Object::Float))
                    .map_err(|_| errors::cannot_parse(text, "time"))?;
                from_unix(&number, unit)
            }
            number => from_unix(number, unit),
        };
    }
    let text = match value {
        Object::String(s) => s.as_str().to_string(),
        other => other.to_string(),
    };
    parse_layout(&text, format).map(Object::Time)
}

fn format_time(args: &[Object]) -> BuiltinResult {
    let [Object::Time(time), Object::String(format)] = args else {
        return Err(arity("format_time", 2, args));
    };
    let text = match Unit::from_name(format) {
        Some(Unit::Seconds) => time.timestamp().to_string(),
        Some(Unit::Millis) => time.timestamp_millis().to_string(),
        Some(Unit::Micros) => time.timestamp_micros().to_string(),
        Some(Unit::Nanos) => time
            .timestamp_nanos_opt()
            .ok_or_else(errors::time_out_of_range)?
            .to_string(),
        None => format_layout(*time, format)?,
    };
    Ok(Object::string(text))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Unit {
    Seconds,
    Millis,
    Micros,
    Nanos,
}

impl Unit {
    fn from_name(name: &str) -> Option<Unit> {
        match name {
            "unix" => Some(Unit::Seconds),
            "unix_milli" => Some(Unit::Millis),
            "unix_micro" => Some(Unit::Micros),
            "unix_nano" => Some(Unit::Nanos),
            _ => None,
        }
    }

    const fn per_second(self) -> i64 {
        match self {
            Unit::Seconds => 1,
            Unit::Millis => 1_000,
            Unit::Micros => 1_000_000,
            Unit::Nanos => 1_000_000_000,
        }
    }
}

/// An integer or fractional count of `unit`s since the unix epoch.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "sub-second nanos are in 0..1e9 and out-of-range seconds saturate then fail in chrono"
)]
fn from_unix(value: &Object, unit: Unit) -> BuiltinResult {
    let per_second = unit.per_second();
    let time = match value {
        Object::Integer(n) => {
            let seconds = n.div_euclid(per_second);
            let nanos = n.rem_euclid(per_second) * (1_000_000_000 / per_second);
            Utc.timestamp_opt(seconds, nanos as u32).single()
        }
        Object::Float(f) => {
            let total = f / per_second as f64;
            if total.is_finite() {
                let seconds = total.floor();
                let nanos = ((total - seconds) * 1e9).round().min(999_999_999.0);
                Utc.timestamp_opt(seconds as i64, nanos as u32).single()
            } else {
                None
            }
        }
        other => {
            return Err(errors::invalid_argument_type(
                "time",
                "value",
                other.type_of(),
            ))
        }
    };
    time.map(Object::Time).ok_or_else(errors::time_out_of_range)
}

fn parse_layout(text: &str, layout: &str) -> Result<DateTime<Utc>, RuntimeError> {
    let parse_error = || errors::cannot_parse(text, &format!("time with layout {layout:?}"));
    if layout == RFC3339 || layout == RFC3339_NANO {
        return DateTime::parse_from_rfc3339(text)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|_| parse_error());
    }
    let format = layout_to_chrono(layout);
    if format.contains("%z") || format.contains("%:z") {
        return DateTime::parse_from_str(text, &format)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|_| parse_error());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, &format) {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(text, &format)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(parse_error)
}

fn format_layout(time: DateTime<Utc>, layout: &str) -> Result<String, RuntimeError> {
    if layout == RFC3339 {
        return Ok(time.to_rfc3339_opts(chrono::SecondsFormat::Secs, true));
    }
    if layout == RFC3339_NANO {
        return Ok(format_time_rfc3339(time));
    }
    let format = layout_to_chrono(layout);
    let mut out = String::new();
    write!(out, "{}", time.format(&format)).map_err(|_| errors::invalid_time_format(layout))?;
    Ok(out)
}

/// Reference-layout components and their chrono equivalents, longest first
/// where one is a prefix of another.
const LAYOUT_TOKENS: &[(&str, &str)] = &[
    ("January", "%B"),
    ("Monday", "%A"),
    ("Z07:00", "%:z"),
    ("-07:00", "%:z"),
    ("Z0700", "%z"),
    ("-0700", "%z"),
    (".000000000", "%.9f"),
    (".000000", "%.6f"),
    (".000", "%.3f"),
    (".999999999", "%.f"),
    (".999999", "%.f"),
    (".999", "%.f"),
    ("2006", "%Y"),
    ("Jan", "%b"),
    ("Mon", "%a"),
    ("MST", "%Z"),
    ("01", "%m"),
    ("02", "%d"),
    ("_2", "%e"),
    ("03", "%I"),
    ("04", "%M"),
    ("05", "%S"),
    ("06", "%y"),
    ("15", "%H"),
    ("PM", "%p"),
    ("pm", "%P"),
    ("1", "%-m"),
    ("2", "%-d"),
    ("3", "%-I"),
    ("4", "%-M"),
    ("5", "%-S"),
];

/// Rewrite a reference-time layout as a chrono format string.
fn layout_to_chrono(layout: &str) -> String {
    let mut out = String::with_capacity(layout.len() * 2);
    let mut rest = layout;
    'scan: while let Some(c) = rest.chars().next() {
        for (token, spec) in LAYOUT_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(spec);
                rest = tail;
                continue 'scan;
            }
        }
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}
