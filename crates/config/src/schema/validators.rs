//! Raw-string parsers behind each field kind.
//!
//! Each parser takes the raw variable value and returns the cleaned JSON value
//! or a short human-readable message. Messages never echo the raw input, since
//! the input may be a secret.

use regex::Regex;
use serde_json::{Number, Value};
use std::net::IpAddr;
use std::sync::OnceLock;

pub(crate) fn parse_str(raw: &str) -> Result<Value, String> {
    Ok(Value::String(raw.to_string()))
}

pub(crate) fn parse_bool(raw: &str) -> Result<Value, String> {
    match raw {
        "true" | "t" | "yes" | "on" | "1" => Ok(Value::Bool(true)),
        "false" | "f" | "no" | "off" | "0" => Ok(Value::Bool(false)),
        _ => Err("must be a boolean (true/false, yes/no, on/off, 1/0)".to_string()),
    }
}

pub(crate) fn parse_num(raw: &str) -> Result<Value, String> {
    let number: f64 = raw
        .parse()
        .map_err(|_| "must be a number".to_string())?;
    if !number.is_finite() {
        return Err("must be a finite number".to_string());
    }
    // Integral values stay integers so `as_i64`/`as_u64` work on the result.
    if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
        return Ok(Value::from(number as i64));
    }
    Number::from_f64(number)
        .map(Value::Number)
        .ok_or_else(|| "must be a finite number".to_string())
}

pub(crate) fn parse_port(raw: &str) -> Result<Value, String> {
    const MESSAGE: &str = "must be a port number between 1 and 65535";
    let port: u16 = raw.parse().map_err(|_| MESSAGE.to_string())?;
    // Reject "+80" and "080": the value must be written canonically.
    if port == 0 || port.to_string() != raw {
        return Err(MESSAGE.to_string());
    }
    Ok(Value::from(port))
}

pub(crate) fn parse_url(raw: &str) -> Result<Value, String> {
    url::Url::parse(raw)
        .map(|_| Value::String(raw.to_string()))
        .map_err(|e| format!("must be an absolute URL: {e}"))
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(
            r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
        )
        .expect("email pattern is valid")
    })
}

pub(crate) fn parse_email(raw: &str) -> Result<Value, String> {
    if email_regex().is_match(raw) {
        Ok(Value::String(raw.to_string()))
    } else {
        Err("must be an email address".to_string())
    }
}

fn is_host_label(label: &str) -> bool {
    !label.is_empty()
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_alphanumeric() || c == '-')
}

pub(crate) fn parse_host(raw: &str) -> Result<Value, String> {
    let is_ip = raw.parse::<IpAddr>().is_ok();
    let is_domain = !raw.is_empty() && raw.split('.').all(is_host_label);
    if is_ip || is_domain {
        Ok(Value::String(raw.to_string()))
    } else {
        Err("must be a host name or IP address".to_string())
    }
}

pub(crate) fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("must be valid JSON: {e}"))
}
