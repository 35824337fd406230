//! Log sanitization: keeps measurement values out of log output.
//!
//! Log lines may carry record fields (`Age=30`, `"BS":7.5`, `heart_rate: 70`)
//! or whole feature vectors when debugging. `SanitizingMakeWriter` rewrites
//! every formatted line before it reaches the sink, replacing the values with
//! `[REDACTED]` while leaving field names visible.
//!
//! Input longer than `VITALRISK_SANITIZE_MAX_BYTES` (default 16 KiB) is
//! truncated before scanning.

use std::io::Write;
use std::sync::OnceLock;

use regex::{Regex, RegexSet};
use tracing_subscriber::fmt::MakeWriter;

const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

const REDACTED: &str = "[REDACTED]";

struct Rule {
    regex: Regex,
    replacement: String,
}

struct Rules {
    set: RegexSet,
    rules: Vec<Rule>,
}

static RULES: OnceLock<Rules> = OnceLock::new();

fn rules() -> &'static Rules {
    RULES.get_or_init(|| {
        let patterns: [(&str, String); 3] = [
            // Named measurement followed by a number: `Age=30`, `"BS":7.5`, `heart_rate: 70`
            (
                r#"(?i)\b(age|systolicbp|diastolicbp|bs|bodytemp|heartrate|systolic_bp|diastolic_bp|body_temp|heart_rate)\b("?\s*[:=]\s*)-?(?:\d+(?:\.\d*)?|NaN|inf)"#,
                format!("${{1}}${{2}}{REDACTED}"),
            ),
            // Debug output of a feature vector
            (r"FeatureVector\(\[[^\]]*\]\)", format!("FeatureVector({REDACTED})")),
            // Debug output of a record's value array
            (r"\bvalues: \[[^\]]*\]", format!("values: {REDACTED}")),
        ];

        let set = RegexSet::new(patterns.iter().map(|(p, _)| *p)).expect("valid regex set");
        let rules = patterns
            .into_iter()
            .map(|(p, replacement)| Rule {
                regex: Regex::new(p).expect("valid regex"),
                replacement,
            })
            .collect();
        Rules { set, rules }
    })
}

fn max_sanitize_bytes() -> usize {
    std::env::var("VITALRISK_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Replace measurement values in `input` with `[REDACTED]`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);
    let rules = rules();

    let mut out = prefix.to_string();
    for idx in rules.set.matches(prefix).into_iter() {
        let rule = &rules.rules[idx];
        out = rule
            .regex
            .replace_all(&out, rule.replacement.as_str())
            .into_owned();
    }

    if truncated {
        out.push_str(" [TRUNCATED]");
        if input.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// `MakeWriter` wrapper that sanitizes each formatted log line.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            pending: Vec::new(),
        }
    }
}

/// Line-buffering writer produced by `SanitizingMakeWriter`.
pub struct SanitizingWriter<W: Write> {
    inner: W,
    pending: Vec<u8>,
}

impl<W: Write> SanitizingWriter<W> {
    fn emit(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(sanitize(&text).as_bytes())
    }

    fn drain_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.emit(&line)?;
        }
        Ok(())
    }
}

impl<W: Write> Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.drain_lines()?;

        // A line with no newline in sight is flushed (sanitized) rather
        // than buffered without bound.
        if self.pending.len() > max_sanitize_bytes().saturating_mul(2) {
            let rest = std::mem::take(&mut self.pending);
            self.emit(&rest)?;
            self.inner.write_all(b"\n")?;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.drain_lines()?;
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.emit(&rest)?;
        }
        self.inner.flush()
    }
}

impl<W: Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_key_value_pairs() {
        let s = sanitize("request Age=30 SystolicBP: 120 BS=7.25");
        assert_eq!(
            s,
            format!("request Age={REDACTED} SystolicBP: {REDACTED} BS={REDACTED}")
        );
    }

    #[test]
    fn test_sanitize_record_json_and_debug() {
        let s = sanitize(r#"record {"Age":30.0,"HeartRate":70.0}"#);
        assert!(!s.contains("30.0"));
        assert!(!s.contains("70.0"));
        assert!(s.contains("\"Age\":[REDACTED]"));

        let s = sanitize("FormInputs { age: 30, systolic_bp: 120, bs: -1.5 }");
        assert!(!s.contains("120"));
        assert!(!s.contains("-1.5"));
    }

    #[test]
    fn test_sanitize_feature_vectors() {
        let s = sanitize("features=FeatureVector([0.1, -2.3, 4.0])");
        assert_eq!(s, "features=FeatureVector([REDACTED])");

        let s = sanitize("InputRecord { values: [30.0, 120.0] }");
        assert_eq!(s, "InputRecord { values: [REDACTED] }");
    }

    #[test]
    fn test_unrelated_text_is_untouched() {
        let line = "Loaded model from \"models/model.json\" (n_classes=3, n_features=6)";
        assert_eq!(sanitize(line), line);
    }

    #[test]
    fn test_truncates_large_inputs() {
        let s = sanitize_with_limit("Age=30 and a long tail", 6);
        assert!(s.ends_with("[TRUNCATED]"));
        assert!(!s.contains("30"));

        let s = sanitize_with_limit("Age=30 and a long tail\n", 6);
        assert_eq!(s, format!("Age={REDACTED} [TRUNCATED]\n"));
    }

    #[test]
    fn test_writer_keeps_line_break_after_truncated_line() {
        let mut sink = Vec::new();
        {
            let mut w = SanitizingWriter {
                inner: &mut sink,
                pending: Vec::new(),
            };
            let mut long = "x".repeat(DEFAULT_SANITIZE_MAX_BYTES + 4000);
            long.push_str("\nnext Age=3\n");
            w.write_all(long.as_bytes()).expect("write");
            w.flush().expect("flush");
        }
        let out = String::from_utf8(sink).expect("utf8");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[TRUNCATED]"));
        assert_eq!(lines[1], format!("next Age={REDACTED}"));
    }

    #[test]
    fn test_writer_sanitizes_lines() {
        let mut sink = Vec::new();
        {
            let mut w = SanitizingWriter {
                inner: &mut sink,
                pending: Vec::new(),
            };
            w.write_all(b"first Age=41\nsecond BodyTemp").expect("write");
            w.write_all(b"=101\n").expect("write");
            w.flush().expect("flush");
        }
        let out = String::from_utf8(sink).expect("utf8");
        assert_eq!(out, "first Age=[REDACTED]\nsecond BodyTemp=[REDACTED]\n");
    }
}
