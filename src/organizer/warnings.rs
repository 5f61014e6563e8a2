/// Non-fatal skips are reported as single `NORF_WARN` stderr lines in
/// key=value form, so a shell wrapper can grep for them.
fn sanitize_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_sep = false;
    for ch in value.chars() {
        if ch.is_whitespace() {
            if !out.is_empty() && !prev_sep {
                out.push('_');
                prev_sep = true;
            }
        } else if ch.is_ascii_graphic() || ch.is_alphanumeric() {
            out.push(ch);
            prev_sep = false;
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "na".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn emit(code: &str, stage: &str, subject: &str, outcome: &str) {
    eprintln!(
        "NORF_WARN code={} stage={} subject={} outcome={}",
        sanitize_value(code),
        sanitize_value(stage),
        sanitize_value(subject),
        sanitize_value(outcome),
    );
}
