//! Five-field diagnosis format

use serde::{Deserialize, Serialize};

/// Marker that identifies a final diagnosis in model output
pub const DIAGNOSIS_MARKER: &str = "DIAGNOSIS:";

const ROOT_CAUSE: &str = "ROOT CAUSE:";
const EVIDENCE: &str = "EVIDENCE:";
const FIX: &str = "RECOMMENDED FIX:";
const SEVERITY: &str = "SEVERITY:";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Severity {
    /// Unrecognized values map to `Medium`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "low" => Severity::Low,
            _ => Severity::Medium,
        }
    }
}

/// Parsed diagnosis, sent to clients alongside the raw text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub summary: String,
    pub root_cause: String,
    pub evidence: Vec<String>,
    pub fix: String,
    pub severity: Severity,
    pub raw: String,
}

#[derive(Clone, Copy)]
enum Section {
    RootCause,
    Evidence,
    Fix,
}

impl Diagnosis {
    /// Line-based parse; missing fields stay empty
    pub fn parse(raw: &str) -> Self {
        let mut diagnosis = Diagnosis {
            raw: raw.to_string(),
            ..Default::default()
        };
        if raw.trim().is_empty() {
            diagnosis.summary = "No diagnosis produced".to_string();
            return diagnosis;
        }

        let mut section: Option<Section> = None;

        for line in raw.lines() {
            if let Some(rest) = line.strip_prefix(DIAGNOSIS_MARKER) {
                diagnosis.summary = rest.trim().to_string();
                section = None;
            } else if let Some(rest) = line.strip_prefix(ROOT_CAUSE) {
                diagnosis.root_cause = rest.trim().to_string();
                section = Some(Section::RootCause);
            } else if let Some(rest) = line.strip_prefix(EVIDENCE) {
                push_evidence(&mut diagnosis.evidence, rest);
                section = Some(Section::Evidence);
            } else if let Some(rest) = line.strip_prefix(FIX) {
                diagnosis.fix = rest.trim().to_string();
                section = Some(Section::Fix);
            } else if let Some(rest) = line.strip_prefix(SEVERITY) {
                diagnosis.severity = Severity::parse(rest);
                section = None;
            } else if !line.trim().is_empty() {
                match section {
                    Some(Section::Evidence) => push_evidence(&mut diagnosis.evidence, line),
                    Some(Section::RootCause) => append_line(&mut diagnosis.root_cause, line),
                    Some(Section::Fix) => append_line(&mut diagnosis.fix, line),
                    None => {}
                }
            }
        }

        diagnosis
    }
}

fn push_evidence(evidence: &mut Vec<String>, line: &str) {
    let item = line.trim_start();
    let item = item
        .strip_prefix('-')
        .or_else(|| item.strip_prefix('*'))
        .unwrap_or(item)
        .trim();
    if !item.is_empty() {
        evidence.push(item.to_string());
    }
}

fn append_line(field: &mut String, line: &str) {
    if !field.is_empty() {
        field.push(' ');
    }
    field.push_str(line.trim());
}

/// Whether model output contains a final diagnosis
pub fn has_marker(text: &str) -> bool {
    text.contains(DIAGNOSIS_MARKER)
}

/// Diagnosis reported when the iteration cap ends an investigation
pub fn max_iterations_text() -> String {
    "DIAGNOSIS: Investigation incomplete\n\
     ROOT CAUSE: Agent reached maximum iterations without a conclusive diagnosis.\n\
     EVIDENCE:\n\
     - Max iterations reached\n\
     RECOMMENDED FIX: Review the investigation steps above and check container logs manually.\n\
     SEVERITY: medium"
        .to_string()
}

/// Diagnosis reported when the wall-clock budget ends an investigation
pub fn timeout_text(limit_secs: u64) -> String {
    format!(
        "DIAGNOSIS: Investigation incomplete\n\
         ROOT CAUSE: Investigation hit the {}s time limit before reaching a conclusive diagnosis.\n\
         EVIDENCE:\n\
         - Investigation timeout reached\n\
         RECOMMENDED FIX: Review the investigation steps above and check container logs manually.\n\
         SEVERITY: medium",
        limit_secs
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_diagnosis() {
        let raw = "Looking at the evidence.\n\
                   DIAGNOSIS: Container killed by OOM\n\
                   ROOT CAUSE: The JVM heap exceeds the memory limit\n\
                   set in the compose file.\n\
                   EVIDENCE:\n\
                   - State.OOMKilled is true\n\
                   * exit code 137\n\
                   RECOMMENDED FIX: Raise mem_limit to 1g\n\
                   or cap -Xmx.\n\
                   SEVERITY: HIGH";
        let d = Diagnosis::parse(raw);
        assert_eq!(d.summary, "Container killed by OOM");
        assert_eq!(
            d.root_cause,
            "The JVM heap exceeds the memory limit set in the compose file."
        );
        assert_eq!(d.evidence, vec!["State.OOMKilled is true", "exit code 137"]);
        assert_eq!(d.fix, "Raise mem_limit to 1g or cap -Xmx.");
        assert_eq!(d.severity, Severity::High);
        assert_eq!(d.raw, raw);
    }

    #[test]
    fn test_unknown_severity_is_medium() {
        assert_eq!(Diagnosis::parse("DIAGNOSIS: x\nSEVERITY: urgent").severity, Severity::Medium);
        assert_eq!(Diagnosis::parse("DIAGNOSIS: x").severity, Severity::Medium);
    }

    #[test]
    fn test_empty_input() {
        let d = Diagnosis::parse("   ");
        assert_eq!(d.summary, "No diagnosis produced");
        assert!(d.evidence.is_empty());
    }

    #[test]
    fn test_synthesized_texts_parse() {
        let d = Diagnosis::parse(&max_iterations_text());
        assert_eq!(d.summary, "Investigation incomplete");
        assert!(d.root_cause.contains("maximum iterations"));
        assert_eq!(d.evidence, vec!["Max iterations reached"]);
        assert_eq!(d.severity, Severity::Medium);

        let d = Diagnosis::parse(&timeout_text(60));
        assert!(d.root_cause.contains("60s time limit"));
        assert_eq!(d.severity, Severity::Medium);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(Diagnosis::parse("DIAGNOSIS: a\nROOT CAUSE: b")).unwrap();
        assert_eq!(json["rootCause"], "b");
        assert_eq!(json["severity"], "medium");
    }
}
