use crate::report::Section;
use crate::types::report::AnalysisReport;
use serde_json::json;

pub fn to_json(report: &AnalysisReport, section: Section) -> Result<String, serde_json::Error> {
    match section {
        Section::All => serde_json::to_string_pretty(report),
        Section::Projects { top } => {
            let limit = top.unwrap_or(report.projects.len());
            let projects = &report.projects[..limit.min(report.projects.len())];
            serde_json::to_string_pretty(&json!({
                "summary": report.summary,
                "projects": projects,
            }))
        }
        Section::Languages => serde_json::to_string_pretty(&json!({
            "languages": report.languages,
            "language_trends": report.language_trends,
            "ecosystem": report.ecosystem,
            "recommendations": report.recommendations,
        })),
        Section::Technologies => serde_json::to_string_pretty(&json!({
            "technologies": report.technologies,
        })),
        Section::Keywords { emerging: true } => serde_json::to_string_pretty(&json!({
            "emerging_keywords": report.emerging_keywords,
        })),
        Section::Keywords { emerging: false } => serde_json::to_string_pretty(&json!({
            "keywords": report.keywords,
        })),
    }
}
