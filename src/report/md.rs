use crate::report::Section;
use crate::types::report::{AnalysisReport, ProjectRow};

pub fn to_markdown(report: &AnalysisReport, section: Section) -> String {
    let mut output = String::new();
    match section {
        Section::All => {
            output.push_str("# Open Source Ecosystem Report\n\n");
            output.push_str(&format!("Generated: {}\n\n", report.generated_at));
            summary(&mut output, report);
            projects(&mut output, &report.projects);
            languages(&mut output, report);
            technologies(&mut output, report);
            keywords(&mut output, report, false);
            keywords(&mut output, report, true);
        }
        Section::Projects { top } => {
            let limit = top.unwrap_or(report.projects.len()).min(report.projects.len());
            summary(&mut output, report);
            projects(&mut output, &report.projects[..limit]);
        }
        Section::Languages => languages(&mut output, report),
        Section::Technologies => technologies(&mut output, report),
        Section::Keywords { emerging } => keywords(&mut output, report, emerging),
    }
    output
}

fn summary(output: &mut String, report: &AnalysisReport) {
    let summary = &report.summary;
    output.push_str("## Summary\n\n");
    output.push_str(&format!("- projects: {}\n", summary.total_projects));
    output.push_str(&format!("- total stars: {:.0}\n", summary.total_stars));
    output.push_str(&format!(
        "- average influence: {:.2}\n",
        summary.avg_influence_score
    ));
    match &summary.top_language {
        Some(language) => output.push_str(&format!(
            "- top language: {} ({} projects)\n",
            language, summary.top_language_count
        )),
        None => output.push_str("- top language: none\n"),
    }
    output.push_str(&format!(
        "- star trend: {:.1}% rising, {:.1}% falling\n",
        summary.positive_trend_ratio, summary.negative_trend_ratio
    ));
    output.push_str(&format!(
        "- high impact projects: {}\n",
        summary.high_impact_projects
    ));
    output.push_str(&format!(
        "- unknown language: {}\n\n",
        summary.unknown_language_projects
    ));
}

fn projects(output: &mut String, rows: &[ProjectRow]) {
    output.push_str("## Influence Ranking\n\n");
    if rows.is_empty() {
        output.push_str("- none\n\n");
        return;
    }
    output.push_str("| rank | project | language | influence | tier | stars | stars trend | openrank | position |\n");
    output.push_str("|---:|---|---|---:|---|---:|---:|---:|---|\n");
    for row in rows {
        output.push_str(&format!(
            "| {} | {} | {} | {:.2} | {} | {:.0} | {:+.3} | {:.2} | {} |\n",
            row.rank,
            row.repo_name,
            row.language,
            row.influence_score,
            row.influence_tier.as_str(),
            row.stars.latest,
            row.stars.trend,
            row.openrank.latest,
            row.market_position.as_str()
        ));
    }
    output.push('\n');
}

fn languages(output: &mut String, report: &AnalysisReport) {
    output.push_str("## Languages\n\n");
    if report.languages.is_empty() {
        output.push_str("- none\n\n");
    } else {
        output.push_str("| language | projects | avg stars | avg influence | maturity | stage |\n");
        output.push_str("|---|---:|---:|---:|---:|---|\n");
        for stats in &report.languages {
            output.push_str(&format!(
                "| {} | {} | {:.0} | {:.2} | {:.3} | {} |\n",
                stats.language,
                stats.project_count,
                stats.avg_stars,
                stats.avg_influence_score,
                stats.maturity_score,
                stats.stage
            ));
        }
        output.push('\n');
    }

    output.push_str("## Ecosystem\n\n");
    output.push_str(&format!(
        "Balance score: {:.3}\n\n",
        report.ecosystem.balance_score
    ));
    for trend in &report.language_trends {
        output.push_str(&format!(
            "- {}: growth {:+.1}% ({})\n",
            trend.language,
            trend.growth_rate * 100.0,
            trend.maturity_stage
        ));
    }
    if !report.language_trends.is_empty() {
        output.push('\n');
    }

    output.push_str("## Recommendations\n\n");
    if report.recommendations.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for rec in &report.recommendations {
            output.push_str(&format!(
                "- {} ({}, {}): {}. {}\n",
                rec.technology,
                rec.kind.as_str(),
                rec.priority.as_str(),
                rec.reason,
                rec.action
            ));
        }
        output.push('\n');
    }
}

fn technologies(output: &mut String, report: &AnalysisReport) {
    output.push_str("## Technologies\n\n");
    if report.technologies.is_empty() {
        output.push_str("- none\n\n");
        return;
    }
    output.push_str("| technology | category | stage | risk | growth | projects | recommendation | 6m | 12m |\n");
    output.push_str("|---|---|---|---|---:|---:|---|---|---|\n");
    for row in &report.technologies {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {:+.2} | {} | {} | {} | {} |\n",
            row.technology,
            row.category,
            row.maturity_stage,
            row.risk_level,
            row.growth_rate,
            row.community_size,
            row.recommendation,
            row.prediction_6m,
            row.prediction_12m
        ));
    }
    output.push('\n');
}

fn keywords(output: &mut String, report: &AnalysisReport, emerging: bool) {
    if emerging {
        output.push_str("## Emerging Keywords\n\n");
        if report.emerging_keywords.is_empty() {
            output.push_str("- none\n\n");
            return;
        }
        for keyword in &report.emerging_keywords {
            output.push_str(&format!(
                "- {} (tfidf {:.3}, frequency {}, confidence {:.1})\n",
                keyword.keyword, keyword.tfidf_score, keyword.frequency, keyword.confidence
            ));
        }
        output.push('\n');
        return;
    }

    output.push_str("## Keywords\n\n");
    if report.keywords.is_empty() {
        output.push_str("- none\n\n");
        return;
    }
    output.push_str("| keyword | tfidf | frequency | documents | tech |\n");
    output.push_str("|---|---:|---:|---:|---|\n");
    for keyword in &report.keywords {
        output.push_str(&format!(
            "| {} | {:.3} | {} | {} | {} |\n",
            keyword.keyword,
            keyword.tfidf_score,
            keyword.frequency,
            keyword.doc_frequency,
            if keyword.is_tech_keyword { "yes" } else { "no" }
        ));
    }
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixture;
    use crate::types::report::{Priority, Recommendation, RecommendationKind};

    #[test]
    fn full_markdown_contains_sections() {
        let rendered = to_markdown(&fixture::report(), Section::All);
        assert!(rendered.contains("# Open Source Ecosystem Report"));
        assert!(rendered.contains("## Influence Ranking"));
        assert!(rendered.contains("## Languages"));
        assert!(rendered.contains("## Technologies"));
        assert!(rendered.contains("## Keywords"));
        assert!(rendered.contains("| 1 | kubernetes/kubernetes | Go |"));
    }

    #[test]
    fn projects_section_truncates_to_top() {
        let rendered = to_markdown(&fixture::report(), Section::Projects { top: Some(2) });
        assert!(rendered.contains("| 2 | rust-lang/rust |"));
        assert!(!rendered.contains("someone/dotfiles"));
        assert!(!rendered.contains("## Technologies"));
    }

    #[test]
    fn technologies_section_lists_rule_rows() {
        let rendered = to_markdown(&fixture::report(), Section::Technologies);
        assert!(rendered.contains("| Kubernetes |"));
        assert!(rendered.contains("| Rust |"));
    }

    #[test]
    fn recommendations_use_snake_case_labels() {
        let mut report = fixture::report();
        report.recommendations.push(Recommendation {
            kind: RecommendationKind::TechnologyAdoption,
            technology: "Go".to_string(),
            priority: Priority::High,
            reason: "Go is growing fast".to_string(),
            action: "Consider Go for new services".to_string(),
        });

        let rendered = to_markdown(&report, Section::Languages);
        assert!(rendered.contains("- Go (technology_adoption, high): Go is growing fast."));
        assert!(!rendered.contains("TechnologyAdoption"));
    }
}
