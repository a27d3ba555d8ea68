//! Turns a [`Recommendation`] into an ordered, output-agnostic report.
use crate::core::engine::{Allocation, Metric, Recommendation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum SectionBody {
    Overview {
        summary: String,
        metrics: Vec<Metric>,
    },
    Allocation(Vec<Allocation>),
    /// Ordered list of steps or suggestions.
    List(Vec<String>),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub intro: Option<String>,
    pub body: SectionBody,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub sections: Vec<Section>,
}

/// Builds the report. The overview is always first; other sections are
/// included only when the recommendation has content for them.
pub fn render(rec: &Recommendation) -> Report {
    let mut sections = vec![Section {
        heading: "Financial Overview".to_string(),
        intro: None,
        body: SectionBody::Overview {
            summary: rec.summary.clone(),
            metrics: rec.metrics.clone(),
        },
    }];

    if !rec.allocation.is_empty() {
        sections.push(Section {
            heading: "Recommended Allocation".to_string(),
            intro: Some("How to distribute your monthly surplus:".to_string()),
            body: SectionBody::Allocation(rec.allocation.clone()),
        });
    }

    if !rec.priorities.is_empty() {
        sections.push(Section {
            heading: "Action Plan".to_string(),
            intro: Some("Follow these steps to achieve your financial goals:".to_string()),
            body: SectionBody::List(rec.priorities.clone()),
        });
    }

    if !rec.investments.is_empty() {
        sections.push(Section {
            heading: "Investment Recommendations".to_string(),
            intro: Some("Based on your risk tolerance and goals:".to_string()),
            body: SectionBody::List(rec.investments.clone()),
        });
    }

    if !rec.timeline.is_empty() {
        sections.push(Section {
            heading: "Timeline".to_string(),
            intro: None,
            body: SectionBody::Text(rec.timeline.clone()),
        });
    }

    Report { sections }
}

impl Report {
    pub fn headings(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.heading.as_str()).collect()
    }

    /// Renders the report as an HTML fragment. All text is escaped.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for section in &self.sections {
            html.push_str("<div class=\"result-section\">\n");
            html.push_str(&format!("  <h4>{}</h4>\n", escape_html(&section.heading)));

            if let SectionBody::Overview { summary, .. } = &section.body {
                html.push_str(&format!("  <p>{}</p>\n", escape_html(summary)));
            }
            if let Some(intro) = &section.intro {
                html.push_str(&format!("  <p>{}</p>\n", escape_html(intro)));
            }

            match &section.body {
                SectionBody::Overview { metrics, .. } => {
                    for m in metrics {
                        html.push_str(&format!(
                            "  <div class=\"metric-item\"><span class=\"metric-label\">{}</span><span class=\"metric-value\">{}</span></div>\n",
                            escape_html(&m.label),
                            escape_html(&m.value)
                        ));
                    }
                }
                SectionBody::Allocation(shares) => {
                    html.push_str("  <div class=\"allocation-grid\">\n");
                    for a in shares {
                        html.push_str(&format!(
                            "    <div class=\"allocation-item\"><div class=\"allocation-percentage\">{}%</div><div class=\"allocation-label\">{}</div></div>\n",
                            a.percentage,
                            escape_html(&a.category)
                        ));
                    }
                    html.push_str("  </div>\n");
                }
                SectionBody::List(items) => {
                    html.push_str("  <ul>\n");
                    for item in items {
                        html.push_str(&format!("    <li>{}</li>\n", escape_html(item)));
                    }
                    html.push_str("  </ul>\n");
                }
                SectionBody::Text(text) => {
                    html.push_str(&format!("  <p>{}</p>\n", escape_html(text)));
                }
            }

            html.push_str("</div>\n");
        }
        html
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::evaluate;
    use crate::core::profile::{FinancialProfile, Goal, RiskTolerance};

    fn profile(income: f64, expenses: f64, goal: Goal) -> FinancialProfile {
        FinancialProfile {
            age: 30,
            income,
            expenses,
            savings: 20000.0,
            debt: 0.0,
            risk: RiskTolerance::High,
            goal,
        }
    }

    #[test]
    fn test_full_report_sections_in_order() {
        let report = render(&evaluate(&profile(4000.0, 1000.0, Goal::Retirement)));
        assert_eq!(
            report.headings(),
            vec![
                "Financial Overview",
                "Recommended Allocation",
                "Action Plan",
                "Investment Recommendations",
                "Timeline"
            ]
        );
        match &report.sections[4].body {
            SectionBody::Text(t) => assert!(t.starts_with("10 years")),
            other => panic!("Expected timeline text, got {other:?}"),
        }
    }

    #[test]
    fn test_deficit_report_has_overview_and_action_plan() {
        let report = render(&evaluate(&profile(3000.0, 3500.0, Goal::Wealth)));
        assert_eq!(report.headings(), vec!["Financial Overview", "Action Plan"]);
    }

    #[test]
    fn test_unmatched_report_has_only_overview() {
        let rec = evaluate(&profile(4000.0, 1000.0, Goal::Other("travel".into())));
        let report = render(&rec);
        assert_eq!(report.headings(), vec!["Financial Overview"]);
        if let SectionBody::Overview { summary, metrics } = &report.sections[0].body {
            assert!(summary.is_empty());
            assert_eq!(metrics.len(), 4);
        } else {
            panic!("Expected overview section");
        }
    }

    #[test]
    fn test_allocation_keeps_insertion_order() {
        let report = render(&evaluate(&profile(4000.0, 1000.0, Goal::Wealth)));
        let SectionBody::Allocation(shares) = &report.sections[1].body else {
            panic!("Expected allocation section");
        };
        let categories: Vec<_> = shares.iter().map(|a| a.category.as_str()).collect();
        assert_eq!(
            categories,
            vec![
                "Growth Investing",
                "Emergency Fund Top-up",
                "Alternative Investments"
            ]
        );
    }

    #[test]
    fn test_html_is_escaped() {
        let rec = Recommendation {
            summary: "Spend < earn & \"save\"".to_string(),
            priorities: vec!["<script>alert(1)</script>".to_string()],
            ..Default::default()
        };
        let html = render(&rec).to_html();
        assert!(html.contains("<p>Spend &lt; earn &amp; &quot;save&quot;</p>"));
        assert!(html.contains("<li>&lt;script&gt;alert(1)&lt;/script&gt;</li>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_html_structure() {
        let html = render(&evaluate(&profile(4000.0, 1000.0, Goal::Debt))).to_html();
        assert_eq!(html.matches("<div class=\"result-section\">").count(), 5);
        assert!(html.contains("<h4>Recommended Allocation</h4>"));
        assert!(html.contains("<div class=\"allocation-percentage\">60%</div>"));
        assert!(html.contains("<span class=\"metric-label\">Monthly Surplus</span>"));
        assert!(html.contains("S&amp;P 500") || html.contains("$50-100/month"));
    }
}
