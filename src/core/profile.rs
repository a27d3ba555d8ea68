use serde::{Deserialize, Serialize};
use std::fmt;

/// Investor's tolerance for volatility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
    Other(String),
}

impl From<&str> for RiskTolerance {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "low" => RiskTolerance::Low,
            "medium" => RiskTolerance::Medium,
            "high" => RiskTolerance::High,
            _ => RiskTolerance::Other(s.trim().to_string()),
        }
    }
}

impl From<String> for RiskTolerance {
    fn from(s: String) -> Self {
        RiskTolerance::from(s.as_str())
    }
}

impl From<RiskTolerance> for String {
    fn from(risk: RiskTolerance) -> Self {
        risk.to_string()
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTolerance::Low => write!(f, "low"),
            RiskTolerance::Medium => write!(f, "medium"),
            RiskTolerance::High => write!(f, "high"),
            RiskTolerance::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Primary financial goal the plan should serve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Goal {
    Debt,
    Emergency,
    Retirement,
    Investment,
    Wealth,
    Other(String),
}

impl From<&str> for Goal {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "debt" => Goal::Debt,
            "emergency" => Goal::Emergency,
            "retirement" => Goal::Retirement,
            "investment" => Goal::Investment,
            "wealth" => Goal::Wealth,
            _ => Goal::Other(s.trim().to_string()),
        }
    }
}

impl From<String> for Goal {
    fn from(s: String) -> Self {
        Goal::from(s.as_str())
    }
}

impl From<Goal> for String {
    fn from(goal: Goal) -> Self {
        goal.to_string()
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::Debt => write!(f, "debt"),
            Goal::Emergency => write!(f, "emergency"),
            Goal::Retirement => write!(f, "retirement"),
            Goal::Investment => write!(f, "investment"),
            Goal::Wealth => write!(f, "wealth"),
            Goal::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Monthly cash flow and balance sheet snapshot of a single person.
///
/// Amounts are taken as given. Zero or negative values are not rejected,
/// see [`profile_warnings`] for the conditions that yield odd output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub age: i64,
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
    pub debt: f64,
    pub risk: RiskTolerance,
    pub goal: Goal,
}

/// Partially filled profile, as read from a config file or command line flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub age: Option<i64>,
    pub income: Option<f64>,
    pub expenses: Option<f64>,
    pub savings: Option<f64>,
    pub debt: Option<f64>,
    pub risk: Option<RiskTolerance>,
    pub goal: Option<Goal>,
}

impl ProfileDraft {
    /// Fields set in `other` win over the ones in `self`.
    pub fn merge(self, other: ProfileDraft) -> ProfileDraft {
        ProfileDraft {
            age: other.age.or(self.age),
            income: other.income.or(self.income),
            expenses: other.expenses.or(self.expenses),
            savings: other.savings.or(self.savings),
            debt: other.debt.or(self.debt),
            risk: other.risk.or(self.risk),
            goal: other.goal.or(self.goal),
        }
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.age.is_none() {
            missing.push("age");
        }
        if self.income.is_none() {
            missing.push("income");
        }
        if self.expenses.is_none() {
            missing.push("expenses");
        }
        if self.savings.is_none() {
            missing.push("savings");
        }
        if self.debt.is_none() {
            missing.push("debt");
        }
        if self.risk.is_none() {
            missing.push("risk");
        }
        if self.goal.is_none() {
            missing.push("goal");
        }
        missing
    }

    /// Returns the complete profile, or `None` if any field is unset.
    pub fn complete(self) -> Option<FinancialProfile> {
        Some(FinancialProfile {
            age: self.age?,
            income: self.income?,
            expenses: self.expenses?,
            savings: self.savings?,
            debt: self.debt?,
            risk: self.risk?,
            goal: self.goal?,
        })
    }
}

/// Lists inputs that lead to degenerate numbers in the recommendation.
///
/// The engine still evaluates such profiles; these are surfaced to the user
/// instead of being corrected.
pub fn profile_warnings(profile: &FinancialProfile) -> Vec<String> {
    let mut warnings = Vec::new();

    if profile.income == 0.0 {
        warnings.push("Income is zero, debt-to-income ratio is undefined".to_string());
    }
    if profile.goal == Goal::Retirement && profile.age >= 40 {
        warnings.push(format!(
            "Age {} leaves a non-positive retirement horizon",
            profile.age
        ));
    }
    if profile.age < 0 {
        warnings.push(format!("Age {} is negative", profile.age));
    }
    for (name, value) in [
        ("income", profile.income),
        ("expenses", profile.expenses),
        ("savings", profile.savings),
        ("debt", profile.debt),
    ] {
        if value < 0.0 {
            warnings.push(format!("Negative {name}: {value:.2}"));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> FinancialProfile {
        FinancialProfile {
            age: 30,
            income: 4000.0,
            expenses: 1000.0,
            savings: 20000.0,
            debt: 0.0,
            risk: RiskTolerance::Medium,
            goal: Goal::Retirement,
        }
    }

    #[test]
    fn test_enum_parsing_is_total() {
        assert_eq!(RiskTolerance::from("HIGH"), RiskTolerance::High);
        assert_eq!(RiskTolerance::from(" low "), RiskTolerance::Low);
        assert_eq!(
            RiskTolerance::from("yolo"),
            RiskTolerance::Other("yolo".to_string())
        );
        assert_eq!(Goal::from("Wealth"), Goal::Wealth);
        assert_eq!(Goal::from("travel"), Goal::Other("travel".to_string()));
    }

    #[test]
    fn test_profile_yaml_deserialization() {
        let yaml = r#"
age: 35
income: 5000
expenses: 2500.5
savings: 10000
debt: 1200
risk: high
goal: investment
"#;
        let p: FinancialProfile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(p.age, 35);
        assert_eq!(p.expenses, 2500.5);
        assert_eq!(p.risk, RiskTolerance::High);
        assert_eq!(p.goal, Goal::Investment);
    }

    #[test]
    fn test_draft_merge_and_complete() {
        let base = ProfileDraft {
            age: Some(30),
            income: Some(3000.0),
            expenses: Some(1000.0),
            savings: Some(0.0),
            debt: Some(0.0),
            risk: Some(RiskTolerance::Low),
            goal: Some(Goal::Emergency),
        };
        let overrides = ProfileDraft {
            income: Some(4500.0),
            goal: Some(Goal::Wealth),
            ..Default::default()
        };

        let merged = base.merge(overrides);
        assert!(merged.missing_fields().is_empty());
        let p = merged.complete().unwrap();
        assert_eq!(p.income, 4500.0);
        assert_eq!(p.goal, Goal::Wealth);
        assert_eq!(p.risk, RiskTolerance::Low);
    }

    #[test]
    fn test_draft_missing_fields() {
        let draft = ProfileDraft {
            age: Some(30),
            risk: Some(RiskTolerance::High),
            ..Default::default()
        };
        assert_eq!(
            draft.missing_fields(),
            vec!["income", "expenses", "savings", "debt", "goal"]
        );
        assert!(draft.complete().is_none());
    }

    #[test]
    fn test_profile_warnings() {
        assert!(profile_warnings(&profile()).is_empty());

        let zero_income = FinancialProfile {
            income: 0.0,
            ..profile()
        };
        let warnings = profile_warnings(&zero_income);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Income is zero"));

        let older = FinancialProfile {
            age: 52,
            debt: -10.0,
            ..profile()
        };
        let warnings = profile_warnings(&older);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("retirement horizon"));
        assert!(warnings[1].contains("Negative debt"));
    }
}
