//! Decision rules that turn a [`FinancialProfile`] into a [`Recommendation`].
use crate::core::profile::{FinancialProfile, Goal, RiskTolerance};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Months of expenses that make up a complete emergency fund.
pub const EMERGENCY_FUND_MONTHS: f64 = 6.0;
/// Debt-to-income percentage above which debt reduction comes first.
pub const HIGH_DEBT_RATIO: f64 = 30.0;
/// Age used as the retirement planning horizon.
pub const RETIREMENT_HORIZON_AGE: i64 = 40;

/// Share of the monthly surplus suggested for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub category: String,
    pub percentage: u32,
}

/// A labelled, display-ready figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub summary: String,
    pub allocation: Vec<Allocation>,
    pub priorities: Vec<String>,
    pub investments: Vec<String>,
    pub timeline: String,
    pub metrics: Vec<Metric>,
}

/// Quantities derived from a profile before any rule is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    pub monthly_surplus: f64,
    pub emergency_fund_target: f64,
    pub has_emergency_fund: bool,
    /// Annual debt over annual income, in percent. Not finite when income is zero.
    pub debt_to_income_ratio: f64,
}

impl Assessment {
    pub fn of(profile: &FinancialProfile) -> Self {
        let emergency_fund_target = profile.expenses * EMERGENCY_FUND_MONTHS;
        Assessment {
            monthly_surplus: profile.income - profile.expenses,
            emergency_fund_target,
            has_emergency_fund: profile.savings >= emergency_fund_target,
            debt_to_income_ratio: profile.debt / (profile.income * 12.0) * 100.0,
        }
    }

    fn metrics(&self) -> Vec<Metric> {
        let status = if self.has_emergency_fund {
            "Complete ✓"
        } else {
            "In Progress"
        };
        vec![
            metric("Monthly Surplus", format!("${}", to_fixed(self.monthly_surplus, 2))),
            metric(
                "Emergency Fund Target",
                format!("${}", to_fixed(self.emergency_fund_target, 2)),
            ),
            metric("Emergency Fund Status", status.to_string()),
            metric(
                "Debt-to-Income Ratio",
                format!("{}%", to_fixed(self.debt_to_income_ratio, 1)),
            ),
        ]
    }
}

/// Which rule produced a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Deficit,
    DebtReduction,
    EmergencyFund,
    Retirement,
    WealthBuilding,
    /// No rule matched; only metrics are reported.
    Unmatched,
}

/// Picks the first matching rule. Order matters: a high debt ratio wins
/// over any stated goal, and a missing emergency fund wins over retirement
/// or investing goals.
pub fn select_plan(profile: &FinancialProfile, assessment: &Assessment) -> Plan {
    if assessment.monthly_surplus <= 0.0 {
        Plan::Deficit
    } else if profile.goal == Goal::Debt || assessment.debt_to_income_ratio > HIGH_DEBT_RATIO {
        Plan::DebtReduction
    } else if !assessment.has_emergency_fund || profile.goal == Goal::Emergency {
        Plan::EmergencyFund
    } else if profile.goal == Goal::Retirement {
        Plan::Retirement
    } else if matches!(profile.goal, Goal::Investment | Goal::Wealth) {
        Plan::WealthBuilding
    } else {
        Plan::Unmatched
    }
}

/// Evaluates the profile. Never fails; degenerate inputs yield degenerate
/// figures rather than errors.
pub fn evaluate(profile: &FinancialProfile) -> Recommendation {
    let assessment = Assessment::of(profile);
    let plan = select_plan(profile, &assessment);
    debug!(?plan, ?assessment, "Selected plan");

    let mut rec = Recommendation {
        metrics: assessment.metrics(),
        ..Default::default()
    };

    match plan {
        Plan::Deficit => {
            rec.summary = "Your expenses exceed your income. Focus on reducing expenses and increasing income before investing.".to_string();
            rec.priorities = strings(&[
                "Review and cut unnecessary expenses",
                "Explore ways to increase income (side gigs, freelancing)",
                "Create a detailed budget using the 50/30/20 rule",
                "Avoid taking on additional debt",
            ]);
        }
        Plan::DebtReduction => {
            rec.summary = "Focus on debt reduction first. High debt levels should be addressed before aggressive investing.".to_string();
            rec.allocation = allocation(&[
                ("Debt Payment", 60),
                ("Emergency Fund", 30),
                ("Investing", 10),
            ]);
            rec.priorities = strings(&[
                "Use the avalanche method: pay off highest interest debt first",
                "Build a starter emergency fund of $1,000",
                "Avoid taking on new debt",
                "Consider debt consolidation if interest rates are high",
            ]);
            rec.investments = strings(&[
                "Hold off on major investments until debt is under control",
                "Consider low-cost index funds with small amounts ($50-100/month)",
            ]);
            rec.timeline = "12-24 months to significantly reduce debt".to_string();
        }
        Plan::EmergencyFund => {
            rec.summary = "Build your emergency fund first. This is your financial foundation and safety net.".to_string();
            rec.allocation = allocation(&[
                ("Emergency Fund", 70),
                ("Investing", 20),
                ("Discretionary", 10),
            ]);
            let shortfall = assessment.emergency_fund_target - profile.savings;
            let remaining = if shortfall > 0.0 {
                format!("${}", to_fixed(shortfall, 2))
            } else {
                "$0".to_string()
            };
            rec.priorities = vec![
                format!("Save {remaining} more for 6-month emergency fund"),
                "Use a high-yield savings account (3-5% APY)".to_string(),
                "Automate monthly transfers to savings".to_string(),
                "Start investing small amounts while building emergency fund".to_string(),
            ];
            rec.investments = strings(&[
                "Open a Roth IRA and contribute $100-200/month",
                "Consider target-date funds for simplicity",
                "Low-cost index funds (S&P 500, Total Market)",
            ]);
            rec.timeline = "6-12 months to complete emergency fund".to_string();
        }
        Plan::Retirement => {
            rec.summary = "Great position to focus on retirement. Time is your greatest asset for compound growth.".to_string();
            rec.allocation = allocation(&[
                ("Retirement Investing", 50),
                ("Additional Savings", 30),
                ("Discretionary", 20),
            ]);
            rec.priorities = strings(&[
                "Maximize Roth IRA contributions ($7,000/year)",
                "Take advantage of employer 401(k) match if available",
                "Maintain emergency fund as backup",
                "Increase contributions annually",
            ]);
            rec.investments = strings(risk_based_investments(&profile.risk));
            rec.timeline = format!(
                "{} years to retirement - excellent time to start!",
                RETIREMENT_HORIZON_AGE - profile.age
            );
        }
        Plan::WealthBuilding => {
            rec.summary = "You're ready to invest! Diversify across different asset classes based on your risk tolerance.".to_string();
            rec.allocation = match profile.risk {
                RiskTolerance::High => allocation(&[
                    ("Growth Investing", 60),
                    ("Emergency Fund Top-up", 20),
                    ("Alternative Investments", 20),
                ]),
                RiskTolerance::Medium => allocation(&[
                    ("Balanced Investing", 60),
                    ("Savings", 30),
                    ("Bonds/Safe Assets", 10),
                ]),
                _ => allocation(&[
                    ("Conservative Investing", 40),
                    ("Savings", 40),
                    ("Bonds/Safe Assets", 20),
                ]),
            };
            rec.priorities = strings(&[
                "Dollar-cost average into the market",
                "Diversify across different sectors",
                "Review and rebalance portfolio quarterly",
                "Keep 3-6 months expenses liquid",
            ]);
            rec.investments = strings(risk_based_investments(&profile.risk));
            rec.timeline = "5-10+ years for optimal growth".to_string();
        }
        Plan::Unmatched => {}
    }

    rec
}

/// Model portfolio for a risk tolerance. Unrecognized tolerances get the
/// medium list.
pub fn risk_based_investments(risk: &RiskTolerance) -> &'static [&'static str] {
    match risk {
        RiskTolerance::Low => &[
            "Vanguard Total Bond Market Index (BND) - 40%",
            "Vanguard S&P 500 Index (VOO) - 40%",
            "High-Yield Savings Account - 20%",
            "Treasury bonds for stability",
        ],
        RiskTolerance::High => &[
            "Vanguard S&P 500 (VOO) - 40%",
            "Vanguard Growth Index (VUG) - 30%",
            "Vanguard Small Cap (VB) - 20%",
            "Individual growth stocks - 10%",
            "Consider cryptocurrency allocation (5% max)",
        ],
        _ => &[
            "Vanguard Total Stock Market (VTI) - 50%",
            "Vanguard Total International Stock (VXUS) - 30%",
            "Vanguard Total Bond Market (BND) - 20%",
            "Consider adding REIT exposure",
        ],
    }
}

/// Formats `value` with `dp` decimals. Ties round away from zero, and
/// non-finite values are spelled `Infinity`, `-Infinity` and `NaN`.
pub fn to_fixed(value: f64, dp: u32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}Infinity");
    }
    let precision = dp as usize;
    // -0.0 prints as zero
    let value = if value == 0.0 { 0.0 } else { value };
    match Decimal::from_f64_retain(value) {
        Some(d) => format!(
            "{:.precision$}",
            d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
        ),
        // Outside the decimal range; rounding mode no longer matters.
        None => format!("{value:.precision$}"),
    }
}

fn metric(label: &str, value: String) -> Metric {
    Metric {
        label: label.to_string(),
        value,
    }
}

fn allocation(shares: &[(&str, u32)]) -> Vec<Allocation> {
    shares
        .iter()
        .map(|(category, percentage)| Allocation {
            category: category.to_string(),
            percentage: *percentage,
        })
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
