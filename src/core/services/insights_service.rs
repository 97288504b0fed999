//! Monthly spending insights: summary figures, keyword-grouped spending
//! patterns, and advisory messages derived from them.

use serde::Serialize;
use uuid::Uuid;

use crate::core::services::month_bounds;
use crate::errors::{CoreError, CoreResult};
use crate::ledger::{Transaction, TransactionKind};
use crate::store::Store;

/// Coarse keyword groups used only for insight aggregation; unrelated to the
/// categorizer's rule table.
static PATTERN_GROUPS: &[(&str, &[&str])] = &[
    (
        "transporte",
        &["uber", "taxi", "99", "transporte", "gasolina", "combustivel"],
    ),
    (
        "alimentação",
        &["mercado", "supermercado", "restaurante", "delivery", "ifood"],
    ),
    (
        "assinaturas",
        &["netflix", "spotify", "disney", "prime", "youtube"],
    ),
    ("contas", &["energia", "agua", "luz", "internet", "aluguel"]),
];

const PATTERN_WARNING_PERCENT: f64 = 40.0;
const PATTERN_TIP_PERCENT: f64 = 25.0;
const LOW_SAVINGS_PERCENT: f64 = 10.0;
const GOOD_SAVINGS_PERCENT: f64 = 20.0;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Tip,
    Success,
}

#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    pub amount_cents: Option<i64>,
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpendingPattern {
    pub name: &'static str,
    pub amount_cents: i64,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MonthlySummary {
    pub total_income_cents: i64,
    pub total_expenses_cents: i64,
    pub balance_cents: i64,
    pub savings_rate: f64,
    pub transaction_count: usize,
    pub expense_count: usize,
    pub income_count: usize,
    pub avg_expense_cents: i64,
    pub patterns: Vec<SpendingPattern>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MonthlyInsights {
    pub insights: Vec<Insight>,
    pub summary: MonthlySummary,
}

pub struct InsightsService;

impl InsightsService {
    pub fn generate(
        store: &Store,
        user_id: Uuid,
        year: i32,
        month: u32,
    ) -> CoreResult<MonthlyInsights> {
        store
            .user(user_id)
            .ok_or(CoreError::UserNotFound(user_id))?;
        let (start, end) = month_bounds(year, month)?;
        let transactions = store.transactions_in_range(user_id, start, end);
        if transactions.is_empty() {
            return Ok(MonthlyInsights::default());
        }

        let expenses: Vec<&Transaction> = transactions
            .iter()
            .copied()
            .filter(|t| t.kind == TransactionKind::Expense)
            .collect();
        let income_total: i64 = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Income)
            .map(|t| t.amount_cents)
            .sum();
        let expense_total: i64 = expenses.iter().map(|t| t.amount_cents).sum();
        let balance = income_total - expense_total;
        let savings_rate = if income_total > 0 {
            balance as f64 / income_total as f64 * 100.0
        } else {
            0.0
        };

        let patterns = Self::spending_patterns(&expenses, expense_total);
        let mut insights = Vec::new();

        for pattern in patterns.iter().take(3) {
            if pattern.percentage > PATTERN_WARNING_PERCENT {
                insights.push(Insight {
                    kind: InsightKind::Warning,
                    title: capitalize(pattern.name),
                    message: format!(
                        "Alto gasto com {} ({:.0}% do total). {} transação(ões) identificadas.",
                        pattern.name, pattern.percentage, pattern.count
                    ),
                    amount_cents: Some(pattern.amount_cents),
                    percentage: Some(pattern.percentage),
                });
            } else if pattern.percentage > PATTERN_TIP_PERCENT {
                insights.push(Insight {
                    kind: InsightKind::Tip,
                    title: capitalize(pattern.name),
                    message: format!(
                        "{} representa {:.0}% dos gastos. Há oportunidades de economia.",
                        capitalize(pattern.name),
                        pattern.percentage
                    ),
                    amount_cents: Some(pattern.amount_cents),
                    percentage: Some(pattern.percentage),
                });
            }
        }

        if savings_rate < LOW_SAVINGS_PERCENT && income_total > 0 {
            insights.push(Insight {
                kind: InsightKind::Warning,
                title: "Taxa de Economia Baixa".into(),
                message: format!(
                    "Economizando apenas {savings_rate:.0}% da renda. Meta recomendada: 20%."
                ),
                amount_cents: Some(balance),
                percentage: Some(savings_rate),
            });
        } else if savings_rate >= GOOD_SAVINGS_PERCENT {
            insights.push(Insight {
                kind: InsightKind::Success,
                title: "Ótima Economia".into(),
                message: format!(
                    "Parabéns! Você está economizando {savings_rate:.0}% da sua renda."
                ),
                amount_cents: Some(balance),
                percentage: Some(savings_rate),
            });
        }

        if expenses.len() >= 3 {
            let avg = expense_total / expenses.len() as i64;
            let atypical = expenses
                .iter()
                .filter(|t| t.amount_cents > avg * 2)
                .count();
            if atypical > 0 {
                insights.push(Insight {
                    kind: InsightKind::Tip,
                    title: "Transações Atípicas".into(),
                    message: format!(
                        "{atypical} transação(ões) acima da média detectadas. Revise se eram necessárias."
                    ),
                    amount_cents: None,
                    percentage: None,
                });
            }
        }

        let avg_expense_cents = if expenses.is_empty() {
            0
        } else {
            expense_total / expenses.len() as i64
        };
        Ok(MonthlyInsights {
            insights,
            summary: MonthlySummary {
                total_income_cents: income_total,
                total_expenses_cents: expense_total,
                balance_cents: balance,
                savings_rate,
                transaction_count: transactions.len(),
                expense_count: expenses.len(),
                income_count: transactions.len() - expenses.len(),
                avg_expense_cents,
                patterns,
            },
        })
    }

    /// Groups expenses by the fixed keyword buckets, sorted by amount
    /// descending.
    fn spending_patterns(expenses: &[&Transaction], expense_total: i64) -> Vec<SpendingPattern> {
        let mut patterns = Vec::new();
        for (name, words) in PATTERN_GROUPS {
            let matching: Vec<&&Transaction> = expenses
                .iter()
                .filter(|t| {
                    let description = t.description.to_lowercase();
                    words.iter().any(|w| description.contains(w))
                })
                .collect();
            if matching.is_empty() {
                continue;
            }
            let amount: i64 = matching.iter().map(|t| t.amount_cents).sum();
            let percentage = if expense_total > 0 {
                amount as f64 / expense_total as f64 * 100.0
            } else {
                0.0
            };
            patterns.push(SpendingPattern {
                name,
                amount_cents: amount,
                count: matching.len(),
                percentage,
            });
        }
        patterns.sort_by(|a, b| b.amount_cents.cmp(&a.amount_cents));
        patterns
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
