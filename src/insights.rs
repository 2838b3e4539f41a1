use crate::models::{CategoryTotal, KindTotal, TxnType};

pub const PLACEHOLDER: &str = "-";
pub const TOP_CATEGORIES: usize = 5;
const NEAR_LIMIT_PERCENT: f64 = 85.0;

/// Rows sorted by total, largest first. Equal totals keep input order.
pub fn sorted_by_total(rows: &[CategoryTotal]) -> Vec<CategoryTotal> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.total.total_cmp(&a.total));
    sorted
}

pub fn top_categories(rows: &[CategoryTotal], limit: usize) -> Vec<CategoryTotal> {
    let mut sorted = sorted_by_total(rows);
    sorted.truncate(limit);
    sorted
}

pub fn sum_totals(rows: &[CategoryTotal]) -> f64 {
    rows.iter().map(|r| r.total).sum()
}

pub fn average_total(rows: &[CategoryTotal]) -> f64 {
    if rows.is_empty() {
        0.0
    } else {
        (sum_totals(rows) / rows.len() as f64).round()
    }
}

pub fn max_total(rows: &[CategoryTotal]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(|r| r.total).fold(f64::NEG_INFINITY, f64::max)
}

/// Total of the first row of `kind`, or zero.
pub fn total_for_kind(rows: &[KindTotal], kind: TxnType) -> f64 {
    rows.iter()
        .find(|r| r.kind == kind)
        .map(|r| r.total)
        .unwrap_or(0.0)
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrendEntry {
    pub category: String,
    pub total: f64,
}

impl TrendEntry {
    fn placeholder() -> Self {
        Self {
            category: PLACEHOLDER.to_string(),
            total: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrendSummary {
    pub highest: TrendEntry,
    pub lowest: TrendEntry,
    pub most_frequent_category: String,
}

impl TrendSummary {
    /// Single pass over already aggregated rows. For max, min and frequency
    /// the first row seen wins a tie.
    pub fn from_rows(rows: &[CategoryTotal]) -> Self {
        let Some(first) = rows.first() else {
            return Self {
                highest: TrendEntry::placeholder(),
                lowest: TrendEntry::placeholder(),
                most_frequent_category: PLACEHOLDER.to_string(),
            };
        };

        let mut highest = first;
        let mut lowest = first;
        // (category, count) in first-seen order
        let mut counts: Vec<(&str, usize)> = Vec::new();

        for row in rows {
            if row.total > highest.total {
                highest = row;
            }
            if row.total < lowest.total {
                lowest = row;
            }
            match counts.iter_mut().find(|(c, _)| *c == row.category) {
                Some((_, n)) => *n += 1,
                None => counts.push((row.category.as_str(), 1)),
            }
        }

        let mut most_frequent = PLACEHOLDER;
        let mut max_count = 0;
        for (category, count) in counts {
            if count > max_count {
                most_frequent = category;
                max_count = count;
            }
        }

        Self {
            highest: TrendEntry {
                category: highest.category.clone(),
                total: highest.total,
            },
            lowest: TrendEntry {
                category: lowest.category.clone(),
                total: lowest.total,
            },
            most_frequent_category: most_frequent.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LimitTier {
    Ok,
    NearLimit,
    OverLimit,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LimitStatus {
    pub remaining: f64,
    pub percentage: f64,
    pub tier: LimitTier,
}

impl LimitStatus {
    pub fn evaluate(limit: f64, spent: f64) -> Self {
        let remaining = limit - spent;
        let percentage = if limit > 0.0 {
            (spent / limit * 100.0).min(100.0)
        } else if spent > 0.0 {
            100.0
        } else {
            0.0
        };
        let tier = if remaining < 0.0 {
            LimitTier::OverLimit
        } else if percentage > NEAR_LIMIT_PERCENT {
            LimitTier::NearLimit
        } else {
            LimitTier::Ok
        };
        Self {
            remaining,
            percentage,
            tier,
        }
    }
}
