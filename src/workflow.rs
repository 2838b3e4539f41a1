//! Transaction and category bookkeeping behind the transactions page: form
//! validation, the cached lists and how they are mutated after each call.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::models::{Category, NewCategory, NewTransaction, Transaction, TxnType};

/// Category value that asks for a typed-in category instead.
pub const OTHER_CATEGORY: &str = "Other";
pub const FALLBACK_ICON: &str = "📁";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionDraft {
    pub name: String,
    pub amount: String,
    pub category: String,
    pub date: String,
    pub kind: TxnType,
}

impl TransactionDraft {
    pub fn from_transaction(txn: &Transaction) -> Self {
        Self {
            name: txn.name.clone(),
            amount: txn.amount.to_string(),
            category: txn.category.clone(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind: txn.kind,
        }
    }

    pub fn wants_custom_category(&self) -> bool {
        self.category == OTHER_CATEGORY
    }

    /// Validate and turn the draft into a request body. Nothing is sent
    /// unless this succeeds.
    pub fn resolve(&self, custom_category: &str) -> Result<NewTransaction, ValidationError> {
        let name = self.name.trim();
        let amount = self.amount.trim();
        let category = self.category.trim();
        let date = self.date.trim();
        if name.is_empty() || amount.is_empty() || category.is_empty() || date.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        let category = if category == OTHER_CATEGORY {
            let custom = custom_category.trim();
            if custom.is_empty() {
                return Err(ValidationError::MissingCustomCategory);
            }
            custom
        } else {
            category
        };

        let amount = amount
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite())
            .ok_or(ValidationError::InvalidAmount)?;
        let date =
            NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)?;

        Ok(NewTransaction {
            name: name.to_string(),
            amount,
            category: category.to_string(),
            date,
            kind: self.kind,
        })
    }
}

/// Locally cached transactions for one user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionList {
    items: Vec<Transaction>,
}

impl TransactionList {
    pub fn new(items: Vec<Transaction>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Transaction] {
        &self.items
    }

    pub fn get(&self, id: i64) -> Option<&Transaction> {
        self.items.iter().find(|t| t.id == id)
    }

    /// Replace the cache with a fetched list. Cached records the fetch does
    /// not know about (created while it was in flight) stay in front.
    pub fn merge_loaded(&mut self, loaded: Vec<Transaction>) {
        let mut merged: Vec<Transaction> = self
            .items
            .drain(..)
            .filter(|cached| !loaded.iter().any(|t| t.id == cached.id))
            .collect();
        merged.extend(loaded);
        self.items = merged;
    }

    /// Newly created records go first, as the server returned them.
    pub fn prepend(&mut self, txn: Transaction) {
        self.items.insert(0, txn);
    }

    /// Overwrite the fields of `id` in place; id and position are kept.
    pub fn replace_local(&mut self, id: i64, update: &NewTransaction) -> bool {
        match self.items.iter_mut().find(|t| t.id == id) {
            Some(txn) => {
                txn.name = update.name.clone();
                txn.amount = update.amount;
                txn.category = update.category.clone();
                txn.date = update.date;
                txn.kind = update.kind;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: i64) -> Option<Transaction> {
        let index = self.items.iter().position(|t| t.id == id)?;
        Some(self.items.remove(index))
    }

    /// All records of `kind`, newest first. Equal dates keep list order.
    pub fn history(&self, kind: TxnType) -> Vec<&Transaction> {
        let mut rows: Vec<&Transaction> = self.items.iter().filter(|t| t.kind == kind).collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }

    pub fn visible(&self, kind: TxnType, expanded: bool, preview: usize) -> Vec<&Transaction> {
        let mut rows = self.history(kind);
        if !expanded {
            rows.truncate(preview);
        }
        rows
    }

    pub fn has_more(&self, kind: TxnType, preview: usize) -> bool {
        self.items.iter().filter(|t| t.kind == kind).count() > preview
    }
}

/// The single record currently loaded into the form, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditState {
    editing: Option<i64>,
}

impl EditState {
    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    /// Load `id` for editing. Starting a new edit replaces any previous one.
    pub fn begin(&mut self, list: &TransactionList, id: i64) -> Option<TransactionDraft> {
        let txn = list.get(id)?;
        self.editing = Some(id);
        Some(TransactionDraft::from_transaction(txn))
    }

    pub fn finish(&mut self) -> Option<i64> {
        self.editing.take()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub icon: String,
}

impl CategoryDraft {
    pub fn resolve(&self) -> Result<NewCategory, ValidationError> {
        let name = self.name.trim();
        let icon = self.icon.trim();
        if name.is_empty() || icon.is_empty() {
            return Err(ValidationError::MissingCategoryFields);
        }
        Ok(NewCategory {
            name: name.to_string(),
            icon: icon.to_string(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryList {
    items: Vec<Category>,
}

impl CategoryList {
    pub fn new(items: Vec<Category>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Category] {
        &self.items
    }

    /// Same as [`TransactionList::merge_loaded`], matching categories by name.
    pub fn merge_loaded(&mut self, loaded: Vec<Category>) {
        let mut merged: Vec<Category> = self
            .items
            .drain(..)
            .filter(|cached| !loaded.iter().any(|c| c.name == cached.name))
            .collect();
        merged.extend(loaded);
        self.items = merged;
    }

    pub fn prepend(&mut self, category: Category) {
        self.items.insert(0, category);
    }

    /// Icon of the first category named `name`; duplicates are tolerated.
    pub fn icon_for(&self, name: &str) -> &str {
        self.items
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.icon.as_str())
            .unwrap_or(FALLBACK_ICON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn txn(id: i64, date: &str, kind: TxnType) -> Transaction {
        Transaction {
            id,
            name: format!("txn-{}", id),
            amount: 10.0 * id as f64,
            category: "Food".into(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            kind,
        }
    }

    #[test]
    fn merge_prefers_fetched_copy_of_known_ids() {
        let mut stale = txn(2, "2024-01-02", TxnType::Expense);
        stale.name = "old".into();
        let mut list = TransactionList::new(vec![txn(9, "2024-01-09", TxnType::Income), stale]);

        list.merge_loaded(vec![
            txn(1, "2024-01-01", TxnType::Expense),
            txn(2, "2024-01-02", TxnType::Expense),
        ]);

        let ids: Vec<i64> = list.items().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![9, 1, 2]);
        assert_eq!(list.get(2).map(|t| t.name.as_str()), Some("txn-2"));
    }

    fn draft() -> TransactionDraft {
        TransactionDraft {
            name: "Groceries".into(),
            amount: "42.50".into(),
            category: "Food".into(),
            date: "2024-05-02".into(),
            kind: TxnType::Expense,
        }
    }

    #[test]
    fn complete_draft_resolves() {
        let body = draft().resolve("").unwrap();
        assert_eq!(body.amount, 42.5);
        assert_eq!(body.category, "Food");
        assert_eq!(body.kind, TxnType::Expense);
    }

    #[test]
    fn each_missing_field_blocks() {
        let blanks: [fn(&mut TransactionDraft); 4] = [
            |d| d.name.clear(),
            |d| d.amount.clear(),
            |d| d.category.clear(),
            |d| d.date = "  ".into(),
        ];
        for blank in blanks {
            let mut d = draft();
            blank(&mut d);
            assert_eq!(d.resolve("x"), Err(ValidationError::MissingFields));
        }
    }

    #[test]
    fn other_category_takes_custom_text() {
        let mut d = draft();
        d.category = OTHER_CATEGORY.into();
        assert!(d.wants_custom_category());
        assert_eq!(d.resolve(" Pets ").unwrap().category, "Pets");
        assert_eq!(d.resolve(""), Err(ValidationError::MissingCustomCategory));
    }

    #[test]
    fn amount_and_date_must_parse() {
        let mut d = draft();
        d.amount = "ten".into();
        assert_eq!(d.resolve(""), Err(ValidationError::InvalidAmount));
        let mut d = draft();
        d.date = "02/05/2024".into();
        assert_eq!(d.resolve(""), Err(ValidationError::InvalidDate));
    }

    #[test]
    fn history_sorts_newest_first_and_is_stable() {
        let list = TransactionList::new(vec![
            txn(1, "2024-01-01", TxnType::Income),
            txn(2, "2024-03-01", TxnType::Income),
            txn(3, "2024-02-01", TxnType::Expense),
            txn(4, "2024-03-01", TxnType::Income),
        ]);
        let ids: Vec<i64> = list.history(TxnType::Income).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 4, 1]);
    }

    #[test]
    fn replace_local_keeps_id_and_position() {
        let mut list = TransactionList::new(vec![
            txn(1, "2024-01-01", TxnType::Income),
            txn(2, "2024-01-02", TxnType::Income),
        ]);
        let update = draft().resolve("").unwrap();
        assert!(list.replace_local(2, &update));
        assert_eq!(list.items()[1].id, 2);
        assert_eq!(list.items()[1].name, "Groceries");
        assert_eq!(list.items()[1].kind, TxnType::Expense);
        assert!(!list.replace_local(99, &update));
    }

    #[test]
    fn edit_state_tracks_one_record() {
        let list = TransactionList::new(vec![
            txn(5, "2024-01-01", TxnType::Income),
            txn(6, "2024-01-09", TxnType::Expense),
        ]);
        let mut edit = EditState::default();
        let loaded = edit.begin(&list, 5).unwrap();
        assert_eq!(loaded.date, "2024-01-01");
        assert_eq!(loaded.amount, "50");
        edit.begin(&list, 6);
        assert_eq!(edit.editing(), Some(6));
        assert!(edit.begin(&list, 404).is_none());
        assert_eq!(edit.finish(), Some(6));
        assert_eq!(edit.editing(), None);
    }

    #[test]
    fn category_draft_needs_name_and_icon() {
        let ok = CategoryDraft {
            name: "Pets".into(),
            icon: "🐶".into(),
        };
        assert_eq!(ok.resolve().unwrap().name, "Pets");
        let missing = CategoryDraft {
            name: "Pets".into(),
            icon: String::new(),
        };
        assert_eq!(missing.resolve(), Err(ValidationError::MissingCategoryFields));
    }

    #[test]
    fn icon_lookup_takes_first_match() {
        let mut list = CategoryList::new(vec![Category {
            name: "Food".into(),
            icon: "🍔".into(),
        }]);
        list.prepend(Category {
            name: "Food".into(),
            icon: "🍕".into(),
        });
        assert_eq!(list.icon_for("Food"), "🍕");
        assert_eq!(list.icon_for("Travel"), FALLBACK_ICON);
    }
}
