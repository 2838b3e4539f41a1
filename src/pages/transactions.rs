use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::icons::{icon_chevron_down, icon_chevron_up, icon_plus};
use crate::components::{alert, page_shell, use_user_scope, TransactionCard};
use crate::models::{Category, NewTransaction, Transaction, TxnType};
use crate::tasks::RequestGeneration;
use crate::workflow::{
    CategoryDraft, CategoryList, EditState, TransactionDraft, TransactionList, OTHER_CATEGORY,
};

/// Mutations of the cached transaction list. Dispatching keeps responses that
/// land after an await from overwriting each other.
#[derive(Debug)]
pub enum LedgerAction {
    Loaded(Vec<Transaction>),
    Created(Transaction),
    EditedLocally(i64, NewTransaction),
    Deleted(i64),
}

impl Reducible for TransactionList {
    type Action = LedgerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            LedgerAction::Loaded(items) => next.merge_loaded(items),
            LedgerAction::Created(txn) => next.prepend(txn),
            LedgerAction::EditedLocally(id, update) => {
                if !next.replace_local(id, &update) {
                    tracing::warn!(id, "edited transaction is no longer cached");
                }
            }
            LedgerAction::Deleted(id) => {
                next.remove(id);
            }
        }
        next.into()
    }
}

#[derive(Debug)]
pub enum CategoryAction {
    Loaded(Vec<Category>),
    Added(Category),
}

impl Reducible for CategoryList {
    type Action = CategoryAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            CategoryAction::Loaded(items) => next.merge_loaded(items),
            CategoryAction::Added(category) => next.prepend(category),
        }
        next.into()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DraftField {
    Name,
    Amount,
    Category,
    Date,
    CustomCategory,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct TransactionForm {
    open: bool,
    draft: TransactionDraft,
    custom_category: String,
    edit: EditState,
    error: Option<String>,
}

enum FormAction {
    Toggle,
    Set(DraftField, String),
    SetKind(TxnType),
    BeginEdit(EditState, TransactionDraft),
    Failed(String),
    Saved,
}

impl Reducible for TransactionForm {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            // closing discards the draft and any edit in progress
            FormAction::Toggle if next.open => next = TransactionForm::default(),
            FormAction::Toggle => next.open = true,
            FormAction::Set(field, value) => match field {
                DraftField::Name => next.draft.name = value,
                DraftField::Amount => next.draft.amount = value,
                DraftField::Category => next.draft.category = value,
                DraftField::Date => next.draft.date = value,
                DraftField::CustomCategory => next.custom_category = value,
            },
            FormAction::SetKind(kind) => next.draft.kind = kind,
            FormAction::BeginEdit(edit, draft) => {
                next = TransactionForm {
                    open: true,
                    draft,
                    custom_category: String::new(),
                    edit,
                    error: None,
                };
            }
            FormAction::Failed(message) => next.error = Some(message),
            FormAction::Saved => next = TransactionForm::default(),
        }
        next.into()
    }
}

fn set_input(form: &UseReducerHandle<TransactionForm>, field: DraftField) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        form.dispatch(FormAction::Set(field, input.value()));
    })
}

struct HistoryView<'a> {
    title: &'static str,
    kind: TxnType,
    ledger: &'a TransactionList,
    categories: &'a CategoryList,
    expanded: &'a UseStateHandle<bool>,
    preview: usize,
    on_edit: &'a Callback<i64>,
    on_delete: &'a Callback<i64>,
}

fn history_section(view: HistoryView<'_>) -> Html {
    let rows = view.ledger.visible(view.kind, **view.expanded, view.preview);
    let toggle = {
        let expanded = view.expanded.clone();
        Callback::from(move |_| expanded.set(!*expanded))
    };

    html! {
        <div class="bg-white/80 backdrop-blur-sm rounded-2xl shadow-lg border border-white/20 p-6">
            <h2 class="text-2xl font-bold text-gray-800 mb-4">{ view.title }</h2>
            if rows.is_empty() {
                <p class="text-gray-500 italic">{ format!("No {} records yet.", view.kind.as_str().to_lowercase()) }</p>
            }
            { for rows.into_iter().map(|txn| html! {
                <TransactionCard
                    key={txn.id}
                    item={txn.clone()}
                    icon={AttrValue::from(view.categories.icon_for(&txn.category).to_string())}
                    on_edit={view.on_edit.clone()}
                    on_delete={view.on_delete.clone()}
                />
            }) }
            if view.ledger.has_more(view.kind, view.preview) {
                <button onclick={toggle} class="flex items-center gap-1 text-indigo-600 text-sm font-medium mt-2">
                    if **view.expanded {
                        { "See Less" }{ icon_chevron_up() }
                    } else {
                        { "See More" }{ icon_chevron_down() }
                    }
                </button>
            }
        </div>
    }
}

#[function_component(TransactionsPage)]
pub fn transactions_page() -> Html {
    let scope = use_user_scope();
    let ledger = use_reducer(TransactionList::default);
    let categories = use_reducer(CategoryList::default);
    let form = use_reducer(TransactionForm::default);
    let category_draft = use_state(CategoryDraft::default);
    let category_open = use_state(|| false);
    let income_expanded = use_state(|| false);
    let expense_expanded = use_state(|| false);
    let ledger_generation = use_state(RequestGeneration::new);
    let category_generation = use_state(RequestGeneration::new);

    {
        let ledger = ledger.clone();
        let categories = categories.clone();
        let ledger_generation = (*ledger_generation).clone();
        let category_generation = (*category_generation).clone();
        let client = scope.client.clone();
        use_effect_with_deps(
            move |user_id: &Option<String>| {
                if let Some(user_id) = user_id.clone() {
                    let ledger_ticket = ledger_generation.issue();
                    let category_ticket = category_generation.issue();
                    let category_client = client.clone();
                    let category_user = user_id.clone();
                    spawn_local(async move {
                        match client.list_transactions(&user_id).await {
                            Ok(items) if ledger_ticket.is_current() => {
                                tracing::debug!(count = items.len(), "transactions loaded");
                                ledger.dispatch(LedgerAction::Loaded(items));
                            }
                            Ok(_) => {}
                            Err(err) => tracing::error!(error = %err, "failed to load transactions"),
                        }
                    });
                    spawn_local(async move {
                        match category_client.list_categories(&category_user).await {
                            Ok(items) if category_ticket.is_current() => {
                                categories.dispatch(CategoryAction::Loaded(items));
                            }
                            Ok(_) => {}
                            Err(err) => tracing::error!(error = %err, "failed to load categories"),
                        }
                    });
                }
                move || {
                    ledger_generation.invalidate();
                    category_generation.invalidate();
                }
            },
            scope.user_id.clone(),
        );
    }

    let on_toggle_form = {
        let form = form.clone();
        Callback::from(move |_| form.dispatch(FormAction::Toggle))
    };

    let on_kind = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(kind) = TxnType::parse(&select.value()) {
                form.dispatch(FormAction::SetKind(kind));
            }
        })
    };

    let on_category = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            form.dispatch(FormAction::Set(DraftField::Category, select.value()));
        })
    };

    let on_save = {
        let form = form.clone();
        let ledger = ledger.clone();
        let client = scope.client.clone();
        let user_id = scope.user_id.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let resolved = match form.draft.resolve(&form.custom_category) {
                Ok(resolved) => resolved,
                Err(err) => {
                    form.dispatch(FormAction::Failed(err.to_string()));
                    return;
                }
            };

            let mut edit = form.edit;
            if let Some(id) = edit.finish() {
                // the backend update endpoint is not called; edits stay in this view
                ledger.dispatch(LedgerAction::EditedLocally(id, resolved));
                tracing::info!(id, "transaction updated locally");
                form.dispatch(FormAction::Saved);
                return;
            }

            let Some(user_id) = user_id.clone() else {
                return;
            };
            let client = client.clone();
            let form = form.clone();
            let ledger = ledger.clone();
            spawn_local(async move {
                match client.create_transaction(&user_id, &resolved).await {
                    Ok(created) => {
                        tracing::info!(id = created.id, "transaction created");
                        ledger.dispatch(LedgerAction::Created(created));
                        form.dispatch(FormAction::Saved);
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "failed to create transaction");
                        form.dispatch(FormAction::Failed(err.user_message()));
                    }
                }
            });
        })
    };

    let on_edit = {
        let form = form.clone();
        let ledger = ledger.clone();
        Callback::from(move |id: i64| {
            let mut edit = EditState::default();
            match edit.begin(&ledger, id) {
                Some(draft) => form.dispatch(FormAction::BeginEdit(edit, draft)),
                None => tracing::warn!(id, "cannot edit unknown transaction"),
            }
        })
    };

    let on_delete = {
        let ledger = ledger.clone();
        let client = scope.client.clone();
        let user_id = scope.user_id.clone();
        Callback::from(move |id: i64| {
            let Some(user_id) = user_id.clone() else {
                return;
            };
            let client = client.clone();
            let ledger = ledger.clone();
            spawn_local(async move {
                match client.delete_transaction(&user_id, id).await {
                    Ok(()) => ledger.dispatch(LedgerAction::Deleted(id)),
                    Err(err) => tracing::error!(id, error = %err, "failed to delete transaction"),
                }
            });
        })
    };

    let on_toggle_category = {
        let category_open = category_open.clone();
        Callback::from(move |_| category_open.set(!*category_open))
    };
    let on_category_name = {
        let category_draft = category_draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*category_draft).clone();
            next.name = input.value();
            category_draft.set(next);
        })
    };
    let on_category_icon = {
        let category_draft = category_draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*category_draft).clone();
            next.icon = input.value();
            category_draft.set(next);
        })
    };
    let on_add_category = {
        let category_draft = category_draft.clone();
        let category_open = category_open.clone();
        let categories = categories.clone();
        let client = scope.client.clone();
        let user_id = scope.user_id.clone();
        Callback::from(move |_| {
            let body = match category_draft.resolve() {
                Ok(body) => body,
                Err(err) => {
                    alert(&err.to_string());
                    return;
                }
            };
            let Some(user_id) = user_id.clone() else {
                return;
            };
            let client = client.clone();
            let category_draft = category_draft.clone();
            let category_open = category_open.clone();
            let categories = categories.clone();
            spawn_local(async move {
                match client.create_category(&user_id, &body).await {
                    Ok(created) => {
                        categories.dispatch(CategoryAction::Added(created));
                        category_draft.set(CategoryDraft::default());
                        category_open.set(false);
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "failed to add category");
                        alert(&format!("Something went wrong: {}", err.detail_or_description()));
                    }
                }
            });
        })
    };

    let draft = &form.draft;
    let preview = scope.config.history_preview;
    let editing = form.edit.editing().is_some();

    let form_view = html! {
        <form onsubmit={on_save} class="bg-white/80 backdrop-blur-sm rounded-2xl shadow-lg border border-white/20 p-6 space-y-4">
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <select onchange={on_kind} class="border p-2 rounded">
                    { for [TxnType::Income, TxnType::Expense].into_iter().map(|kind| html! {
                        <option value={kind.as_str()} selected={draft.kind == kind}>{ kind.as_str() }</option>
                    }) }
                </select>
                <input type="text" placeholder="Name" class="border p-2 rounded"
                    value={draft.name.clone()} oninput={set_input(&form, DraftField::Name)} />
                <input type="number" placeholder="Amount" class="border p-2 rounded"
                    value={draft.amount.clone()} oninput={set_input(&form, DraftField::Amount)} />
                <input type="date" class="border p-2 rounded"
                    value={draft.date.clone()} oninput={set_input(&form, DraftField::Date)} />
                <select onchange={on_category} class="border p-2 rounded">
                    <option value="" selected={draft.category.is_empty()}>{"Select category"}</option>
                    { for categories.items().iter().map(|c| html! {
                        <option value={c.name.clone()} selected={draft.category == c.name}>
                            { format!("{} {}", c.icon, c.name) }
                        </option>
                    }) }
                    <option value={OTHER_CATEGORY} selected={draft.wants_custom_category()}>{"➕ Add new category"}</option>
                </select>
                if draft.wants_custom_category() {
                    <input type="text" placeholder="New category" class="border p-2 rounded"
                        value={form.custom_category.clone()}
                        oninput={set_input(&form, DraftField::CustomCategory)} />
                }
            </div>
            if let Some(msg) = &form.error {
                <p class="text-red-500 text-sm">{ msg.clone() }</p>
            }
            <button type="submit" class="bg-indigo-600 text-white px-4 py-2 rounded-lg hover:bg-indigo-700">
                { if editing { "Update Transaction" } else { "Save Transaction" } }
            </button>
        </form>
    };

    let category_view = html! {
        <div class="bg-white/80 backdrop-blur-sm rounded-2xl shadow-lg border border-white/20 p-6 space-y-3">
            <h3 class="text-lg font-semibold text-gray-800">{"New Category"}</h3>
            <div class="flex flex-wrap gap-3">
                <input type="text" placeholder="Category name" class="border p-2 rounded"
                    value={category_draft.name.clone()} oninput={on_category_name} />
                <input type="text" placeholder="Icon" maxlength="2" class="border p-2 rounded w-20 text-center"
                    value={category_draft.icon.clone()} oninput={on_category_icon} />
                <button onclick={on_add_category} class="bg-green-600 text-white px-4 py-2 rounded-lg hover:bg-green-700">
                    {"Add Category"}
                </button>
            </div>
        </div>
    };

    let content = html! {
        <>
            <div class="flex flex-wrap gap-3 justify-center">
                <button onclick={on_toggle_form} class="flex items-center gap-2 bg-indigo-600 text-white px-4 py-2 rounded-lg shadow hover:bg-indigo-700">
                    { icon_plus() }
                    { if form.open { "Close" } else { "Add Transaction" } }
                </button>
                <button onclick={on_toggle_category} class="flex items-center gap-2 bg-white text-indigo-700 border border-indigo-200 px-4 py-2 rounded-lg shadow-sm hover:bg-indigo-50">
                    { icon_plus() }
                    { if *category_open { "Close" } else { "Add Category" } }
                </button>
            </div>
            if form.open {
                { form_view }
            }
            if *category_open {
                { category_view }
            }
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-8">
                { history_section(HistoryView {
                    title: "💰 Income History",
                    kind: TxnType::Income,
                    ledger: &ledger,
                    categories: &categories,
                    expanded: &income_expanded,
                    preview,
                    on_edit: &on_edit,
                    on_delete: &on_delete,
                }) }
                { history_section(HistoryView {
                    title: "💸 Expense History",
                    kind: TxnType::Expense,
                    ledger: &ledger,
                    categories: &categories,
                    expanded: &expense_expanded,
                    preview,
                    on_edit: &on_edit,
                    on_delete: &on_delete,
                }) }
            </div>
        </>
    };

    page_shell("Transactions", "Record, edit and review your income and expenses", content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn txn(id: i64, day: u32) -> Transaction {
        Transaction {
            id,
            name: format!("entry {id}"),
            amount: 100.0,
            category: "Food".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            kind: TxnType::Expense,
        }
    }

    fn ids(list: &TransactionList) -> Vec<i64> {
        list.items().iter().map(|t| t.id).collect()
    }

    #[test]
    fn ledger_actions_apply_in_order() {
        let list = Rc::new(TransactionList::default())
            .reduce(LedgerAction::Loaded(vec![txn(1, 1), txn(2, 2)]))
            .reduce(LedgerAction::Created(txn(3, 3)))
            .reduce(LedgerAction::Deleted(1));
        assert_eq!(ids(&list), vec![3, 2]);
    }

    #[test]
    fn late_load_keeps_records_created_meanwhile() {
        let list = Rc::new(TransactionList::default())
            .reduce(LedgerAction::Created(txn(99, 9)))
            .reduce(LedgerAction::Loaded(vec![txn(1, 1), txn(2, 2)]));
        assert_eq!(ids(&list), vec![99, 1, 2]);

        let categories = Rc::new(CategoryList::default())
            .reduce(CategoryAction::Added(Category {
                name: "Pets".to_string(),
                icon: "🐶".to_string(),
            }))
            .reduce(CategoryAction::Loaded(vec![Category {
                name: "Food".to_string(),
                icon: "🍔".to_string(),
            }]));
        let names: Vec<&str> = categories.items().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Pets", "Food"]);
    }

    #[test]
    fn local_edit_keeps_id_and_position() {
        let update = NewTransaction {
            name: "Rent".to_string(),
            amount: 900.0,
            category: "Housing".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            kind: TxnType::Expense,
        };
        let list = Rc::new(TransactionList::new(vec![txn(1, 1), txn(2, 2)]))
            .reduce(LedgerAction::EditedLocally(2, update));
        assert_eq!(ids(&list), vec![1, 2]);
        assert_eq!(list.get(2).map(|t| t.name.as_str()), Some("Rent"));
    }

    #[test]
    fn added_category_goes_first() {
        let food = Category {
            name: "Food".to_string(),
            icon: "🍔".to_string(),
        };
        let travel = Category {
            name: "Travel".to_string(),
            icon: "✈".to_string(),
        };
        let list = Rc::new(CategoryList::default())
            .reduce(CategoryAction::Loaded(vec![food]))
            .reduce(CategoryAction::Added(travel));
        assert_eq!(list.items()[0].name, "Travel");
        assert_eq!(list.icon_for("Food"), "🍔");
    }

    #[test]
    fn failed_save_keeps_form_open() {
        let form = Rc::new(TransactionForm::default())
            .reduce(FormAction::Toggle)
            .reduce(FormAction::Set(DraftField::Name, "Lunch".to_string()))
            .reduce(FormAction::Failed("Please enter all details".to_string()));
        assert!(form.open);
        assert_eq!(form.draft.name, "Lunch");
        assert_eq!(form.error.as_deref(), Some("Please enter all details"));

        let form = form.reduce(FormAction::Saved);
        assert_eq!(*form, TransactionForm::default());
    }

    #[test]
    fn closing_the_form_drops_the_edit() {
        let mut edit = EditState::default();
        let list = TransactionList::new(vec![txn(4, 4)]);
        let draft = edit.begin(&list, 4).unwrap();
        let form = Rc::new(TransactionForm::default()).reduce(FormAction::BeginEdit(edit, draft));
        assert_eq!(form.edit.editing(), Some(4));
        assert_eq!(form.draft.date, "2024-01-04");

        let form = form.reduce(FormAction::Toggle);
        assert_eq!(form.edit.editing(), None);
        assert!(!form.open);
    }
}
