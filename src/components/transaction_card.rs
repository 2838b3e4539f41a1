use yew::prelude::*;

use super::icons::{icon_edit, icon_trash};
use crate::format::format_amount;
use crate::models::{Transaction, TxnType};

#[derive(Properties, PartialEq)]
pub struct TransactionCardProps {
    pub item: Transaction,
    pub icon: AttrValue,
    pub on_edit: Callback<i64>,
    pub on_delete: Callback<i64>,
}

#[function_component(TransactionCard)]
pub fn transaction_card(props: &TransactionCardProps) -> Html {
    let id = props.item.id;
    let on_edit = {
        let on_edit = props.on_edit.clone();
        Callback::from(move |_| on_edit.emit(id))
    };
    let on_delete = {
        let on_delete = props.on_delete.clone();
        Callback::from(move |_| on_delete.emit(id))
    };
    let amount_class = match props.item.kind {
        TxnType::Income => "text-lg font-bold text-green-600",
        TxnType::Expense => "text-lg font-bold text-red-600",
    };

    html! {
        <div class="relative flex items-center gap-6 bg-white shadow-md p-5 rounded-2xl hover:shadow-xl transition group w-full mb-4">
            <div class="w-14 h-14 min-w-[3.5rem] flex items-center justify-center rounded-full bg-indigo-200 text-2xl">
                { props.icon.clone() }
            </div>
            <div class="flex-grow">
                <div class="flex justify-between items-center mb-1">
                    <h4 class="text-lg font-semibold text-gray-800">{ props.item.name.clone() }</h4>
                    <span class={amount_class}>{ format_amount(props.item.amount) }</span>
                </div>
                <p class="text-sm text-gray-500 italic">
                    { format!("{} · {}", props.item.date.format("%Y-%m-%d"), props.item.category) }
                </p>
            </div>
            <div class="flex gap-3 opacity-0 group-hover:opacity-100 transition-opacity">
                <button onclick={on_edit} class="text-blue-600 hover:text-blue-800" title="Edit">{ icon_edit() }</button>
                <button onclick={on_delete} class="text-red-600 hover:text-red-800" title="Delete">{ icon_trash() }</button>
            </div>
        </div>
    }
}
