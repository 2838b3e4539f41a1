use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: AttrValue,
    pub value: AttrValue,
    pub icon: &'static str,
    #[prop_or_default]
    pub caption: Option<AttrValue>,
    #[prop_or(AttrValue::Static("text-indigo-700"))]
    pub accent: AttrValue,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="bg-white p-6 rounded-2xl shadow-sm border border-gray-100 flex justify-between items-start">
            <div>
                <p class="text-gray-500 text-[10px] font-bold mb-1 tracking-widest uppercase">{ props.title.clone() }</p>
                <h3 class={classes!("text-2xl", "font-bold", "tracking-tight", props.accent.to_string())}>
                    { props.value.clone() }
                </h3>
                if let Some(caption) = &props.caption {
                    <p class="text-xs text-gray-500 mt-1">{ caption.clone() }</p>
                }
            </div>
            <div class="p-3 bg-indigo-50 rounded-xl text-2xl">{ props.icon }</div>
        </div>
    }
}
