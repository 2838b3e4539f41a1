use yew::prelude::*;

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

pub fn icon_home() -> Html {
    icon_base("M3 11l9-8 9 8M5 10v10h14V10")
}
pub fn icon_credit_card() -> Html {
    icon_base("M3 7h18v10H3zM3 11h18")
}
pub fn icon_bar_chart() -> Html {
    icon_base("M4 20V10M10 20V4M16 20v-6M22 20H2")
}
pub fn icon_trending_up() -> Html {
    icon_base("M3 17l6-6 4 4 7-7")
}
pub fn icon_trending_down() -> Html {
    icon_base("M3 7l6 6 4-4 7 7")
}
pub fn icon_wallet() -> Html {
    icon_base("M3 7h18v10H3zM16 7V5H5v2")
}
pub fn icon_file() -> Html {
    icon_base("M14 2H6v20h12V6zM14 2v4h4")
}
pub fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
pub fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
pub fn icon_edit() -> Html {
    icon_base("M11 4H4v16h16v-7M18.5 2.5l3 3L12 15H9v-3z")
}
pub fn icon_trash() -> Html {
    icon_base("M3 6h18M8 6V4h8v2M19 6l-1 14H6L5 6")
}
pub fn icon_chevron_down() -> Html {
    icon_base("M6 9l6 6 6-6")
}
pub fn icon_chevron_up() -> Html {
    icon_base("M6 15l6-6 6 6")
}
