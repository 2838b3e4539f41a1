use finance_tracker_frontend::App;

fn main() {
    finance_tracker_frontend::init();
    yew::Renderer::<App>::new().render();
}
