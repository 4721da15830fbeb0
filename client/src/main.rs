mod app;
mod canvas;
mod colors;
mod fetch;
mod legend;
mod markers;
mod sequence_bar;
mod tooltip;
mod viewport;

fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
