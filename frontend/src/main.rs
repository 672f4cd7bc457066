use frontend::App;
use yew::Renderer;

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Starting prize wheel");

    Renderer::<App>::new().render();
}
