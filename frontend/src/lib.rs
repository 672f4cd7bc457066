pub mod config;
pub mod hooks;
pub mod pages;
pub mod storage;

use yew::prelude::*;
use crate::pages::games::frontend_wheel_game::FrontendWheelGame;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <div class="min-h-screen w-full bg-gray-950 text-white">
            <div class="mx-auto flex justify-center">
                <FrontendWheelGame />
            </div>
        </div>
    }
}
