use log::info;
use yew::prelude::*;
use yew_router::prelude::*;

mod anim;
mod config;
mod content;
mod dom;
mod effects;
mod scroll;

mod components {
    pub mod cursor;
    pub mod feature_tile;
    pub mod marquee;
    pub mod navbar;
    pub mod stair_transition;
}
mod pages {
    pub mod landing;
}

use pages::landing::Landing;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering landing page");
            html! { <Landing /> }
        }
        Route::NotFound => {
            info!("Unknown path, redirecting home");
            html! { <Redirect<Route> to={Route::Home} /> }
        }
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    // Route panics to the browser console
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting UniConnect");
    yew::Renderer::<App>::new().render();
}
