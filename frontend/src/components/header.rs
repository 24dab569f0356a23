use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(Header)]
pub fn header() -> Html {
    let route = use_route::<Route>();
    let subtitle = match route {
        Some(Route::ClientAgenda) => "Agenda do cliente",
        _ => "Agenda de visitas",
    };

    html! {
        <header class="navbar navbar-dark bg-primary">
            <div class="container-fluid">
                <Link<Route> classes={classes!("navbar-brand")} to={Route::Agenda}>{ "Agenda 2026" }</Link<Route>>
                <span class="navbar-text">{ subtitle }</span>
            </div>
        </header>
    }
}
