use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{agenda::Agenda, not_found::NotFound};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    /// Admin agenda: full create/edit/delete/duplicate.
    #[at("/")]
    Agenda,
    /// Client agenda: calendar only.
    #[at("/agenda_cliente")]
    ClientAgenda,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Agenda => html! { <Agenda /> },
        Route::ClientAgenda => html! { <Agenda read_only=true /> },
        Route::NotFound => html! { <NotFound /> },
    }
}
