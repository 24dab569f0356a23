use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="container py-5">
            <div class="text-center">
                <h2>{ "404 - Página não encontrada" }</h2>
                <p>{ "A página que você procura não existe." }</p>
                <Link<Route> to={Route::Agenda}>
                    <button class="btn btn-primary">{ "Voltar para a agenda" }</button>
                </Link<Route>>
            </div>
        </div>
    }
}
