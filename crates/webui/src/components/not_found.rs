use crate::app::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="not-found">
            <h3>{"Page not found"}</h3>
            <Link<Route> to={Route::RepositoryManagement}>{"Back to repositories"}</Link<Route>>
        </div>
    }
}
