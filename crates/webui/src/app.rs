use crate::{
    api::{ApiClient, ApiConfig},
    components::{
        change_analysis_page::ChangeAnalysisPage,
        not_found::NotFound,
        notification::{NotificationContext, NotificationProvider},
        recommendations_page::RecommendationsPage,
        repository_browser_page::RepositoryBrowserPage,
        repository_management_page::RepositoryManagementPage,
        test_case_management_page::TestCaseManagementPage,
    },
};
use std::rc::Rc;
use strum::IntoEnumIterator as _;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Copy, Debug, Routable, PartialEq, Eq, strum::EnumIter, strum::IntoStaticStr)]
pub enum Route {
    #[at("/")]
    RepositoryManagement,
    #[at("/testcases")]
    TestCaseManagement,
    #[at("/analysis")]
    ChangeAnalysis,
    #[at("/recommendations")]
    TestCaseRecommendations,
    #[at("/browser")]
    RepositoryBrowser,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Stable route name, e.g. `TestCaseManagement`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::RepositoryManagement => "Repositories",
            Route::TestCaseManagement => "Test Cases",
            Route::ChangeAnalysis => "Change Analysis",
            Route::TestCaseRecommendations => "Recommendations",
            Route::RepositoryBrowser => "Browser",
            Route::NotFound => "Not Found",
        }
    }

    /// Routes shown in the navigation bar, in menu order.
    pub fn navigable() -> impl Iterator<Item = Route> {
        Route::iter().filter(|route| *route != Route::NotFound)
    }

    pub fn render(route: Route) -> Html {
        match route {
            Route::RepositoryManagement => html! { <RepositoryManagementPage /> },
            Route::TestCaseManagement => html! { <TestCaseManagementPage /> },
            Route::ChangeAnalysis => html! { <ChangeAnalysisPage /> },
            Route::TestCaseRecommendations => html! { <RecommendationsPage /> },
            Route::RepositoryBrowser => html! { <RepositoryBrowserPage /> },
            Route::NotFound => html! { <NotFound /> },
        }
    }
}

/// The API client provided by the [`App`].
#[hook]
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().expect("ApiClient context is set when starting the App")
}

#[derive(PartialEq, Properties)]
pub struct AppProps {
    pub api_config: ApiConfig,
}

#[function_component(App)]
pub fn app(AppProps { api_config }: &AppProps) -> Html {
    html! {
        <NotificationProvider>
            <ApiProvider config={api_config.clone()}>
                <div class="container">
                    <BrowserRouter>
                        <NavBar />
                        <main>
                            <Switch<Route> render={Route::render} />
                        </main>
                    </BrowserRouter>
                </div>
            </ApiProvider>
        </NotificationProvider>
    }
}

#[derive(PartialEq, Properties)]
struct ApiProviderProps {
    config: ApiConfig,
    children: Children,
}

/// Provides one [`ApiClient`] whose failures surface as toast notifications.
#[function_component(ApiProvider)]
fn api_provider(ApiProviderProps { config, children }: &ApiProviderProps) -> Html {
    let notifications =
        use_context::<NotificationContext>().expect("NotificationContext should be provided");
    let client = use_memo(config.clone(), move |config| {
        ApiClient::browser(config.clone(), Rc::new(notifications))
    });

    html! {
        <ContextProvider<ApiClient> context={(*client).clone()}>
            { children.clone() }
        </ContextProvider<ApiClient>>
    }
}

#[function_component(NavBar)]
fn nav_bar() -> Html {
    let current = use_route::<Route>();
    html! {
        <nav>
            { for Route::navigable().map(|route| {
                let classes = classes!(
                    "nav-link",
                    (current == Some(route)).then_some("active")
                );
                html! {
                    <Link<Route> to={route} {classes}>
                        { route.label() }
                    </Link<Route>>
                }
            })}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_table_paths() {
        let table = [
            ("/", Route::RepositoryManagement),
            ("/testcases", Route::TestCaseManagement),
            ("/analysis", Route::ChangeAnalysis),
            ("/recommendations", Route::TestCaseRecommendations),
            ("/browser", Route::RepositoryBrowser),
        ];
        for (path, route) in table {
            assert_eq!(path, route.to_path());
            assert_eq!(Some(route), Route::recognize(path), "{path}");
        }
    }

    #[test]
    fn unknown_path_is_not_found() {
        assert_eq!(Some(Route::NotFound), Route::recognize("/no/such/page"));
    }

    #[test]
    fn route_names() {
        assert_eq!(
            vec![
                "RepositoryManagement",
                "TestCaseManagement",
                "ChangeAnalysis",
                "TestCaseRecommendations",
                "RepositoryBrowser",
            ],
            Route::navigable().map(Route::name).collect::<Vec<_>>()
        );
    }
}
