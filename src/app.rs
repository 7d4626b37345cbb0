use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::components::session_gate::RequireSession;
use crate::pages::documents::DocumentsPage;
use crate::pages::login::LoginPage;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <p>"Page not found"</p> }>
                <Route path=path!("/login") view=LoginPage />
                <Route
                    path=path!("/")
                    view=|| view! {
                        <RequireSession>
                            <DocumentsPage />
                        </RequireSession>
                    }
                />
            </Routes>
        </Router>
    }
}
