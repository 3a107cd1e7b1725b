//! Main application component

use crate::components::*;
use crate::pages::*;
use crate::session::{provide_session, use_session};
use leptos::*;
use leptos_router::*;

#[component]
pub fn App() -> impl IntoView {
    provide_session();

    view! {
        <Router>
            <Routes>
                <Route path="/" view=|| view! { <Redirect path="/dashboard"/> }/>
                <Route path="/auth/login" view=LoginPage/>
                <Route path="/auth/sign-up" view=SignUpPage/>
                <Route path="/auth/sign-up-success" view=SignUpSuccessPage/>
                <Route path="/dashboard" view=Shell>
                    <Route path="" view=Dashboard/>
                    <Route path="crime-reports" view=CrimeReportsPage/>
                    <Route path="criminal-records" view=CriminalRecordsPage/>
                    <Route path="investigations" view=InvestigationsPage/>
                    <Route path="officers" view=OfficersPage/>
                    <Route path="users" view=UsersPage/>
                    <Route path="audit-logs" view=AuditLogsPage/>
                </Route>
            </Routes>
        </Router>
    }
}

/// Layout for signed-in pages; anyone else is sent to the login page.
#[component]
fn Shell() -> impl IntoView {
    let session = use_session();

    view! {
        <Show
            when=move || session.with(Option::is_some)
            fallback=|| view! { <Redirect path="/auth/login"/> }
        >
            <div class="min-h-screen bg-gray-100 flex">
                <Nav/>
                <main class="flex-1 px-8 py-8">
                    <Outlet/>
                </main>
            </div>
        </Show>
    }
}
