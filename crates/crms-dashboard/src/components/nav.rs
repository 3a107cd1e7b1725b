//! Sidebar navigation, driven by the entries the API returns for the role

use crate::session::use_session;
use leptos::*;
use leptos_router::*;

#[component]
pub fn Nav() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let sign_out = move |_| {
        session.set(None);
        navigate("/auth/login", Default::default());
    };

    let items = move || session.get().map(|s| s.navigation).unwrap_or_default();
    let name = move || session.get().map(|s| s.profile.full_name).unwrap_or_default();
    let role = move || session.get().map(|s| s.profile.role).unwrap_or_default();

    view! {
        <aside class="w-64 bg-white shadow min-h-screen flex flex-col">
            <div class="h-16 flex items-center px-6 border-b">
                <a href="/dashboard" class="text-xl font-bold text-gray-900">"CRCRMS"</a>
            </div>
            <nav class="flex-1 px-4 py-6 space-y-1">
                <For
                    each=items
                    key=|item| item.href.clone()
                    children=move |item| {
                        view! {
                            <A
                                href=item.href.clone()
                                exact=true
                                class="block text-gray-600 hover:text-gray-900 hover:bg-gray-100 rounded-md px-3 py-2"
                                active_class="bg-gray-100 text-gray-900 font-medium"
                            >
                                {item.name.clone()}
                            </A>
                        }
                    }
                />
            </nav>
            <div class="border-t px-6 py-4">
                <p class="text-sm font-medium text-gray-900">{name}</p>
                <p class="text-xs text-gray-500 capitalize">{role}</p>
                <button
                    class="mt-3 text-sm text-red-600 hover:text-red-800"
                    on:click=sign_out
                >
                    "Sign out"
                </button>
            </div>
        </aside>
    }
}
