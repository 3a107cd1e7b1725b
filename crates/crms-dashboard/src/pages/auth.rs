//! Login and sign-up

use super::{BUTTON_CLASS, INPUT_CLASS, LABEL_CLASS};
use crate::api;
use crate::session::{sign_in, use_session};
use crate::types::{non_empty, NewAccount, Profile};
use leptos::*;
use leptos_router::*;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (pending, set_pending) = create_signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_pending.set(true);
        set_error.set(None);
        let navigate = navigate.clone();
        spawn_local(async move {
            match sign_in(email.get_untracked(), password.get_untracked()).await {
                Ok(signed_in) => {
                    session.set(Some(signed_in));
                    navigate("/dashboard", Default::default());
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_pending.set(false);
        });
    };

    view! {
        <AuthCard title="Sign in to CRCRMS">
            <form on:submit=on_submit class="space-y-4">
                <crate::components::ErrorBanner error=error/>
                <div>
                    <label class=LABEL_CLASS>"Email"</label>
                    <input
                        type="email"
                        required
                        class=INPUT_CLASS
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        prop:value=email
                    />
                </div>
                <div>
                    <label class=LABEL_CLASS>"Password"</label>
                    <input
                        type="password"
                        required
                        class=INPUT_CLASS
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        prop:value=password
                    />
                </div>
                <button type="submit" class=format!("w-full {}", BUTTON_CLASS) disabled=move || pending.get()>
                    {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                </button>
                <p class="text-sm text-center text-gray-600">
                    "No account? "
                    <A href="/auth/sign-up" class="text-blue-600 hover:underline">"Sign up"</A>
                </p>
            </form>
        </AuthCard>
    }
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    let navigate = use_navigate();

    let (full_name, set_full_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (phone, set_phone) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (confirm, set_confirm) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if password.get_untracked() != confirm.get_untracked() {
            set_error.set(Some("Passwords do not match".to_string()));
            return;
        }
        set_error.set(None);

        let account = NewAccount {
            email: email.get_untracked(),
            password: password.get_untracked(),
            full_name: full_name.get_untracked(),
            badge_number: None,
            department: None,
            phone: non_empty(phone.get_untracked()),
        };
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::post::<_, Profile>(None, "/api/auth/signup", &account).await {
                Ok(_) => navigate("/auth/sign-up-success", Default::default()),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    view! {
        <AuthCard title="Create a public account">
            <form on:submit=on_submit class="space-y-4">
                <crate::components::ErrorBanner error=error/>
                <div>
                    <label class=LABEL_CLASS>"Full name"</label>
                    <input type="text" required class=INPUT_CLASS
                        on:input=move |ev| set_full_name.set(event_target_value(&ev))
                        prop:value=full_name/>
                </div>
                <div>
                    <label class=LABEL_CLASS>"Email"</label>
                    <input type="email" required class=INPUT_CLASS
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        prop:value=email/>
                </div>
                <div>
                    <label class=LABEL_CLASS>"Phone"</label>
                    <input type="tel" class=INPUT_CLASS placeholder="Optional"
                        on:input=move |ev| set_phone.set(event_target_value(&ev))
                        prop:value=phone/>
                </div>
                <div>
                    <label class=LABEL_CLASS>"Password"</label>
                    <input type="password" required minlength="6" class=INPUT_CLASS
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        prop:value=password/>
                </div>
                <div>
                    <label class=LABEL_CLASS>"Confirm password"</label>
                    <input type="password" required class=INPUT_CLASS
                        on:input=move |ev| set_confirm.set(event_target_value(&ev))
                        prop:value=confirm/>
                </div>
                <button type="submit" class=format!("w-full {}", BUTTON_CLASS)>"Sign up"</button>
                <p class="text-sm text-center text-gray-600">
                    "Already registered? "
                    <A href="/auth/login" class="text-blue-600 hover:underline">"Sign in"</A>
                </p>
            </form>
        </AuthCard>
    }
}

#[component]
pub fn SignUpSuccessPage() -> impl IntoView {
    view! {
        <AuthCard title="Account created">
            <div class="text-center py-6 space-y-4">
                <div class="text-5xl">"✓"</div>
                <p class="text-gray-600">"You can now sign in and file crime reports."</p>
                <A href="/auth/login" class="text-blue-600 hover:underline">"Go to sign in"</A>
            </div>
        </AuthCard>
    }
}

#[component]
fn AuthCard(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-100 flex items-center justify-center px-4">
            <div class="bg-white rounded-xl shadow-lg p-8 w-full max-w-md">
                <h1 class="text-2xl font-bold text-gray-900 mb-6 text-center">{title}</h1>
                {children()}
            </div>
        </div>
    }
}
