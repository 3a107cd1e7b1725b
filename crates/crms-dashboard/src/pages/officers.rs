//! Officer roster and enrolment

use super::{BUTTON_CLASS, INPUT_CLASS, LABEL_CLASS, TD_CLASS, TH_CLASS};
use crate::api;
use crate::components::ErrorBanner;
use crate::session::{token, use_session};
use crate::types::{non_empty, NewAccount, Profile};
use leptos::*;

#[component]
pub fn OfficersPage() -> impl IntoView {
    let session = use_session();
    let (officers, set_officers) = create_signal(Vec::<Profile>::new());
    let (version, set_version) = create_signal(0u32);
    let (error, set_error) = create_signal(None::<String>);

    create_effect(move |_| {
        version.track();
        let token = token(session);
        spawn_local(async move {
            match api::get::<Vec<Profile>>(&token, "/api/officers").await {
                Ok(data) => set_officers.set(data),
                Err(e) => set_error.set(Some(e)),
            }
        });
    });

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold text-gray-900">"Officers"</h1>
            <ErrorBanner error=error/>
            <OfficerForm on_saved=Callback::new(move |_| set_version.update(|v| *v += 1))/>

            <div class="bg-white rounded-lg shadow">
                <table class="min-w-full divide-y divide-gray-200">
                    <thead>
                        <tr>
                            <th class=TH_CLASS>"Name"</th>
                            <th class=TH_CLASS>"Badge"</th>
                            <th class=TH_CLASS>"Department"</th>
                            <th class=TH_CLASS>"Email"</th>
                            <th class=TH_CLASS>"Phone"</th>
                        </tr>
                    </thead>
                    <tbody class="bg-white divide-y divide-gray-200">
                        <For
                            each=move || officers.get()
                            key=|o| o.id.clone()
                            children=|o| view! {
                                <tr>
                                    <td class=TD_CLASS>{o.full_name.clone()}</td>
                                    <td class=TD_CLASS>{o.badge_number.clone().unwrap_or_default()}</td>
                                    <td class=TD_CLASS>{o.department.clone().unwrap_or_default()}</td>
                                    <td class=TD_CLASS>{o.email.clone()}</td>
                                    <td class=TD_CLASS>{o.phone.clone().unwrap_or_default()}</td>
                                </tr>
                            }
                        />
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[component]
fn OfficerForm(on_saved: Callback<()>) -> impl IntoView {
    let session = use_session();
    let (full_name, set_full_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (badge_number, set_badge_number) = create_signal(String::new());
    let (department, set_department) = create_signal(String::new());
    let (phone, set_phone) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let account = NewAccount {
            email: email.get_untracked(),
            password: password.get_untracked(),
            full_name: full_name.get_untracked(),
            badge_number: non_empty(badge_number.get_untracked()),
            department: non_empty(department.get_untracked()),
            phone: non_empty(phone.get_untracked()),
        };
        let token = token(session);
        spawn_local(async move {
            match api::post::<_, Profile>(Some(&token), "/api/officers", &account).await {
                Ok(_) => {
                    set_error.set(None);
                    for clear in [set_full_name, set_email, set_password, set_badge_number, set_department, set_phone] {
                        clear.set(String::new());
                    }
                    on_saved.call(());
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let input = move |label: &'static str,
                      kind: &'static str,
                      required: bool,
                      value: ReadSignal<String>,
                      set: WriteSignal<String>| {
        view! {
            <div>
                <label class=LABEL_CLASS>{label}</label>
                <input type=kind required=required class=INPUT_CLASS
                    on:input=move |ev| set.set(event_target_value(&ev))
                    prop:value=value/>
            </div>
        }
    };

    view! {
        <form on:submit=on_submit class="bg-white rounded-lg shadow p-6 grid grid-cols-1 md:grid-cols-3 gap-4">
            <h2 class="md:col-span-3 text-xl font-semibold">"Add officer"</h2>
            <div class="md:col-span-3"><ErrorBanner error=error/></div>
            {input("Full name", "text", true, full_name, set_full_name)}
            {input("Email", "email", true, email, set_email)}
            {input("Initial password", "password", true, password, set_password)}
            {input("Badge number", "text", true, badge_number, set_badge_number)}
            {input("Department", "text", false, department, set_department)}
            {input("Phone", "tel", false, phone, set_phone)}
            <div class="md:col-span-3">
                <button type="submit" class=BUTTON_CLASS>"Create officer"</button>
            </div>
        </form>
    }
}
