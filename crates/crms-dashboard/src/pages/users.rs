//! All accounts, grouped by role

use super::{short_time, TD_CLASS, TH_CLASS};
use crate::api;
use crate::components::{ErrorBanner, StatusBadge};
use crate::session::{token, use_session};
use crate::types::{Profile, UserUpdateForm};
use leptos::*;

const ROLES: &[(&str, &str)] = &[
    ("admin", "Administrators"),
    ("officer", "Officers"),
    ("public", "Public users"),
];

#[component]
pub fn UsersPage() -> impl IntoView {
    let session = use_session();
    let (users, set_users) = create_signal(Vec::<Profile>::new());
    let (version, set_version) = create_signal(0u32);
    let (error, set_error) = create_signal(None::<String>);

    create_effect(move |_| {
        version.track();
        let token = token(session);
        spawn_local(async move {
            match api::get::<Vec<Profile>>(&token, "/api/users").await {
                Ok(data) => set_users.set(data),
                Err(e) => set_error.set(Some(e)),
            }
        });
    });

    let change_role = move |user: Profile, role: String| {
        let form = UserUpdateForm {
            full_name: user.full_name,
            role,
            phone: user.phone,
            badge_number: user.badge_number,
            department: user.department,
        };
        let token = token(session);
        spawn_local(async move {
            match api::put::<_, Profile>(&token, &format!("/api/users/{}", user.id), &form).await {
                Ok(_) => set_version.update(|v| *v += 1),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold text-gray-900">"Users"</h1>
            <ErrorBanner error=error/>

            {ROLES.iter().map(|(role, heading)| {
                let members = move || {
                    users.with(|all| all.iter().filter(|u| u.role == *role).cloned().collect::<Vec<_>>())
                };
                view! {
                    <div class="bg-white rounded-lg shadow">
                        <h2 class="text-xl font-semibold px-6 pt-6">
                            {*heading} " (" {move || members().len()} ")"
                        </h2>
                        <table class="min-w-full divide-y divide-gray-200 mt-4">
                            <thead>
                                <tr>
                                    <th class=TH_CLASS>"Name"</th>
                                    <th class=TH_CLASS>"Email"</th>
                                    <th class=TH_CLASS>"Badge"</th>
                                    <th class=TH_CLASS>"Joined"</th>
                                    <th class=TH_CLASS>"Role"</th>
                                </tr>
                            </thead>
                            <tbody class="bg-white divide-y divide-gray-200">
                                <For
                                    each=members
                                    key=|u| (u.id.clone(), u.role.clone())
                                    children=move |user| {
                                        let current = user.role.clone();
                                        let target = user.clone();
                                        view! {
                                            <tr>
                                                <td class=TD_CLASS>{user.full_name.clone()}</td>
                                                <td class=TD_CLASS>{user.email.clone()}</td>
                                                <td class=TD_CLASS>{user.badge_number.clone().unwrap_or_default()}</td>
                                                <td class=format!("{} text-gray-500", TD_CLASS)>{short_time(&user.created_at)}</td>
                                                <td class=TD_CLASS>
                                                    <StatusBadge status=current.clone()/>
                                                    <select
                                                        class="ml-2 text-sm border border-gray-300 rounded"
                                                        on:change=move |ev| change_role(target.clone(), event_target_value(&ev))
                                                    >
                                                        {ROLES.iter().map(|(value, _)| view! {
                                                            <option value=*value selected={current == *value}>{*value}</option>
                                                        }).collect_view()}
                                                    </select>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
