//! Investigations opened against crime reports

use super::{BUTTON_CLASS, INPUT_CLASS, LABEL_CLASS, TD_CLASS, TH_CLASS};
use crate::api;
use crate::components::{ErrorBanner, StatusBadge};
use crate::session::{token, use_session};
use crate::types::{
    non_empty, CrimeReport, Investigation, InvestigationForm, InvestigationUpdateForm, Profile,
    SearchQuery,
};
use leptos::*;

const PRIORITIES: &[&str] = &["Low", "Medium", "High"];
const STATUSES: &[&str] = &["pending", "active", "completed", "suspended"];

#[component]
pub fn InvestigationsPage() -> impl IntoView {
    let session = use_session();
    let (role, my_id) = session.with_untracked(|s| {
        s.as_ref()
            .map(|s| (s.profile.role.clone(), s.profile.id.clone()))
            .unwrap_or_default()
    });
    let is_admin = role == "admin";

    let (query, set_query) = create_signal(SearchQuery::default());
    let (investigations, set_investigations) = create_signal(Vec::<Investigation>::new());
    let (selected, set_selected) = create_signal(None::<Investigation>);
    let (show_form, set_show_form) = create_signal(false);
    let (version, set_version) = create_signal(0u32);
    let (error, set_error) = create_signal(None::<String>);

    create_effect(move |_| {
        version.track();
        let query = query.get();
        let token = token(session);
        spawn_local(async move {
            match api::get_with::<_, Vec<Investigation>>(&token, "/api/investigations", &query).await {
                Ok(data) => set_investigations.set(data),
                Err(e) => set_error.set(Some(e)),
            }
        });
    });

    let changed = Callback::new(move |_: ()| {
        set_selected.set(None);
        set_show_form.set(false);
        set_version.update(|v| *v += 1);
    });

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold text-gray-900">"Investigations"</h1>
                <div class="flex gap-4">
                    <input
                        type="search"
                        placeholder="Search title or status"
                        class="px-3 py-2 border border-gray-300 rounded-md text-sm"
                        on:change=move |ev| set_query.set(SearchQuery { search: non_empty(event_target_value(&ev)) })
                    />
                    <Show when=move || is_admin>
                        <button class=BUTTON_CLASS on:click=move |_| set_show_form.update(|v| *v = !*v)>
                            {move || if show_form.get() { "Cancel" } else { "Open investigation" }}
                        </button>
                    </Show>
                </div>
            </div>
            <ErrorBanner error=error/>

            <Show when=move || show_form.get()>
                <NewInvestigationForm on_saved=changed/>
            </Show>

            <div class="bg-white rounded-lg shadow">
                <table class="min-w-full divide-y divide-gray-200">
                    <thead>
                        <tr>
                            <th class=TH_CLASS>"Title"</th>
                            <th class=TH_CLASS>"Crime"</th>
                            <th class=TH_CLASS>"Lead officer"</th>
                            <th class=TH_CLASS>"Priority"</th>
                            <th class=TH_CLASS>"Status"</th>
                            <th class=TH_CLASS>"Started"</th>
                            <th class=TH_CLASS></th>
                        </tr>
                    </thead>
                    <tbody class="bg-white divide-y divide-gray-200">
                        <For
                            each=move || investigations.get()
                            key=|i| (i.id.clone(), i.status.clone(), i.title.clone())
                            children=move |investigation| {
                                let chosen = investigation.clone();
                                let crime = investigation
                                    .crime
                                    .as_ref()
                                    .map(|c| format!("{} at {}", c.crime_type, c.location))
                                    .unwrap_or_default();
                                let lead = investigation
                                    .lead
                                    .as_ref()
                                    .map(|p| p.full_name.clone())
                                    .unwrap_or_else(|| "Unassigned".to_string());
                                view! {
                                    <tr>
                                        <td class=TD_CLASS>{investigation.title.clone()}</td>
                                        <td class=TD_CLASS>{crime}</td>
                                        <td class=TD_CLASS>{lead}</td>
                                        <td class=TD_CLASS><StatusBadge status=investigation.priority.clone()/></td>
                                        <td class=TD_CLASS><StatusBadge status=investigation.status.clone()/></td>
                                        <td class=format!("{} text-gray-500", TD_CLASS)>{investigation.start_date.clone()}</td>
                                        <td class=TD_CLASS>
                                            <button
                                                class="text-blue-600 hover:underline"
                                                on:click=move |_| set_selected.set(Some(chosen.clone()))
                                            >
                                                "View"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
                <Show when=move || investigations.with(Vec::is_empty)>
                    <p class="px-6 py-4 text-gray-500">"No investigations."</p>
                </Show>
            </div>

            {move || {
                let can_edit = selected.with(|s| {
                    s.as_ref().map_or(false, |i| is_admin || i.lead_officer.as_deref() == Some(my_id.as_str()))
                });
                selected.get().map(|investigation| view! {
                    <InvestigationDetail
                        investigation=investigation
                        can_edit=can_edit
                        can_delete=is_admin
                        on_changed=changed
                        on_close=Callback::new(move |_| set_selected.set(None))
                    />
                })
            }}
        </div>
    }
}

#[component]
fn NewInvestigationForm(on_saved: Callback<()>) -> impl IntoView {
    let session = use_session();
    let (crimes, set_crimes) = create_signal(Vec::<CrimeReport>::new());
    let (officers, set_officers) = create_signal(Vec::<Profile>::new());
    let (title, set_title) = create_signal(String::new());
    let (description, set_description) = create_signal(String::new());
    let (crime_id, set_crime_id) = create_signal(String::new());
    let (lead_officer, set_lead_officer) = create_signal(String::new());
    let (priority, set_priority) = create_signal(String::from("Medium"));
    let (error, set_error) = create_signal(None::<String>);

    create_effect(move |_| {
        let token = token(session);
        spawn_local(async move {
            let loaded = async {
                let crimes = api::get::<Vec<CrimeReport>>(&token, "/api/crime-reports").await?;
                let officers = api::get::<Vec<Profile>>(&token, "/api/officers").await?;
                Ok::<_, String>((crimes, officers))
            };
            match loaded.await {
                Ok((crimes, officers)) => {
                    set_crimes.set(crimes);
                    set_officers.set(officers);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = InvestigationForm {
            title: title.get_untracked(),
            description: description.get_untracked(),
            crime_id: crime_id.get_untracked(),
            lead_officer: non_empty(lead_officer.get_untracked()),
            priority: priority.get_untracked(),
        };
        let token = token(session);
        spawn_local(async move {
            match api::post::<_, Investigation>(Some(&token), "/api/investigations", &form).await {
                Ok(_) => on_saved.call(()),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    view! {
        <form on:submit=on_submit class="bg-white rounded-lg shadow p-6 grid grid-cols-1 md:grid-cols-2 gap-4">
            <div class="md:col-span-2"><ErrorBanner error=error/></div>
            <div>
                <label class=LABEL_CLASS>"Title"</label>
                <input type="text" required class=INPUT_CLASS
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                    prop:value=title/>
            </div>
            <div>
                <label class=LABEL_CLASS>"Priority"</label>
                <select class=INPUT_CLASS on:change=move |ev| set_priority.set(event_target_value(&ev))>
                    {PRIORITIES.iter().map(|p| view! {
                        <option value=*p selected={*p == "Medium"}>{*p}</option>
                    }).collect_view()}
                </select>
            </div>
            <div>
                <label class=LABEL_CLASS>"Crime report"</label>
                <select required class=INPUT_CLASS on:change=move |ev| set_crime_id.set(event_target_value(&ev))>
                    <option value="">"Select a report"</option>
                    <For
                        each=move || crimes.get()
                        key=|c| c.id.clone()
                        children=|c| view! {
                            <option value=c.id.clone()>{format!("{} at {}", c.crime_type, c.location)}</option>
                        }
                    />
                </select>
            </div>
            <div>
                <label class=LABEL_CLASS>"Lead officer"</label>
                <select class=INPUT_CLASS on:change=move |ev| set_lead_officer.set(event_target_value(&ev))>
                    <option value="">"Unassigned"</option>
                    <For
                        each=move || officers.get()
                        key=|o| o.id.clone()
                        children=|o| view! { <option value=o.id.clone()>{o.full_name.clone()}</option> }
                    />
                </select>
            </div>
            <div class="md:col-span-2">
                <label class=LABEL_CLASS>"Description"</label>
                <textarea rows="3" required class=INPUT_CLASS
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                    prop:value=description></textarea>
            </div>
            <div class="md:col-span-2">
                <button type="submit" class=BUTTON_CLASS>"Open investigation"</button>
            </div>
        </form>
    }
}

#[component]
fn InvestigationDetail(
    investigation: Investigation,
    can_edit: bool,
    can_delete: bool,
    on_changed: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let session = use_session();
    let (title, set_title) = create_signal(investigation.title.clone());
    let (description, set_description) = create_signal(investigation.description.clone());
    let (priority, set_priority) = create_signal(investigation.priority.clone());
    let (status, set_status) = create_signal(investigation.status.clone());
    let (findings, set_findings) = create_signal(investigation.findings.clone().unwrap_or_default());
    let (end_date, set_end_date) = create_signal(investigation.end_date.clone().unwrap_or_default());
    let (error, set_error) = create_signal(None::<String>);

    let path = format!("/api/investigations/{}", investigation.id);
    let on_submit = {
        let path = path.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let form = InvestigationUpdateForm {
                title: title.get_untracked(),
                description: description.get_untracked(),
                priority: priority.get_untracked(),
                status: status.get_untracked(),
                findings: non_empty(findings.get_untracked()),
                end_date: non_empty(end_date.get_untracked()),
            };
            let token = token(session);
            let path = path.clone();
            spawn_local(async move {
                match api::put::<_, Investigation>(&token, &path, &form).await {
                    Ok(_) => on_changed.call(()),
                    Err(e) => set_error.set(Some(e)),
                }
            });
        }
    };
    let delete = move |_| {
        let token = token(session);
        let path = path.clone();
        spawn_local(async move {
            match api::delete(&token, &path).await {
                Ok(()) => on_changed.call(()),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let choice = move |value: ReadSignal<String>, option: &'static str| {
        view! { <option value=option selected=move || value.get() == option>{option.replace('_', " ")}</option> }
    };
    let crime = investigation
        .crime
        .as_ref()
        .map(|c| format!("{} at {}", c.crime_type, c.location))
        .unwrap_or_default();

    view! {
        <div class="bg-white rounded-lg shadow p-6 space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-xl font-semibold">{investigation.title.clone()}</h2>
                <button class="text-gray-500 hover:text-gray-700" on:click=move |_| on_close.call(())>"Close"</button>
            </div>
            <ErrorBanner error=error/>
            <p class="text-sm text-gray-500">{crime}</p>
            <p class="text-gray-900 whitespace-pre-line">{investigation.description.clone()}</p>
            {investigation.findings.clone().map(|f| view! {
                <div>
                    <h3 class="text-sm font-medium text-gray-700">"Findings"</h3>
                    <p class="text-gray-900 whitespace-pre-line">{f}</p>
                </div>
            })}

            <Show when=move || can_edit>
                <form on:submit=on_submit.clone() class="border-t pt-4 grid grid-cols-1 md:grid-cols-2 gap-4">
                    <div>
                        <label class=LABEL_CLASS>"Title"</label>
                        <input type="text" required class=INPUT_CLASS
                            on:input=move |ev| set_title.set(event_target_value(&ev))
                            prop:value=title/>
                    </div>
                    <div>
                        <label class=LABEL_CLASS>"Priority"</label>
                        <select class=INPUT_CLASS on:change=move |ev| set_priority.set(event_target_value(&ev))>
                            {PRIORITIES.iter().map(|p| choice(priority, *p)).collect_view()}
                        </select>
                    </div>
                    <div>
                        <label class=LABEL_CLASS>"Status"</label>
                        <select class=INPUT_CLASS on:change=move |ev| set_status.set(event_target_value(&ev))>
                            {STATUSES.iter().map(|s| choice(status, *s)).collect_view()}
                        </select>
                    </div>
                    <div>
                        <label class=LABEL_CLASS>"End date"</label>
                        <input type="date" class=INPUT_CLASS
                            on:input=move |ev| set_end_date.set(event_target_value(&ev))
                            prop:value=end_date/>
                    </div>
                    <div class="md:col-span-2">
                        <label class=LABEL_CLASS>"Description"</label>
                        <textarea rows="3" required class=INPUT_CLASS
                            on:input=move |ev| set_description.set(event_target_value(&ev))
                            prop:value=description></textarea>
                    </div>
                    <div class="md:col-span-2">
                        <label class=LABEL_CLASS>"Findings"</label>
                        <textarea rows="3" class=INPUT_CLASS
                            on:input=move |ev| set_findings.set(event_target_value(&ev))
                            prop:value=findings></textarea>
                    </div>
                    <div class="md:col-span-2">
                        <button type="submit" class=BUTTON_CLASS>"Save changes"</button>
                    </div>
                </form>
            </Show>

            {can_delete.then(|| view! {
                <button class="px-4 py-2 bg-red-600 hover:bg-red-700 text-white rounded-md" on:click=delete>
                    "Delete investigation"
                </button>
            })}
        </div>
    }
}
