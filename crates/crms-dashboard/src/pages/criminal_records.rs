//! Criminal records registry

use super::{BUTTON_CLASS, INPUT_CLASS, LABEL_CLASS, TD_CLASS, TH_CLASS};
use crate::api;
use crate::components::{ErrorBanner, StatusBadge};
use crate::session::{token, use_session, Session};
use crate::types::{non_empty, CriminalRecord, CriminalRecordForm, SearchQuery};
use leptos::*;

/// Form state: closed, a new record, or an edit of an existing one.
#[derive(Clone, PartialEq)]
enum Editing {
    Closed,
    New,
    Existing(CriminalRecord),
}

#[component]
pub fn CriminalRecordsPage() -> impl IntoView {
    let session = use_session();
    let is_admin = session.with_untracked(|s| s.as_ref().map_or(false, Session::is_admin));

    let (query, set_query) = create_signal(SearchQuery::default());
    let (records, set_records) = create_signal(Vec::<CriminalRecord>::new());
    let (editing, set_editing) = create_signal(Editing::Closed);
    let (version, set_version) = create_signal(0u32);
    let (error, set_error) = create_signal(None::<String>);

    create_effect(move |_| {
        version.track();
        let query = query.get();
        let token = token(session);
        spawn_local(async move {
            match api::get_with::<_, Vec<CriminalRecord>>(&token, "/api/criminal-records", &query).await {
                Ok(data) => set_records.set(data),
                Err(e) => set_error.set(Some(e)),
            }
        });
    });

    let saved = Callback::new(move |_: ()| {
        set_editing.set(Editing::Closed);
        set_version.update(|v| *v += 1);
    });

    let remove = move |id: String| {
        let token = token(session);
        spawn_local(async move {
            match api::delete(&token, &format!("/api/criminal-records/{}", id)).await {
                Ok(()) => set_version.update(|v| *v += 1),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold text-gray-900">"Criminal Records"</h1>
                <div class="flex gap-4">
                    <input
                        type="search"
                        placeholder="Search name or national ID"
                        class="px-3 py-2 border border-gray-300 rounded-md text-sm"
                        on:change=move |ev| set_query.set(SearchQuery { search: non_empty(event_target_value(&ev)) })
                    />
                    <Show when=move || is_admin>
                        <button class=BUTTON_CLASS on:click=move |_| set_editing.set(Editing::New)>
                            "Add record"
                        </button>
                    </Show>
                </div>
            </div>
            <ErrorBanner error=error/>

            {move || match editing.get() {
                Editing::Closed => None,
                Editing::New => Some(view! {
                    <RecordForm initial=None on_saved=saved on_cancel=Callback::new(move |_| set_editing.set(Editing::Closed))/>
                }),
                Editing::Existing(record) => Some(view! {
                    <RecordForm initial=Some(record) on_saved=saved on_cancel=Callback::new(move |_| set_editing.set(Editing::Closed))/>
                }),
            }}

            <div class="bg-white rounded-lg shadow">
                <table class="min-w-full divide-y divide-gray-200">
                    <thead>
                        <tr>
                            <th class=TH_CLASS>"Name"</th>
                            <th class=TH_CLASS>"National ID"</th>
                            <th class=TH_CLASS>"Date of birth"</th>
                            <th class=TH_CLASS>"Gender"</th>
                            <th class=TH_CLASS>"Status"</th>
                            <th class=TH_CLASS></th>
                        </tr>
                    </thead>
                    <tbody class="bg-white divide-y divide-gray-200">
                        <For
                            each=move || records.get()
                            key=|record| record.clone()
                            children=move |record| {
                                let id = record.id.clone();
                                let chosen = record.clone();
                                view! {
                                    <tr>
                                        <td class=TD_CLASS>{format!("{} {}", record.first_name, record.last_name)}</td>
                                        <td class=TD_CLASS>{record.national_id.clone()}</td>
                                        <td class=TD_CLASS>{record.date_of_birth.clone()}</td>
                                        <td class=TD_CLASS>{record.gender.clone()}</td>
                                        <td class=TD_CLASS><StatusBadge status=record.status.clone()/></td>
                                        <td class=TD_CLASS>
                                            <Show when=move || is_admin>
                                                <button
                                                    class="text-blue-600 hover:underline mr-4"
                                                    on:click={
                                                        let chosen = chosen.clone();
                                                        move |_| set_editing.set(Editing::Existing(chosen.clone()))
                                                    }
                                                >
                                                    "Edit"
                                                </button>
                                                <button
                                                    class="text-red-600 hover:underline"
                                                    on:click={
                                                        let id = id.clone();
                                                        move |_| remove(id.clone())
                                                    }
                                                >
                                                    "Delete"
                                                </button>
                                            </Show>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
                <Show when=move || records.with(Vec::is_empty)>
                    <p class="px-6 py-4 text-gray-500">"No records found."</p>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn RecordForm(
    initial: Option<CriminalRecord>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let session = use_session();
    let existing_id = initial.as_ref().map(|r| r.id.clone());
    let field = |pick: fn(&CriminalRecord) -> String, default: &str| {
        create_signal(initial.as_ref().map(pick).unwrap_or_else(|| default.to_string()))
    };

    let (first_name, set_first_name) = field(|r| r.first_name.clone(), "");
    let (last_name, set_last_name) = field(|r| r.last_name.clone(), "");
    let (date_of_birth, set_date_of_birth) = field(|r| r.date_of_birth.clone(), "");
    let (national_id, set_national_id) = field(|r| r.national_id.clone(), "");
    let (gender, set_gender) = field(|r| r.gender.clone(), "Male");
    let (address, set_address) = field(|r| r.address.clone().unwrap_or_default(), "");
    let (status, set_status) = field(|r| r.status.clone(), "active");
    let (error, set_error) = create_signal(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = CriminalRecordForm {
            first_name: first_name.get_untracked(),
            last_name: last_name.get_untracked(),
            date_of_birth: date_of_birth.get_untracked(),
            national_id: national_id.get_untracked(),
            gender: gender.get_untracked(),
            address: non_empty(address.get_untracked()),
            status: status.get_untracked(),
        };
        let token = token(session);
        let existing_id = existing_id.clone();
        spawn_local(async move {
            let result = match existing_id {
                Some(id) => {
                    api::put::<_, CriminalRecord>(&token, &format!("/api/criminal-records/{}", id), &form)
                        .await
                }
                None => api::post::<_, CriminalRecord>(Some(&token), "/api/criminal-records", &form).await,
            };
            match result {
                Ok(_) => on_saved.call(()),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let choice = move |value: ReadSignal<String>, option: &'static str| {
        view! { <option value=option selected=move || value.get() == option>{option}</option> }
    };

    view! {
        <form on:submit=on_submit class="bg-white rounded-lg shadow p-6 grid grid-cols-1 md:grid-cols-2 gap-4">
            <div class="md:col-span-2"><ErrorBanner error=error/></div>
            <div>
                <label class=LABEL_CLASS>"First name"</label>
                <input type="text" required class=INPUT_CLASS
                    on:input=move |ev| set_first_name.set(event_target_value(&ev))
                    prop:value=first_name/>
            </div>
            <div>
                <label class=LABEL_CLASS>"Last name"</label>
                <input type="text" required class=INPUT_CLASS
                    on:input=move |ev| set_last_name.set(event_target_value(&ev))
                    prop:value=last_name/>
            </div>
            <div>
                <label class=LABEL_CLASS>"Date of birth"</label>
                <input type="date" required class=INPUT_CLASS
                    on:input=move |ev| set_date_of_birth.set(event_target_value(&ev))
                    prop:value=date_of_birth/>
            </div>
            <div>
                <label class=LABEL_CLASS>"National ID"</label>
                <input type="text" required class=INPUT_CLASS
                    on:input=move |ev| set_national_id.set(event_target_value(&ev))
                    prop:value=national_id/>
            </div>
            <div>
                <label class=LABEL_CLASS>"Gender"</label>
                <select class=INPUT_CLASS on:change=move |ev| set_gender.set(event_target_value(&ev))>
                    {choice(gender, "Male")}
                    {choice(gender, "Female")}
                    {choice(gender, "Other")}
                </select>
            </div>
            <div>
                <label class=LABEL_CLASS>"Status"</label>
                <select class=INPUT_CLASS on:change=move |ev| set_status.set(event_target_value(&ev))>
                    {choice(status, "active")}
                    {choice(status, "archived")}
                    {choice(status, "sealed")}
                </select>
            </div>
            <div class="md:col-span-2">
                <label class=LABEL_CLASS>"Address"</label>
                <input type="text" class=INPUT_CLASS
                    on:input=move |ev| set_address.set(event_target_value(&ev))
                    prop:value=address/>
            </div>
            <div class="md:col-span-2 flex gap-4">
                <button type="submit" class=BUTTON_CLASS>"Save record"</button>
                <button type="button" class="text-gray-600" on:click=move |_| on_cancel.call(())>"Cancel"</button>
            </div>
        </form>
    }
}
