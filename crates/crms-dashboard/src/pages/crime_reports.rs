//! Crime reports: list, filing, evidence, assignment and status updates

use super::{short_time, BUTTON_CLASS, INPUT_CLASS, LABEL_CLASS, TD_CLASS, TH_CLASS};
use crate::api;
use crate::components::{ErrorBanner, StatusBadge};
use crate::files::{self, EVIDENCE_ACCEPT};
use crate::session::{token, use_session};
use crate::types::{
    non_empty, with_seconds, AssignmentForm, CrimeReport, CrimeReportForm,
    CrimeReportUpdateForm, Profile, ReportFilter,
};
use leptos::*;

const STATUSES: &[(&str, &str)] = &[
    ("reported", "Reported"),
    ("under_investigation", "Under Investigation"),
    ("solved", "Solved"),
    ("closed", "Closed"),
];

const SEVERITIES: &[&str] = &["Low", "Medium", "High"];

#[component]
pub fn CrimeReportsPage() -> impl IntoView {
    let session = use_session();
    let (role, my_id) = session.with_untracked(|s| {
        s.as_ref()
            .map(|s| (s.profile.role.clone(), s.profile.id.clone()))
            .unwrap_or_default()
    });
    let is_officer = role == "officer";
    let is_staff = role == "admin" || is_officer;

    let (filter, set_filter) = create_signal(ReportFilter::default());
    let (reports, set_reports) = create_signal(Vec::<CrimeReport>::new());
    let (selected, set_selected) = create_signal(None::<CrimeReport>);
    let (show_form, set_show_form) = create_signal(false);
    let (version, set_version) = create_signal(0u32);
    let (error, set_error) = create_signal(None::<String>);

    create_effect(move |_| {
        version.track();
        let filter = filter.get();
        let token = token(session);
        spawn_local(async move {
            match api::get_with::<_, Vec<CrimeReport>>(&token, "/api/crime-reports", &filter).await {
                Ok(data) => {
                    set_reports.set(data);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    });

    let changed = Callback::new(move |_: ()| {
        set_selected.set(None);
        set_show_form.set(false);
        set_version.update(|v| *v += 1);
    });
    let closed = Callback::new(move |_: ()| set_selected.set(None));

    let tab = move |status: Option<&'static str>, label: &'static str| {
        let active = move || filter.with(|f| f.status.as_deref() == status);
        view! {
            <button
                class=move || if active() {
                    "px-4 py-2 text-sm font-medium border-b-2 border-blue-600 text-blue-600"
                } else {
                    "px-4 py-2 text-sm font-medium text-gray-500 hover:text-gray-700"
                }
                on:click=move |_| set_filter.update(|f| f.status = status.map(str::to_string))
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold text-gray-900">"Crime Reports"</h1>
                <button class=BUTTON_CLASS on:click=move |_| set_show_form.update(|v| *v = !*v)>
                    {move || if show_form.get() { "Cancel" } else { "File a report" }}
                </button>
            </div>
            <ErrorBanner error=error/>

            <Show when=move || show_form.get()>
                <ReportForm on_saved=changed/>
            </Show>

            <div class="bg-white rounded-lg shadow">
                <div class="flex items-center justify-between border-b px-4">
                    <div class="flex">
                        {tab(None, "All")}
                        {STATUSES.iter().map(|(value, label)| tab(Some(*value), *label)).collect_view()}
                    </div>
                    <div class="flex items-center gap-4 py-2">
                        <Show when=move || is_officer>
                            <label class="text-sm text-gray-600 flex items-center gap-2">
                                <input
                                    type="checkbox"
                                    on:change=move |ev| {
                                        set_filter.update(|f| f.assigned_to_me = event_target_checked(&ev))
                                    }
                                />
                                "Assigned to me"
                            </label>
                        </Show>
                        <input
                            type="search"
                            placeholder="Search type, location, status"
                            class="px-3 py-1 border border-gray-300 rounded-md text-sm"
                            on:change=move |ev| {
                                set_filter.update(|f| f.search = non_empty(event_target_value(&ev)))
                            }
                        />
                    </div>
                </div>

                <table class="min-w-full divide-y divide-gray-200">
                    <thead>
                        <tr>
                            <th class=TH_CLASS>"Type"</th>
                            <th class=TH_CLASS>"Location"</th>
                            <th class=TH_CLASS>"Severity"</th>
                            <th class=TH_CLASS>"Status"</th>
                            <th class=TH_CLASS>{if is_staff { "Reporter" } else { "" }}</th>
                            <th class=TH_CLASS>"Officer"</th>
                            <th class=TH_CLASS>"Occurred"</th>
                            <th class=TH_CLASS></th>
                        </tr>
                    </thead>
                    <tbody class="bg-white divide-y divide-gray-200">
                        <For
                            each=move || reports.get()
                            key=|report| (report.id.clone(), report.status.clone())
                            children=move |report| {
                                let chosen = report.clone();
                                let reporter = if is_staff {
                                    report.reporter.as_ref().map(|p| p.full_name.clone()).unwrap_or_default()
                                } else {
                                    String::new()
                                };
                                let officer = report
                                    .officer
                                    .as_ref()
                                    .map(|p| p.full_name.clone())
                                    .unwrap_or_else(|| "Unassigned".to_string());
                                view! {
                                    <tr>
                                        <td class=TD_CLASS>{report.crime_type.clone()}</td>
                                        <td class=TD_CLASS>{report.location.clone()}</td>
                                        <td class=TD_CLASS><StatusBadge status=report.severity.clone()/></td>
                                        <td class=TD_CLASS><StatusBadge status=report.status.clone()/></td>
                                        <td class=TD_CLASS>{reporter}</td>
                                        <td class=TD_CLASS>{officer}</td>
                                        <td class=format!("{} text-gray-500", TD_CLASS)>{short_time(&report.date_occurred)}</td>
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
                <Show when=move || reports.with(Vec::is_empty)>
                    <p class="px-6 py-4 text-gray-500">"No reports match."</p>
                </Show>
            </div>

            {move || {
                let role = role.clone();
                let my_id = my_id.clone();
                selected.get().map(|report| view! {
                    <ReportDetail report=report role=role my_id=my_id on_changed=changed on_close=closed/>
                })
            }}
        </div>
    }
}

#[component]
fn ReportForm(on_saved: Callback<()>) -> impl IntoView {
    let session = use_session();
    let (crime_type, set_crime_type) = create_signal(String::new());
    let (description, set_description) = create_signal(String::new());
    let (location, set_location) = create_signal(String::new());
    let (date_occurred, set_date_occurred) = create_signal(String::new());
    let (severity, set_severity) = create_signal(String::from("Medium"));
    let (witness_info, set_witness_info) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let evidence_input = create_node_ref::<html::Input>();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = CrimeReportForm {
            crime_type: crime_type.get_untracked(),
            description: description.get_untracked(),
            location: location.get_untracked(),
            date_occurred: with_seconds(&date_occurred.get_untracked()),
            severity: severity.get_untracked(),
            witness_info: non_empty(witness_info.get_untracked()),
        };
        let picker = evidence_input.get_untracked();
        let token = token(session);
        spawn_local(async move {
            let evidence = match picker {
                Some(input) => match files::selected_files(&input).await {
                    Ok(evidence) => evidence,
                    Err(e) => return set_error.set(Some(e)),
                },
                None => Vec::new(),
            };
            let report =
                match api::post::<_, CrimeReport>(Some(&token), "/api/crime-reports", &form).await {
                    Ok(report) => report,
                    Err(e) => return set_error.set(Some(e)),
                };
            if !evidence.is_empty() {
                if let Err(e) = api::upload_evidence::<CrimeReport>(&token, &report.id, evidence).await {
                    return set_error.set(Some(format!(
                        "Report filed, but the evidence was not attached: {}",
                        e
                    )));
                }
            }
            on_saved.call(());
        });
    };

    view! {
        <form on:submit=on_submit class="bg-white rounded-lg shadow p-6 grid grid-cols-1 md:grid-cols-2 gap-4">
            <div class="md:col-span-2"><ErrorBanner error=error/></div>
            <div>
                <label class=LABEL_CLASS>"Crime type"</label>
                <input type="text" required list="crime-types" class=INPUT_CLASS
                    on:input=move |ev| set_crime_type.set(event_target_value(&ev))
                    prop:value=crime_type/>
                <datalist id="crime-types">
                    <option value="Theft"/>
                    <option value="Burglary"/>
                    <option value="Assault"/>
                    <option value="Fraud"/>
                    <option value="Vandalism"/>
                    <option value="Robbery"/>
                </datalist>
            </div>
            <div>
                <label class=LABEL_CLASS>"Location"</label>
                <input type="text" required class=INPUT_CLASS
                    on:input=move |ev| set_location.set(event_target_value(&ev))
                    prop:value=location/>
            </div>
            <div>
                <label class=LABEL_CLASS>"Date and time"</label>
                <input type="datetime-local" required class=INPUT_CLASS
                    on:input=move |ev| set_date_occurred.set(event_target_value(&ev))
                    prop:value=date_occurred/>
            </div>
            <div>
                <label class=LABEL_CLASS>"Severity"</label>
                <select class=INPUT_CLASS on:change=move |ev| set_severity.set(event_target_value(&ev))>
                    {SEVERITIES.iter().map(|s| view! {
                        <option value=*s selected={*s == "Medium"}>{*s}</option>
                    }).collect_view()}
                </select>
            </div>
            <div class="md:col-span-2">
                <label class=LABEL_CLASS>"Description"</label>
                <textarea rows="4" required class=INPUT_CLASS
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                    prop:value=description></textarea>
            </div>
            <div class="md:col-span-2">
                <label class=LABEL_CLASS>"Witness information"</label>
                <textarea rows="2" class=INPUT_CLASS placeholder="Optional"
                    on:input=move |ev| set_witness_info.set(event_target_value(&ev))
                    prop:value=witness_info></textarea>
            </div>
            <div class="md:col-span-2">
                <label class=LABEL_CLASS>"Evidence"</label>
                <input type="file" multiple accept=EVIDENCE_ACCEPT class="text-sm" node_ref=evidence_input/>
                <p class="mt-1 text-xs text-gray-500">"Photos, videos, PDF or Word documents"</p>
            </div>
            <div class="md:col-span-2">
                <button type="submit" class=BUTTON_CLASS>"Submit report"</button>
            </div>
        </form>
    }
}

#[component]
fn ReportDetail(
    report: CrimeReport,
    role: String,
    my_id: String,
    on_changed: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let session = use_session();
    let (error, set_error) = create_signal(None::<String>);
    let is_admin = role == "admin";
    let can_update_status =
        role == "officer" && report.assigned_officer.as_deref() == Some(my_id.as_str());
    // public users only ever see their own reports
    let can_edit = is_admin || role == "public";
    let can_attach = can_edit || can_update_status;

    let report_id = report.id.clone();
    let delete = move |_| {
        let token = token(session);
        let path = format!("/api/crime-reports/{}", report_id);
        spawn_local(async move {
            match api::delete(&token, &path).await {
                Ok(()) => on_changed.call(()),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let evidence = report.evidence_urls.clone();
    let row = |label: &'static str, value: Option<String>| {
        value.map(|value| view! {
            <div>
                <dt class="text-sm text-gray-500">{label}</dt>
                <dd class="text-gray-900 whitespace-pre-line">{value}</dd>
            </div>
        })
    };

    view! {
        <div class="bg-white rounded-lg shadow p-6 space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-xl font-semibold">{report.crime_type.clone()} " at " {report.location.clone()}</h2>
                <button class="text-gray-500 hover:text-gray-700" on:click=move |_| on_close.call(())>"Close"</button>
            </div>
            <ErrorBanner error=error/>
            <div class="flex gap-2">
                <StatusBadge status=report.severity.clone()/>
                <StatusBadge status=report.status.clone()/>
            </div>
            <dl class="grid grid-cols-1 md:grid-cols-2 gap-4">
                {row("Description", Some(report.description.clone()))}
                {row("Occurred", Some(short_time(&report.date_occurred)))}
                {row("Witnesses", report.witness_info.clone())}
                {row("Reported by", report.reporter.as_ref().map(|p| p.full_name.clone()))}
                {row("Assigned officer", report.officer.as_ref().map(|p| p.full_name.clone()))}
                {row("Suspect", report.suspect_name.clone())}
                {row("Admin notes", report.admin_notes.clone())}
            </dl>

            <div>
                <h3 class="text-sm font-medium text-gray-700 mb-2">"Evidence"</h3>
                <Show
                    when={
                        let empty = evidence.is_empty();
                        move || !empty
                    }
                    fallback=|| view! { <p class="text-sm text-gray-500">"No evidence attached."</p> }
                >
                    <ul class="list-disc list-inside text-sm">
                        {evidence.iter().enumerate().map(|(i, stored)| view! {
                            <li>
                                <a href=api::file_url(stored) target="_blank" class="text-blue-600 hover:underline">
                                    {format!("Evidence file {}", i + 1)}
                                </a>
                            </li>
                        }).collect_view()}
                    </ul>
                </Show>
            </div>

            {can_attach.then(|| view! {
                <EvidenceForm report_id=report.id.clone() on_saved=on_changed/>
            })}
            {can_edit.then(|| view! {
                <DetailsForm report=report.clone() can_unlink=is_admin on_saved=on_changed/>
            })}
            {is_admin.then(|| view! {
                <AssignForm report=report.clone() on_saved=on_changed/>
            })}
            {can_update_status.then(|| view! {
                <StatusForm report=report.clone() on_saved=on_changed/>
            })}
            {is_admin.then(|| view! {
                <button class="px-4 py-2 bg-red-600 hover:bg-red-700 text-white rounded-md" on:click=delete>
                    "Delete report"
                </button>
            })}
        </div>
    }
}

#[component]
fn EvidenceForm(report_id: String, on_saved: Callback<()>) -> impl IntoView {
    let session = use_session();
    let (pending, set_pending) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);
    let evidence_input = create_node_ref::<html::Input>();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(input) = evidence_input.get_untracked() else {
            return;
        };
        let token = token(session);
        let report_id = report_id.clone();
        set_pending.set(true);
        spawn_local(async move {
            let result = match files::selected_files(&input).await {
                Ok(evidence) if evidence.is_empty() => Err("Choose at least one file".to_string()),
                Ok(evidence) => api::upload_evidence::<CrimeReport>(&token, &report_id, evidence).await,
                Err(e) => Err(e),
            };
            set_pending.set(false);
            match result {
                Ok(_) => on_saved.call(()),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    view! {
        <form on:submit=on_submit class="border-t pt-4 space-y-2">
            <h3 class="font-medium text-gray-900">"Add evidence"</h3>
            <ErrorBanner error=error/>
            <div class="flex items-center gap-4">
                <input type="file" multiple required accept=EVIDENCE_ACCEPT class="text-sm" node_ref=evidence_input/>
                <button type="submit" class=BUTTON_CLASS disabled=move || pending.get()>
                    {move || if pending.get() { "Uploading..." } else { "Upload" }}
                </button>
            </div>
        </form>
    }
}

#[component]
fn DetailsForm(report: CrimeReport, can_unlink: bool, on_saved: Callback<()>) -> impl IntoView {
    let session = use_session();
    let (crime_type, set_crime_type) = create_signal(report.crime_type.clone());
    let (description, set_description) = create_signal(report.description.clone());
    let (location, set_location) = create_signal(report.location.clone());
    let (date_occurred, set_date_occurred) = create_signal(report.date_occurred.clone());
    let (severity, set_severity) = create_signal(report.severity.clone());
    let (witness_info, set_witness_info) =
        create_signal(report.witness_info.clone().unwrap_or_default());
    let (unlink, set_unlink) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);
    let has_suspect = can_unlink && report.criminal_id.is_some();

    let path = format!("/api/crime-reports/{}", report.id);
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = CrimeReportUpdateForm {
            crime_type: crime_type.get_untracked(),
            description: description.get_untracked(),
            location: location.get_untracked(),
            date_occurred: with_seconds(&date_occurred.get_untracked()),
            severity: severity.get_untracked(),
            witness_info: non_empty(witness_info.get_untracked()),
            status: None,
            unlink_criminal: unlink.get_untracked(),
        };
        let token = token(session);
        let path = path.clone();
        spawn_local(async move {
            match api::put::<_, CrimeReport>(&token, &path, &form).await {
                Ok(_) => on_saved.call(()),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    view! {
        <form on:submit=on_submit class="border-t pt-4 grid grid-cols-1 md:grid-cols-2 gap-4">
            <h3 class="md:col-span-2 font-medium text-gray-900">"Edit details"</h3>
            <div class="md:col-span-2"><ErrorBanner error=error/></div>
            <div>
                <label class=LABEL_CLASS>"Crime type"</label>
                <input type="text" required class=INPUT_CLASS
                    on:input=move |ev| set_crime_type.set(event_target_value(&ev))
                    prop:value=crime_type/>
            </div>
            <div>
                <label class=LABEL_CLASS>"Location"</label>
                <input type="text" required class=INPUT_CLASS
                    on:input=move |ev| set_location.set(event_target_value(&ev))
                    prop:value=location/>
            </div>
            <div>
                <label class=LABEL_CLASS>"Date and time"</label>
                <input type="datetime-local" step="1" required class=INPUT_CLASS
                    on:input=move |ev| set_date_occurred.set(event_target_value(&ev))
                    prop:value=date_occurred/>
            </div>
            <div>
                <label class=LABEL_CLASS>"Severity"</label>
                <select class=INPUT_CLASS on:change=move |ev| set_severity.set(event_target_value(&ev))>
                    {SEVERITIES.iter().map(|s| view! {
                        <option value=*s selected=move || severity.get() == *s>{*s}</option>
                    }).collect_view()}
                </select>
            </div>
            <div class="md:col-span-2">
                <label class=LABEL_CLASS>"Description"</label>
                <textarea rows="3" required class=INPUT_CLASS
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                    prop:value=description></textarea>
            </div>
            <div class="md:col-span-2">
                <label class=LABEL_CLASS>"Witness information"</label>
                <textarea rows="2" class=INPUT_CLASS
                    on:input=move |ev| set_witness_info.set(event_target_value(&ev))
                    prop:value=witness_info></textarea>
            </div>
            <Show when=move || has_suspect>
                <label class="md:col-span-2 text-sm text-gray-600 flex items-center gap-2">
                    <input type="checkbox" on:change=move |ev| set_unlink.set(event_target_checked(&ev))/>
                    "Remove the linked suspect"
                </label>
            </Show>
            <div class="md:col-span-2">
                <button type="submit" class=BUTTON_CLASS>"Save changes"</button>
            </div>
        </form>
    }
}

#[component]
fn AssignForm(report: CrimeReport, on_saved: Callback<()>) -> impl IntoView {
    let session = use_session();
    let (officers, set_officers) = create_signal(Vec::<Profile>::new());
    let (officer_id, set_officer_id) =
        create_signal(report.assigned_officer.clone().unwrap_or_default());
    let (status, set_status) = create_signal(if report.status == "reported" {
        "under_investigation".to_string()
    } else {
        report.status.clone()
    });
    let (notes, set_notes) = create_signal(report.admin_notes.clone().unwrap_or_default());
    let (error, set_error) = create_signal(None::<String>);

    create_effect(move |_| {
        let token = token(session);
        spawn_local(async move {
            match api::get::<Vec<Profile>>(&token, "/api/officers").await {
                Ok(data) => set_officers.set(data),
                Err(e) => set_error.set(Some(e)),
            }
        });
    });

    let path = format!("/api/crime-reports/{}/assign", report.id);
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = AssignmentForm {
            officer_id: officer_id.get_untracked(),
            status: status.get_untracked(),
            admin_notes: non_empty(notes.get_untracked()),
        };
        let token = token(session);
        let path = path.clone();
        spawn_local(async move {
            match api::post::<_, CrimeReport>(Some(&token), &path, &form).await {
                Ok(_) => on_saved.call(()),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    view! {
        <form on:submit=on_submit class="border-t pt-4 grid grid-cols-1 md:grid-cols-3 gap-4">
            <h3 class="md:col-span-3 font-medium text-gray-900">"Assign officer"</h3>
            <div class="md:col-span-3"><ErrorBanner error=error/></div>
            <div>
                <label class=LABEL_CLASS>"Officer"</label>
                <select required class=INPUT_CLASS on:change=move |ev| set_officer_id.set(event_target_value(&ev))>
                    <option value="">"Select an officer"</option>
                    <For
                        each=move || officers.get()
                        key=|officer| officer.id.clone()
                        children=move |officer| {
                            let selected = officer.id == officer_id.get_untracked();
                            let label = match &officer.badge_number {
                                Some(badge) => format!("{} ({})", officer.full_name, badge),
                                None => officer.full_name.clone(),
                            };
                            view! { <option value=officer.id.clone() selected=selected>{label}</option> }
                        }
                    />
                </select>
            </div>
            <div>
                <label class=LABEL_CLASS>"Status"</label>
                <StatusSelect value=status set_value=set_status/>
            </div>
            <div>
                <label class=LABEL_CLASS>"Notes"</label>
                <input type="text" class=INPUT_CLASS
                    on:input=move |ev| set_notes.set(event_target_value(&ev))
                    prop:value=notes/>
            </div>
            <div class="md:col-span-3">
                <button type="submit" class=BUTTON_CLASS>"Assign"</button>
            </div>
        </form>
    }
}

#[component]
fn StatusForm(report: CrimeReport, on_saved: Callback<()>) -> impl IntoView {
    let session = use_session();
    let (status, set_status) = create_signal(report.status.clone());
    let (error, set_error) = create_signal(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = CrimeReportUpdateForm::status_change(&report, status.get_untracked());
        let path = format!("/api/crime-reports/{}", report.id);
        let token = token(session);
        spawn_local(async move {
            match api::put::<_, CrimeReport>(&token, &path, &form).await {
                Ok(_) => on_saved.call(()),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    view! {
        <form on:submit=on_submit class="border-t pt-4 flex items-end gap-4">
            <ErrorBanner error=error/>
            <div>
                <label class=LABEL_CLASS>"Case status"</label>
                <StatusSelect value=status set_value=set_status/>
            </div>
            <button type="submit" class=BUTTON_CLASS>"Update status"</button>
        </form>
    }
}

#[component]
fn StatusSelect(value: ReadSignal<String>, set_value: WriteSignal<String>) -> impl IntoView {
    view! {
        <select class=INPUT_CLASS on:change=move |ev| set_value.set(event_target_value(&ev))>
            {STATUSES.iter().map(|(status, label)| view! {
                <option value=*status selected=move || value.get() == *status>{*label}</option>
            }).collect_view()}
        </select>
    }
}
