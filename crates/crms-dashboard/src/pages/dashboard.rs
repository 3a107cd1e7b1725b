//! Dashboard overview page

use super::{short_time, TD_CLASS, TH_CLASS};
use crate::api;
use crate::components::{ErrorBanner, StatCard, StatusBadge};
use crate::session::{token, use_session};
use crate::types::{CrimeReport, DashboardSummary};
use leptos::*;

#[component]
pub fn Dashboard() -> impl IntoView {
    let session = use_session();
    let (summary, set_summary) = create_signal(DashboardSummary::default());
    let (error, set_error) = create_signal(None::<String>);

    // Fetch on mount
    create_effect(move |_| {
        let token = token(session);
        spawn_local(async move {
            match api::get::<DashboardSummary>(&token, "/api/dashboard").await {
                Ok(data) => set_summary.set(data),
                Err(e) => set_error.set(Some(e)),
            }
        });
    });

    let count = move |pick: fn(&DashboardSummary) -> Option<i64>| {
        Signal::derive(move || summary.with(pick).unwrap_or(0).to_string())
    };
    let status = move |key: &'static str| {
        Signal::derive(move || {
            summary
                .with(|s| s.status_counts.get(key).copied())
                .unwrap_or(0)
                .to_string()
        })
    };
    let role = move || summary.with(|s| s.role.clone());

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold text-gray-900">"Dashboard"</h1>
            <ErrorBanner error=error/>

            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6">
                <StatCard title="Crime Reports" value=count(|s| Some(s.crime_reports)) icon="report"/>
                <Show when=move || role() == "admin" || role() == "officer">
                    <StatCard title="Criminal Records" value=count(|s| s.criminal_records) icon="file"/>
                    <StatCard title="Investigations" value=count(|s| s.investigations) icon="search"/>
                </Show>
                <Show when=move || role() == "admin">
                    <StatCard title="Users" value=count(|s| s.users) icon="users"/>
                </Show>
                <Show when=move || role() == "officer">
                    <StatCard title="Assigned Cases" value=count(|s| s.assigned_cases) icon="badge"/>
                </Show>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-4 gap-6">
                <StatCard title="Reported" value=status("reported") icon="new"/>
                <StatCard title="Under Investigation" value=status("under_investigation") icon="clock"/>
                <StatCard title="Solved" value=status("solved") icon="check"/>
                <StatCard title="Closed" value=status("closed") icon="lock"/>
            </div>

            <Show when=move || role() == "officer">
                <div class="bg-white rounded-lg shadow p-6">
                    <h2 class="text-xl font-semibold mb-4">"My Assigned Reports"</h2>
                    <ReportTable reports=Signal::derive(move || summary.with(|s| s.assigned_reports.clone()))/>
                </div>
            </Show>

            <div class="bg-white rounded-lg shadow p-6">
                <h2 class="text-xl font-semibold mb-4">"Recent Reports"</h2>
                <ReportTable reports=Signal::derive(move || summary.with(|s| s.recent_reports.clone()))/>
            </div>
        </div>
    }
}

#[component]
fn ReportTable(reports: Signal<Vec<CrimeReport>>) -> impl IntoView {
    view! {
        <Show
            when=move || reports.with(|r| !r.is_empty())
            fallback=|| view! { <p class="text-gray-500">"No reports yet."</p> }
        >
            <table class="min-w-full divide-y divide-gray-200">
                <thead>
                    <tr>
                        <th class=TH_CLASS>"Type"</th>
                        <th class=TH_CLASS>"Location"</th>
                        <th class=TH_CLASS>"Severity"</th>
                        <th class=TH_CLASS>"Status"</th>
                        <th class=TH_CLASS>"Reported"</th>
                    </tr>
                </thead>
                <tbody class="bg-white divide-y divide-gray-200">
                    <For
                        each=move || reports.get()
                        key=|report| report.id.clone()
                        children=move |report| {
                            view! {
                                <tr>
                                    <td class=TD_CLASS>
                                        <a href="/dashboard/crime-reports" class="text-blue-600 hover:underline">
                                            {report.crime_type.clone()}
                                        </a>
                                    </td>
                                    <td class=TD_CLASS>{report.location.clone()}</td>
                                    <td class=TD_CLASS><StatusBadge status=report.severity.clone()/></td>
                                    <td class=TD_CLASS><StatusBadge status=report.status.clone()/></td>
                                    <td class=format!("{} text-gray-500", TD_CLASS)>{short_time(&report.created_at)}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </Show>
    }
}
