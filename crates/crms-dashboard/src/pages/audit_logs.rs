//! Audit trail

use super::{short_time, TD_CLASS, TH_CLASS};
use crate::api;
use crate::components::{ErrorBanner, StatusBadge};
use crate::session::{token, use_session};
use crate::types::AuditLog;
use leptos::*;

#[component]
pub fn AuditLogsPage() -> impl IntoView {
    let session = use_session();
    let (logs, set_logs) = create_signal(Vec::<AuditLog>::new());
    let (error, set_error) = create_signal(None::<String>);

    create_effect(move |_| {
        let token = token(session);
        spawn_local(async move {
            match api::get::<Vec<AuditLog>>(&token, "/api/audit-logs").await {
                Ok(data) => set_logs.set(data),
                Err(e) => set_error.set(Some(e)),
            }
        });
    });

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold text-gray-900">"Audit Logs"</h1>
            <ErrorBanner error=error/>

            <div class="bg-white rounded-lg shadow">
                <table class="min-w-full divide-y divide-gray-200">
                    <thead>
                        <tr>
                            <th class=TH_CLASS>"When"</th>
                            <th class=TH_CLASS>"User"</th>
                            <th class=TH_CLASS>"Action"</th>
                            <th class=TH_CLASS>"Table"</th>
                            <th class=TH_CLASS>"Record"</th>
                            <th class=TH_CLASS>"IP"</th>
                        </tr>
                    </thead>
                    <tbody class="bg-white divide-y divide-gray-200">
                        <For
                            each=move || logs.get()
                            key=|log| log.id.clone()
                            children=|log| view! {
                                <tr>
                                    <td class=format!("{} text-gray-500", TD_CLASS)>{short_time(&log.created_at)}</td>
                                    <td class=TD_CLASS>{log.user_name.clone().unwrap_or_else(|| "System".to_string())}</td>
                                    <td class=TD_CLASS><StatusBadge status=log.action.clone()/></td>
                                    <td class=TD_CLASS>{log.table_name.clone()}</td>
                                    <td class=format!("{} font-mono text-xs", TD_CLASS)>{log.record_id.clone().unwrap_or_default()}</td>
                                    <td class=TD_CLASS>{log.ip_address.clone().unwrap_or_default()}</td>
                                </tr>
                            }
                        />
                    </tbody>
                </table>
                <Show when=move || logs.with(Vec::is_empty)>
                    <p class="px-6 py-4 text-gray-500">"No activity recorded."</p>
                </Show>
            </div>
        </div>
    }
}
