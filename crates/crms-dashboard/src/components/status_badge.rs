use leptos::*;

/// Colour-coded pill for statuses, severities and roles.
#[component]
pub fn StatusBadge(#[prop(into)] status: String) -> impl IntoView {
    let (bg, text) = match status.as_str() {
        "solved" | "completed" | "active" | "Low" => ("bg-green-100", "text-green-800"),
        "under_investigation" | "Medium" | "officer" => ("bg-blue-100", "text-blue-800"),
        "reported" | "pending" | "public" => ("bg-yellow-100", "text-yellow-800"),
        "High" | "admin" | "suspended" | "DELETE" => ("bg-red-100", "text-red-800"),
        _ => ("bg-gray-100", "text-gray-800"),
    };
    let label = status.replace('_', " ");

    view! {
        <span class=format!("px-2 py-1 text-xs font-medium rounded-full capitalize {} {}", bg, text)>
            {label}
        </span>
    }
}

#[component]
pub fn ErrorBanner(error: ReadSignal<Option<String>>) -> impl IntoView {
    move || {
        error.get().map(|message| {
            view! {
                <div class="bg-red-50 border border-red-200 text-red-700 rounded-md px-4 py-3">
                    {message}
                </div>
            }
        })
    }
}
