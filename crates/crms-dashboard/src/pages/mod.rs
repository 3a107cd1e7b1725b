//! Dashboard pages

mod audit_logs;
mod auth;
mod crime_reports;
mod criminal_records;
mod dashboard;
mod investigations;
mod officers;
mod users;

pub use audit_logs::AuditLogsPage;
pub use auth::{LoginPage, SignUpPage, SignUpSuccessPage};
pub use crime_reports::CrimeReportsPage;
pub use criminal_records::CriminalRecordsPage;
pub use dashboard::Dashboard;
pub use investigations::InvestigationsPage;
pub use officers::OfficersPage;
pub use users::UsersPage;

pub(crate) const INPUT_CLASS: &str =
    "w-full px-3 py-2 border border-gray-300 rounded-md focus:ring-2 focus:ring-blue-500 focus:border-blue-500";
pub(crate) const LABEL_CLASS: &str = "block text-sm font-medium text-gray-700 mb-1";
pub(crate) const BUTTON_CLASS: &str =
    "px-4 py-2 bg-blue-600 hover:bg-blue-700 text-white font-medium rounded-md disabled:opacity-50";
pub(crate) const TH_CLASS: &str = "px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase";
pub(crate) const TD_CLASS: &str = "px-6 py-4 whitespace-nowrap text-sm";

/// `2024-06-01T18:45:00Z` shown as `2024-06-01 18:45`.
pub(crate) fn short_time(value: &str) -> String {
    value.replace('T', " ").chars().take(16).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_time() {
        assert_eq!(short_time("2024-06-01T18:45:00.123Z"), "2024-06-01 18:45");
        assert_eq!(short_time("2024-06-01"), "2024-06-01");
    }
}
