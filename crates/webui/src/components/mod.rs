pub mod change_analysis_page;
pub mod code_change_table;
pub mod commit_range_form;
pub mod not_found;
pub mod notification;
pub mod recommendations_page;
pub mod repository_browser_page;
pub mod repository_management_page;
pub mod repository_select;
pub mod revision;
pub mod test_case_management_page;
