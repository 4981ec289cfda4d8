pub mod alert;
pub mod booking_form;
pub mod booking_page;
pub mod calendar_grid;
pub mod dashboard;
pub mod login;
pub mod settings_panel;
pub mod spinner;
