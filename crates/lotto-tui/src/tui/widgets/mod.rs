// TUI widget modules for each page region.

pub mod balls;
pub mod help_bar;
pub mod partner_form;
pub mod quit_confirm;
pub mod round_note;
pub mod status_bar;
