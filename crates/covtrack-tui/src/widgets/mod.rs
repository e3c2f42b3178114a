pub mod count_fmt;
pub mod sub_tabs;
