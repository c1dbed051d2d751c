pub mod config_content;
pub mod html_content;
pub mod readme_content;
