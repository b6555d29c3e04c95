mod action_bar;
mod card;
pub mod link_form;
pub mod qr_preview;
pub mod relations_table;
mod step_header;

pub use action_bar::{COPIED_LABEL, COPY_LABEL, DOWNLOAD_QR_LABEL, action_bar};
pub use card::card;
pub use link_form::link_form;
pub use qr_preview::qr_preview;
pub use relations_table::relations_table;
pub use step_header::step_header;
