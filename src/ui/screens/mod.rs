mod status;

pub(crate) use status::{StatusAction, render_error_banner, render_view_status};
