//! Web survey UI: Askama-rendered pages with HTMX partial refresh.

pub mod handlers;
