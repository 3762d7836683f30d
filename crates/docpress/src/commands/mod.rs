//! CLI command implementations.

mod html;
mod upload;

pub(crate) use html::HtmlArgs;
pub(crate) use upload::{DeleteVersionArgs, UploadArgs};
