//! Rendering utilities: the distributable `socket.yml` and CI surfaces (Markdown, GitHub annotations).

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod socket_yml;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use socket_yml::render_socket_yml;
