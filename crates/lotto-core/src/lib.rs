// Library root: the draw engine, partner form submitter, page context and
// the orchestrator that ties them to a front end.

pub mod app;
pub mod config;
pub mod draw;
pub mod form;
pub mod page;
pub mod protocol;
