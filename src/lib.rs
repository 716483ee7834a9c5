// Library surface of imgstash-server: the image repository core and the
// HTTP layer over it. The binary in main.rs only does wiring; integration
// tests drive `web::create_app` against a repository directly.

pub mod repository;
pub mod shutdown_signal;
pub mod web;
