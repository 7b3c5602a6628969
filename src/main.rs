// Native builds only run the test suite; the page itself is wasm-only.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod catalog;
mod choreography;
mod config;
mod engine;
mod form;
mod modal;
mod scroll;
mod signal;
mod site;
mod telemetry;
mod theme;
mod timer;
mod transition;
mod visibility;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
