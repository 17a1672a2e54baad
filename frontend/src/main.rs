fn main() {
    // In the browser the library's wasm start hook mounts the app.
    #[cfg(not(target_arch = "wasm32"))]
    accounts_frontend::start();
}
