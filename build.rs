fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Version and build time reported at startup
    if let Err(e) = built::write_built_file() {
        panic!("Failed to write build information: {}", e);
    }
}
