use cc;
use std::env;

fn main() {
    println!("cargo:rerun-if-changed=csrc/fast_stub.c");
    println!("cargo:rerun-if-env-changed=FAST_LIBRARY_DIR");
    if env::var_os("CARGO_FEATURE_FAST").is_some() {
        if let Ok(dir) = env::var("FAST_LIBRARY_DIR") {
            println!("cargo:rustc-link-search=native={}", dir);
        }
        println!("cargo:rustc-link-lib=dylib=FAST_Library");
    } else {
        cc::Build::new()
            .file("csrc/fast_stub.c")
            .compile("fast_stub");
    }
}
