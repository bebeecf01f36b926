// Build script for openxml-office-binding
//
// With the `linked` feature the native engine is linked at build time.
// Set OPENXML_OFFICE_LIB_DIR to the directory holding
// libdraviavemal_openxml_office_ffi when it is not on the default search path.

fn main() {
    println!("cargo:rerun-if-env-changed=OPENXML_OFFICE_LIB_DIR");

    if std::env::var_os("CARGO_FEATURE_LINKED").is_some() {
        if let Some(dir) = std::env::var_os("OPENXML_OFFICE_LIB_DIR") {
            println!("cargo:rustc-link-search=native={}", dir.to_string_lossy());
        }
    }
}
