use std::{env, path::PathBuf};

fn cuda_root() -> Option<PathBuf> {
    let candidates = ["CUDA_HOME", "CUDA_PATH"]
        .iter()
        .filter_map(|var| env::var_os(var).map(PathBuf::from))
        .chain(std::iter::once(PathBuf::from("/usr/local/cuda")));

    candidates
        .into_iter()
        .find(|root| root.join("include/nppi_geometry_transforms.h").is_file())
}

fn main() {
    println!("cargo::rustc-check-cfg=cfg(npp_cuda)");
    println!("cargo:rerun-if-env-changed=CUDA_HOME");
    println!("cargo:rerun-if-env-changed=CUDA_PATH");

    let Some(cuda) = cuda_root() else {
        println!("cargo:warning=Building without CUDA/NPP (toolkit headers not found), CPU warp only");
        return;
    };

    println!("cargo:rustc-cfg=npp_cuda");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Link NPP libraries
    println!("cargo:rustc-link-search=native={}", cuda.join("lib64").display());
    println!("cargo:rustc-link-lib=dylib=nppig"); // NPP Image Geometry Transforms
    println!("cargo:rustc-link-lib=dylib=nppc"); // NPP Core (library version)
    println!("cargo:rustc-link-lib=dylib=cudart"); // CUDA Runtime (runtime version)

    //
    // ---- Generate NPP bindings ----
    //
    let bindings = bindgen::Builder::default()
        .header_contents("npp_wrapper.h", r#"
            #include <cuda_runtime_api.h>
            #include <nppcore.h>
            #include <nppi_geometry_transforms.h>
            #include <nppdefs.h>
        "#)
        .clang_arg(format!("-I{}", cuda.join("include").display()))
        // Affine warp
        .allowlist_function("nppiWarpAffine_8u_C1R")
        // Version banner
        .allowlist_function("nppGetLibVersion")
        .allowlist_function("cudaRuntimeGetVersion")
        // Types
        .allowlist_type("NppStatus")
        .allowlist_type("cudaError_t")
        .allowlist_type("NppiSize")
        .allowlist_type("NppiRect")
        .allowlist_type("NppLibraryVersion")
        .allowlist_type("NppiInterpolationMode")
        .allowlist_var("NPPI_INTER_.*")
        .raw_line("// Mark extern blocks as unsafe for Rust 2024")
        .generate()
        .expect("Unable to generate NPP bindings");

    let out_path = out_dir.join("npp_bindings.rs");
    bindings
        .write_to_file(&out_path)
        .expect("Couldn't write NPP bindings!");

    // Read the generated file and add unsafe to extern blocks
    let contents = std::fs::read_to_string(&out_path).unwrap();
    let fixed = contents.replace("extern \"C\" {", "unsafe extern \"C\" {");
    std::fs::write(&out_path, fixed).unwrap();
}
