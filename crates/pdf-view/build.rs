use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Only the PDFium backend needs the native library
    if env::var("CARGO_FEATURE_PDFIUM").is_err() {
        return;
    }

    let target = env::var("TARGET").unwrap();

    // Use pdfium_7543 (latest stable as of pdfium-render 0.8.37)
    let pdfium_version = "chromium/7543";

    let Some((platform, arch, lib_name)) = platform_library(&target) else {
        println!("cargo:warning=Unsupported target platform: {}", target);
        return;
    };

    // Set up paths relative to the repository root
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let workspace_root = manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("Failed to find workspace root");
    let pdfium_dir = workspace_root.join("vendor").join("pdfium");
    let lib_dir = pdfium_dir.join("lib");
    let lib_path = lib_dir.join(lib_name);

    // pdfium-render binds at runtime; the crate only needs to know where to look
    println!("cargo:rustc-env=PDFIUM_VENDOR_DIR={}", lib_dir.display());
    println!("cargo:rerun-if-changed={}", lib_dir.display());

    if lib_path.exists() {
        return;
    }

    if env::var("PDF_VIEW_NO_DOWNLOAD").is_ok() {
        println!(
            "cargo:warning=PDFium not found at {} and downloads are disabled; falling back to the system library at runtime",
            lib_path.display()
        );
        return;
    }

    let download_url = format!(
        "https://github.com/bblanchon/pdfium-binaries/releases/download/{}/pdfium-{}-{}.tgz",
        pdfium_version, platform, arch
    );
    println!("cargo:warning=Downloading PDFium from {}", download_url);

    fs::create_dir_all(&lib_dir).expect("Failed to create lib directory");
    let temp_file = env::temp_dir().join("pdfium.tgz");

    if let Err(e) = download_file(&download_url, &temp_file)
        .and_then(|()| extract_tarball(&temp_file, &pdfium_dir))
    {
        println!(
            "cargo:warning=PDFium download failed ({}); falling back to the system library at runtime",
            e
        );
        let _ = fs::remove_file(&temp_file);
        return;
    }
    let _ = fs::remove_file(&temp_file);

    if lib_path.exists() {
        println!(
            "cargo:warning=PDFium installed successfully to {}",
            pdfium_dir.display()
        );
    } else {
        println!(
            "cargo:warning=PDFium archive did not contain {}",
            lib_path.display()
        );
    }
}

/// (platform, arch, library file) as named by the pdfium-binaries releases
fn platform_library(target: &str) -> Option<(&'static str, &'static str, &'static str)> {
    let arch = if target.contains("aarch64") {
        "arm64"
    } else if target.contains("i686") {
        "x86"
    } else {
        "x64"
    };

    if target.contains("apple") {
        Some(("mac", arch, "libpdfium.dylib"))
    } else if target.contains("linux") {
        Some(("linux", arch, "libpdfium.so"))
    } else if target.contains("windows") {
        Some(("win", arch, "pdfium.dll"))
    } else {
        None
    }
}

fn download_file(url: &str, dest: &Path) -> std::io::Result<()> {
    use std::io::Write;

    let response = ureq::get(url)
        .call()
        .map_err(|e| std::io::Error::other(format!("{}: {}", url, e)))?;

    let mut file = fs::File::create(dest)?;
    std::io::copy(&mut response.into_reader(), &mut file)?;
    file.flush()
}

fn extract_tarball(tarball: &Path, dest: &Path) -> std::io::Result<()> {
    use flate2::read::GzDecoder;
    use tar::Archive;

    let tar_gz = fs::File::open(tarball)?;
    let mut archive = Archive::new(GzDecoder::new(tar_gz));
    archive.unpack(dest)
}
