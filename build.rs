/// Expose the compilation target triple as an environment variable at build time.
///
/// `constants::LONG_VERSION` embeds it so `--version` output names the platform.
fn main() {
    println!(
        "cargo:rustc-env=TARGET={}",
        std::env::var("TARGET").unwrap()
    );
}
