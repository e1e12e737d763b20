fn main() {
    // include_dir! embeds frontend/dist at compile time; cargo does not
    // track those files on its own.
    println!("cargo:rerun-if-changed=frontend/dist");
}
