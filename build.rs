use std::{env, fs, path::Path};

fn main() {
    println!("cargo:rerun-if-changed=config.json");

    // OUT_DIR = target/debug/build/<crate>/out
    let Ok(out_dir) = env::var("OUT_DIR") else {
        println!("cargo:warning=OUT_DIR not set, config.json not copied");
        return;
    };

    // Three levels up is target/debug or target/release
    let Some(exe_dir) = Path::new(&out_dir).ancestors().nth(3) else {
        println!("cargo:warning=Cannot find executable directory");
        return;
    };

    let src = Path::new("config.json");
    if !src.exists() {
        return;
    }

    let dst = exe_dir.join("config.json");
    if let Err(e) = fs::copy(src, &dst) {
        println!("cargo:warning=Could NOT copy config.json to {}: {}", dst.display(), e);
    }
}
