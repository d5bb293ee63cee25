//! Host-side helper: `cargo run` compiles the carousel to WASM into
//! `static/pkg` and serves the demo page from `static/` locally.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    use std::process::{Command, Stdio};
    use std::{thread, time::Duration};

    const PORT: &str = "8000";

    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH. Skipping wasm build; the page may load stale artifacts.");
        }
    }

    println!("Serving demo at http://127.0.0.1:{PORT} …");
    let mut server = Command::new("python3")
        .args(["-m", "http.server", PORT, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    loop {
        if let Some(status) = server.try_wait()? {
            eprintln!("http server exited: {status}");
            return Ok(());
        }
        thread::sleep(Duration::from_secs(1));
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
