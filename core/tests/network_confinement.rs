use std::fs;
use std::path::Path;
use walkdir::WalkDir;

#[test]
fn core_network_access_is_confined_to_fetch_http_module() {
    let core_src = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let allowed = core_src.join("fetch").join("http.rs");

    let forbidden = [
        "reqwest::",
        "ureq::",
        "surf::",
        "hyper::Client",
        "std::net::TcpStream",
    ];
    for entry in WalkDir::new(&core_src) {
        let entry = entry.unwrap();
        let p = entry.path();
        if p.extension().and_then(|x| x.to_str()) != Some("rs") || p == allowed {
            continue;
        }
        let text = fs::read_to_string(p).unwrap();
        for tok in forbidden {
            assert!(
                !text.contains(tok),
                "network token '{}' outside fetch/http.rs in {}",
                tok,
                p.display()
            );
        }
    }
}
