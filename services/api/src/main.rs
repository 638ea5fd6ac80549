use konastone_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("konastone error: {err}");
        std::process::exit(1);
    }
}
