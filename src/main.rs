use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = graft::cli::run().await {
        graft::ui::print_error(&e.to_string());
        process::exit(1);
    }
}
