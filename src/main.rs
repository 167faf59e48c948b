mod app;
mod clients;
mod threads;
mod types;

#[tokio::main]
async fn main() {
    app::run().await;
}
