#[tokio::main]
async fn main() -> anyhow::Result<()> {
    question_bank_backend::run().await
}
