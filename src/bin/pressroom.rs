// 使用 mimalloc 作为全局内存分配器
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() {
    if let Err(e) = pressroom::run().await {
        tracing::error!(%e, "pressroom exited");
        eprintln!("pressroom: {}", e);
        std::process::exit(1);
    }
}
