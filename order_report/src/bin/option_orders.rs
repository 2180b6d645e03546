use brokerage::{Config, RobinhoodClient};

#[tokio::main]
async fn main() {
    let _guard = utils::init_tracing();

    // 任何错误都只打印，退出码保持 0
    println!("{}", order_report::LOGIN_NOTICE);
    println!("{}", order_report::outcome(report().await));
}

async fn report() -> brokerage::Result<String> {
    let config = Config::from_env()?;
    let mut client = RobinhoodClient::from_config(&config);
    order_report::run(&mut client, &config).await
}
