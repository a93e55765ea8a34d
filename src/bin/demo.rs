use mgsample::demo::{self, Command, DemoConfig};

fn print_usage_and_exit(exit_code: i32) -> ! {
    eprintln!("{}", demo::config::USAGE);
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match DemoConfig::from_args(std::env::args().skip(1), |k| std::env::var(k).ok()) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => print_usage_and_exit(0),
        Err(e) => {
            eprintln!("error: {e}");
            print_usage_and_exit(2);
        }
    };

    let client = demo::connect(&config).await?;
    let report = demo::run(&client, &config).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
