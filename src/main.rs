use clap::Parser;
use web_stack::config::toml_config::TomlConfig;
use web_stack::core::StackOutputs;
use web_stack::utils::{logger, validation::Validate};
use web_stack::{CliConfig, DeployEngine, DryRunEngine, ServiceConfig, StaticZoneDirectory};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting web-stack");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match load_service_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let result = if cli.dry_run {
        run_dry(&cli, &config).await
    } else {
        deploy(&cli, &config).await
    };

    match result {
        Ok(outputs) => {
            if cli.dry_run {
                println!("✅ Declaration rendered (dry run, nothing submitted)");
            } else {
                println!("✅ Declaration submitted successfully!");
            }
            for (name, value) in &outputs.values {
                println!("  {} = {}", name, value);
            }
        }
        Err(e) => {
            tracing::error!("❌ Deployment failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    Ok(())
}

fn load_service_config(cli: &CliConfig) -> web_stack::Result<ServiceConfig> {
    match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            Ok(TomlConfig::from_file(path)?.into_service_config())
        }
        None => ServiceConfig::from_env(),
    }
}

/// Dry runs never consult the live provider, so the zone always comes out as
/// a declared resource.
async fn run_dry(cli: &CliConfig, config: &ServiceConfig) -> web_stack::Result<StackOutputs> {
    let engine = DeployEngine::new(
        StaticZoneDirectory::empty(),
        DryRunEngine::new(cli.out.clone()),
    );
    engine.run(config).await
}

#[cfg(feature = "aws")]
async fn deploy(_cli: &CliConfig, config: &ServiceConfig) -> web_stack::Result<StackOutputs> {
    use web_stack::{IntakeConfig, Route53ZoneDirectory, S3IntakeEngine};

    let intake = IntakeConfig::from_env()?;

    let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .load()
        .await;

    let zones = Route53ZoneDirectory::new(aws_sdk_route53::Client::new(&shared));
    let engine = S3IntakeEngine::new(aws_sdk_s3::Client::new(&shared), intake);

    DeployEngine::new(zones, engine).run(config).await
}

#[cfg(not(feature = "aws"))]
async fn deploy(cli: &CliConfig, config: &ServiceConfig) -> web_stack::Result<StackOutputs> {
    tracing::warn!("Built without the aws feature; rendering the declaration instead");
    run_dry(cli, config).await
}
