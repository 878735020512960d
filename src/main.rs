use clap::Parser;
use course_plans::config::cli::ThemeFormat;
use course_plans::utils::{logger, validation::Validate};
use course_plans::{http_plan_store, CliConfig, Plan, PlanError, Readable, ThemeConfig};

fn print_plans(plans: &[Plan]) {
    for plan in plans {
        println!(
            "{}\t{}\t{} → {}\t[{}]",
            plan.id,
            plan.title,
            plan.available_from,
            plan.available_to,
            plan.tags.join(", ")
        );
    }
}

fn fail(e: &PlanError) -> ! {
    tracing::error!("❌ Loading plans failed: {}", e);
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file = cli.file_config();
    let file_ref = file.as_ref().ok().and_then(Option::as_ref);
    if cli.json_logs(file_ref) {
        logger::init_json_logger(cli.verbose(file_ref));
    } else {
        logger::init_cli_logger(cli.verbose(file_ref));
    }

    if let Some(format) = cli.print_theme {
        let theme = ThemeConfig::default();
        match format {
            ThemeFormat::Css => print!("{}", theme.to_css_variables()),
            ThemeFormat::Json => println!("{}", serde_json::to_string_pretty(&theme.to_json())?),
        }
        return Ok(());
    }

    let config = match file {
        Ok(file) => cli.merge(file.as_ref()),
        Err(e) => fail(&e),
    };
    tracing::debug!("Loader config: {:?}", config);
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let store = match http_plan_store(&config) {
        Ok(store) => store,
        Err(e) => fail(&e),
    };

    let subscription = store.subscribe(|plans: Option<&Vec<Plan>>| {
        if let Some(plans) = plans {
            print_plans(plans);
        }
    });

    tracing::info!("Loading plans");
    if let Err(e) = store.load().await {
        fail(&e);
    }

    subscription.unsubscribe();
    Ok(())
}
