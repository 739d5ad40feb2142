use crate::cli::args::{Cli, Command, InitArgs, RunArgs};
use sqlgauge_core::config::{load_config, write_sample_config};
use sqlgauge_core::corpus::load_corpus;
use sqlgauge_core::engine::runner::Evaluator;
use sqlgauge_core::executor::IsolatedExecutor;
use sqlgauge_core::providers::llm::openai::OpenAiGenerator;
use sqlgauge_core::providers::llm::replay::ReplayGenerator;
use sqlgauge_core::providers::llm::SqlGenerator;
use sqlgauge_core::report;
use sqlgauge_core::sampler;
use std::sync::Arc;

pub mod exit_codes {
    pub const OK: i32 = 0;
    pub const GATE_FAILED: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
}

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Run(args) => run(args).await,
        Command::Init(args) => init(args),
        Command::Version => {
            println!("sqlgauge {}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}

fn init(args: InitArgs) -> anyhow::Result<i32> {
    write_sample_config(&args.config)?;
    eprintln!("wrote sample config to {}", args.config.display());
    Ok(exit_codes::OK)
}

async fn run(args: RunArgs) -> anyhow::Result<i32> {
    let cfg = match load_config(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    let db_path = args.db.clone().unwrap_or_else(|| cfg.db.clone());
    let corpus_path = args.corpus.clone().unwrap_or_else(|| cfg.corpus.clone());
    let target_count = args.count.or(cfg.settings.target_count).unwrap_or(25);
    let seed = args.seed.or(cfg.settings.seed).unwrap_or(42);
    let ratios = cfg
        .settings
        .ratios
        .clone()
        .unwrap_or_else(sampler::default_ratios);

    let scorer_name = args
        .scorer
        .clone()
        .or_else(|| cfg.settings.scorer.clone())
        .unwrap_or_else(|| "matching_blocks".to_string());
    let Some(scorer) = sqlgauge_metrics::scorer_by_name(&scorer_name) else {
        eprintln!("config error: unknown scorer '{scorer_name}' (matching_blocks|levenshtein)");
        return Ok(exit_codes::CONFIG_ERROR);
    };

    let generator: Arc<dyn SqlGenerator> = match args.generator.as_str() {
        "replay" => {
            let Some(predictions) = args.predictions.as_deref() else {
                eprintln!("config error: --generator replay requires --predictions");
                return Ok(exit_codes::CONFIG_ERROR);
            };
            Arc::new(ReplayGenerator::from_path(predictions)?)
        }
        "openai" => {
            let Some(api_key) = args.api_key.clone() else {
                eprintln!("config error: --generator openai requires --api-key or SQLGAUGE_API_KEY");
                return Ok(exit_codes::CONFIG_ERROR);
            };
            Arc::new(OpenAiGenerator::new(
                cfg.model.clone(),
                api_key,
                args.base_url.clone().or_else(|| cfg.settings.base_url.clone()),
            ))
        }
        other => {
            eprintln!("config error: unknown generator '{other}' (openai|replay)");
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    let executor = IsolatedExecutor::open(&db_path)?;
    let schema_context = executor.schema_context()?;
    let corpus = load_corpus(&corpus_path)?;
    let samples = sampler::select(&corpus, target_count, &ratios, seed)?;
    tracing::info!(
        selected = samples.len(),
        corpus = corpus.len(),
        seed,
        "selected test subset"
    );

    let evaluator = Evaluator {
        executor,
        generator,
        scorer,
        schema_context,
        timeout_seconds: cfg.settings.timeout_seconds.unwrap_or(30),
        count_reference_defects: args.count_reference_defects
            || cfg.settings.count_reference_defects.unwrap_or(false),
        suite: cfg.suite.clone(),
        model: cfg.model.clone(),
    };

    let eval_report = evaluator.evaluate_dataset(&samples).await?;
    report::console::print_summary(&eval_report);
    report::write_json(&eval_report, &args.out)?;
    eprintln!("report written to {}", args.out.display());

    if let Some(min) = args.min_execution_accuracy {
        if eval_report.execution_accuracy < min {
            eprintln!(
                "gate failed: execution accuracy {:.3} < required {:.3}",
                eval_report.execution_accuracy, min
            );
            return Ok(exit_codes::GATE_FAILED);
        }
    }

    Ok(exit_codes::OK)
}
